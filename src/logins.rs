//! Generated Logins
//!
//! Login ids derived from a client's legal name, and temporary secrets issued
//! alongside them.

use rand::seq::SliceRandom;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::identities::{LoginId, Secret};

const LEGAL_SUFFIXES: [&str; 4] = ["ltda", "sa", "epp", "me"];
const MAX_LOGIN_CHARS: usize = 20;
const SECRET_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SECRET_LENGTH: usize = 8;

/// Suggest a login id for a client.
///
/// Accents are stripped, spaces become underscores and `.`/`,` are dropped.
/// The first two words longer than two characters that are not legal suffixes
/// are joined with `_`; with one such word it is used alone, with none the whole
/// cleaned name is. The result is capped at 20 characters.
///
/// Returns `None` if nothing usable is left.
pub fn suggest_login(legal_name: &str) -> Option<LoginId> {
    let cleaned: String = legal_name
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !matches!(c, '.' | ','))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect::<String>()
        .to_lowercase();

    let words: Vec<&str> = cleaned
        .split('_')
        .filter(|word| word.chars().count() > 2 && !LEGAL_SUFFIXES.contains(word))
        .take(2)
        .collect();

    let login = if words.is_empty() {
        cleaned.clone()
    } else {
        words.join("_")
    };

    LoginId::parse(&login.chars().take(MAX_LOGIN_CHARS).collect::<String>()).ok()
}

/// Generate an 8 character secret of lowercase letters and digits.
pub fn temporary_secret() -> Secret {
    let mut rng = rand::thread_rng();

    let secret = (0..SECRET_LENGTH)
        .filter_map(|_| SECRET_ALPHABET.choose(&mut rng))
        .map(|byte| char::from(*byte))
        .collect();

    Secret::generated(secret)
}
