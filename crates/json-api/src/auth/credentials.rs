//! HTTP Basic credentials.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use salvo::{Request, http::header::AUTHORIZATION};

/// Login and secret presented with a request.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct Credentials {
    pub(super) login: String,
    pub(super) secret: String,
}

/// Decode `Authorization: Basic base64(login:secret)`.
///
/// The secret may itself contain `:`; the login may not.
pub(super) fn extract_basic_credentials(req: &Request) -> Option<Credentials> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;

    parse_basic(value)
}

fn parse_basic(value: &str) -> Option<Credentials> {
    let (scheme, encoded) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (login, secret) = decoded.split_once(':')?;

    if login.trim().is_empty() || secret.trim().is_empty() {
        return None;
    }

    Some(Credentials {
        login: login.to_owned(),
        secret: secret.to_owned(),
    })
}
