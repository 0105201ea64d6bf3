//! Snapshots
//!
//! The persisted JSON document. Current snapshots hold three collections
//! (`clients`, `users`, `trackings`) plus `metadata`; documents written by the
//! older dashboard are recognized and migrated once, see [`legacy`].

use jiff::Timestamp;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    clients::{Client, ClientUuid},
    dataset::Dataset,
    identities::{Identity, IdentityError, LoginId},
    trackings::{TrackingError, TrackingRecord, TrackingUuid},
};

pub mod legacy;

pub use legacy::MigrationWarning;

/// Version string written into every snapshot's metadata.
pub const FORMAT_VERSION: &str = "brix-snapshot/1";

/// Snapshot errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not valid JSON or does not match the expected shape.
    #[error("invalid snapshot document: {0}")]
    Json(#[from] serde_json::Error),

    /// Two users share a login id after normalization.
    #[error("duplicate login id `{0}`")]
    DuplicateLogin(LoginId),

    /// Two clients share an id.
    #[error("duplicate client {0}")]
    DuplicateClient(ClientUuid),

    /// Two tracking records share an id.
    #[error("duplicate tracking record {0}")]
    DuplicateTracking(TrackingUuid),

    /// A tracking record carries an unrecognized customs channel.
    #[error("container `{container}` has unknown customs channel `{value}`")]
    InvalidChannel {
        /// Container id of the offending record.
        container: String,

        /// The unrecognized value.
        value: String,
    },

    /// A user record failed validation.
    #[error("invalid user `{login}`: {source}")]
    Identity {
        /// Login id as written in the document.
        login: String,

        /// What was wrong.
        #[source]
        source: IdentityError,
    },

    /// A tracking record failed validation.
    #[error(transparent)]
    Tracking(#[from] TrackingError),
}

/// Snapshot metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    /// When the snapshot was written.
    pub saved_at: Option<Timestamp>,

    /// Free-text format version.
    pub version: Option<String>,
}

/// Current snapshot document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    /// Clients, ordered by legal name.
    pub clients: Vec<Client>,

    /// Identities, ordered by login id.
    pub users: Vec<Identity>,

    /// Tracking records in insertion order.
    pub trackings: Vec<TrackingRecord>,

    /// Metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

/// Which document format a snapshot was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Current format.
    Current,

    /// Older dashboard format, migrated on load.
    Legacy,
}

/// A parsed snapshot.
#[derive(Debug, Clone)]
pub struct Loaded {
    /// The resulting state.
    pub dataset: Dataset,

    /// Format the document was in.
    pub format: Format,

    /// Metadata as found in the document.
    pub metadata: Metadata,

    /// Problems migration resolved by failing closed.
    pub warnings: Vec<MigrationWarning>,
}

/// Parse a snapshot document in either format.
///
/// # Errors
///
/// Returns an error for malformed JSON, unknown or missing fields, unknown
/// customs channels and duplicate ids or logins.
pub fn parse(json: &str) -> Result<Loaded, SnapshotError> {
    let value: Value = serde_json::from_str(json)?;

    if legacy::is_legacy(&value) {
        return legacy::migrate(serde_json::from_value(value)?);
    }

    let snapshot: Snapshot = serde_json::from_value(value)?;
    let metadata = snapshot.metadata.clone();

    Ok(Loaded {
        dataset: snapshot.into_dataset()?,
        format: Format::Current,
        metadata,
        warnings: Vec::new(),
    })
}

/// Render a dataset as a pretty-printed current snapshot.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] if serialization fails.
pub fn render(dataset: &Dataset, saved_at: Timestamp) -> Result<String, SnapshotError> {
    let snapshot = Snapshot::from_dataset(dataset, saved_at);

    Ok(serde_json::to_string_pretty(&snapshot)?)
}

impl Snapshot {
    /// Capture a dataset with deterministic ordering.
    pub fn from_dataset(dataset: &Dataset, saved_at: Timestamp) -> Self {
        Self {
            clients: dataset.sorted_clients().into_iter().cloned().collect(),
            users: dataset.identities.sorted().into_iter().cloned().collect(),
            trackings: dataset.trackings.clone(),
            metadata: Metadata {
                saved_at: Some(saved_at),
                version: Some(FORMAT_VERSION.to_string()),
            },
        }
    }

    /// Build the in-memory state, checking ids are unique.
    ///
    /// # Errors
    ///
    /// Returns an error on the first duplicate client, login or tracking id.
    pub fn into_dataset(self) -> Result<Dataset, SnapshotError> {
        let mut dataset = Dataset::default();

        for client in self.clients {
            if dataset.clients.contains_key(&client.uuid) {
                return Err(SnapshotError::DuplicateClient(client.uuid));
            }

            dataset.clients.insert(client.uuid, client);
        }

        for identity in self.users {
            let login = identity.login.to_string();

            dataset
                .identities
                .insert(identity)
                .map_err(|error| match error {
                    IdentityError::DuplicateLogin(login) => SnapshotError::DuplicateLogin(login),
                    source => SnapshotError::Identity { login, source },
                })?;
        }

        let mut seen = FxHashSet::default();

        for record in &self.trackings {
            if !seen.insert(record.uuid) {
                return Err(SnapshotError::DuplicateTracking(record.uuid));
            }
        }

        dataset.trackings = self.trackings;

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use testresult::TestResult;

    use crate::{
        clients::ClientDetails,
        identities::{IdentityProfile, Role, Secret},
        trackings::{CustomsChannel, Milestones},
    };

    use super::*;

    fn dataset() -> TestResult<Dataset> {
        let client = Client::new(
            ClientUuid::new(),
            ClientDetails {
                legal_name: "MC CONFECCIONES".to_string(),
                trade_name: "MC".to_string(),
                email: "ops@mc.example".to_string(),
                ..ClientDetails::default()
            },
            Timestamp::UNIX_EPOCH,
        );

        let mut dataset = Dataset::default();

        dataset.identities.insert(Identity::new(
            LoginId::parse("aristide")?,
            Secret::new("1234")?,
            IdentityProfile {
                display_name: "Aristide".to_string(),
                email: None,
                role: Role::Client,
                clients: BTreeSet::from([client.uuid]),
            },
            Timestamp::UNIX_EPOCH,
        )?)?;

        dataset.trackings.push(TrackingRecord {
            uuid: TrackingUuid::new(),
            version: 3,
            client: client.uuid,
            container: "TCLU1234567".to_string(),
            milestones: Milestones {
                loaded_at: Some("15/05/2025".to_string()),
                ..Milestones::default()
            },
            customs_channel: Some(CustomsChannel::Green),
            final_status: None,
        });

        dataset.clients.insert(client.uuid, client);

        Ok(dataset)
    }

    #[test]
    fn rendered_snapshot_parses_back_to_the_same_dataset() -> TestResult {
        let dataset = dataset()?;

        let json = render(&dataset, Timestamp::UNIX_EPOCH)?;
        let loaded = parse(&json)?;

        assert_eq!(loaded.format, Format::Current);
        assert_eq!(loaded.dataset, dataset);
        assert_eq!(loaded.metadata.version.as_deref(), Some(FORMAT_VERSION));
        assert!(loaded.warnings.is_empty());

        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() -> TestResult {
        let json = render(&dataset()?, Timestamp::UNIX_EPOCH)?;
        let json = json.replacen("\"container\"", "\"unexpected\": 1, \"container\"", 1);

        assert!(matches!(parse(&json), Err(SnapshotError::Json(_))));

        Ok(())
    }

    #[test]
    fn duplicate_tracking_ids_are_rejected() -> TestResult {
        let mut dataset = dataset()?;
        let copy = dataset.trackings.first().cloned().ok_or("missing record")?;
        dataset.trackings.push(copy);

        let json = render(&dataset, Timestamp::UNIX_EPOCH)?;

        assert!(matches!(
            parse(&json),
            Err(SnapshotError::DuplicateTracking(_))
        ));

        Ok(())
    }

    #[test]
    fn empty_document_is_an_empty_dataset() -> TestResult {
        let loaded = parse(r#"{"clients": [], "users": [], "trackings": []}"#)?;

        assert_eq!(loaded.dataset, Dataset::default());

        Ok(())
    }
}
