//! Clients
//!
//! Organizations whose shipments are tracked. Tracking records and identities
//! refer to a client through its [`ClientUuid`]; the legal name is an ordinary,
//! mutable attribute.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// Client UUID
pub type ClientUuid = TypedUuid<Client>;

/// Namespace for ids derived from legacy legal-name keys.
const LEGACY_CLIENT_NAMESPACE: Uuid = Uuid::from_u128(0x6b1d_4c3e_9a27_5f10_8e44_b2c9_07d1_a35e);

impl ClientUuid {
    /// Deterministic id for a client that was keyed by its legal name.
    ///
    /// Every reference to the same legacy name resolves to the same id, whether
    /// or not a client record with that name exists.
    #[must_use]
    pub fn from_legacy_name(name: &str) -> Self {
        Self::from_uuid(Uuid::new_v5(&LEGACY_CLIENT_NAMESPACE, name.trim().as_bytes()))
    }
}

/// Client validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A required text field was blank.
    #[error("client field `{0}` is required")]
    MissingField(&'static str),
}

/// Client Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Client {
    /// Stable client identifier.
    pub uuid: ClientUuid,

    /// Registered legal name.
    pub legal_name: String,

    /// Trading name shown to users.
    pub trade_name: String,

    /// Tax registration number.
    pub tax_id: Option<String>,

    /// Contact email.
    pub email: String,

    /// Contact phone.
    pub phone: Option<String>,

    /// Postal address.
    pub address: Option<String>,

    /// Contact person.
    pub contact: Option<String>,

    /// Inactive clients stay referenced but are hidden from pickers.
    pub active: bool,

    /// When the client was registered, if known.
    pub registered_at: Option<Timestamp>,
}

/// Client details supplied when creating or editing a client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientDetails {
    /// Registered company name. Required and unique.
    pub legal_name: String,

    /// Name shown to users. Required.
    pub trade_name: String,

    /// Tax registration number.
    pub tax_id: Option<String>,

    /// Contact email. Required.
    pub email: String,

    /// Phone number.
    pub phone: Option<String>,

    /// Postal address.
    pub address: Option<String>,

    /// Person to contact.
    pub contact: Option<String>,
}

impl ClientDetails {
    /// Trim every field and check the required ones are present.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] for a blank legal name, trade name or email.
    pub fn normalized(self) -> Result<Self, ClientError> {
        let details = Self {
            legal_name: self.legal_name.trim().to_string(),
            trade_name: self.trade_name.trim().to_string(),
            tax_id: non_blank(self.tax_id),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone),
            address: non_blank(self.address),
            contact: non_blank(self.contact),
        };

        if details.legal_name.is_empty() {
            return Err(ClientError::MissingField("legal_name"));
        }

        if details.trade_name.is_empty() {
            return Err(ClientError::MissingField("trade_name"));
        }

        if details.email.is_empty() {
            return Err(ClientError::MissingField("email"));
        }

        Ok(details)
    }
}

impl Client {
    /// Build an active client from validated details.
    #[must_use]
    pub fn new(uuid: ClientUuid, details: ClientDetails, registered_at: Timestamp) -> Self {
        Self {
            uuid,
            legal_name: details.legal_name,
            trade_name: details.trade_name,
            tax_id: details.tax_id,
            email: details.email,
            phone: details.phone,
            address: details.address,
            contact: details.contact,
            active: true,
            registered_at: Some(registered_at),
        }
    }

    /// Replace the editable details, keeping id and registration time.
    pub fn apply(&mut self, details: ClientDetails, active: bool) {
        self.legal_name = details.legal_name;
        self.trade_name = details.trade_name;
        self.tax_id = details.tax_id;
        self.email = details.email;
        self.phone = details.phone;
        self.address = details.address;
        self.contact = details.contact;
        self.active = active;
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ClientDetails {
        ClientDetails {
            legal_name: "  MC CONFECCIONES ".to_string(),
            trade_name: "MC".to_string(),
            email: "ops@mc.example".to_string(),
            phone: Some("   ".to_string()),
            ..ClientDetails::default()
        }
    }

    #[test]
    fn legacy_ids_ignore_surrounding_whitespace() {
        assert_eq!(
            ClientUuid::from_legacy_name("BENTO COMEX"),
            ClientUuid::from_legacy_name(" BENTO COMEX ")
        );
        assert_ne!(
            ClientUuid::from_legacy_name("BENTO COMEX"),
            ClientUuid::from_legacy_name("MC CONFECCIONES")
        );
    }

    #[test]
    fn normalized_trims_and_drops_blank_optionals() -> Result<(), ClientError> {
        let details = details().normalized()?;

        assert_eq!(details.legal_name, "MC CONFECCIONES");
        assert_eq!(details.phone, None);

        Ok(())
    }

    #[test]
    fn normalized_requires_email() {
        let result = ClientDetails {
            email: " ".to_string(),
            ..details()
        }
        .normalized();

        assert_eq!(result, Err(ClientError::MissingField("email")));
    }

    #[test]
    fn apply_keeps_identity_and_registration() -> Result<(), ClientError> {
        let uuid = ClientUuid::new();
        let mut client = Client::new(uuid, details().normalized()?, Timestamp::UNIX_EPOCH);

        client.apply(
            ClientDetails {
                legal_name: "MC CONFECCIONES SA".to_string(),
                ..details().normalized()?
            },
            false,
        );

        assert_eq!(client.uuid, uuid);
        assert_eq!(client.legal_name, "MC CONFECCIONES SA");
        assert!(!client.active);
        assert_eq!(client.registered_at, Some(Timestamp::UNIX_EPOCH));

        Ok(())
    }
}
