//! Client Payloads

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brix::clients::{Client, ClientDetails};

/// Client details, as entered
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClientDetailsPayload {
    pub legal_name: String,
    pub trade_name: String,

    #[serde(default)]
    pub tax_id: Option<String>,

    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    /// Contact person
    #[serde(default)]
    pub contact: Option<String>,
}

impl From<ClientDetailsPayload> for ClientDetails {
    fn from(payload: ClientDetailsPayload) -> Self {
        ClientDetails {
            legal_name: payload.legal_name,
            trade_name: payload.trade_name,
            tax_id: payload.tax_id,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            contact: payload.contact,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClientResponse {
    pub uuid: Uuid,
    pub legal_name: String,
    pub trade_name: String,
    pub tax_id: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub active: bool,

    /// When the client was registered, if known
    pub registered_at: Option<String>,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        ClientResponse {
            uuid: client.uuid.into(),
            legal_name: client.legal_name,
            trade_name: client.trade_name,
            tax_id: client.tax_id,
            email: client.email,
            phone: client.phone,
            address: client.address,
            contact: client.contact,
            active: client.active,
            registered_at: client.registered_at.map(|at| at.to_string()),
        }
    }
}
