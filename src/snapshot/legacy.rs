//! Legacy Snapshots
//!
//! Documents written by the older dashboard use Portuguese keys, key clients by
//! legal name and link users to clients either through a single
//! `cliente_vinculado` or a `clientes_vinculados` list. They are converted once,
//! on load; nothing downstream ever sees the old shapes.

use std::{
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
};

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    clients::{Client, ClientUuid, non_blank},
    dataset::Dataset,
    identities::{Identity, IdentityError, LoginId, OwnedScope, Role, Secret},
    trackings::{CustomsChannel, Milestones, TrackingDraft, TrackingRecord, TrackingUuid},
};

use super::{Format, Loaded, Metadata, SnapshotError};

/// Something migration could only resolve by failing closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationWarning {
    /// Role was missing or unrecognized; the user became a client with no
    /// clients, which sees nothing.
    UnknownRole {
        /// Affected login.
        login: LoginId,

        /// Role as written, if any.
        role: Option<String>,
    },

    /// A non-admin user was linked to no client and sees nothing.
    MissingScope {
        /// Affected login.
        login: LoginId,
    },

    /// A tracking record names a client that has no record of its own.
    OrphanedTracking {
        /// Container id.
        container: String,

        /// Client name as written.
        client: String,
    },
}

impl Display for MigrationWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRole { login, role } => write!(
                f,
                "user `{login}` has unknown role `{}`; it was given an empty client scope",
                role.as_deref().unwrap_or_default()
            ),
            Self::MissingScope { login } => {
                write!(f, "user `{login}` is not linked to any client and will see no records")
            }
            Self::OrphanedTracking { container, client } => {
                write!(f, "container `{container}` belongs to unknown client `{client}`")
            }
        }
    }
}

/// Whether a parsed document uses the legacy layout.
pub fn is_legacy(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("clientes") || object.contains_key("usuarios"))
}

/// Legacy document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacySnapshot {
    #[serde(rename = "clientes", default)]
    clients: FxHashMap<String, LegacyClient>,

    #[serde(rename = "usuarios", default)]
    users: FxHashMap<String, LegacyUser>,

    #[serde(default)]
    trackings: Vec<LegacyTracking>,

    #[serde(default)]
    metadata: LegacyMetadata,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LegacyMetadata {
    #[serde(rename = "data_backup")]
    saved_at: Option<String>,

    #[serde(rename = "versao")]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LegacyClient {
    #[serde(rename = "razao_social")]
    legal_name: String,

    #[serde(rename = "nome_fantasia")]
    trade_name: String,

    #[serde(rename = "cnpj", default)]
    tax_id: Option<String>,

    email: String,

    #[serde(rename = "telefone", default)]
    phone: Option<String>,

    #[serde(rename = "endereco", default)]
    address: Option<String>,

    #[serde(rename = "contato", default)]
    contact: Option<String>,

    #[serde(rename = "ativo")]
    active: bool,

    #[serde(rename = "data_cadastro", default)]
    registered_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LegacyUser {
    #[serde(rename = "senha")]
    secret: String,

    #[serde(rename = "tipo", default)]
    role: Option<String>,

    #[serde(rename = "cliente_vinculado", default)]
    client: Option<String>,

    #[serde(rename = "clientes_vinculados", default)]
    clients: Option<Vec<String>>,

    #[serde(rename = "nome", default)]
    display_name: Option<String>,

    #[serde(default)]
    email: Option<String>,

    #[serde(rename = "ativo")]
    active: bool,

    #[serde(rename = "data_criacao", default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LegacyTracking {
    #[serde(rename = "CLIENTE")]
    client: String,

    #[serde(rename = "CONTAINER")]
    container: String,

    #[serde(rename = "CARREGAMENTO", deserialize_with = "required")]
    loaded_at: Option<String>,

    #[serde(rename = "EMBARQUE NAVIO", deserialize_with = "required")]
    vessel_boarded_at: Option<String>,

    #[serde(rename = "SAIDA NAVIO", deserialize_with = "required")]
    vessel_departed_at: Option<String>,

    #[serde(rename = "PREVISAO CHEGADA PORTO DESTINO", deserialize_with = "required")]
    estimated_arrival_at: Option<String>,

    #[serde(rename = "CHEGADA PORTO DESTINO", deserialize_with = "required")]
    arrived_at: Option<String>,

    #[serde(rename = "CANAL RFB", deserialize_with = "required")]
    customs_channel: Option<String>,

    #[serde(rename = "LIBERAÇAO PORTO DESTINO", deserialize_with = "required")]
    customs_released_at: Option<String>,

    #[serde(rename = "CHEGADA CIUDAD DEL ESTE PY", deserialize_with = "required")]
    destination_arrived_at: Option<String>,

    #[serde(rename = "DESCARREGAMENTO", deserialize_with = "required")]
    unloaded_at: Option<String>,

    #[serde(rename = "STATUS_FINAL", default)]
    final_status: Option<String>,
}

/// Present but possibly `null`. Unlike a plain `Option`, a missing key is an error.
fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<String>::deserialize(deserializer)
}

fn parse_date(value: Option<&str>) -> Option<Timestamp> {
    let value = value?.trim();

    Date::strptime("%d/%m/%Y", value)
        .ok()?
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

/// Backup stamps carry a wall-clock time with no zone; it is read as UTC.
fn parse_date_time(value: Option<&str>) -> Option<Timestamp> {
    let value = value?.trim();

    DateTime::strptime("%d/%m/%Y %H:%M:%S", value)
        .ok()?
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

fn parse_channel(
    container: &str,
    value: Option<&str>,
) -> Result<Option<CustomsChannel>, SnapshotError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(channel) if channel.eq_ignore_ascii_case("VERDE") => Ok(Some(CustomsChannel::Green)),
        Some(channel) if channel.eq_ignore_ascii_case("VERMELHO") => Ok(Some(CustomsChannel::Red)),
        Some(channel) => Err(SnapshotError::InvalidChannel {
            container: container.to_string(),
            value: channel.to_string(),
        }),
    }
}

/// Convert a legacy document into the current model.
///
/// Client ids are derived from the legacy legal-name keys, so identities and
/// tracking records that named the same client resolve to the same id.
///
/// # Errors
///
/// Returns an error for logins that collide once normalized, blank logins or
/// secrets, blank containers and unknown customs channels.
pub fn migrate(legacy: LegacySnapshot) -> Result<Loaded, SnapshotError> {
    let mut dataset = Dataset::default();
    let mut warnings = Vec::new();

    let mut names: Vec<_> = legacy.clients.into_iter().collect();
    names.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (key, client) in names {
        let uuid = ClientUuid::from_legacy_name(&key);

        if dataset.clients.contains_key(&uuid) {
            return Err(SnapshotError::DuplicateClient(uuid));
        }

        dataset.clients.insert(
            uuid,
            Client {
                uuid,
                legal_name: client.legal_name.trim().to_string(),
                trade_name: client.trade_name.trim().to_string(),
                tax_id: non_blank(client.tax_id),
                email: client.email.trim().to_string(),
                phone: non_blank(client.phone),
                address: non_blank(client.address),
                contact: non_blank(client.contact),
                active: client.active,
                registered_at: parse_date(client.registered_at.as_deref()),
            },
        );
    }

    let mut users: Vec<_> = legacy.users.into_iter().collect();
    users.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (key, user) in users {
        let identity = migrate_user(&key, user, &mut warnings)?;

        dataset
            .identities
            .insert(identity)
            .map_err(|error| match error {
                IdentityError::DuplicateLogin(login) => SnapshotError::DuplicateLogin(login),
                source => SnapshotError::Identity { login: key, source },
            })?;
    }

    let mut orphans = FxHashSet::default();

    for tracking in legacy.trackings {
        let client = ClientUuid::from_legacy_name(&tracking.client);
        let customs_channel = parse_channel(&tracking.container, tracking.customs_channel.as_deref())?;

        let draft = TrackingDraft {
            client,
            container: tracking.container,
            milestones: Milestones {
                loaded_at: tracking.loaded_at,
                vessel_boarded_at: tracking.vessel_boarded_at,
                vessel_departed_at: tracking.vessel_departed_at,
                estimated_arrival_at: tracking.estimated_arrival_at,
                arrived_at: tracking.arrived_at,
                customs_released_at: tracking.customs_released_at,
                destination_arrived_at: tracking.destination_arrived_at,
                unloaded_at: tracking.unloaded_at,
            },
            customs_channel,
            final_status: tracking.final_status,
        }
        .validate()?;

        if !dataset.clients.contains_key(&client) && orphans.insert(client) {
            warnings.push(MigrationWarning::OrphanedTracking {
                container: draft.container.clone(),
                client: tracking.client.trim().to_string(),
            });
        }

        dataset
            .trackings
            .push(TrackingRecord::new(TrackingUuid::new(), draft));
    }

    Ok(Loaded {
        dataset,
        format: Format::Legacy,
        metadata: Metadata {
            saved_at: parse_date_time(legacy.metadata.saved_at.as_deref()),
            version: non_blank(legacy.metadata.version),
        },
        warnings,
    })
}

fn migrate_user(
    key: &str,
    user: LegacyUser,
    warnings: &mut Vec<MigrationWarning>,
) -> Result<Identity, SnapshotError> {
    let invalid = |source| SnapshotError::Identity {
        login: key.to_string(),
        source,
    };

    let login = LoginId::parse(key).map_err(invalid)?;
    let secret = Secret::new(&user.secret).map_err(invalid)?;

    let linked: BTreeSet<ClientUuid> = match (user.clients, user.client) {
        (Some(clients), _) => clients
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| ClientUuid::from_legacy_name(name))
            .collect(),
        (None, Some(client)) if !client.trim().is_empty() => {
            BTreeSet::from([ClientUuid::from_legacy_name(&client)])
        }
        (None, _) => BTreeSet::new(),
    };

    let role = match user.role.as_deref().map(str::trim) {
        Some("admin") => Some(Role::Admin),
        Some("cliente") => Some(Role::Client),
        Some("operador") => Some(Role::Operator),
        _ => None,
    };

    let (role, scope) = match role {
        Some(Role::Admin) => (Role::Admin, OwnedScope::Unrestricted),
        Some(role) => {
            if linked.is_empty() {
                warnings.push(MigrationWarning::MissingScope {
                    login: login.clone(),
                });
            }

            (role, OwnedScope::Clients(linked))
        }
        None => {
            warnings.push(MigrationWarning::UnknownRole {
                login: login.clone(),
                role: user.role,
            });

            (Role::Client, OwnedScope::Clients(BTreeSet::new()))
        }
    };

    let display_name = non_blank(user.display_name).unwrap_or_else(|| login.to_string());

    Ok(Identity {
        login,
        secret,
        role,
        scope,
        display_name,
        email: non_blank(user.email),
        active: user.active,
        created_at: parse_date(user.created_at.as_deref()),
    })
}
