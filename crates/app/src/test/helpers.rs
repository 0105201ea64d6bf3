//! Test Helpers

use std::{collections::BTreeSet, sync::Arc};

use brix::{
    clients::{Client, ClientDetails, ClientUuid},
    dataset::Dataset,
    identities::{Identity, IdentityProfile, LoginId, Role, Secret},
    trackings::{CustomsChannel, Milestones, TrackingDraft, TrackingRecord, TrackingUuid},
};
use jiff::Timestamp;
use testresult::TestResult;

use crate::{storage::MemoryStore, store::Store};

/// Two clients, one identity per role and three tracking records.
///
/// | login           | secret     | role     | clients     |
/// |-----------------|------------|----------|-------------|
/// | `admin`         | `admin123` | admin    | all         |
/// | `aristide`      | `1234`     | client   | MC          |
/// | `nicolas`       | `1234`     | operator | BENTO       |
/// | `operador_brix` | `op123`    | operator | MC, BENTO   |
///
/// Records, in order: `TCLU1234567` (MC, green), `MSKU9876543` (BENTO, red),
/// `ABCU7777777` (MC, pending).
pub(crate) struct Seeded {
    pub dataset: Dataset,
    pub mc: ClientUuid,
    pub bento: ClientUuid,
}

impl Seeded {
    pub fn identity(&self, login: &str) -> TestResult<Identity> {
        Ok(self
            .dataset
            .identities
            .get(&LoginId::parse(login)?)
            .cloned()
            .ok_or("unknown seeded login")?)
    }

    pub fn tracking(&self, container: &str) -> TestResult<TrackingRecord> {
        Ok(self
            .dataset
            .trackings
            .iter()
            .find(|record| record.container == container)
            .cloned()
            .ok_or("unknown seeded container")?)
    }

    pub async fn store(&self) -> TestResult<(Store, Arc<MemoryStore>)> {
        let persistence = Arc::new(MemoryStore::with_dataset(self.dataset.clone()));
        let store = Store::open(persistence.clone(), None).await?;

        Ok((store, persistence))
    }
}

pub(crate) fn client(legal_name: &str) -> Client {
    Client::new(
        ClientUuid::new(),
        ClientDetails {
            legal_name: legal_name.to_string(),
            trade_name: legal_name.to_string(),
            email: "ops@example.com".to_string(),
            ..ClientDetails::default()
        },
        Timestamp::UNIX_EPOCH,
    )
}

pub(crate) fn identity(
    login: &str,
    secret: &str,
    role: Role,
    clients: &[ClientUuid],
) -> TestResult<Identity> {
    Ok(Identity::new(
        LoginId::parse(login)?,
        Secret::new(secret)?,
        IdentityProfile {
            display_name: login.to_string(),
            email: None,
            role,
            clients: clients.iter().copied().collect::<BTreeSet<_>>(),
        },
        Timestamp::UNIX_EPOCH,
    )?)
}

pub(crate) fn draft(
    client: ClientUuid,
    container: &str,
    channel: Option<CustomsChannel>,
) -> TrackingDraft {
    TrackingDraft {
        client,
        container: container.to_string(),
        milestones: Milestones::default(),
        customs_channel: channel,
        final_status: None,
    }
}

pub(crate) fn seeded_dataset() -> TestResult<Seeded> {
    let mc = client("MC CONFECCIONES");
    let bento = client("BENTO COMEX");
    let (mc_uuid, bento_uuid) = (mc.uuid, bento.uuid);

    let mut dataset = Dataset::default();

    dataset.clients.insert(mc_uuid, mc);
    dataset.clients.insert(bento_uuid, bento);

    dataset
        .identities
        .insert(identity("admin", "admin123", Role::Admin, &[])?)?;
    dataset
        .identities
        .insert(identity("aristide", "1234", Role::Client, &[mc_uuid])?)?;
    dataset
        .identities
        .insert(identity("nicolas", "1234", Role::Operator, &[bento_uuid])?)?;
    dataset.identities.insert(identity(
        "operador_brix",
        "op123",
        Role::Operator,
        &[mc_uuid, bento_uuid],
    )?)?;

    dataset.trackings = vec![
        TrackingRecord::new(
            TrackingUuid::new(),
            draft(mc_uuid, "TCLU1234567", Some(CustomsChannel::Green)),
        ),
        TrackingRecord::new(
            TrackingUuid::new(),
            draft(bento_uuid, "MSKU9876543", Some(CustomsChannel::Red)),
        ),
        TrackingRecord::new(TrackingUuid::new(), draft(mc_uuid, "ABCU7777777", None)),
    ];

    Ok(Seeded {
        dataset,
        mc: mc_uuid,
        bento: bento_uuid,
    })
}
