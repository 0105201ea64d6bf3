//! Integration tests for authentication, record visibility and the mutation gate.
//!
//! Two clients (`A` and `B`), one record each, and identities covering every
//! role: an admin, a client staffer linked to `A`, an operator linked to both and
//! a client staffer whose scope is empty.

use std::collections::BTreeSet;

use jiff::Timestamp;
use testresult::TestResult;

use brix::prelude::*;

struct World {
    a: ClientUuid,
    b: ClientUuid,
    identities: IdentityStore,
    records: Vec<TrackingRecord>,
}

fn identity(login: &str, secret: &str, role: Role, clients: &[ClientUuid]) -> TestResult<Identity> {
    Ok(Identity::new(
        LoginId::parse(login)?,
        Secret::new(secret)?,
        IdentityProfile {
            display_name: login.to_string(),
            email: None,
            role,
            clients: clients.iter().copied().collect(),
        },
        Timestamp::UNIX_EPOCH,
    )?)
}

fn record(client: ClientUuid, container: &str) -> TrackingRecord {
    TrackingRecord::new(
        TrackingUuid::new(),
        TrackingDraft {
            client,
            container: container.to_string(),
            milestones: Milestones::default(),
            customs_channel: None,
            final_status: None,
        },
    )
}

fn world() -> TestResult<World> {
    let a = ClientUuid::new();
    let b = ClientUuid::new();

    let mut identities = IdentityStore::new();
    identities.insert(identity("admin", "admin123", Role::Admin, &[])?)?;
    identities.insert(identity("aristide", "1234", Role::Client, &[a])?)?;
    identities.insert(identity("operador_brix", "op123", Role::Operator, &[a, b])?)?;

    let mut orphan = identity("orphan", "1234", Role::Client, &[a])?;
    orphan.scope = OwnedScope::Clients(BTreeSet::new());
    identities.insert(orphan)?;

    Ok(World {
        a,
        b,
        identities,
        records: vec![record(a, "X1"), record(b, "Y1")],
    })
}

fn login(world: &World, login: &str, secret: &str) -> TestResult<Identity> {
    Ok(authenticate(&world.identities, login, secret)?.clone())
}

fn containers(records: &[TrackingRecord]) -> Vec<&str> {
    records.iter().map(|record| record.container.as_str()).collect()
}

#[test]
fn admin_sees_every_record_in_order() -> TestResult {
    let world = world()?;
    let admin = login(&world, "admin", "admin123")?;

    assert_eq!(visible_records(&world.records, &admin), world.records);
    assert!(visible_records(&[], &admin).is_empty());

    Ok(())
}

#[test]
fn client_sees_only_owned_records() -> TestResult {
    let world = world()?;
    let aristide = login(&world, "aristide", "1234")?;

    let visible = visible_records(&world.records, &aristide);

    assert_eq!(containers(&visible), ["X1"]);

    Ok(())
}

#[test]
fn multi_client_operator_sees_both_in_original_order() -> TestResult {
    let world = world()?;
    let operator = login(&world, "operador_brix", "op123")?;

    let visible = visible_records(&world.records, &operator);

    assert_eq!(containers(&visible), ["X1", "Y1"]);

    Ok(())
}

#[test]
fn visible_set_is_exactly_the_owned_records() -> TestResult {
    let world = world()?;
    let records = vec![
        record(world.b, "B1"),
        record(world.a, "A1"),
        record(ClientUuid::new(), "Z1"),
        record(world.a, "A2"),
        record(world.b, "B2"),
    ];

    for (name, secret) in [("aristide", "1234"), ("operador_brix", "op123")] {
        let identity = login(&world, name, secret)?;
        let scope = identity.scope.clients().ok_or("scope should be restricted")?;

        let expected: Vec<_> = records
            .iter()
            .filter(|record| scope.contains(&record.client))
            .cloned()
            .collect();

        assert_eq!(visible_records(&records, &identity), expected, "{name}");
    }

    Ok(())
}

#[test]
fn filtering_is_idempotent() -> TestResult {
    let world = world()?;

    for (name, secret) in [
        ("admin", "admin123"),
        ("aristide", "1234"),
        ("operador_brix", "op123"),
        ("orphan", "1234"),
    ] {
        let identity = login(&world, name, secret)?;
        let once = visible_records(&world.records, &identity);

        assert_eq!(visible_records(&once, &identity), once, "{name}");
    }

    Ok(())
}

#[test]
fn login_is_case_insensitive_and_secret_case_sensitive() -> TestResult {
    let world = world()?;

    assert!(authenticate(&world.identities, "admin", "admin123").is_ok());
    assert!(authenticate(&world.identities, "Admin", "admin123").is_ok());
    assert!(authenticate(&world.identities, "  ADMIN  ", " admin123 ").is_ok());
    assert_eq!(
        authenticate(&world.identities, "admin", "ADMIN123"),
        Err(AuthenticationRejected)
    );

    Ok(())
}

#[test]
fn rejection_does_not_reveal_the_reason() -> TestResult {
    let mut world = world()?;

    world
        .identities
        .get_mut(&LoginId::parse("aristide")?)
        .ok_or("aristide missing")?
        .active = false;

    let unknown = authenticate(&world.identities, "nobody", "1234");
    let wrong_secret = authenticate(&world.identities, "admin", "nope");
    let inactive = authenticate(&world.identities, "aristide", "1234");

    assert_eq!(unknown, Err(AuthenticationRejected));
    assert_eq!(wrong_secret, unknown);
    assert_eq!(inactive, unknown);

    Ok(())
}

#[test]
fn identity_without_scope_sees_nothing() -> TestResult {
    let world = world()?;
    let orphan = login(&world, "orphan", "1234")?;

    assert_eq!(
        Visibility::of(&orphan),
        Visibility::Denied(MalformedIdentity::EmptyScope)
    );
    assert!(visible_records(&world.records, &orphan).is_empty());

    Ok(())
}

#[test]
fn non_admins_cannot_mutate_even_their_own_records() -> TestResult {
    let world = world()?;

    for (name, secret) in [("aristide", "1234"), ("operador_brix", "op123")] {
        let identity = login(&world, name, secret)?;

        for record in &world.records {
            let owned = can_view(record, &identity);

            assert_eq!(
                authorize_mutation(&identity),
                Err(AccessDenied::NotAdmin),
                "{name} mutating a record (owned: {owned})"
            );
        }
    }

    let admin = login(&world, "admin", "admin123")?;

    assert_eq!(authorize_mutation(&admin), Ok(()));

    Ok(())
}

#[test]
fn secondary_filters_never_widen_the_visible_set() -> TestResult {
    let world = world()?;
    let aristide = login(&world, "aristide", "1234")?;

    let visible = visible_records(&world.records, &aristide);
    let query = TrackingQuery {
        container: Some("1".to_string()),
        ..TrackingQuery::default()
    };

    let filtered = query.apply(visible, &Dataset::default().clients);

    assert_eq!(containers(&filtered), ["X1"]);

    Ok(())
}
