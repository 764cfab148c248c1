//! End-to-end scenario: seed clients, schedule overlapping events, exercise
//! the conflict lifecycle, and round-trip everything through the snapshot
//! store and the roster CSV format.

use chrono::NaiveTime;
use territory_manager::{
    ClientForm, EngineError, EntityKind, EventForm, SnapshotStore, TerritoryEngine,
};

fn client_form(name: &str, email: &str, zips: &str) -> ClientForm {
    ClientForm {
        name: name.into(),
        contact_email: email.into(),
        contact_phone: "555-0101".into(),
        assigned_zip_codes: zips.into(),
        is_active: true,
    }
}

fn event_form(client_id: &str, name: &str, zip: &str, date: &str) -> EventForm {
    EventForm {
        client_id: client_id.into(),
        event_name: name.into(),
        zip_code: zip.into(),
        event_date: date.parse().unwrap(),
        event_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        notes: String::new(),
        is_active: true,
    }
}

#[test]
fn full_scheduling_lifecycle() {
    let mut engine = TerritoryEngine::new();

    let acme = engine.create_or_update_client(
        &client_form("Acme Events", "contact@acme.com", "10001, 10002, 10003"),
        None,
    );
    let premier = engine.create_or_update_client(
        &client_form("Premier Productions", "info@premier.com", "10004, 10005"),
        None,
    );

    // Premier cannot book inside Acme's territory.
    let err = engine
        .create_or_update_event(&event_form(&premier.id, "Launch", "10001", "2024-02-15"), None)
        .unwrap_err();
    assert_eq!(err, EngineError::TerritoryConflict { zip: "10001".into() });
    assert!(engine.events().is_empty());

    // Same-day events in 10001 and 10004 land within the conflict radius.
    let gala = engine
        .create_or_update_event(&event_form(&acme.id, "Corporate Gala 2024", "10001", "2024-02-15"), None)
        .unwrap();
    let launch = engine
        .create_or_update_event(&event_form(&premier.id, "Product Launch", "10004", "2024-02-15"), None)
        .unwrap();

    assert_eq!(launch.advisories, vec![gala.event.id.clone()]);
    assert_eq!(
        engine.event(&gala.event.id).unwrap().conflicts,
        vec![launch.event.id.clone()]
    );
    assert_eq!(
        engine.event(&launch.event.id).unwrap().conflicts,
        vec![gala.event.id.clone()]
    );

    // Deactivating one side clears the relation on both sides.
    assert!(engine.toggle_active(EntityKind::Event, &launch.event.id));
    assert!(engine.event(&gala.event.id).unwrap().conflicts.is_empty());
    assert!(engine.event(&launch.event.id).unwrap().conflicts.is_empty());
    engine.toggle_active(EntityKind::Event, &launch.event.id);

    // Deactivating Acme releases its ZIPs for other clients.
    engine.toggle_active(EntityKind::Client, &acme.id);
    let rebooked = engine
        .create_or_update_event(&event_form(&premier.id, "Pop-up", "10002", "2024-03-01"), None)
        .unwrap();
    assert!(rebooked.advisories.is_empty());
    engine.toggle_active(EntityKind::Client, &acme.id);

    // Snapshot round-trip preserves the collections and the conflict relation.
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().to_path_buf()).unwrap();
    store.save_clients(engine.clients()).unwrap();
    store.save_events(engine.events()).unwrap();

    let reloaded =
        TerritoryEngine::from_snapshot(store.load_clients().unwrap(), store.load_events().unwrap());
    assert_eq!(reloaded.clients(), engine.clients());
    assert_eq!(reloaded.events(), engine.events());

    // Cascade delete removes exactly the client's events.
    let removed = engine.delete_client(&acme.id);
    assert_eq!(removed, 1);
    assert!(engine.events().iter().all(|e| e.client_id != acme.id));
    assert!(engine
        .event(&launch.event.id)
        .unwrap()
        .conflicts
        .is_empty());

    // Roster export re-imports with core fields intact.
    let exported = engine.export_clients();
    let mut fresh = TerritoryEngine::new();
    let report = fresh.import_clients(&exported);
    assert_eq!(report.skipped_rows, 0);
    assert_eq!(fresh.clients().len(), engine.clients().len());
    for (a, b) in engine.clients().iter().zip(fresh.clients()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.contact_email, b.contact_email);
        assert_eq!(a.contact_phone, b.contact_phone);
        assert_eq!(a.assigned_zip_codes, b.assigned_zip_codes);
    }
}
