use conote_core::store::seed::SEED_NOTE_COUNT;
use conote_core::{
    ChangeBus, ChangeEvent, EditSession, Identity, LocalChangeBus, NotePatch, NoteStore,
    ResolutionPolicy, SaveOutcome, SqliteSlotStore, NOTES_SLOT,
};
use std::path::Path;
use std::sync::Arc;

fn identity() -> Identity {
    Identity::new("user-1", "test@example.com")
}

fn open_instance(
    db_path: &Path,
    bus: &Arc<LocalChangeBus>,
    identity: &Identity,
) -> NoteStore<SqliteSlotStore> {
    let slots = SqliteSlotStore::open(db_path).unwrap();
    NoteStore::open(slots, bus.clone(), identity).unwrap()
}

#[test]
fn external_create_becomes_visible_after_draining_the_bus() {
    let me = identity();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("conote.db");
    let bus = LocalChangeBus::new();

    let mut first = open_instance(&db_path, &bus, &me);
    let mut second = open_instance(&db_path, &bus, &me);

    let created = first.create_note("From the other window", &me).unwrap();
    assert!(second.note(created.id).is_none());

    assert!(second.apply_external_changes());
    assert_eq!(second.note(created.id), Some(&created));
    assert_eq!(second.notes().len(), SEED_NOTE_COUNT + 1);
}

#[test]
fn stale_session_conflicts_after_external_replacement() {
    let me = identity();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("conote.db");
    let bus = LocalChangeBus::new();

    let mut first = open_instance(&db_path, &bus, &me);
    let mut second = open_instance(&db_path, &bus, &me);

    let target = second.notes()[0].clone();
    let mut session = EditSession::open(&target);
    session.set_title("Second window edit").unwrap();

    first
        .update_note(target.id, NotePatch::title("First window edit"))
        .unwrap();
    assert!(second.apply_external_changes());

    assert_eq!(session.save(&mut second).unwrap(), SaveOutcome::Conflict);

    session.resolve(ResolutionPolicy::AcceptCurrent, &second).unwrap();
    assert_eq!(session.save(&mut second).unwrap(), SaveOutcome::Saved);

    let saved = second.note(target.id).unwrap();
    assert_eq!(saved.title, "Second window edit");
    assert_eq!(saved.version, target.version + 2);
}

#[test]
fn external_replacement_leaves_unsaved_working_copies_alone() {
    let me = identity();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("conote.db");
    let bus = LocalChangeBus::new();

    let mut first = open_instance(&db_path, &bus, &me);
    let mut second = open_instance(&db_path, &bus, &me);

    let target = second.notes()[0].clone();
    let mut session = EditSession::open(&target);
    session.set_title("Unsaved draft").unwrap();

    first.update_note(target.id, NotePatch::title("Moved on")).unwrap();
    assert!(second.apply_external_changes());

    assert_eq!(session.working().title, "Unsaved draft");
    assert_eq!(session.base_version(), target.version);
}

#[test]
fn malformed_external_payload_is_ignored() {
    let me = identity();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("conote.db");
    let bus = LocalChangeBus::new();

    let mut store = open_instance(&db_path, &bus, &me);
    let before = store.notes().to_vec();

    bus.publish(
        u64::MAX,
        ChangeEvent {
            slot: NOTES_SLOT.to_string(),
            payload: "definitely not json".to_string(),
        },
    );
    assert!(!store.apply_external_changes());
    assert_eq!(store.notes(), &before[..]);
}

#[test]
fn events_for_other_slots_are_ignored() {
    let me = identity();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("conote.db");
    let bus = LocalChangeBus::new();

    let mut store = open_instance(&db_path, &bus, &me);
    let before = store.notes().to_vec();

    bus.publish(
        u64::MAX,
        ChangeEvent {
            slot: "identity".to_string(),
            payload: "[]".to_string(),
        },
    );
    assert!(!store.apply_external_changes());
    assert_eq!(store.notes(), &before[..]);
}

#[test]
fn coalesced_notifications_settle_on_the_latest_payload() {
    let me = identity();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("conote.db");
    let bus = LocalChangeBus::new();

    let mut first = open_instance(&db_path, &bus, &me);
    let mut second = open_instance(&db_path, &bus, &me);

    let a = first.create_note("First burst", &me).unwrap();
    let b = first.create_note("Second burst", &me).unwrap();

    // One drain absorbs both pending events; the latest payload wins.
    assert!(second.apply_external_changes());
    assert_eq!(second.notes()[0].id, b.id);
    assert_eq!(second.note(a.id), Some(&a));
}
