use conote_core::{Identity, IdentityStore, LocalChangeBus, NoteStore, SqliteSlotStore};

#[test]
fn identity_survives_a_reopen_of_the_durable_medium() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("conote.db");

    let logged_in = {
        let slots = SqliteSlotStore::open(&db_path).unwrap();
        let mut auth = IdentityStore::new(slots);
        auth.login("ada@example.com", &[]).unwrap()
    };

    let slots = SqliteSlotStore::open(&db_path).unwrap();
    let auth = IdentityStore::new(slots);
    assert_eq!(auth.current().unwrap(), Some(logged_in));
}

#[test]
fn login_reuses_the_user_id_seeded_into_note_membership() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("conote.db");
    let bus = LocalChangeBus::new();

    // First session: log in and let the store seed owned notes.
    let first_identity = {
        let mut auth = IdentityStore::new(SqliteSlotStore::open(&db_path).unwrap());
        let identity = auth.login("ada@example.com", &[]).unwrap();
        let slots = SqliteSlotStore::open(&db_path).unwrap();
        NoteStore::open(slots, bus.clone(), &identity).unwrap();
        identity
    };

    // Later session: the same email resolves to the same user id by
    // scanning the persisted membership rosters.
    let store = NoteStore::open(
        SqliteSlotStore::open(&db_path).unwrap(),
        bus,
        &first_identity,
    )
    .unwrap();
    let mut auth = IdentityStore::new(SqliteSlotStore::open(&db_path).unwrap());
    let second_identity = auth.login("ada@example.com", store.notes()).unwrap();

    assert_eq!(second_identity.id, first_identity.id);
}

#[test]
fn notes_and_identity_share_a_medium_without_clobbering() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("conote.db");
    let bus = LocalChangeBus::new();

    let mut auth = IdentityStore::new(SqliteSlotStore::open(&db_path).unwrap());
    let identity = auth.login("ada@example.com", &[]).unwrap();

    let slots = SqliteSlotStore::open(&db_path).unwrap();
    let mut store = NoteStore::open(slots, bus, &identity).unwrap();
    store.create_note("Coexists", &identity).unwrap();

    let auth_again = IdentityStore::new(SqliteSlotStore::open(&db_path).unwrap());
    assert_eq!(auth_again.current().unwrap(), Some(Identity::new(identity.id.clone(), "ada@example.com")));
}
