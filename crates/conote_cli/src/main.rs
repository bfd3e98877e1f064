//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `conote_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use conote_core::{Identity, LocalChangeBus, NoteStore, SqliteSlotStore};

fn main() {
    println!("conote_core ping={}", conote_core::ping());
    println!("conote_core version={}", conote_core::core_version());

    // Open an in-memory store for a throwaway identity to prove the full
    // slot/bus/seed path links and runs.
    let bus = LocalChangeBus::new();
    let identity = Identity::new("smoke-user", "smoke@example.com");
    let slots = match SqliteSlotStore::in_memory() {
        Ok(slots) => slots,
        Err(err) => {
            eprintln!("conote_cli slot store open failed: {err}");
            std::process::exit(1);
        }
    };
    match NoteStore::open(slots, bus, &identity) {
        Ok(store) => println!("conote_core seeded_notes={}", store.notes().len()),
        Err(err) => {
            eprintln!("conote_cli store open failed: {err}");
            std::process::exit(1);
        }
    }
}
