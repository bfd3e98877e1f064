//! Cross-instance change notification.
//!
//! # Responsibility
//! - Expose the publish/subscribe contract the note store coordinates
//!   through.
//! - Provide the in-process broadcast implementation.

mod change_bus;

pub use change_bus::{ChangeBus, ChangeEvent, LocalChangeBus, SubscriberId, Subscription};
