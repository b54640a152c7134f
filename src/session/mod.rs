//! Session layer: token ownership and change notification.
//!
//! - [`store`]: the [`SessionStore`] holding the current token and its durable mirror
//! - [`bus`]: the [`SessionBus`] pub/sub object that announces changes

pub mod bus;
pub mod store;

pub use bus::{SessionBus, SessionEvent, SubscriptionId};
pub use store::SessionStore;
