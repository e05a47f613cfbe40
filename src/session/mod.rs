mod hub;
mod store;

pub use hub::{AuthEvent, AuthSubscription, SessionHub, SessionSnapshot};
pub use store::SessionStore;
