//! Reactive values shared between systems: broadcast channels, observable
//! variables and literal-or-shared references to them.

pub mod channel;
pub mod reference;
pub mod variable;

pub use channel::{EventChannel, SubscriptionId};
pub use reference::Reference;
pub use variable::Variable;
