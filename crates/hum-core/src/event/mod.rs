//! Events: the catalogue of kinds, typed payloads, and the bus that carries
//! them to subscribers.

mod bus;
mod kind;
mod payload;

pub use bus::{
    DEFAULT_HISTORY_CAPACITY, EventBus, HandlerError, HandlerResult, SubscriptionId, Topic,
};
pub use kind::EventKind;
pub use payload::{EventPayload, GameEvent};
