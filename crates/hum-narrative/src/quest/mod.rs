//! Declarative quest triggers and the matcher that evaluates them.

pub mod catalog;
pub mod condition;
/// Category index over the trigger table.
pub mod matcher;
/// Trigger definitions and their builders.
pub mod trigger;

pub use catalog::default_triggers;
pub use condition::{Condition, TriggerCategory};
pub use matcher::QuestMatcher;
pub use trigger::QuestTrigger;
