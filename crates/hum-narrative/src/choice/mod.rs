//! Context-sensitive dialogue choices.

pub mod catalog;
/// Choices and the effects they carry.
pub mod model;
/// Picks which choices an NPC offers right now.
pub mod selector;

pub use catalog::ChoiceCatalog;
pub use model::{Choice, ChoiceEffect, ChoicePool, LEAVE_CHOICE_ID};
pub use selector::{MAX_CHOICES, SECONDARY_VOICE_MIN, select_choices};
