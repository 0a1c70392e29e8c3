use crate::quest::TriggerCategory;

/// A derived rule check waiting to run.
///
/// Mutators push these instead of calling the checks directly, so a chain
/// like tension change, act transition, entry bonus, act check again is a
/// sequence of queue entries rather than recursion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Effect {
    /// Move to the next act if its trigger is armed and tension is high enough.
    CheckActTransition,
    /// Open the NPC's next gate if the gate rules allow it.
    CheckGate(String),
    /// Fire the stress crisis for the NPC if stress is past the critical line.
    CheckStressCritical(String),
    /// Start quests whose triggers are indexed under this category.
    EvaluateQuests(TriggerCategory),
}
