//! The five NPCs and the town map.
//!
//! All cross-references in the state tree are by these string ids. The
//! tables here are the only place that knows which ids exist.

use crate::error::{HumError, HumResult};

/// The clinic doctor.
pub const HALE: &str = "hale";
/// The well keeper.
pub const MIRA: &str = "mira";
/// The retired miner.
pub const TOM: &str = "tom";
/// The chapel warden.
pub const JONAS: &str = "jonas";
/// The child who hears the hum.
pub const ELSIE: &str = "elsie";

/// Every NPC id, in roster order.
pub const NPC_IDS: [&str; 5] = [HALE, MIRA, TOM, JONAS, ELSIE];

/// The mine shaft, where the hum originates.
pub const MINE_SHAFT: &str = "mine_shaft";
/// The old well.
pub const WELL: &str = "well";
/// Dr. Hale's clinic.
pub const CLINIC: &str = "clinic";
/// The chapel.
pub const CHAPEL: &str = "chapel";
/// The town square.
pub const TOWN_SQUARE: &str = "town_square";
/// The tavern.
pub const TAVERN: &str = "tavern";
/// Where the player sleeps; the starting location.
pub const BOARDING_HOUSE: &str = "boarding_house";
/// The road out of town along the cliffs.
pub const CLIFF_ROAD: &str = "cliff_road";

/// Starting values for one NPC.
#[derive(Debug, Clone, Copy)]
pub struct NpcProfile {
    /// NPC id.
    pub id: &'static str,
    /// Where the NPC is found at the start of a game.
    pub home: &'static str,
    /// Initial relationship with the player (0-100).
    pub relationship: i32,
    /// Initial stress (0-100).
    pub stress: i32,
    /// Initial resonance with the entity beneath the town (0-1).
    pub resonance: f64,
}

/// The cast at the start of a new game.
pub const ROSTER: [NpcProfile; 5] = [
    NpcProfile {
        id: HALE,
        home: CLINIC,
        relationship: 30,
        stress: 30,
        resonance: 0.1,
    },
    NpcProfile {
        id: MIRA,
        home: WELL,
        relationship: 25,
        stress: 45,
        resonance: 0.3,
    },
    NpcProfile {
        id: TOM,
        home: TAVERN,
        relationship: 15,
        stress: 35,
        resonance: 0.4,
    },
    NpcProfile {
        id: JONAS,
        home: CHAPEL,
        relationship: 20,
        stress: 25,
        resonance: 0.2,
    },
    NpcProfile {
        id: ELSIE,
        home: TOWN_SQUARE,
        relationship: 40,
        stress: 20,
        resonance: 0.6,
    },
];

/// Proximity of each location to the shaft, from 0 (far) to 1 (at the shaft).
pub const LOCATIONS: [(&str, f64); 8] = [
    (MINE_SHAFT, 1.0),
    (WELL, 0.7),
    (CLINIC, 0.5),
    (CHAPEL, 0.4),
    (TOWN_SQUARE, 0.3),
    (TAVERN, 0.2),
    (BOARDING_HOUSE, 0.1),
    (CLIFF_ROAD, 0.0),
];

/// Whether `id` names an NPC in the cast.
pub fn is_npc(id: &str) -> bool {
    NPC_IDS.contains(&id)
}

/// Whether `id` names a location on the map.
pub fn is_location(id: &str) -> bool {
    LOCATIONS.iter().any(|(loc, _)| *loc == id)
}

/// Proximity of a location to the shaft, or `None` for unknown ids.
pub fn proximity(location: &str) -> Option<f64> {
    LOCATIONS
        .iter()
        .find(|(loc, _)| *loc == location)
        .map(|(_, p)| *p)
}

/// Resolve a user-supplied NPC id (case-insensitive) to its canonical form.
pub fn resolve_npc(input: &str) -> HumResult<&'static str> {
    let lower = input.trim().to_lowercase();
    NPC_IDS
        .iter()
        .find(|id| **id == lower)
        .copied()
        .ok_or_else(|| HumError::UnknownNpc(input.to_string()))
}

/// Resolve a user-supplied location id (case-insensitive) to its canonical form.
pub fn resolve_location(input: &str) -> HumResult<&'static str> {
    let lower = input.trim().to_lowercase();
    LOCATIONS
        .iter()
        .map(|(loc, _)| *loc)
        .find(|loc| *loc == lower)
        .ok_or_else(|| HumError::UnknownLocation(input.to_string()))
}
