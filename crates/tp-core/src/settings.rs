//! Pathfinder tuning knobs and cost units.
//!
//! # Cost units
//!
//! All costs are integers in "tile length" units: one full-length (axial)
//! track piece costs [`TILE_LENGTH`], a corner piece costs [`CORNER_LENGTH`]
//! (⌊100 · √2/2⌋).  Every penalty below is expressed in the same unit, so a
//! penalty of `10 * TILE_LENGTH` is "as bad as ten extra tiles".

use crate::{TpError, TpResult};

/// Cost of one full-length track piece.
pub const TILE_LENGTH: u32 = 100;

/// Cost of one corner piece (half a tile diagonal).
pub const CORNER_LENGTH: u32 = 70;

/// Tunables for one pathfinder instance.
///
/// Typically loaded from the game's settings file by the embedding
/// application (`serde` feature) and passed to every query.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderSettings {
    /// Node budget: expansions per query before giving up.
    pub max_search_nodes: u32,

    /// First red signal on the path (block / entry signals).
    pub rail_firstred_penalty: u32,
    /// First red signal on the path when it is an exit or combo presignal.
    pub rail_firstred_exit_penalty: u32,
    /// Path ends at its target with the last passed signal red.
    pub rail_lastred_penalty: u32,
    /// Any rail station tile on the path.
    pub rail_station_penalty: u32,
    /// Uphill transition (rail and road).
    pub rail_slope_penalty: u32,
    /// Change of direction that breaks a straight or 45° run.
    pub rail_curve_penalty: u32,
    /// Reversing inside a depot that is not the destination.
    pub rail_depot_reverse_penalty: u32,
    /// Passing a path signal from its back.
    pub rail_pbs_signal_back_penalty: u32,

    /// Crossing a buoy tile on an axial trackdir.
    pub buoy_penalty: u32,
    /// Any change of direction for ships.
    pub water_curve_penalty: u32,

    /// Turning (non-axial trackdir) for road vehicles.
    pub road_curve_penalty: u32,
    /// Driving over a level crossing.
    pub crossing_penalty: u32,
    /// Driving through a drive-through road stop.
    pub road_drive_through_penalty: u32,
    /// Scaled by the fill ratio of a run of drive-through stops.
    pub road_dt_occupied_penalty: u32,
    /// Scaled by the number of occupied bays of a bay stop.
    pub road_bay_occupied_penalty: u32,

    /// Maximum path cost accepted when looking for the nearest depot.
    pub maximum_go_to_depot_penalty: u32,

    /// Forbid 90° turns for trains and ships.
    pub forbid_90_deg: bool,

    /// Visited-set bucket count is `2^hash_bits`.  Must be even.
    pub hash_bits: u8,
    /// Fixed number of visited-set entries per query.
    pub visited_capacity: u32,
}

impl Default for PathfinderSettings {
    fn default() -> Self {
        Self {
            max_search_nodes:             10_000,
            rail_firstred_penalty:        10 * TILE_LENGTH,
            rail_firstred_exit_penalty:   100 * TILE_LENGTH,
            rail_lastred_penalty:         10 * TILE_LENGTH,
            rail_station_penalty:         TILE_LENGTH,
            rail_slope_penalty:           TILE_LENGTH,
            rail_curve_penalty:           TILE_LENGTH,
            rail_depot_reverse_penalty:   50 * TILE_LENGTH,
            rail_pbs_signal_back_penalty: 15 * TILE_LENGTH,
            buoy_penalty:                 2 * TILE_LENGTH,
            water_curve_penalty:          TILE_LENGTH,
            road_curve_penalty:           TILE_LENGTH,
            crossing_penalty:             3 * TILE_LENGTH,
            road_drive_through_penalty:   8 * TILE_LENGTH,
            road_dt_occupied_penalty:     8 * TILE_LENGTH,
            road_bay_occupied_penalty:    15 * TILE_LENGTH,
            maximum_go_to_depot_penalty:  20 * TILE_LENGTH,
            forbid_90_deg:                false,
            hash_bits:                    12,
            visited_capacity:             1 << 16,
        }
    }
}

impl PathfinderSettings {
    /// Upper bound for any single penalty value.
    pub const MAX_PENALTY: u32 = 1_000_000;

    /// Settings with every penalty zeroed: only track lengths count.
    ///
    /// Handy for tests and for callers that want pure shortest distance.
    pub fn without_penalties() -> Self {
        Self {
            rail_firstred_penalty:        0,
            rail_firstred_exit_penalty:   0,
            rail_lastred_penalty:         0,
            rail_station_penalty:         0,
            rail_slope_penalty:           0,
            rail_curve_penalty:           0,
            rail_depot_reverse_penalty:   0,
            rail_pbs_signal_back_penalty: 0,
            buoy_penalty:                 0,
            water_curve_penalty:          0,
            road_curve_penalty:           0,
            crossing_penalty:             0,
            road_drive_through_penalty:   0,
            road_dt_occupied_penalty:     0,
            road_bay_occupied_penalty:    0,
            ..Self::default()
        }
    }

    /// Number of visited-set buckets.
    #[inline]
    pub fn hash_size(&self) -> usize {
        1 << self.hash_bits
    }

    /// Reject values the search cannot work with.
    pub fn validate(&self) -> TpResult<()> {
        if self.max_search_nodes == 0 || self.max_search_nodes > 1_000_000 {
            return Err(TpError::Config(format!(
                "max_search_nodes {} outside 1..=1000000",
                self.max_search_nodes
            )));
        }
        if self.hash_bits % 2 != 0 || !(4..=20).contains(&self.hash_bits) {
            return Err(TpError::Config(format!(
                "hash_bits {} must be even and within 4..=20",
                self.hash_bits
            )));
        }
        if self.visited_capacity == 0 {
            return Err(TpError::Config("visited_capacity must be non-zero".into()));
        }
        let penalties = [
            ("rail_firstred_penalty", self.rail_firstred_penalty),
            ("rail_firstred_exit_penalty", self.rail_firstred_exit_penalty),
            ("rail_lastred_penalty", self.rail_lastred_penalty),
            ("rail_station_penalty", self.rail_station_penalty),
            ("rail_slope_penalty", self.rail_slope_penalty),
            ("rail_curve_penalty", self.rail_curve_penalty),
            ("rail_depot_reverse_penalty", self.rail_depot_reverse_penalty),
            ("rail_pbs_signal_back_penalty", self.rail_pbs_signal_back_penalty),
            ("buoy_penalty", self.buoy_penalty),
            ("water_curve_penalty", self.water_curve_penalty),
            ("road_curve_penalty", self.road_curve_penalty),
            ("crossing_penalty", self.crossing_penalty),
            ("road_drive_through_penalty", self.road_drive_through_penalty),
            ("road_dt_occupied_penalty", self.road_dt_occupied_penalty),
            ("road_bay_occupied_penalty", self.road_bay_occupied_penalty),
        ];
        if let Some((name, v)) = penalties.iter().find(|(_, v)| *v > Self::MAX_PENALTY) {
            return Err(TpError::Config(format!("{name} = {v} exceeds {}", Self::MAX_PENALTY)));
        }
        Ok(())
    }
}
