//! Transport modes and the per-query transport descriptor.
//!
//! The descriptor is built once per query and handed unchanged to every
//! cost and expansion callback, so it is a small `Copy` record.

use crate::Owner;

/// The infrastructure family a vehicle moves on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportType {
    Rail,
    Road,
    Water,
}

impl TransportType {
    /// Human-readable label, useful for log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportType::Rail => "rail",
            TransportType::Road => "road",
            TransportType::Water => "water",
        }
    }
}

impl std::fmt::Display for TransportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Rail types ────────────────────────────────────────────────────────────────

/// Rail gauge/electrification of a rail tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum RailType {
    #[default]
    Rail = 0,
    Electric = 1,
    Monorail = 2,
    Maglev = 3,
}

/// Bitmask of rail types a vehicle may run on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RailTypes(pub u8);

impl RailTypes {
    pub const NONE: RailTypes = RailTypes(0);
    pub const ALL: RailTypes = RailTypes(0x0F);

    #[inline]
    pub fn single(rt: RailType) -> RailTypes {
        RailTypes(1 << rt as u8)
    }

    #[inline]
    pub fn contains(self, rt: RailType) -> bool {
        self.0 & (1 << rt as u8) != 0
    }

    #[inline]
    pub fn with(self, rt: RailType) -> RailTypes {
        RailTypes(self.0 | 1 << rt as u8)
    }
}

// ── Road types ────────────────────────────────────────────────────────────────

/// Road surface kind.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum RoadType {
    Road = 0,
    Tram = 1,
}

/// Bitmask of road types a vehicle may drive on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadTypes(pub u8);

impl RoadTypes {
    pub const NONE: RoadTypes = RoadTypes(0);
    pub const ROAD: RoadTypes = RoadTypes(1 << RoadType::Road as u8);
    pub const TRAM: RoadTypes = RoadTypes(1 << RoadType::Tram as u8);

    #[inline]
    pub fn contains(self, rt: RoadType) -> bool {
        self.0 & (1 << rt as u8) != 0
    }
}

// ── TransportDescriptor ───────────────────────────────────────────────────────

/// What is being routed: mode, compatible sub-types and owning company.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransportDescriptor {
    pub transport:  TransportType,
    pub rail_types: RailTypes,
    pub road_types: RoadTypes,
    pub owner:      Owner,
}

impl TransportDescriptor {
    pub fn rail(owner: Owner, rail_types: RailTypes) -> Self {
        Self { transport: TransportType::Rail, rail_types, road_types: RoadTypes::NONE, owner }
    }

    pub fn road(owner: Owner, road_types: RoadTypes) -> Self {
        Self { transport: TransportType::Road, rail_types: RailTypes::NONE, road_types, owner }
    }

    pub fn water(owner: Owner) -> Self {
        Self {
            transport:  TransportType::Water,
            rail_types: RailTypes::NONE,
            road_types: RoadTypes::NONE,
            owner,
        }
    }

    /// Road vehicle restricted to tram tracks.
    #[inline]
    pub fn is_tram(&self) -> bool {
        self.transport == TransportType::Road && self.road_types.contains(RoadType::Tram)
    }
}
