//! The read-only world adapter consumed by the search.
//!
//! Everything the cost models and the expansion step need to know about the
//! world goes through [`Grid`].  Implementations must be pure reads: the
//! search never mutates the world and assumes it does not change while a
//! query is running.

use tp_core::{
    Axis, DiagDir, MapSize, Owner, RailType, StationId, TileIndex, TrackdirBits, Trackdir,
    TransportDescriptor, TransportType,
};

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Shape of a tile's surface.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slope {
    #[default]
    Flat,
    /// One full level of rise across the tile, climbing towards the given edge.
    Inclined(DiagDir),
}

/// Coarse tile classification, enough for ownership rules.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileClass {
    Clear,
    Rail,
    Road,
    Station,
    Water,
    TunnelBridge,
}

// ── Signals ───────────────────────────────────────────────────────────────────

/// Signal flavours that change how the rail cost model treats them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalKind {
    Block,
    Entry,
    Exit,
    Combo,
    /// Path-based signal, passable from behind.
    Path,
    /// Path-based signal that cannot be passed from behind.
    PathOneWay,
}

impl SignalKind {
    #[inline]
    pub fn is_path(self) -> bool {
        matches!(self, SignalKind::Path | SignalKind::PathOneWay)
    }

    /// Exit and combo presignals use the heavier first-red penalty.
    #[inline]
    pub fn is_exit_like(self) -> bool {
        matches!(self, SignalKind::Exit | SignalKind::Combo)
    }

    /// Whether a train facing the back of this signal is refused.
    #[inline]
    pub fn is_one_way(self) -> bool {
        self != SignalKind::Path
    }
}

/// Aspect of a signal as seen by a train on its trackdir.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalState {
    /// No signal faces this trackdir.
    #[default]
    None,
    Green,
    Red,
}

/// A signal guarding one trackdir of a rail tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signal {
    pub kind:  SignalKind,
    pub state: SignalState,
}

impl Signal {
    #[inline]
    pub fn is_red(self) -> bool {
        self.state == SignalState::Red
    }
}

// ── Structures ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StructureKind {
    Tunnel,
    Bridge,
}

/// One mouth of a tunnel or bridge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TunnelBridge {
    pub kind:      StructureKind,
    /// Direction of travel into the structure from this mouth.
    pub direction: DiagDir,
    pub transport: TransportType,
    pub other_end: TileIndex,
}

// ── Stations ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadStopKind {
    Bus,
    Truck,
}

/// What a station tile is used for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StationKind {
    /// Rail platform running along `axis`.
    Rail { axis: Axis },
    /// Road stop.  For a bay stop `entrance` is the only open edge; a
    /// drive-through stop is open on both edges of `entrance.axis()`.
    RoadStop { kind: RoadStopKind, entrance: DiagDir, drive_through: bool },
    /// Dock pier; ships berth on it along `axis`.
    Dock { axis: Axis },
    Buoy,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationTile {
    pub station: StationId,
    pub kind:    StationKind,
}

impl StationTile {
    #[inline]
    pub fn is_drive_through(&self) -> bool {
        matches!(self.kind, StationKind::RoadStop { drive_through: true, .. })
    }

    #[inline]
    pub fn is_bay_stop(&self) -> bool {
        matches!(self.kind, StationKind::RoadStop { drive_through: false, .. })
    }
}

/// How full a road stop is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopOccupancy {
    /// Occupied length (drive-through, in tile-length units) or bays in use.
    pub occupied: u32,
    /// Total length of the drive-through run, or number of bays.
    pub capacity: u32,
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Read-only view of the world.
///
/// Required methods describe tiles; provided methods derive the composite
/// queries the search uses from them.  Implementors with a faster native
/// answer may override any provided method.
pub trait Grid {
    fn map_size(&self) -> MapSize;

    /// Neighbour of `tile` one step in `dir`, or `INVALID` off the map.
    #[inline]
    fn tile_offset(&self, tile: TileIndex, dir: DiagDir) -> TileIndex {
        self.map_size().offset(tile, dir)
    }

    fn tile_class(&self, tile: TileIndex) -> TileClass;

    /// Trackdirs a vehicle described by `desc` may use on `tile`.
    ///
    /// Road pieces of road types the vehicle cannot use are filtered out
    /// here, and so are one-way road directions.  Rail types and signals
    /// are left to the caller.
    fn trackdirs(&self, tile: TileIndex, desc: &TransportDescriptor) -> TrackdirBits;

    fn tile_slope(&self, tile: TileIndex) -> Slope;

    /// Height level of the lowest corner of `tile`.
    fn tile_height(&self, tile: TileIndex) -> u8;

    fn owner_of(&self, tile: TileIndex) -> Owner;

    /// Rail type of any rail carried by `tile`.
    fn rail_type(&self, tile: TileIndex) -> Option<RailType>;

    fn tunnel_bridge(&self, tile: TileIndex) -> Option<TunnelBridge>;

    fn signal(&self, tile: TileIndex, trackdir: Trackdir) -> Option<Signal>;

    /// Front edge of a depot of `transport` on `tile`.
    fn depot_entrance(&self, tile: TileIndex, transport: TransportType) -> Option<DiagDir>;

    fn station_at(&self, tile: TileIndex) -> Option<StationTile>;

    /// Point of `station`'s bounding rectangle nearest to `from`.
    fn closest_station_tile(&self, station: StationId, from: TileIndex) -> Option<TileIndex>;

    /// Road axis of a level crossing.
    fn level_crossing(&self, tile: TileIndex) -> Option<Axis>;

    /// If `tile` carries exactly one tram half-road, the edge it points to.
    fn single_tram_bit(&self, tile: TileIndex) -> Option<DiagDir>;

    /// Occupancy of the road stop on `tile` entered moving in `dir`.
    fn road_stop_occupancy(&self, _tile: TileIndex, _dir: DiagDir) -> Option<StopOccupancy> {
        None
    }

    /// Depots of `transport`, closest to `from` first.
    fn depots_by_distance(&self, _from: TileIndex, _transport: TransportType) -> Vec<TileIndex> {
        Vec::new()
    }

    // ── Derived queries ───────────────────────────────────────────────────

    #[inline]
    fn is_tunnel_or_bridge_mouth(&self, tile: TileIndex) -> bool {
        self.tunnel_bridge(tile).is_some()
    }

    /// The paired mouth, or `INVALID` if `tile` is not a mouth.
    #[inline]
    fn other_end(&self, tile: TileIndex) -> TileIndex {
        self.tunnel_bridge(tile).map_or(TileIndex::INVALID, |tb| tb.other_end)
    }

    /// Length in tiles between two mouths.
    #[inline]
    fn structure_length(&self, a: TileIndex, b: TileIndex) -> u32 {
        a.manhattan(b)
    }

    fn signal_state(&self, tile: TileIndex, trackdir: Trackdir) -> SignalState {
        self.signal(tile, trackdir).map_or(SignalState::None, |s| s.state)
    }

    fn signal_kind(&self, tile: TileIndex, trackdir: Trackdir) -> Option<SignalKind> {
        self.signal(tile, trackdir).map(|s| s.kind)
    }

    /// The only edge through which a vehicle of `desc` can leave `tile`,
    /// for depots, bay stops and single tram stubs.
    /// Ship depots are open at both ends and never count.
    fn single_entry(&self, tile: TileIndex, desc: &TransportDescriptor) -> Option<DiagDir> {
        if desc.transport == TransportType::Water {
            return None;
        }
        if let Some(dir) = self.depot_entrance(tile, desc.transport) {
            return Some(dir);
        }
        if desc.transport != TransportType::Road {
            return None;
        }
        if let Some(StationTile {
            kind: StationKind::RoadStop { entrance, drive_through: false, .. },
            ..
        }) = self.station_at(tile)
        {
            return Some(entrance);
        }
        if desc.is_tram() { self.single_tram_bit(tile) } else { None }
    }

    #[inline]
    fn is_depot(&self, tile: TileIndex, transport: TransportType) -> bool {
        self.depot_entrance(tile, transport).is_some()
    }
}
