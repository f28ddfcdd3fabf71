//! In-memory reference world and builder.
//!
//! # Data layout
//!
//! One [`Tile`] per map cell in a dense row-major `Vec`, indexed through
//! [`MapSize::linear`].  Sparse per-tile extras live in hash maps keyed by
//! tile (`rustc-hash`, since keys are small integers):
//!
//! - signals, keyed by `(tile, trackdir)`;
//! - station footprints and their bounding rectangles;
//! - road stop occupancy.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over depot tiles answers "depots closest to this
//! tile", which the nearest-depot query uses to order its candidates.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use tp_core::{
    Axis, DiagDir, MapSize, Owner, RailType, RoadType, StationId, TileIndex, Track, TrackBits,
    Trackdir, TrackdirBits, TransportDescriptor, TransportType,
};

use crate::grid::{
    Grid, RoadStopKind, Signal, SignalKind, SignalState, Slope, StationKind, StationTile,
    StopOccupancy, StructureKind, TileClass, TunnelBridge,
};
use crate::{MapError, MapResult};

// ── RoadBits ──────────────────────────────────────────────────────────────────

/// Half-road pieces present on a tile, one bit per edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadBits(pub u8);

impl RoadBits {
    pub const NONE: RoadBits = RoadBits(0);
    pub const NE: RoadBits = RoadBits(1 << DiagDir::NE as u8);
    pub const SE: RoadBits = RoadBits(1 << DiagDir::SE as u8);
    pub const SW: RoadBits = RoadBits(1 << DiagDir::SW as u8);
    pub const NW: RoadBits = RoadBits(1 << DiagDir::NW as u8);
    pub const X: RoadBits = RoadBits(Self::NE.0 | Self::SW.0);
    pub const Y: RoadBits = RoadBits(Self::SE.0 | Self::NW.0);
    pub const ALL: RoadBits = RoadBits(0x0F);

    #[inline]
    pub fn half(dir: DiagDir) -> RoadBits {
        RoadBits(1 << dir as u8)
    }

    #[inline]
    pub fn axis(axis: Axis) -> RoadBits {
        match axis {
            Axis::X => Self::X,
            Axis::Y => Self::Y,
        }
    }

    #[inline]
    pub fn contains(self, dir: DiagDir) -> bool {
        self.0 & (1 << dir as u8) != 0
    }

    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Drivable pieces: every pair of present halves is joined, and a lone
    /// half is a stub along its axis where vehicles turn round.
    pub fn tracks(self) -> TrackBits {
        let halves: Vec<DiagDir> = DiagDir::ALL.into_iter().filter(|d| self.contains(*d)).collect();
        if let [only] = halves[..] {
            return TrackBits::single(only.axis().track());
        }
        let mut bits = TrackBits::NONE;
        for (i, a) in halves.iter().enumerate() {
            for b in &halves[i + 1..] {
                if let Some(t) = Track::between(*a, *b) {
                    bits |= TrackBits::single(t);
                }
            }
        }
        bits
    }
}

impl std::ops::BitOr for RoadBits {
    type Output = RoadBits;
    fn bitor(self, rhs: RoadBits) -> RoadBits {
        RoadBits(self.0 | rhs.0)
    }
}

// ── Tile ──────────────────────────────────────────────────────────────────────

/// What occupies a map cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Clear,
    Rail { tracks: TrackBits, rail_type: RailType },
    RailDepot { entrance: DiagDir, rail_type: RailType },
    /// `one_way` restricts road traffic on that direction's axis to moving
    /// towards it.
    Road { road: RoadBits, tram: RoadBits, one_way: Option<DiagDir> },
    /// Rail/road level crossing.  The tile owner owns the rail.
    Crossing { road_axis: Axis, rail_type: RailType, tram: bool },
    RoadDepot { entrance: DiagDir, road_type: RoadType },
    Station { station: StationId, kind: StationKind, rail_type: RailType, road_type: RoadType },
    Water,
    ShipDepot { entrance: DiagDir },
    TunnelBridge { structure: TunnelBridge, rail_type: RailType, road_type: RoadType },
}

/// One map cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind:   TileKind,
    pub owner:  Owner,
    pub height: u8,
    pub slope:  Slope,
}

impl Default for Tile {
    fn default() -> Self {
        Self { kind: TileKind::Clear, owner: Owner::NONE, height: 0, slope: Slope::Flat }
    }
}

// ── R-tree depot entry ────────────────────────────────────────────────────────

#[derive(Clone)]
struct DepotEntry {
    point:     [i32; 2], // [x, y]
    tile:      TileIndex,
    transport: TransportType,
}

impl RTreeObject for DepotEntry {
    type Envelope = AABB<[i32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for DepotEntry {
    /// Squared Euclidean distance in tile units.
    fn distance_2(&self, point: &[i32; 2]) -> i32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Inclusive bounding rectangle of a station footprint.
#[derive(Copy, Clone, Debug)]
struct StationRect {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl StationRect {
    fn at(tile: TileIndex) -> Self {
        Self { min_x: tile.x(), min_y: tile.y(), max_x: tile.x(), max_y: tile.y() }
    }

    fn extend(&mut self, tile: TileIndex) {
        self.min_x = self.min_x.min(tile.x());
        self.min_y = self.min_y.min(tile.y());
        self.max_x = self.max_x.max(tile.x());
        self.max_y = self.max_y.max(tile.y());
    }

    fn clamp(&self, from: TileIndex) -> TileIndex {
        TileIndex::xy(from.x().clamp(self.min_x, self.max_x), from.y().clamp(self.min_y, self.max_y))
    }
}

// ── TileMap ───────────────────────────────────────────────────────────────────

/// Dense tile world implementing [`Grid`].
///
/// Do not construct directly; use [`TileMapBuilder`].  Only signal aspects
/// and road stop occupancy can change after building, mirroring what
/// changes between two pathfinder calls in a running game.
pub struct TileMap {
    size:      MapSize,
    tiles:     Vec<Tile>,
    signals:   FxHashMap<(TileIndex, Trackdir), Signal>,
    stations:  FxHashMap<StationId, StationRect>,
    occupancy: FxHashMap<TileIndex, StopOccupancy>,
    depot_idx: RTree<DepotEntry>,
}

impl TileMap {
    #[inline]
    pub fn size(&self) -> MapSize {
        self.size
    }

    /// Tile at `(x, y)`, or `INVALID` outside the map.
    #[inline]
    pub fn tile(&self, x: u32, y: u32) -> TileIndex {
        self.size.tile(x, y)
    }

    /// The cell stored at `tile`.
    #[inline]
    pub fn get(&self, tile: TileIndex) -> Option<&Tile> {
        if self.size.contains(tile) { self.tiles.get(self.size.linear(tile)) } else { None }
    }

    #[inline]
    fn kind(&self, tile: TileIndex) -> TileKind {
        self.get(tile).map_or(TileKind::Clear, |t| t.kind)
    }

    pub fn depot_count(&self) -> usize {
        self.depot_idx.size()
    }

    // ── Mutation between queries ──────────────────────────────────────────

    /// Change the aspect of an existing signal.
    pub fn set_signal_state(&mut self, tile: TileIndex, trackdir: Trackdir, state: SignalState) -> MapResult<()> {
        match self.signals.get_mut(&(tile, trackdir)) {
            Some(sig) => {
                sig.state = state;
                Ok(())
            }
            None => Err(MapError::BadSignal { tile, trackdir }),
        }
    }

    pub fn set_stop_occupancy(&mut self, tile: TileIndex, occupancy: StopOccupancy) -> MapResult<()> {
        if !self.size.contains(tile) {
            return Err(MapError::OutOfBounds(tile));
        }
        self.occupancy.insert(tile, occupancy);
        Ok(())
    }
}

/// Road pieces of `bits` with one-way restrictions applied.
fn road_trackdirs(bits: RoadBits, one_way: Option<DiagDir>) -> TrackdirBits {
    let tds = bits.tracks().trackdirs();
    match one_way {
        None => tds,
        Some(dir) => tds
            .iter()
            .filter(|td| td.exitdir() != dir.reverse() && td.enterdir() != dir.reverse())
            .collect(),
    }
}

#[inline]
fn axis_trackdirs(axis: Axis) -> TrackdirBits {
    TrackBits::single(axis.track()).trackdirs()
}

impl Grid for TileMap {
    #[inline]
    fn map_size(&self) -> MapSize {
        self.size
    }

    fn tile_class(&self, tile: TileIndex) -> TileClass {
        match self.kind(tile) {
            TileKind::Clear => TileClass::Clear,
            TileKind::Rail { .. } | TileKind::RailDepot { .. } => TileClass::Rail,
            TileKind::Road { .. } | TileKind::Crossing { .. } | TileKind::RoadDepot { .. } => TileClass::Road,
            TileKind::Station { .. } => TileClass::Station,
            TileKind::Water | TileKind::ShipDepot { .. } => TileClass::Water,
            TileKind::TunnelBridge { .. } => TileClass::TunnelBridge,
        }
    }

    fn trackdirs(&self, tile: TileIndex, desc: &TransportDescriptor) -> TrackdirBits {
        let road = desc.road_types.contains(RoadType::Road);
        let tram = desc.road_types.contains(RoadType::Tram);
        match (self.kind(tile), desc.transport) {
            (TileKind::Rail { tracks, .. }, TransportType::Rail) => tracks.trackdirs(),
            (TileKind::RailDepot { entrance, .. }, TransportType::Rail) => axis_trackdirs(entrance.axis()),
            (TileKind::Road { road: r, tram: t, one_way }, TransportType::Road) => {
                let mut tds = TrackdirBits::NONE;
                if road {
                    tds |= road_trackdirs(r, one_way);
                }
                if tram {
                    tds |= road_trackdirs(t, None);
                }
                tds
            }
            (TileKind::Crossing { road_axis, .. }, TransportType::Rail) => {
                axis_trackdirs(if road_axis == Axis::X { Axis::Y } else { Axis::X })
            }
            (TileKind::Crossing { road_axis, tram: has_tram, .. }, TransportType::Road) => {
                if road || (tram && has_tram) { axis_trackdirs(road_axis) } else { TrackdirBits::NONE }
            }
            (TileKind::RoadDepot { entrance, road_type }, TransportType::Road)
                if desc.road_types.contains(road_type) =>
            {
                axis_trackdirs(entrance.axis())
            }
            (TileKind::Station { kind, road_type, .. }, transport) => match (kind, transport) {
                (StationKind::Rail { axis }, TransportType::Rail) => axis_trackdirs(axis),
                (StationKind::RoadStop { entrance, .. }, TransportType::Road)
                    if desc.road_types.contains(road_type) =>
                {
                    axis_trackdirs(entrance.axis())
                }
                (StationKind::Dock { axis }, TransportType::Water) => axis_trackdirs(axis),
                (StationKind::Buoy, TransportType::Water) => TrackdirBits::ALL,
                _ => TrackdirBits::NONE,
            },
            (TileKind::Water, TransportType::Water) => TrackdirBits::ALL,
            (TileKind::ShipDepot { entrance }, TransportType::Water) => axis_trackdirs(entrance.axis()),
            (TileKind::TunnelBridge { structure, road_type, .. }, transport)
                if structure.transport == transport
                    && (transport != TransportType::Road || desc.road_types.contains(road_type)) =>
            {
                axis_trackdirs(structure.direction.axis())
            }
            _ => TrackdirBits::NONE,
        }
    }

    #[inline]
    fn tile_slope(&self, tile: TileIndex) -> Slope {
        self.get(tile).map_or(Slope::Flat, |t| t.slope)
    }

    #[inline]
    fn tile_height(&self, tile: TileIndex) -> u8 {
        self.get(tile).map_or(0, |t| t.height)
    }

    #[inline]
    fn owner_of(&self, tile: TileIndex) -> Owner {
        self.get(tile).map_or(Owner::NONE, |t| t.owner)
    }

    fn rail_type(&self, tile: TileIndex) -> Option<RailType> {
        match self.kind(tile) {
            TileKind::Rail { rail_type, .. }
            | TileKind::RailDepot { rail_type, .. }
            | TileKind::Crossing { rail_type, .. } => Some(rail_type),
            TileKind::Station { kind: StationKind::Rail { .. }, rail_type, .. } => Some(rail_type),
            TileKind::TunnelBridge { structure, rail_type, .. } if structure.transport == TransportType::Rail => {
                Some(rail_type)
            }
            _ => None,
        }
    }

    fn tunnel_bridge(&self, tile: TileIndex) -> Option<TunnelBridge> {
        match self.kind(tile) {
            TileKind::TunnelBridge { structure, .. } => Some(structure),
            _ => None,
        }
    }

    #[inline]
    fn signal(&self, tile: TileIndex, trackdir: Trackdir) -> Option<Signal> {
        self.signals.get(&(tile, trackdir)).copied()
    }

    fn depot_entrance(&self, tile: TileIndex, transport: TransportType) -> Option<DiagDir> {
        match (self.kind(tile), transport) {
            (TileKind::RailDepot { entrance, .. }, TransportType::Rail)
            | (TileKind::RoadDepot { entrance, .. }, TransportType::Road)
            | (TileKind::ShipDepot { entrance }, TransportType::Water) => Some(entrance),
            _ => None,
        }
    }

    fn station_at(&self, tile: TileIndex) -> Option<StationTile> {
        match self.kind(tile) {
            TileKind::Station { station, kind, .. } => Some(StationTile { station, kind }),
            _ => None,
        }
    }

    fn closest_station_tile(&self, station: StationId, from: TileIndex) -> Option<TileIndex> {
        self.stations.get(&station).map(|r| r.clamp(from))
    }

    fn level_crossing(&self, tile: TileIndex) -> Option<Axis> {
        match self.kind(tile) {
            TileKind::Crossing { road_axis, .. } => Some(road_axis),
            _ => None,
        }
    }

    fn single_tram_bit(&self, tile: TileIndex) -> Option<DiagDir> {
        match self.kind(tile) {
            TileKind::Road { tram, .. } if tram.len() == 1 => {
                DiagDir::ALL.into_iter().find(|d| tram.contains(*d))
            }
            _ => None,
        }
    }

    fn road_stop_occupancy(&self, tile: TileIndex, _dir: DiagDir) -> Option<StopOccupancy> {
        self.occupancy.get(&tile).copied()
    }

    fn depots_by_distance(&self, from: TileIndex, transport: TransportType) -> Vec<TileIndex> {
        self.depot_idx
            .nearest_neighbor_iter(&[from.x() as i32, from.y() as i32])
            .filter(|e| e.transport == transport)
            .map(|e| e.tile)
            .collect()
    }
}

// ── TileMapBuilder ────────────────────────────────────────────────────────────

/// Construct a [`TileMap`] tile by tile, then call [`build`](Self::build).
///
/// Placement methods chain and never fail on the spot; the first problem
/// (a tile off the map, a malformed tunnel) is reported by `build()`.
/// Newly placed infrastructure gets the current default owner and rail type.
///
/// # Example
///
/// ```
/// use tp_core::{DiagDir, Owner};
/// use tp_map::{Grid, TileMapBuilder};
///
/// let mut b = TileMapBuilder::new(4, 4).unwrap();
/// let start = b.tile(0, 2);
/// b.owner(Owner(0)).rail_line(start, DiagDir::SW, 6);
/// let map = b.build().unwrap();
/// assert!(map.rail_type(map.tile(5, 2)).is_some());
/// ```
pub struct TileMapBuilder {
    size:         MapSize,
    tiles:        Vec<Tile>,
    signals:      FxHashMap<(TileIndex, Trackdir), Signal>,
    occupancy:    FxHashMap<TileIndex, StopOccupancy>,
    owner:        Owner,
    rail_type:    RailType,
    first_error:  Option<MapError>,
}

impl TileMapBuilder {
    /// An all-clear `2^log_x × 2^log_y` map at height 0.
    pub fn new(log_x: u8, log_y: u8) -> MapResult<Self> {
        let size = MapSize::new(log_x, log_y)?;
        Ok(Self {
            size,
            tiles:       vec![Tile::default(); size.tile_count()],
            signals:     FxHashMap::default(),
            occupancy:   FxHashMap::default(),
            owner:       Owner(0),
            rail_type:   RailType::Rail,
            first_error: None,
        })
    }

    #[inline]
    pub fn size(&self) -> MapSize {
        self.size
    }

    /// Tile at `(x, y)`, or `INVALID` outside the map.
    #[inline]
    pub fn tile(&self, x: u32, y: u32) -> TileIndex {
        self.size.tile(x, y)
    }

    fn fail(&mut self, err: MapError) {
        if self.first_error.is_none() {
            self.first_error = Some(err);
        }
    }

    fn slot(&mut self, tile: TileIndex) -> Option<&mut Tile> {
        if !self.size.contains(tile) {
            self.fail(MapError::OutOfBounds(tile));
            return None;
        }
        let i = self.size.linear(tile);
        self.tiles.get_mut(i)
    }

    fn place(&mut self, tile: TileIndex, kind: TileKind) -> &mut Self {
        let owner = self.owner;
        if let Some(t) = self.slot(tile) {
            t.kind = kind;
            t.owner = owner;
        }
        self
    }

    // ── Defaults ──────────────────────────────────────────────────────────

    /// Owner given to infrastructure placed from now on.
    pub fn owner(&mut self, owner: Owner) -> &mut Self {
        self.owner = owner;
        self
    }

    /// Rail type given to rail placed from now on.
    pub fn rail_type(&mut self, rail_type: RailType) -> &mut Self {
        self.rail_type = rail_type;
        self
    }

    /// Re-own one already placed tile.
    pub fn set_owner(&mut self, tile: TileIndex, owner: Owner) -> &mut Self {
        if let Some(t) = self.slot(tile) {
            t.owner = owner;
        }
        self
    }

    pub fn terrain(&mut self, tile: TileIndex, height: u8, slope: Slope) -> &mut Self {
        if let Some(t) = self.slot(tile) {
            t.height = height;
            t.slope = slope;
        }
        self
    }

    // ── Rail ──────────────────────────────────────────────────────────────

    /// Add track pieces, merging with rail already on the tile.
    pub fn rail(&mut self, tile: TileIndex, tracks: TrackBits) -> &mut Self {
        let rail_type = self.rail_type;
        let merged = match self.size.contains(tile).then(|| self.tiles[self.size.linear(tile)].kind) {
            Some(TileKind::Rail { tracks: old, .. }) => old | tracks,
            _ => tracks,
        };
        self.place(tile, TileKind::Rail { tracks: merged, rail_type })
    }

    /// Straight track along `dir.axis()` on `len` tiles starting at `from`.
    pub fn rail_line(&mut self, from: TileIndex, dir: DiagDir, len: u32) -> &mut Self {
        let tracks = TrackBits::single(dir.axis().track());
        for i in 0..len {
            let t = self.size.offset_n(from, dir, i);
            self.rail(t, tracks);
        }
        self
    }

    pub fn rail_depot(&mut self, tile: TileIndex, entrance: DiagDir) -> &mut Self {
        let rail_type = self.rail_type;
        self.place(tile, TileKind::RailDepot { entrance, rail_type })
    }

    /// A signal facing trains on `trackdir`.  The tile must already carry
    /// the track.
    pub fn signal(&mut self, tile: TileIndex, trackdir: Trackdir, kind: SignalKind, state: SignalState) -> &mut Self {
        let ok = matches!(
            self.size.contains(tile).then(|| self.tiles[self.size.linear(tile)].kind),
            Some(TileKind::Rail { tracks, .. }) if tracks.contains(trackdir.track())
        );
        if ok {
            self.signals.insert((tile, trackdir), Signal { kind, state });
        } else {
            self.fail(MapError::BadSignal { tile, trackdir });
        }
        self
    }

    // ── Road ──────────────────────────────────────────────────────────────

    /// Add road halves, merging with road already on the tile.
    pub fn road(&mut self, tile: TileIndex, bits: RoadBits) -> &mut Self {
        self.road_pieces(tile, bits, RoadBits::NONE)
    }

    /// Add tram halves, merging with road already on the tile.
    pub fn tram(&mut self, tile: TileIndex, bits: RoadBits) -> &mut Self {
        self.road_pieces(tile, RoadBits::NONE, bits)
    }

    fn road_pieces(&mut self, tile: TileIndex, road: RoadBits, tram: RoadBits) -> &mut Self {
        let kind = match self.size.contains(tile).then(|| self.tiles[self.size.linear(tile)].kind) {
            Some(TileKind::Road { road: r, tram: t, one_way }) => {
                TileKind::Road { road: r | road, tram: t | tram, one_way }
            }
            _ => TileKind::Road { road, tram, one_way: None },
        };
        self.place(tile, kind)
    }

    /// Straight road along `dir.axis()` on `len` tiles starting at `from`.
    pub fn road_line(&mut self, from: TileIndex, dir: DiagDir, len: u32) -> &mut Self {
        for i in 0..len {
            let t = self.size.offset_n(from, dir, i);
            self.road(t, RoadBits::axis(dir.axis()));
        }
        self
    }

    /// Restrict road traffic on an existing road tile to move towards `dir`.
    pub fn one_way(&mut self, tile: TileIndex, dir: DiagDir) -> &mut Self {
        if let Some(t) = self.slot(tile) {
            if let TileKind::Road { one_way, .. } = &mut t.kind {
                *one_way = Some(dir);
            }
        }
        self
    }

    /// Level crossing; the current owner owns the rail part.
    pub fn crossing(&mut self, tile: TileIndex, road_axis: Axis, tram: bool) -> &mut Self {
        let rail_type = self.rail_type;
        self.place(tile, TileKind::Crossing { road_axis, rail_type, tram })
    }

    pub fn road_depot(&mut self, tile: TileIndex, entrance: DiagDir, road_type: RoadType) -> &mut Self {
        self.place(tile, TileKind::RoadDepot { entrance, road_type })
    }

    // ── Stations ──────────────────────────────────────────────────────────

    fn station(&mut self, tile: TileIndex, station: StationId, kind: StationKind, road_type: RoadType) -> &mut Self {
        let rail_type = self.rail_type;
        self.place(tile, TileKind::Station { station, kind, rail_type, road_type })
    }

    pub fn rail_station(&mut self, tile: TileIndex, station: StationId, axis: Axis) -> &mut Self {
        self.station(tile, station, StationKind::Rail { axis }, RoadType::Road)
    }

    pub fn road_stop(
        &mut self,
        tile: TileIndex,
        station: StationId,
        kind: RoadStopKind,
        entrance: DiagDir,
        drive_through: bool,
    ) -> &mut Self {
        self.station(tile, station, StationKind::RoadStop { kind, entrance, drive_through }, RoadType::Road)
    }

    /// A tram stop (drive-through, tram tracks only).
    pub fn tram_stop(&mut self, tile: TileIndex, station: StationId, axis: Axis) -> &mut Self {
        let entrance = if axis == Axis::X { DiagDir::NE } else { DiagDir::NW };
        let kind = StationKind::RoadStop { kind: RoadStopKind::Bus, entrance, drive_through: true };
        self.station(tile, station, kind, RoadType::Tram)
    }

    /// A dock pier on `tile`, navigable along `axis`.
    pub fn dock(&mut self, tile: TileIndex, station: StationId, axis: Axis) -> &mut Self {
        self.station(tile, station, StationKind::Dock { axis }, RoadType::Road)
    }

    /// Buoy on water, owned by nobody.
    pub fn buoy(&mut self, tile: TileIndex, station: StationId) -> &mut Self {
        self.station(tile, station, StationKind::Buoy, RoadType::Road);
        self.set_owner(tile, Owner::WATER)
    }

    pub fn stop_occupancy(&mut self, tile: TileIndex, occupancy: StopOccupancy) -> &mut Self {
        if self.size.contains(tile) {
            self.occupancy.insert(tile, occupancy);
        } else {
            self.fail(MapError::OutOfBounds(tile));
        }
        self
    }

    // ── Water ─────────────────────────────────────────────────────────────

    pub fn water(&mut self, tile: TileIndex) -> &mut Self {
        self.place(tile, TileKind::Water);
        self.set_owner(tile, Owner::WATER)
    }

    /// Fill the inclusive rectangle `(x0, y0)..=(x1, y1)` with water.
    pub fn water_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) -> &mut Self {
        for y in y0..=y1 {
            for x in x0..=x1 {
                let t = self.size.tile(x, y);
                self.water(t);
            }
        }
        self
    }

    pub fn ship_depot(&mut self, tile: TileIndex, entrance: DiagDir) -> &mut Self {
        self.place(tile, TileKind::ShipDepot { entrance })
    }

    // ── Tunnels and bridges ───────────────────────────────────────────────

    pub fn tunnel(&mut self, a: TileIndex, b: TileIndex, transport: TransportType) -> &mut Self {
        self.structure(StructureKind::Tunnel, a, b, transport)
    }

    pub fn bridge(&mut self, a: TileIndex, b: TileIndex, transport: TransportType) -> &mut Self {
        self.structure(StructureKind::Bridge, a, b, transport)
    }

    /// Both mouths of a structure between `a` and `b`, which must share a
    /// row or a column.  Interior tiles are left as they are.
    fn structure(&mut self, kind: StructureKind, a: TileIndex, b: TileIndex, transport: TransportType) -> &mut Self {
        let dir = match (a.x().cmp(&b.x()), a.y().cmp(&b.y())) {
            (std::cmp::Ordering::Less, std::cmp::Ordering::Equal) => DiagDir::SW,
            (std::cmp::Ordering::Greater, std::cmp::Ordering::Equal) => DiagDir::NE,
            (std::cmp::Ordering::Equal, std::cmp::Ordering::Less) => DiagDir::SE,
            (std::cmp::Ordering::Equal, std::cmp::Ordering::Greater) => DiagDir::NW,
            _ => {
                self.fail(MapError::BadStructure { a, b });
                return self;
            }
        };
        let rail_type = self.rail_type;
        let road_type = RoadType::Road;
        for (here, there, direction) in [(a, b, dir), (b, a, dir.reverse())] {
            let structure = TunnelBridge { kind, direction, transport, other_end: there };
            self.place(here, TileKind::TunnelBridge { structure, rail_type, road_type });
        }
        self
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Consume the builder and produce a [`TileMap`].
    ///
    /// Scans the tiles once to collect station rectangles and depots, then
    /// bulk-loads the depot R-tree.
    pub fn build(self) -> MapResult<TileMap> {
        if let Some(err) = self.first_error {
            return Err(err);
        }

        let mut stations: FxHashMap<StationId, StationRect> = FxHashMap::default();
        let mut depots = Vec::new();
        for y in 0..self.size.height() {
            for x in 0..self.size.width() {
                let tile = TileIndex::xy(x, y);
                let transport = match self.tiles[self.size.linear(tile)].kind {
                    TileKind::Station { station, .. } => {
                        stations.entry(station).and_modify(|r| r.extend(tile)).or_insert(StationRect::at(tile));
                        continue;
                    }
                    TileKind::RailDepot { .. } => TransportType::Rail,
                    TileKind::RoadDepot { .. } => TransportType::Road,
                    TileKind::ShipDepot { .. } => TransportType::Water,
                    _ => continue,
                };
                depots.push(DepotEntry { point: [x as i32, y as i32], tile, transport });
            }
        }

        Ok(TileMap {
            size:      self.size,
            tiles:     self.tiles,
            signals:   self.signals,
            stations,
            occupancy: self.occupancy,
            depot_idx: RTree::bulk_load(depots),
        })
    }
}
