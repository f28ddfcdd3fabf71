//! junction — route a train, a bus and a ship across one small map.
//!
//! ```text
//!  y=2   D═══════S═D      rail: depots at both ends, block signal, platform
//!  y=6   ─────────▣▣──    road: drive-through bus stop (two tiles)
//!  y=10  ~~~~~~~~~~~~~~~~
//!  y=11  ~~~~~~~B~~=~~~⌂~ water: buoy, dock pier and ship depot
//!  y=12  ~~~~~~~~~~~~~~~~
//! ```
//!
//! Run with `RUST_LOG=tp_route=debug` to see each search start and finish.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tp_core::{
    Axis, DiagDir, OrientedNode, Owner, PathfinderSettings, RailTypes, RoadTypes, StationId, Trackdir, TransportDescriptor,
};
use tp_map::{RoadStopKind, SignalKind, SignalState, StopOccupancy, TileMap, TileMapBuilder};
use tp_route::{ExactTile, FoundTarget, Pathfinder, Start, StationTarget, Starts};

// ── Constants ─────────────────────────────────────────────────────────────────

const COMPANY:      Owner     = Owner(0);
const PLATFORM:     StationId = StationId(1);
const BUS_STOP:     StationId = StationId(2);
const BUOY:         StationId = StationId(3);
const HARBOUR:      StationId = StationId(4);
const LOG_SIZE:     u8        = 4;

// ── Map ───────────────────────────────────────────────────────────────────────

fn build_map() -> Result<TileMap> {
    let mut b = TileMapBuilder::new(LOG_SIZE, LOG_SIZE)?;
    let t = |x, y| b.tile(x, y);
    let (rail_west, signal, platform) = (t(1, 2), t(5, 2), t(8, 2));
    let (depot_w, depot_e) = (t(0, 2), t(11, 2));
    let (road_west, stop_a, stop_b) = (t(0, 6), t(8, 6), t(9, 6));
    let (buoy, pier, ship_depot) = (t(7, 11), t(10, 11), t(14, 11));

    b.owner(COMPANY)
        .rail_line(rail_west, DiagDir::SW, 10)
        .signal(signal, Trackdir::XSw, SignalKind::Block, SignalState::Green)
        .rail_station(platform, PLATFORM, Axis::X)
        .rail_depot(depot_w, DiagDir::SW)
        .rail_depot(depot_e, DiagDir::NE);

    b.road_line(road_west, DiagDir::SW, 12)
        .road_stop(stop_a, BUS_STOP, RoadStopKind::Bus, DiagDir::NE, true)
        .road_stop(stop_b, BUS_STOP, RoadStopKind::Bus, DiagDir::NE, true)
        .stop_occupancy(stop_a, StopOccupancy { occupied: 1, capacity: 2 });

    b.water_rect(0, 10, 15, 12)
        .buoy(buoy, BUOY)
        .dock(pier, HARBOUR, Axis::X)
        .ship_depot(ship_depot, DiagDir::NE);

    Ok(b.build()?)
}

fn report(what: &str, found: &FoundTarget) {
    let first = found.first_trackdir.map_or_else(|| "-".to_string(), |td| td.to_string());
    info!(
        query    = what,
        target   = %found.node,
        cost     = found.cost,
        first    = %first,
        reversed = found.reversed,
        steps    = found.path.len(),
        left     = found.bird_dist,
        expanded = found.stats.nodes_expanded,
        "path found"
    );
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let map = build_map()?;
    let settings = PathfinderSettings::default();
    let pf = Pathfinder::new(&map, &settings)?;
    let tile = |x, y| map.tile(x, y);

    // 1. Train: platform ahead, turn around for a tile behind, nearest depot.
    let train = TransportDescriptor::rail(COMPANY, RailTypes::ALL);
    let front = OrientedNode::new(tile(3, 2), Trackdir::XSw);
    let tail = OrientedNode::new(tile(2, 2), Trackdir::XSw);

    let to_platform = pf.find_path(&train, &Starts::one(front), &StationTarget::new(PLATFORM))?;
    report("train to platform", &to_platform);

    let behind = ExactTile::new(tile(1, 2));
    let reverse = pf.check_reverse(&train, front, tail, &behind)?;
    info!(reverse, "train heading for (1, 2)");

    let depot = pf.find_nearest_depot(&train, &Starts::two(front, front.reversed(), 0))?;
    report("train to nearest depot", &depot);
    let pruned = pf.find_nearest_depot_pruned(&train, Start::new(front))?;
    report("train to depot ahead (pruned)", &pruned);

    // 2. Bus: the drive-through stop is half full.
    let bus = TransportDescriptor::road(COMPANY, RoadTypes::ROAD);
    let from = OrientedNode::new(tile(0, 6), Trackdir::XSw);
    let stop = StationTarget::road_stop(BUS_STOP, RoadStopKind::Bus, false);
    report("bus to stop", &pf.find_path(&bus, &Starts::one(from), &stop)?);

    // 3. Ship: next move towards the buoy, then the dock and the depot beyond it.
    let ship = TransportDescriptor::water(COMPANY);
    let at_sea = Start::new(OrientedNode::new(tile(0, 11), Trackdir::XSw));
    let choice = pf.choose_trackdir(&ship, at_sea, &StationTarget::new(BUOY))?;
    info!(trackdir = ?choice.trackdir, path_found = choice.path_found, "ship heading for buoy");
    report("ship to dock", &pf.find_path(&ship, &Starts::One(at_sea), &StationTarget::new(HARBOUR))?);
    report("ship to depot", &pf.find_nearest_depot(&ship, &Starts::One(at_sea))?);

    // 4. A target nobody can reach still yields a heading.
    let island = ExactTile::new(tile(15, 15));
    let lost = pf.choose_trackdir(&train, Start::new(front), &island)?;
    info!(trackdir = ?lost.trackdir, path_found = lost.path_found, "train heading for unreachable tile");

    Ok(())
}
