//! Unit tests for tp-map.
//!
//! All tests use hand-built maps small enough to reason about tile by tile.

#[cfg(test)]
mod helpers {
    use tp_core::{Owner, RailTypes, RoadTypes, TransportDescriptor};

    pub const ME: Owner = Owner(0);
    pub const THEM: Owner = Owner(1);

    pub fn train() -> TransportDescriptor {
        TransportDescriptor::rail(ME, RailTypes::ALL)
    }

    pub fn bus() -> TransportDescriptor {
        TransportDescriptor::road(ME, RoadTypes::ROAD)
    }

    pub fn tram() -> TransportDescriptor {
        TransportDescriptor::road(ME, RoadTypes::TRAM)
    }

    pub fn ship() -> TransportDescriptor {
        TransportDescriptor::water(ME)
    }
}

// ── RoadBits ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod road_bits {
    use tp_core::{DiagDir, TrackBits};

    use crate::RoadBits;

    #[test]
    fn straight_and_corner() {
        assert_eq!(RoadBits::X.tracks(), TrackBits::X);
        assert_eq!((RoadBits::NE | RoadBits::NW).tracks(), TrackBits::UPPER);
    }

    #[test]
    fn lone_half_is_a_stub_along_its_axis() {
        assert_eq!(RoadBits::half(DiagDir::SE).tracks(), TrackBits::Y);
        assert_eq!(RoadBits::NONE.tracks(), TrackBits::NONE);
    }

    #[test]
    fn full_junction_has_every_piece() {
        assert_eq!(RoadBits::ALL.tracks(), TrackBits::ALL);
        assert_eq!(RoadBits::ALL.len(), 4);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use tp_core::{DiagDir, TileIndex, Trackdir, TransportType};

    use crate::{MapError, SignalKind, SignalState, TileMapBuilder};

    #[test]
    fn empty_build() {
        let map = TileMapBuilder::new(3, 3).unwrap().build().unwrap();
        assert_eq!(map.size().tile_count(), 64);
        assert_eq!(map.depot_count(), 0);
    }

    #[test]
    fn rejects_bad_size() {
        assert!(TileMapBuilder::new(1, 3).is_err());
    }

    #[test]
    fn out_of_bounds_reported_at_build() {
        let mut b = TileMapBuilder::new(2, 2).unwrap();
        b.rail_line(TileIndex::xy(2, 0), DiagDir::SW, 4);
        assert!(matches!(b.build(), Err(MapError::OutOfBounds(_))));
    }

    #[test]
    fn off_axis_structure_rejected() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let (a, c) = (b.tile(1, 1), b.tile(3, 4));
        b.tunnel(a, c, TransportType::Rail);
        assert!(matches!(b.build(), Err(MapError::BadStructure { .. })));
    }

    #[test]
    fn signal_needs_the_track() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let t = b.tile(2, 2);
        b.rail_line(t, DiagDir::SW, 1);
        b.signal(t, Trackdir::YSe, SignalKind::Block, SignalState::Red);
        assert!(matches!(b.build(), Err(MapError::BadSignal { .. })));
    }

    #[test]
    fn first_error_wins() {
        let mut b = TileMapBuilder::new(2, 2).unwrap();
        b.water(TileIndex::xy(9, 0));
        b.water(TileIndex::xy(0, 9));
        match b.build() {
            Err(MapError::OutOfBounds(t)) => assert_eq!(t, TileIndex::xy(9, 0)),
            other => panic!("unexpected {:?}", other.err()),
        }
    }
}

// ── Trackdirs per transport ───────────────────────────────────────────────────

#[cfg(test)]
mod trackdirs {
    use tp_core::{Axis, DiagDir, RailType, RailTypes, RoadType, StationId, TrackBits, Trackdir, TrackdirBits, TransportType};

    use super::helpers::{ME, bus, ship, train, tram};
    use crate::{Grid, RoadBits, StationKind, TileClass, TileMapBuilder};

    #[test]
    fn rail_is_invisible_to_road_and_water() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let t = b.tile(1, 1);
        b.rail(t, TrackBits::X | TrackBits::UPPER);
        let map = b.build().unwrap();
        assert_eq!(map.trackdirs(t, &train()).len(), 4);
        assert!(map.trackdirs(t, &bus()).is_empty());
        assert!(map.trackdirs(t, &ship()).is_empty());
        assert_eq!(map.tile_class(t), TileClass::Rail);
    }

    #[test]
    fn rail_merges_pieces() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let t = b.tile(1, 1);
        b.rail(t, TrackBits::X).rail(t, TrackBits::Y);
        let map = b.build().unwrap();
        assert_eq!(map.trackdirs(t, &train()).tracks(), TrackBits::X | TrackBits::Y);
    }

    #[test]
    fn rail_type_reported_not_filtered() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let t = b.tile(1, 1);
        b.rail_type(RailType::Maglev).rail(t, TrackBits::X);
        let map = b.build().unwrap();
        let steam = tp_core::TransportDescriptor::rail(ME, RailTypes::single(RailType::Rail));
        assert_eq!(map.rail_type(t), Some(RailType::Maglev));
        assert_eq!(map.trackdirs(t, &steam).len(), 2);
    }

    #[test]
    fn one_way_road_keeps_one_sense() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let t = b.tile(1, 1);
        b.road(t, RoadBits::X).one_way(t, DiagDir::SW);
        let map = b.build().unwrap();
        assert_eq!(map.trackdirs(t, &bus()), TrackdirBits::single(Trackdir::XSw));
    }

    #[test]
    fn road_and_tram_bits_are_separate() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let t = b.tile(1, 1);
        b.road(t, RoadBits::X).tram(t, RoadBits::Y);
        let map = b.build().unwrap();
        assert_eq!(map.trackdirs(t, &bus()).tracks(), TrackBits::X);
        assert_eq!(map.trackdirs(t, &tram()).tracks(), TrackBits::Y);
    }

    #[test]
    fn level_crossing_splits_axes() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let t = b.tile(1, 1);
        b.crossing(t, Axis::Y, false);
        let map = b.build().unwrap();
        assert_eq!(map.trackdirs(t, &train()).tracks(), TrackBits::X);
        assert_eq!(map.trackdirs(t, &bus()).tracks(), TrackBits::Y);
        assert!(map.trackdirs(t, &tram()).is_empty());
        assert_eq!(map.level_crossing(t), Some(Axis::Y));
        assert!(map.rail_type(t).is_some());
    }

    #[test]
    fn stations_by_mode() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let (p, s, y) = (b.tile(1, 1), b.tile(2, 2), b.tile(3, 3));
        b.rail_station(p, StationId(1), Axis::X);
        b.tram_stop(s, StationId(2), Axis::Y);
        b.buoy(y, StationId(3));
        let map = b.build().unwrap();
        assert_eq!(map.trackdirs(p, &train()).tracks(), TrackBits::X);
        assert!(map.trackdirs(s, &bus()).is_empty());
        assert_eq!(map.trackdirs(s, &tram()).tracks(), TrackBits::Y);
        assert_eq!(map.trackdirs(y, &ship()), TrackdirBits::ALL);
        assert_eq!(map.station_at(p).map(|st| st.station), Some(StationId(1)));
    }

    #[test]
    fn dock_is_navigable_along_its_pier() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let d = b.tile(4, 1);
        b.water_rect(0, 1, 7, 1).dock(d, StationId(6), Axis::X);
        let map = b.build().unwrap();
        assert_eq!(map.trackdirs(d, &ship()).tracks(), TrackBits::X);
        assert!(map.trackdirs(d, &train()).is_empty());
        assert_eq!(map.single_entry(d, &ship()), None);
        assert_eq!(map.station_at(d).map(|st| st.kind), Some(StationKind::Dock { axis: Axis::X }));
    }

    #[test]
    fn tunnel_mouths_carry_their_transport() {
        let mut b = TileMapBuilder::new(4, 3).unwrap();
        let (a, c) = (b.tile(2, 0), b.tile(6, 0));
        b.tunnel(a, c, TransportType::Road);
        let map = b.build().unwrap();
        assert_eq!(map.trackdirs(a, &bus()).tracks(), TrackBits::X);
        assert!(map.trackdirs(a, &train()).is_empty());
        assert!(map.rail_type(a).is_none());
        let tb = map.tunnel_bridge(a).unwrap();
        assert_eq!((tb.direction, tb.other_end), (DiagDir::SW, c));
        assert_eq!(map.tunnel_bridge(c).unwrap().direction, DiagDir::NE);
        assert_eq!(map.structure_length(a, map.other_end(a)), 4);
    }

    #[test]
    fn road_depot_respects_road_type() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let t = b.tile(1, 1);
        b.road_depot(t, DiagDir::NW, RoadType::Tram);
        let map = b.build().unwrap();
        assert!(map.trackdirs(t, &bus()).is_empty());
        assert_eq!(map.trackdirs(t, &tram()).tracks(), TrackBits::Y);
    }
}

// ── Single-entry tiles ────────────────────────────────────────────────────────

#[cfg(test)]
mod single_entry {
    use tp_core::{DiagDir, StationId};

    use super::helpers::{bus, ship, train, tram};
    use crate::{Grid, RoadBits, RoadStopKind, TileMapBuilder};

    #[test]
    fn depots_and_bays() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let (d, bay, dt, sd) = (b.tile(1, 1), b.tile(2, 2), b.tile(3, 3), b.tile(4, 4));
        b.rail_depot(d, DiagDir::NE);
        b.road_stop(bay, StationId(1), RoadStopKind::Truck, DiagDir::SE, false);
        b.road_stop(dt, StationId(1), RoadStopKind::Bus, DiagDir::SE, true);
        b.ship_depot(sd, DiagDir::NE);
        let map = b.build().unwrap();
        assert_eq!(map.single_entry(d, &train()), Some(DiagDir::NE));
        assert_eq!(map.single_entry(bay, &bus()), Some(DiagDir::SE));
        assert_eq!(map.single_entry(dt, &bus()), None);
        assert_eq!(map.single_entry(sd, &ship()), None);
        assert!(map.is_depot(sd, tp_core::TransportType::Water));
    }

    #[test]
    fn tram_stub_only_for_trams() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let t = b.tile(1, 1);
        b.tram(t, RoadBits::NE).road(t, RoadBits::X);
        let map = b.build().unwrap();
        assert_eq!(map.single_tram_bit(t), Some(DiagDir::NE));
        assert_eq!(map.single_entry(t, &tram()), Some(DiagDir::NE));
        assert_eq!(map.single_entry(t, &bus()), None);
    }
}

// ── Signals and mutation ──────────────────────────────────────────────────────

#[cfg(test)]
mod signals {
    use tp_core::{DiagDir, Trackdir};

    use crate::{Grid, SignalKind, SignalState, TileMapBuilder};

    #[test]
    fn per_trackdir_state() {
        let mut b = TileMapBuilder::new(3, 3).unwrap();
        let t = b.tile(3, 1);
        b.rail_line(b.tile(0, 1), DiagDir::SW, 6);
        b.signal(t, Trackdir::XSw, SignalKind::Exit, SignalState::Red);
        let mut map = b.build().unwrap();
        assert_eq!(map.signal_state(t, Trackdir::XSw), SignalState::Red);
        assert_eq!(map.signal_state(t, Trackdir::XNe), SignalState::None);
        assert_eq!(map.signal_kind(t, Trackdir::XSw), Some(SignalKind::Exit));

        map.set_signal_state(t, Trackdir::XSw, SignalState::Green).unwrap();
        assert_eq!(map.signal_state(t, Trackdir::XSw), SignalState::Green);
        assert!(map.set_signal_state(t, Trackdir::XNe, SignalState::Green).is_err());
    }

    #[test]
    fn kind_predicates() {
        assert!(SignalKind::Combo.is_exit_like());
        assert!(!SignalKind::Entry.is_exit_like());
        assert!(SignalKind::PathOneWay.is_path() && SignalKind::PathOneWay.is_one_way());
        assert!(!SignalKind::Path.is_one_way());
        assert!(SignalKind::Block.is_one_way());
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod spatial {
    use tp_core::{Axis, DiagDir, RoadType, StationId, TransportType};

    use crate::{Grid, TileMapBuilder};

    #[test]
    fn closest_station_tile_clamps_to_footprint() {
        let mut b = TileMapBuilder::new(4, 4).unwrap();
        for x in 4..=6 {
            for y in 2..=3 {
                let t = b.tile(x, y);
                b.rail_station(t, StationId(7), Axis::X);
            }
        }
        let map = b.build().unwrap();
        let st = StationId(7);
        assert_eq!(map.closest_station_tile(st, map.tile(0, 0)), Some(map.tile(4, 2)));
        assert_eq!(map.closest_station_tile(st, map.tile(10, 3)), Some(map.tile(6, 3)));
        assert_eq!(map.closest_station_tile(st, map.tile(5, 2)), Some(map.tile(5, 2)));
        assert_eq!(map.closest_station_tile(StationId(8), map.tile(0, 0)), None);
    }

    #[test]
    fn depots_sorted_by_distance_per_transport() {
        let mut b = TileMapBuilder::new(4, 4).unwrap();
        let (far, near, road) = (b.tile(12, 12), b.tile(3, 2), b.tile(1, 1));
        b.rail_depot(far, DiagDir::NE);
        b.rail_depot(near, DiagDir::SW);
        b.road_depot(road, DiagDir::NE, RoadType::Road);
        let map = b.build().unwrap();
        assert_eq!(map.depot_count(), 3);
        let from = map.tile(0, 0);
        assert_eq!(map.depots_by_distance(from, TransportType::Rail), vec![near, far]);
        assert_eq!(map.depots_by_distance(from, TransportType::Road), vec![road]);
        assert!(map.depots_by_distance(from, TransportType::Water).is_empty());
    }
}
