//! Unit tests for tp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{Owner, StationId};

    #[test]
    fn index_is_the_inner_value() {
        assert_eq!(StationId(42).index(), 42);
        assert_eq!(Owner(3).index(), 3);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(StationId::INVALID.0, u16::MAX);
        assert_eq!(Owner::INVALID.0, u8::MAX);
        assert!(!Owner::default().is_valid());
    }

    #[test]
    fn special_owners_are_not_companies() {
        assert!(Owner(0).is_company());
        assert!(Owner(14).is_company());
        assert!(!Owner::TOWN.is_company());
        assert!(!Owner::NONE.is_company());
        assert!(!Owner::WATER.is_company());
    }

    #[test]
    fn display() {
        assert_eq!(StationId(7).to_string(), "StationId#7");
        assert_eq!(Owner::INVALID.to_string(), "Owner#-");
    }
}

#[cfg(test)]
mod tile {
    use crate::{DiagDir, MapSize, TileIndex};

    #[test]
    fn xy_roundtrip() {
        let t = TileIndex::xy(12, 34);
        assert_eq!((t.x(), t.y()), (12, 34));
        assert_eq!(t.to_string(), "(12, 34)");
    }

    #[test]
    fn map_size_bounds() {
        assert!(MapSize::new(1, 4).is_err());
        assert!(MapSize::new(4, 16).is_err());
        let m = MapSize::new(4, 3).unwrap();
        assert_eq!((m.width(), m.height()), (16, 8));
        assert_eq!(m.tile_count(), 128);
        assert!(m.contains(m.tile(15, 7)));
        assert_eq!(m.tile(16, 0), TileIndex::INVALID);
        assert!(!m.contains(TileIndex::INVALID));
    }

    #[test]
    fn offset_inside_map() {
        let m = MapSize::new(4, 4).unwrap();
        let t = m.tile(5, 5);
        assert_eq!(m.offset(t, DiagDir::NE), m.tile(4, 5));
        assert_eq!(m.offset(t, DiagDir::SE), m.tile(5, 6));
        assert_eq!(m.offset(t, DiagDir::SW), m.tile(6, 5));
        assert_eq!(m.offset(t, DiagDir::NW), m.tile(5, 4));
    }

    #[test]
    fn offset_off_the_edge_is_invalid() {
        let m = MapSize::new(2, 2).unwrap();
        assert_eq!(m.offset(m.tile(0, 0), DiagDir::NE), TileIndex::INVALID);
        assert_eq!(m.offset(m.tile(0, 0), DiagDir::NW), TileIndex::INVALID);
        assert_eq!(m.offset(m.tile(3, 3), DiagDir::SW), TileIndex::INVALID);
        assert_eq!(m.offset(m.tile(3, 3), DiagDir::SE), TileIndex::INVALID);
        assert_eq!(m.offset(TileIndex::INVALID, DiagDir::SE), TileIndex::INVALID);
    }

    #[test]
    fn offset_n() {
        let m = MapSize::new(3, 3).unwrap();
        assert_eq!(m.offset_n(m.tile(1, 1), DiagDir::SW, 4), m.tile(5, 1));
        assert_eq!(m.offset_n(m.tile(1, 1), DiagDir::SW, 0), m.tile(1, 1));
        assert_eq!(m.offset_n(m.tile(1, 1), DiagDir::NE, 2), TileIndex::INVALID);
    }

    #[test]
    fn distances() {
        let a = TileIndex::xy(1, 2);
        let b = TileIndex::xy(4, 8);
        assert_eq!(a.manhattan(b), 9);
        assert_eq!(a.chebyshev(b), 6);
    }
}

#[cfg(test)]
mod track {
    use quickcheck::quickcheck;

    use crate::{DiagDir, Track, TrackBits, Trackdir, TrackdirBits};

    #[test]
    fn reverse_is_involution_and_opposite() {
        for td in Trackdir::ALL {
            assert_eq!(td.reverse().reverse(), td);
            assert!(td.is_opposite(td.reverse()));
            assert_eq!(td.track(), td.reverse().track());
            assert_eq!(td.value() ^ 8, td.reverse().value());
        }
    }

    #[test]
    fn exit_edge_belongs_to_track() {
        for td in Trackdir::ALL {
            let (a, b) = td.track().edges();
            assert!(td.exitdir() == a || td.exitdir() == b, "{td:?}");
            // Entering and leaving happen through the two different edges.
            assert_ne!(td.exitdir(), td.enterdir().reverse());
        }
    }

    #[test]
    fn entering_sets_are_consistent() {
        for dir in DiagDir::ALL {
            let tds = TrackdirBits::entering(dir);
            assert_eq!(tds.len(), 3);
            for td in tds.iter() {
                assert_eq!(td.enterdir(), dir, "{td:?} entering {dir:?}");
            }
        }
    }

    #[test]
    fn next_continues_and_is_reachable() {
        for td in Trackdir::ALL {
            assert!(td.reaches().contains(td.next()), "{td:?}");
            assert_eq!(td.next().next(), td);
            assert_eq!(td.next().is_axial(), td.is_axial());
        }
    }

    #[test]
    fn ninety_degree_turns() {
        // Upper piece heading east followed by the left piece heading north
        // turns a right angle; the lower piece keeps the 45° run going.
        let from = Trackdir::UpperE;
        let options = from.reaches();
        assert!(options.contains(Trackdir::LeftN));
        assert!(from.crosses().contains(Trackdir::LeftN));
        assert!(!from.crosses().contains(Trackdir::LowerE));
        // Axial pieces never make a 90° turn onto a reachable piece.
        assert!((Trackdir::XNe.reaches() & Trackdir::XNe.crosses()).is_empty());
    }

    #[test]
    fn track_between_edges() {
        assert_eq!(Track::between(DiagDir::NE, DiagDir::SW), Some(Track::X));
        assert_eq!(Track::between(DiagDir::SE, DiagDir::NW), Some(Track::Y));
        assert_eq!(Track::between(DiagDir::NW, DiagDir::NE), Some(Track::Upper));
        assert_eq!(Track::between(DiagDir::NE, DiagDir::NE), None);
    }

    #[test]
    fn bitset_conversions() {
        let all = TrackBits::ALL.trackdirs();
        assert_eq!(all, TrackdirBits::ALL);
        assert_eq!(all.len(), 12);
        assert_eq!(TrackBits::X.trackdirs().iter().collect::<Vec<_>>(), vec![Trackdir::XNe, Trackdir::XSw]);
        assert_eq!((!TrackdirBits::NONE), TrackdirBits::ALL);
        assert_eq!(TrackdirBits::single(Trackdir::LeftN).tracks(), TrackBits::LEFT);
    }

    #[test]
    fn prop_from_value_roundtrip() {
        fn prop(v: u8) -> bool {
            match Trackdir::from_value(v) {
                Some(td) => td.value() == v,
                None => v >= 14 || v == 6 || v == 7,
            }
        }
        quickcheck(prop as fn(_) -> _);
    }

    #[test]
    fn prop_reachable_trackdirs_enter_through_exit_edge() {
        fn prop(v: u8) -> bool {
            let td = Trackdir::ALL[(v % 12) as usize];
            td.reaches().iter().all(|n| n.enterdir() == td.exitdir())
        }
        quickcheck(prop as fn(_) -> _);
    }
}

#[cfg(test)]
mod settings {
    use crate::{PathfinderSettings, TILE_LENGTH};

    #[test]
    fn defaults_validate() {
        let s = PathfinderSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.max_search_nodes, 10_000);
        assert_eq!(s.rail_firstred_exit_penalty, 100 * TILE_LENGTH);
        assert_eq!(s.hash_size(), 4096);
    }

    #[test]
    fn rejects_odd_hash_bits() {
        let s = PathfinderSettings { hash_bits: 11, ..Default::default() };
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_zero_budget_and_capacity() {
        let s = PathfinderSettings { max_search_nodes: 0, ..Default::default() };
        assert!(s.validate().is_err());
        let s = PathfinderSettings { visited_capacity: 0, ..Default::default() };
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_huge_penalty() {
        let s = PathfinderSettings { buoy_penalty: 2_000_000, ..Default::default() };
        let err = s.validate().unwrap_err().to_string();
        assert!(err.contains("buoy_penalty"), "{err}");
    }

    #[test]
    fn without_penalties_keeps_budget() {
        let s = PathfinderSettings::without_penalties();
        assert_eq!(s.rail_curve_penalty, 0);
        assert_eq!(s.max_search_nodes, PathfinderSettings::default().max_search_nodes);
        assert!(s.validate().is_ok());
    }
}
