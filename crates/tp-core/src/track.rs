//! Track geometry: edge directions, track pieces and directed track pieces.
//!
//! # Geometry
//!
//! A tile has four edges named after the compass direction they face on the
//! isometric map: `NE` (towards −x), `SE` (+y), `SW` (+x) and `NW` (−y).
//! A [`Track`] is a piece connecting two edges:
//!
//! | Track   | Edges     | Length          |
//! |---------|-----------|-----------------|
//! | `X`     | NE – SW   | full tile       |
//! | `Y`     | NW – SE   | full tile       |
//! | `Upper` | NE – NW   | corner (≈0.71)  |
//! | `Lower` | SW – SE   | corner          |
//! | `Left`  | NW – SW   | corner          |
//! | `Right` | NE – SE   | corner          |
//!
//! A [`Trackdir`] is a track plus a travel sense, named after the edge it
//! leaves through (or the compass point it heads for, for corner pieces).
//! Discriminants leave a gap at 6–7 so that `td ^ 8` is the reverse and
//! `td & 7` is the track.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

// ── DiagDir ───────────────────────────────────────────────────────────────────

/// One of the four tile edges / axis-aligned movement directions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DiagDir {
    NE = 0,
    SE = 1,
    SW = 2,
    NW = 3,
}

impl DiagDir {
    pub const ALL: [DiagDir; 4] = [DiagDir::NE, DiagDir::SE, DiagDir::SW, DiagDir::NW];

    #[inline]
    pub fn from_index(i: u8) -> DiagDir {
        Self::ALL[(i & 3) as usize]
    }

    #[inline]
    pub fn reverse(self) -> DiagDir {
        Self::from_index(self as u8 + 2)
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            DiagDir::NE | DiagDir::SW => Axis::X,
            DiagDir::SE | DiagDir::NW => Axis::Y,
        }
    }

    /// `(dx, dy)` of one step in this direction.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            DiagDir::NE => (-1, 0),
            DiagDir::SE => (0, 1),
            DiagDir::SW => (1, 0),
            DiagDir::NW => (0, -1),
        }
    }

    /// The full-length trackdir travelling in this direction.
    #[inline]
    pub fn axial_trackdir(self) -> Trackdir {
        match self {
            DiagDir::NE => Trackdir::XNe,
            DiagDir::SE => Trackdir::YSe,
            DiagDir::SW => Trackdir::XSw,
            DiagDir::NW => Trackdir::YNw,
        }
    }
}

impl fmt::Display for DiagDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Map axis.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn track(self) -> Track {
        match self {
            Axis::X => Track::X,
            Axis::Y => Track::Y,
        }
    }
}

// ── Track ─────────────────────────────────────────────────────────────────────

/// An undirected track piece on a tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Track {
    X = 0,
    Y = 1,
    Upper = 2,
    Lower = 3,
    Left = 4,
    Right = 5,
}

impl Track {
    pub const ALL: [Track; 6] = [Track::X, Track::Y, Track::Upper, Track::Lower, Track::Left, Track::Right];

    /// The two edges this piece connects.
    pub fn edges(self) -> (DiagDir, DiagDir) {
        match self {
            Track::X => (DiagDir::NE, DiagDir::SW),
            Track::Y => (DiagDir::NW, DiagDir::SE),
            Track::Upper => (DiagDir::NE, DiagDir::NW),
            Track::Lower => (DiagDir::SW, DiagDir::SE),
            Track::Left => (DiagDir::NW, DiagDir::SW),
            Track::Right => (DiagDir::NE, DiagDir::SE),
        }
    }

    /// The piece connecting two distinct edges.
    pub fn between(a: DiagDir, b: DiagDir) -> Option<Track> {
        Track::ALL.into_iter().find(|t| {
            let (e1, e2) = t.edges();
            (e1 == a && e2 == b) || (e1 == b && e2 == a)
        })
    }

    /// `true` for the full-length pieces `X` and `Y`.
    #[inline]
    pub fn is_axial(self) -> bool {
        matches!(self, Track::X | Track::Y)
    }

    /// Pieces that cross this one at a right angle.
    pub fn crossing(self) -> TrackBits {
        match self {
            Track::X => TrackBits::Y,
            Track::Y => TrackBits::X,
            Track::Upper | Track::Lower => TrackBits::LEFT | TrackBits::RIGHT,
            Track::Left | Track::Right => TrackBits::UPPER | TrackBits::LOWER,
        }
    }

    /// The trackdir of this piece that leaves through `exit`, if it touches it.
    pub fn trackdir_exiting(self, exit: DiagDir) -> Option<Trackdir> {
        let [a, b] = self.trackdirs();
        [a, b].into_iter().find(|td| td.exitdir() == exit)
    }

    /// Both travel senses of this piece.
    #[inline]
    pub fn trackdirs(self) -> [Trackdir; 2] {
        let fwd = Trackdir::from_value(self as u8).unwrap_or(Trackdir::XNe);
        [fwd, fwd.reverse()]
    }
}

/// Set of [`Track`]s present on a tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackBits(pub u8);

impl TrackBits {
    pub const NONE: TrackBits = TrackBits(0);
    pub const X: TrackBits = TrackBits(1 << 0);
    pub const Y: TrackBits = TrackBits(1 << 1);
    pub const UPPER: TrackBits = TrackBits(1 << 2);
    pub const LOWER: TrackBits = TrackBits(1 << 3);
    pub const LEFT: TrackBits = TrackBits(1 << 4);
    pub const RIGHT: TrackBits = TrackBits(1 << 5);
    pub const ALL: TrackBits = TrackBits(0x3F);

    #[inline]
    pub fn single(track: Track) -> TrackBits {
        TrackBits(1 << track as u8)
    }

    #[inline]
    pub fn contains(self, track: Track) -> bool {
        self.0 & (1 << track as u8) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Track> {
        Track::ALL.into_iter().filter(move |t| self.contains(*t))
    }

    /// Both directions of every present piece.
    pub fn trackdirs(self) -> TrackdirBits {
        TrackdirBits(self.0 as u16 | (self.0 as u16) << 8)
    }
}

impl BitOr for TrackBits {
    type Output = TrackBits;
    fn bitor(self, rhs: TrackBits) -> TrackBits {
        TrackBits(self.0 | rhs.0)
    }
}

impl BitOrAssign for TrackBits {
    fn bitor_assign(&mut self, rhs: TrackBits) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for TrackBits {
    type Output = TrackBits;
    fn bitand(self, rhs: TrackBits) -> TrackBits {
        TrackBits(self.0 & rhs.0)
    }
}

impl fmt::Debug for TrackBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// ── Trackdir ──────────────────────────────────────────────────────────────────

/// A track piece together with a travel sense.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Trackdir {
    XNe = 0,
    YSe = 1,
    UpperE = 2,
    LowerE = 3,
    LeftS = 4,
    RightS = 5,
    XSw = 8,
    YNw = 9,
    UpperW = 10,
    LowerW = 11,
    LeftN = 12,
    RightN = 13,
}

impl Trackdir {
    /// Number of discriminant slots (including the unused 6, 7).
    pub const SLOTS: usize = 14;

    pub const ALL: [Trackdir; 12] = [
        Trackdir::XNe,
        Trackdir::YSe,
        Trackdir::UpperE,
        Trackdir::LowerE,
        Trackdir::LeftS,
        Trackdir::RightS,
        Trackdir::XSw,
        Trackdir::YNw,
        Trackdir::UpperW,
        Trackdir::LowerW,
        Trackdir::LeftN,
        Trackdir::RightN,
    ];

    pub fn from_value(v: u8) -> Option<Trackdir> {
        Self::ALL.into_iter().find(|td| *td as u8 == v)
    }

    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn track(self) -> Track {
        Track::ALL[(self as u8 & 7) as usize]
    }

    /// The same piece travelled the other way.
    #[inline]
    pub fn reverse(self) -> Trackdir {
        match self {
            Trackdir::XNe => Trackdir::XSw,
            Trackdir::YSe => Trackdir::YNw,
            Trackdir::UpperE => Trackdir::UpperW,
            Trackdir::LowerE => Trackdir::LowerW,
            Trackdir::LeftS => Trackdir::LeftN,
            Trackdir::RightS => Trackdir::RightN,
            Trackdir::XSw => Trackdir::XNe,
            Trackdir::YNw => Trackdir::YSe,
            Trackdir::UpperW => Trackdir::UpperE,
            Trackdir::LowerW => Trackdir::LowerE,
            Trackdir::LeftN => Trackdir::LeftS,
            Trackdir::RightN => Trackdir::RightS,
        }
    }

    #[inline]
    pub fn is_opposite(self, other: Trackdir) -> bool {
        self.reverse() == other
    }

    /// Edge through which a vehicle on this trackdir leaves the tile.
    pub fn exitdir(self) -> DiagDir {
        match self {
            Trackdir::XNe | Trackdir::UpperE | Trackdir::RightN => DiagDir::NE,
            Trackdir::YSe | Trackdir::LowerE | Trackdir::RightS => DiagDir::SE,
            Trackdir::XSw | Trackdir::LeftS | Trackdir::LowerW => DiagDir::SW,
            Trackdir::YNw | Trackdir::UpperW | Trackdir::LeftN => DiagDir::NW,
        }
    }

    /// Direction of movement when entering the tile on this trackdir.
    #[inline]
    pub fn enterdir(self) -> DiagDir {
        self.reverse().exitdir().reverse()
    }

    /// `true` for the full-length `X`/`Y` trackdirs.
    #[inline]
    pub fn is_axial(self) -> bool {
        self.track().is_axial()
    }

    /// The trackdir that continues this one in a straight line on the next
    /// tile: itself for axial pieces, the mirrored corner for the zig-zag of
    /// a 45° run.
    pub fn next(self) -> Trackdir {
        match self {
            Trackdir::UpperE => Trackdir::LowerE,
            Trackdir::LowerE => Trackdir::UpperE,
            Trackdir::LeftS => Trackdir::RightS,
            Trackdir::RightS => Trackdir::LeftS,
            Trackdir::UpperW => Trackdir::LowerW,
            Trackdir::LowerW => Trackdir::UpperW,
            Trackdir::LeftN => Trackdir::RightN,
            Trackdir::RightN => Trackdir::LeftN,
            axial => axial,
        }
    }

    /// Trackdirs on the next tile that a vehicle leaving on `self` can take.
    #[inline]
    pub fn reaches(self) -> TrackdirBits {
        TrackdirBits::entering(self.exitdir())
    }

    /// Trackdirs that would be a 90° turn after `self`.
    #[inline]
    pub fn crosses(self) -> TrackdirBits {
        self.track().crossing().trackdirs()
    }
}

impl fmt::Display for Trackdir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Set of [`Trackdir`]s, one bit per discriminant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackdirBits(pub u16);

impl TrackdirBits {
    pub const NONE: TrackdirBits = TrackdirBits(0);
    pub const ALL: TrackdirBits = TrackdirBits(0x3F3F);

    #[inline]
    pub fn single(td: Trackdir) -> TrackdirBits {
        TrackdirBits(1 << td as u8)
    }

    /// Trackdirs available to a vehicle moving in `dir` as it enters a tile
    /// (i.e. those entering through the `dir.reverse()` edge).
    pub fn entering(dir: DiagDir) -> TrackdirBits {
        use Trackdir::*;
        let tds: [Trackdir; 3] = match dir {
            DiagDir::NE => [XNe, LowerE, LeftN],
            DiagDir::SE => [YSe, UpperE, LeftS],
            DiagDir::SW => [XSw, UpperW, RightS],
            DiagDir::NW => [YNw, LowerW, RightN],
        };
        tds.into_iter().collect()
    }

    #[inline]
    pub fn contains(self, td: Trackdir) -> bool {
        self.0 & (1 << td as u8) != 0
    }

    #[inline]
    pub fn insert(&mut self, td: Trackdir) {
        self.0 |= 1 << td as u8;
    }

    #[inline]
    pub fn remove(&mut self, td: Trackdir) {
        self.0 &= !(1 << td as u8);
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in ascending discriminant order.
    pub fn iter(self) -> impl Iterator<Item = Trackdir> {
        Trackdir::ALL.into_iter().filter(move |td| self.contains(*td))
    }

    /// The undirected pieces touched by any member.
    pub fn tracks(self) -> TrackBits {
        TrackBits(((self.0 | self.0 >> 8) & 0x3F) as u8)
    }
}

impl FromIterator<Trackdir> for TrackdirBits {
    fn from_iter<I: IntoIterator<Item = Trackdir>>(iter: I) -> Self {
        let mut bits = TrackdirBits::NONE;
        for td in iter {
            bits.insert(td);
        }
        bits
    }
}

impl BitOr for TrackdirBits {
    type Output = TrackdirBits;
    fn bitor(self, rhs: TrackdirBits) -> TrackdirBits {
        TrackdirBits(self.0 | rhs.0)
    }
}

impl BitOrAssign for TrackdirBits {
    fn bitor_assign(&mut self, rhs: TrackdirBits) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for TrackdirBits {
    type Output = TrackdirBits;
    fn bitand(self, rhs: TrackdirBits) -> TrackdirBits {
        TrackdirBits(self.0 & rhs.0)
    }
}

impl BitAndAssign for TrackdirBits {
    fn bitand_assign(&mut self, rhs: TrackdirBits) {
        self.0 &= rhs.0;
    }
}

impl Not for TrackdirBits {
    type Output = TrackdirBits;
    fn not(self) -> TrackdirBits {
        TrackdirBits(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for TrackdirBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
