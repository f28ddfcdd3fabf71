//! Per-node payload carried along search paths.

use std::fmt;

use tp_core::Trackdir;

/// Bit flags describing the path that led to a node.
///
/// Flags are inherited from parent to child and only ever raised or
/// overwritten by the rail cost model, so they describe the whole prefix of
/// the path, not just the last step.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeFlags(pub u8);

impl NodeFlags {
    pub const NONE: NodeFlags = NodeFlags(0);
    /// At least one signal has been passed.
    pub const SEEN_SIGNAL: NodeFlags = NodeFlags(1 << 0);
    pub const SECOND_SIGNAL: NodeFlags = NodeFlags(1 << 1);
    pub const THIRD_SIGNAL: NodeFlags = NodeFlags(1 << 2);
    /// Path originates from the reversed (second) start.
    pub const REVERSE: NodeFlags = NodeFlags(1 << 3);
    /// The last signal passed was red (path signals count as green).
    pub const LAST_SIGNAL_RED: NodeFlags = NodeFlags(1 << 4);
    /// The last signal passed was a block signal, not a path signal.
    pub const LAST_SIGNAL_BLOCK: NodeFlags = NodeFlags(1 << 5);
    /// Do not validate leaving the start tile.
    pub const IGNORE_START_TILE: NodeFlags = NodeFlags(1 << 6);

    #[inline]
    pub fn contains(self, flag: NodeFlags) -> bool {
        self.0 & flag.0 == flag.0
    }

    #[inline]
    pub fn set(&mut self, flag: NodeFlags, on: bool) {
        if on {
            self.0 |= flag.0;
        } else {
            self.0 &= !flag.0;
        }
    }

    #[inline]
    pub fn with(mut self, flag: NodeFlags) -> Self {
        self.set(flag, true);
        self
    }
}

impl fmt::Debug for NodeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 7] =
            ["seen_signal", "second_signal", "third_signal", "reverse", "last_red", "last_block", "ignore_start"];
        f.debug_set()
            .entries(NAMES.iter().enumerate().filter(|(i, _)| self.0 & (1 << i) != 0).map(|(_, n)| n))
            .finish()
    }
}

/// What the search stores with every node.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct NodeData {
    /// Trackdir chosen on the first step away from the start.
    pub first_trackdir: Option<Trackdir>,
    pub flags:          NodeFlags,
}
