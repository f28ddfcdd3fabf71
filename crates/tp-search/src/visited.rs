//! Hashed visited set: oriented node → best known cost.
//!
//! # Layout
//!
//! A power-of-two array of bucket heads indexes into a single entry arena.
//! Colliding entries are chained through `next` indices, newest first.  The
//! arena is reserved up front and never grows past `capacity`; when it is
//! full, unseen nodes are refused and reported as [`Visit::NotImproved`],
//! which prunes them from the search instead of failing it.
//!
//! # Hash
//!
//! The low `bits / 2` bits of the x and y coordinates are packed side by
//! side, so grid-adjacent tiles land in nearby buckets, and the trackdir
//! spreads the 14 directions of one tile across the table.

use tracing::warn;

use tp_core::OrientedNode;

const NIL: u32 = u32::MAX;

/// Result of offering a cost for a node.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Visit {
    /// First visit, or strictly cheaper than before.  The set now holds the
    /// offered cost.
    Improved,
    /// Not cheaper, or refused because the arena is full.  Nothing changed.
    NotImproved,
}

#[derive(Copy, Clone, Debug)]
struct Entry {
    key:  OrientedNode,
    g:    u32,
    next: u32,
}

/// Bounded map from [`OrientedNode`] to its best g.
pub struct VisitedSet {
    bits:      u8,
    buckets:   Vec<u32>,
    entries:   Vec<Entry>,
    capacity:  usize,
    refused:   u32,
}

impl VisitedSet {
    /// `2^bits` buckets and room for `capacity` entries.  `bits` is rounded
    /// down to an even number.
    pub fn new(bits: u8, capacity: usize) -> Self {
        let bits = bits & !1;
        Self {
            bits,
            buckets:  vec![NIL; 1 << bits],
            entries:  Vec::with_capacity(capacity),
            capacity,
            refused:  0,
        }
    }

    /// Bucket for `node`.
    #[inline]
    pub fn hash(&self, node: OrientedNode) -> usize {
        let half = u32::from(self.bits / 2);
        let mask = (1u32 << half) - 1;
        let size = 1u32 << self.bits;
        let part1 = node.tile.x() & mask;
        let part2 = node.tile.y() & mask;
        let spread = size / 16 * u32::from(node.trackdir.value());
        (((part1 << half) | part2).wrapping_add(spread) & (size - 1)) as usize
    }

    fn find(&self, node: OrientedNode) -> Option<usize> {
        let mut i = self.buckets[self.hash(node)];
        while i != NIL {
            let e = &self.entries[i as usize];
            if e.key == node {
                return Some(i as usize);
            }
            i = e.next;
        }
        None
    }

    /// Best cost recorded for `node`.
    #[inline]
    pub fn get(&self, node: OrientedNode) -> Option<u32> {
        self.find(node).map(|i| self.entries[i].g)
    }

    /// Record `g` for `node` if it is new or strictly cheaper.
    pub fn lookup_or_insert(&mut self, node: OrientedNode, g: u32) -> Visit {
        if let Some(i) = self.find(node) {
            let e = &mut self.entries[i];
            if g < e.g {
                e.g = g;
                return Visit::Improved;
            }
            return Visit::NotImproved;
        }
        if self.entries.len() >= self.capacity {
            if self.refused == 0 {
                warn!(capacity = self.capacity, %node, "visited set full; pruning unseen nodes");
            }
            self.refused += 1;
            return Visit::NotImproved;
        }
        let bucket = self.hash(node);
        self.entries.push(Entry { key: node, g, next: self.buckets[bucket] });
        self.buckets[bucket] = (self.entries.len() - 1) as u32;
        Visit::Improved
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Unseen nodes turned away because the arena was full.
    #[inline]
    pub fn refused(&self) -> u32 {
        self.refused
    }

    /// Forget every entry, keeping the allocations for the next query.
    pub fn clear(&mut self) {
        self.buckets.fill(NIL);
        self.entries.clear();
        self.refused = 0;
    }

    /// Length of the chain holding `node`'s bucket.
    pub fn chain_len(&self, node: OrientedNode) -> usize {
        let mut n = 0;
        let mut i = self.buckets[self.hash(node)];
        while i != NIL {
            n += 1;
            i = self.entries[i as usize].next;
        }
        n
    }
}

impl std::fmt::Debug for VisitedSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitedSet")
            .field("buckets", &self.buckets.len())
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("refused", &self.refused)
            .finish()
    }
}
