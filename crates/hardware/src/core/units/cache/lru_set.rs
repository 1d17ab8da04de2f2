//! Least Recently Used (LRU) Cache Set.
//!
//! One set of a set-associative structure. Lines live in a slot arena and a
//! separate usage stack records recency: index 0 is the Most Recently Used
//! slot, the last index is the Least Recently Used one. A hit moves its slot
//! to the top of the stack; an insert into a full set reuses the slot at the
//! bottom.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `lookup()`: O(W) where W is the number of ways (associativity)
//!   - `insert()`: O(W)
//! - **Space Complexity:** O(W), allocated on first fill and reused on eviction
//! - **Best Case:** Working sets that fit within W lines per set
//! - **Worst Case:** Cyclic patterns over W + 1 lines (every access misses)

/// Classification of a miss.
///
/// A miss is compulsory when the set held no lines at lookup time. This is a
/// cheap stand-in for first-touch tracking: once a set drains completely, a
/// previously seen block misses as compulsory again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MissKind {
    /// Set was empty at lookup time.
    Compulsory,
    /// Set held lines, none with a matching tag.
    Other,
}

/// Outcome of probing a set (or a whole cache) for a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// Tag was resident; its line is now MRU.
    Hit,
    /// Tag was absent.
    Miss(MissKind),
}

impl Lookup {
    /// Whether the probe hit.
    #[inline(always)]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// LRU-ordered set of resident tags.
#[derive(Clone, Debug, Default)]
pub struct LruSet {
    /// Tag held by each occupied slot.
    slots: Vec<u32>,
    /// Slot indices, MRU first.
    usage: Vec<usize>,
    /// Maximum resident lines.
    ways: usize,
}

impl LruSet {
    /// Creates an empty set with room for `ways` lines.
    pub const fn new(ways: usize) -> Self {
        Self {
            slots: Vec::new(),
            usage: Vec::new(),
            ways,
        }
    }

    /// Associativity of the set.
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of resident lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.usage.len()
    }

    /// Whether the set holds no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.usage.is_empty()
    }

    /// Whether the set is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.usage.len() >= self.ways
    }

    fn position(&self, tag: u32) -> Option<usize> {
        self.usage.iter().position(|&slot| self.slots[slot] == tag)
    }

    /// Checks residency without touching recency state.
    pub fn contains(&self, tag: u32) -> bool {
        self.position(tag).is_some()
    }

    /// Probes for `tag`, promoting it to MRU on a hit.
    pub fn lookup(&mut self, tag: u32) -> Lookup {
        match self.position(tag) {
            Some(pos) => {
                let slot = self.usage.remove(pos);
                self.usage.insert(0, slot);
                Lookup::Hit
            }
            None if self.is_empty() => Lookup::Miss(MissKind::Compulsory),
            None => Lookup::Miss(MissKind::Other),
        }
    }

    /// Installs `tag` as MRU, evicting the LRU line if the set is full.
    ///
    /// The caller must have established that `tag` is absent. Returns the tag
    /// of the evicted line, if any. A zero-way set stores nothing.
    pub fn insert(&mut self, tag: u32) -> Option<u32> {
        if !self.is_full() {
            self.slots.push(tag);
            self.usage.insert(0, self.slots.len() - 1);
            return None;
        }

        let slot = self.usage.pop()?;
        let victim = std::mem::replace(&mut self.slots[slot], tag);
        self.usage.insert(0, slot);
        Some(victim)
    }

    /// Probes for `tag` and, when `update` is set, installs it on a miss.
    pub fn access(&mut self, tag: u32, update: bool) -> Lookup {
        let result = self.lookup(tag);
        if update && !result.is_hit() {
            let _ = self.insert(tag);
        }
        result
    }

    /// Resident tags, MRU first.
    pub fn tags_mru_order(&self) -> impl Iterator<Item = u32> + '_ {
        self.usage.iter().map(|&slot| self.slots[slot])
    }

    /// Drops every line and releases the slot storage.
    pub fn clear(&mut self) {
        self.slots = Vec::new();
        self.usage = Vec::new();
    }
}
