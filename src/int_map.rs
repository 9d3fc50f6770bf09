use alloc::vec::Vec;
use core::fmt::Debug;

use crate::config::Config;
use crate::config::MIN_LOAD_FACTOR;
use crate::error::Error;
use crate::error::Result;
use crate::stats::Counters;
#[cfg(feature = "stats")]
use crate::stats::ProbeHistogram;
#[cfg(feature = "stats")]
use crate::stats::Stats;

/// The MurmurHash3 32-bit finalizer.
///
/// Used to spread keys across the table before masking, so that sequential
/// and clustered keys do not land in adjacent slots. `fmix32(0) == 0`.
///
/// # Examples
///
/// ```rust
/// assert_eq!(intmap::fmix32(0), 0);
/// assert_eq!(intmap::fmix32(1), 0x514e_28b7);
/// ```
#[inline(always)]
pub const fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

#[inline(always)]
fn target_max_len(slots: usize, load_factor: f64) -> usize {
    (slots as f64 * load_factor) as usize
}

#[cold]
#[inline(never)]
fn table_full() -> ! {
    panic!("IntMap invariant violated: no empty slot")
}

#[derive(Clone)]
struct Slot<V> {
    key: u32,
    value: Option<V>,
}

impl<V> Slot<V> {
    #[inline(always)]
    const fn empty() -> Self {
        Slot {
            key: 0,
            value: None,
        }
    }

    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

fn empty_slots<V>(count: usize) -> Vec<Slot<V>> {
    core::iter::repeat_with(Slot::empty).take(count).collect()
}

/// Outcome of a probe sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key lives at this index.
    Found(usize),
    /// The key is absent; this is the first empty slot on its probe path.
    Vacant(usize),
    /// Every slot was visited without a match or an empty slot.
    Full,
}

/// An open-addressing hash table keyed by `u32`.
///
/// Keys are placed at `fmix32(key) & (size - 1)` and collisions are resolved
/// by scanning forward, wrapping at the end of the slot array. The slot count
/// is always a power of two and doubles whenever an insert would push the
/// number of entries above `size * load_factor`.
///
/// Empty slots are tracked explicitly, so any `V` can be stored, including
/// values such as `0` or `None`.
///
/// The table is single-threaded: with the `stats` feature enabled it is not
/// `Sync`, since lookups update counters through `&self`.
///
/// ## Example
///
/// ```rust
/// use intmap::Error;
/// use intmap::IntMap;
///
/// let mut routes = IntMap::new();
/// routes.insert(0x0a00_0001, "eth0");
/// routes.insert(0x0a00_0002, "eth1");
///
/// assert_eq!(routes.search(0x0a00_0001), Ok(&"eth0"));
/// assert_eq!(routes.delete(0x0a00_0002), Ok("eth1"));
/// assert_eq!(routes.search(0x0a00_0002), Err(Error::NotFound(0x0a00_0002)));
/// ```
#[derive(Clone)]
pub struct IntMap<V> {
    slots: Vec<Slot<V>>,
    len: usize,
    max_len: usize,
    load_factor: f64,
    counters: Counters,
}

struct Entries<'a, V>(&'a [Slot<V>]);

impl<V: Debug> Debug for Entries<'_, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(
                self.0
                    .iter()
                    .filter_map(|slot| slot.value.as_ref().map(|value| (slot.key, value))),
            )
            .finish()
    }
}

impl<V: Debug> Debug for IntMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntMap")
            .field("len", &self.len)
            .field("size", &self.size())
            .field("load_factor", &self.load_factor)
            .field("entries", &Entries(&self.slots))
            .finish()
    }
}

impl<V> Default for IntMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntMap<V> {
    /// Creates an empty table with 16 slots and a load factor of 0.75.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intmap::IntMap;
    /// let map: IntMap<u64> = IntMap::new();
    /// assert_eq!(map.size(), 16);
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty table with at least `capacity` slots.
    ///
    /// The slot count is rounded up to the next power of two.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intmap::IntMap;
    /// let map: IntMap<u64> = IntMap::with_capacity(100);
    /// assert_eq!(map.size(), 128);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config::default().capacity(capacity))
    }

    /// Creates an empty table with at least `capacity` slots that doubles
    /// once it would hold more than `size * load_factor` entries.
    ///
    /// # Panics
    ///
    /// Panics if `load_factor` is below [`MIN_LOAD_FACTOR`] or not below 1.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f64) -> Self {
        Self::with_config(Config::default().capacity(capacity).load_factor(load_factor))
    }

    /// Creates an empty table from a [`Config`].
    ///
    /// # Panics
    ///
    /// Panics if the configured load factor is below [`MIN_LOAD_FACTOR`] or
    /// not below 1.
    pub fn with_config(config: Config) -> Self {
        assert!(
            config.load_factor >= MIN_LOAD_FACTOR && config.load_factor < 1.0,
            "load factor must be within [{MIN_LOAD_FACTOR}, 1), got {}",
            config.load_factor
        );

        let slots = config.initial_slots();
        Self {
            slots: empty_slots(slots),
            len: 0,
            max_len: target_max_len(slots, config.load_factor),
            load_factor: config.load_factor,
            counters: Counters::default(),
        }
    }

    /// Returns the number of slots, which is always a power of two.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of live entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intmap::IntMap;
    /// let mut map = IntMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(7, "seven");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the load factor threshold the table grows at.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key has no entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intmap::Error;
    /// # use intmap::IntMap;
    /// let mut map = IntMap::new();
    /// map.insert(1, 100);
    /// assert_eq!(map.search(1), Ok(&100));
    /// assert_eq!(map.search(2), Err(Error::NotFound(2)));
    /// ```
    pub fn search(&self, key: u32) -> Result<&V> {
        match self.find(key) {
            Probe::Found(index) => self.slots[index].value.as_ref().ok_or(Error::NotFound(key)),
            Probe::Vacant(_) | Probe::Full => Err(Error::NotFound(key)),
        }
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key has no entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intmap::IntMap;
    /// let mut map = IntMap::new();
    /// map.insert(1, 100);
    /// if let Ok(value) = map.search_mut(1) {
    ///     *value += 1;
    /// }
    /// assert_eq!(map.search(1), Ok(&101));
    /// ```
    pub fn search_mut(&mut self, key: u32) -> Result<&mut V> {
        match self.find(key) {
            Probe::Found(index) => self.slots[index].value.as_mut().ok_or(Error::NotFound(key)),
            Probe::Vacant(_) | Probe::Full => Err(Error::NotFound(key)),
        }
    }

    /// Returns `true` if `key` has an entry.
    pub fn contains_key(&self, key: u32) -> bool {
        matches!(self.find(key), Probe::Found(_))
    }

    /// Inserts `value` for `key`, returning the value it replaced.
    ///
    /// Replacing an existing entry never resizes the table. Adding a new entry
    /// first doubles the table as many times as needed to keep
    /// `len() <= size() * load_factor()`.
    ///
    /// # Panics
    ///
    /// Panics if the table has no empty slot left, which can only happen if
    /// its internal invariants were broken. The table must not be used after
    /// such a panic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intmap::IntMap;
    /// let mut map = IntMap::new();
    /// assert_eq!(map.insert(1, 100), None);
    /// assert_eq!(map.insert(1, 200), Some(100));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: u32, value: V) -> Option<V> {
        match self.find(key) {
            Probe::Found(index) => return self.slots[index].value.replace(value),
            Probe::Vacant(index) if self.len < self.max_len => {
                self.slots[index] = Slot {
                    key,
                    value: Some(value),
                };
                self.len += 1;
            }
            Probe::Vacant(_) => {
                while self.len >= self.max_len {
                    self.resize();
                }
                self.place(key, value);
            }
            Probe::Full => table_full(),
        }

        None
    }

    /// Removes the entry for `key` and returns its value.
    ///
    /// Entries that probed past the freed slot are shifted back towards their
    /// home slot (backward-shift deletion), so every remaining key stays
    /// reachable, no key ever occupies two slots, and the freed space is
    /// reused by later inserts. This means a delete can move other entries
    /// to a different slot; only the set of keys and their values is stable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key has no entry; the table is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intmap::Error;
    /// # use intmap::IntMap;
    /// let mut map = IntMap::new();
    /// map.insert(1, 200);
    /// assert_eq!(map.delete(1), Ok(200));
    /// assert_eq!(map.delete(1), Err(Error::NotFound(1)));
    /// ```
    pub fn delete(&mut self, key: u32) -> Result<V> {
        let Probe::Found(index) = self.find(key) else {
            return Err(Error::NotFound(key));
        };

        let value = self.slots[index].value.take().ok_or(Error::NotFound(key))?;
        self.len -= 1;
        self.close_gap(index);

        Ok(value)
    }

    /// Removes every entry while keeping the current slot count.
    pub fn clear(&mut self) {
        log::debug!("clearing IntMap with {} entries", self.len);

        for slot in self.slots.iter_mut() {
            slot.value = None;
        }
        self.len = 0;
    }

    #[inline(always)]
    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline(always)]
    fn index(&self, key: u32) -> usize {
        fmix32(key) as usize & self.mask()
    }

    fn find(&self, key: u32) -> Probe {
        self.counters.record_find();

        let mask = self.mask();
        let start = self.index(key);
        for offset in 0..self.slots.len() {
            let index = (start + offset) & mask;
            self.counters.record_step();

            let slot = &self.slots[index];
            if slot.is_empty() {
                return Probe::Vacant(index);
            }
            if slot.key == key {
                return Probe::Found(index);
            }
        }

        Probe::Full
    }

    /// Writes an entry without checking the load factor. The caller must
    /// have made room first.
    fn place(&mut self, key: u32, value: V) {
        match self.find(key) {
            Probe::Vacant(index) => {
                self.slots[index] = Slot {
                    key,
                    value: Some(value),
                };
                self.len += 1;
            }
            Probe::Found(index) => self.slots[index].value = Some(value),
            Probe::Full => table_full(),
        }
    }

    #[cold]
    fn resize(&mut self) {
        let old_size = self.slots.len();
        let new_size = old_size.checked_mul(2).expect("IntMap capacity overflow");

        let old_slots = core::mem::replace(&mut self.slots, empty_slots(new_size));
        self.len = 0;
        self.max_len = target_max_len(new_size, self.load_factor);

        for slot in old_slots {
            if let Some(value) = slot.value {
                self.place(slot.key, value);
            }
        }

        self.counters.record_resize();
        log::trace!(
            "resized IntMap from {old_size} to {new_size} slots with {} entries",
            self.len
        );
    }

    /// Backward-shift deletion: pulls later members of the probe cluster into
    /// the hole at `hole` until an empty slot ends the cluster.
    fn close_gap(&mut self, mut hole: usize) {
        let mask = self.mask();
        let mut next = (hole + 1) & mask;

        while !self.slots[next].is_empty() {
            let home = self.index(self.slots[next].key);
            // The entry may move iff the hole lies on its probe path, i.e.
            // cyclically within [home, next).
            if (next.wrapping_sub(home) & mask) >= (next.wrapping_sub(hole) & mask) {
                self.slots.swap(hole, next);
                hole = next;
            }
            next = (next + 1) & mask;
        }
    }
}

#[cfg(feature = "stats")]
impl<V> IntMap<V> {
    /// Returns a snapshot of the probe and resize counters.
    ///
    /// Requires the `stats` feature.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intmap::IntMap;
    /// let map: IntMap<u32> = IntMap::new();
    /// let _ = map.search(5);
    /// let stats = map.stats();
    /// assert_eq!(stats.finds, 1);
    /// assert_eq!(stats.steps, 1);
    /// ```
    pub fn stats(&self) -> Stats {
        self.counters.snapshot()
    }

    /// Zeroes the probe and resize counters.
    pub fn reset_stats(&self) {
        self.counters.reset();
    }

    /// Computes how far each live entry sits from its home slot.
    ///
    /// Requires the `stats` feature.
    pub fn probe_histogram(&self) -> ProbeHistogram {
        let mask = self.mask();
        let mut hist = ProbeHistogram::default();

        for (index, slot) in self.slots.iter().enumerate() {
            if !slot.is_empty() {
                hist.record(index.wrapping_sub(self.index(slot.key)) & mask);
            }
        }

        hist
    }
}
