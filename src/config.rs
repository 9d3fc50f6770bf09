/// Default number of slots requested by [`IntMap::new`](crate::IntMap::new),
/// before rounding up to a power of two.
pub const DEFAULT_CAPACITY: usize = 10;

/// Default load factor threshold above which the table doubles.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Smallest accepted load factor. Lower thresholds would make a single
/// insert double the table until allocation fails.
pub const MIN_LOAD_FACTOR: f64 = 0.01;

/// Construction parameters for an [`IntMap`](crate::IntMap).
///
/// # Examples
///
/// ```rust
/// use intmap::Config;
/// use intmap::IntMap;
///
/// let map: IntMap<&str> = IntMap::with_config(Config::default().capacity(100).load_factor(0.5));
/// assert_eq!(map.size(), 128);
/// assert_eq!(map.load_factor(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub(crate) capacity: usize,
    pub(crate) load_factor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl Config {
    /// Sets the initial slot count. It is rounded up to the next power of
    /// two when the table is built.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the load factor threshold.
    ///
    /// Must lie within `[MIN_LOAD_FACTOR, 1)`; this is checked when the
    /// table is built.
    #[must_use]
    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Slot count the table starts with.
    pub(crate) fn initial_slots(&self) -> usize {
        self.capacity.max(1).next_power_of_two()
    }
}
