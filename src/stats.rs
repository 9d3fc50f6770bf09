//! Diagnostic counters for probe and resize activity.
//!
//! The counters are only tracked when the `stats` feature is enabled. Without
//! it, [`Counters`] is a zero-sized type whose methods compile away.

#[cfg(feature = "stats")]
use alloc::vec::Vec;

cfg_if::cfg_if! {
    if #[cfg(feature = "stats")] {
        use core::cell::Cell;

        #[derive(Debug, Default, Clone)]
        pub(crate) struct Counters {
            finds: Cell<u64>,
            steps: Cell<u64>,
            resizes: Cell<u64>,
        }

        impl Counters {
            #[inline(always)]
            pub(crate) fn record_find(&self) {
                self.finds.set(self.finds.get() + 1);
            }

            #[inline(always)]
            pub(crate) fn record_step(&self) {
                self.steps.set(self.steps.get() + 1);
            }

            #[inline(always)]
            pub(crate) fn record_resize(&self) {
                self.resizes.set(self.resizes.get() + 1);
            }

            pub(crate) fn snapshot(&self) -> Stats {
                Stats {
                    finds: self.finds.get(),
                    steps: self.steps.get(),
                    resizes: self.resizes.get(),
                }
            }

            pub(crate) fn reset(&self) {
                self.finds.set(0);
                self.steps.set(0);
                self.resizes.set(0);
            }
        }
    } else {
        #[derive(Debug, Default, Clone)]
        pub(crate) struct Counters;

        impl Counters {
            #[inline(always)]
            pub(crate) fn record_find(&self) {}

            #[inline(always)]
            pub(crate) fn record_step(&self) {}

            #[inline(always)]
            pub(crate) fn record_resize(&self) {}
        }
    }
}

/// A snapshot of the probe and resize counters of an
/// [`IntMap`](crate::IntMap).
///
/// Requires the `stats` feature.
#[cfg(feature = "stats")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of probe sequences started (one per lookup, insert, delete or
    /// migrated entry).
    pub finds: u64,
    /// Total number of slots visited across all probe sequences.
    pub steps: u64,
    /// Number of doubling resizes performed.
    pub resizes: u64,
}

#[cfg(feature = "stats")]
impl Stats {
    /// Average number of slots visited per probe sequence, or `0.0` if no
    /// probe has run yet.
    pub fn average_steps(&self) -> f64 {
        if self.finds == 0 {
            0.0
        } else {
            self.steps as f64 / self.finds as f64
        }
    }
}

/// Number of live entries at each displacement from their home slot.
///
/// `bins()[d]` counts the entries stored `d` slots (with wraparound) after the
/// slot their key hashes to. Requires the `stats` feature.
#[cfg(feature = "stats")]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeHistogram {
    bins: Vec<usize>,
}

#[cfg(feature = "stats")]
impl ProbeHistogram {
    pub(crate) fn record(&mut self, displacement: usize) {
        if self.bins.len() <= displacement {
            self.bins.resize(displacement + 1, 0);
        }
        self.bins[displacement] += 1;
    }

    /// Entry counts indexed by displacement.
    pub fn bins(&self) -> &[usize] {
        &self.bins
    }

    /// Total number of entries counted.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Largest displacement of any entry, or `None` for an empty table.
    pub fn max_displacement(&self) -> Option<usize> {
        self.bins.iter().rposition(|&count| count != 0)
    }

    /// Pretty-prints the histogram as a horizontal bar chart on stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.bins.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.total());

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let ch = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            bar.extend(ch);
            bar
        };

        for (displacement, &count) in self.bins.iter().enumerate() {
            println!("{:>3} | {} ({})", displacement, make_bar(count), count);
        }
    }
}
