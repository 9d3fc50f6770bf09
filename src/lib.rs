#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Construction parameters and defaults for [`IntMap`].
pub mod config;

mod error;

pub mod int_map;

/// Probe and resize statistics, available with the `stats` feature.
pub mod stats;

pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use int_map::IntMap;
pub use int_map::fmix32;
#[cfg(feature = "stats")]
pub use stats::ProbeHistogram;
#[cfg(feature = "stats")]
pub use stats::Stats;
