/// Errors returned by [`IntMap`](crate::IntMap) lookups and removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The key has no live entry in the table.
    NotFound(u32),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound(key) => write!(f, "key {key} not found"),
        }
    }
}

impl core::error::Error for Error {}

/// Result alias for [`IntMap`](crate::IntMap) operations.
pub type Result<T> = core::result::Result<T, Error>;
