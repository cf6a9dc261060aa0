use core::fmt;

/// Error returned by [`crate::VirtualStore::try_new`].
///
/// The reducer itself never fails: every action handler follows the silent-clamp/no-op policy
/// documented on the individual `on_*` methods in `store.rs`. Construction is the one place an
/// anomaly can be raised instead of silently trusted, for callers that restore a store from a
/// persisted [`crate::CacheSnapshot`] and want to know if it disagrees with the configuration
/// they're restoring into, rather than relying on a log line from the `tracing` feature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoreError {
    /// The snapshot's `length` did not match `elements_count` in the options used to restore it.
    SnapshotLengthMismatch { expected: usize, found: usize },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnapshotLengthMismatch { expected, found } => write!(
                f,
                "cache snapshot length {found} does not match configured elements_count {expected}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StoreError {}
