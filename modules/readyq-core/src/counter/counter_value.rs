use core::fmt::Debug;

/// Fundamental constraints for values collected by a completion counter.
///
/// Values are opaque to the counter; it records them in arrival order and
/// hands the frozen sequence to subscribers. `Send + Sync` is required so the
/// collected snapshot can be shared across the tasks that complete operations
/// and the subscribers that consume it.
pub trait CounterValue: Debug + Send + Sync + 'static {}

impl<T> CounterValue for T where T: Debug + Send + Sync + 'static {}
