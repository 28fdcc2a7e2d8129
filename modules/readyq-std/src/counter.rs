mod tokio_completion_counter_backend;

#[cfg(test)]
mod tests;

use readyq_core_rs::counter::CompletionCounter as CoreCompletionCounter;
pub use tokio_completion_counter_backend::TokioCompletionCounterBackend;

/// Completion counter using the Tokio runtime.
///
/// A synchronization primitive that fires a single "ready" notification once
/// every registered operation has signalled completion, or once an optional
/// maximum wait duration elapses first. Values handed to `complete` are
/// collected in arrival order and delivered to every subscriber.
pub type CompletionCounter<V> = CoreCompletionCounter<V, TokioCompletionCounterBackend<V>>;

/// Completion counter that collects no values.
pub type UnitCompletionCounter = CompletionCounter<()>;
