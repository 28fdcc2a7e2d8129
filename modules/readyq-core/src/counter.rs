//! Completion counter primitives.

/// Backend abstraction for completion counter implementations.
pub mod completion_counter_backend;
/// Generic completion counter facade.
pub mod completion_counter_struct;
/// One-shot completion handle for registered work units.
pub mod completion_handle;
/// Constraints for values collected by a counter.
pub mod counter_value;
/// Subscriber types for the terminal "ready" notification.
pub mod ready_listener;
/// Caller-supplied work unit wrapper.
pub mod work_unit;


pub use completion_counter_backend::CompletionCounterBackend;
pub use completion_counter_struct::CompletionCounter;
pub use completion_handle::CompletionHandle;
pub use counter_value::CounterValue;
pub use ready_listener::{ReadyListener, ReadyResults};
pub use work_unit::WorkUnit;
