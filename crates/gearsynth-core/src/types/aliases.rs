//! Type aliases for callbacks shared across crates.
//!
//! Long-running stages report progress through plain callbacks and poll a
//! [`CancelToken`] between units of work. Neither mechanism affects the
//! result of the computation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A progress callback receiving (completed, total).
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// A callback receiving a borrowed progress event of type `T`.
///
/// Borrowed so that a stage can hand out a snapshot of its working buffer
/// without cloning it for observers that ignore it.
pub type EventCallback<'a, T> = &'a mut dyn FnMut(&T);

/// Cooperative cancellation flag.
///
/// Clones share the same flag, so a host can keep one handle and pass another
/// into a running stage.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clears a previous request so the token can be reused.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
