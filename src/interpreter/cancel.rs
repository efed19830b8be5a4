use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal shared between the engine and the
/// collaborator that can stop a run.
///
/// The engine arms the token at the start of every run and checks it on
/// each iteration of every loop. Cancelling only flips the flag; a run
/// blocked inside [`Console::request_line`](crate::interpreter::Console)
/// is released by the console delivering the empty sentinel.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    running: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub(crate) fn arm(&self) {
        self.running.store(true, Ordering::Release);
    }
}
