use {
    std::{
        fmt,
        sync::{
            Arc, Mutex,
            atomic::{AtomicU8, Ordering},
        },
    },
    tokio::sync::Notify,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PipelineState {
    Created = 0,
    Running = 1,
    Stopping = 2,
    Stopped = 3,
}

impl PipelineState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => PipelineState::Created,
            1 => PipelineState::Running,
            2 => PipelineState::Stopping,
            _ => PipelineState::Stopped,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Created => write!(f, "created"),
            PipelineState::Running => write!(f, "running"),
            PipelineState::Stopping => write!(f, "stopping"),
            PipelineState::Stopped => write!(f, "stopped"),
        }
    }
}

struct Shared {
    state: AtomicU8,
    changed: Notify,
    cause: Mutex<Option<String>>,
}

/// Pipeline lifecycle flag shared by the controller and both units.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct RunState {
    shared: Arc<Shared>,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: AtomicU8::new(PipelineState::Created as u8),
                changed: Notify::new(),
                cause: Mutex::new(None),
            }),
        }
    }

    pub fn get(&self) -> PipelineState {
        PipelineState::from_u8(self.shared.state.load(Ordering::Acquire))
    }

    pub fn is_running(&self) -> bool {
        self.get() == PipelineState::Running
    }

    pub fn set(&self, state: PipelineState) {
        self.shared.state.store(state as u8, Ordering::Release);
        self.shared.changed.notify_waiters();
    }

    /// Move from Running to Stopping. Returns `false` if the pipeline was not
    /// running. The first recorded cause wins.
    pub fn request_stop(&self, cause: Option<String>) -> bool {
        let moved = self
            .shared
            .state
            .compare_exchange(
                PipelineState::Running as u8,
                PipelineState::Stopping as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        if moved {
            if let Some(cause) = cause {
                self.shared
                    .cause
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .get_or_insert(cause);
            }
            self.shared.changed.notify_waiters();
        }
        moved
    }

    /// Why the pipeline stopped on its own, if it did.
    pub fn cause(&self) -> Option<String> {
        self.shared.cause.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Resolve once the state is Stopping or Stopped.
    pub async fn stopping(&self) {
        loop {
            let changed = self.shared.changed.notified();
            if matches!(self.get(), PipelineState::Stopping | PipelineState::Stopped) {
                return;
            }
            changed.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_stop_only_from_running() {
        let state = RunState::new();
        assert!(!state.request_stop(None));
        assert_eq!(state.get(), PipelineState::Created);

        state.set(PipelineState::Running);
        assert!(state.request_stop(Some("camera unplugged".to_string())));
        assert!(!state.request_stop(Some("second".to_string())));
        assert_eq!(state.get(), PipelineState::Stopping);
        assert_eq!(state.cause().as_deref(), Some("camera unplugged"));
    }

    #[tokio::test]
    async fn test_stopping_wakes_on_request() {
        let state = RunState::new();
        state.set(PipelineState::Running);
        let waiter = tokio::spawn({
            let state = state.clone();
            async move { state.stopping().await }
        });
        tokio::task::yield_now().await;
        state.request_stop(None);
        tokio::time::timeout(std::time::Duration::from_secs(5), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
