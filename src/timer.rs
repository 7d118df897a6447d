//! Timer Plumbing
//!
//! Owned background-task handles shared by the transition controller and the
//! activity poller. A slot owns at most one task; replacing or dropping the
//! slot aborts what it held, so a timer can never outlive its owner.

use tokio::task::JoinHandle;

/// Exclusive owner of at most one spawned task
#[derive(Debug, Default)]
pub struct TaskSlot {
    handle: Option<JoinHandle<()>>,
}

impl TaskSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Abort the held task, then take ownership of `handle`
    pub fn replace(&mut self, handle: JoinHandle<()>) {
        self.cancel();
        self.handle = Some(handle);
    }

    /// Abort the held task.
    ///
    /// Returns `true` if the task had not yet finished.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let live = !handle.is_finished();
                handle.abort();
                live
            }
            None => false,
        }
    }

    /// Whether the slot holds a task that is still running
    pub fn is_armed(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn counting_task(counter: Arc<AtomicUsize>, delay: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_aborts_previous() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut slot = TaskSlot::new();

        slot.replace(counting_task(fired.clone(), Duration::from_millis(100)));
        slot.replace(counting_task(fired.clone(), Duration::from_millis(200)));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!slot.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let mut slot = TaskSlot::new();
            slot.replace(counting_task(fired.clone(), Duration::from_millis(10)));
            assert!(slot.is_armed());
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_empty_slot() {
        let mut slot = TaskSlot::default();
        assert!(!slot.cancel());
        assert!(!slot.is_armed());
    }
}
