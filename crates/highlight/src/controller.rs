use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_HOLD: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighlightState {
    #[default]
    Idle,
    Highlighted(usize),
}

impl HighlightState {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Highlighted(index) => Some(index),
        }
    }
}

/// Transient emphasis on one transcript turn that clears itself after a fixed
/// hold.
///
/// Exactly one expiry task can be pending. [`activate`](Self::activate) aborts
/// the previous one before arming a new one, and every activation bumps an
/// epoch so an expiry that already woke up cannot clear a newer highlight.
///
/// `activate` spawns onto the current tokio runtime and must be called from
/// within one. State changes are published on a `watch` channel; see
/// [`subscribe`](Self::subscribe).
pub struct HighlightController {
    state: Arc<watch::Sender<HighlightState>>,
    epoch: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    hold: Duration,
}

impl HighlightController {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> HighlightControllerBuilder {
        HighlightControllerBuilder::default()
    }

    pub fn state(&self) -> HighlightState {
        *self.state.borrow()
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.state() == HighlightState::Highlighted(index)
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    pub fn subscribe(&self) -> watch::Receiver<HighlightState> {
        self.state.subscribe()
    }

    /// Number of armed expiry tasks. Never more than one.
    pub fn pending_timers(&self) -> usize {
        self.pending
            .as_ref()
            .map_or(0, |handle| usize::from(!handle.is_finished()))
    }

    pub fn activate(&mut self, index: usize) {
        self.cancel_pending();
        let epoch = publish(&self.state, &self.epoch, HighlightState::Highlighted(index));
        tracing::debug!(index, "highlight_activated");

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.epoch);
        let deadline = tokio::time::Instant::now() + self.hold;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if expire(&state, &current, epoch) {
                tracing::debug!(index, "highlight_expired");
            }
        }));
    }

    pub fn clear(&mut self) {
        self.cancel_pending();
        publish(&self.state, &self.epoch, HighlightState::Idle);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

// Epoch reads and writes happen under the channel's write lock, so an expiry
// cannot interleave between a newer activation's epoch bump and its state write.
fn publish(state: &watch::Sender<HighlightState>, epoch: &AtomicU64, next: HighlightState) -> u64 {
    let mut armed = 0;
    state.send_modify(|current| {
        armed = epoch.fetch_add(1, Ordering::SeqCst) + 1;
        *current = next;
    });
    armed
}

fn expire(state: &watch::Sender<HighlightState>, epoch: &AtomicU64, armed: u64) -> bool {
    state.send_if_modified(|current| {
        if epoch.load(Ordering::SeqCst) != armed {
            return false;
        }
        *current = HighlightState::Idle;
        true
    })
}

impl Default for HighlightController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HighlightController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[derive(Default)]
pub struct HighlightControllerBuilder {
    hold: Option<Duration>,
}

impl HighlightControllerBuilder {
    pub fn hold(mut self, hold: Duration) -> Self {
        self.hold = Some(hold);
        self
    }

    pub fn build(self) -> HighlightController {
        let (state, _) = watch::channel(HighlightState::Idle);
        HighlightController {
            state: Arc::new(state),
            epoch: Arc::new(AtomicU64::new(0)),
            pending: None,
            hold: self.hold.unwrap_or(DEFAULT_HOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn advance(duration: Duration) {
        tokio::time::advance(duration).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn highlight_expires_after_hold() {
        let mut controller = HighlightController::new();
        controller.activate(3);
        assert_eq!(controller.state(), HighlightState::Highlighted(3));
        assert_eq!(controller.pending_timers(), 1);

        advance(Duration::from_millis(2400)).await;
        assert!(controller.is_highlighted(3));

        advance(Duration::from_millis(200)).await;
        assert_eq!(controller.state(), HighlightState::Idle);
        assert_eq!(controller.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reactivation_supersedes_pending_expiry() {
        let mut controller = HighlightController::new();
        controller.activate(2);
        advance(Duration::from_millis(1000)).await;

        controller.activate(5);
        assert_eq!(controller.state(), HighlightState::Highlighted(5));
        assert_eq!(controller.pending_timers(), 1);

        // the first activation's deadline passes without clearing
        advance(Duration::from_millis(1600)).await;
        assert_eq!(controller.state(), HighlightState::Highlighted(5));

        advance(Duration::from_millis(1000)).await;
        assert_eq!(controller.state(), HighlightState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_activations_leave_one_timer() {
        let mut controller = HighlightController::new();
        for index in 0..10 {
            controller.activate(index);
            assert!(controller.pending_timers() <= 1);
        }
        assert_eq!(controller.state(), HighlightState::Highlighted(9));

        advance(DEFAULT_HOLD + Duration::from_millis(1)).await;
        assert_eq!(controller.state(), HighlightState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_is_immediate_and_disarms_the_timer() {
        let mut controller = HighlightController::new();
        let mut rx = controller.subscribe();

        controller.activate(1);
        assert_eq!(*rx.borrow_and_update(), HighlightState::Highlighted(1));

        controller.clear();
        assert_eq!(controller.state(), HighlightState::Idle);
        assert_eq!(controller.pending_timers(), 0);
        assert!(rx.has_changed().unwrap());

        controller.clear();
        assert_eq!(controller.state(), HighlightState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_expiry_leaves_newer_highlight() {
        let mut controller = HighlightController::new();
        controller.activate(1);
        controller.activate(2);

        assert!(!expire(&controller.state, &controller.epoch, 1));
        assert_eq!(controller.state(), HighlightState::Highlighted(2));

        assert!(expire(&controller.state, &controller.epoch, 2));
        assert_eq!(controller.state(), HighlightState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_hold() {
        let mut controller = HighlightController::builder()
            .hold(Duration::from_millis(100))
            .build();
        assert_eq!(controller.hold(), Duration::from_millis(100));

        controller.activate(0);
        advance(Duration::from_millis(101)).await;
        assert_eq!(controller.state().index(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_the_expiry() {
        let mut controller = HighlightController::new();
        let mut rx = controller.subscribe();
        controller.activate(4);
        rx.borrow_and_update();

        advance(DEFAULT_HOLD).await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), HighlightState::Idle);
    }
}
