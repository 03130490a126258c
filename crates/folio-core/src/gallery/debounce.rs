use std::time::{Duration, Instant};

use crate::consts::RESIZE_DEBOUNCE_MS;

/// Coalesces bursts of window resizes into one relayout.
///
/// Every resize pushes the deadline out by `delay`; [`poll`](Self::poll)
/// fires once the last resize is at least `delay` old.
#[derive(Clone, Debug)]
pub struct ResizeDebouncer {
    delay: Duration,
    due_at: Option<Instant>,
    pending_width: Option<u32>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(RESIZE_DEBOUNCE_MS))
    }
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            due_at: None,
            pending_width: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn on_resize(&mut self, width: u32, now: Instant) {
        self.due_at = Some(now + self.delay);
        self.pending_width = Some(width);
    }

    /// The width to lay out at, if the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<u32> {
        let due = self.due_at?;
        if now < due {
            return None;
        }
        self.due_at = None;
        self.pending_width.take()
    }

    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_delay() {
        let t0 = Instant::now();
        let mut d = ResizeDebouncer::default();
        d.on_resize(900, t0);
        assert_eq!(d.poll(t0 + Duration::from_millis(249)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(250)), Some(900));
        assert!(!d.is_pending());
        assert_eq!(d.poll(t0 + Duration::from_millis(600)), None);
    }

    #[test]
    fn each_resize_reschedules() {
        let t0 = Instant::now();
        let mut d = ResizeDebouncer::default();
        d.on_resize(900, t0);
        d.on_resize(800, t0 + Duration::from_millis(200));
        assert_eq!(d.poll(t0 + Duration::from_millis(300)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(450)), Some(800));
    }
}
