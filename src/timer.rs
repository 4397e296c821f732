use log::debug;
use std::time::{Duration, Instant};

/// The one scheduled reload of a page showing a pending build.
///
/// Scheduling replaces any earlier reload, so at most one is ever pending.
#[derive(Debug, Clone)]
pub struct PollTimer {
    delay: Duration,
    due: Option<Instant>,
}

impl PollTimer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    pub fn schedule(&mut self, now: Instant) {
        let due = now + self.delay;
        if self.due.replace(due).is_some() {
            debug!("Replacing pending reload");
        }
        debug!("Reload scheduled in {}s", self.delay.as_secs());
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Time left until the pending reload fires
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    /// Consumes the pending reload if it is due
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let start = Instant::now();
        let mut timer = PollTimer::new(Duration::from_secs(30));
        timer.schedule(start);

        assert!(!timer.fire(start + Duration::from_secs(29)));
        assert_eq!(
            timer.remaining(start + Duration::from_secs(10)),
            Some(Duration::from_secs(20))
        );
        assert!(timer.fire(start + Duration::from_secs(30)));
        assert!(!timer.fire(start + Duration::from_secs(60)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_rescheduling_keeps_single_reload() {
        let start = Instant::now();
        let mut timer = PollTimer::new(Duration::from_secs(30));
        timer.schedule(start);
        timer.schedule(start + Duration::from_secs(20));

        assert!(!timer.fire(start + Duration::from_secs(30)));
        assert!(timer.fire(start + Duration::from_secs(50)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = PollTimer::new(Duration::from_secs(30));
        timer.schedule(start);
        timer.cancel();

        assert!(timer.remaining(start).is_none());
        assert!(!timer.fire(start + Duration::from_secs(31)));
    }
}
