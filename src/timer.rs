use crate::controller::TimerRequest;
use druid::TimerToken;
use std::time::Duration;

/// A repeating timer on top of one-shot timer tokens.
///
/// Only the most recently armed token is live; a tick carrying any other
/// token was scheduled before a restart or stop and must be dropped.
#[derive(Debug, Default)]
pub struct CoastTimer {
    pending: Option<TimerToken>,
    interval: Duration,
}

impl CoastTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies a request that came from an input event. `Keep` leaves a
    /// pending tick alone.
    pub fn apply(&mut self, request: TimerRequest, arm: impl FnOnce(Duration) -> TimerToken) {
        match request {
            TimerRequest::Start(interval) => {
                self.interval = interval;
                self.pending = Some(arm(interval));
            }
            TimerRequest::Stop => self.pending = None,
            TimerRequest::Keep => {}
        }
    }

    /// Claims a fired token. Returns false for stale tokens.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Applies the request returned by a tick. The fired token is spent, so
    /// `Keep` arms the next one at the current interval.
    pub fn after_tick(&mut self, request: TimerRequest, arm: impl FnOnce(Duration) -> TimerToken) {
        match request {
            TimerRequest::Keep => self.pending = Some(arm(self.interval)),
            other => self.apply(other, arm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Arms a fresh token and remembers the interval it was asked for
    fn arm_into(log: &mut Vec<Duration>) -> impl FnOnce(Duration) -> TimerToken + '_ {
        move |interval| {
            log.push(interval);
            TimerToken::next()
        }
    }

    fn started(log: &mut Vec<Duration>) -> (CoastTimer, TimerToken) {
        let mut timer = CoastTimer::new();
        timer.apply(TimerRequest::Start(Duration::from_millis(20)), arm_into(log));
        let token = timer.pending.unwrap();
        (timer, token)
    }

    #[test]
    fn start_arms_a_live_token() {
        let mut log = Vec::new();
        let (mut timer, token) = started(&mut log);
        assert!(timer.is_running());
        assert_eq!(log, vec![Duration::from_millis(20)]);
        assert!(timer.fire(token));
        assert!(!timer.is_running());
    }

    #[test]
    fn stop_leaves_the_pending_token_stale() {
        let mut log = Vec::new();
        let (mut timer, token) = started(&mut log);
        timer.apply(TimerRequest::Stop, arm_into(&mut log));
        assert!(!timer.is_running());
        assert!(!timer.fire(token));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn restart_replaces_the_pending_token() {
        let mut log = Vec::new();
        let (mut timer, first) = started(&mut log);
        timer.apply(TimerRequest::Start(Duration::from_millis(50)), arm_into(&mut log));
        let second = timer.pending.unwrap();

        assert_ne!(first, second);
        assert!(!timer.fire(first));
        assert!(timer.fire(second));
        assert_eq!(log, vec![Duration::from_millis(20), Duration::from_millis(50)]);
    }

    #[test]
    fn keep_from_an_event_does_not_rearm() {
        let mut log = Vec::new();
        let (mut timer, token) = started(&mut log);
        timer.apply(TimerRequest::Keep, arm_into(&mut log));
        assert_eq!(log.len(), 1);
        assert!(timer.fire(token));
    }

    #[test]
    fn keep_after_a_tick_rearms_at_the_same_interval() {
        let mut log = Vec::new();
        let (mut timer, token) = started(&mut log);
        assert!(timer.fire(token));
        timer.after_tick(TimerRequest::Keep, arm_into(&mut log));

        assert!(timer.is_running());
        assert_eq!(log, vec![Duration::from_millis(20); 2]);
        let next = timer.pending.unwrap();
        assert!(!timer.fire(token));
        assert!(timer.fire(next));
    }

    #[test]
    fn stop_after_a_tick_ends_the_schedule() {
        let mut log = Vec::new();
        let (mut timer, token) = started(&mut log);
        assert!(timer.fire(token));
        timer.after_tick(TimerRequest::Stop, arm_into(&mut log));
        assert!(!timer.is_running());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn press_mid_coast_makes_the_pending_tick_stale() {
        use crate::controller::InteractionController;
        use crate::cube::Cube;
        use druid::kurbo::Point;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut cube = Cube::new(&mut StdRng::seed_from_u64(5));
        let mut controller = InteractionController::new();
        let mut timer = CoastTimer::new();
        let mut log = Vec::new();

        controller.press(Some(&mut cube), Point::ZERO);
        controller.drag(Some(&mut cube), Point::new(20.0, 10.0));
        let request = controller.release(Some(&mut cube));
        timer.apply(request, arm_into(&mut log));
        let token = timer.pending.unwrap();

        let request = controller.press(Some(&mut cube), Point::new(3.0, 3.0));
        timer.apply(request, arm_into(&mut log));
        let before = cube.orientation();

        // the tick scheduled before the press still arrives, and is dropped
        assert!(!timer.fire(token));
        assert_eq!(cube.orientation(), before);
        assert!(!timer.is_running());
    }
}
