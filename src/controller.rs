use crate::cube::Rotate;
use druid::kurbo::{Point, Vec2};
use std::time::Duration;
use tracing::{debug, trace};

/// Interval between two coasting ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(20);

/// Mouse movement (device units) per degree of rotation while dragging
pub const DRAG_SCALE: f64 = 10.0;

/// What the host should do with its repeating timer after an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerRequest {
    /// (Re)start ticking at the given interval, dropping any pending tick
    Start(Duration),
    /// Stop ticking
    Stop,
    /// Leave the timer as it is (a running timer keeps ticking)
    Keep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    Coasting,
}

/// Turns mouse drags into rotations and lets a released drag coast to a stop.
#[derive(Debug)]
pub struct InteractionController {
    phase: Phase,
    last_position: Point,
    last_delta: Option<Vec2>,
    yaw_speed: f64,
    pitch_speed: f64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        InteractionController {
            phase: Phase::Idle,
            last_position: Point::ZERO,
            last_delta: None,
            yaw_speed: 0.0,
            pitch_speed: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mouse_down(&self) -> bool {
        self.phase == Phase::Dragging
    }

    pub fn last_delta(&self) -> Option<Vec2> {
        self.last_delta
    }

    /// Current angular velocity as (yaw, pitch)
    pub fn speed(&self) -> (f64, f64) {
        (self.yaw_speed, self.pitch_speed)
    }

    /// Starts a drag, cancelling any coasting.
    pub fn press<R: Rotate>(&mut self, target: Option<&mut R>, pos: Point) -> TimerRequest {
        if target.is_none() {
            return TimerRequest::Keep;
        }
        let was_coasting = self.phase == Phase::Coasting;
        self.phase = Phase::Dragging;
        self.last_position = pos;
        self.last_delta = None;
        if was_coasting {
            debug!(yaw_speed = self.yaw_speed, pitch_speed = self.pitch_speed, "coast cancelled");
        }
        self.yaw_speed = 0.0;
        self.pitch_speed = 0.0;
        TimerRequest::Stop
    }

    /// Rotates by a tenth of the movement since the last drag position.
    pub fn drag<R: Rotate>(&mut self, target: Option<&mut R>, pos: Point) -> TimerRequest {
        let Some(target) = target else {
            return TimerRequest::Keep;
        };
        if self.phase != Phase::Dragging || pos == self.last_position {
            return TimerRequest::Keep;
        }
        let delta = pos - self.last_position;
        target.rotate(delta.x / DRAG_SCALE, delta.y / DRAG_SCALE);
        self.last_delta = Some(delta);
        self.last_position = pos;
        TimerRequest::Keep
    }

    /// Ends a drag and hands the last movement over as angular velocity.
    ///
    /// The velocity is the raw delta, not scaled by [`DRAG_SCALE`], so a
    /// release spins the cube noticeably faster than the drag did.
    pub fn release<R: Rotate>(&mut self, target: Option<&mut R>) -> TimerRequest {
        if target.is_none() || self.phase != Phase::Dragging {
            return TimerRequest::Keep;
        }
        if let Some(delta) = self.last_delta {
            self.yaw_speed = delta.x;
            self.pitch_speed = delta.y;
        }
        self.phase = Phase::Coasting;
        debug!(yaw_speed = self.yaw_speed, pitch_speed = self.pitch_speed, "flick");
        TimerRequest::Start(TICK_INTERVAL)
    }

    /// Decays both speeds by one unit and rotates by what is left.
    pub fn tick<R: Rotate>(&mut self, target: Option<&mut R>) -> TimerRequest {
        let Some(target) = target else {
            return TimerRequest::Keep;
        };
        if self.phase != Phase::Coasting {
            return TimerRequest::Stop;
        }
        self.yaw_speed = decay(self.yaw_speed);
        self.pitch_speed = decay(self.pitch_speed);
        target.rotate(self.yaw_speed, self.pitch_speed);
        trace!(yaw_speed = self.yaw_speed, pitch_speed = self.pitch_speed, "tick");

        if self.yaw_speed == 0.0 && self.pitch_speed == 0.0 {
            self.phase = Phase::Idle;
            debug!("coast finished");
            TimerRequest::Stop
        } else {
            TimerRequest::Keep
        }
    }
}

/// One unit closer to zero, or exactly zero once under one unit.
fn decay(speed: f64) -> f64 {
    if speed >= 1.0 {
        speed - 1.0
    } else if speed <= -1.0 {
        speed + 1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every rotation it is asked to perform
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(f64, f64)>,
    }

    impl Rotate for Recorder {
        fn rotate(&mut self, delta_yaw: f64, delta_pitch: f64) {
            self.calls.push((delta_yaw, delta_pitch));
        }
    }

    fn dragged(recorder: &mut Recorder, to: Point) -> InteractionController {
        let mut controller = InteractionController::new();
        controller.press(Some(&mut *recorder), Point::ZERO);
        controller.drag(Some(&mut *recorder), to);
        controller
    }

    #[test]
    fn drag_rotates_by_a_tenth_of_the_movement() {
        let mut recorder = Recorder::default();
        let controller = dragged(&mut recorder, Point::new(20.0, 10.0));
        assert_eq!(recorder.calls, vec![(2.0, 1.0)]);
        assert_eq!(controller.last_delta(), Some(Vec2::new(20.0, 10.0)));
        assert!(controller.mouse_down());
    }

    #[test]
    fn drag_to_the_same_position_is_ignored() {
        let mut recorder = Recorder::default();
        let mut controller = dragged(&mut recorder, Point::new(20.0, 10.0));
        controller.drag(Some(&mut recorder), Point::new(20.0, 10.0));
        assert_eq!(recorder.calls.len(), 1);

        let mut recorder = Recorder::default();
        let mut controller = InteractionController::new();
        controller.press(Some(&mut recorder), Point::new(5.0, 5.0));
        controller.drag(Some(&mut recorder), Point::new(5.0, 5.0));
        assert!(recorder.calls.is_empty());
        assert_eq!(controller.last_delta(), None);
    }

    #[test]
    fn movement_without_a_press_does_nothing() {
        let mut recorder = Recorder::default();
        let mut controller = InteractionController::new();
        controller.drag(Some(&mut recorder), Point::new(20.0, 10.0));
        assert!(recorder.calls.is_empty());
        assert_eq!(controller.release(Some(&mut recorder)), TimerRequest::Keep);
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[test]
    fn release_uses_the_raw_delta_as_speed() {
        let mut recorder = Recorder::default();
        let mut controller = dragged(&mut recorder, Point::new(20.0, 10.0));
        let request = controller.release(Some(&mut recorder));
        assert_eq!(request, TimerRequest::Start(Duration::from_millis(20)));
        assert_eq!(controller.speed(), (20.0, 10.0));
        assert_eq!(controller.phase(), Phase::Coasting);
        assert!(!controller.mouse_down());
    }

    #[test]
    fn coasting_applies_the_decayed_speed_each_tick() {
        let mut recorder = Recorder::default();
        let mut controller = dragged(&mut recorder, Point::new(3.0, 0.0));
        controller.release(Some(&mut recorder));
        recorder.calls.clear();

        assert_eq!(controller.tick(Some(&mut recorder)), TimerRequest::Keep);
        assert_eq!(controller.tick(Some(&mut recorder)), TimerRequest::Keep);
        assert_eq!(controller.tick(Some(&mut recorder)), TimerRequest::Stop);
        assert_eq!(recorder.calls, vec![(2.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        assert_eq!(controller.speed(), (0.0, 0.0));
        assert_eq!(controller.phase(), Phase::Idle);

        // a stale tick after stopping rotates nothing
        assert_eq!(controller.tick(Some(&mut recorder)), TimerRequest::Stop);
        assert_eq!(recorder.calls.len(), 3);
    }

    #[test]
    fn speeds_decay_independently_toward_zero() {
        let mut recorder = Recorder::default();
        let mut controller = dragged(&mut recorder, Point::new(-2.5, 1.0));
        controller.release(Some(&mut recorder));
        recorder.calls.clear();

        while controller.tick(Some(&mut recorder)) == TimerRequest::Keep {}
        assert_eq!(recorder.calls, vec![(-1.5, 0.0), (-0.5, 0.0), (0.0, 0.0)]);
    }

    #[test]
    fn press_halts_coasting() {
        let mut recorder = Recorder::default();
        let mut controller = dragged(&mut recorder, Point::new(20.0, 10.0));
        controller.release(Some(&mut recorder));
        controller.tick(Some(&mut recorder));
        let before = recorder.calls.len();

        assert_eq!(controller.press(Some(&mut recorder), Point::new(50.0, 50.0)), TimerRequest::Stop);
        assert_eq!(controller.tick(Some(&mut recorder)), TimerRequest::Stop);
        assert_eq!(recorder.calls.len(), before);
        assert_eq!(controller.phase(), Phase::Dragging);
    }

    #[test]
    fn click_without_movement_does_not_replay_an_old_flick() {
        let mut recorder = Recorder::default();
        let mut controller = dragged(&mut recorder, Point::new(20.0, 10.0));
        controller.release(Some(&mut recorder));
        while controller.tick(Some(&mut recorder)) == TimerRequest::Keep {}

        controller.press(Some(&mut recorder), Point::new(1.0, 1.0));
        controller.release(Some(&mut recorder));
        recorder.calls.clear();
        assert_eq!(controller.tick(Some(&mut recorder)), TimerRequest::Stop);
        assert_eq!(recorder.calls, vec![(0.0, 0.0)]);
    }

    #[test]
    fn click_during_a_coast_stops_it_for_good() {
        let mut recorder = Recorder::default();
        let mut controller = dragged(&mut recorder, Point::new(20.0, 10.0));
        controller.release(Some(&mut recorder));
        controller.tick(Some(&mut recorder));
        assert_eq!(controller.speed(), (19.0, 9.0));

        controller.press(Some(&mut recorder), Point::new(7.0, 7.0));
        assert_eq!(controller.speed(), (0.0, 0.0));
        controller.release(Some(&mut recorder));
        recorder.calls.clear();

        while controller.tick(Some(&mut recorder)) == TimerRequest::Keep {}
        assert_eq!(recorder.calls, vec![(0.0, 0.0)]);
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[test]
    fn events_without_a_target_are_ignored() {
        let mut controller = InteractionController::new();
        let none: Option<&mut Recorder> = None;
        assert_eq!(controller.press(none, Point::ZERO), TimerRequest::Keep);
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.drag(None::<&mut Recorder>, Point::new(4.0, 4.0)), TimerRequest::Keep);
        assert_eq!(controller.release(None::<&mut Recorder>), TimerRequest::Keep);
        assert_eq!(controller.tick(None::<&mut Recorder>), TimerRequest::Keep);
        assert_eq!(controller.last_delta(), None);
    }

    #[test]
    fn decay_snaps_small_speeds_to_zero() {
        assert_eq!(decay(3.0), 2.0);
        assert_eq!(decay(-1.0), 0.0);
        assert_eq!(decay(0.99), 0.0);
        assert_eq!(decay(-0.2), 0.0);
    }
}
