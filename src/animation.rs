//! The spinning disc.
//!
//! Driven from the event loop rather than its own timer: each frame calls
//! [`RotationAnimator::tick`], which measures the wall-clock time since the
//! previous frame and turns it into an `UpdateRotation` action.

use std::time::Instant;

use crate::player::{Action, PlayerState};

/// Degrees per millisecond; about 7.2 revolutions a minute.
pub const DEFAULT_RATE: f64 = 0.02;

/// `degrees` advanced by `elapsed_ms` at `rate`, folded into `[0, 360)`.
pub fn advance_rotation(degrees: f64, elapsed_ms: f64, rate: f64) -> f64 {
    let next = (degrees + rate * elapsed_ms).rem_euclid(360.0);
    if next >= 360.0 { 0.0 } else { next }
}

#[derive(Debug, Clone)]
pub struct RotationAnimator {
    rate: f64,
    last_frame: Option<Instant>,
}

impl Default for RotationAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl RotationAnimator {
    pub fn new(rate: f64) -> Self {
        Self {
            rate,
            last_frame: None,
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.last_frame.is_some()
    }

    /// One animation frame at `now`.
    ///
    /// While playing, returns the rotation update for the time since the last
    /// frame. The first frame after a start only records the time. When not
    /// playing the animator suspends and forgets its last frame, so a pause
    /// never turns into a jump on resume.
    pub fn tick(&mut self, now: Instant, state: &PlayerState) -> Option<Action> {
        if !state.is_playing {
            self.stop();
            return None;
        }

        let previous = self.last_frame.replace(now)?;
        let elapsed_ms = now.saturating_duration_since(previous).as_secs_f64() * 1000.0;
        if elapsed_ms <= 0.0 {
            return None;
        }
        Some(Action::UpdateRotation(advance_rotation(
            state.cd_rotation,
            elapsed_ms,
            self.rate,
        )))
    }

    pub fn stop(&mut self) {
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::player::reduce;

    fn playing() -> PlayerState {
        PlayerState {
            is_playing: true,
            ..PlayerState::default()
        }
    }

    #[test]
    fn twenty_seconds_turns_forty_degrees_past_the_wrap() {
        // 0.02 * 20000 = 400 degrees.
        assert!((advance_rotation(0.0, 20_000.0, DEFAULT_RATE) - 40.0).abs() < 1e-9);
        assert!((advance_rotation(350.0, 1_000.0, DEFAULT_RATE) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn first_frame_only_starts_the_clock() {
        let mut anim = RotationAnimator::default();
        let t0 = Instant::now();
        assert_eq!(anim.tick(t0, &playing()), None);
        assert!(anim.is_running());
    }

    #[test]
    fn frames_advance_by_elapsed_time() {
        let mut anim = RotationAnimator::default();
        let mut state = playing();
        let t0 = Instant::now();
        anim.tick(t0, &state);

        let action = anim.tick(t0 + Duration::from_millis(20_000), &state);
        match action {
            Some(Action::UpdateRotation(deg)) => {
                assert!((deg - 40.0).abs() < 1e-9);
                state = reduce(&state, Action::UpdateRotation(deg));
            }
            other => panic!("expected rotation update, got {other:?}"),
        }
        assert!(state.cd_rotation < 360.0);
    }

    #[test]
    fn pause_suspends_and_resume_does_not_jump() {
        let mut anim = RotationAnimator::default();
        let t0 = Instant::now();
        anim.tick(t0, &playing());

        let paused = PlayerState::default();
        assert_eq!(anim.tick(t0 + Duration::from_secs(5), &paused), None);
        assert!(!anim.is_running());

        // Resuming restarts the clock instead of charging for the pause.
        assert_eq!(anim.tick(t0 + Duration::from_secs(60), &playing()), None);
        let next = anim.tick(t0 + Duration::from_millis(60_500), &playing());
        match next {
            Some(Action::UpdateRotation(deg)) => assert!((deg - 10.0).abs() < 1e-9),
            other => panic!("expected rotation update, got {other:?}"),
        }
    }

    #[test]
    fn custom_rate_is_used() {
        let mut anim = RotationAnimator::new(0.1);
        let t0 = Instant::now();
        anim.tick(t0, &playing());
        let next = anim.tick(t0 + Duration::from_millis(100), &playing());
        match next {
            Some(Action::UpdateRotation(deg)) => assert!((deg - 10.0).abs() < 1e-9),
            other => panic!("expected rotation update, got {other:?}"),
        }
    }
}
