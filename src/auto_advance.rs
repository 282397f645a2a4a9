use std::time::Duration;

use crate::config::SlideshowConfig;

/// Countdown to the next automatic slide change.
///
/// Pausing is tracked apart from the countdown: only `restart`, which is
/// driven by user navigation, lifts a pause.
#[derive(Debug, Clone)]
pub struct AutoAdvance {
    remaining: Option<Duration>,
    paused: bool,
    image_delay: Duration,
    start_delay: Duration,
}

impl AutoAdvance {
    pub fn new(config: &SlideshowConfig) -> Self {
        Self {
            remaining: None,
            paused: false,
            image_delay: config.image_delay(),
            start_delay: config.start_delay(),
        }
    }

    /// Arms the longer delay used after manual navigation or a category
    /// change. Also resumes a paused timer.
    pub fn restart(&mut self) {
        self.paused = false;
        self.remaining = Some(self.start_delay);
    }

    /// Arms the start delay after new slides commit, unless paused.
    pub fn rearm(&mut self) {
        if !self.paused {
            self.remaining = Some(self.start_delay);
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.remaining = None;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[cfg(test)]
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Advances the countdown. Returns true when it expires, in which case
    /// it re-arms itself with the per-image delay.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        match remaining.checked_sub(dt) {
            Some(left) if !left.is_zero() => {
                self.remaining = Some(left);
                false
            }
            _ => {
                self.remaining = Some(self.image_delay);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> AutoAdvance {
        AutoAdvance::new(&SlideshowConfig {
            image_delay_ms: 1_000,
            start_delay_ms: 3_000,
            fade_speed_ms: 100,
        })
    }

    #[test]
    fn test_starts_disarmed() {
        let mut auto = timer();
        assert!(!auto.is_paused());
        assert_eq!(auto.remaining(), None);
        assert!(!auto.tick(Duration::from_secs(60)));
    }

    #[test]
    fn test_start_delay_then_image_delay() {
        let mut auto = timer();
        auto.restart();

        assert!(!auto.tick(Duration::from_millis(2_999)));
        assert!(auto.tick(Duration::from_millis(1)));
        assert_eq!(auto.remaining(), Some(Duration::from_secs(1)));

        assert!(!auto.tick(Duration::from_millis(500)));
        assert!(auto.tick(Duration::from_millis(600)));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut auto = timer();
        auto.restart();
        auto.pause();
        assert!(auto.is_paused());
        assert!(!auto.tick(Duration::from_secs(10)));

        auto.restart();
        assert!(!auto.is_paused());
        assert_eq!(auto.remaining(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_rearm_keeps_pause() {
        let mut auto = timer();
        auto.rearm();
        assert_eq!(auto.remaining(), Some(Duration::from_secs(3)));

        auto.pause();
        auto.rearm();
        assert!(auto.is_paused());
        assert_eq!(auto.remaining(), None);
        assert!(!auto.tick(Duration::from_secs(10)));
    }
}
