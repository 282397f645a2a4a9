use std::time::Duration;

use log::info;

use crate::auto_advance::AutoAdvance;
use crate::config::SlideshowConfig;
use crate::coordinator::{CategoryLoader, Coordinator};
use crate::input::Command;
use crate::ring::Rotation;

/// Display-thread state: the coordinator plus the auto-advance timer.
/// Methods return true when the slide on screen changed and the presenter
/// should fade to the new one.
pub struct App<L: CategoryLoader> {
    coordinator: Coordinator<L>,
    auto: AutoAdvance,
    running: bool,
}

impl<L: CategoryLoader> App<L> {
    pub fn new(coordinator: Coordinator<L>, slideshow: &SlideshowConfig) -> Self {
        Self {
            coordinator,
            auto: AutoAdvance::new(slideshow),
            running: true,
        }
    }

    /// Requests the first category.
    pub fn start(&mut self) {
        self.coordinator.switch_to(0);
    }

    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::NextCategory => {
                self.coordinator.next_category();
                self.auto.restart();
                false
            }
            Command::PreviousCategory => {
                self.coordinator.previous_category();
                self.auto.restart();
                false
            }
            Command::NextImage => self.step(Rotation::Left),
            Command::PreviousImage => self.step(Rotation::Right),
            Command::Pause => {
                info!("Auto-advance paused");
                self.auto.pause();
                false
            }
            Command::Quit => {
                self.running = false;
                false
            }
        }
    }

    fn step(&mut self, rotation: Rotation) -> bool {
        if self.coordinator.is_loading() {
            return false;
        }
        self.auto.restart();
        self.coordinator.rotate(rotation)
    }

    /// Per-frame update: commits a finished load, then runs the timer.
    pub fn update(&mut self, dt: Duration) -> bool {
        let mut changed = false;
        if self.coordinator.poll().is_some() {
            self.auto.rearm();
            changed = true;
        }
        if self.auto.tick(dt) {
            changed |= self.coordinator.rotate(Rotation::Left);
        }
        changed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn coordinator(&self) -> &Coordinator<L> {
        &self.coordinator
    }

    pub fn auto_advance(&self) -> &AutoAdvance {
        &self.auto
    }
}
