use std::time::Duration;

use arena_shooter_core::{GameStatus, InputEvent};

use crate::Session;

/// Drives a session with a constant step until the tick budget runs out or the run flag drops.
#[derive(Clone, Copy, Debug)]
pub struct FixedStepScheduler {
    step: Duration,
    budget: u64,
}

impl FixedStepScheduler {
    /// Creates a scheduler advancing `step` per tick for at most `budget` ticks.
    #[must_use]
    pub const fn new(step: Duration, budget: u64) -> Self {
        Self { step, budget }
    }

    /// Simulated time advanced per tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Runs the session, asking `inputs` for the input batch of each tick.
    pub fn run<F>(&self, session: &mut Session, mut inputs: F) -> SchedulerReport
    where
        F: FnMut(u64) -> Vec<InputEvent>,
    {
        let mut ticks = 0;
        while ticks < self.budget {
            let batch = inputs(ticks);
            if !session.tick(self.step, &batch) {
                break;
            }
            ticks += 1;
        }

        SchedulerReport {
            ticks,
            elapsed: session.elapsed(),
            status: session.status(),
        }
    }
}

/// Summary of a scheduler run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerReport {
    /// Ticks that actually ran.
    pub ticks: u64,
    /// Simulation clock when the scheduler returned.
    pub elapsed: Duration,
    /// Run status when the scheduler returned.
    pub status: GameStatus,
}
