use arena_shooter_core::{InputEvent, Key};

/// Scripted stand-in for a human player: spins in place and fires at a fixed cadence.
#[derive(Clone, Copy, Debug)]
pub struct Autopilot {
    fire_every: u64,
    turn: Key,
}

impl Autopilot {
    /// Creates an autopilot that clicks once every `fire_every` ticks.
    #[must_use]
    pub fn new(fire_every: u64) -> Self {
        Self {
            fire_every: fire_every.max(1),
            turn: Key::TurnLeft,
        }
    }

    /// Spins clockwise instead of counter-clockwise.
    #[must_use]
    pub const fn turning_right(mut self) -> Self {
        self.turn = Key::TurnRight;
        self
    }

    /// Input produced on the given tick.
    #[must_use]
    pub fn inputs(&self, tick: u64) -> Vec<InputEvent> {
        let mut inputs = Vec::new();
        if tick == 0 {
            inputs.push(InputEvent::KeyDown(self.turn));
        }
        if tick % self.fire_every == 0 {
            inputs.push(InputEvent::Click);
        }
        inputs
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(6)
    }
}
