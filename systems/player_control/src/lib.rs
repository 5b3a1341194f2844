#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system that turns platform input into player commands.
//!
//! Keys are folded into a polled [`MovementInput`] that is resent to the world
//! only when it changes. Pointer motion becomes look deltas scaled by the
//! configured sensitivity, clicks become fire requests and the jump key
//! becomes a jump request.

use arena_shooter_core::{Command, GameStatus, InputEvent, Key, MovementInput};

/// Pure system translating discrete input events into world commands.
#[derive(Clone, Debug)]
pub struct PlayerControl {
    held: MovementInput,
    look_sensitivity: f32,
}

impl PlayerControl {
    /// Creates a controller that scales pointer motion by `look_sensitivity` radians per pixel.
    #[must_use]
    pub fn new(look_sensitivity: f32) -> Self {
        Self {
            held: MovementInput::default(),
            look_sensitivity,
        }
    }

    /// Movement keys currently held.
    #[must_use]
    pub const fn held(&self) -> MovementInput {
        self.held
    }

    /// Consumes a batch of input events and emits the resulting commands.
    ///
    /// Pointer motion and clicks only count while the run is live; key state is
    /// always tracked so releases are never lost.
    pub fn handle(&mut self, inputs: &[InputEvent], status: GameStatus, out: &mut Vec<Command>) {
        let before = self.held;
        let running = status == GameStatus::Running;

        for input in inputs {
            match *input {
                InputEvent::KeyDown(Key::Jump) => out.push(Command::Jump),
                InputEvent::KeyDown(key) => self.set_key(key, true),
                InputEvent::KeyUp(key) => self.set_key(key, false),
                InputEvent::PointerMoved { dx, dy } => {
                    if running {
                        out.push(Command::Look {
                            yaw_delta: -dx * self.look_sensitivity,
                            pitch_delta: -dy * self.look_sensitivity,
                        });
                    }
                }
                InputEvent::Click => {
                    if running {
                        out.push(Command::FireWeapon);
                    }
                }
            }
        }

        if self.held != before {
            out.push(Command::SetMovement { input: self.held });
        }
    }

    fn set_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Forward => self.held.forward = pressed,
            Key::Backward => self.held.backward = pressed,
            Key::TurnLeft => self.held.turn_left = pressed,
            Key::TurnRight => self.held.turn_right = pressed,
            Key::Jump => {}
        }
    }
}
