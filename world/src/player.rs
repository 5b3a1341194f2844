use std::{f32::consts::FRAC_PI_2, time::Duration};

use arena_shooter_core::{MovementInput, PlayerConfig, PlayerSnapshot, WallBox};
use glam::{Vec2, Vec3};

use crate::collision::{self, Axis};

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
    pub(crate) yaw: f32,
    pub(crate) pitch: f32,
    pub(crate) health: u32,
    pub(crate) grounded: bool,
    pub(crate) input: MovementInput,
    pub(crate) last_fired: Option<Duration>,
}

impl Player {
    pub(crate) fn spawn(position: Vec3, health: u32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            health,
            grounded: true,
            input: MovementInput::default(),
            last_fired: None,
        }
    }

    /// Advances the player by `dt` seconds, resolving walls then the level boundary.
    pub(crate) fn integrate(
        &mut self,
        dt: f32,
        config: &PlayerConfig,
        walls: &[WallBox],
        boundary: f32,
    ) {
        self.velocity.y -= config.gravity * dt;

        if self.input.turn_left {
            self.yaw += config.turn_rate * dt;
        }
        if self.input.turn_right {
            self.yaw -= config.turn_rate * dt;
        }

        if self.input.forward || self.input.backward {
            let heading = if self.input.forward {
                self.forward()
            } else {
                -self.forward()
            };
            self.velocity.x = heading.x * config.move_speed;
            self.velocity.z = heading.y * config.move_speed;
        } else {
            self.velocity.x *= config.idle_damping;
            self.velocity.z *= config.idle_damping;
        }

        self.position += self.velocity * dt;

        if self.position.y < config.ground_height {
            self.velocity.y = 0.0;
            self.position.y = config.ground_height;
            self.grounded = true;
        }

        for wall in walls {
            let Some(resolved) = collision::push_out(self.plane(), config.radius, wall) else {
                continue;
            };
            self.position.x = resolved.position.x;
            self.position.z = resolved.position.y;
            match resolved.axis {
                Axis::X => self.velocity.x = 0.0,
                Axis::Z => self.velocity.z = 0.0,
            }
        }

        if self.position.x.abs() > boundary {
            self.position.x = boundary.copysign(self.position.x);
            self.velocity.x = 0.0;
        }
        if self.position.z.abs() > boundary {
            self.position.z = boundary.copysign(self.position.z);
            self.velocity.z = 0.0;
        }
    }

    pub(crate) fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub(crate) fn jump(&mut self, impulse: f32) {
        if self.grounded {
            self.velocity.y += impulse;
        }
        self.grounded = false;
    }

    /// Unit facing direction on the XZ plane.
    pub(crate) fn forward(&self) -> Vec2 {
        Vec2::new(-self.yaw.sin(), -self.yaw.cos())
    }

    pub(crate) fn camera(&self, offset: f32) -> Vec3 {
        self.position + Vec3::Y * offset
    }

    /// Unit view direction composed from yaw and pitch.
    pub(crate) fn aim(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            -self.yaw.sin() * cos_pitch,
            sin_pitch,
            -self.yaw.cos() * cos_pitch,
        )
    }

    pub(crate) fn plane(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    pub(crate) fn snapshot(&self, camera_offset: f32) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            velocity: self.velocity,
            yaw: self.yaw,
            pitch: self.pitch,
            health: self.health,
            grounded: self.grounded,
            camera: self.camera(camera_offset),
        }
    }
}
