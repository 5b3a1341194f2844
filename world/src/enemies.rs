use std::time::Duration;

use arena_shooter_core::{EnemyConfig, EnemyId, EnemySnapshot, WallBox};
use glam::{Vec2, Vec3};

use crate::collision;

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) position: Vec3,
    pub(crate) facing: f32,
    pub(crate) health: u32,
    pub(crate) last_fired_at: Duration,
}

/// What an enemy decided to do with the player during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct EnemyIntent {
    pub(crate) engaging: bool,
    pub(crate) clear_shot: bool,
}

impl Enemy {
    pub(crate) fn spawn(id: EnemyId, position: Vec3, health: u32, now: Duration) -> Self {
        Self {
            id,
            position,
            facing: 0.0,
            health,
            last_fired_at: now,
        }
    }

    /// Chases, turns toward and sights the player on the XZ plane.
    ///
    /// A step that would overlap any wall is discarded whole.
    pub(crate) fn pursue(
        &mut self,
        target: Vec2,
        dt: f32,
        config: &EnemyConfig,
        walls: &[WallBox],
    ) -> EnemyIntent {
        let distance = self.plane().distance(target);

        if distance > config.stop_distance {
            let direction = (target - self.plane()).normalize_or_zero();
            let candidate = self.plane() + direction * config.speed * dt;
            if !collision::overlaps_any(candidate, config.radius, walls) {
                self.position.x = candidate.x;
                self.position.z = candidate.y;
            }
        }

        let toward = target - self.plane();
        self.facing = toward.x.atan2(toward.y);

        let engaging = distance < config.engage_range;
        let clear_shot = engaging && collision::has_line_of_sight(self.plane(), target, walls);
        EnemyIntent {
            engaging,
            clear_shot,
        }
    }

    pub(crate) fn ready_to_fire(&self, now: Duration, cooldown: Duration) -> bool {
        now.saturating_sub(self.last_fired_at) >= cooldown
    }

    pub(crate) fn plane(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            position: self.position,
            facing: self.facing,
            health: self.health,
            last_fired_at: self.last_fired_at,
        }
    }
}
