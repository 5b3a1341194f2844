use arena_shooter_core::{BulletId, BulletOwner, BulletSnapshot, WallBox};
use glam::Vec3;

#[derive(Clone, Debug)]
pub(crate) struct Bullet {
    pub(crate) id: BulletId,
    pub(crate) owner: BulletOwner,
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
    pub(crate) lifetime: u32,
}

impl Bullet {
    pub(crate) fn fire(
        id: BulletId,
        owner: BulletOwner,
        origin: Vec3,
        direction: Vec3,
        speed: f32,
        lifetime: u32,
    ) -> Self {
        Self {
            id,
            owner,
            position: origin,
            velocity: direction.normalize_or_zero() * speed,
            lifetime,
        }
    }

    /// Moves the bullet by `dt` seconds and spends one tick of its lifetime.
    pub(crate) fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    pub(crate) fn within(&self, point: Vec3, radius: f32) -> bool {
        self.position.distance(point) < radius
    }

    /// Coarse wall test against each wall's volumetric centre.
    pub(crate) fn hits_wall(&self, walls: &[WallBox], radius: f32) -> bool {
        walls.iter().any(|wall| self.within(wall.center3(), radius))
    }

    pub(crate) const fn expired(&self) -> bool {
        self.lifetime == 0
    }

    pub(crate) fn snapshot(&self) -> BulletSnapshot {
        BulletSnapshot {
            id: self.id,
            owner: self.owner,
            position: self.position,
            velocity: self.velocity,
            lifetime: self.lifetime,
        }
    }
}
