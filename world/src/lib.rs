#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the arena shooter.

mod collision;
mod enemies;
mod player;
mod projectiles;

use std::time::Duration;

use arena_shooter_core::{
    core_intensity, BulletId, BulletOwner, BulletRemoval, Command, EnemyId, Event, GameConfig,
    GameStatus, LevelGeometry, SpawnPointId, WallBox,
};
use glam::{Vec2, Vec3};
use tracing::{debug, info};

use enemies::Enemy;
use player::Player;
use projectiles::Bullet;

/// Represents the authoritative arena shooter world state.
///
/// Every mutation flows through [`apply`]; adapters and systems observe the
/// world exclusively through [`query`].
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    status: GameStatus,
    level: Option<LevelGeometry>,
    player: Player,
    enemies: Vec<Enemy>,
    spawn_points: Vec<SpawnPoint>,
    bullets: Vec<Bullet>,
    score: u32,
    now: Duration,
    next_enemy_id: u32,
    next_bullet_id: u32,
}

impl World {
    /// Creates an empty world that waits for a level to be loaded.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let player = Player::spawn(
            Vec3::new(0.0, config.player.ground_height, 0.0),
            config.player.max_health,
        );
        Self {
            config,
            status: GameStatus::Menu,
            level: None,
            player,
            enemies: Vec::new(),
            spawn_points: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            now: Duration::ZERO,
            next_enemy_id: 0,
            next_bullet_id: 0,
        }
    }

    fn walls(&self) -> &[WallBox] {
        self.level
            .as_ref()
            .map_or(&[][..], |level| level.walls.as_slice())
    }

    fn boundary(&self) -> f32 {
        self.level.as_ref().map_or_else(
            || self.config.transform().boundary(),
            |level| level.transform.boundary(),
        )
    }

    fn allocate_bullet_id(&mut self) -> BulletId {
        let id = BulletId::new(self.next_bullet_id);
        self.next_bullet_id = self.next_bullet_id.wrapping_add(1);
        id
    }

    fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        id
    }

    fn load(&mut self, geometry: LevelGeometry) {
        let spawn = &self.config.spawn;
        self.spawn_points = geometry
            .spawn_points
            .iter()
            .enumerate()
            .map(|(index, position)| SpawnPoint {
                id: SpawnPointId::new(u32::try_from(index).unwrap_or(u32::MAX)),
                position: Vec3::new(position.x, 0.0, position.y),
                health: spawn.max_health,
                next_spawn_at: spawn.first_emission(),
                enemies_spawned: 0,
            })
            .collect();
        self.player = Player::spawn(geometry.player_start, self.config.player.max_health);
        self.enemies.clear();
        self.bullets.clear();
        self.score = 0;
        self.now = Duration::ZERO;
        self.next_enemy_id = 0;
        self.next_bullet_id = 0;
        self.level = Some(geometry);
    }

    fn transition(&mut self, status: GameStatus, out_events: &mut Vec<Event>) {
        if self.status == status {
            return;
        }
        info!(from = ?self.status, to = ?status, score = self.score, "run status changed");
        self.status = status;
        out_events.push(Event::StatusChanged { status });
    }

    fn check_victory(&mut self, out_events: &mut Vec<Event>) {
        if self.status != GameStatus::Running {
            return;
        }
        let active = self.spawn_points.iter().any(SpawnPoint::is_active);
        if !active && self.enemies.is_empty() {
            self.transition(GameStatus::Victory, out_events);
        }
    }

    fn add_score(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        self.score = self.score.saturating_add(amount);
        out_events.push(Event::ScoreChanged { score: self.score });
    }

    fn fire_player_weapon(&mut self, out_events: &mut Vec<Event>) {
        let cooldown = self.config.weapon.cooldown();
        if let Some(last) = self.player.last_fired {
            if self.now.saturating_sub(last) < cooldown {
                return;
            }
        }
        self.player.last_fired = Some(self.now);

        let id = self.allocate_bullet_id();
        let weapon = &self.config.weapon;
        let bullet = Bullet::fire(
            id,
            BulletOwner::Player,
            self.player.camera(self.config.player.camera_offset),
            self.player.aim(),
            weapon.bullet_speed,
            weapon.bullet_lifetime,
        );
        self.bullets.push(bullet);
        out_events.push(Event::PlayerFired { bullet: id });
    }

    fn spawn_enemy(
        &mut self,
        spawn_point: SpawnPointId,
        offset: Vec2,
        next_spawn_at: Duration,
        out_events: &mut Vec<Event>,
    ) {
        if self.enemies.len() >= self.config.enemy.max_alive {
            return;
        }
        let Some(origin) = self
            .spawn_points
            .iter()
            .find(|spawn| spawn.id == spawn_point && spawn.is_active())
            .map(|spawn| spawn.position)
        else {
            return;
        };

        let id = self.allocate_enemy_id();
        let position = Vec3::new(
            origin.x + offset.x,
            self.config.player.ground_height,
            origin.z + offset.y,
        );
        self.enemies.push(Enemy::spawn(
            id,
            position,
            self.config.enemy.max_health,
            self.now,
        ));
        if let Some(spawn) = self
            .spawn_points
            .iter_mut()
            .find(|spawn| spawn.id == spawn_point)
        {
            spawn.next_spawn_at = next_spawn_at;
            spawn.enemies_spawned = spawn.enemies_spawned.saturating_add(1);
        }
        debug!(enemy = id.get(), spawn_point = spawn_point.get(), "enemy spawned");
        out_events.push(Event::EnemySpawned {
            enemy: id,
            spawn_point,
            position,
        });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.now = self.now.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt, now: self.now });
        let seconds = dt.as_secs_f32();

        self.update_player(seconds, out_events);
        self.update_enemies(seconds, out_events);
        self.update_bullets(seconds, out_events);
    }

    fn update_player(&mut self, seconds: f32, out_events: &mut Vec<Event>) {
        let boundary = self.boundary();
        let walls = self
            .level
            .as_ref()
            .map_or(&[][..], |level| level.walls.as_slice());
        self.player
            .integrate(seconds, &self.config.player, walls, boundary);
        if self.player.input.any() {
            out_events.push(Event::PlayerWalked);
        }
    }

    fn update_enemies(&mut self, seconds: f32, out_events: &mut Vec<Event>) {
        let target = self.player.plane();
        let cooldown = self.config.enemy.fire_cooldown();
        let mut shooters = Vec::new();

        {
            let walls = self
                .level
                .as_ref()
                .map_or(&[][..], |level| level.walls.as_slice());
            for enemy in &mut self.enemies {
                let intent = enemy.pursue(target, seconds, &self.config.enemy, walls);
                if intent.engaging {
                    out_events.push(Event::EnemyEngaging { enemy: enemy.id });
                }
                if intent.clear_shot && enemy.ready_to_fire(self.now, cooldown) {
                    enemy.last_fired_at = self.now;
                    shooters.push((enemy.id, enemy.position));
                }
            }
        }

        for (enemy, position) in shooters {
            let id = self.allocate_bullet_id();
            let muzzle = position + Vec3::Y * self.config.enemy.muzzle_height;
            let bullet = Bullet::fire(
                id,
                BulletOwner::Enemy,
                muzzle,
                self.player.position - muzzle,
                self.config.enemy.bullet_speed,
                self.config.enemy.bullet_lifetime,
            );
            self.bullets.push(bullet);
            out_events.push(Event::EnemyFired { enemy, bullet: id });
        }
    }

    fn update_bullets(&mut self, seconds: f32, out_events: &mut Vec<Event>) {
        let mut pending = std::mem::take(&mut self.bullets).into_iter();
        let mut survivors = Vec::with_capacity(pending.len());

        while let Some(mut bullet) = pending.next() {
            bullet.advance(seconds);
            match self.resolve_bullet(&bullet, out_events) {
                Some(reason) => out_events.push(Event::BulletRemoved {
                    bullet: bullet.id,
                    owner: bullet.owner,
                    reason,
                }),
                None => survivors.push(bullet),
            }
            if self.status.is_terminal() {
                survivors.extend(pending.by_ref());
                break;
            }
        }

        self.bullets = survivors;
    }

    /// Applies the first collision the bullet makes, returning why it must be removed.
    fn resolve_bullet(
        &mut self,
        bullet: &Bullet,
        out_events: &mut Vec<Event>,
    ) -> Option<BulletRemoval> {
        match bullet.owner {
            BulletOwner::Player => {
                let radius = self.config.collision.bullet_enemy_radius;
                if let Some(index) = self
                    .enemies
                    .iter()
                    .position(|enemy| bullet.within(enemy.position, radius))
                {
                    self.damage_enemy(index, out_events);
                    return Some(BulletRemoval::HitEntity);
                }
                let radius = self.config.collision.bullet_spawn_radius;
                if let Some(index) = self
                    .spawn_points
                    .iter()
                    .position(|spawn| spawn.is_active() && bullet.within(spawn.position, radius))
                {
                    self.damage_spawn_point(index, out_events);
                    return Some(BulletRemoval::HitEntity);
                }
            }
            BulletOwner::Enemy => {
                let radius = self.config.collision.bullet_player_radius;
                if bullet.within(self.player.position, radius) {
                    self.damage_player(out_events);
                    return Some(BulletRemoval::HitEntity);
                }
            }
        }

        if bullet.hits_wall(self.walls(), self.config.collision.bullet_wall_radius) {
            return Some(BulletRemoval::HitWall);
        }
        bullet.expired().then_some(BulletRemoval::Expired)
    }

    fn damage_enemy(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let Some(enemy) = self.enemies.get_mut(index) else {
            return;
        };
        enemy.health = enemy.health.saturating_sub(1);
        let (id, remaining_health) = (enemy.id, enemy.health);
        out_events.push(Event::EnemyHit {
            enemy: id,
            remaining_health,
        });
        if remaining_health > 0 {
            return;
        }

        let _ = self.enemies.remove(index);
        out_events.push(Event::EnemyKilled { enemy: id });
        self.add_score(self.config.enemy.score, out_events);
        self.check_victory(out_events);
    }

    fn damage_spawn_point(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let max_health = self.config.spawn.max_health;
        let Some(spawn) = self.spawn_points.get_mut(index) else {
            return;
        };
        if !spawn.is_active() {
            return;
        }
        spawn.health = spawn.health.saturating_sub(1);
        let (id, remaining_health) = (spawn.id, spawn.health);
        out_events.push(Event::SpawnPointDamaged {
            spawn_point: id,
            remaining_health,
            core_intensity: core_intensity(remaining_health, max_health),
        });
        if remaining_health > 0 {
            return;
        }

        info!(spawn_point = id.get(), "spawn point destroyed");
        out_events.push(Event::SpawnPointDestroyed { spawn_point: id });
        self.add_score(self.config.spawn.score, out_events);
        self.check_victory(out_events);
    }

    fn damage_player(&mut self, out_events: &mut Vec<Event>) {
        self.player.health = self.player.health.saturating_sub(self.config.enemy.damage);
        out_events.push(Event::PlayerDamaged {
            remaining_health: self.player.health,
        });
        if self.player.health == 0 {
            self.transition(GameStatus::GameOver, out_events);
        }
    }
}

/// Destructible structure that periodically emits enemies.
#[derive(Clone, Debug)]
struct SpawnPoint {
    id: SpawnPointId,
    position: Vec3,
    health: u32,
    next_spawn_at: Duration,
    enemies_spawned: u32,
}

impl SpawnPoint {
    const fn is_active(&self) -> bool {
        self.health > 0
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that do not fit the current run status, or that name entities no
/// longer alive, are ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { geometry } => {
            let walls = geometry.walls.len();
            let spawn_points = geometry.spawn_points.len();
            world.load(geometry);
            out_events.push(Event::LevelLoaded {
                walls,
                spawn_points,
            });
            world.transition(GameStatus::Menu, out_events);
        }
        Command::StartRun => {
            if world.status == GameStatus::Menu && world.level.is_some() {
                world.transition(GameStatus::Running, out_events);
                world.check_victory(out_events);
            }
        }
        Command::Tick { dt } => {
            if world.status == GameStatus::Running {
                world.tick(dt, out_events);
            }
        }
        Command::SetMovement { input } => {
            world.player.input = input;
        }
        Command::Look {
            yaw_delta,
            pitch_delta,
        } => {
            if world.status == GameStatus::Running {
                world.player.look(yaw_delta, pitch_delta);
            }
        }
        Command::Jump => {
            if world.status == GameStatus::Running {
                world.player.jump(world.config.player.jump_impulse);
            }
        }
        Command::FireWeapon => {
            if world.status == GameStatus::Running {
                world.fire_player_weapon(out_events);
            }
        }
        Command::SpawnEnemy {
            spawn_point,
            offset,
            next_spawn_at,
        } => {
            if world.status == GameStatus::Running {
                world.spawn_enemy(spawn_point, offset, next_spawn_at, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use arena_shooter_core::{
        core_intensity, BulletSnapshot, EnemySnapshot, GameConfig, GameStatus, HudSnapshot,
        LevelGeometry, PlayerSnapshot, SpawnPointSnapshot, WallBox,
    };

    use super::World;

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Current run lifecycle status.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.status
    }

    /// Simulation clock, measured from the moment the level loaded.
    #[must_use]
    pub fn now(world: &World) -> Duration {
        world.now
    }

    /// Accumulated score.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Geometry of the loaded level, if any.
    #[must_use]
    pub fn level(world: &World) -> Option<&LevelGeometry> {
        world.level.as_ref()
    }

    /// Collidable wall boxes of the loaded level.
    #[must_use]
    pub fn walls(world: &World) -> &[WallBox] {
        world.walls()
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot(world.config.player.camera_offset)
    }

    /// Captures every living enemy in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> Vec<EnemySnapshot> {
        world.enemies.iter().map(super::Enemy::snapshot).collect()
    }

    /// Number of living enemies.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Captures every spawn point, destroyed ones included.
    #[must_use]
    pub fn spawn_points(world: &World) -> Vec<SpawnPointSnapshot> {
        let max_health = world.config.spawn.max_health;
        world
            .spawn_points
            .iter()
            .map(|spawn| SpawnPointSnapshot {
                id: spawn.id,
                position: spawn.position,
                health: spawn.health,
                core_intensity: core_intensity(spawn.health, max_health),
                next_spawn_at: spawn.next_spawn_at,
                enemies_spawned: spawn.enemies_spawned,
            })
            .collect()
    }

    /// Captures every projectile in flight.
    #[must_use]
    pub fn bullets(world: &World) -> Vec<BulletSnapshot> {
        world.bullets.iter().map(super::Bullet::snapshot).collect()
    }

    /// Values shown on the heads-up display.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        let total = world.spawn_points.len();
        let active = world
            .spawn_points
            .iter()
            .filter(|spawn| spawn.is_active())
            .count();
        HudSnapshot {
            health: world.player.health,
            score: world.score,
            spawn_points_destroyed: total - active,
            spawn_points_total: total,
            enemies_alive: world.enemies.len(),
            status: world.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_shooter_core::{GridTransform, LevelGrid, MovementInput};
    use std::f32::consts::FRAC_PI_2;

    const STEP: Duration = Duration::from_millis(20);

    fn geometry(walls: Vec<WallBox>, spawn_points: Vec<Vec2>) -> LevelGeometry {
        LevelGeometry {
            grid: LevelGrid::new(50),
            transform: GridTransform::new(50, 2.0),
            walls,
            player_start: Vec3::new(0.0, 0.8, 0.0),
            spawn_points,
            lamps: Vec::new(),
            ceiling_height: 4.0,
        }
    }

    fn running(geometry: LevelGeometry) -> World {
        let mut world = World::new(GameConfig::default());
        let mut events = Vec::new();
        apply(&mut world, Command::LoadLevel { geometry }, &mut events);
        apply(&mut world, Command::StartRun, &mut events);
        world
    }

    #[test]
    fn commands_are_ignored_before_the_run_starts() {
        let mut world = World::new(GameConfig::default());
        let mut events = Vec::new();
        apply(&mut world, Command::StartRun, &mut events);
        apply(&mut world, Command::FireWeapon, &mut events);
        apply(&mut world, Command::Tick { dt: STEP }, &mut events);

        assert!(events.is_empty());
        assert_eq!(query::status(&world), GameStatus::Menu);
    }

    #[test]
    fn player_is_pushed_back_to_the_wall_face() {
        let wall = WallBox::centered(Vec2::ZERO, 1.0, 4.0);
        let mut level = geometry(vec![wall], vec![Vec2::new(40.0, 40.0)]);
        level.player_start = Vec3::new(-1.4, 0.8, 0.0);
        let mut world = running(level);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Look {
                yaw_delta: -FRAC_PI_2,
                pitch_delta: 0.0,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SetMovement {
                input: MovementInput {
                    forward: true,
                    ..MovementInput::default()
                },
            },
            &mut events,
        );
        apply(&mut world, Command::Tick { dt: STEP }, &mut events);

        let player = query::player(&world);
        let expected = wall.half_extents().x + 0.5;
        assert!(
            (player.position.x.abs() - expected).abs() < 1e-5,
            "player ended at {}",
            player.position.x
        );
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn weapon_respects_its_cooldown() {
        let mut world = running(geometry(Vec::new(), vec![Vec2::new(40.0, 40.0)]));
        let mut events = Vec::new();

        apply(&mut world, Command::FireWeapon, &mut events);
        apply(&mut world, Command::FireWeapon, &mut events);
        for _ in 0..9 {
            apply(&mut world, Command::Tick { dt: STEP }, &mut events);
        }
        apply(&mut world, Command::FireWeapon, &mut events);
        apply(&mut world, Command::Tick { dt: STEP }, &mut events);
        apply(&mut world, Command::FireWeapon, &mut events);

        let shots = events
            .iter()
            .filter(|event| matches!(event, Event::PlayerFired { .. }))
            .count();
        assert_eq!(shots, 2);
    }

    #[test]
    fn spawn_requests_for_unknown_spawn_points_are_ignored() {
        let mut world = running(geometry(Vec::new(), vec![Vec2::new(10.0, 0.0)]));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnEnemy {
                spawn_point: SpawnPointId::new(7),
                offset: Vec2::ZERO,
                next_spawn_at: Duration::from_secs(5),
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::enemy_count(&world), 0);
    }

    #[test]
    fn spawning_stops_at_the_enemy_cap() {
        let mut config = GameConfig::default();
        config.enemy.max_alive = 2;
        let mut world = World::new(config);
        let mut events = Vec::new();
        let level = geometry(Vec::new(), vec![Vec2::new(30.0, 30.0)]);
        apply(&mut world, Command::LoadLevel { geometry: level }, &mut events);
        apply(&mut world, Command::StartRun, &mut events);

        for _ in 0..3 {
            apply(
                &mut world,
                Command::SpawnEnemy {
                    spawn_point: SpawnPointId::new(0),
                    offset: Vec2::new(3.0, 0.0),
                    next_spawn_at: Duration::from_secs(4),
                },
                &mut events,
            );
        }

        assert_eq!(query::enemy_count(&world), 2);
        let spawn = query::spawn_points(&world)[0];
        assert_eq!(spawn.enemies_spawned, 2);
        assert_eq!(spawn.next_spawn_at, Duration::from_secs(4));
    }

    /// Final spawn point on its last hit point while a lethal enemy round reaches
    /// the player in the same tick.
    fn contested_finish(player_round_first: bool) -> World {
        let mut config = GameConfig::default();
        config.player.max_health = 10;
        let mut world = World::new(config);
        let mut events = Vec::new();
        let level = geometry(Vec::new(), vec![Vec2::new(10.0, 0.0)]);
        apply(&mut world, Command::LoadLevel { geometry: level }, &mut events);
        apply(&mut world, Command::StartRun, &mut events);
        world.spawn_points[0].health = 1;

        let player_round = Bullet::fire(
            BulletId::new(0),
            BulletOwner::Player,
            Vec3::new(10.0, 0.5, 0.0),
            Vec3::ZERO,
            0.0,
            100,
        );
        let enemy_round = Bullet::fire(
            BulletId::new(1),
            BulletOwner::Enemy,
            world.player.position,
            Vec3::ZERO,
            0.0,
            100,
        );
        world.bullets = if player_round_first {
            vec![player_round, enemy_round]
        } else {
            vec![enemy_round, player_round]
        };
        world
    }

    fn terminal_statuses(events: &[Event]) -> Vec<GameStatus> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::StatusChanged { status } if status.is_terminal() => Some(*status),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn first_resolved_hit_decides_a_contested_tick() {
        for (player_round_first, expected) in
            [(true, GameStatus::Victory), (false, GameStatus::GameOver)]
        {
            let mut world = contested_finish(player_round_first);
            let mut events = Vec::new();
            apply(&mut world, Command::Tick { dt: STEP }, &mut events);

            assert_eq!(terminal_statuses(&events), vec![expected]);
            assert_eq!(query::status(&world), expected);
            assert_eq!(world.bullets.len(), 1, "the losing round stays unresolved");
            match expected {
                GameStatus::Victory => {
                    assert_eq!(query::hud(&world).health, 10);
                    assert_eq!(query::score(&world), 500);
                }
                _ => {
                    assert_eq!(query::hud(&world).health, 0);
                    assert_eq!(query::spawn_points(&world)[0].health, 1);
                }
            }

            let hud = query::hud(&world);
            events.clear();
            for _ in 0..50 {
                apply(&mut world, Command::Tick { dt: STEP }, &mut events);
                apply(&mut world, Command::FireWeapon, &mut events);
            }
            assert!(events.is_empty(), "terminal runs must not advance");
            assert_eq!(query::hud(&world), hud);
        }
    }

    #[test]
    fn enemy_bullets_hurt_until_game_over() {
        let mut world = running(geometry(Vec::new(), vec![Vec2::new(12.0, 0.0)]));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnEnemy {
                spawn_point: SpawnPointId::new(0),
                offset: Vec2::new(-2.0, 0.0),
                next_spawn_at: Duration::from_secs(600),
            },
            &mut events,
        );

        let step = Duration::from_millis(50);
        for _ in 0..1_000 {
            apply(&mut world, Command::Tick { dt: step }, &mut events);
        }

        let hud = query::hud(&world);
        assert_eq!(hud.health, 0);
        assert_eq!(hud.status, GameStatus::GameOver);
        let hits = events
            .iter()
            .filter(|event| matches!(event, Event::PlayerDamaged { .. }))
            .count();
        assert_eq!(hits, 10);
        let endings: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                Event::StatusChanged { status } if status.is_terminal() => Some(*status),
                _ => None,
            })
            .collect();
        assert_eq!(endings, vec![GameStatus::GameOver]);
    }

    #[test]
    fn levels_without_spawn_points_are_won_on_start() {
        let mut world = World::new(GameConfig::default());
        let mut events = Vec::new();
        let level = geometry(Vec::new(), Vec::new());
        apply(&mut world, Command::LoadLevel { geometry: level }, &mut events);
        events.clear();
        apply(&mut world, Command::StartRun, &mut events);

        assert_eq!(
            events,
            vec![
                Event::StatusChanged {
                    status: GameStatus::Running
                },
                Event::StatusChanged {
                    status: GameStatus::Victory
                },
            ]
        );
        apply(&mut world, Command::StartRun, &mut events);
        assert_eq!(events.len(), 2);
        assert_eq!(query::status(&world), GameStatus::Victory);
    }

    #[test]
    fn reloading_resets_the_run() {
        let mut world = running(geometry(Vec::new(), vec![Vec2::new(10.0, 0.0)]));
        let mut events = Vec::new();
        apply(&mut world, Command::FireWeapon, &mut events);
        apply(&mut world, Command::Tick { dt: STEP }, &mut events);
        events.clear();

        apply(
            &mut world,
            Command::LoadLevel {
                geometry: geometry(Vec::new(), Vec::new()),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::LevelLoaded {
                    walls: 0,
                    spawn_points: 0
                },
                Event::StatusChanged {
                    status: GameStatus::Menu
                },
            ]
        );
        assert!(query::bullets(&world).is_empty());
        assert_eq!(query::now(&world), Duration::ZERO);
    }
}
