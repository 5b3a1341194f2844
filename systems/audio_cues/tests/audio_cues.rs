use std::time::Duration;

use arena_shooter_core::{
    BulletId, BulletOwner, BulletRemoval, EnemyId, Event, SoundCue, SpawnPointId,
};
use arena_shooter_system_audio_cues::AudioCues;
use glam::Vec3;

#[test]
fn combat_events_map_onto_cues() {
    let mut audio = AudioCues::new(3);
    let enemy = EnemyId::new(0);
    let events = [
        Event::PlayerFired {
            bullet: BulletId::new(0),
        },
        Event::EnemySpawned {
            enemy,
            spawn_point: SpawnPointId::new(0),
            position: Vec3::new(3.0, 0.8, 0.0),
        },
        Event::EnemyHit {
            enemy,
            remaining_health: 2,
        },
        Event::BulletRemoved {
            bullet: BulletId::new(0),
            owner: BulletOwner::Player,
            reason: BulletRemoval::HitEntity,
        },
        Event::EnemyKilled { enemy },
        Event::PlayerDamaged {
            remaining_health: 90,
        },
        Event::SpawnPointDestroyed {
            spawn_point: SpawnPointId::new(0),
        },
    ];

    let mut cues = Vec::new();
    audio.handle(&events, &mut cues);

    assert_eq!(
        cues,
        vec![
            SoundCue::Shoot,
            SoundCue::Growl,
            SoundCue::Hit,
            SoundCue::Death,
            SoundCue::PlayerHit,
            SoundCue::SpawnDestroyed,
        ]
    );
}

#[test]
fn killed_enemies_release_their_growl_throttle() {
    let mut audio = AudioCues::new(8);
    let enemy = EnemyId::new(2);
    let mut cues = Vec::new();

    let mut millis = 0;
    while audio.tracked_enemies() == 0 {
        millis += 50;
        audio.handle(
            &[
                Event::TimeAdvanced {
                    dt: Duration::from_millis(50),
                    now: Duration::from_millis(millis),
                },
                Event::EnemyEngaging { enemy },
            ],
            &mut cues,
        );
        assert!(millis < 600_000, "no growl was ever rolled");
    }
    assert_eq!(cues, vec![SoundCue::Growl]);

    audio.handle(&[Event::EnemyKilled { enemy }], &mut cues);
    assert_eq!(audio.tracked_enemies(), 0);
}
