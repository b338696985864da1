//! End-to-end behaviour of the rule engine, particles, and levels

use hulu_brawl::components::{LifeFeatureComponent, PhysicsComponent, TransformComponent};
use hulu_brawl::config::GameConfig;
use hulu_brawl::entity::{Entity, EntityKind};
use hulu_brawl::game::spawn::{SpawnPolicy, sample_spawn_position};
use hulu_brawl::game::{GameRules, LevelDirector, SkillCooldown, prefabs, seeded_rng};
use hulu_brawl::input::{InputSnapshot, InputState, Key};
use hulu_brawl::math::Vector2;
use hulu_brawl::particles::{ParticleConfig, ParticleSystem};

const DT: f32 = 1.0 / 60.0;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_friction_decays_velocity_geometrically() {
    let mut rules = GameRules::new(GameConfig::default());
    let id = rules.registry_mut().add(
        Entity::new(EntityKind::Neutral)
            .with(TransformComponent::new(Vector2::new(800.0, 600.0)))
            .with(PhysicsComponent::new(0.9).with_velocity(Vector2::new(100.0, 0.0))),
    );
    let mut rng = seeded_rng(1);

    for _ in 0..3 {
        rules.tick(DT, &InputSnapshot::empty(), &mut rng);
    }

    let velocity = rules.registry().get(id).and_then(Entity::velocity).unwrap();
    assert!(approx(velocity.x, 72.9), "velocity after three ticks: {:?}", velocity);
    assert_eq!(velocity.y, 0.0);

    // Strictly decreasing until the snap to zero, then zero for good
    let mut previous = velocity.x;
    let mut ticks = 3;
    while previous > 0.0 {
        assert!(ticks < 1000, "velocity never snapped to zero");
        rules.tick(DT, &InputSnapshot::empty(), &mut rng);
        ticks += 1;
        let speed = rules.registry().get(id).and_then(Entity::velocity).unwrap().length();
        assert!(speed < previous, "tick {}: {} did not drop below {}", ticks, speed, previous);
        previous = speed;
    }

    for _ in 0..30 {
        rules.tick(DT, &InputSnapshot::empty(), &mut rng);
        let velocity = rules.registry().get(id).and_then(Entity::velocity).unwrap();
        assert_eq!(velocity, Vector2::ZERO);
    }
}

#[test]
fn test_health_never_goes_negative() {
    let mut life = LifeFeatureComponent::new(100);
    let result = life.take_damage(250);

    assert_eq!(life.health(), 0);
    assert!(result.is_fatal);
    assert!(!life.is_alive());

    life.take_damage(10);
    assert_eq!(life.health(), 0);
}

#[test]
fn test_cooldown_percentage_rules() {
    let mut cooldown = SkillCooldown::new(1.0);
    assert_eq!(cooldown.percentage(), 0.0);

    cooldown.advance(0.25);
    assert!(approx(cooldown.percentage(), 0.25));

    // Overshooting clamps at one
    cooldown.advance(5.0);
    assert_eq!(cooldown.percentage(), 1.0);

    assert!(cooldown.try_fire());
    assert_eq!(cooldown.percentage(), 0.0);
}

#[test]
fn test_skill_fires_two_bolts_and_resets_cooldown() {
    let mut rules = GameRules::new(GameConfig::default());
    rules.spawn_player(Vector2::new(800.0, 600.0));
    let mut rng = seeded_rng(5);

    // Charge the skill fully without pressing anything
    for _ in 0..70 {
        rules.tick(DT, &InputSnapshot::empty(), &mut rng);
    }
    assert_eq!(rules.skill_cooldown_percentage(), 1.0);

    let mut input = InputState::new();
    input.key_down(Key::Skill);
    let outcome = rules.tick(DT, &input.snapshot(), &mut rng);

    assert!(outcome.skill_fired);
    assert_eq!(rules.skill_cooldown_percentage(), 0.0);
    assert_eq!(
        rules.registry().count_active(|e| e.kind() == EntityKind::PlayerSkill),
        2
    );
}

#[test]
fn test_explosion_burst_lifecycle() {
    let mut rng = seeded_rng(11);
    let config = ParticleConfig::explosion();
    let mut explosion = ParticleSystem::new(config, Vector2::new(800.0, 600.0), &mut rng);

    assert_eq!(explosion.particle_count(), 0);
    assert_eq!(explosion.burst(180, &mut rng), 180);
    assert_eq!(explosion.particle_count(), 180);

    // Nothing outlives the longest sampled life
    let mut elapsed = 0.0;
    while elapsed < config.max_life() + 0.05 {
        explosion.update(DT, &mut rng);
        elapsed += DT;
    }
    assert!(explosion.is_empty());
}

#[test]
fn test_enemies_died_only_when_all_six_are_gone() {
    let config = GameConfig::default();
    let mut rules = GameRules::new(config.clone());
    let soldiers: Vec<_> = (0..6)
        .map(|i| {
            rules.registry_mut().add(prefabs::enemy_soldier(
                &config,
                Vector2::new(100.0 + i as f32 * 50.0, 100.0),
                Vector2::ZERO,
            ))
        })
        .collect();

    for id in &soldiers[..5] {
        if let Some(soldier) = rules.registry_mut().get_mut(*id) {
            soldier.deactivate();
        }
    }
    assert!(!rules.check_enemies_died());

    if let Some(soldier) = rules.registry_mut().get_mut(soldiers[5]) {
        soldier.deactivate();
    }
    assert!(rules.check_enemies_died());
}

#[test]
fn test_level_two_king_volley_follows_first_update() {
    let config = GameConfig::default();
    let mut rules = GameRules::new(config.clone());
    rules.spawn_player(Vector2::new(800.0, 600.0));
    let mut rng = seeded_rng(21);

    let mut levels = LevelDirector::new();
    assert!(rules.check_enemies_died());
    assert_eq!(levels.advance(), 2);
    levels.spawn_wave(&mut rules, &mut rng);

    // Scheduled, not yet live
    assert_eq!(rules.registry().pending().len(), 1);
    assert_eq!(rules.registry().count_active(|e| e.kind() == EntityKind::EnemyKing), 0);

    rules.tick(DT, &InputSnapshot::empty(), &mut rng);
    assert_eq!(rules.registry().count_active(|e| e.kind() == EntityKind::EnemyKing), 1);
    assert_eq!(
        rules.registry().count_active(|e| e.kind() == EntityKind::EnemySkill),
        config.king_weapon.volley_size as usize
    );
}

#[test]
fn test_spawn_placement_respects_distance_or_falls_back() {
    let player = Vector2::new(800.0, 600.0);
    let policy = SpawnPolicy {
        min_distance: 400.0,
        max_attempts: 200,
        width: 1600.0,
        height: 1200.0,
    };

    for seed in 0..50 {
        let mut rng = seeded_rng(seed);
        let placement = sample_spawn_position(&mut rng, player, &policy);
        assert!(placement.position.x >= 0.0 && placement.position.x <= 1600.0);
        assert!(placement.position.y >= 0.0 && placement.position.y <= 1200.0);
        if !placement.fallback {
            assert!(placement.position.distance(player) >= 400.0);
        }
    }

    // Unreachable distance: every draw fails and the last one is kept
    let impossible = SpawnPolicy {
        min_distance: 5000.0,
        max_attempts: 50,
        ..policy
    };
    let placement = sample_spawn_position(&mut seeded_rng(3), player, &impossible);
    assert!(placement.fallback);
    assert_eq!(placement.attempts, 50);
}

#[test]
fn test_bundled_config_matches_defaults() {
    let loaded = GameConfig::load_from_file("assets/config/game.json").unwrap();
    assert_eq!(loaded, GameConfig::default());
}
