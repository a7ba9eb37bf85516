use hecs::World;

use astrodefense_core::catalog::{HostileKind, WeaponKind};
use astrodefense_core::commands::PlayerCommand;
use astrodefense_core::components::{Defender, Hostile, Projectile};
use astrodefense_core::enums::{GamePhase, TransitionKind};
use astrodefense_core::events::GameEvent;
use astrodefense_core::state::GameStateSnapshot;
use astrodefense_core::types::{Position, Velocity};
use astrodefense_waves::{ControllerConfig, WaveController};

use crate::config::{ConfigError, LoadoutSlot, SimConfig};
use crate::engine::SimulationEngine;
use crate::systems::targeting::{self, FireEvent};
use crate::systems::{combat, spatial};
use crate::world_setup;

/// Engine with wave 1 of level 1 on the field after one tick.
fn started_engine(seed: u64) -> (SimulationEngine, GameStateSnapshot) {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick();
    (engine, snap)
}

/// Move every hostile past the defended boundary.
fn teleport_all_past_boundary(engine: &mut SimulationEngine) {
    for (_entity, (pos, _hostile)) in engine
        .world_mut()
        .query_mut::<(&mut Position, &Hostile)>()
    {
        pos.x = -100.0;
    }
}

/// Park the first-spawned hostile at `at`, stationary and effectively unkillable.
/// Returns its kind.
fn park_first_hostile(engine: &mut SimulationEngine, at: Position, health: f64) -> HostileKind {
    let mut kind = None;
    for (_entity, (pos, vel, hostile)) in engine
        .world_mut()
        .query_mut::<(&mut Position, &mut Velocity, &mut Hostile)>()
    {
        if hostile.serial == 0 {
            *pos = at;
            *vel = Velocity::new(0.0, 0.0);
            hostile.health = health;
            kind = Some(hostile.kind);
        }
    }
    kind.expect("serial 0 hostile present")
}

fn defender_position(engine: &SimulationEngine, id: u32) -> Position {
    let mut query = engine.world().query::<(&Position, &Defender)>();
    let position = query
        .iter()
        .find(|(_, (_, d))| d.id == id)
        .map(|(_, (p, _))| *p);
    position.expect("defender present")
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let (mut engine_a, _) = started_engine(12345);
    let (mut engine_b, _) = started_engine(12345);

    for _ in 0..600 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let (_, snap_a) = started_engine(111);
    let (_, snap_b) = started_engine(222);

    let json_a = serde_json::to_string(&snap_a.hostiles).unwrap();
    let json_b = serde_json::to_string(&snap_b.hostiles).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should spawn different waves");
}

// ---- Lifecycle ----

#[test]
fn test_new_engine_is_idle_with_loadout() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick();

    assert_eq!(snap.state, GamePhase::Idle);
    assert_eq!(snap.time.tick, 0, "Idle ticks must not advance time");
    assert_eq!(snap.defenders.len(), 4);
    let weapons: Vec<WeaponKind> = snap.defenders.iter().map(|d| d.weapon).collect();
    assert_eq!(
        weapons,
        vec![
            WeaponKind::Rifle,
            WeaponKind::Plasma,
            WeaponKind::Flamethrower,
            WeaponKind::Railgun
        ]
    );
    assert!(snap.defenders.iter().all(|d| d.ready && d.health == 100.0));
    assert!(snap.hostiles.is_empty());
}

#[test]
fn test_start_game_spawns_first_wave() {
    let (_, snap) = started_engine(42);

    assert_eq!(snap.state, GamePhase::WaveActive);
    assert_eq!(snap.level, 1);
    assert_eq!(snap.wave, 1);
    assert_eq!(snap.hostiles.len(), 5);
    assert_eq!(snap.alive_hostiles, 5);
    assert_eq!(snap.target_score, 1350);
    assert_eq!(snap.time.tick, 1);
    assert!(snap.events.contains(&GameEvent::WaveStarted {
        level: 1,
        wave: 1,
        size: 5,
        target_score: 1350,
    }));

    for hostile in &snap.hostiles {
        let speed = hostile.kind.stats().speed;
        assert!((hostile.position.x - (1330.0 - speed)).abs() < 1e-9);
        assert!((50.0..=670.0).contains(&hostile.position.y));
        assert_eq!(hostile.health, hostile.max_health);
    }
}

#[test]
fn test_signal_game_over_stops_simulation() {
    let (mut engine, _) = started_engine(42);
    engine.signal_game_over();
    let snap = engine.tick();
    assert_eq!(snap.state, GamePhase::GameOver);
    assert!(snap.events.contains(&GameEvent::Announcement {
        text: "You didn't survive".into()
    }));

    let time = engine.time();
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time(), time);

    engine.restart_level();
    assert_eq!(engine.phase(), GamePhase::GameOver, "restart ignored after game over");

    engine.start_game();
    assert_eq!(engine.phase(), GamePhase::WaveActive);
    assert_eq!(engine.time().tick, 0);
    assert_eq!(engine.controller().score(), 0);
}

#[test]
fn test_invalid_delta_does_not_move_time() {
    let (mut engine, _) = started_engine(42);
    let time = engine.time();
    engine.advance(-1.0);
    engine.advance(f64::NAN);
    assert_eq!(engine.time().elapsed_ms, time.elapsed_ms);
}

#[test]
fn test_variable_delta_scales_motion() {
    let (mut engine, before) = started_engine(7);
    let after = engine.advance(2.0);

    for (a, b) in before.hostiles.iter().zip(&after.hostiles) {
        let expected = a.position.x - 2.0 * a.kind.stats().speed;
        assert!((b.position.x - expected).abs() < 1e-9);
    }
}

// ---- Pause ----

#[test]
fn test_pause_freezes_world_and_time() {
    let (mut engine, _) = started_engine(42);
    engine.queue_command(PlayerCommand::TogglePause);
    let paused = engine.tick();
    assert!(paused.paused);

    for _ in 0..30 {
        let snap = engine.tick();
        assert_eq!(snap.time, paused.time);
        assert_eq!(snap.hostiles, paused.hostiles);
    }
    assert_eq!(engine.controller().alive(), 5, "Pausing must not reset counters");
}

#[test]
fn test_toggle_pause_twice_is_identity() {
    let (mut engine, _) = started_engine(42);
    let before = engine.snapshot();

    engine.toggle_pause();
    engine.toggle_pause();
    let after = engine.snapshot();

    assert!(!after.paused);
    assert_eq!(
        serde_json::to_string(&before).unwrap(),
        serde_json::to_string(&after).unwrap()
    );
}

// ---- Input lock ----

#[test]
fn test_reposition_rejected_during_active_wave() {
    let (mut engine, _) = started_engine(42);
    let original = defender_position(&engine, 0);

    assert!(!engine.place_defender(0, Position::new(600.0, 400.0)));
    assert!(!engine.rotate_defender(0, 1.0));

    engine.queue_commands([
        PlayerCommand::PlaceDefender {
            id: 0,
            position: Position::new(600.0, 400.0),
        },
        PlayerCommand::RotateDefender { id: 0, angle: 1.0 },
    ]);
    let snap = engine.tick();
    assert_eq!(defender_position(&engine, 0), original);
    assert_eq!(snap.defenders[0].facing_angle, 0.0);
}

#[test]
fn test_reposition_accepted_while_paused() {
    let (mut engine, _) = started_engine(42);
    engine.toggle_pause();

    assert!(engine.place_defender(1, Position::new(640.0, 360.0)));
    assert_eq!(defender_position(&engine, 1), Position::new(640.0, 360.0));

    assert!(engine.rotate_defender(1, 0.75));
    let snap = engine.snapshot();
    let view = snap.defenders.iter().find(|d| d.id == 1).unwrap();
    assert_eq!(view.facing_angle, 0.75);
    assert_eq!(view.aim_angle, 0.75);
}

#[test]
fn test_placement_is_clamped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert!(engine.place_defender(2, Position::new(0.0, -500.0)));
    assert_eq!(defender_position(&engine, 2), Position::new(200.0, 20.0));

    assert!(engine.place_defender(2, Position::new(5000.0, 5000.0)));
    assert_eq!(defender_position(&engine, 2), Position::new(1260.0, 700.0));
}

#[test]
fn test_unknown_or_non_finite_reposition_is_noop() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert!(!engine.place_defender(99, Position::new(300.0, 300.0)));
    assert!(!engine.place_defender(0, Position::new(f64::NAN, 300.0)));
    assert!(!engine.rotate_defender(0, f64::INFINITY));
    assert_eq!(defender_position(&engine, 0), Position::new(200.0, 200.0));
}

#[test]
fn test_start_from_idle_keeps_placement() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.place_defender(0, Position::new(400.0, 400.0));
    engine.start_game();
    assert_eq!(defender_position(&engine, 0), Position::new(400.0, 400.0));

    // A second start is a full reset.
    engine.toggle_pause();
    engine.place_defender(0, Position::new(500.0, 500.0));
    engine.start_game();
    assert_eq!(defender_position(&engine, 0), Position::new(200.0, 200.0));
    assert!(!engine.paused());
}

// ---- Targeting ----

#[test]
fn test_firing_arc_boundary() {
    let mut world = World::new();
    let origin = Position::new(200.0, 300.0);
    let at = |degrees: f64, distance: f64| {
        let r = degrees.to_radians();
        Position::new(origin.x + distance * r.cos(), origin.y + distance * r.sin())
    };
    world_setup::spawn_hostile(&mut world, HostileKind::Runner, at(11.0, 30.0), 0);
    world_setup::spawn_hostile(&mut world, HostileKind::Runner, at(5.0, 49.0), 1);
    world_setup::spawn_hostile(&mut world, HostileKind::Runner, at(0.0, 51.0), 2);
    let hostiles = spatial::collect_hostiles(&world);

    let rifle = WeaponKind::Rifle.stats();
    let target = targeting::select_target(&origin, 0.0, rifle, &hostiles).unwrap();
    assert!((target.distance - 49.0).abs() < 1e-9);

    // Rotated toward the 11 degree hostile it becomes the nearest valid one.
    let target = targeting::select_target(&origin, 11f64.to_radians(), rifle, &hostiles).unwrap();
    assert!((target.distance - 30.0).abs() < 1e-9);

    // Facing away: nothing inside the arc.
    assert!(targeting::select_target(&origin, std::f64::consts::PI, rifle, &hostiles).is_none());
}

#[test]
fn test_equidistant_targets_pick_earliest_spawned() {
    let mut world = World::new();
    let origin = Position::new(200.0, 300.0);
    let r = 5f64.to_radians();
    let above = Position::new(origin.x + 40.0 * r.cos(), origin.y - 40.0 * r.sin());
    let below = Position::new(origin.x + 40.0 * r.cos(), origin.y + 40.0 * r.sin());
    // Entity creation order is the reverse of serial order.
    world_setup::spawn_hostile(&mut world, HostileKind::Runner, below, 1);
    let first = world_setup::spawn_hostile(&mut world, HostileKind::Runner, above, 0);
    let hostiles = spatial::collect_hostiles(&world);

    let target = targeting::select_target(&origin, 0.0, WeaponKind::Rifle.stats(), &hostiles).unwrap();
    assert_eq!(target.entity, first);
    assert_eq!(target.position, above);
}

#[test]
fn test_overlapping_hostiles_first_serial_takes_hit() {
    let mut world = World::new();
    let mut controller = WaveController::new(ControllerConfig::default());
    let mut events = Vec::new();
    let mut despawn = Vec::new();
    let spot = Position::new(10.0, 0.0);
    let second = world_setup::spawn_hostile(&mut world, HostileKind::Tank, spot, 1);
    let first = world_setup::spawn_hostile(&mut world, HostileKind::Tank, spot, 0);
    world_setup::spawn_projectile(
        &mut world,
        &FireEvent {
            defender: 0,
            weapon: WeaponKind::Rifle,
            origin: Position::new(0.0, 0.0),
            target: spot,
        },
        2,
    );

    combat::run(&mut world, 1.0, &mut controller, &mut events, &mut despawn);

    let tank = HostileKind::Tank.stats();
    let expected = tank.base_health - WeaponKind::Rifle.stats().damage * tank.armor;
    assert_eq!(world.get::<&Hostile>(first).unwrap().health, expected);
    assert_eq!(world.get::<&Hostile>(second).unwrap().health, tank.base_health);
    assert_eq!(world.query::<&Projectile>().iter().count(), 0, "single target");
    assert_eq!(
        events,
        vec![GameEvent::HostileHit {
            kind: HostileKind::Tank,
            damage: WeaponKind::Rifle.stats().damage * tank.armor,
        }]
    );
}

#[test]
fn test_aim_clamped_to_arc_and_smoothed() {
    let arc = 10f64.to_radians();
    let aim = targeting::next_aim_angle(0.0, 0.0, 0.5, arc);
    assert!((aim - arc * 0.1).abs() < 1e-12);

    let aim = targeting::next_aim_angle(0.0, 0.0, 0.05, arc);
    assert!((aim - 0.005).abs() < 1e-12);
}

#[test]
fn test_fire_rate_bound_and_damage() {
    let (mut engine, _) = started_engine(42);
    // Straight ahead of the rifle at (200, 200).
    let kind = park_first_hostile(&mut engine, Position::new(230.0, 200.0), 1.0e6);

    let ticks = 120;
    let start_ms = engine.time().elapsed_ms;
    let mut shots = 0;
    let mut hits = 0;
    for _ in 0..ticks {
        let snap = engine.tick();
        for event in &snap.events {
            match event {
                GameEvent::ProjectileFired { defender: 0, .. } => shots += 1,
                GameEvent::HostileHit { kind: k, .. } if *k == kind => hits += 1,
                _ => {}
            }
        }
    }
    let span_ms = engine.time().elapsed_ms - start_ms;
    let rifle = WeaponKind::Rifle.stats();
    let bound = (span_ms * rifle.fire_rate / 1000.0).floor() as u32 + 1;

    assert!(shots >= 3, "rifle should fire repeatedly, fired {shots}");
    assert!(shots <= bound, "{shots} shots exceeds bound {bound}");
    assert!(hits >= 1);

    let health = {
        let mut query = engine.world().query::<&Hostile>();
        let health = query
            .iter()
            .find(|(_, h)| h.serial == 0)
            .map(|(_, h)| h.health);
        health.unwrap()
    };
    let expected = 1.0e6 - hits as f64 * rifle.damage * kind.stats().armor;
    assert!((health - expected).abs() < 1e-6);
}

#[test]
fn test_projectile_expires_past_range() {
    let mut world = World::new();
    let mut controller = WaveController::new(ControllerConfig::default());
    let mut events = Vec::new();
    let mut despawn = Vec::new();
    world_setup::spawn_projectile(
        &mut world,
        &FireEvent {
            defender: 0,
            weapon: WeaponKind::Rifle,
            origin: Position::new(0.0, 0.0),
            target: Position::new(100.0, 0.0),
        },
        0,
    );

    // Rifle range 50, speed 10: alive at exactly 50, gone at 60.
    for _ in 0..5 {
        combat::run(&mut world, 1.0, &mut controller, &mut events, &mut despawn);
    }
    let traveled: Vec<f64> = world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| p.distance_traveled)
        .collect();
    assert_eq!(traveled, vec![50.0]);

    combat::run(&mut world, 1.0, &mut controller, &mut events, &mut despawn);
    assert_eq!(world.query::<&Projectile>().iter().count(), 0);
}

#[test]
fn test_kill_scores_points() {
    let (mut engine, _) = started_engine(42);
    let kind = park_first_hostile(&mut engine, Position::new(230.0, 200.0), 1.0);

    let mut killed = None;
    for _ in 0..30 {
        let snap = engine.tick();
        if snap.events.iter().any(|e| matches!(e, GameEvent::HostileKilled { .. })) {
            killed = Some(snap);
            break;
        }
    }
    let snap = killed.expect("parked hostile should be destroyed");
    let points = kind.stats().point_value;
    assert!(snap.events.contains(&GameEvent::HostileKilled { kind, points }));
    assert_eq!(snap.score, points);
    assert_eq!(snap.level_score, points);
    assert_eq!(snap.alive_hostiles, 4);
    assert_eq!(snap.killed_this_wave, 1);
    assert_eq!(snap.hostiles.len(), 4);
}

// ---- Waves ----

#[test]
fn test_leaked_wave_clears_without_score() {
    let (mut engine, _) = started_engine(42);
    teleport_all_past_boundary(&mut engine);
    let snap = engine.tick();

    let leaks = snap
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::HostileLeaked { .. }))
        .count();
    assert_eq!(leaks, 5);
    assert!(snap.events.contains(&GameEvent::PhaseChanged {
        from: GamePhase::WaveActive,
        to: GamePhase::WaveClearPendingEval,
    }));
    assert_eq!(snap.score, 0);
    assert_eq!(snap.wave, 2);
    assert_eq!(snap.hostiles.len(), 6);
    assert_eq!(snap.state, GamePhase::WaveActive);
}

#[test]
fn test_failed_level_retries_after_delay() {
    let (mut engine, _) = started_engine(42);
    for _ in 0..3 {
        teleport_all_past_boundary(&mut engine);
        engine.tick();
    }

    let pending = engine.controller().pending().expect("retry scheduled");
    assert_eq!(engine.phase(), GamePhase::LevelTransition);
    assert_eq!(pending.kind, TransitionKind::RetryLevel);

    let mut fired = None;
    for _ in 0..200 {
        let snap = engine.tick();
        if snap.state == GamePhase::WaveActive {
            fired = Some(snap);
            break;
        }
        assert!(snap.time.elapsed_ms <= pending.scheduled_at_ms + 20.0);
    }
    let snap = fired.expect("retry should fire");
    assert!(snap.time.elapsed_ms >= pending.scheduled_at_ms);
    assert_eq!(snap.level, 1);
    assert_eq!(snap.wave, 1);
    assert_eq!(snap.level_score, 0);
    assert_eq!(snap.hostiles.len(), 5);
    assert!(snap.pending_transition.is_none());
}

#[test]
fn test_restart_level_clears_field() {
    let (mut engine, _) = started_engine(42);
    teleport_all_past_boundary(&mut engine);
    engine.tick();
    assert_eq!(engine.controller().wave(), 2);

    engine.toggle_pause();
    engine.queue_command(PlayerCommand::RestartLevel);
    let snap = engine.tick();

    assert!(!snap.paused);
    assert_eq!(snap.wave, 1);
    assert_eq!(snap.hostiles.len(), 5);
    assert_eq!(snap.alive_hostiles, 5);
}

#[test]
fn test_score_monotonic() {
    let (mut engine, _) = started_engine(9);
    let mut last = 0;
    for _ in 0..3000 {
        let snap = engine.tick();
        assert!(snap.score >= last, "Score decreased");
        assert!(snap.hostiles.iter().all(|h| h.health > 0.0));
        last = snap.score;
    }
}

// ---- Config ----

#[test]
fn test_config_defaults_from_empty_json() {
    let config = SimConfig::from_json_str("{}").unwrap();
    assert_eq!(config, SimConfig::default());
    assert_eq!(config.loadout.len(), 4);
}

#[test]
fn test_config_partial_json() {
    let json = r#"{
        "seed": 7,
        "loadout": [{"weapon": "Pistol", "position": {"x": 300.0, "y": 250.0}}]
    }"#;
    let config = SimConfig::from_json_str(json).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.max_level, 10);
    assert_eq!(
        config.loadout,
        vec![LoadoutSlot {
            weapon: WeaponKind::Pistol,
            position: Position::new(300.0, 250.0),
            facing_angle: 0.0,
        }]
    );

    let engine = SimulationEngine::new(config);
    assert_eq!(engine.config().seed, 7);
    assert_eq!(engine.snapshot().defenders.len(), 1);
}

#[test]
fn test_config_rejects_invalid() {
    assert!(matches!(
        SimConfig::from_json_str(r#"{"max_level": 0}"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        SimConfig::from_json_str(r#"{"field_width": 100.0}"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        SimConfig::from_json_str(r#"{"transition_delay_ms": -5.0}"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        SimConfig::from_json_str("not json"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        SimConfig::load("/nonexistent/astrodefense.json"),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_short_transition_delay() {
    let mut engine = SimulationEngine::new(SimConfig {
        transition_delay_ms: 0.0,
        ..Default::default()
    });
    engine.start_game();
    for _ in 0..3 {
        teleport_all_past_boundary(&mut engine);
        engine.tick();
    }
    assert_eq!(engine.phase(), GamePhase::LevelTransition);
    let snap = engine.tick();
    assert_eq!(snap.state, GamePhase::WaveActive);
    assert_eq!(snap.wave, 1);
}
