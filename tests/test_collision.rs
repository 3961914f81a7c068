use skyraid::config::SessionConfig;
use skyraid::entities::*;
use skyraid::geometry::Rect;
use skyraid::session::Session;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_session() -> Session {
    Session::new(SessionConfig::default().without_spawns())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Stationary hostile that never fires, so only the rule under test runs.
fn hostile_at(x: f32, y: f32) -> Hostile {
    Hostile {
        body: Body::at_rest(Rect::new(x, y, 60.0, 40.0)),
        phase: HostilePhase::Holding,
        hold_line: 0.0,
        fire_interval: None,
        variant: 0,
    }
}

fn bolt_at(x: f32, y: f32) -> Projectile {
    Projectile {
        body: Body::at_rest(Rect::new(x, y, 20.0, 8.0)),
        homing: false,
    }
}

fn shot_at(x: f32, y: f32) -> Ordnance {
    Ordnance {
        body: Body::at_rest(Rect::new(x, y, 40.0, 40.0)),
        inert: false,
        radius: 20.0,
    }
}

fn jewel_at(x: f32, y: f32) -> Pickup {
    Pickup {
        body: Body::at_rest(Rect::new(x, y, 30.0, 30.0)),
        kind: PickupKind::Jewel { variant: 0 },
    }
}

fn field_at(x: f32, y: f32, w: f32, h: f32, kind: FieldKind) -> FieldEffect {
    FieldEffect {
        body: Body::at_rest(Rect::new(x, y, w, h)),
        kind,
        life: 400,
    }
}

// ── Bolts against hostiles and ordnance ───────────────────────────────────────

#[test]
fn bolt_destroys_hostile_and_scores() {
    let mut s = quiet_session();
    s.hostiles.add(hostile_at(300.0, 200.0));
    s.projectiles.add(bolt_at(300.0, 200.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert!(s.hostiles.is_empty());
    assert!(s.projectiles.is_empty());
    assert_eq!(s.score, 10);
    assert_eq!(s.sparks.len(), 1);
    assert_eq!(s.sparks[0].kind, SparkKind::Burst);
}

#[test]
fn bolt_destroys_ordnance_and_scores() {
    let mut s = quiet_session();
    s.ordnance.add(shot_at(300.0, 200.0));
    s.projectiles.add(bolt_at(300.0, 200.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert!(s.ordnance.is_empty());
    assert!(s.projectiles.is_empty());
    assert_eq!(s.score, 1);
}

#[test]
fn one_bolt_consumes_at_most_one_hostile() {
    let mut s = quiet_session();
    s.hostiles.add(hostile_at(300.0, 200.0));
    s.hostiles.add(hostile_at(310.0, 200.0));
    s.projectiles.add(bolt_at(305.0, 200.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    // The bolt is spent on the first hit; the second hostile survives
    assert_eq!(s.hostiles.len(), 1);
    assert!(s.projectiles.is_empty());
    assert_eq!(s.score, 10);
}

#[test]
fn hostile_hit_by_bolt_inside_area_field_scores_once() {
    let mut s = quiet_session();
    s.fields.add(field_at(550.0, 325.0, 1100.0, 650.0, FieldKind::Area));
    s.hostiles.add(hostile_at(300.0, 200.0));
    s.projectiles.add(bolt_at(300.0, 200.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert!(s.hostiles.is_empty());
    assert_eq!(s.score, 10);
    assert_eq!(s.sparks.len(), 1);
}

// ── Barrier ───────────────────────────────────────────────────────────────────

#[test]
fn barrier_blocks_ordnance_before_it_reaches_the_player() {
    let mut s = quiet_session();
    // Ordnance over the player, barrier over both
    s.ordnance.add(shot_at(550.0, 325.0));
    s.fields.add(field_at(550.0, 325.0, 20.0, 80.0, FieldKind::Barrier));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert!(s.ordnance.is_empty());
    assert_eq!(s.player.hp, 100);
    assert_eq!(s.score, 1);
    // The barrier persists through the hit
    assert_eq!(s.fields.len(), 1);
    assert_eq!(s.fields[0].kind, FieldKind::Barrier);
}

#[test]
fn barrier_blocks_many_hits_in_one_tick() {
    let mut s = quiet_session();
    s.fields.add(field_at(400.0, 300.0, 20.0, 80.0, FieldKind::Barrier));
    s.ordnance.add(shot_at(400.0, 280.0));
    s.ordnance.add(shot_at(400.0, 320.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert!(s.ordnance.is_empty());
    assert_eq!(s.score, 2);
    assert_eq!(s.fields.len(), 1);
}

// ── Area field ────────────────────────────────────────────────────────────────

#[test]
fn area_field_clears_ordnance_and_hostiles_within_it() {
    let mut s = quiet_session();
    s.fields.add(field_at(300.0, 200.0, 200.0, 200.0, FieldKind::Area));
    s.hostiles.add(hostile_at(300.0, 200.0));
    s.ordnance.add(shot_at(250.0, 150.0));
    // Outside the field: untouched
    s.hostiles.add(hostile_at(800.0, 200.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert_eq!(s.hostiles.len(), 1);
    assert!(s.ordnance.is_empty());
    assert_eq!(s.score, 11);
}

// ── Ordnance against the player ───────────────────────────────────────────────

#[test]
fn ordnance_damages_player_and_is_consumed() {
    let mut s = quiet_session();
    s.ordnance.add(shot_at(550.0, 325.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert!(s.ordnance.is_empty());
    assert_eq!(s.player.hp, 90);
    assert_eq!(s.score, 0);
    assert_eq!(s.status, SessionStatus::Running);
}

#[test]
fn hp_clamps_at_zero_and_defeats() {
    let mut s = quiet_session();
    s.player.hp = 5;
    s.ordnance.add(shot_at(550.0, 325.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert_eq!(s.player.hp, 0);
    assert_eq!(s.status, SessionStatus::Defeat);
}

#[test]
fn invulnerable_player_destroys_ordnance_on_contact() {
    let mut s = quiet_session();
    s.player.mode = PlayerMode::Invulnerable { ticks_left: 100 };
    s.ordnance.add(shot_at(550.0, 325.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert!(s.ordnance.is_empty());
    assert_eq!(s.player.hp, 100);
    assert_eq!(s.score, 1);
    assert_eq!(s.status, SessionStatus::Running);
}

#[test]
fn inert_ordnance_passes_through_the_player() {
    let mut s = quiet_session();
    let mut shot = shot_at(550.0, 325.0);
    shot.inert = true;
    s.ordnance.add(shot);

    s.advance(&Intents::default(), &mut seeded_rng());
    assert_eq!(s.ordnance.len(), 1);
    assert_eq!(s.player.hp, 100);
    assert_eq!(s.status, SessionStatus::Running);
}

// ── Obstacles against the player ──────────────────────────────────────────────

#[test]
fn obstacle_contact_is_lethal_regardless_of_hp() {
    let mut s = quiet_session();
    s.obstacles.add(Obstacle {
        body: Body::at_rest(Rect::new(550.0, 325.0, 30.0, 50.0)),
    });

    s.advance(&Intents::default(), &mut seeded_rng());
    assert_eq!(s.status, SessionStatus::Defeat);
    assert_eq!(s.player.hp, 100);
}

#[test]
fn invulnerable_player_shatters_obstacle_segments() {
    let mut s = quiet_session();
    s.player.mode = PlayerMode::Invulnerable { ticks_left: 100 };
    s.obstacles.add(Obstacle {
        body: Body::at_rest(Rect::new(550.0, 325.0, 30.0, 50.0)),
    });

    s.advance(&Intents::default(), &mut seeded_rng());
    assert!(s.obstacles.is_empty());
    assert_eq!(s.score, 5);
    assert_eq!(s.status, SessionStatus::Running);
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[test]
fn jewel_collected_by_player_counts_toward_clear() {
    let mut s = quiet_session();
    s.pickups.add(jewel_at(550.0, 325.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert!(s.pickups.is_empty());
    assert_eq!(s.jewels, 1);
    assert_eq!(s.score, 20);
    assert_eq!(s.sparks.len(), 1);
    assert_eq!(s.sparks[0].kind, SparkKind::Glitter);
}

#[test]
fn charge_pickup_grants_inventory_stock() {
    let mut s = quiet_session();
    s.pickups.add(Pickup {
        body: Body::at_rest(Rect::new(550.0, 325.0, 30.0, 30.0)),
        kind: PickupKind::Charge(AbilityKind::Barrier),
    });

    s.advance(&Intents::default(), &mut seeded_rng());
    assert!(s.pickups.is_empty());
    assert_eq!(s.player.inventory.count(AbilityKind::Barrier), 1);
    assert_eq!(s.jewels, 0);
    assert_eq!(s.score, 20);
}

#[test]
fn bolt_collects_pickup_and_survives() {
    let mut s = quiet_session();
    s.pickups.add(jewel_at(300.0, 200.0));
    s.projectiles.add(bolt_at(300.0, 200.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert!(s.pickups.is_empty());
    assert_eq!(s.projectiles.len(), 1);
    assert_eq!(s.jewels, 1);
}

#[test]
fn final_jewel_wins_the_session() {
    let mut s = quiet_session();
    s.jewels = 3;
    s.pickups.add(jewel_at(550.0, 325.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert_eq!(s.jewels, 4);
    assert_eq!(s.status, SessionStatus::Victory);
}

// ── Terminal transitions stop the pass ────────────────────────────────────────

#[test]
fn victory_stops_further_collection_that_tick() {
    let mut s = quiet_session();
    s.jewels = 3;
    s.pickups.add(jewel_at(550.0, 325.0));
    s.pickups.add(jewel_at(560.0, 325.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert_eq!(s.status, SessionStatus::Victory);
    assert_eq!(s.jewels, 4);
    // The second jewel was never evaluated
    assert_eq!(s.pickups.len(), 1);
    assert_eq!(s.score, 20);
}

#[test]
fn defeat_stops_later_rules_that_tick() {
    let mut s = quiet_session();
    s.player.hp = 5;
    s.ordnance.add(shot_at(550.0, 325.0));
    s.pickups.add(jewel_at(550.0, 325.0));

    s.advance(&Intents::default(), &mut seeded_rng());
    assert_eq!(s.status, SessionStatus::Defeat);
    // The pickup rule never ran
    assert_eq!(s.pickups.len(), 1);
    assert_eq!(s.jewels, 0);
    assert_eq!(s.score, 0);
}
