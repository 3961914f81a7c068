use skyraid::abilities::{ChargeGauge, Inventory, ShotKind};
use skyraid::entities::AbilityKind;

// ── Inventory ─────────────────────────────────────────────────────────────────

#[test]
fn try_consume_empty_stock_is_refused() {
    let mut inv = Inventory::new();
    assert!(!inv.try_consume(AbilityKind::Barrier));
    assert_eq!(inv.count(AbilityKind::Barrier), 0);
}

#[test]
fn try_consume_decrements_by_exactly_one() {
    let mut inv = Inventory::new();
    inv.grant(AbilityKind::Overcharge);
    inv.grant(AbilityKind::Overcharge);
    assert!(inv.try_consume(AbilityKind::Overcharge));
    assert_eq!(inv.count(AbilityKind::Overcharge), 1);
    assert!(inv.try_consume(AbilityKind::Overcharge));
    assert_eq!(inv.count(AbilityKind::Overcharge), 0);
    assert!(!inv.try_consume(AbilityKind::Overcharge));
    assert_eq!(inv.count(AbilityKind::Overcharge), 0);
}

#[test]
fn grant_tracks_kinds_independently() {
    let mut inv = Inventory::new();
    inv.grant(AbilityKind::AreaField);
    inv.grant(AbilityKind::HomingShot);
    inv.grant(AbilityKind::HomingShot);
    assert_eq!(inv.count(AbilityKind::AreaField), 1);
    assert_eq!(inv.count(AbilityKind::HomingShot), 2);
    assert_eq!(inv.count(AbilityKind::DisablePulse), 0);
}

#[test]
fn refused_consume_leaves_other_kinds_alone() {
    let mut inv = Inventory::new();
    inv.grant(AbilityKind::Barrier);
    assert!(!inv.try_consume(AbilityKind::DisablePulse));
    assert_eq!(inv.count(AbilityKind::Barrier), 1);
}

// ── ChargeGauge ───────────────────────────────────────────────────────────────

#[test]
fn charge_increments_once_per_held_tick() {
    let mut gauge = ChargeGauge::new(10);
    for expected in 1u32..=5 {
        gauge.hold();
        assert_eq!(gauge.level(), expected);
    }
}

#[test]
fn charge_saturates_at_max() {
    let mut gauge = ChargeGauge::new(3);
    for _ in 0..10 {
        gauge.hold();
        assert!(gauge.level() <= 3);
    }
    assert_eq!(gauge.level(), 3);
}

#[test]
fn release_below_max_is_standard_shot() {
    let mut gauge = ChargeGauge::new(10);
    gauge.hold();
    gauge.hold();
    assert_eq!(gauge.release(), Some(ShotKind::Standard));
    assert_eq!(gauge.level(), 0);
}

#[test]
fn release_at_max_is_amplified() {
    let mut gauge = ChargeGauge::new(4);
    for _ in 0..4 {
        gauge.hold();
    }
    assert_eq!(gauge.release(), Some(ShotKind::Amplified));
    assert_eq!(gauge.level(), 0);
}

#[test]
fn holding_past_max_then_releasing_is_still_amplified() {
    let mut gauge = ChargeGauge::new(4);
    for _ in 0..20 {
        gauge.hold();
    }
    assert_eq!(gauge.release(), Some(ShotKind::Amplified));
}

#[test]
fn release_without_hold_emits_nothing() {
    let mut gauge = ChargeGauge::new(10);
    assert_eq!(gauge.release(), None);
    assert_eq!(gauge.level(), 0);
    // And again — idle ticks keep the gauge at zero
    assert_eq!(gauge.release(), None);
    assert_eq!(gauge.level(), 0);
}

#[test]
fn release_resets_before_next_charge_cycle() {
    let mut gauge = ChargeGauge::new(5);
    for _ in 0..5 {
        gauge.hold();
    }
    assert_eq!(gauge.release(), Some(ShotKind::Amplified));
    // Fresh cycle starts from zero
    gauge.hold();
    assert_eq!(gauge.level(), 1);
    assert_eq!(gauge.release(), Some(ShotKind::Standard));
}
