/// Every simulated object as plain data; behavior lives in `session` and
/// `collision`.

use crate::abilities::Inventory;
use crate::geometry::{Rect, Vec2};

/// Position + velocity shared by every simulated object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Body {
    pub fn new(rect: Rect, vel: Vec2) -> Body {
        Body { rect, vel }
    }

    pub fn at_rest(rect: Rect) -> Body {
        Body {
            rect,
            vel: Vec2::ZERO,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerMode {
    Normal,
    /// Contact damage is suppressed until the countdown runs out.
    Invulnerable { ticks_left: u32 },
}

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub mode: PlayerMode,
    pub hp: i32,
    pub max_hp: i32,
    /// Last nonzero movement direction, unit length.  Starts facing right so
    /// it is never zero.
    pub facing: Vec2,
    pub inventory: Inventory,
}

// ── Hostiles ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostilePhase {
    /// Descending toward a per-instance hold line.
    Approaching,
    /// Stopped; fires ordnance on its interval.
    Holding,
}

#[derive(Clone, Debug)]
pub struct Hostile {
    pub body: Body,
    pub phase: HostilePhase,
    /// Y coordinate at which the hostile stops descending.
    pub hold_line: f32,
    /// Ticks between shots while holding.  `None` = fire suppressed
    /// (disable pulse) without leaving the holding phase.
    pub fire_interval: Option<u64>,
    /// Visual variant index for the presentation layer.
    pub variant: u8,
}

// ── Projectiles & ordnance ────────────────────────────────────────────────────

/// Player-fired bolt.  The homing variant re-aims toward the nearest hostile
/// each tick; the standard variant keeps its spawn bearing.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub body: Body,
    pub homing: bool,
}

/// Hostile-fired shot.  Velocity is captured once at spawn (aimed at the
/// player's position at that instant) and never re-aimed.
#[derive(Clone, Debug)]
pub struct Ordnance {
    pub body: Body,
    /// Set by the disable pulse: half speed, no damage, passes through the
    /// player.
    pub inert: bool,
    pub radius: f32,
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickupKind {
    /// Counts toward the session clear condition.
    Jewel { variant: u8 },
    /// Grants one inventory unit of the named ability.
    Charge(AbilityKind),
}

#[derive(Clone, Debug)]
pub struct Pickup {
    pub body: Body,
    pub kind: PickupKind,
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

/// One segment of a scrolling wall run.  Lethal on contact unless the player
/// is invulnerable.
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub body: Body,
}

// ── Timed field effects & sparks ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    /// Destroys hostiles and ordnance inside its bounds every tick it lives.
    Area,
    /// Blocks ordnance; persists through hits until its lifetime runs out.
    Barrier,
    /// Brief flash; its side effect (suppress hostile fire, inert all live
    /// ordnance) is applied once at creation.
    Pulse,
}

#[derive(Clone, Debug)]
pub struct FieldEffect {
    pub body: Body,
    pub kind: FieldKind,
    /// Remaining ticks; removed once negative.
    pub life: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SparkKind {
    /// Destruction burst.
    Burst,
    /// Pickup glitter.
    Glitter,
}

/// Short-lived visual effect left behind by destruction or collection.
#[derive(Clone, Debug)]
pub struct Spark {
    pub body: Body,
    pub kind: SparkKind,
    pub life: i32,
}

// ── Abilities & inventory ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    AreaField,
    Barrier,
    DisablePulse,
    Overcharge,
    HomingShot,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 5] = [
        AbilityKind::AreaField,
        AbilityKind::Barrier,
        AbilityKind::DisablePulse,
        AbilityKind::Overcharge,
        AbilityKind::HomingShot,
    ];

    pub fn index(self) -> usize {
        match self {
            AbilityKind::AreaField => 0,
            AbilityKind::Barrier => 1,
            AbilityKind::DisablePulse => 2,
            AbilityKind::Overcharge => 3,
            AbilityKind::HomingShot => 4,
        }
    }
}

// ── Session status & input intents ────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionStatus {
    Running,
    Victory,
    Defeat,
}

/// One frame's worth of discrete player input, pre-digested by the boundary
/// layer.  Movement components are clamped to -1..=1 by the session.
#[derive(Clone, Copy, Debug, Default)]
pub struct Intents {
    pub move_x: i32,
    pub move_y: i32,
    pub fire_held: bool,
    pub activate: Option<AbilityKind>,
}
