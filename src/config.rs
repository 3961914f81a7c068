/// Runtime-tunable session configuration.
///
/// Every field defaults to a compile-time constant; `SessionConfig::load`
/// overlays a TOML file so a minimal config can override just the values you
/// care about.  Spawn cadences are in ticks between spawns; a cadence of 0
/// disables that spawner (useful for scripted test sessions).

use std::path::Path;

use serde::Deserialize;

// ── Compile-time defaults ─────────────────────────────────────────────────────

const ARENA_W: f32 = 1100.0;
const ARENA_H: f32 = 650.0;

const PLAYER_SPEED: f32 = 10.0;
const PLAYER_MAX_HP: i32 = 100;
const PLAYER_W: f32 = 40.0;
const PLAYER_H: f32 = 40.0;
const INVULN_DURATION: u32 = 500;

const HOSTILE_SPEED: f32 = 6.0;
const HOSTILE_W: f32 = 60.0;
const HOSTILE_H: f32 = 40.0;
const HOSTILE_CADENCE: u64 = 200;
const HOLD_LINE_MIN: f32 = 50.0;
const HOLD_LINE_MAX: f32 = 325.0;
const FIRE_INTERVAL_MIN: u64 = 50;
const FIRE_INTERVAL_MAX: u64 = 300;
const HOSTILE_VARIANTS: u8 = 3;

const ORDNANCE_SPEED: f32 = 6.0;
const ORDNANCE_RADIUS_MIN: f32 = 10.0;
const ORDNANCE_RADIUS_MAX: f32 = 50.0;
const ORDNANCE_DAMAGE: i32 = 10;

const PROJECTILE_SPEED: f32 = 10.0;
const PROJECTILE_W: f32 = 20.0;
const PROJECTILE_H: f32 = 8.0;

const CHARGE_MAX: u32 = 60;
const BURST_BOLTS: u32 = 3;
const BURST_SPACING: f32 = 20.0;
const BURST_SPEED: f32 = 16.0;

const PICKUP_CADENCE: u64 = 200;
const JEWEL_CHANCE_PCT: u32 = 20;
const JEWEL_VARIANTS: u8 = 3;
const PICKUP_W: f32 = 30.0;
const PICKUP_H: f32 = 30.0;
const PICKUP_SPEED: f32 = 5.0;
const JEWELS_TO_CLEAR: u32 = 4;

const OBSTACLE_CADENCE: u64 = 240;
const OBSTACLE_SEG_W: f32 = 30.0;
const OBSTACLE_SEG_H: f32 = 50.0;
const OBSTACLE_GAP_SEGS: u32 = 3;
const OBSTACLE_SCROLL: f32 = 5.0;

const AREA_FIELD_LIFE: i32 = 400;
const BARRIER_LIFE: i32 = 400;
const BARRIER_THICKNESS: f32 = 20.0;
const PULSE_LIFE: i32 = 10;
const SPARK_LIFE_BURST: i32 = 100;
const SPARK_LIFE_GLITTER: i32 = 50;

const POINTS_HOSTILE: u32 = 10;
const POINTS_ORDNANCE: u32 = 1;
const POINTS_PICKUP: u32 = 20;
const POINTS_OBSTACLE: u32 = 5;

/// Everything the simulation core is parameterized on: arena size, actor
/// stats, spawn cadences, ability/field lifetimes, and the reward table.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub arena_w: f32,
    pub arena_h: f32,

    pub player_speed: f32,
    pub player_max_hp: i32,
    pub player_w: f32,
    pub player_h: f32,
    pub invuln_duration: u32,

    pub hostile_speed: f32,
    pub hostile_w: f32,
    pub hostile_h: f32,
    pub hostile_cadence: u64,
    pub hold_line_min: f32,
    pub hold_line_max: f32,
    pub fire_interval_min: u64,
    pub fire_interval_max: u64,
    pub hostile_variants: u8,

    pub ordnance_speed: f32,
    pub ordnance_radius_min: f32,
    pub ordnance_radius_max: f32,
    pub ordnance_damage: i32,

    pub projectile_speed: f32,
    pub projectile_w: f32,
    pub projectile_h: f32,

    pub charge_max: u32,
    pub burst_bolts: u32,
    pub burst_spacing: f32,
    pub burst_speed: f32,

    pub pickup_cadence: u64,
    pub jewel_chance_pct: u32,
    pub jewel_variants: u8,
    pub pickup_w: f32,
    pub pickup_h: f32,
    pub pickup_speed: f32,
    pub jewels_to_clear: u32,

    pub obstacle_cadence: u64,
    pub obstacle_seg_w: f32,
    pub obstacle_seg_h: f32,
    pub obstacle_gap_segs: u32,
    pub obstacle_scroll: f32,

    pub area_field_life: i32,
    pub barrier_life: i32,
    pub barrier_thickness: f32,
    pub pulse_life: i32,
    pub spark_life_burst: i32,
    pub spark_life_glitter: i32,

    pub points_hostile: u32,
    pub points_ordnance: u32,
    pub points_pickup: u32,
    pub points_obstacle: u32,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            arena_w: ARENA_W,
            arena_h: ARENA_H,
            player_speed: PLAYER_SPEED,
            player_max_hp: PLAYER_MAX_HP,
            player_w: PLAYER_W,
            player_h: PLAYER_H,
            invuln_duration: INVULN_DURATION,
            hostile_speed: HOSTILE_SPEED,
            hostile_w: HOSTILE_W,
            hostile_h: HOSTILE_H,
            hostile_cadence: HOSTILE_CADENCE,
            hold_line_min: HOLD_LINE_MIN,
            hold_line_max: HOLD_LINE_MAX,
            fire_interval_min: FIRE_INTERVAL_MIN,
            fire_interval_max: FIRE_INTERVAL_MAX,
            hostile_variants: HOSTILE_VARIANTS,
            ordnance_speed: ORDNANCE_SPEED,
            ordnance_radius_min: ORDNANCE_RADIUS_MIN,
            ordnance_radius_max: ORDNANCE_RADIUS_MAX,
            ordnance_damage: ORDNANCE_DAMAGE,
            projectile_speed: PROJECTILE_SPEED,
            projectile_w: PROJECTILE_W,
            projectile_h: PROJECTILE_H,
            charge_max: CHARGE_MAX,
            burst_bolts: BURST_BOLTS,
            burst_spacing: BURST_SPACING,
            burst_speed: BURST_SPEED,
            pickup_cadence: PICKUP_CADENCE,
            jewel_chance_pct: JEWEL_CHANCE_PCT,
            jewel_variants: JEWEL_VARIANTS,
            pickup_w: PICKUP_W,
            pickup_h: PICKUP_H,
            pickup_speed: PICKUP_SPEED,
            jewels_to_clear: JEWELS_TO_CLEAR,
            obstacle_cadence: OBSTACLE_CADENCE,
            obstacle_seg_w: OBSTACLE_SEG_W,
            obstacle_seg_h: OBSTACLE_SEG_H,
            obstacle_gap_segs: OBSTACLE_GAP_SEGS,
            obstacle_scroll: OBSTACLE_SCROLL,
            area_field_life: AREA_FIELD_LIFE,
            barrier_life: BARRIER_LIFE,
            barrier_thickness: BARRIER_THICKNESS,
            pulse_life: PULSE_LIFE,
            spark_life_burst: SPARK_LIFE_BURST,
            spark_life_glitter: SPARK_LIFE_GLITTER,
            points_hostile: POINTS_HOSTILE,
            points_ordnance: POINTS_ORDNANCE,
            points_pickup: POINTS_PICKUP,
            points_obstacle: POINTS_OBSTACLE,
        }
    }
}

impl SessionConfig {
    /// Load config from a TOML file, falling back to the defaults for any
    /// missing key.  A missing or unreadable file yields the full defaults;
    /// a malformed file is reported as an error so typos aren't silently
    /// ignored.
    pub fn load(path: &Path) -> Result<SessionConfig, toml::de::Error> {
        match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text),
            Err(_) => Ok(SessionConfig::default()),
        }
    }

    /// A quiet variant with every spawner disabled — scripted sessions and
    /// tests populate the registries themselves.
    pub fn without_spawns(mut self) -> SessionConfig {
        self.hostile_cadence = 0;
        self.pickup_cadence = 0;
        self.obstacle_cadence = 0;
        self
    }
}
