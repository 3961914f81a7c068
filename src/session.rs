/// The per-tick simulation engine.
///
/// One `Session` owns every live registry plus the score/inventory totals for
/// a single game.  `advance` consumes one frame of intents and runs the fixed
/// pipeline: intents → state transitions & spawns → motion → collision
/// resolution → lifetime sweep → snapshot.  All randomness comes through the
/// injected RNG so callers control determinism (tests use a seeded RNG).

use rand::Rng;

use crate::abilities::{ChargeGauge, Inventory, ShotKind};
use crate::config::SessionConfig;
use crate::entities::{
    AbilityKind, Body, FieldEffect, FieldKind, Hostile, HostilePhase, Intents, Obstacle, Ordnance,
    Pickup, PickupKind, Player, PlayerMode, Projectile, SessionStatus, Spark, SparkKind,
};
use crate::geometry::{direction, fully_outside, within_bounds, Rect, Vec2};
use crate::registry::Registry;

// ── Read-only frame output ────────────────────────────────────────────────────

/// What one entity looks like to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewKind {
    Player { invulnerable: bool },
    Hostile { holding: bool },
    Projectile { homing: bool },
    Ordnance { inert: bool },
    Jewel,
    Charge(AbilityKind),
    Obstacle,
    Field(FieldKind),
    Spark(SparkKind),
}

#[derive(Clone, Copy, Debug)]
pub struct EntityView {
    pub kind: ViewKind,
    pub rect: Rect,
    /// Visual variant index (hostiles, jewels); zero elsewhere.
    pub variant: u8,
}

/// Read-only snapshot handed to the presentation layer after each tick.
#[derive(Clone, Debug)]
pub struct FrameResult {
    pub status: SessionStatus,
    pub tick: u64,
    pub score: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub charge: u32,
    pub charge_max: u32,
    pub jewels: u32,
    pub jewels_to_clear: u32,
    pub inventory: [u32; AbilityKind::ALL.len()],
    pub entities: Vec<EntityView>,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// One game's worth of simulation state.  Owned by the frame loop; no global
/// mutable state anywhere.
#[derive(Clone, Debug)]
pub struct Session {
    pub config: SessionConfig,
    pub tick: u64,
    pub status: SessionStatus,
    pub score: u32,
    pub jewels: u32,
    pub player: Player,
    pub charge: ChargeGauge,
    pub hostiles: Registry<Hostile>,
    pub projectiles: Registry<Projectile>,
    pub ordnance: Registry<Ordnance>,
    pub pickups: Registry<Pickup>,
    pub obstacles: Registry<Obstacle>,
    pub fields: Registry<FieldEffect>,
    pub sparks: Registry<Spark>,
}

impl Session {
    /// Bootstrap a fresh session: player centered, registries empty.
    pub fn new(config: SessionConfig) -> Session {
        let player = Player {
            body: Body::at_rest(Rect::new(
                config.arena_w / 2.0,
                config.arena_h / 2.0,
                config.player_w,
                config.player_h,
            )),
            mode: PlayerMode::Normal,
            hp: config.player_max_hp,
            max_hp: config.player_max_hp,
            facing: Vec2::new(1.0, 0.0),
            inventory: Inventory::new(),
        };
        let charge = ChargeGauge::new(config.charge_max);
        Session {
            config,
            tick: 0,
            status: SessionStatus::Running,
            score: 0,
            jewels: 0,
            player,
            charge,
            hostiles: Registry::new(),
            projectiles: Registry::new(),
            ordnance: Registry::new(),
            pickups: Registry::new(),
            obstacles: Registry::new(),
            fields: Registry::new(),
            sparks: Registry::new(),
        }
    }

    /// Advance exactly one tick.  On a terminal session this is a no-op that
    /// returns the frozen snapshot.
    pub fn advance(&mut self, intents: &Intents, rng: &mut impl Rng) -> FrameResult {
        if self.status != SessionStatus::Running {
            return self.snapshot();
        }
        self.tick += 1;
        self.apply_intents(intents);
        self.update_states(rng);
        self.step_motion();
        self.resolve_collisions();
        if self.status == SessionStatus::Running {
            self.fields.advance_lifetimes();
            self.sparks.advance_lifetimes();
        }
        self.snapshot()
    }

    /// Advance several ticks under the same held intents.
    pub fn advance_ticks(&mut self, intents: &Intents, ticks: u64, rng: &mut impl Rng) -> FrameResult {
        for _ in 1..ticks.max(1) {
            self.advance(intents, rng);
        }
        self.advance(intents, rng)
    }

    // ── Stage 1: input intents ────────────────────────────────────────────────

    fn apply_intents(&mut self, intents: &Intents) {
        let mx = intents.move_x.clamp(-1, 1) as f32;
        let my = intents.move_y.clamp(-1, 1) as f32;
        self.player.body.vel = Vec2::new(mx * self.config.player_speed, my * self.config.player_speed);
        if mx != 0.0 || my != 0.0 {
            self.player.facing = Vec2::new(mx, my).normalized();
        }

        if intents.fire_held {
            self.charge.hold();
        } else if let Some(shot) = self.charge.release() {
            self.fire_bolts(shot);
        }

        if let Some(kind) = intents.activate {
            self.activate(kind);
        }
    }

    /// Emit the bolt(s) for a fire-input release.
    fn fire_bolts(&mut self, shot: ShotKind) {
        match shot {
            ShotKind::Standard => {
                self.spawn_bolt(Vec2::ZERO, self.config.projectile_speed, false);
            }
            ShotKind::Amplified => {
                // Parallel bolts offset perpendicular to the facing direction,
                // centered on it.
                let bolts = self.config.burst_bolts.max(1);
                let facing = self.player.facing;
                let perp = Vec2::new(-facing.y, facing.x);
                let spacing = self.config.burst_spacing;
                let mid = (bolts as f32 - 1.0) / 2.0;
                for i in 0..bolts {
                    let offset = perp.scaled((i as f32 - mid) * spacing);
                    self.spawn_bolt(offset, self.config.burst_speed, false);
                }
            }
        }
    }

    fn spawn_bolt(&mut self, offset: Vec2, speed: f32, homing: bool) {
        let facing = self.player.facing;
        let muzzle = Vec2::new(
            self.player.body.rect.center.x + facing.x * self.config.player_w + offset.x,
            self.player.body.rect.center.y + facing.y * self.config.player_h + offset.y,
        );
        let rect = Rect::new(
            muzzle.x,
            muzzle.y,
            self.config.projectile_w,
            self.config.projectile_h,
        );
        self.projectiles.add(Projectile {
            body: Body::new(rect, facing.scaled(speed)),
            homing,
        });
    }

    /// The single resource gate: every ability routes through
    /// `Inventory::try_consume` here.
    fn activate(&mut self, kind: AbilityKind) {
        // Only one barrier may be live at a time; refusal happens before
        // stock is touched.
        if kind == AbilityKind::Barrier
            && self.fields.iter().any(|f| f.kind == FieldKind::Barrier)
        {
            return;
        }
        if !self.player.inventory.try_consume(kind) {
            return;
        }
        match kind {
            AbilityKind::AreaField => {
                let arena = Rect::new(
                    self.config.arena_w / 2.0,
                    self.config.arena_h / 2.0,
                    self.config.arena_w,
                    self.config.arena_h,
                );
                self.fields.add(FieldEffect {
                    body: Body::at_rest(arena),
                    kind: FieldKind::Area,
                    life: self.config.area_field_life,
                });
            }
            AbilityKind::Barrier => {
                let facing = self.player.facing;
                let prect = self.player.body.rect;
                // Bar orientation follows the dominant facing axis.
                let (w, h) = if facing.x.abs() >= facing.y.abs() {
                    (self.config.barrier_thickness, self.config.player_h * 2.0)
                } else {
                    (self.config.player_w * 2.0, self.config.barrier_thickness)
                };
                let rect = Rect::new(
                    prect.center.x + facing.x * self.config.player_w,
                    prect.center.y + facing.y * self.config.player_h,
                    w,
                    h,
                );
                self.fields.add(FieldEffect {
                    body: Body::at_rest(rect),
                    kind: FieldKind::Barrier,
                    life: self.config.barrier_life,
                });
            }
            AbilityKind::DisablePulse => {
                let arena = Rect::new(
                    self.config.arena_w / 2.0,
                    self.config.arena_h / 2.0,
                    self.config.arena_w,
                    self.config.arena_h,
                );
                self.fields.add(FieldEffect {
                    body: Body::at_rest(arena),
                    kind: FieldKind::Pulse,
                    life: self.config.pulse_life,
                });
                // One-time side effect, applied at creation: suppress all
                // live hostile fire, inert every live ordnance at half speed.
                for hostile in self.hostiles.iter_mut() {
                    hostile.fire_interval = None;
                }
                for shot in self.ordnance.iter_mut() {
                    if !shot.inert {
                        shot.inert = true;
                        shot.body.vel = shot.body.vel.scaled(0.5);
                    }
                }
            }
            AbilityKind::Overcharge => {
                // Re-entry just restarts the countdown.
                self.player.mode = PlayerMode::Invulnerable {
                    ticks_left: self.config.invuln_duration,
                };
            }
            AbilityKind::HomingShot => {
                self.spawn_bolt(Vec2::ZERO, self.config.projectile_speed, true);
            }
        }
    }

    // ── Stage 2: state transitions & spawns ──────────────────────────────────

    fn update_states(&mut self, rng: &mut impl Rng) {
        // Invulnerability countdown back to normal.
        if let PlayerMode::Invulnerable { ticks_left } = &mut self.player.mode {
            *ticks_left = ticks_left.saturating_sub(1);
            if *ticks_left == 0 {
                self.player.mode = PlayerMode::Normal;
            }
        }

        // Hostile phase transitions and holding fire.
        let player_rect = self.player.body.rect;
        let mut fired: Vec<Ordnance> = Vec::new();
        for hostile in self.hostiles.iter_mut() {
            if hostile.phase == HostilePhase::Approaching
                && hostile.body.rect.center.y >= hostile.hold_line
            {
                hostile.phase = HostilePhase::Holding;
                hostile.body.vel = Vec2::ZERO;
            }
            if hostile.phase == HostilePhase::Holding {
                if let Some(interval) = hostile.fire_interval {
                    if self.tick % interval == 0 {
                        let radius = rng.gen_range(
                            self.config.ordnance_radius_min..=self.config.ordnance_radius_max,
                        );
                        let firer = hostile.body.rect;
                        // Aim is captured once, at the player's position now.
                        // Coincident centers would make the bearing undefined;
                        // fall back to straight down.
                        let dir = if firer.center == player_rect.center {
                            Vec2::new(0.0, 1.0)
                        } else {
                            direction(&firer, &player_rect)
                        };
                        let rect = Rect::new(
                            firer.center.x,
                            firer.bottom() + radius,
                            radius * 2.0,
                            radius * 2.0,
                        );
                        fired.push(Ordnance {
                            body: Body::new(rect, dir.scaled(self.config.ordnance_speed)),
                            inert: false,
                            radius,
                        });
                    }
                }
            }
        }
        for shot in fired {
            self.ordnance.add(shot);
        }

        self.run_spawners(rng);
    }

    fn run_spawners(&mut self, rng: &mut impl Rng) {
        let cfg = &self.config;

        if cfg.hostile_cadence > 0 && self.tick % cfg.hostile_cadence == 0 {
            let x = rng.gen_range(0.0..cfg.arena_w);
            let hold_line = rng.gen_range(cfg.hold_line_min..=cfg.hold_line_max);
            let interval = rng
                .gen_range(cfg.fire_interval_min..=cfg.fire_interval_max)
                .max(1);
            let variant = rng.gen_range(0..cfg.hostile_variants.max(1));
            let hostile = Hostile {
                body: Body::new(
                    Rect::new(x, 0.0, cfg.hostile_w, cfg.hostile_h),
                    Vec2::new(0.0, cfg.hostile_speed),
                ),
                phase: HostilePhase::Approaching,
                hold_line,
                fire_interval: Some(interval),
                variant,
            };
            self.hostiles.add(hostile);
        }

        if cfg.pickup_cadence > 0 && self.tick % cfg.pickup_cadence == 0 {
            let y = rng.gen_range(0.0..cfg.arena_h);
            let kind = if rng.gen_ratio(cfg.jewel_chance_pct.min(100), 100) {
                PickupKind::Jewel {
                    variant: rng.gen_range(0..cfg.jewel_variants.max(1)),
                }
            } else {
                let all = AbilityKind::ALL;
                PickupKind::Charge(all[rng.gen_range(0..all.len())])
            };
            let pickup = Pickup {
                body: Body::new(
                    Rect::new(cfg.arena_w, y, cfg.pickup_w, cfg.pickup_h),
                    Vec2::new(-cfg.pickup_speed, 0.0),
                ),
                kind,
            };
            self.pickups.add(pickup);
        }

        if cfg.obstacle_cadence > 0 && self.tick % cfg.obstacle_cadence == 0 {
            // One vertical run spanning the arena, with a single randomized
            // gap the player can thread.
            let segs = (cfg.arena_h / cfg.obstacle_seg_h).ceil() as u32;
            let gap = cfg.obstacle_gap_segs.min(segs.saturating_sub(1)).max(1);
            let gap_start = rng.gen_range(0..=segs - gap);
            let mut run = Vec::new();
            for i in 0..segs {
                if i >= gap_start && i < gap_start + gap {
                    continue;
                }
                run.push(Obstacle {
                    body: Body::new(
                        Rect::new(
                            cfg.arena_w + cfg.obstacle_seg_w / 2.0,
                            i as f32 * cfg.obstacle_seg_h + cfg.obstacle_seg_h / 2.0,
                            cfg.obstacle_seg_w,
                            cfg.obstacle_seg_h,
                        ),
                        Vec2::new(-cfg.obstacle_scroll, 0.0),
                    ),
                });
            }
            for seg in run {
                self.obstacles.add(seg);
            }
        }
    }

    // ── Stage 3: motion & bounds ─────────────────────────────────────────────

    fn step_motion(&mut self) {
        let (aw, ah) = (self.config.arena_w, self.config.arena_h);

        // Homing bolts re-aim toward the nearest hostile just before moving.
        let speed = self.config.projectile_speed;
        for bolt in self.projectiles.iter_mut() {
            if !bolt.homing {
                continue;
            }
            let from = bolt.body.rect;
            let nearest = self
                .hostiles
                .iter()
                .map(|h| h.body.rect)
                .filter(|r| r.center != from.center)
                .min_by(|a, b| {
                    let da = (a.center.x - from.center.x).powi(2)
                        + (a.center.y - from.center.y).powi(2);
                    let db = (b.center.x - from.center.x).powi(2)
                        + (b.center.y - from.center.y).powi(2);
                    da.total_cmp(&db)
                });
            if let Some(target) = nearest {
                bolt.body.vel = direction(&from, &target).scaled(speed);
            }
        }

        // Player: reject-and-revert, independently per axis.
        let prev = self.player.body.rect;
        let vel = self.player.body.vel;
        self.player.body.rect.shift(vel);
        let (h_ok, v_ok) = within_bounds(aw, ah, &self.player.body.rect);
        if !h_ok {
            self.player.body.rect.center.x = prev.center.x;
        }
        if !v_ok {
            self.player.body.rect.center.y = prev.center.y;
        }

        // Everything else: step, then cull once fully outside the arena.
        for hostile in self.hostiles.iter_mut() {
            hostile.body.rect.shift(hostile.body.vel);
        }
        self.hostiles.retain(|h| !fully_outside(aw, ah, &h.body.rect));

        for bolt in self.projectiles.iter_mut() {
            bolt.body.rect.shift(bolt.body.vel);
        }
        self.projectiles.retain(|p| !fully_outside(aw, ah, &p.body.rect));

        for shot in self.ordnance.iter_mut() {
            shot.body.rect.shift(shot.body.vel);
        }
        self.ordnance.retain(|o| !fully_outside(aw, ah, &o.body.rect));

        for pickup in self.pickups.iter_mut() {
            pickup.body.rect.shift(pickup.body.vel);
        }
        self.pickups.retain(|p| !fully_outside(aw, ah, &p.body.rect));

        for seg in self.obstacles.iter_mut() {
            seg.body.rect.shift(seg.body.vel);
        }
        self.obstacles.retain(|o| !fully_outside(aw, ah, &o.body.rect));
    }

    // ── Helpers shared with the collision resolver ───────────────────────────

    pub(crate) fn spawn_spark(&mut self, rect: Rect, kind: SparkKind) {
        let life = match kind {
            SparkKind::Burst => self.config.spark_life_burst,
            SparkKind::Glitter => self.config.spark_life_glitter,
        };
        self.sparks.add(Spark {
            body: Body::at_rest(rect),
            kind,
            life,
        });
    }

    // ── Stage 6: snapshot ────────────────────────────────────────────────────

    /// Read-only view of the whole session for the presentation layer.
    /// Entities are listed back-to-front; the player comes last.
    pub fn snapshot(&self) -> FrameResult {
        let mut entities = Vec::new();
        for field in &self.fields {
            entities.push(EntityView {
                kind: ViewKind::Field(field.kind),
                rect: field.body.rect,
                variant: 0,
            });
        }
        for seg in &self.obstacles {
            entities.push(EntityView {
                kind: ViewKind::Obstacle,
                rect: seg.body.rect,
                variant: 0,
            });
        }
        for pickup in &self.pickups {
            let (kind, variant) = match pickup.kind {
                PickupKind::Jewel { variant } => (ViewKind::Jewel, variant),
                PickupKind::Charge(ability) => (ViewKind::Charge(ability), 0),
            };
            entities.push(EntityView {
                kind,
                rect: pickup.body.rect,
                variant,
            });
        }
        for shot in &self.ordnance {
            entities.push(EntityView {
                kind: ViewKind::Ordnance { inert: shot.inert },
                rect: shot.body.rect,
                variant: 0,
            });
        }
        for hostile in &self.hostiles {
            entities.push(EntityView {
                kind: ViewKind::Hostile {
                    holding: hostile.phase == HostilePhase::Holding,
                },
                rect: hostile.body.rect,
                variant: hostile.variant,
            });
        }
        for bolt in &self.projectiles {
            entities.push(EntityView {
                kind: ViewKind::Projectile { homing: bolt.homing },
                rect: bolt.body.rect,
                variant: 0,
            });
        }
        for spark in &self.sparks {
            entities.push(EntityView {
                kind: ViewKind::Spark(spark.kind),
                rect: spark.body.rect,
                variant: 0,
            });
        }
        entities.push(EntityView {
            kind: ViewKind::Player {
                invulnerable: matches!(self.player.mode, PlayerMode::Invulnerable { .. }),
            },
            rect: self.player.body.rect,
            variant: 0,
        });

        FrameResult {
            status: self.status,
            tick: self.tick,
            score: self.score,
            hp: self.player.hp,
            max_hp: self.player.max_hp,
            charge: self.charge.level(),
            charge_max: self.charge.max(),
            jewels: self.jewels,
            jewels_to_clear: self.config.jewels_to_clear,
            inventory: self.player.inventory.counts(),
            entities,
        }
    }
}
