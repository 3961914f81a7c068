/// Pairwise collision resolution.
///
/// Rules run in a fixed precedence order; an entity consumed by an earlier
/// rule is marked and never evaluated by a later one, so each collision pair
/// resolves at most once per tick.  Marks are swept once at the end of the
/// pass.  A terminal status transition (defeat, victory) stops rule
/// evaluation immediately — nothing else mutates that tick.

use crate::entities::{FieldKind, PickupKind, PlayerMode, SessionStatus, SparkKind};
use crate::session::Session;

impl Session {
    /// Resolve every collision rule for this tick, in precedence order:
    ///
    /// 1. hostile × player bolt
    /// 2. ordnance × player bolt
    /// 3. ordnance × barrier (shield blocks before player damage)
    /// 4. area field × {ordnance, hostile}
    /// 5. ordnance × player
    /// 6. obstacle × player
    /// 7. pickup × {player, player bolt}
    pub(crate) fn resolve_collisions(&mut self) {
        self.resolve_rules();
        self.hostiles.sweep();
        self.projectiles.sweep();
        self.ordnance.sweep();
        self.pickups.sweep();
        self.obstacles.sweep();
    }

    fn resolve_rules(&mut self) {
        // ── 1. Hostile × player bolt ─────────────────────────────────────────
        for hi in 0..self.hostiles.len() {
            if self.hostiles.is_marked(hi) {
                continue;
            }
            let hrect = self.hostiles[hi].body.rect;
            for pi in 0..self.projectiles.len() {
                if self.projectiles.is_marked(pi) {
                    continue;
                }
                if hrect.overlaps(&self.projectiles[pi].body.rect) {
                    self.hostiles.mark(hi);
                    self.projectiles.mark(pi);
                    self.spawn_spark(hrect, SparkKind::Burst);
                    self.score += self.config.points_hostile;
                    break;
                }
            }
        }

        // ── 2. Ordnance × player bolt ────────────────────────────────────────
        for oi in 0..self.ordnance.len() {
            if self.ordnance.is_marked(oi) {
                continue;
            }
            let orect = self.ordnance[oi].body.rect;
            for pi in 0..self.projectiles.len() {
                if self.projectiles.is_marked(pi) {
                    continue;
                }
                if orect.overlaps(&self.projectiles[pi].body.rect) {
                    self.ordnance.mark(oi);
                    self.projectiles.mark(pi);
                    self.spawn_spark(orect, SparkKind::Burst);
                    self.score += self.config.points_ordnance;
                    break;
                }
            }
        }

        // ── 3. Ordnance × barrier — the barrier persists ─────────────────────
        for oi in 0..self.ordnance.len() {
            if self.ordnance.is_marked(oi) {
                continue;
            }
            let orect = self.ordnance[oi].body.rect;
            let blocked = self
                .fields
                .iter()
                .any(|f| f.kind == FieldKind::Barrier && f.body.rect.overlaps(&orect));
            if blocked {
                self.ordnance.mark(oi);
                self.spawn_spark(orect, SparkKind::Burst);
                self.score += self.config.points_ordnance;
            }
        }

        // ── 4. Area field × {ordnance, hostile} ──────────────────────────────
        for fi in 0..self.fields.len() {
            if self.fields[fi].kind != FieldKind::Area {
                continue;
            }
            let frect = self.fields[fi].body.rect;
            for oi in 0..self.ordnance.len() {
                if self.ordnance.is_marked(oi) {
                    continue;
                }
                let orect = self.ordnance[oi].body.rect;
                if frect.overlaps(&orect) {
                    self.ordnance.mark(oi);
                    self.spawn_spark(orect, SparkKind::Burst);
                    self.score += self.config.points_ordnance;
                }
            }
            for hi in 0..self.hostiles.len() {
                if self.hostiles.is_marked(hi) {
                    continue;
                }
                let hrect = self.hostiles[hi].body.rect;
                if frect.overlaps(&hrect) {
                    self.hostiles.mark(hi);
                    self.spawn_spark(hrect, SparkKind::Burst);
                    self.score += self.config.points_hostile;
                }
            }
        }

        // ── 5. Ordnance × player ─────────────────────────────────────────────
        let player_rect = self.player.body.rect;
        for oi in 0..self.ordnance.len() {
            if self.ordnance.is_marked(oi) {
                continue;
            }
            let shot = &self.ordnance[oi];
            // Inert ordnance drifts through the player untouched.
            if shot.inert {
                continue;
            }
            let orect = shot.body.rect;
            if !orect.overlaps(&player_rect) {
                continue;
            }
            self.ordnance.mark(oi);
            if matches!(self.player.mode, PlayerMode::Invulnerable { .. }) {
                self.spawn_spark(orect, SparkKind::Burst);
                self.score += self.config.points_ordnance;
            } else {
                self.player.hp = (self.player.hp - self.config.ordnance_damage).max(0);
                if self.player.hp == 0 {
                    self.status = SessionStatus::Defeat;
                    return;
                }
            }
        }

        // ── 6. Obstacle × player ─────────────────────────────────────────────
        for bi in 0..self.obstacles.len() {
            if self.obstacles.is_marked(bi) {
                continue;
            }
            let brect = self.obstacles[bi].body.rect;
            if !brect.overlaps(&player_rect) {
                continue;
            }
            if matches!(self.player.mode, PlayerMode::Invulnerable { .. }) {
                self.obstacles.mark(bi);
                self.spawn_spark(brect, SparkKind::Burst);
                self.score += self.config.points_obstacle;
            } else {
                // Lethal regardless of remaining hp.
                self.status = SessionStatus::Defeat;
                return;
            }
        }

        // ── 7. Pickup × player, pickup × player bolt ─────────────────────────
        for ki in 0..self.pickups.len() {
            if self.pickups.is_marked(ki) {
                continue;
            }
            let krect = self.pickups[ki].body.rect;
            let by_player = krect.overlaps(&player_rect);
            let by_bolt = !by_player
                && self
                    .projectiles
                    .iter()
                    .enumerate()
                    .any(|(pi, p)| {
                        !self.projectiles.is_marked(pi) && p.body.rect.overlaps(&krect)
                    });
            if !by_player && !by_bolt {
                continue;
            }
            self.pickups.mark(ki);
            self.spawn_spark(krect, SparkKind::Glitter);
            self.score += self.config.points_pickup;
            match self.pickups[ki].kind {
                PickupKind::Jewel { .. } => {
                    self.jewels += 1;
                    if self.jewels >= self.config.jewels_to_clear {
                        self.status = SessionStatus::Victory;
                        return;
                    }
                }
                PickupKind::Charge(ability) => {
                    self.player.inventory.grant(ability);
                }
            }
        }
    }
}
