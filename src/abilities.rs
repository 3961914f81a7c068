/// Resource-gated abilities and the charge weapon.
///
/// Every special action goes through `Inventory::try_consume` — the single
/// authorization point — and the fire input runs through `ChargeGauge`, which
/// decides between a standard bolt and an amplified burst on release.

use crate::entities::AbilityKind;

/// Per-ability stock counts.  All mutation goes through `grant` /
/// `try_consume` so counts can never go negative.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    counts: [u32; AbilityKind::ALL.len()],
}

impl Inventory {
    pub fn new() -> Inventory {
        Inventory::default()
    }

    pub fn count(&self, kind: AbilityKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn counts(&self) -> [u32; AbilityKind::ALL.len()] {
        self.counts
    }

    /// Credit one unit on pickup.
    pub fn grant(&mut self, kind: AbilityKind) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(1);
    }

    /// Authorize one use: decrement by exactly one and return true if stock
    /// is available, otherwise return false with no state change.
    pub fn try_consume(&mut self, kind: AbilityKind) -> bool {
        let slot = &mut self.counts[kind.index()];
        if *slot > 0 {
            *slot -= 1;
            true
        } else {
            false
        }
    }
}

// ── Charge weapon ─────────────────────────────────────────────────────────────

/// What a release of the fire input produces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShotKind {
    /// Single bolt at standard speed.
    Standard,
    /// Parallel multi-bolt burst at higher speed — only when the gauge was
    /// full at release.
    Amplified,
}

/// Accumulates charge while the fire input is held, capped at `max`.
/// The level resets to zero on every release and on any tick where the input
/// is not held; it never decreases while held.
#[derive(Clone, Debug)]
pub struct ChargeGauge {
    level: u32,
    max: u32,
    held: bool,
}

impl ChargeGauge {
    pub fn new(max: u32) -> ChargeGauge {
        ChargeGauge {
            level: 0,
            max,
            held: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// The fire input is held this tick: add one charge, saturating at max.
    pub fn hold(&mut self) {
        self.held = true;
        self.level = (self.level + 1).min(self.max);
    }

    /// The fire input is not held this tick.  If it was held last tick this
    /// is a release: the gauge empties and reports which shot to emit.
    /// Otherwise the gauge just stays empty.
    pub fn release(&mut self) -> Option<ShotKind> {
        let was_held = self.held;
        let full = self.max > 0 && self.level == self.max;
        self.held = false;
        self.level = 0;
        if !was_held {
            return None;
        }
        Some(if full {
            ShotKind::Amplified
        } else {
            ShotKind::Standard
        })
    }
}
