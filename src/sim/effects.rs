//! Timed status effects
//!
//! Each effect is a tick counter. An effect is active while its counter is
//! above zero, so every derived value (speed multiplier, protection) flips in
//! the same tick the counter runs out.

use serde::{Deserialize, Serialize};

/// Effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    TripleShot,
    Shield,
    SpeedBoost,
    Invulnerable,
    /// Short protection window after taking a hit
    HitFlash,
}

impl EffectKind {
    pub const ALL: [EffectKind; 5] = [
        EffectKind::TripleShot,
        EffectKind::Shield,
        EffectKind::SpeedBoost,
        EffectKind::Invulnerable,
        EffectKind::HitFlash,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            EffectKind::TripleShot => 0,
            EffectKind::Shield => 1,
            EffectKind::SpeedBoost => 2,
            EffectKind::Invulnerable => 3,
            EffectKind::HitFlash => 4,
        }
    }
}

/// Effect durations and couplings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    pub triple_shot_ticks: i64,
    pub shield_ticks: i64,
    pub speed_boost_ticks: i64,
    /// Invulnerability duration when granted directly (not via speed boost)
    pub invulnerable_ticks: i64,
    pub hit_flash_ticks: i64,
    /// Multiplier applied to entity motion and boost-scaled spawn rules
    pub boost_multiplier: f32,
    /// Speed boost also grants invulnerability for the same duration
    pub boost_grants_invulnerable: bool,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            triple_shot_ticks: 300,
            shield_ticks: 500,
            speed_boost_ticks: 100,
            invulnerable_ticks: 100,
            hit_flash_ticks: 12,
            boost_multiplier: 10.0,
            boost_grants_invulnerable: false,
        }
    }
}

impl EffectsConfig {
    /// Configured duration for an effect
    pub fn duration(&self, kind: EffectKind) -> i64 {
        match kind {
            EffectKind::TripleShot => self.triple_shot_ticks,
            EffectKind::Shield => self.shield_ticks,
            EffectKind::SpeedBoost => self.speed_boost_ticks,
            EffectKind::Invulnerable => self.invulnerable_ticks,
            EffectKind::HitFlash => self.hit_flash_ticks,
        }
    }
}

/// Set of effect timers, at most one per kind
#[derive(Debug, Clone)]
pub struct EffectTimerSet {
    remaining: [u32; 5],
    boost_multiplier: f32,
    boost_grants_invulnerable: bool,
}

impl EffectTimerSet {
    pub fn new(config: &EffectsConfig) -> Self {
        Self {
            remaining: [0; 5],
            boost_multiplier: config.boost_multiplier,
            boost_grants_invulnerable: config.boost_grants_invulnerable,
        }
    }

    /// Start or restart an effect. Re-activation resets the counter, it never stacks.
    /// Negative durations clamp to zero.
    pub fn activate(&mut self, kind: EffectKind, ticks: i64) {
        let ticks = ticks.clamp(0, i64::from(u32::MAX)) as u32;
        self.remaining[kind.index()] = ticks;
        if kind == EffectKind::SpeedBoost && self.boost_grants_invulnerable {
            self.remaining[EffectKind::Invulnerable.index()] = ticks;
        }
    }

    /// Stop an effect immediately
    pub fn cancel(&mut self, kind: EffectKind) {
        self.remaining[kind.index()] = 0;
        if kind == EffectKind::SpeedBoost && self.boost_grants_invulnerable {
            self.remaining[EffectKind::Invulnerable.index()] = 0;
        }
    }

    /// Count every active timer down by one. Returns the effects that ran out.
    pub fn tick(&mut self) -> Vec<EffectKind> {
        let mut expired = Vec::new();
        for kind in EffectKind::ALL {
            let slot = &mut self.remaining[kind.index()];
            if *slot > 0 {
                *slot -= 1;
                if *slot == 0 {
                    expired.push(kind);
                }
            }
        }
        expired
    }

    #[inline]
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.remaining[kind.index()] > 0
    }

    #[inline]
    pub fn remaining(&self, kind: EffectKind) -> u32 {
        self.remaining[kind.index()]
    }

    /// Active effects with their remaining ticks
    pub fn active(&self) -> impl Iterator<Item = (EffectKind, u32)> + '_ {
        EffectKind::ALL
            .into_iter()
            .filter(|k| self.is_active(*k))
            .map(|k| (k, self.remaining(k)))
    }

    /// Whether lethal contact is currently ignored
    pub fn is_protected(&self) -> bool {
        self.is_active(EffectKind::Shield)
            || self.is_active(EffectKind::Invulnerable)
            || self.is_active(EffectKind::HitFlash)
    }

    /// Motion and spawn-rate multiplier (1.0 unless speed boost is active)
    pub fn speed_multiplier(&self) -> f32 {
        if self.is_active(EffectKind::SpeedBoost) {
            self.boost_multiplier
        } else {
            1.0
        }
    }

    pub fn reset(&mut self) {
        self.remaining = [0; 5];
    }
}
