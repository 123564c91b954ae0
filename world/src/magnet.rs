//! Timed auto-collect aura granted by the magnet pickup.

use std::{collections::BTreeSet, time::Duration};

use snake_arcade_core::Cell;

/// Magnet aura state, independent of the ground pickup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct MagnetEffect {
    expires_at: Option<Duration>,
}

/// Outcome of evaluating the aura for a single tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum MagnetPulse {
    /// The aura is not active.
    Inactive,
    /// The aura reached its expiry and switched off without collecting.
    Expired,
    /// The aura is active; contains the apples it consumed, possibly none.
    Collected(Vec<Cell>),
}

impl MagnetEffect {
    /// Switches the aura on until `now + duration`.
    pub(crate) fn activate(&mut self, now: Duration, duration: Duration) -> Duration {
        let expires_at = now.saturating_add(duration);
        self.expires_at = Some(expires_at);
        expires_at
    }

    pub(crate) const fn expires_at(&self) -> Option<Duration> {
        self.expires_at
    }

    pub(crate) const fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }

    /// Applies the aura around `head`, removing every apple within `radius`.
    pub(crate) fn pulse(
        &mut self,
        now: Duration,
        head: Cell,
        radius: f32,
        apples: &mut BTreeSet<Cell>,
    ) -> MagnetPulse {
        let Some(expires_at) = self.expires_at else {
            return MagnetPulse::Inactive;
        };

        if now >= expires_at {
            self.expires_at = None;
            return MagnetPulse::Expired;
        }

        let collected: Vec<Cell> = apples
            .iter()
            .copied()
            .filter(|apple| apple.distance(head) <= radius)
            .collect();
        apples.retain(|apple| !collected.contains(apple));
        MagnetPulse::Collected(collected)
    }
}
