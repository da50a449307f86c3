use serde::{Deserialize, Serialize};

use crate::position::PositionCategory;

/// Per-player count of bench-to-field substitutions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotationCounter {
    counts: Vec<u32>,
}

impl RotationCounter {
    pub fn new(players: usize) -> Self {
        Self { counts: vec![0; players] }
    }

    pub fn count(&self, player: usize) -> u32 {
        self.counts.get(player).copied().unwrap_or(0)
    }

    /// Credit a rotation for an Off→On move made while the clock runs.
    /// Returns whether one was credited.
    pub fn record_change(
        &mut self,
        player: usize,
        old: PositionCategory,
        new: PositionCategory,
        running: bool,
    ) -> bool {
        if running && !old.is_on_field() && new.is_on_field() {
            self.credit(player);
            true
        } else {
            false
        }
    }

    /// Quarter start: everyone already on the field rotates in.
    pub fn credit_on_field(&mut self, positions: &[PositionCategory]) -> usize {
        let mut credited = 0;
        for (player, position) in positions.iter().enumerate() {
            if position.is_on_field() {
                self.credit(player);
                credited += 1;
            }
        }
        credited
    }

    fn credit(&mut self, player: usize) {
        if let Some(count) = self.counts.get_mut(player) {
            *count += 1;
        }
    }
}
