use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::snake::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Normal,
    Bonus,
    Shield,
}

impl FoodKind {
    pub fn score_value(self) -> u32 {
        match self {
            FoodKind::Normal => NORMAL_FOOD_SCORE,
            FoodKind::Bonus => BONUS_FOOD_SCORE,
            FoodKind::Shield => 0,
        }
    }

    /// Normal food stays on the board until eaten; the other kinds time out.
    pub fn expires(self) -> bool {
        !matches!(self, FoodKind::Normal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
    pub spawned_at_ms: i64,
}

impl Food {
    pub fn new(position: Position, kind: FoodKind, spawned_at_ms: i64) -> Self {
        Food {
            position,
            kind,
            spawned_at_ms,
        }
    }

    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.spawned_at_ms
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.kind.expires() && self.age_ms(now_ms) >= TIMED_FOOD_LIFETIME_MS
    }

    /// Blink state for rendering, as a pure function of elapsed time.
    ///
    /// Timed food blinks through the last `BLINK_WINDOW_MS` of its life; the
    /// toggle interval shrinks linearly from the slow interval at the start
    /// of the window down to the fast one at expiry. Has no effect on
    /// collision or scoring.
    pub fn visible_at(&self, now_ms: i64) -> bool {
        if !self.kind.expires() {
            return true;
        }
        let age = self.age_ms(now_ms);
        let blink_start = TIMED_FOOD_LIFETIME_MS - BLINK_WINDOW_MS;
        if age < blink_start {
            return true;
        }
        let remaining = (TIMED_FOOD_LIFETIME_MS - age).max(0) as f64;
        let progress = 1.0 - remaining / BLINK_WINDOW_MS as f64;
        let interval =
            BLINK_INTERVAL_SLOW_MS - (BLINK_INTERVAL_SLOW_MS - BLINK_INTERVAL_FAST_MS) * progress;
        (age as f64 / interval) as i64 % 2 == 0
    }
}
