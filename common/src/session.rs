use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::food::{Food, FoodKind};
use crate::snake::{Direction, Position, Snake};
use crate::util::PseudoRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Idle,
    Running,
    Over,
}

/// Emitted by [`GameSession::tick`] so the host can render and, on
/// `GameOver`, submit the final score exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Moved { head: Position },
    FoodEaten { position: Position, kind: FoodKind },
    FoodSpawned { position: Position, kind: FoodKind },
    FoodExpired { position: Position },
    ShieldConsumed { new_direction: Direction },
    GameOver { score: u32 },
}

/// One play session. The host owns the clock: it calls `tick(now_ms)` at its
/// own cadence (100 ms per `DEFAULT_TICK_INTERVAL_MS`) and latches input via
/// `set_direction` between ticks. Nothing here spawns timers or blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub width: u16,
    pub height: u16,
    pub snake: Snake,
    pending_direction: Direction,
    pub food: Food,
    pub score: u32,
    pub has_shield: bool,
    pub status: SessionStatus,
    rng: PseudoRandom,
}

impl GameSession {
    pub fn new(width: u16, height: u16, seed: u64) -> Self {
        let mut rng = PseudoRandom::new(seed);
        let snake = Snake::spawn(center_of(width, height), INITIAL_SNAKE_LENGTH, Direction::Right);
        let food = Food::new(free_cell(&mut rng, width, height, &snake), FoodKind::Normal, 0);
        GameSession {
            width,
            height,
            snake,
            pending_direction: Direction::Right,
            food,
            score: 0,
            has_shield: false,
            status: SessionStatus::Idle,
            rng,
        }
    }

    /// Resets the session and transitions Idle/Over to Running. The first
    /// food of a session is always normal. No-op while already Running.
    pub fn start(&mut self, now_ms: i64) {
        if self.status == SessionStatus::Running {
            return;
        }
        self.snake = Snake::spawn(
            center_of(self.width, self.height),
            INITIAL_SNAKE_LENGTH,
            Direction::Right,
        );
        self.pending_direction = Direction::Right;
        self.score = 0;
        self.has_shield = false;
        self.food = Food::new(
            free_cell(&mut self.rng, self.width, self.height, &self.snake),
            FoodKind::Normal,
            now_ms,
        );
        self.status = SessionStatus::Running;
    }

    /// Latches a direction change for the next tick. Reversing straight into
    /// the body is ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(self.snake.direction) {
            self.pending_direction = direction;
        }
    }

    /// Advances the simulation by one cell. No-op unless Running.
    pub fn tick(&mut self, now_ms: i64) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        if self.status != SessionStatus::Running {
            return out;
        }

        self.snake.direction = self.pending_direction;
        let new_head = self.snake.head().shifted(self.snake.direction);

        let hit_wall = new_head.x < 0
            || new_head.x >= self.width as i16
            || new_head.y < 0
            || new_head.y >= self.height as i16;
        let hit_self = self.snake.contains(new_head);

        if hit_wall || hit_self {
            if self.has_shield {
                // Near miss: burn the shield, swerve perpendicular, and
                // discard the rest of the tick. The snake does not move.
                self.has_shield = false;
                let options = self.snake.direction.perpendicular();
                let swerve = options[(self.rng.next_u32() % 2) as usize];
                self.snake.direction = swerve;
                self.pending_direction = swerve;
                out.push(SessionEvent::ShieldConsumed {
                    new_direction: swerve,
                });
                return out;
            }
            log::debug!("session over with score {}", self.score);
            self.status = SessionStatus::Over;
            out.push(SessionEvent::GameOver { score: self.score });
            return out;
        }

        self.snake.body.push_front(new_head);
        out.push(SessionEvent::Moved { head: new_head });

        if new_head == self.food.position {
            let kind = self.food.kind;
            if kind == FoodKind::Shield {
                self.has_shield = true;
            } else {
                self.score += kind.score_value();
            }
            out.push(SessionEvent::FoodEaten {
                position: new_head,
                kind,
            });
            self.respawn_food(now_ms, &mut out);
        } else {
            self.snake.body.pop_back();
        }

        if self.food.is_expired(now_ms) {
            out.push(SessionEvent::FoodExpired {
                position: self.food.position,
            });
            self.respawn_food(now_ms, &mut out);
        }

        out
    }

    fn respawn_food(&mut self, now_ms: i64, out: &mut Vec<SessionEvent>) {
        let position = free_cell(&mut self.rng, self.width, self.height, &self.snake);
        let kind = self.roll_food_kind();
        self.food = Food::new(position, kind, now_ms);
        out.push(SessionEvent::FoodSpawned { position, kind });
    }

    // Bonus 30% / Shield 30% / Normal 40%; while a shield is already held the
    // shield slice folds into Normal so unused shields cannot stack.
    fn roll_food_kind(&mut self) -> FoodKind {
        let roll = self.rng.next_f32();
        if roll < BONUS_FOOD_WEIGHT {
            FoodKind::Bonus
        } else if !self.has_shield && roll < BONUS_FOOD_WEIGHT + SHIELD_FOOD_WEIGHT {
            FoodKind::Shield
        } else {
            FoodKind::Normal
        }
    }
}

fn center_of(width: u16, height: u16) -> Position {
    Position {
        x: (width / 2) as i16,
        y: (height / 2) as i16,
    }
}

// Uniform cell, resampled while it lands on the snake.
fn free_cell(rng: &mut PseudoRandom, width: u16, height: u16, snake: &Snake) -> Position {
    loop {
        let position = Position {
            x: (rng.next_u32() % width as u32) as i16,
            y: (rng.next_u32() % height as u32) as i16,
        };
        if !snake.contains(position) {
            return position;
        }
    }
}
