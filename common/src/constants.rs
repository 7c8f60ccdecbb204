/// Tick interval in milliseconds for the game loop
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Default arena side length in cells (the arena is square)
pub const DEFAULT_GRID_SIZE: u16 = 40;

/// Snake length at the start of a session
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points awarded for normal food
pub const NORMAL_FOOD_SCORE: u32 = 10;

/// Points awarded for bonus food
pub const BONUS_FOOD_SCORE: u32 = 20;

/// Total lifetime of bonus and shield food in milliseconds
pub const TIMED_FOOD_LIFETIME_MS: i64 = 5000;

/// Portion of a timed food's lifetime spent blinking, in milliseconds
pub const BLINK_WINDOW_MS: i64 = 3000;

/// Blink toggle interval at the start of the blink window, in milliseconds
pub const BLINK_INTERVAL_SLOW_MS: f64 = 300.0;

/// Blink toggle interval just before expiry, in milliseconds
pub const BLINK_INTERVAL_FAST_MS: f64 = 50.0;

/// Spawn weight for bonus food
pub const BONUS_FOOD_WEIGHT: f32 = 0.3;

/// Spawn weight for shield food, only applied while no shield is held
pub const SHIELD_FOOD_WEIGHT: f32 = 0.3;
