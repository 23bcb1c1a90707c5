use std::time::Duration;

/// Tunable game parameters shared by the coordinator, lifecycle, and policies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// How long the level title card stays up before the player may act.
    pub level_start_delay: Duration,
    /// Lead-in before enemies start acting each round.
    pub turn_delay: Duration,
    /// Food the player starts the first level with.
    pub starting_food: i32,
    /// Food paid for every player move attempt, blocked or not.
    pub food_per_move: i32,
    /// Integrity removed from a damageable wall per chop.
    pub wall_damage: u32,
    pub points_per_food: i32,
    pub points_per_soda: i32,
    /// Delay between reaching the exit and reloading the level.
    pub restart_level_delay: Duration,
    /// Pace used for enemies placed without an explicit pace.
    pub default_enemy_pace: Duration,
}

impl GameConfig {
    pub const DEFAULT_LEVEL_START_DELAY: Duration = Duration::from_secs(2);
    pub const DEFAULT_TURN_DELAY: Duration = Duration::from_millis(100);
    pub const DEFAULT_STARTING_FOOD: i32 = 100;
    pub const DEFAULT_FOOD_PER_MOVE: i32 = 1;
    pub const DEFAULT_WALL_DAMAGE: u32 = 1;
    pub const DEFAULT_POINTS_PER_FOOD: i32 = 10;
    pub const DEFAULT_POINTS_PER_SODA: i32 = 20;
    pub const DEFAULT_RESTART_LEVEL_DELAY: Duration = Duration::from_secs(1);
    pub const DEFAULT_ENEMY_PACE: Duration = Duration::from_millis(100);

    pub fn new() -> Self {
        Self {
            level_start_delay: Self::DEFAULT_LEVEL_START_DELAY,
            turn_delay: Self::DEFAULT_TURN_DELAY,
            starting_food: Self::DEFAULT_STARTING_FOOD,
            food_per_move: Self::DEFAULT_FOOD_PER_MOVE,
            wall_damage: Self::DEFAULT_WALL_DAMAGE,
            points_per_food: Self::DEFAULT_POINTS_PER_FOOD,
            points_per_soda: Self::DEFAULT_POINTS_PER_SODA,
            restart_level_delay: Self::DEFAULT_RESTART_LEVEL_DELAY,
            default_enemy_pace: Self::DEFAULT_ENEMY_PACE,
        }
    }

    pub fn with_level_start_delay(mut self, delay: Duration) -> Self {
        self.level_start_delay = delay;
        self
    }

    pub fn with_turn_delay(mut self, delay: Duration) -> Self {
        self.turn_delay = delay;
        self
    }

    pub fn with_starting_food(mut self, food: i32) -> Self {
        self.starting_food = food;
        self
    }

    pub fn with_wall_damage(mut self, damage: u32) -> Self {
        self.wall_damage = damage;
        self
    }

    pub fn with_restart_level_delay(mut self, delay: Duration) -> Self {
        self.restart_level_delay = delay;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
