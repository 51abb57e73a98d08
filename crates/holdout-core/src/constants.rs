//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Match ---

/// Survive this long to win (seconds).
pub const MATCH_DURATION_SECS: u64 = 180;

/// Match length in ticks.
pub const MATCH_DURATION_TICKS: u64 = MATCH_DURATION_SECS * TICK_RATE as u64;

/// Each wave lasts this long (seconds).
pub const WAVE_LENGTH_SECS: u64 = 30;

/// Wave length in ticks.
pub const WAVE_LENGTH_TICKS: u64 = WAVE_LENGTH_SECS * TICK_RATE as u64;

// --- Spawn director ---

/// Enemy population target is `ENEMY_BASE_POPULATION + wave * ENEMY_POPULATION_PER_WAVE`.
pub const ENEMY_BASE_POPULATION: u32 = 5;
pub const ENEMY_POPULATION_PER_WAVE: u32 = 2;

/// Supply population target is `SUPPLY_BASE_POPULATION + wave * SUPPLY_POPULATION_PER_WAVE`.
pub const SUPPLY_BASE_POPULATION: u32 = 3;
pub const SUPPLY_POPULATION_PER_WAVE: u32 = 1;

/// Ticks between enemy spawns (one per second).
pub const ENEMY_SPAWN_INTERVAL_TICKS: u32 = 60;

/// Ticks between supply spawns (one per five seconds).
pub const SUPPLY_SPAWN_INTERVAL_TICKS: u32 = 300;

/// Enemies placed before the first tick of a match.
pub const INITIAL_ENEMIES: u32 = 5;

/// Supplies requested before the first tick, capped by the wave-1 target.
pub const INITIAL_SUPPLIES: u32 = 5;

// --- Player ---

pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Pixels per tick.
pub const PLAYER_BASE_SPEED: f64 = 5.0;

/// Contact immunity after being hit (one second).
pub const INVINCIBILITY_TICKS: u32 = 60;

/// Knockback distance before resistance is applied (pixels).
pub const KNOCKBACK_DISTANCE: f64 = 20.0;

pub const DASH_DURATION_TICKS: u32 = 15;

/// Dash displacement per tick (pixels).
pub const DASH_SPEED: f64 = 15.0;

pub const DASH_COOLDOWN_TICKS: u32 = 60;

/// Speed boost window (five seconds).
pub const SPEED_BOOST_TICKS: u32 = 300;

/// Points for a Normal supply. Its listed value is 1 but it always paid 50.
pub const NORMAL_SUPPLY_POINTS: u64 = 50;

// --- Hitboxes (pixels, full width/height) ---

pub const PLAYER_SIZE: f64 = 25.0;
pub const NORMAL_ENEMY_SIZE: f64 = 20.0;
pub const FAST_ENEMY_SIZE: f64 = 18.0;
pub const TANK_ENEMY_SIZE: f64 = 25.0;
pub const SUPPLY_SIZE: f64 = 15.0;
pub const BULLET_SIZE: f64 = 8.0;

// --- Cosmetics ---

/// Wobble phase advance per tick for enemies.
pub const ENEMY_WOBBLE_STEP: f64 = 0.1;

/// Wobble amplitude (pixels).
pub const ENEMY_WOBBLE_AMPLITUDE: f64 = 2.0;

/// Bob phase advance per tick for supplies.
pub const SUPPLY_BOB_STEP: f64 = 0.05;

/// Bob amplitude (pixels).
pub const SUPPLY_BOB_AMPLITUDE: f64 = 5.0;

// --- Front end ---

/// Maximum callsign length in characters.
pub const CALLSIGN_MAX_LEN: usize = 15;

/// Duration of the access-granted screen (three seconds).
pub const ACCESS_GRANTED_TICKS: u32 = 180;

// --- Static layout ---

/// Grid size for border tiles and interior blocks (pixels).
pub const WALL_TILE: f64 = 50.0;

/// Interior blocks scattered over the arena.
pub const LAYOUT_BLOCKS: usize = 25;

/// Side lengths an interior block can take.
pub const LAYOUT_BLOCK_SIDES: [f64; 3] = [50.0, 100.0, 150.0];
