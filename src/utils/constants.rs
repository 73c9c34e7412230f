pub const GRAVITY: f64 = 9.80665; // m/s^2
pub const SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3
pub const DENSITY_SCALE_HEIGHT: f64 = 8500.0; // m, exponential atmosphere

// Hard sanity bounds applied before any force computation
pub const MAX_SPEED: f64 = 700.0; // m/s
pub const MAX_ANGULAR_RATE: f64 = 25.0; // rad/s
pub const MIN_ALTITUDE: f64 = -500.0; // m
pub const MAX_ALTITUDE: f64 = 30_000.0; // m

// Forces below this magnitude are treated as invisible by ledger consumers
pub const LEDGER_VISIBLE_FORCE: f64 = 1.0; // N
