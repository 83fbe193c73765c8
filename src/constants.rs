// Betting odds constants
// Even-money (red/black, odd/even) win chance on a European single-zero wheel.
pub const ROULETTE_WIN_PROB: f64 = 18.0 / 37.0;
// American double-zero wheel, for comparison runs.
pub const AMERICAN_WIN_PROB: f64 = 18.0 / 38.0;
// Idealized fair coin: zero house edge.
pub const FAIR_WIN_PROB: f64 = 0.5;

// Chart animation timing
pub const ANIMATION_FRAME_MS: u64 = 80;

// Input boundary thresholds - values below these are rejected before a
// process is constructed. The simulation core itself never re-validates.
pub const MIN_INITIAL_BALANCE: f64 = 0.01;
pub const MIN_INITIAL_BET: f64 = 0.01;
pub const MIN_TABLE_LIMIT: f64 = 1.0;
pub const MIN_SIM_COUNT: u32 = 1;
