//! Bunny Jump - An endless vertical platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, recycling, progression, scoring)
//! - `tuning`: Data-driven game balance
//! - `arcade`: Minimal reference host (gravity, landing, overlap, camera)

pub mod arcade;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// World coordinates follow screen convention: larger y is further down.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one core frame per step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 480.0;
    pub const GAME_HEIGHT: f32 = 640.0;

    /// Initial column of platforms
    pub const PLATFORM_COUNT: usize = 5;
    pub const PLATFORM_SPACING: f32 = 150.0;
    /// Horizontal placement range for platforms
    pub const PLATFORM_X_MIN: f32 = 80.0;
    pub const PLATFORM_X_MAX: f32 = 400.0;
    /// Platform display size (grass tile at half scale)
    pub const PLATFORM_WIDTH: f32 = 190.0;
    pub const PLATFORM_HEIGHT: f32 = 47.0;

    /// Distance below the scroll offset at which a platform is recycled
    pub const VISIBILITY_MARGIN: f32 = 700.0;
    /// Gap range above the scroll offset for recycled platforms
    pub const RECYCLE_GAP_MIN: f32 = 50.0;
    pub const RECYCLE_GAP_MAX: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 240.0;
    pub const PLAYER_START_Y: f32 = 320.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 95.0;
    /// Vertical velocity applied on every bounce (negative is up)
    pub const BOUNCE_VELOCITY: f32 = -300.0;
    /// Horizontal speed while a direction is held
    pub const HORIZONTAL_SPEED: f32 = 200.0;

    /// Distance below the lowest platform at which the session ends
    pub const TERMINATION_MARGIN: f32 = 200.0;

    /// Collectible defaults
    pub const COLLECTIBLE_WIDTH: f32 = 29.0;
    pub const COLLECTIBLE_HEIGHT: f32 = 38.0;
    /// The seed collectible starts below the first screen so it is never seen
    pub const SEED_COLLECTIBLE_X: f32 = 240.0;
    pub const SEED_COLLECTIBLE_Y: f32 = 800.0;
    /// Expected simultaneous collectibles; exceeding it is logged
    pub const COLLECTIBLE_POOL_TARGET: usize = 8;

    /// Gravity applied by the reference host (pixels/s²)
    pub const GRAVITY: f32 = 200.0;
}
