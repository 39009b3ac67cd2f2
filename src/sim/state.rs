//! Session state and core entity types
//!
//! [`GameState`] is the session context: it owns both pools, the player,
//! the score and the RNG. Components receive the pieces they need from it
//! explicitly; there is no global state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::channel::{EntityId, EntityKind, HostRequest, Outbox};
use super::pool::{Body, Pool, Pooled};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bouncing up the column
    Playing,
    /// Player fell off; nothing else happens in this session
    GameOver,
}

/// Player texture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Stand,
    Jump,
}

/// A platform in the column. Only the recycler ever moves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub body: Body,
}

impl Pooled for Platform {
    const KIND: EntityKind = EntityKind::Platform;

    fn from_body(body: Body) -> Self {
        Self { body }
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// A collectible carrot. Active bodies are visible and physics-enabled,
/// parked ones are neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub body: Body,
}

impl Pooled for Collectible {
    const KIND: EntityKind = EntityKind::Collectible;

    fn from_body(body: Body) -> Self {
        Self { body }
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// The player character. Position and velocity are mirrored from the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Host reported ground contact this frame
    pub grounded: bool,
    pub pose: Pose,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            grounded: false,
            pose: Pose::Stand,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x * 0.5
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance values for this session
    pub tuning: Tuning,
    /// Placement RNG, advanced only by level building and recycling
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Frames ticked while playing
    pub frame: u64,
    /// Collectibles picked up
    pub score: u64,
    pub player: Player,
    pub platforms: Pool<Platform>,
    pub collectibles: Pool<Collectible>,
    /// Pending host requests and events
    #[serde(skip)]
    pub outbox: Outbox,
}

impl GameState {
    /// Build a new level with the given seed
    ///
    /// The outbox starts filled with the requests that place every initial
    /// platform, the seed collectible and the player.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "session built from invalid tuning");

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut outbox = Outbox::new();

        let mut platforms = Pool::new(tuning.platform_size, tuning.platform_count);
        for i in 0..tuning.platform_count {
            let x = rng.random_range(tuning.platform_x_min..=tuning.platform_x_max);
            let y = tuning.platform_spacing * i as f32;
            platforms.acquire(Vec2::new(x, y), &mut outbox);
        }

        // Seed instance starts below the first screen; later ones come from recycling
        let mut collectibles = Pool::new(tuning.collectible_size, tuning.collectible_pool_target);
        collectibles.acquire(tuning.seed_collectible, &mut outbox);

        let player = Player::new(tuning.player_start, tuning.player_size);
        outbox.request(HostRequest::SetPosition {
            entity: EntityId::PLAYER,
            pos: player.pos,
        });

        log::info!(
            "Level built: seed={}, platforms={}, player at ({}, {})",
            seed,
            platforms.len(),
            player.pos.x,
            player.pos.y
        );

        Self {
            seed,
            tuning,
            rng,
            phase: GamePhase::Playing,
            frame: 0,
            score: 0,
            player,
            platforms,
            collectibles,
            outbox,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
