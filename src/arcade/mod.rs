//! Minimal reference host
//!
//! Stands in for the physics/rendering collaborator so the core can be
//! driven headless:
//! - Gravity and velocity integration for the player
//! - One-way landing on physics-enabled platforms (sets touching-ground)
//! - AABB overlap between the player and live collectibles
//! - A camera that keeps the player vertically centered
//!
//! Collectibles are kept where the core places them (no gravity).

pub mod aabb;
pub mod collision;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use aabb::Aabb;
pub use collision::{Landing, land_on_platform};

use crate::consts::{GAME_HEIGHT, GRAVITY};
use crate::sim::{Direction, EntityId, EntityKind, HostRequest, Overlap, TickInput};

/// Host-side physics settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcadeConfig {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Viewport height; the camera centers the player within it
    pub viewport_height: f32,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            viewport_height: GAME_HEIGHT,
        }
    }
}

/// A body as the host sees it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HostBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub active: bool,
    pub visible: bool,
    pub physics_enabled: bool,
}

impl HostBody {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    fn collides(&self) -> bool {
        self.active && self.physics_enabled
    }
}

/// Headless physics and camera
#[derive(Debug, Clone)]
pub struct ArcadeHost {
    pub config: ArcadeConfig,
    pub player: HostBody,
    pub platforms: Vec<HostBody>,
    pub collectibles: Vec<HostBody>,
    platform_size: Vec2,
    collectible_size: Vec2,
    scroll_offset: f32,
    touching_ground: bool,
}

impl ArcadeHost {
    pub fn new(config: ArcadeConfig, player_size: Vec2, platform_size: Vec2, collectible_size: Vec2) -> Self {
        Self {
            config,
            player: HostBody {
                size: player_size,
                active: true,
                visible: true,
                physics_enabled: true,
                ..Default::default()
            },
            platforms: Vec::new(),
            collectibles: Vec::new(),
            platform_size,
            collectible_size,
            scroll_offset: 0.0,
            touching_ground: false,
        }
    }

    /// Host for a session built from `tuning`
    pub fn for_tuning(config: ArcadeConfig, tuning: &crate::Tuning) -> Self {
        Self::new(
            config,
            tuning.player_size,
            tuning.platform_size,
            tuning.collectible_size,
        )
    }

    #[inline]
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    #[inline]
    pub fn touching_ground(&self) -> bool {
        self.touching_ground
    }

    /// Apply the core's requests in order
    pub fn apply<I: IntoIterator<Item = HostRequest>>(&mut self, requests: I) {
        for request in requests {
            match request {
                HostRequest::SetVelocity { entity, vel } => self.body_mut(entity).vel = vel,
                HostRequest::SetPosition { entity, pos } => self.body_mut(entity).pos = pos,
                HostRequest::SetActive { entity, active } => self.body_mut(entity).active = active,
                HostRequest::SetVisible { entity, visible } => {
                    self.body_mut(entity).visible = visible
                }
                HostRequest::SetPhysicsEnabled { entity, enabled } => {
                    self.body_mut(entity).physics_enabled = enabled
                }
            }
        }
    }

    /// Integrate one step, resolve landings and move the camera
    pub fn step(&mut self, dt: f32) {
        let player = &mut self.player;
        player.vel.y += self.config.gravity * dt;
        let prev_bottom = player.aabb().bottom();
        player.pos += player.vel * dt;

        self.touching_ground = false;
        let body = player.aabb();
        for platform in self.platforms.iter().filter(|p| p.collides()) {
            let landing = land_on_platform(prev_bottom, player.vel.y, &body, &platform.aabb());
            if landing.hit {
                player.pos.y = landing.rest_y;
                player.vel.y = 0.0;
                self.touching_ground = true;
                break;
            }
        }

        self.scroll_offset = self.player.pos.y - self.config.viewport_height * 0.5;
    }

    /// Player/collectible intersections for this frame
    pub fn overlaps(&self) -> Vec<Overlap> {
        let player = self.player.aabb();
        self.collectibles
            .iter()
            .enumerate()
            .filter(|(_, c)| c.collides() && player.overlaps(&c.aabb()))
            .map(|(slot, _)| {
                Overlap::new(
                    EntityId::PLAYER,
                    EntityId::new(EntityKind::Collectible, slot as u32),
                )
            })
            .collect()
    }

    /// Everything the core needs for one frame
    pub fn frame_input(&self, direction: Direction) -> TickInput {
        TickInput {
            direction,
            touching_ground: self.touching_ground,
            scroll_offset: self.scroll_offset,
            player_pos: self.player.pos,
            player_vel: self.player.vel,
            overlaps: self.overlaps(),
        }
    }

    fn body_mut(&mut self, entity: EntityId) -> &mut HostBody {
        let (bodies, size) = match entity.kind {
            EntityKind::Player => return &mut self.player,
            EntityKind::Platform => (&mut self.platforms, self.platform_size),
            EntityKind::Collectible => (&mut self.collectibles, self.collectible_size),
        };
        let slot = entity.slot as usize;
        if slot >= bodies.len() {
            bodies.resize(
                slot + 1,
                HostBody {
                    size,
                    ..Default::default()
                },
            );
        }
        &mut bodies[slot]
    }
}
