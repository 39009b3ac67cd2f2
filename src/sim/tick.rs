//! Per-frame simulation step
//!
//! Frame order: overlaps → recycling (with spawning) → player → wrap →
//! termination. After the session ends every entry point is a no-op.

use super::channel::{Overlap, TickInput};
use super::ledger::collect;
use super::player::{apply_wrap, update_player};
use super::recycle::recycle_platforms;
use super::state::GameState;
use super::termination::check_termination;

/// Advance the session by one host frame
///
/// Overlaps carried in `input` are delivered before recycling, so a
/// collectible spawned this frame cannot be collected until the next one.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_over() {
        return;
    }
    state.frame += 1;

    deliver_overlaps(state, &input.overlaps);

    recycle_platforms(
        &mut state.platforms,
        &mut state.collectibles,
        input.scroll_offset,
        &state.tuning,
        &mut state.rng,
        &mut state.outbox,
    );

    update_player(&mut state.player, input, &state.tuning, &mut state.outbox);
    apply_wrap(&mut state.player, state.tuning.game_width, &mut state.outbox);

    check_termination(state);
}

/// Feed overlap notifications to the collection ledger
///
/// Hosts that dispatch overlaps separately from the frame step may call this
/// directly. Returns how many collectibles were collected.
pub fn deliver_overlaps(state: &mut GameState, overlaps: &[Overlap]) -> usize {
    if state.is_over() {
        return 0;
    }
    overlaps
        .iter()
        .filter_map(Overlap::player_collectible)
        .filter(|&slot| collect(&mut state.collectibles, &mut state.score, slot, &mut state.outbox))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::channel::{Direction, EntityId, EntityKind, GameEvent, HostRequest};
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn playing_input(state: &GameState) -> TickInput {
        TickInput {
            player_pos: state.player.pos,
            player_vel: state.player.vel,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_steers_player() {
        let mut state = GameState::new(12345, Tuning::default());
        state.outbox.clear();
        let input = TickInput {
            direction: Direction::Right,
            ..playing_input(&state)
        };
        tick(&mut state, &input);

        assert_eq!(state.frame, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.outbox.requests().contains(&HostRequest::SetVelocity {
            entity: EntityId::PLAYER,
            vel: Vec2::new(state.tuning.horizontal_speed, 0.0),
        }));
    }

    #[test]
    fn test_scroll_recycles_bottom_platforms() {
        let mut state = GameState::new(3, Tuning::default());
        state.outbox.clear();
        // Camera climbed so platforms at 450 and 600 are below scroll + 700
        let input = TickInput {
            scroll_offset: -300.0,
            player_pos: Vec2::new(240.0, -100.0),
            ..Default::default()
        };
        tick(&mut state, &input);

        let recycled = state
            .outbox
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PlatformRecycled { .. }))
            .count();
        assert_eq!(recycled, 2);
        // Seed collectible at y=800 is below the threshold and gets parked
        assert_eq!(state.collectibles.active_count(), 2);
    }

    #[test]
    fn test_seed_collectible_parked_on_first_frame() {
        let mut state = GameState::new(6, Tuning::default());
        state.outbox.clear();
        let input = playing_input(&state);
        tick(&mut state, &input);

        let seed = state.collectibles.handle(0).unwrap();
        assert!(!state.collectibles.get(seed).unwrap().body.active);
        assert_eq!(state.collectibles.active_count(), 0);
        assert!(state.outbox.requests().contains(&HostRequest::SetActive {
            entity: seed.id(),
            active: false,
        }));
    }

    #[test]
    fn test_overlap_collects_within_tick() {
        let mut state = GameState::new(9, Tuning::default());
        let seed = EntityId::new(EntityKind::Collectible, 0);
        let input = TickInput {
            overlaps: vec![Overlap::new(EntityId::PLAYER, seed), Overlap::new(seed, EntityId::PLAYER)],
            ..playing_input(&state)
        };
        tick(&mut state, &input);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_nothing_happens_after_game_over() {
        let mut state = GameState::new(4, Tuning::default());
        let input = TickInput {
            player_pos: Vec2::new(240.0, 5000.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.is_over());
        let frame = state.frame;
        state.outbox.clear();

        let seed = EntityId::new(EntityKind::Collectible, 0);
        tick(
            &mut state,
            &TickInput {
                touching_ground: true,
                overlaps: vec![Overlap::new(EntityId::PLAYER, seed)],
                ..Default::default()
            },
        );
        assert_eq!(state.frame, frame);
        assert_eq!(state.score, 0);
        assert!(state.outbox.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());

        let inputs = [
            TickInput {
                scroll_offset: -100.0,
                touching_ground: true,
                ..Default::default()
            },
            TickInput {
                scroll_offset: -400.0,
                direction: Direction::Left,
                ..Default::default()
            },
            TickInput {
                scroll_offset: -900.0,
                player_pos: Vec2::new(-100.0, -700.0),
                ..Default::default()
            },
        ];

        for input in &inputs {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        let layout = |s: &GameState| s.platforms.iter().map(|(_, p)| p.body.pos).collect::<Vec<_>>();
        assert_eq!(layout(&state1), layout(&state2));
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.phase, state2.phase);
    }
}
