//! End-of-session detection

use super::channel::GameEvent;
use super::pool::{Handle, Pool};
use super::state::{GamePhase, GameState, Platform};

/// Platform with the greatest y (furthest down), first in slot order on ties
///
/// Scans every platform regardless of its active flag.
pub fn find_bottom_most(platforms: &Pool<Platform>) -> Option<Handle<Platform>> {
    let mut bottom: Option<(Handle<Platform>, f32)> = None;
    for (handle, platform) in platforms.iter() {
        let y = platform.body.pos.y;
        match bottom {
            Some((_, bottom_y)) if y <= bottom_y => {}
            _ => bottom = Some((handle, y)),
        }
    }
    bottom.map(|(handle, _)| handle)
}

/// True when `player_y` is more than `margin` below the lowest platform
pub fn has_fallen(player_y: f32, platforms: &Pool<Platform>, margin: f32) -> bool {
    let Some(bottom) = find_bottom_most(platforms).and_then(|h| platforms.get(h)) else {
        debug_assert!(false, "termination check with no platforms");
        log::warn!("Termination check with no platforms; skipping");
        return false;
    };
    player_y > bottom.body.pos.y + margin
}

/// End the session if the player fell off the column
///
/// Fires `SessionEnded` at most once; returns true only on the frame it fires.
pub fn check_termination(state: &mut GameState) -> bool {
    if state.is_over() {
        return false;
    }
    if !has_fallen(state.player.pos.y, &state.platforms, state.tuning.termination_margin) {
        return false;
    }

    state.phase = GamePhase::GameOver;
    state.outbox.emit(GameEvent::SessionEnded { score: state.score });
    log::info!(
        "Session ended after {} frames: score={}, player y={}",
        state.frame,
        state.score,
        state.player.pos.y
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::channel::Outbox;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn column(ys: &[f32]) -> Pool<Platform> {
        let mut out = Outbox::new();
        let mut pool = Pool::new(Vec2::new(190.0, 47.0), ys.len());
        for &y in ys {
            pool.acquire(Vec2::new(100.0, y), &mut out);
        }
        pool
    }

    #[test]
    fn test_bottom_most_picks_greatest_y() {
        let pool = column(&[0.0, 600.0, 150.0]);
        assert_eq!(find_bottom_most(&pool).unwrap().slot(), 1);
    }

    #[test]
    fn test_bottom_most_tie_keeps_first() {
        let pool = column(&[300.0, 300.0, 100.0]);
        assert_eq!(find_bottom_most(&pool).unwrap().slot(), 0);
    }

    #[test]
    fn test_bottom_most_includes_inactive() {
        let mut pool = column(&[0.0, 900.0]);
        let mut out = Outbox::new();
        let h = pool.handle(1).unwrap();
        pool.release(h, &mut out);
        assert_eq!(find_bottom_most(&pool), Some(h));
    }

    #[test]
    fn test_fall_threshold_is_strict() {
        let pool = column(&[0.0, 150.0, 300.0, 450.0, 600.0]);
        assert!(!has_fallen(800.0, &pool, 200.0));
        assert!(has_fallen(800.5, &pool, 200.0));
        assert!(has_fallen(900.0, &pool, 200.0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no platforms")]
    fn test_empty_column_is_a_programming_error() {
        let pool = Pool::<Platform>::new(Vec2::new(190.0, 47.0), 0);
        has_fallen(10_000.0, &pool, 200.0);
    }

    #[test]
    fn test_fires_once() {
        let mut state = GameState::new(1, Tuning::default());
        state.outbox.clear();
        state.player.pos.y = 10_000.0;

        assert!(check_termination(&mut state));
        assert!(state.is_over());
        assert!(!check_termination(&mut state));
        let ended = state
            .outbox
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
            .count();
        assert_eq!(ended, 1);
    }
}
