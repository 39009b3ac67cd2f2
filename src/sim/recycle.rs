//! Platform recycling
//!
//! Platforms that scroll far enough below the camera are moved back above
//! it instead of being destroyed, which is what makes the column endless.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::channel::{GameEvent, Outbox};
use super::pool::{Handle, Pool};
use super::spawn::spawn_above;
use super::state::{Collectible, Platform};
use crate::tuning::Tuning;

/// Move every platform at or below `scroll_offset + visibility_margin` to a
/// fresh spot above the scroll offset and spawn a collectible on it.
///
/// Also parks collectibles that fell out of the same region. Returns the
/// number of platforms recycled.
pub fn recycle_platforms(
    platforms: &mut Pool<Platform>,
    collectibles: &mut Pool<Collectible>,
    scroll_offset: f32,
    tuning: &Tuning,
    rng: &mut Pcg32,
    out: &mut Outbox,
) -> usize {
    let threshold = scroll_offset + tuning.visibility_margin;
    let mut recycled = 0;

    for slot in 0..platforms.len() as u32 {
        let handle = Handle::<Platform>::from_slot(slot);
        let Some(platform) = platforms.get(handle) else {
            continue;
        };
        if !platform.body.active || platform.body.pos.y < threshold {
            continue;
        }

        let y = scroll_offset - rng.random_range(tuning.recycle_gap_min..=tuning.recycle_gap_max);
        let x = rng.random_range(tuning.platform_x_min..=tuning.platform_x_max);
        let pos = Vec2::new(x, y);
        platforms.set_position(handle, pos, out);
        out.emit(GameEvent::PlatformRecycled {
            platform: handle.id(),
            pos,
        });
        log::debug!("Platform {} recycled to ({}, {})", slot, x, y);

        if let Some(platform) = platforms.get(handle) {
            spawn_above(platform, collectibles, out);
        }
        recycled += 1;
    }

    let fallen: Vec<Handle<Collectible>> = collectibles
        .iter_active()
        .filter(|(_, c)| c.body.pos.y >= threshold)
        .map(|(h, _)| h)
        .collect();
    for handle in fallen {
        collectibles.release(handle, out);
        log::debug!("Collectible {} fell out of view", handle.slot());
    }

    recycled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn setup(ys: &[f32]) -> (Pool<Platform>, Pool<Collectible>, Outbox) {
        let tuning = Tuning::default();
        let mut out = Outbox::new();
        let mut platforms = Pool::new(tuning.platform_size, ys.len());
        for &y in ys {
            platforms.acquire(Vec2::new(200.0, y), &mut out);
        }
        out.clear();
        (platforms, Pool::new(tuning.collectible_size, 4), out)
    }

    #[test]
    fn test_recycles_only_past_threshold() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let (mut platforms, mut collectibles, mut out) = setup(&[0.0, 150.0, 699.0, 700.0, 900.0]);

        let n = recycle_platforms(&mut platforms, &mut collectibles, 0.0, &tuning, &mut rng, &mut out);
        assert_eq!(n, 2);
        assert_eq!(collectibles.active_count(), 2);

        let ys: Vec<f32> = platforms.iter().map(|(_, p)| p.body.pos.y).collect();
        assert_eq!(&ys[..3], &[0.0, 150.0, 699.0]);
        for &y in &ys[3..] {
            assert!((-100.0..=-50.0).contains(&y), "y = {}", y);
        }
    }

    #[test]
    fn test_recycled_platform_stays_active() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let (mut platforms, mut collectibles, mut out) = setup(&[2000.0]);

        recycle_platforms(&mut platforms, &mut collectibles, 1000.0, &tuning, &mut rng, &mut out);
        let (_, platform) = platforms.iter().next().unwrap();
        assert!(platform.body.is_live());
        assert!((900.0..=950.0).contains(&platform.body.pos.y));
        assert!(
            platform.body.pos.x >= tuning.platform_x_min && platform.body.pos.x <= tuning.platform_x_max
        );
    }

    #[test]
    fn test_collectible_placed_on_new_position() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let (mut platforms, mut collectibles, mut out) = setup(&[800.0]);

        recycle_platforms(&mut platforms, &mut collectibles, 0.0, &tuning, &mut rng, &mut out);
        let (_, platform) = platforms.iter().next().unwrap();
        let (_, carrot) = collectibles.iter_active().next().unwrap();
        assert_eq!(
            carrot.body.pos,
            Vec2::new(platform.body.pos.x, platform.body.pos.y - tuning.platform_size.y)
        );
    }

    #[test]
    fn test_fallen_collectibles_parked() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let (mut platforms, mut collectibles, mut out) = setup(&[0.0]);
        let low = collectibles.acquire(Vec2::new(100.0, 750.0), &mut out);
        let high = collectibles.acquire(Vec2::new(100.0, 300.0), &mut out);

        recycle_platforms(&mut platforms, &mut collectibles, 0.0, &tuning, &mut rng, &mut out);
        assert!(!collectibles.get(low).unwrap().body.active);
        assert!(collectibles.get(high).unwrap().body.active);
    }
}
