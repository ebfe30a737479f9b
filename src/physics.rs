//! Heart physics: pointer repulsion, spring return and friction
//!
//! One call to [`integrate`] advances the field by one frame. There is no
//! delta time; the simulation steps once per painted frame.

use crate::config::PhysicsConfig;
use crate::hearts::{Heart, HeartField};
use egui::Pos2;
use rayon::prelude::*;

/// Repulsion magnitude for a heart of `size` at `dist` from the pointer.
///
/// Quadratic falloff to zero at the radius, scaled by `reference_size / size`
/// so smaller hearts are pushed harder. Zero when `dist` is 0 (no direction)
/// or at/beyond the radius.
pub fn repulsion_force(dist: f32, size: f32, physics: &PhysicsConfig) -> f32 {
    if !(dist > 0.0 && dist < physics.mouse_radius) {
        return 0.0;
    }
    let t = (physics.mouse_radius - dist) / physics.mouse_radius;
    let size_factor = physics.reference_size / size;
    t * t * physics.repulsion_strength * size_factor
}

pub fn step_heart(heart: &mut Heart, pointer: Pos2, physics: &PhysicsConfig) {
    let away = heart.position - pointer;
    let dist = away.length();

    let force = repulsion_force(dist, heart.size, physics);
    if force > 0.0 {
        heart.velocity += (away / dist) * force;
    }

    // Spring back toward home
    heart.velocity += (heart.home - heart.position) * physics.return_speed;

    heart.velocity *= physics.friction;
    heart.position += heart.velocity;
}

/// Advance every heart by one frame
pub fn integrate(field: &mut HeartField, pointer: Pos2, physics: &PhysicsConfig) {
    field
        .hearts_mut()
        .par_iter_mut()
        .for_each(|heart| step_heart(heart, pointer, physics));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::hearts::{HeartColor, HeartGlyph};
    use crate::pointer::FAR_AWAY;
    use egui::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn heart_at(position: Pos2, home: Pos2, size: f32) -> Heart {
        Heart {
            home,
            position,
            velocity: Vec2::ZERO,
            size,
            color: HeartColor::PinkMain,
            glyph: HeartGlyph::Suit,
            opacity: 1.0,
            rotation: 0.0,
        }
    }

    #[test]
    fn single_tick_push_from_nearby_pointer() {
        let physics = PhysicsConfig::default();
        let mut heart = heart_at(Pos2::new(100.0, 100.0), Pos2::new(100.0, 100.0), 60.0);

        step_heart(&mut heart, Pos2::new(150.0, 100.0), &physics);

        let expected = -7.68 * physics.friction;
        assert!((heart.velocity.x - expected).abs() < 1e-4, "{:?}", heart.velocity);
        assert_eq!(heart.velocity.y, 0.0);
        assert!((heart.position.x - (100.0 + expected)).abs() < 1e-4);
    }

    #[test]
    fn force_falls_off_monotonically_and_vanishes_at_radius() {
        let physics = PhysicsConfig::default();
        let mut previous = f32::INFINITY;
        for step in 1..250 {
            let force = repulsion_force(step as f32, 60.0, &physics);
            assert!(force < previous, "force rose at dist {step}");
            assert!(force > 0.0);
            previous = force;
        }
        assert_eq!(repulsion_force(250.0, 60.0, &physics), 0.0);
        assert_eq!(repulsion_force(400.0, 60.0, &physics), 0.0);
    }

    #[test]
    fn smaller_hearts_are_pushed_harder() {
        let physics = PhysicsConfig::default();
        let small = repulsion_force(50.0, 30.0, &physics);
        let reference = repulsion_force(50.0, 60.0, &physics);
        assert!((small - 2.0 * reference).abs() < 1e-4);
    }

    #[test]
    fn pointer_on_top_of_heart_skips_repulsion() {
        let physics = PhysicsConfig::default();
        let spot = Pos2::new(40.0, 40.0);
        let mut heart = heart_at(spot, spot, 60.0);

        step_heart(&mut heart, spot, &physics);

        assert_eq!(heart.velocity, Vec2::ZERO);
        assert_eq!(heart.position, spot);
    }

    #[test]
    fn hearts_settle_home_when_pointer_is_far_away() {
        let physics = PhysicsConfig {
            return_speed: 0.05,
            ..PhysicsConfig::default()
        };
        let home = Pos2::new(300.0, 200.0);
        let mut heart = heart_at(Pos2::new(100.0, 350.0), home, 48.0);
        heart.velocity = Vec2::new(25.0, -10.0);

        for _ in 0..500 {
            step_heart(&mut heart, FAR_AWAY, &physics);
        }

        assert!((heart.position - home).length() < 0.01, "{:?}", heart.position);
        assert!(heart.velocity.length() < 1e-3);
    }

    #[test]
    fn integrate_matches_per_heart_steps() {
        let mut rng = StdRng::seed_from_u64(5);
        let physics = PhysicsConfig::default();
        let mut field =
            HeartField::initialize(64, Vec2::new(500.0, 500.0), &FieldConfig::default(), &mut rng);
        let mut expected = field.clone();
        let pointer = Pos2::new(250.0, 250.0);

        integrate(&mut field, pointer, &physics);
        for heart in expected.hearts_mut() {
            step_heart(heart, pointer, &physics);
        }

        assert_eq!(field.hearts(), expected.hearts());
    }

    #[test]
    fn empty_field_integrates_without_work() {
        let mut field = HeartField::default();
        integrate(&mut field, Pos2::ZERO, &PhysicsConfig::default());
        assert!(field.is_empty());
    }
}
