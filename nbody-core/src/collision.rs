//! Pairwise sphere overlap checks.

use crate::engine::Body;

/// True when the spheres around `a` and `b` overlap.
///
/// Touching spheres (distance exactly `r_a + r_b`) do not count.
pub fn in_contact(a: &Body, b: &Body) -> bool {
    a.pos.distance(b.pos) < a.radius + b.radius
}

/// First overlapping pair `(i, j)` with `i < j`, scanning in registry order
pub fn find_collision(bodies: &[Body]) -> Option<(usize, usize)> {
    for (i, a) in bodies.iter().enumerate() {
        for (j, b) in bodies.iter().enumerate().skip(i + 1) {
            if in_contact(a, b) {
                return Some((i, j));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn at(x: f64) -> Body {
        Body::at_rest(1.0, DVec3::new(x, 0.0, 0.0))
    }

    #[test]
    fn touching_spheres_do_not_collide() {
        assert!(!in_contact(&at(0.0), &at(2.0)));
    }

    #[test]
    fn overlapping_spheres_collide() {
        assert!(in_contact(&at(0.0), &at(1.999)));
    }

    #[test]
    fn a_body_never_collides_with_itself() {
        assert_eq!(find_collision(&[at(0.0)]), None);
        assert_eq!(find_collision(&[]), None);
    }

    #[test]
    fn reports_first_pair_in_order() {
        let bodies = [at(0.0), at(10.0), at(20.0), at(21.0)];
        assert_eq!(find_collision(&bodies), Some((2, 3)));
    }

    #[test]
    fn mixed_radii_use_sum() {
        let small = at(0.0).with_radius(0.5);
        let big = at(3.0).with_radius(2.6);
        assert!(in_contact(&small, &big));
        assert!(!in_contact(&small, &at(3.0)));
    }
}
