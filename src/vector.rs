/*
 * Vector Module
 *
 * A small 2D vector value type used by the flocking rules and the quadtree.
 * Every operator returns a new value; vector-vector operations are
 * componentwise and vector-scalar operations broadcast the scalar.
 *
 * Note on magnitude: `magnitude()` is the squared length. Speed limits and
 * anything else compared against it are expressed in the same squared units.
 */

use std::ops::{Add, AddAssign, Div, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared length, `x² + y²`.
    #[inline]
    pub fn magnitude(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Divides both components by `magnitude()`.
    ///
    /// This does not produce a unit vector: the result has length `1 / |v|`.
    /// A zero vector yields NaN components; callers check the magnitude first.
    #[inline]
    pub fn normalize(self) -> Self {
        let magnitude = self.magnitude();
        Self::new(self.x / magnitude, self.y / magnitude)
    }

    /// Rescales the vector so that `magnitude()` equals `target`, keeping its direction.
    #[inline]
    pub fn with_magnitude(self, target: f32) -> Self {
        self * (target / self.magnitude()).sqrt()
    }

    /// Euclidean distance between two positions.
    #[inline]
    pub fn distance(self, other: Vector2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of the vector in radians, `atan2(y, x)`.
    #[inline]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }
}

macro_rules! impl_vector_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Vector2 {
            type Output = Vector2;

            #[inline]
            fn $method(self, rhs: Vector2) -> Vector2 {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl $trait<f32> for Vector2 {
            type Output = Vector2;

            #[inline]
            fn $method(self, rhs: f32) -> Vector2 {
                Vector2::new(self.x $op rhs, self.y $op rhs)
            }
        }
    };
}

impl_vector_op!(Add, add, +);
impl_vector_op!(Sub, sub, -);
impl_vector_op!(Mul, mul, *);
impl_vector_op!(Div, div, /);

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn scalar_and_vector_operands_are_distinct() {
        let v = Vector2::new(2.0, 4.0);
        assert_eq!(v + 1.0, Vector2::new(3.0, 5.0));
        assert_eq!(v + Vector2::new(1.0, 2.0), Vector2::new(3.0, 6.0));
        assert_eq!(v - 1.0, Vector2::new(1.0, 3.0));
        assert_eq!(v * Vector2::new(0.5, 2.0), Vector2::new(1.0, 8.0));
        assert_eq!(v / 2.0, Vector2::new(1.0, 2.0));
        assert_eq!(v / Vector2::new(2.0, 4.0), Vector2::new(1.0, 1.0));
    }

    #[test]
    fn magnitude_is_squared_length() {
        assert_eq!(Vector2::new(3.0, 4.0).magnitude(), 25.0);
    }

    #[test]
    fn normalize_divides_by_squared_length() {
        let n = Vector2::new(3.0, 4.0).normalize();
        assert!((n.x - 3.0 / 25.0).abs() < EPS);
        assert!((n.y - 4.0 / 25.0).abs() < EPS);
    }

    #[test]
    fn normalize_zero_is_nan() {
        let n = Vector2::ZERO.normalize();
        assert!(n.x.is_nan() && n.y.is_nan());
    }

    #[test]
    fn with_magnitude_keeps_direction() {
        let v = Vector2::new(6.0, 8.0).with_magnitude(4.0);
        assert!((v.magnitude() - 4.0).abs() < EPS);
        assert!((v.angle() - Vector2::new(6.0, 8.0).angle()).abs() < EPS);
    }

    #[test]
    fn distance_is_euclidean_and_symmetric() {
        let a = Vector2::new(1.0, 1.0);
        let b = Vector2::new(4.0, 5.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn add_assign_accumulates() {
        let mut v = Vector2::new(1.0, -1.0);
        v += Vector2::new(0.5, 0.5);
        assert_eq!(v, Vector2::new(1.5, -0.5));
    }
}
