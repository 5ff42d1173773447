use std::ops::{Add, Mul, Neg, Sub};

use rosu_map::util::Pos;

use super::float_ext::FloatExt;

/// Two-dimensional [`Vector`] as used for playfield geometry.
pub type Vec2 = Vector<2>;

/// An `N`-dimensional vector of `f64` components.
///
/// The dimension is part of the type so mixing vectors of different
/// dimensionality is rejected at compile time.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "Vec<f64>", try_from = "Vec<f64>"))]
pub struct Vector<const N: usize> {
    components: [f64; N],
}

impl<const N: usize> Vector<N> {
    /// The zero vector.
    pub const ZERO: Self = Self {
        components: [0.0; N],
    };

    pub const fn from_components(components: [f64; N]) -> Self {
        Self { components }
    }

    pub const fn components(&self) -> &[f64; N] {
        &self.components
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.components
            .iter()
            .map(|c| c * c)
            .sum::<f64>()
            .sqrt()
    }

    /// The vector scaled to length 1.
    ///
    /// The zero vector has no direction and maps onto itself.
    pub fn unit(&self) -> Self {
        let length = self.length();

        if FloatExt::eq(length, 0.0) {
            return *self;
        }

        Self {
            components: self.components.map(|c| c / length),
        }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    fn zip_with(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut components = self.components;

        for (c, o) in components.iter_mut().zip(other.components) {
            *c = f(*c, o);
        }

        Self { components }
    }
}

impl Vector<2> {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            components: [x, y],
        }
    }

    pub const fn x(&self) -> f64 {
        self.components[0]
    }

    pub const fn y(&self) -> f64 {
        self.components[1]
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Pos> for Vector<2> {
    fn from(pos: Pos) -> Self {
        Self::new(f64::from(pos.x), f64::from(pos.y))
    }
}

impl<const N: usize> From<Vector<N>> for Vec<f64> {
    fn from(vector: Vector<N>) -> Self {
        vector.components.to_vec()
    }
}

impl<const N: usize> TryFrom<Vec<f64>> for Vector<N> {
    type Error = String;

    fn try_from(components: Vec<f64>) -> Result<Self, Self::Error> {
        let len = components.len();

        <[f64; N]>::try_from(components)
            .map(Self::from_components)
            .map_err(|_| format!("expected {N} components, got {len}"))
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            components: self.components.map(|c| -c),
        }
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            components: self.components.map(|c| c * rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn length_is_euclidean() {
        assert!((Vec2::new(3.0, 4.0).length() - 5.0).abs() < 1e-12);
        assert!((Vector::from_components([1.0, 2.0, 2.0]).length() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_unit_is_zero() {
        assert_eq!(Vec2::ZERO.unit(), Vec2::ZERO);
        assert_eq!(Vector::<3>::ZERO.unit(), Vector::<3>::ZERO);
    }

    #[test]
    fn element_wise_ops() {
        let a = Vec2::new(1.0, -2.0);
        let b = Vec2::new(0.5, 4.0);

        assert_eq!(a + b, Vec2::new(1.5, 2.0));
        assert_eq!(a - b, Vec2::new(0.5, -6.0));
        assert_eq!(-a, Vec2::new(-1.0, 2.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, -4.0));
    }

    #[test]
    fn components_from_vec() {
        assert_eq!(Vec2::try_from(vec![1.0, 2.0]), Ok(Vec2::new(1.0, 2.0)));
        assert!(Vector::<3>::try_from(vec![1.0, 2.0]).is_err());
        assert_eq!(Vec::from(Vec2::new(1.0, 2.0)), vec![1.0, 2.0]);
    }

    #[test]
    fn opposite_units_are_two_apart() {
        let v = Vec2::new(300.0, 0.0);

        assert!((((-v).unit() - v.unit()).length() - 2.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn unit_has_length_one(x in -1e4..1e4_f64, y in -1e4..1e4_f64) {
            prop_assume!(x.abs() > 1e-6 || y.abs() > 1e-6);

            let len = Vec2::new(x, y).unit().length();
            prop_assert!((len - 1.0).abs() < 1e-9);
        }
    }
}
