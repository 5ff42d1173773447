pub trait FloatExt: Sized {
    const EPS: Self;

    /// `self == other`
    fn eq(self, other: Self) -> bool {
        self.almost_eq(other, Self::EPS)
    }

    /// `|self - other| <= acceptable_difference`
    fn almost_eq(self, other: Self, acceptable_difference: Self) -> bool;

    /// `self != other`
    fn not_eq(self, other: Self) -> bool {
        !self.eq(other)
    }
}

macro_rules! impl_float_ext {
    ( $ty:ty ) => {
        impl FloatExt for $ty {
            const EPS: Self = <$ty>::EPSILON;

            fn almost_eq(self, other: Self, acceptable_difference: Self) -> bool {
                (self - other).abs() <= acceptable_difference
            }
        }
    };
}

impl_float_ext!(f32);
impl_float_ext!(f64);
