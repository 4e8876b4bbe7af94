//! Scalar component kinds.
//!
//! A [`Scalar`] is a plain numeric type with a fixed byte width that can be
//! stored in a [`ScalarBuffer`](crate::ScalarBuffer) in native byte order.
//! [`Real`] adds the floating-point operations that division-based kernels
//! (inversion, normalization, rotations) need.
//!
//! # Integer Arithmetic
//!
//! Kernels generic over [`Scalar`] do arithmetic through the `wrapping_*`
//! methods rather than the operators. Integer kinds wrap on overflow in
//! every build profile; float kinds follow IEEE 754 as usual.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A numeric component that can live in a scalar buffer.
///
/// Implemented for `f32`, `f64`, `i32` and `i64`.
pub trait Scalar: Copy + PartialEq + PartialOrd + Default + fmt::Debug + 'static {
    /// Width of one component in bytes.
    const WIDTH: usize;
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;

    /// Fixed-size byte representation, `WIDTH` bytes long.
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default + Copy;

    /// Encode in native byte order.
    fn to_ne(self) -> Self::Bytes;

    /// Decode from native byte order.
    fn from_ne(bytes: Self::Bytes) -> Self;

    /// `self + rhs`, wrapping for integers.
    #[must_use]
    fn wrapping_add(self, rhs: Self) -> Self;

    /// `self - rhs`, wrapping for integers.
    #[must_use]
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// `self * rhs`, wrapping for integers.
    #[must_use]
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// `-self`, wrapping for integers (`MIN` negates to itself).
    #[must_use]
    fn wrapping_neg(self) -> Self;
}

/// A floating-point scalar.
pub trait Real:
    Scalar
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Machine epsilon.
    const EPSILON: Self;

    /// Square root.
    fn sqrt(self) -> Self;
    /// Sine (radians).
    fn sin(self) -> Self;
    /// Cosine (radians).
    fn cos(self) -> Self;
    /// Tangent (radians).
    fn tan(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Larger of two values.
    fn max(self, other: Self) -> Self;
    /// Lossy conversion from `f64`.
    fn from_f64(value: f64) -> Self;
    /// Widening conversion to `f64`.
    fn to_f64(self) -> f64;
}

macro_rules! impl_scalar {
    (@arith float) => {
        #[inline]
        fn wrapping_add(self, rhs: Self) -> Self {
            self + rhs
        }

        #[inline]
        fn wrapping_sub(self, rhs: Self) -> Self {
            self - rhs
        }

        #[inline]
        fn wrapping_mul(self, rhs: Self) -> Self {
            self * rhs
        }

        #[inline]
        fn wrapping_neg(self) -> Self {
            -self
        }
    };
    (@arith int) => {
        #[inline]
        fn wrapping_add(self, rhs: Self) -> Self {
            Self::wrapping_add(self, rhs)
        }

        #[inline]
        fn wrapping_sub(self, rhs: Self) -> Self {
            Self::wrapping_sub(self, rhs)
        }

        #[inline]
        fn wrapping_mul(self, rhs: Self) -> Self {
            Self::wrapping_mul(self, rhs)
        }

        #[inline]
        fn wrapping_neg(self) -> Self {
            Self::wrapping_neg(self)
        }
    };
    ($ty:ty, $width:literal, $zero:expr, $one:expr, $kind:ident) => {
        impl Scalar for $ty {
            const WIDTH: usize = $width;
            const ZERO: Self = $zero;
            const ONE: Self = $one;

            type Bytes = [u8; $width];

            #[inline]
            fn to_ne(self) -> Self::Bytes {
                self.to_ne_bytes()
            }

            #[inline]
            fn from_ne(bytes: Self::Bytes) -> Self {
                <$ty>::from_ne_bytes(bytes)
            }

            impl_scalar!(@arith $kind);
        }
    };
}

impl_scalar!(f32, 4, 0.0, 1.0, float);
impl_scalar!(f64, 8, 0.0, 1.0, float);
impl_scalar!(i32, 4, 0, 1, int);
impl_scalar!(i64, 8, 0, 1, int);

macro_rules! impl_real {
    ($ty:ident) => {
        impl Real for $ty {
            const EPSILON: Self = $ty::EPSILON;

            #[inline]
            fn sqrt(self) -> Self {
                $ty::sqrt(self)
            }

            #[inline]
            fn sin(self) -> Self {
                $ty::sin(self)
            }

            #[inline]
            fn cos(self) -> Self {
                $ty::cos(self)
            }

            #[inline]
            fn tan(self) -> Self {
                $ty::tan(self)
            }

            #[inline]
            fn abs(self) -> Self {
                $ty::abs(self)
            }

            #[inline]
            fn max(self, other: Self) -> Self {
                $ty::max(self, other)
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_f64(value: f64) -> Self {
                value as $ty
            }

            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }
        }
    };
}

impl_real!(f32);
impl_real!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Scalar>(value: T) -> T {
        T::from_ne(value.to_ne())
    }

    #[test]
    fn test_widths() {
        assert_eq!(f32::WIDTH, 4);
        assert_eq!(f64::WIDTH, 8);
        assert_eq!(i32::WIDTH, 4);
        assert_eq!(i64::WIDTH, 8);
        assert_eq!(<f32 as Scalar>::to_ne(1.0).as_ref().len(), 4);
        assert_eq!(<i64 as Scalar>::to_ne(1).as_ref().len(), 8);
    }

    #[test]
    fn test_native_encoding() {
        assert_eq!(<f32 as Scalar>::to_ne(1.5), 1.5f32.to_ne_bytes());
        assert_eq!(<i32 as Scalar>::to_ne(-7), (-7i32).to_ne_bytes());
        assert_eq!(roundtrip(-0.25f64), -0.25);
        assert_eq!(roundtrip(i64::MIN), i64::MIN);
    }

    #[test]
    fn test_identities() {
        assert_eq!(f32::ZERO + f32::ONE, 1.0);
        assert_eq!(Scalar::wrapping_mul(i32::ONE, 5), 5);
    }

    #[test]
    fn test_integer_arithmetic_wraps() {
        assert_eq!(Scalar::wrapping_add(i32::MAX, 1), i32::MIN);
        assert_eq!(Scalar::wrapping_sub(i64::MIN, 1), i64::MAX);
        assert_eq!(Scalar::wrapping_mul(1 << 16, 1 << 16), 0i32);
        assert_eq!(Scalar::wrapping_neg(i32::MIN), i32::MIN);
    }

    #[test]
    fn test_float_arithmetic_is_plain() {
        assert_eq!(Scalar::wrapping_add(f32::MAX, f32::MAX), f32::INFINITY);
        assert_eq!(Scalar::wrapping_sub(0.5f64, 0.25), 0.25);
        assert_eq!(Scalar::wrapping_mul(1.5f64, -2.0), -3.0);
        assert_eq!(Scalar::wrapping_neg(0.0f32).to_bits(), (-0.0f32).to_bits());
    }

    #[test]
    fn test_real_ops() {
        assert_eq!(Real::sqrt(9.0f64), 3.0);
        assert_eq!(Real::abs(-2.0f32), 2.0);
        assert_eq!(Real::max(-2.0f64, 1.0), 1.0);
        assert!((Real::cos(0.0f64) - 1.0).abs() < f64::EPSILON);
        assert_eq!(<f32 as Real>::from_f64(0.5), 0.5f32);
        assert_eq!(Real::to_f64(0.5f32), 0.5);
    }
}
