//! Vector helpers.
//!
//! The array functions are the building blocks of the transform
//! constructors; the `*_view` forms apply them to vector views.

use colmat_alloc::{Real, Scalar, TensorResult};
use colmat_view::{TensorRead, TensorWrite};

/// Dot product.
#[must_use]
pub fn dot<T: Scalar, const N: usize>(a: &[T; N], b: &[T; N]) -> T {
    a.iter()
        .zip(b)
        .fold(T::ZERO, |acc, (&x, &y)| acc.wrapping_add(x.wrapping_mul(y)))
}

/// Cross product `a x b`.
#[must_use]
pub fn cross<T: Scalar>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [
        a[1].wrapping_mul(b[2]).wrapping_sub(a[2].wrapping_mul(b[1])),
        a[2].wrapping_mul(b[0]).wrapping_sub(a[0].wrapping_mul(b[2])),
        a[0].wrapping_mul(b[1]).wrapping_sub(a[1].wrapping_mul(b[0])),
    ]
}

/// Euclidean length.
#[must_use]
pub fn length<T: Real, const N: usize>(a: &[T; N]) -> T {
    dot(a, a).sqrt()
}

/// `a` scaled to unit length, or `None` if `a` has zero length.
#[must_use]
pub fn normalize<T: Real, const N: usize>(a: &[T; N]) -> Option<[T; N]> {
    let len = length(a);
    if len == T::ZERO {
        return None;
    }
    let mut out = *a;
    for x in &mut out {
        *x = *x / len;
    }
    Some(out)
}

/// Component-wise `a - b`.
#[must_use]
pub(crate) fn difference<T: Scalar, const N: usize>(a: &[T; N], b: &[T; N]) -> [T; N] {
    let mut out = *a;
    for (x, &y) in out.iter_mut().zip(b) {
        *x = x.wrapping_sub(y);
    }
    out
}

/// Dot product of two vector views.
///
/// # Errors
///
/// Propagates address errors from either view.
pub fn dot_view<T: Scalar, const N: usize>(
    a: &impl TensorRead<T, N, 1>,
    b: &impl TensorRead<T, N, 1>,
) -> TensorResult<T> {
    Ok(dot(&a.get_col(0)?, &b.get_col(0)?))
}

/// `out = a x b` for 3-vector views. `out` may share bytes with an input.
///
/// # Errors
///
/// Propagates address errors from any of the views.
pub fn cross_view<T: Scalar>(
    a: &impl TensorRead<T, 3, 1>,
    b: &impl TensorRead<T, 3, 1>,
    out: &mut impl TensorWrite<T, 3, 1>,
) -> TensorResult<()> {
    let product = cross(&a.get_col(0)?, &b.get_col(0)?);
    out.set_col(0, product)
}

/// Normalize a vector view in place and return its former length. A
/// zero-length vector is left as it is and yields `Ok(None)`.
///
/// # Errors
///
/// Propagates address errors from the view.
pub fn normalize_view<T: Real, const N: usize>(
    v: &mut impl TensorWrite<T, N, 1>,
) -> TensorResult<Option<T>> {
    let components = v.get_col(0)?;
    match normalize(&components) {
        Some(unit) => {
            v.set_col(0, unit)?;
            Ok(Some(length(&components)))
        }
        None => Ok(None),
    }
}
