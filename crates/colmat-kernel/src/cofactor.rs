//! Closed-form determinants and adjugate inversion.
//!
//! Determinants are Laplace expansions along the first row, specialized per
//! dimension; 2x2 is `ad - bc`. There is no pivoting or reordering, so the
//! same input always rounds the same way. The inverse is the adjugate
//! (transposed cofactor matrix) scaled by `1 / det`.
//!
//! Closed-form inversion is less robust than pivoted elimination for
//! ill-conditioned matrices; callers needing that should pivot themselves
//! with the [`rows`](crate::rows) primitives.

use crate::ScratchContext;
use colmat_alloc::{Real, Scalar, TensorResult};
use colmat_view::{Tagged, TensorRead, TensorWrite};

/// Determinant and adjugate of a column-major square array
/// (`self[col][row]`).
///
/// Implemented for `[[T; 2]; 2]`, `[[T; 3]; 3]` and `[[T; 4]; 4]`.
pub trait Cofactor<T: Scalar>: Copy {
    /// The determinant.
    fn determinant(&self) -> T;

    /// The adjugate: transpose of the cofactor matrix.
    #[must_use]
    fn adjugate(&self) -> Self;
}

impl<T: Scalar> Cofactor<T> for [[T; 2]; 2] {
    #[inline]
    fn determinant(&self) -> T {
        let (a, b) = (self[0][0], self[1][0]);
        let (c, d) = (self[0][1], self[1][1]);
        a.wrapping_mul(d).wrapping_sub(b.wrapping_mul(c))
    }

    fn adjugate(&self) -> Self {
        let (a, b) = (self[0][0], self[1][0]);
        let (c, d) = (self[0][1], self[1][1]);
        [[d, c.wrapping_neg()], [b.wrapping_neg(), a]]
    }
}

/// Signed minor of `(row, col)`: the determinant of `a` without that row
/// and column, negated when `row + col` is odd. `M` must be `N - 1`.
fn signed_minor<T: Scalar, const N: usize, const M: usize>(
    a: &[[T; N]; N],
    row: usize,
    col: usize,
) -> T
where
    [[T; M]; M]: Cofactor<T>,
{
    let mut sub = [[T::ZERO; M]; M];
    for (sc, c) in (0..N).filter(|&c| c != col).enumerate() {
        for (sr, r) in (0..N).filter(|&r| r != row).enumerate() {
            sub[sc][sr] = a[c][r];
        }
    }
    let minor = sub.determinant();
    if (row + col) % 2 == 0 {
        minor
    } else {
        minor.wrapping_neg()
    }
}

macro_rules! impl_cofactor {
    ($n:literal, $m:literal) => {
        impl<T: Scalar> Cofactor<T> for [[T; $n]; $n] {
            fn determinant(&self) -> T {
                let mut det = T::ZERO;
                for col in 0..$n {
                    let term = self[col][0].wrapping_mul(signed_minor::<T, $n, $m>(self, 0, col));
                    det = det.wrapping_add(term);
                }
                det
            }

            fn adjugate(&self) -> Self {
                let mut out = [[T::ZERO; $n]; $n];
                for (col, column) in out.iter_mut().enumerate() {
                    for (row, slot) in column.iter_mut().enumerate() {
                        *slot = signed_minor::<T, $n, $m>(self, col, row);
                    }
                }
                out
            }
        }
    };
}

impl_cofactor!(3, 2);
impl_cofactor!(4, 3);

/// Determinant of a square view.
///
/// # Errors
///
/// Propagates address errors from the view.
pub fn determinant<T: Scalar, const N: usize>(m: &impl TensorRead<T, N, N>) -> TensorResult<T>
where
    [[T; N]; N]: Cofactor<T>,
{
    Ok(m.to_columns()?.determinant())
}

/// Write the inverse of `m` to `out`.
///
/// Returns `Ok(Some(det))` on success. If the determinant is exactly zero
/// the matrix is singular: the result is `Ok(None)` and `out` is left
/// untouched. The output's spaces are the input's, swapped.
///
/// # Errors
///
/// Propagates address errors from either view.
///
/// # Example
///
/// ```rust
/// use colmat_kernel::{invert, ScratchContext};
/// use colmat_view::{MatrixView, TensorRead};
///
/// let m = MatrixView::<f64, 2>::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
/// let mut inv = MatrixView::<f64, 2>::zeroed().unwrap();
/// let mut scratch = ScratchContext::new();
///
/// assert_eq!(invert(&m, &mut inv, &mut scratch).unwrap(), Some(10.0));
/// assert!((inv.get(0, 0).unwrap() - 0.6).abs() < 1e-12);
/// ```
pub fn invert<T: Real, const N: usize, M, O>(
    m: &M,
    out: &mut O,
    scratch: &mut ScratchContext<T, N>,
) -> TensorResult<Option<T>>
where
    [[T; N]; N]: Cofactor<T>,
    M: TensorRead<T, N, N> + Tagged,
    O: TensorWrite<T, N, N> + Tagged<Source = M::Target, Target = M::Source>,
{
    scratch.primary = m.to_columns()?;
    match inverse_of(scratch) {
        Some(det) => {
            out.set_columns(&scratch.secondary)?;
            Ok(Some(det))
        }
        None => Ok(None),
    }
}

/// Invert `m` in place. Same contract as [`invert`]: a singular matrix
/// yields `Ok(None)` and is left as it was.
///
/// # Errors
///
/// Propagates address errors from the view.
pub fn invert_in_place<T: Real, const N: usize>(
    m: &mut impl TensorWrite<T, N, N>,
    scratch: &mut ScratchContext<T, N>,
) -> TensorResult<Option<T>>
where
    [[T; N]; N]: Cofactor<T>,
{
    scratch.primary = m.to_columns()?;
    match inverse_of(scratch) {
        Some(det) => {
            m.set_columns(&scratch.secondary)?;
            Ok(Some(det))
        }
        None => Ok(None),
    }
}

/// Invert `scratch.primary` into `scratch.secondary`.
fn inverse_of<T: Real, const N: usize>(scratch: &mut ScratchContext<T, N>) -> Option<T>
where
    [[T; N]; N]: Cofactor<T>,
{
    let det = scratch.primary.determinant();
    if det == T::ZERO {
        tracing::trace!(dimension = N, "singular matrix, no inverse");
        return None;
    }
    let inv_det = T::ONE / det;
    scratch.secondary = scratch.primary.adjugate();
    for x in scratch.secondary.iter_mut().flatten() {
        *x = *x * inv_det;
    }
    Some(det)
}
