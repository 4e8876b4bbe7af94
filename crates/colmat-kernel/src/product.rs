//! Products, transposition and trace.
//!
//! Multiplication enforces coordinate-space composition at compile time: a
//! right operand mapping `S -> M` and a left operand mapping `M -> D`
//! produce an output mapping `S -> D`. Views created without tags use
//! [`Untagged`](colmat_view::Untagged) everywhere and always compose.

use crate::ScratchContext;
use colmat_alloc::{Real, Scalar, TensorResult};
use colmat_view::{Tagged, TensorRead, TensorWrite};

/// `out = left * right`, with `out[r][c] = sum_k left[r][k] * right[k][c]`.
///
/// Both operands are snapshotted into `scratch` first, so `out` may share
/// bytes with either of them.
///
/// # Errors
///
/// Propagates address errors from any of the views.
///
/// # Example
///
/// ```rust
/// use colmat_kernel::{multiply, ScratchContext};
/// use colmat_view::{space, MatrixView, TensorRead};
///
/// space!(Model);
/// space!(World);
/// space!(Camera);
///
/// let model_to_world = MatrixView::<f32, 4, Model, World>::identity().unwrap();
/// let world_to_camera = MatrixView::<f32, 4, World, Camera>::identity().unwrap();
/// let mut model_to_camera = MatrixView::<f32, 4, Model, Camera>::zeroed().unwrap();
///
/// let mut scratch = ScratchContext::new();
/// multiply(&world_to_camera, &model_to_world, &mut model_to_camera, &mut scratch).unwrap();
/// assert_eq!(model_to_camera.get(3, 3).unwrap(), 1.0);
/// ```
///
/// Swapping the operands does not compile, because `Camera` is not `Model`:
///
/// ```compile_fail
/// # use colmat_kernel::{multiply, ScratchContext};
/// # use colmat_view::{space, MatrixView};
/// # space!(Model);
/// # space!(World);
/// # space!(Camera);
/// # let model_to_world = MatrixView::<f32, 4, Model, World>::identity().unwrap();
/// # let world_to_camera = MatrixView::<f32, 4, World, Camera>::identity().unwrap();
/// # let mut model_to_camera = MatrixView::<f32, 4, Model, Camera>::zeroed().unwrap();
/// # let mut scratch = ScratchContext::new();
/// multiply(&model_to_world, &world_to_camera, &mut model_to_camera, &mut scratch).unwrap();
/// ```
pub fn multiply<T: Scalar, const N: usize, L, R, O>(
    left: &L,
    right: &R,
    out: &mut O,
    scratch: &mut ScratchContext<T, N>,
) -> TensorResult<()>
where
    L: TensorRead<T, N, N> + Tagged,
    R: TensorRead<T, N, N> + Tagged<Target = L::Source>,
    O: TensorWrite<T, N, N> + Tagged<Source = R::Source, Target = L::Target>,
{
    scratch.primary = left.to_columns()?;
    scratch.secondary = right.to_columns()?;
    let (lhs, rhs) = (&scratch.primary, &scratch.secondary);

    for (c, rhs_col) in rhs.iter().enumerate() {
        for (r, slot) in scratch.column.iter_mut().enumerate() {
            let mut sum = T::ZERO;
            for (k, lhs_col) in lhs.iter().enumerate() {
                sum = sum.wrapping_add(lhs_col[r].wrapping_mul(rhs_col[k]));
            }
            *slot = sum;
        }
        out.set_col(c, scratch.column)?;
    }
    Ok(())
}

/// `out = m * v` for a column vector `v` in the matrix's source space.
///
/// # Errors
///
/// Propagates address errors from any of the views.
pub fn multiply_vector<T: Scalar, const N: usize, M, V, O>(
    m: &M,
    v: &V,
    out: &mut O,
    scratch: &mut ScratchContext<T, N>,
) -> TensorResult<()>
where
    M: TensorRead<T, N, N> + Tagged,
    V: TensorRead<T, N, 1> + Tagged<Source = M::Source>,
    O: TensorWrite<T, N, 1> + Tagged<Source = M::Target>,
{
    scratch.primary = m.to_columns()?;
    scratch.row = v.get_col(0)?;
    mat_vec(&scratch.primary, &scratch.row, &mut scratch.column);
    out.set_col(0, scratch.column)
}

/// Apply a 4x4 homogeneous matrix to the point `p` (implicit `w = 1`).
///
/// When the resulting `w` is neither zero nor one the point is divided by
/// it, so projection matrices yield normalized device coordinates.
///
/// # Errors
///
/// Propagates address errors from any of the views.
pub fn transform_point<T: Real, M, P, O>(
    m: &M,
    p: &P,
    out: &mut O,
    scratch: &mut ScratchContext<T, 4>,
) -> TensorResult<()>
where
    M: TensorRead<T, 4, 4> + Tagged,
    P: TensorRead<T, 3, 1> + Tagged<Source = M::Source>,
    O: TensorWrite<T, 3, 1> + Tagged<Source = M::Target>,
{
    let [x, y, z] = p.get_col(0)?;
    scratch.primary = m.to_columns()?;
    scratch.row = [x, y, z, T::ONE];
    mat_vec(&scratch.primary, &scratch.row, &mut scratch.column);

    let [x, y, z, w] = scratch.column;
    let point = if w == T::ZERO || w == T::ONE {
        [x, y, z]
    } else {
        [x / w, y / w, z / w]
    };
    out.set_col(0, point)
}

fn mat_vec<T: Scalar, const N: usize>(m: &[[T; N]; N], v: &[T; N], out: &mut [T; N]) {
    for (r, slot) in out.iter_mut().enumerate() {
        let mut sum = T::ZERO;
        for (col, &x) in m.iter().zip(v) {
            sum = sum.wrapping_add(col[r].wrapping_mul(x));
        }
        *slot = sum;
    }
}

/// `out = transpose(input)`.
///
/// The input is snapshotted into `scratch` first, so `out` may share bytes
/// with `input`.
///
/// # Errors
///
/// Propagates address errors from either view.
pub fn transpose<T: Scalar, const N: usize>(
    input: &impl TensorRead<T, N, N>,
    out: &mut impl TensorWrite<T, N, N>,
    scratch: &mut ScratchContext<T, N>,
) -> TensorResult<()> {
    scratch.primary = input.to_columns()?;
    for (r, column) in scratch.primary.iter().enumerate() {
        out.set_row(r, *column)?;
    }
    Ok(())
}

/// Transpose `m` in place by swapping each pair above the diagonal with its
/// mirror. Needs no scratch.
///
/// # Errors
///
/// Propagates address errors from the view.
pub fn transpose_in_place<T: Scalar, const N: usize>(
    m: &mut impl TensorWrite<T, N, N>,
) -> TensorResult<()> {
    for r in 0..N {
        for c in (r + 1)..N {
            let upper = m.get(r, c)?;
            let lower = m.get(c, r)?;
            m.set(r, c, lower)?;
            m.set(c, r, upper)?;
        }
    }
    Ok(())
}

/// Sum of the main diagonal.
///
/// # Errors
///
/// Propagates address errors from the view.
pub fn trace<T: Scalar, const N: usize>(m: &impl TensorRead<T, N, N>) -> TensorResult<T> {
    let mut sum = T::ZERO;
    for i in 0..N {
        sum = sum.wrapping_add(m.get(i, i)?);
    }
    Ok(sum)
}
