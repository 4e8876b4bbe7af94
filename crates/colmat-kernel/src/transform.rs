//! Rotation, translation, scaling, look-at and projection construction.
//!
//! Every constructor overwrites its whole output. Homogeneous 4x4 results
//! keep the translation in the last column, matching the column-major
//! layout graphics APIs expect.
//!
//! # Rotations
//!
//! Axis-angle rotations use Rodrigues' formula,
//!
//! ```text
//! R = I cos(t) + (a a^T)(1 - cos(t)) + K sin(t)
//! ```
//!
//! where `K` is the cross-product matrix of the axis `a`. The axis is not
//! normalized; a non-unit axis gives a non-orthogonal result.

use crate::vector::{cross, difference, dot, length, normalize};
use crate::ScratchContext;
use colmat_alloc::{Real, Scalar, TensorError, TensorResult};
use colmat_view::{identity_columns, Columns, TensorWrite};

/// Column-major Rodrigues rotation.
fn rodrigues<T: Real>(axis: &[T; 3], angle: T) -> Columns<T, 3, 3> {
    let (s, c) = (angle.sin(), angle.cos());
    let t = T::ONE - c;
    let [x, y, z] = *axis;
    // row form:
    // [ c + x x t    x y t - z s  x z t + y s ]
    // [ y x t + z s  c + y y t    y z t - x s ]
    // [ z x t - y s  z y t + x s  c + z z t   ]
    [
        [c + x * x * t, y * x * t + z * s, z * x * t - y * s],
        [x * y * t - z * s, c + y * y * t, z * y * t + x * s],
        [x * z * t + y * s, y * z * t - x * s, c + z * z * t],
    ]
}

/// Embed a 3x3 block in a 4x4 identity.
fn homogeneous<T: Scalar>(block: &Columns<T, 3, 3>) -> Columns<T, 4, 4> {
    let mut out = identity_columns::<T, 4, 4>();
    for (column, src) in out.iter_mut().zip(block) {
        column[..3].copy_from_slice(src);
    }
    out
}

/// 3x3 rotation by `angle` radians about the unit vector `axis`.
///
/// # Errors
///
/// Propagates address errors from the output view.
pub fn rotation_3x3<T: Real>(
    axis: [T; 3],
    angle: T,
    out: &mut impl TensorWrite<T, 3, 3>,
) -> TensorResult<()> {
    out.set_columns(&rodrigues(&axis, angle))
}

/// Homogeneous 4x4 rotation by `angle` radians about the unit vector
/// `axis`.
///
/// # Errors
///
/// Propagates address errors from the output view.
pub fn rotation_4x4<T: Real>(
    axis: [T; 3],
    angle: T,
    out: &mut impl TensorWrite<T, 4, 4>,
) -> TensorResult<()> {
    out.set_columns(&homogeneous(&rodrigues(&axis, angle)))
}

/// 2x2 counter-clockwise rotation by `angle` radians.
///
/// # Errors
///
/// Propagates address errors from the output view.
pub fn rotation_2d<T: Real>(angle: T, out: &mut impl TensorWrite<T, 2, 2>) -> TensorResult<()> {
    let (s, c) = (angle.sin(), angle.cos());
    out.set_columns(&[[c, s], [-s, c]])
}

/// Homogeneous rotation about the x axis.
///
/// # Errors
///
/// Propagates address errors from the output view.
pub fn rotation_x<T: Real>(angle: T, out: &mut impl TensorWrite<T, 4, 4>) -> TensorResult<()> {
    let (s, c) = (angle.sin(), angle.cos());
    let (o, l) = (T::ZERO, T::ONE);
    out.set_columns(&homogeneous(&[[l, o, o], [o, c, s], [o, -s, c]]))
}

/// Homogeneous rotation about the y axis.
///
/// # Errors
///
/// Propagates address errors from the output view.
pub fn rotation_y<T: Real>(angle: T, out: &mut impl TensorWrite<T, 4, 4>) -> TensorResult<()> {
    let (s, c) = (angle.sin(), angle.cos());
    let (o, l) = (T::ZERO, T::ONE);
    out.set_columns(&homogeneous(&[[c, o, -s], [o, l, o], [s, o, c]]))
}

/// Homogeneous rotation about the z axis.
///
/// # Errors
///
/// Propagates address errors from the output view.
pub fn rotation_z<T: Real>(angle: T, out: &mut impl TensorWrite<T, 4, 4>) -> TensorResult<()> {
    let (s, c) = (angle.sin(), angle.cos());
    let (o, l) = (T::ZERO, T::ONE);
    out.set_columns(&homogeneous(&[[c, s, o], [-s, c, o], [o, o, l]]))
}

/// Homogeneous 2D translation: identity with `t` in the last column.
///
/// # Errors
///
/// Propagates address errors from the output view.
pub fn translation_2d<T: Scalar>(
    t: [T; 2],
    out: &mut impl TensorWrite<T, 3, 3>,
) -> TensorResult<()> {
    let mut columns = identity_columns::<T, 3, 3>();
    columns[2][..2].copy_from_slice(&t);
    out.set_columns(&columns)
}

/// Homogeneous 3D translation: identity with `t` in the last column.
///
/// # Errors
///
/// Propagates address errors from the output view.
pub fn translation_3d<T: Scalar>(
    t: [T; 3],
    out: &mut impl TensorWrite<T, 4, 4>,
) -> TensorResult<()> {
    let mut columns = identity_columns::<T, 4, 4>();
    columns[3][..3].copy_from_slice(&t);
    out.set_columns(&columns)
}

/// Diagonal scaling matrix.
///
/// # Errors
///
/// Propagates address errors from the output view.
pub fn scaling<T: Scalar, const N: usize>(
    diagonal: [T; N],
    out: &mut impl TensorWrite<T, N, N>,
) -> TensorResult<()> {
    let mut columns = [[T::ZERO; N]; N];
    for (i, (column, d)) in columns.iter_mut().zip(diagonal).enumerate() {
        column[i] = d;
    }
    out.set_columns(&columns)
}

/// Unit vector along `v`, or `None` if `v` is zero. Components are scaled
/// by the largest magnitude first, so tiny and huge inputs normalize without
/// underflow or overflow.
fn direction<T: Real>(v: &[T; 3]) -> Option<[T; 3]> {
    let largest = v.iter().fold(T::ZERO, |m, x| m.max(x.abs()));
    if largest == T::ZERO {
        return None;
    }
    normalize(&v.map(|x| x / largest))
}

/// Build the camera basis into `scratch.basis` as `[side, up, forward]`.
fn camera_basis<T: Real>(
    eye: &[T; 3],
    target: &[T; 3],
    up: &[T; 3],
    scratch: &mut ScratchContext<T, 4>,
) -> TensorResult<()> {
    let Some(forward) = direction(&difference(target, eye)) else {
        tracing::trace!("look-at eye and target coincide");
        return Err(TensorError::DegenerateBasis);
    };
    let side = direction(up)
        .map(|up| cross(&forward, &up))
        .filter(|side| length(side) > T::EPSILON)
        .and_then(|side| direction(&side));
    let Some(side) = side else {
        tracing::trace!("look-at forward is parallel to up");
        return Err(TensorError::DegenerateBasis);
    };

    scratch.basis = [side, cross(&side, &forward), forward];
    Ok(())
}

/// Camera-to-world (inverse view) matrix for a camera at `eye` looking at
/// `target`.
///
/// The basis is `forward = normalize(target - eye)`,
/// `side = normalize(forward x up)` and `up' = side x forward`; the columns
/// of the result are `side`, `up'`, `-forward` and `eye`. A camera at the
/// origin looking down `-z` with `+y` up yields the identity.
///
/// # Errors
///
/// Returns [`TensorError::DegenerateBasis`] if `eye == target`, `up` is zero
/// or `up` is parallel to the view direction; `out` is left untouched. The
/// distance between `eye` and `target` may be arbitrarily small. Propagates
/// address errors from the output view.
pub fn look_at<T: Real>(
    eye: [T; 3],
    target: [T; 3],
    up: [T; 3],
    out: &mut impl TensorWrite<T, 4, 4>,
    scratch: &mut ScratchContext<T, 4>,
) -> TensorResult<()> {
    camera_basis(&eye, &target, &up, scratch)?;
    let [side, true_up, forward] = scratch.basis;
    let o = T::ZERO;

    scratch.primary = [
        [side[0], side[1], side[2], o],
        [true_up[0], true_up[1], true_up[2], o],
        [-forward[0], -forward[1], -forward[2], o],
        [eye[0], eye[1], eye[2], T::ONE],
    ];
    out.set_columns(&scratch.primary)
}

/// World-to-camera (view) matrix: the inverse of [`look_at`].
///
/// The rotation block is the transposed basis and the translation is the
/// eye position expressed in camera coordinates, negated.
///
/// # Errors
///
/// Same as [`look_at`].
pub fn view_look_at<T: Real>(
    eye: [T; 3],
    target: [T; 3],
    up: [T; 3],
    out: &mut impl TensorWrite<T, 4, 4>,
    scratch: &mut ScratchContext<T, 4>,
) -> TensorResult<()> {
    camera_basis(&eye, &target, &up, scratch)?;
    let [side, true_up, forward] = scratch.basis;
    let o = T::ZERO;

    scratch.primary = [
        [side[0], true_up[0], -forward[0], o],
        [side[1], true_up[1], -forward[1], o],
        [side[2], true_up[2], -forward[2], o],
        [
            -dot(&side, &eye),
            -dot(&true_up, &eye),
            dot(&forward, &eye),
            T::ONE,
        ],
    ];
    out.set_columns(&scratch.primary)
}

/// Right-handed perspective projection mapping view-space depth
/// `[-near, -far]` to clip-space z in `[-1, 1]`.
///
/// `fov_y` is the vertical field of view in radians. Callers must supply
/// `aspect != 0`, `near != far` and `0 < fov_y < pi`.
///
/// # Errors
///
/// Propagates address errors from the output view.
pub fn perspective<T: Real>(
    fov_y: T,
    aspect: T,
    near: T,
    far: T,
    out: &mut impl TensorWrite<T, 4, 4>,
) -> TensorResult<()> {
    let two = T::from_f64(2.0);
    let f = T::ONE / (fov_y / two).tan();
    let depth = near - far;
    let o = T::ZERO;

    out.set_columns(&[
        [f / aspect, o, o, o],
        [o, f, o, o],
        [o, o, (far + near) / depth, -T::ONE],
        [o, o, two * far * near / depth, o],
    ])
}

/// Right-handed orthographic projection of the box
/// `[left, right] x [bottom, top] x [-near, -far]` onto the clip cube.
///
/// Callers must supply a box with non-zero extent on every axis.
///
/// # Errors
///
/// Propagates address errors from the output view.
pub fn orthographic<T: Real>(
    left: T,
    right: T,
    bottom: T,
    top: T,
    near: T,
    far: T,
    out: &mut impl TensorWrite<T, 4, 4>,
) -> TensorResult<()> {
    let two = T::from_f64(2.0);
    let (width, height, depth) = (right - left, top - bottom, far - near);
    let o = T::ZERO;

    out.set_columns(&[
        [two / width, o, o, o],
        [o, two / height, o, o],
        [o, o, -two / depth, o],
        [
            -(right + left) / width,
            -(top + bottom) / height,
            -(far + near) / depth,
            T::ONE,
        ],
    ])
}
