//! Fixed-size column-major vectors and matrices.
//!
//! colmat provides 2-, 3- and 4-dimensional vectors and square matrices
//! whose components live in byte buffers laid out exactly as column-major
//! graphics APIs expect, together with the linear algebra that real-time
//! graphics and simulation code needs.
//!
//! # Architecture
//!
//! ```text
//! colmat-alloc    ScalarBuffer, addressing, Scalar / Real, TensorError
//!      |
//! colmat-view     TensorRead / TensorWrite, FixedView, SharedView, TensorArray
//!      |
//! colmat-kernel   arithmetic, multiply, invert, rows, transforms, ScratchContext
//!      |
//! colmat          aliases, prelude
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use colmat::prelude::*;
//!
//! # fn main() -> Result<(), TensorError> {
//! let mut scratch = Scratch4f::new();
//!
//! let mut model = Mat4f::zeroed()?;
//! rotation_z(std::f32::consts::FRAC_PI_2, &mut model)?;
//!
//! let mut view = Mat4f::zeroed()?;
//! view_look_at([0.0, 0.0, 5.0], [0.0; 3], [0.0, 1.0, 0.0], &mut view, &mut scratch)?;
//!
//! let mut model_view = Mat4f::zeroed()?;
//! multiply(&view, &model, &mut model_view, &mut scratch)?;
//!
//! // Column-major bytes, ready for a graphics API.
//! assert_eq!(model_view.raw_buffer().capacity(), 64);
//! # Ok(())
//! # }
//! ```
//!
//! # Shared Buffers
//!
//! Views over one [`ScalarBuffer`] see each other's writes. A
//! [`TensorArray`] packs many tensors into one buffer and moves a cursor
//! view over them in O(1); see [`colmat_view`] for the details.
//!
//! # Threads
//!
//! Buffers, views and shared bases are `!Send` and `!Sync`. Each thread
//! builds its own tensors and its own [`ScratchContext`]; data crosses
//! threads as copied bytes ([`ScalarBuffer::to_vec`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use colmat_alloc::{
    addressing, Alignment, AllocOptions, BufferKind, ByteOrder, Real, Scalar, ScalarBuffer,
    TensorError, TensorResult,
};
pub use colmat_kernel::{
    arith, cofactor, product, rows, transform, vector, Cofactor, ScratchContext, Tolerance,
};
pub use colmat_view::{
    identity_columns, space, Columns, FixedView, MatrixView, SharedBase, SharedView, Space,
    Tagged, TensorArray, TensorRead, TensorWrite, Untagged, VectorView,
};

/// The algebra kernel, re-exported as a whole.
pub mod kernel {
    pub use colmat_kernel::*;
}

// The aliases are untagged; tagged tensors spell out their spaces, as in
// `MatrixView<f32, 4, Model, World>`.

/// 2x2 `f32` matrix.
pub type Mat2f = MatrixView<f32, 2>;
/// 3x3 `f32` matrix.
pub type Mat3f = MatrixView<f32, 3>;
/// 4x4 `f32` matrix.
pub type Mat4f = MatrixView<f32, 4>;
/// 2x2 `f64` matrix.
pub type Mat2d = MatrixView<f64, 2>;
/// 3x3 `f64` matrix.
pub type Mat3d = MatrixView<f64, 3>;
/// 4x4 `f64` matrix.
pub type Mat4d = MatrixView<f64, 4>;
/// 2x2 `i32` matrix.
pub type Mat2i = MatrixView<i32, 2>;
/// 3x3 `i32` matrix.
pub type Mat3i = MatrixView<i32, 3>;
/// 4x4 `i32` matrix.
pub type Mat4i = MatrixView<i32, 4>;

/// 2-element `f32` vector.
pub type Vec2f = VectorView<f32, 2>;
/// 3-element `f32` vector.
pub type Vec3f = VectorView<f32, 3>;
/// 4-element `f32` vector.
pub type Vec4f = VectorView<f32, 4>;
/// 2-element `f64` vector.
pub type Vec2d = VectorView<f64, 2>;
/// 3-element `f64` vector.
pub type Vec3d = VectorView<f64, 3>;
/// 4-element `f64` vector.
pub type Vec4d = VectorView<f64, 4>;
/// 2-element `i32` vector.
pub type Vec2i = VectorView<i32, 2>;
/// 3-element `i32` vector.
pub type Vec3i = VectorView<i32, 3>;
/// 4-element `i32` vector.
pub type Vec4i = VectorView<i32, 4>;

/// Scratch for 2x2 `f32` operations.
pub type Scratch2f = ScratchContext<f32, 2>;
/// Scratch for 3x3 `f32` operations.
pub type Scratch3f = ScratchContext<f32, 3>;
/// Scratch for 4x4 `f32` operations.
pub type Scratch4f = ScratchContext<f32, 4>;
/// Scratch for 2x2 `f64` operations.
pub type Scratch2d = ScratchContext<f64, 2>;
/// Scratch for 3x3 `f64` operations.
pub type Scratch3d = ScratchContext<f64, 3>;
/// Scratch for 4x4 `f64` operations.
pub type Scratch4d = ScratchContext<f64, 4>;

/// Everything most callers need.
pub mod prelude {
    pub use crate::{
        Mat2d, Mat2f, Mat2i, Mat3d, Mat3f, Mat3i, Mat4d, Mat4f, Mat4i, Scratch2d, Scratch2f,
        Scratch3d, Scratch3f, Scratch4d, Scratch4f, Vec2d, Vec2f, Vec2i, Vec3d, Vec3f, Vec3i,
        Vec4d, Vec4f, Vec4i,
    };
    pub use colmat_alloc::{BufferKind, ScalarBuffer, TensorError, TensorResult};
    pub use colmat_kernel::*;
    pub use colmat_view::{
        space, FixedView, MatrixView, SharedBase, SharedView, Tagged, TensorArray, TensorRead,
        TensorWrite, VectorView,
    };
}
