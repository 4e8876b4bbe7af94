//! Algebra kernel for colmat tensor views.
//!
//! Every operation is a free function over the view contract of
//! [`colmat_view`]: inputs are `&impl TensorRead`, outputs are
//! `&mut impl TensorWrite`, and address failures propagate as
//! [`TensorError`](colmat_alloc::TensorError).
//!
//! # Aliasing
//!
//! The borrow checker rules out passing one view as both input and output,
//! but two *handles* (for example [`FixedView::share`]) may still address
//! the same bytes. Operations therefore read their inputs completely before
//! writing the first output component, using either stack arrays or the
//! caller's [`ScratchContext`].
//!
//! # Modules
//!
//! | Module | Operations |
//! |--------|------------|
//! | [`arith`] | add, subtract, scale, negate, hadamard and their assigning forms |
//! | [`product`] | multiply, multiply_vector, transform_point, transpose, trace |
//! | [`cofactor`] | closed-form determinant and adjugate inversion |
//! | [`rows`] | Gaussian-elimination row primitives |
//! | [`vector`] | dot, cross, length, normalize |
//! | [`transform`] | rotations, translations, scaling, look-at, projections |
//! | [`tolerance`] | approximate comparison |
//!
//! Singular inversion is an expected outcome, reported as `Ok(None)`; the
//! output is left untouched.
//!
//! [`FixedView::share`]: colmat_view::FixedView::share

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::many_single_char_names)]

pub mod arith;
pub mod cofactor;
pub mod product;
pub mod rows;
pub mod scratch;
pub mod tolerance;
pub mod transform;
pub mod vector;

pub use arith::{add, add_assign, hadamard, negate, scale, scale_in_place, sub_assign, subtract};
pub use cofactor::{determinant, invert, invert_in_place, Cofactor};
pub use product::{multiply, multiply_vector, trace, transform_point, transpose, transpose_in_place};
pub use rows::{
    add_scaled_row, add_scaled_row_into, exchange_rows, exchange_rows_into, scale_row,
    scale_row_into,
};
pub use scratch::ScratchContext;
pub use tolerance::{approx_eq, approx_eq_columns, Tolerance};
pub use transform::{
    look_at, orthographic, perspective, rotation_2d, rotation_3x3, rotation_4x4, rotation_x,
    rotation_y, rotation_z, scaling, translation_2d, translation_3d, view_look_at,
};
pub use vector::{cross, cross_view, dot, dot_view, length, normalize, normalize_view};
