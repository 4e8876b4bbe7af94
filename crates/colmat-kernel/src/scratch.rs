//! Caller-owned temporaries for kernel operations.

use colmat_alloc::Scalar;

/// Pre-allocated temporary storage for kernel operations on `N x N`
/// matrices.
///
/// Create one per thread (or per hot loop) and pass it by `&mut` to the
/// operations that take one: [`multiply`](crate::multiply),
/// [`multiply_vector`](crate::multiply_vector),
/// [`transform_point`](crate::transform_point),
/// [`transpose`](crate::transpose), [`invert`](crate::invert),
/// [`look_at`](crate::look_at) and [`view_look_at`](crate::view_look_at).
/// After a call the contents are unspecified.
///
/// The type is plain data on the stack: a context never allocates, and the
/// exclusive borrow keeps it to one user at a time.
///
/// `N` must be 2, 3 or 4; other sizes fail to compile at [`new`](Self::new).
#[derive(Clone, Debug, PartialEq)]
pub struct ScratchContext<T, const N: usize> {
    /// Snapshot of the first matrix operand (column-major).
    pub primary: [[T; N]; N],
    /// Snapshot of the second matrix operand, or an intermediate result.
    pub secondary: [[T; N]; N],
    /// Row or vector temporary.
    pub row: [T; N],
    /// Column temporary.
    pub column: [T; N],
    /// Orthonormal 3D basis under construction.
    pub basis: [[T; 3]; 3],
}

impl<T: Scalar, const N: usize> ScratchContext<T, N> {
    /// A zeroed context.
    #[must_use]
    pub fn new() -> Self {
        const { assert!(N >= 2 && N <= 4, "scratch contexts cover dimensions 2 to 4") };
        Self {
            primary: [[T::ZERO; N]; N],
            secondary: [[T::ZERO; N]; N],
            row: [T::ZERO; N],
            column: [T::ZERO; N],
            basis: [[T::ZERO; 3]; 3],
        }
    }
}

impl<T: Scalar, const N: usize> Default for ScratchContext<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
