//! Scalar storage primitives for colmat tensors.
//!
//! This crate provides the two leaves every colmat tensor is built on:
//!
//! - **Scalar buffers** ([`ScalarBuffer`]) - fixed-length, byte-addressable
//!   regions holding raw scalar components in native byte order.
//! - **Addressing** ([`addressing`]) - the pure mapping from a tensor
//!   component to a byte offset inside a buffer.
//!
//! # Memory Kinds
//!
//! | Kind | Allocation | Freed by | Use Case |
//! |------|------------|----------|----------|
//! | **Heap** | Rust global allocator, fallible | Last buffer handle | Private tensors |
//! | **Native** | Aligned, outside the managed heap | Last buffer handle | Handing bytes to a native API |
//!
//! Memory handed over by a native API is wrapped with
//! [`ScalarBuffer::from_raw_parts`]; it reports [`BufferKind::Native`] but
//! is never freed by colmat.
//!
//! # Binary Layout
//!
//! Components are stored column-major. For an `R x C` tensor of scalar
//! width `W` at byte offset `o`, byte range `o + k*W .. o + (k+1)*W` holds
//! component `(row = k % R, col = k / R)`:
//!
//! ```text
//!  3x3, W = 4        bytes:  0    4    8    12   16   20   24   28   32
//!  [a d g]                  [a]  [b]  [c]  [d]  [e]  [f]  [g]  [h]  [i]
//!  [b e h]                  |--- col 0 ---|--- col 1 ---|--- col 2 ---|
//!  [c f i]
//! ```
//!
//! The bytes are therefore directly consumable by column-major graphics APIs
//! without transposition.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod addressing;
pub mod buffer;
pub mod scalar;

pub use addressing::{byte_offset, checked_index, component_at, footprint, index};
pub use buffer::{AllocOptions, ScalarBuffer};
pub use scalar::{Real, Scalar};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while addressing or allocating tensor storage.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TensorError {
    /// A row, column, or element index was outside `[0, bound)`.
    #[error("index {index} out of range for dimension {bound}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The exclusive upper bound.
        bound: usize,
    },

    /// The computed byte offset cannot be represented.
    #[error("address overflow: base {base} + offset {offset} + index {index} * width {width}")]
    AddressOverflow {
        /// Shared base offset at the time of the access.
        base: i64,
        /// Constant per-view offset.
        offset: usize,
        /// Component index.
        index: usize,
        /// Scalar width in bytes.
        width: usize,
    },

    /// An access of `width` bytes at `offset` would leave the buffer.
    #[error("access of {width} bytes at offset {offset} exceeds buffer capacity {capacity}")]
    OutOfBounds {
        /// Byte offset of the access.
        offset: usize,
        /// Number of bytes accessed.
        width: usize,
        /// Buffer capacity in bytes.
        capacity: usize,
    },

    /// Buffer allocation failed.
    #[error("out of memory: failed to allocate {requested} bytes")]
    OutOfMemory {
        /// Requested allocation size.
        requested: usize,
    },

    /// Input vectors do not span a basis (zero-length or collinear).
    #[error("degenerate basis: input vectors are zero-length or collinear")]
    DegenerateBasis,
}

/// Result type for tensor storage operations.
pub type TensorResult<T> = Result<T, TensorError>;

/// Where the bytes of a [`ScalarBuffer`] live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferKind {
    /// Managed heap memory, freed with the last buffer handle.
    #[default]
    Heap,
    /// Aligned memory outside the managed heap, suitable for native interop.
    Native,
}

impl BufferKind {
    /// Get the kind name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heap => "heap",
            Self::Native => "native",
        }
    }
}

/// Alignment requirements for native allocations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    /// Default alignment (8 bytes).
    Default,
    /// SIMD 128-bit alignment (16 bytes).
    #[serde(rename = "simd-128")]
    Simd128,
    /// SIMD 256-bit alignment (32 bytes).
    #[serde(rename = "simd-256")]
    Simd256,
    /// Cache line alignment (64 bytes).
    #[default]
    CacheLine,
    /// Page alignment (4096 bytes).
    Page,
}

impl Alignment {
    /// Get the alignment value in bytes.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        match self {
            Self::Default => 8,
            Self::Simd128 => 16,
            Self::Simd256 => 32,
            Self::CacheLine => 64,
            Self::Page => 4096,
        }
    }
}

/// Byte order of scalar components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl ByteOrder {
    /// The byte order of the target platform.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Self::Little;
    /// The byte order of the target platform.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Self::Big;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_values() {
        assert_eq!(Alignment::Default.as_usize(), 8);
        assert_eq!(Alignment::Simd128.as_usize(), 16);
        assert_eq!(Alignment::Simd256.as_usize(), 32);
        assert_eq!(Alignment::CacheLine.as_usize(), 64);
        assert_eq!(Alignment::Page.as_usize(), 4096);
        for a in [
            Alignment::Default,
            Alignment::Simd128,
            Alignment::Simd256,
            Alignment::CacheLine,
            Alignment::Page,
        ] {
            assert!(a.as_usize().is_power_of_two());
        }
    }

    #[test]
    fn test_native_byte_order() {
        let one = 1u16.to_ne_bytes();
        let expected = if one[0] == 1 {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        };
        assert_eq!(ByteOrder::NATIVE, expected);
    }

    #[test]
    fn test_error_display() {
        let err = TensorError::IndexOutOfRange { index: 4, bound: 4 };
        assert_eq!(err.to_string(), "index 4 out of range for dimension 4");

        let err = TensorError::OutOfMemory { requested: 1024 };
        assert!(err.to_string().contains("1024"));
    }

    #[test]
    fn test_buffer_kind_names() {
        assert_eq!(BufferKind::Heap.name(), "heap");
        assert_eq!(BufferKind::Native.name(), "native");
        assert_eq!(BufferKind::default(), BufferKind::Heap);
    }
}
