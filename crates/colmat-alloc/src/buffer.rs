//! Scalar buffers.
//!
//! A [`ScalarBuffer`] is a handle to a fixed-length byte region. Cloning the
//! handle does not copy bytes: all clones address the same region, which is
//! how several tensor views share one buffer. The region is freed when the
//! last handle is dropped (unless it was supplied by a foreign owner through
//! [`ScalarBuffer::from_raw_parts`]).
//!
//! Bytes are held in [`Cell`]s, so views writing through distinct handles
//! never need `&mut` access to the buffer itself. Handles are `!Send` and
//! `!Sync`; a buffer belongs to exactly one thread.
//!
//! Every read and write is bounds-checked against `[0, capacity)`.

use crate::{Alignment, BufferKind, ByteOrder, Scalar, TensorError, TensorResult};
use serde::{Deserialize, Serialize};
use std::alloc::Layout;
use std::cell::Cell;
use std::fmt;
use std::ptr::NonNull;
use std::rc::Rc;

/// Allocation options for [`ScalarBuffer::allocate_with`].
///
/// Deserializable so applications can keep buffer placement in their own
/// configuration files:
///
/// ```toml
/// kind = "native"
/// alignment = "simd-256"
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocOptions {
    /// Where to allocate.
    pub kind: BufferKind,
    /// Alignment of native allocations. Ignored for heap buffers.
    pub alignment: Alignment,
}

impl AllocOptions {
    /// Options for a native allocation with the given alignment.
    #[must_use]
    pub const fn native(alignment: Alignment) -> Self {
        Self {
            kind: BufferKind::Native,
            alignment,
        }
    }
}

/// Backing storage of a buffer.
enum Storage {
    /// Managed heap bytes.
    Heap(Box<[Cell<u8>]>),
    /// Aligned allocation owned by this storage.
    Native { ptr: NonNull<u8>, layout: Layout },
    /// Memory owned by someone else.
    Foreign { ptr: NonNull<u8>, len: usize },
}

impl Storage {
    fn cells(&self) -> &[Cell<u8>] {
        match self {
            Self::Heap(cells) => cells,
            // Safety: the region is valid for `len` bytes for the lifetime of
            // the storage (owned allocation, or the `from_raw_parts` contract),
            // and `Cell<u8>` has the same layout as `u8`.
            Self::Native { ptr, layout } => unsafe {
                std::slice::from_raw_parts(ptr.as_ptr().cast::<Cell<u8>>(), layout.size())
            },
            Self::Foreign { ptr, len } => unsafe {
                std::slice::from_raw_parts(ptr.as_ptr().cast::<Cell<u8>>(), *len)
            },
        }
    }

    fn kind(&self) -> BufferKind {
        match self {
            Self::Heap(_) => BufferKind::Heap,
            Self::Native { .. } | Self::Foreign { .. } => BufferKind::Native,
        }
    }
}

impl Drop for Storage {
    fn drop(&mut self) {
        if let Self::Native { ptr, layout } = self {
            if layout.size() > 0 {
                // Safety: allocated with this exact layout in `allocate_native`.
                unsafe { std::alloc::dealloc(ptr.as_ptr(), *layout) };
            }
        }
    }
}

/// A fixed-length, byte-addressable region of scalar components.
///
/// # Example
///
/// ```rust
/// use colmat_alloc::{BufferKind, ScalarBuffer};
///
/// let buffer = ScalarBuffer::allocate(64, BufferKind::Native).unwrap();
/// buffer.write(4, 2.5f32).unwrap();
/// assert_eq!(buffer.read::<f32>(4).unwrap(), 2.5);
/// ```
#[derive(Clone)]
pub struct ScalarBuffer {
    storage: Rc<Storage>,
}

impl ScalarBuffer {
    /// Allocate a zeroed buffer of `bytes` bytes.
    ///
    /// Native buffers use cache-line alignment; see
    /// [`allocate_with`](Self::allocate_with) to choose another.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfMemory`] if the allocation cannot be
    /// satisfied.
    pub fn allocate(bytes: usize, kind: BufferKind) -> TensorResult<Self> {
        Self::allocate_with(
            bytes,
            &AllocOptions {
                kind,
                alignment: Alignment::default(),
            },
        )
    }

    /// Allocate a zeroed buffer of `bytes` bytes with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfMemory`] if the allocation cannot be
    /// satisfied.
    pub fn allocate_with(bytes: usize, options: &AllocOptions) -> TensorResult<Self> {
        let storage = match options.kind {
            BufferKind::Heap => allocate_heap(bytes)?,
            BufferKind::Native => allocate_native(bytes, options.alignment)?,
        };
        Ok(Self {
            storage: Rc::new(storage),
        })
    }

    /// Wrap existing bytes. No validation beyond recording the length.
    #[must_use]
    pub fn wrap(bytes: Vec<u8>) -> Self {
        let cells: Box<[Cell<u8>]> = bytes.into_iter().map(Cell::new).collect();
        Self {
            storage: Rc::new(Storage::Heap(cells)),
        }
    }

    /// Wrap memory owned by a foreign party (for example a mapped native
    /// API buffer). The memory is never freed by colmat.
    ///
    /// # Safety
    ///
    /// - `ptr` must be valid for reads and writes of `len` bytes for as long
    ///   as any handle to the returned buffer exists.
    /// - No other code may access the region while a colmat accessor is
    ///   running on it.
    #[must_use]
    pub unsafe fn from_raw_parts(ptr: NonNull<u8>, len: usize) -> Self {
        tracing::debug!(len, "wrapping foreign buffer");
        Self {
            storage: Rc::new(Storage::Foreign { ptr, len }),
        }
    }

    /// Capacity in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.cells().len()
    }

    /// Where the bytes live.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> BufferKind {
        self.storage.kind()
    }

    /// Byte order of stored components; always [`ByteOrder::NATIVE`].
    #[inline]
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        ByteOrder::NATIVE
    }

    /// Whether colmat frees the region when the last handle is dropped.
    #[must_use]
    pub fn owns_memory(&self) -> bool {
        !matches!(*self.storage, Storage::Foreign { .. })
    }

    /// Whether more than one handle addresses this region.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.storage) > 1
    }

    /// Whether two handles address the same region.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }

    /// Raw pointer to the first byte, for handing to native APIs.
    ///
    /// The pointer is valid while any handle exists. Writes through it must
    /// not race with colmat accessors.
    #[must_use]
    pub fn as_ptr(&self) -> *const u8 {
        self.storage.cells().as_ptr().cast::<u8>()
    }

    /// Mutable raw pointer to the first byte; see [`as_ptr`](Self::as_ptr).
    #[must_use]
    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.storage.cells().as_ptr().cast::<u8>().cast_mut()
    }

    /// Read one scalar at byte `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfBounds`] if `offset + T::WIDTH` exceeds
    /// the capacity.
    #[inline]
    pub fn read<T: Scalar>(&self, offset: usize) -> TensorResult<T> {
        let cells = self.range(offset, T::WIDTH)?;
        let mut bytes = T::Bytes::default();
        for (dst, src) in bytes.as_mut().iter_mut().zip(cells) {
            *dst = src.get();
        }
        Ok(T::from_ne(bytes))
    }

    /// Write one scalar at byte `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfBounds`] if `offset + T::WIDTH` exceeds
    /// the capacity.
    #[inline]
    pub fn write<T: Scalar>(&self, offset: usize, value: T) -> TensorResult<()> {
        let cells = self.range(offset, T::WIDTH)?;
        for (dst, src) in cells.iter().zip(value.to_ne().as_ref()) {
            dst.set(*src);
        }
        Ok(())
    }

    /// Copy `out.len()` bytes starting at `offset` into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfBounds`] if the range leaves the buffer.
    pub fn read_bytes(&self, offset: usize, out: &mut [u8]) -> TensorResult<()> {
        let cells = self.range(offset, out.len())?;
        for (dst, src) in out.iter_mut().zip(cells) {
            *dst = src.get();
        }
        Ok(())
    }

    /// Copy `bytes` into the buffer starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::OutOfBounds`] if the range leaves the buffer.
    pub fn write_bytes(&self, offset: usize, bytes: &[u8]) -> TensorResult<()> {
        let cells = self.range(offset, bytes.len())?;
        for (dst, src) in cells.iter().zip(bytes) {
            dst.set(*src);
        }
        Ok(())
    }

    /// Copy the whole buffer out.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.storage.cells().iter().map(Cell::get).collect()
    }

    fn range(&self, offset: usize, width: usize) -> TensorResult<&[Cell<u8>]> {
        let cells = self.storage.cells();
        let out_of_bounds = TensorError::OutOfBounds {
            offset,
            width,
            capacity: cells.len(),
        };
        match offset.checked_add(width) {
            Some(end) if end <= cells.len() => Ok(&cells[offset..end]),
            _ => Err(out_of_bounds),
        }
    }
}

impl fmt::Debug for ScalarBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarBuffer")
            .field("kind", &self.kind())
            .field("capacity", &self.capacity())
            .field("owns_memory", &self.owns_memory())
            .field("handles", &Rc::strong_count(&self.storage))
            .finish()
    }
}

fn allocate_heap(bytes: usize) -> TensorResult<Storage> {
    let mut cells: Vec<Cell<u8>> = Vec::new();
    cells
        .try_reserve_exact(bytes)
        .map_err(|_| TensorError::OutOfMemory { requested: bytes })?;
    cells.resize_with(bytes, || Cell::new(0));
    Ok(Storage::Heap(cells.into_boxed_slice()))
}

fn allocate_native(bytes: usize, alignment: Alignment) -> TensorResult<Storage> {
    let layout = Layout::from_size_align(bytes, alignment.as_usize())
        .map_err(|_| TensorError::OutOfMemory { requested: bytes })?;

    if bytes == 0 {
        return Ok(Storage::Native {
            ptr: NonNull::dangling(),
            layout,
        });
    }

    // Safety: layout has non-zero size.
    let raw = unsafe { std::alloc::alloc_zeroed(layout) };
    let Some(ptr) = NonNull::new(raw) else {
        tracing::debug!(bytes, "native allocation failed");
        return Err(TensorError::OutOfMemory { requested: bytes });
    };

    tracing::debug!(bytes, align = layout.align(), "allocated native buffer");
    Ok(Storage::Native { ptr, layout })
}
