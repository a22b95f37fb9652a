//! AMR blocks and their integer bounds.
//!
//! A [`Block`] is one fixed-resolution brick of the hierarchy. Its placement is
//! expressed in the index space of its own level: a block at level 1 with origin
//! `(2, 0, 0)` starts at the third level-1 cell along x.

use glam::{IVec3, UVec3};
use serde::{Deserialize, Serialize};

/// Handle returned by [`BlockCatalog::add_block`](crate::BlockCatalog::add_block).
///
/// Handles are insertion indices and stay valid for the lifetime of the catalog,
/// which never reorders or removes blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub(crate) usize);

impl BlockId {
    /// Returns the insertion index of this block.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the AMR hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Refinement level, 0 is the coarsest.
    pub level: u32,
    /// Lower corner in the index space of `level`.
    pub origin: IVec3,
    /// Cell counts along x, y, z.
    pub dims: UVec3,
    /// Index into the shared payload where this block's values begin.
    pub data_offset: usize,
}

impl Block {
    /// Returns the number of cells in this block.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        // add_block rejects dims whose product does not fit
        cell_count(self.dims).map_or(usize::MAX, |n| n as usize)
    }

    /// Returns the payload range holding this block's values.
    #[must_use]
    pub fn data_range(&self) -> std::ops::Range<usize> {
        self.data_offset..self.data_offset + self.cell_count()
    }

    /// Returns the inclusive integer bounds of this block.
    #[must_use]
    pub fn bounds(&self) -> BlockBounds {
        BlockBounds::from_origin_dims(self.origin, self.dims)
    }
}

/// Returns `dims.x * dims.y * dims.z`, or `None` if the product overflows `usize`.
#[must_use]
pub fn cell_count(dims: UVec3) -> Option<u64> {
    let n = u64::from(dims.x)
        .checked_mul(u64::from(dims.y))?
        .checked_mul(u64::from(dims.z))?;
    usize::try_from(n).ok().map(|_| n)
}

/// Inclusive integer box covered by a block, derived from origin and dims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockBounds {
    /// First cell index covered (inclusive).
    pub lower: IVec3,
    /// Last cell index covered (inclusive).
    pub upper: IVec3,
}

impl BlockBounds {
    /// Builds bounds with `lower = origin` and `upper = origin + dims - 1`.
    ///
    /// The upper corner must be representable as `i32`; blocks stored in a
    /// [`BlockCatalog`](crate::BlockCatalog) always satisfy this. Use
    /// [`BlockBounds::checked_from_origin_dims`] for unvalidated input.
    #[must_use]
    pub fn from_origin_dims(origin: IVec3, dims: UVec3) -> Self {
        Self {
            lower: origin,
            upper: origin.wrapping_add_unsigned(dims.wrapping_sub(UVec3::ONE)),
        }
    }

    /// Like [`BlockBounds::from_origin_dims`], but returns `None` if `dims` has a
    /// zero component or the upper corner does not fit in `i32`.
    #[must_use]
    pub fn checked_from_origin_dims(origin: IVec3, dims: UVec3) -> Option<Self> {
        let axis = |o: i32, d: u32| -> Option<i32> {
            let d = d.checked_sub(1)?;
            i32::try_from(i64::from(o) + i64::from(d)).ok()
        };
        let upper = IVec3::new(
            axis(origin.x, dims.x)?,
            axis(origin.y, dims.y)?,
            axis(origin.z, dims.z)?,
        );
        Some(Self {
            lower: origin,
            upper,
        })
    }

    /// Returns the cell counts spanned by these bounds.
    #[must_use]
    pub fn dims(&self) -> UVec3 {
        self.upper
            .wrapping_sub(self.lower)
            .as_uvec3()
            .wrapping_add(UVec3::ONE)
    }

    /// Returns true if the integer cell `p` lies inside the box.
    #[must_use]
    pub fn contains(&self, p: IVec3) -> bool {
        p.cmpge(self.lower).all() && p.cmple(self.upper).all()
    }
}

/// Wire form of [`BlockBounds`]: two packed `int3` corners.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Box3i {
    /// Lower corner (inclusive).
    pub lower: [i32; 3],
    /// Upper corner (inclusive).
    pub upper: [i32; 3],
}

impl From<BlockBounds> for Box3i {
    fn from(bounds: BlockBounds) -> Self {
        Self {
            lower: bounds.lower.to_array(),
            upper: bounds.upper.to_array(),
        }
    }
}

impl From<Box3i> for BlockBounds {
    fn from(wire: Box3i) -> Self {
        Self {
            lower: IVec3::from_array(wire.lower),
            upper: IVec3::from_array(wire.upper),
        }
    }
}
