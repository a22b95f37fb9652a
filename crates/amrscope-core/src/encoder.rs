//! Hierarchy encoder: flattens a [`BlockCatalog`] into the array form a
//! rendering backend consumes.
//!
//! The output is self-contained. It copies everything it needs out of the
//! catalog and never aliases the catalog's storage, so the catalog can keep
//! growing after a field has been handed downstream.

use crate::block::{BlockBounds, Box3i};
use crate::catalog::BlockCatalog;
use crate::error::{AmrError, Result};

/// Array-based encoding of an AMR hierarchy.
///
/// Per-level: `refinement_ratio[level]`. Per-block, in catalog insertion order:
/// `level[i]` and `bounds[i]`. `data` is the catalog payload, unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatField {
    refinement_ratio: Vec<u32>,
    level: Vec<i32>,
    bounds: Vec<Box3i>,
    data: Vec<f32>,
    // Not part of the wire shape; lets block_data avoid a prefix sum.
    offsets: Vec<usize>,
}

impl FlatField {
    /// Returns the refinement ratio per level, indexed by level.
    #[must_use]
    pub fn refinement_ratio(&self) -> &[u32] {
        &self.refinement_ratio
    }

    /// Returns the level of each block.
    #[must_use]
    pub fn level(&self) -> &[i32] {
        &self.level
    }

    /// Returns the inclusive bounds of each block.
    #[must_use]
    pub fn bounds(&self) -> &[Box3i] {
        &self.bounds
    }

    /// Returns the concatenated cell values of all blocks.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the number of encoded blocks.
    #[must_use]
    pub fn num_blocks(&self) -> usize {
        self.bounds.len()
    }

    /// Returns the number of levels covered by `refinement_ratio`.
    #[must_use]
    pub fn num_levels(&self) -> usize {
        self.refinement_ratio.len()
    }

    /// Returns the cell values of block `index`.
    #[must_use]
    pub fn block_data(&self, index: usize) -> Option<&[f32]> {
        let start = *self.offsets.get(index)?;
        let count = self.block_cell_count(index)?;
        self.data.get(start..start + count)
    }

    fn block_cell_count(&self, index: usize) -> Option<usize> {
        let dims = BlockBounds::from(*self.bounds.get(index)?).dims();
        Some(dims.x as usize * dims.y as usize * dims.z as usize)
    }

    /// Returns block lower corners, for backends that take (start, dims) pairs.
    #[must_use]
    pub fn block_starts(&self) -> Vec<[i32; 3]> {
        self.bounds.iter().map(|b| b.lower).collect()
    }

    /// Returns block cell counts, for backends that take (start, dims) pairs.
    #[must_use]
    pub fn block_dims(&self) -> Vec<[u32; 3]> {
        self.bounds
            .iter()
            .map(|&b| BlockBounds::from(b).dims().to_array())
            .collect()
    }

    /// Returns the four wire arrays as one byte string.
    ///
    /// Each array is written as its element count (`u64`) followed by its
    /// elements, all little-endian regardless of the host. Equal fields produce
    /// equal bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            32 + self.refinement_ratio.len() * 4
                + self.level.len() * 4
                + self.bounds.len() * std::mem::size_of::<Box3i>()
                + self.data.len() * 4,
        );
        push_array(&mut out, &self.refinement_ratio);
        push_array(&mut out, &self.level);
        push_array(&mut out, &self.bounds);
        push_array(&mut out, &self.data);
        out
    }
}

/// Writes `items` as a length-prefixed run of little-endian 32-bit words.
///
/// Every wire element type (`u32`, `i32`, `f32`, `Box3i`) is built from 4-byte
/// words, so viewing them as `u32` keeps each word's bit pattern.
fn push_array<T: bytemuck::Pod>(out: &mut Vec<u8>, items: &[T]) {
    out.extend_from_slice(&(items.len() as u64).to_le_bytes());
    for word in bytemuck::cast_slice::<T, u32>(items) {
        out.extend_from_slice(&word.to_le_bytes());
    }
}

/// Encodes a catalog into a [`FlatField`].
///
/// `refinement_ratio` is dense over `0..=max_level`, so every level up to the
/// finest referenced one needs a registered ratio. Ratios registered above the
/// finest referenced level are not emitted.
///
/// # Errors
///
/// - [`AmrError::EmptyCatalog`] if the catalog has no blocks.
/// - [`AmrError::UnknownLevel`] if a block's level, or any coarser level, has
///   no registered ratio.
pub fn encode(catalog: &BlockCatalog) -> Result<FlatField> {
    let Some(max_level) = catalog.max_level() else {
        return Err(AmrError::EmptyCatalog);
    };

    // Report the level a block actually references before any gap below it.
    for level in catalog.levels() {
        if catalog.refinement_ratio(level).is_none() {
            return Err(AmrError::UnknownLevel(level));
        }
    }
    let refinement_ratio = (0..=max_level)
        .map(|level| {
            catalog
                .refinement_ratio(level)
                .ok_or(AmrError::UnknownLevel(level))
        })
        .collect::<Result<Vec<u32>>>()?;

    let blocks = catalog.blocks();
    let level = blocks
        .iter()
        .map(|b| i32::try_from(b.level).map_err(|_| AmrError::UnknownLevel(b.level)))
        .collect::<Result<Vec<i32>>>()?;
    let bounds = blocks.iter().map(|b| Box3i::from(b.bounds())).collect();
    let offsets = blocks.iter().map(|b| b.data_offset).collect();

    log::debug!(
        "encoded {} blocks over {} levels ({} values)",
        blocks.len(),
        refinement_ratio.len(),
        catalog.payload().len()
    );

    Ok(FlatField {
        refinement_ratio,
        level,
        bounds,
        data: catalog.payload().to_vec(),
        offsets,
    })
}
