//! Block catalog: the owning, append-only store of an AMR hierarchy.

use std::collections::BTreeMap;

use glam::{IVec3, UVec3, Vec3};

use crate::block::{cell_count, Block, BlockBounds, BlockId};
use crate::error::{AmrError, Result};

/// Owns the blocks of an AMR hierarchy, their shared scalar payload, and the
/// per-level refinement ratios.
///
/// Blocks are appended in creation order and their values are appended to one
/// contiguous payload, so block `i`'s range starts where block `i - 1`'s ends.
/// Spatial overlap or containment between blocks is not checked.
#[derive(Debug, Clone, Default)]
pub struct BlockCatalog {
    blocks: Vec<Block>,
    payload: Vec<f32>,
    refinement_ratios: BTreeMap<u32, u32>,
}

impl BlockCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block and its cell values.
    ///
    /// `values` are in x-fastest order and must hold exactly
    /// `dims.x * dims.y * dims.z` entries.
    pub fn add_block(
        &mut self,
        level: u32,
        origin: IVec3,
        dims: UVec3,
        values: &[f32],
    ) -> Result<BlockId> {
        if dims.cmpeq(UVec3::ZERO).any() {
            return Err(AmrError::DegenerateDims(dims));
        }
        if BlockBounds::checked_from_origin_dims(origin, dims).is_none() {
            return Err(AmrError::BoundsOverflow { origin, dims });
        }
        let expected = cell_count(dims).ok_or(AmrError::ShapeMismatch {
            expected: usize::MAX,
            actual: values.len(),
        })?;
        if expected != values.len() as u64 {
            return Err(AmrError::ShapeMismatch {
                expected: expected as usize,
                actual: values.len(),
            });
        }

        let id = BlockId(self.blocks.len());
        self.blocks.push(Block {
            level,
            origin,
            dims,
            data_offset: self.payload.len(),
        });
        self.payload.extend_from_slice(values);
        log::trace!(
            "added block {} at level {level}: origin {origin}, dims {dims}",
            id.index()
        );
        Ok(id)
    }

    /// Registers or overwrites the refinement ratio between `level` and `level + 1`.
    pub fn set_refinement_ratio(&mut self, level: u32, ratio: u32) -> Result<()> {
        if ratio < 1 {
            return Err(AmrError::InvalidRatio { level, ratio });
        }
        if ratio == 1 {
            log::debug!("refinement ratio 1 at level {level} means no refinement");
        }
        self.refinement_ratios.insert(level, ratio);
        Ok(())
    }

    /// Returns the refinement ratio registered for `level`.
    #[must_use]
    pub fn refinement_ratio(&self, level: u32) -> Option<u32> {
        self.refinement_ratios.get(&level).copied()
    }

    /// Returns all registered ratios keyed by level.
    #[must_use]
    pub fn refinement_ratios(&self) -> &BTreeMap<u32, u32> {
        &self.refinement_ratios
    }

    /// Gets a block by handle.
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.0)
    }

    /// Gets the cell values of a block by handle.
    #[must_use]
    pub fn block_values(&self, id: BlockId) -> Option<&[f32]> {
        let block = self.block(id)?;
        self.payload.get(block.data_range())
    }

    /// Returns all blocks in insertion order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the concatenated values of all blocks.
    #[must_use]
    pub fn payload(&self) -> &[f32] {
        &self.payload
    }

    /// Returns the number of blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if no block has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the distinct levels referenced by blocks, ascending.
    #[must_use]
    pub fn levels(&self) -> Vec<u32> {
        let mut levels: Vec<u32> = self.blocks.iter().map(|b| b.level).collect();
        levels.sort_unstable();
        levels.dedup();
        levels
    }

    /// Returns the highest level referenced by any block.
    #[must_use]
    pub fn max_level(&self) -> Option<u32> {
        self.blocks.iter().map(|b| b.level).max()
    }

    /// Returns the (min, max) of the payload, skipping NaN values.
    ///
    /// Returns `None` if the payload holds no finite-comparable value.
    #[must_use]
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.payload
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Returns the edge length of one cell at `level`, in level-0 cell units.
    ///
    /// Needs a registered ratio for every coarser level.
    pub fn cell_size(&self, level: u32) -> Result<f32> {
        let mut size = 1.0_f32;
        for coarser in 0..level {
            let ratio = self
                .refinement_ratio(coarser)
                .ok_or(AmrError::UnknownLevel(coarser))?;
            size /= ratio as f32;
        }
        Ok(size)
    }

    /// Returns the world-space box covered by a block.
    pub fn world_bounds(&self, id: BlockId) -> Result<Option<(Vec3, Vec3)>> {
        let Some(block) = self.block(id) else {
            return Ok(None);
        };
        let size = self.cell_size(block.level)?;
        let bounds = block.bounds();
        Ok(Some((
            bounds.lower.as_vec3() * size,
            (bounds.upper.as_vec3() + Vec3::ONE) * size,
        )))
    }

    /// Returns the world-space box enclosing every block.
    pub fn domain_bounds(&self) -> Result<Option<(Vec3, Vec3)>> {
        let mut extent: Option<(Vec3, Vec3)> = None;
        for index in 0..self.blocks.len() {
            if let Some((lo, hi)) = self.world_bounds(BlockId(index))? {
                extent = Some(match extent {
                    None => (lo, hi),
                    Some((min, max)) => (min.min(lo), max.max(hi)),
                });
            }
        }
        Ok(extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level_catalog() -> BlockCatalog {
        let mut catalog = BlockCatalog::new();
        catalog
            .add_block(
                0,
                IVec3::ZERO,
                UVec3::splat(2),
                &[0.0, 0.5, 0.0, 0.5, 0.0, 0.5, 0.0, 0.5],
            )
            .unwrap();
        catalog
            .add_block(1, IVec3::new(2, 0, 0), UVec3::ONE, &[1.0])
            .unwrap();
        catalog.set_refinement_ratio(0, 2).unwrap();
        catalog.set_refinement_ratio(1, 2).unwrap();
        catalog
    }

    #[test]
    fn test_add_block_offsets_are_contiguous() {
        let catalog = two_level_catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.blocks()[0].data_offset, 0);
        assert_eq!(catalog.blocks()[1].data_offset, 8);
        assert_eq!(catalog.payload().len(), 9);
    }

    #[test]
    fn test_block_values_lookup() {
        let mut catalog = BlockCatalog::new();
        let a = catalog
            .add_block(0, IVec3::ZERO, UVec3::new(2, 1, 1), &[1.0, 2.0])
            .unwrap();
        let b = catalog
            .add_block(0, IVec3::new(2, 0, 0), UVec3::ONE, &[3.0])
            .unwrap();
        assert_eq!(catalog.block_values(a), Some(&[1.0, 2.0][..]));
        assert_eq!(catalog.block_values(b), Some(&[3.0][..]));
        assert_eq!(catalog.block(BlockId(7)), None);
    }

    #[test]
    fn test_shape_mismatch_leaves_catalog_unchanged() {
        let mut catalog = two_level_catalog();
        let err = catalog
            .add_block(0, IVec3::ZERO, UVec3::splat(2), &[0.0; 7])
            .unwrap_err();
        assert!(matches!(
            err,
            AmrError::ShapeMismatch {
                expected: 8,
                actual: 7
            }
        ));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.payload().len(), 9);
    }

    #[test]
    fn test_degenerate_dims_rejected() {
        let mut catalog = BlockCatalog::new();
        let err = catalog
            .add_block(0, IVec3::ZERO, UVec3::new(2, 0, 2), &[])
            .unwrap_err();
        assert!(matches!(err, AmrError::DegenerateDims(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_upper_corner_overflow_rejected() {
        let mut catalog = two_level_catalog();
        let err = catalog
            .add_block(0, IVec3::new(i32::MAX, 0, 0), UVec3::new(2, 1, 1), &[0.0, 1.0])
            .unwrap_err();
        assert!(matches!(
            err,
            AmrError::BoundsOverflow { origin, dims }
                if origin == IVec3::new(i32::MAX, 0, 0) && dims == UVec3::new(2, 1, 1)
        ));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.payload().len(), 9);

        // A single cell at the very edge of the index range is still valid.
        let id = catalog
            .add_block(0, IVec3::new(i32::MAX, 0, 0), UVec3::ONE, &[0.25])
            .unwrap();
        let field = crate::encode(&catalog).unwrap();
        let wire = field.bounds()[id.index()];
        assert_eq!(wire.lower, [i32::MAX, 0, 0]);
        assert_eq!(wire.upper, [i32::MAX, 0, 0]);
        assert_eq!(field.block_dims()[id.index()], [1, 1, 1]);
        let (_, hi) = catalog.domain_bounds().unwrap().unwrap();
        assert!(hi.x > 2.0e9);
    }

    #[test]
    fn test_invalid_ratio() {
        let mut catalog = BlockCatalog::new();
        let err = catalog.set_refinement_ratio(0, 0).unwrap_err();
        assert!(matches!(err, AmrError::InvalidRatio { level: 0, ratio: 0 }));
        assert_eq!(catalog.refinement_ratio(0), None);
    }

    #[test]
    fn test_ratio_overwrite() {
        let mut catalog = BlockCatalog::new();
        catalog.set_refinement_ratio(0, 2).unwrap();
        catalog.set_refinement_ratio(0, 4).unwrap();
        assert_eq!(catalog.refinement_ratio(0), Some(4));
        catalog.set_refinement_ratio(0, 1).unwrap();
        assert_eq!(catalog.refinement_ratio(0), Some(1));
    }

    #[test]
    fn test_levels_and_value_range() {
        let catalog = two_level_catalog();
        assert_eq!(catalog.levels(), vec![0, 1]);
        assert_eq!(catalog.max_level(), Some(1));
        assert_eq!(catalog.value_range(), Some((0.0, 1.0)));
    }

    #[test]
    fn test_value_range_skips_nan() {
        let mut catalog = BlockCatalog::new();
        catalog
            .add_block(0, IVec3::ZERO, UVec3::new(3, 1, 1), &[f32::NAN, -2.0, 4.0])
            .unwrap();
        assert_eq!(catalog.value_range(), Some((-2.0, 4.0)));
        assert_eq!(BlockCatalog::new().value_range(), None);
    }

    #[test]
    fn test_world_bounds() {
        let catalog = two_level_catalog();
        assert_eq!(catalog.cell_size(0).unwrap(), 1.0);
        assert_eq!(catalog.cell_size(1).unwrap(), 0.5);
        assert_eq!(catalog.cell_size(2).unwrap(), 0.25);

        let fine = catalog.world_bounds(BlockId(1)).unwrap().unwrap();
        assert_eq!(fine, (Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.5, 0.5, 0.5)));

        let domain = catalog.domain_bounds().unwrap().unwrap();
        assert_eq!(domain, (Vec3::ZERO, Vec3::splat(2.0)));
    }

    #[test]
    fn test_world_bounds_unknown_level() {
        let mut catalog = BlockCatalog::new();
        catalog
            .add_block(2, IVec3::ZERO, UVec3::ONE, &[0.0])
            .unwrap();
        catalog.set_refinement_ratio(0, 2).unwrap();
        assert!(matches!(
            catalog.domain_bounds(),
            Err(AmrError::UnknownLevel(1))
        ));
    }
}
