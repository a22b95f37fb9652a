//! Core data model for amrscope.
//!
//! This crate holds everything that turns an adaptive-mesh-refinement hierarchy
//! into something a volume renderer can consume:
//! - [`BlockCatalog`] owns the blocks, their shared scalar payload, and the
//!   per-level refinement ratios
//! - [`encode`] flattens a catalog into a [`FlatField`]
//! - [`TransferFunction`] maps scalar values to color and opacity
//! - [`Options`] carries the configuration of the rendering glue

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Cell counts and stop indices are small; casts between them are intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod block;
pub mod catalog;
pub mod color_maps;
pub mod encoder;
pub mod error;
pub mod options;
pub mod shared;
pub mod transfer_function;

pub use block::{Block, BlockBounds, BlockId, Box3i};
pub use catalog::BlockCatalog;
pub use color_maps::{ColorMap, ColorMapRegistry};
pub use encoder::{encode, FlatField};
pub use error::{AmrError, Result, StopKind};
pub use options::Options;
pub use shared::SharedCatalog;
pub use transfer_function::{TransferFunction, ValueRange};

// Re-export glam types for convenience
pub use glam::{IVec3, UVec2, UVec3, Vec3, Vec4};
