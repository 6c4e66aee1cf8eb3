//! Core types for the isoroute engine
//!
//! This crate turns composite block structures into occlusion-ordered paint
//! calls:
//!
//! - [`Block`] - a positioned solid with a stable origin/extent identity
//! - [`BlockGroup`] - a Track, Column, or Stairs built from unit blocks
//! - [`BoundingBox`] - projected screen-space intervals used for occlusion
//! - [`OcclusionGraph`] - pairwise `BehindOf` relations over block identities
//! - [`CycleError`] - reported when no valid paint order exists
//! - [`Quadrant`] - the rotation bucket for equivalence lookups
//! - [`Canvas`] - the drawing-surface collaborator interface
//! - [`Scene`] - the compositor that owns groups and drives draws

pub mod block;
pub mod bounds;
pub mod canvas;
pub mod equivalence;
mod error;
pub mod group;
pub mod occlusion;
pub mod scene;

pub use block::{Block, BlockId, Direction};
pub use bounds::BoundingBox;
pub use canvas::{Canvas, CanvasCall, RecordingCanvas};
pub use equivalence::{equivalent_point, is_equivalent, Quadrant};
pub use error::BuildError;
pub use group::{BlockGroup, GroupKind};
pub use occlusion::{CycleError, OcclusionGraph};
pub use scene::{Scene, SceneConfig, DrawError, DEFAULT_COLOR};

// Re-export the geometry types for convenience
pub use isoroute_math::{iso, Color, Path, Point3, Solid};
