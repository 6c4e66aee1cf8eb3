//! isoroute - isometric block routes with painter's-algorithm ordering
//!
//! Composes tracks, columns, and stairs out of unit blocks and renders them
//! onto a 2D isometric canvas in correct visual occlusion order.

pub mod config;
