//! Canvas collaborator interface
//!
//! The engine does not draw pixels itself; it dispatches ordered paint calls
//! to a canvas. There is no double buffering: partial sequences are visible
//! immediately, which the staggered-reveal feature relies on.

use isoroute_math::{Color, Solid};

/// A persistent 2D drawing surface
pub trait Canvas {
    /// Paint the projected polygons of `solid` in `color`
    fn add(&mut self, solid: &Solid, color: Color);

    /// Erase a pixel rectangle
    fn clear(&mut self, x: u32, y: u32, width: u32, height: u32);

    /// Surface size in pixels (width, height)
    fn dimensions(&self) -> (u32, u32);
}

/// A canvas call, as recorded by [`RecordingCanvas`]
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasCall {
    Add { solid: Solid, color: Color },
    Clear { x: u32, y: u32, width: u32, height: u32 },
}

/// Canvas that records its calls instead of painting
///
/// Used by the test suites and for headless runs where only the draw order
/// matters.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<CanvasCall>,
    width: u32,
    height: u32,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            calls: Vec::new(),
            width,
            height,
        }
    }

    /// Only the painted solids, in dispatch order
    pub fn painted(&self) -> Vec<&Solid> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                CanvasCall::Add { solid, .. } => Some(solid),
                CanvasCall::Clear { .. } => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn add(&mut self, solid: &Solid, color: Color) {
        self.calls.push(CanvasCall::Add {
            solid: solid.clone(),
            color,
        });
    }

    fn clear(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.calls.push(CanvasCall::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
