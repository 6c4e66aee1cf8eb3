//! Composite block groups
//!
//! A [`BlockGroup`] is an ordered, non-empty collection of blocks forming one
//! logical structure. The three kinds differ only in how they tile their
//! blocks from the construction parameters:
//!
//! - [`BlockGroup::track`] - unit blocks along the X or Y axis
//! - [`BlockGroup::column`] - unit blocks stacked vertically
//! - [`BlockGroup::stairs`] - sub-unit blocks tiling a diagonal ramp
//!
//! Factories validate their parameters and return fully built, ready-to-draw
//! groups; there is no partially constructed state to mutate afterwards.
//! Tracks and columns can additionally carry a triangular extrusion cap at
//! either end.

use isoroute_math::{Color, Path, Point3, Solid};

use crate::block::{Block, BlockId, Direction};
use crate::error::BuildError;

const FRAC_PI_2: f64 = std::f64::consts::FRAC_PI_2;
const PI: f64 = std::f64::consts::PI;

/// Discriminates the structure a group was built as
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKind {
    Track { length: i32 },
    Column { height: i32 },
    Stairs { height: u32, increments: u32 },
}

impl GroupKind {
    fn name(&self) -> &'static str {
        match self {
            GroupKind::Track { .. } => "Track",
            GroupKind::Column { .. } => "Column",
            GroupKind::Stairs { .. } => "Stairs",
        }
    }
}

/// An ordered, non-empty collection of blocks forming one structure
#[derive(Clone, Debug)]
pub struct BlockGroup {
    pub origin: Point3,
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub direction: Direction,
    pub color: Option<Color>,
    kind: GroupKind,
    blocks: Vec<Block>,
}

impl BlockGroup {
    /// Tile `|length|` unit blocks along the X or Y axis
    ///
    /// A negative length tiles backward from the origin; the group's stored
    /// origin is unchanged.
    pub fn track(origin: Point3, length: i32, direction: Direction) -> Result<Self, BuildError> {
        if length == 0 {
            return Err(BuildError::ZeroExtent { param: "length" });
        }
        if !matches!(direction, Direction::X | Direction::Y) {
            return Err(BuildError::UnsupportedDirection {
                kind: "Track",
                direction,
            });
        }

        let n = length.unsigned_abs() as usize;
        let backward = length < 0;
        let blocks = (0..n)
            .map(|d| {
                let offset = if backward { -(d as f64) - 1.0 } else { d as f64 };
                let at = match direction {
                    Direction::X => origin.translated(offset, 0.0, 0.0),
                    _ => origin.translated(0.0, offset, 0.0),
                };
                Block::unit(at)
            })
            .collect();

        let (dx, dy) = match direction {
            Direction::X => (n as f64, 1.0),
            _ => (1.0, n as f64),
        };
        Ok(Self {
            origin,
            dx,
            dy,
            dz: 1.0,
            direction,
            color: None,
            kind: GroupKind::Track { length },
            blocks,
        })
    }

    /// Stack `|height|` unit blocks vertically
    ///
    /// `Down` (or a negative height) tiles downward from the origin.
    pub fn column(origin: Point3, height: i32, direction: Direction) -> Result<Self, BuildError> {
        if height == 0 {
            return Err(BuildError::ZeroExtent { param: "height" });
        }
        if !matches!(direction, Direction::Up | Direction::Down) {
            return Err(BuildError::UnsupportedDirection {
                kind: "Column",
                direction,
            });
        }

        let n = height.unsigned_abs() as usize;
        let downward = direction == Direction::Down || height < 0;
        let blocks = (0..n)
            .map(|h| {
                let offset = if downward { -(h as f64) - 1.0 } else { h as f64 };
                Block::unit(origin.translated(0.0, 0.0, offset))
            })
            .collect();

        Ok(Self {
            origin,
            dx: 1.0,
            dy: 1.0,
            dz: n as f64,
            direction,
            color: None,
            kind: GroupKind::Column { height },
            blocks,
        })
    }

    /// Tile `height x increments` sub-unit blocks along a diagonal ramp
    pub fn stairs(
        origin: Point3,
        height: u32,
        direction: Direction,
        increments_per_stair: u32,
    ) -> Result<Self, BuildError> {
        if height == 0 {
            return Err(BuildError::ZeroExtent { param: "height" });
        }
        if increments_per_stair == 0 {
            return Err(BuildError::ZeroIncrement);
        }
        if !matches!(direction, Direction::X | Direction::Y) {
            return Err(BuildError::UnsupportedDirection {
                kind: "Stairs",
                direction,
            });
        }

        let step = 1.0 / f64::from(increments_per_stair);
        let total = (height * increments_per_stair) as usize;
        let blocks = (0..total)
            .map(|b| {
                let run = b as f64 * step;
                let (at, sx, sy) = match direction {
                    Direction::X => (origin.translated(run, 0.0, run), step, 1.0),
                    _ => (origin.translated(0.0, run, run), 1.0, step),
                };
                Block::new(at, sx, sy, step)
            })
            .collect();

        let h = f64::from(height);
        let (dx, dy) = match direction {
            Direction::X => (h, 1.0),
            _ => (1.0, h),
        };
        Ok(Self {
            origin,
            dx,
            dy,
            dz: h,
            direction,
            color: None,
            kind: GroupKind::Stairs {
                height,
                increments: increments_per_stair,
            },
            blocks,
        })
    }

    /// The structure this group was built as
    #[inline]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// The member blocks, in tiling order (caps last)
    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Identity derived from the group's origin and extents
    pub fn id(&self) -> BlockId {
        BlockId::from_parts(self.origin, self.dx, self.dy, self.dz)
    }

    /// Set the group color and repaint every member block
    pub fn recolor(&mut self, color: Color) {
        self.color = Some(color);
        for block in &mut self.blocks {
            block.color = Some(color);
        }
    }

    /// Builder form of [`recolor`](Self::recolor)
    pub fn with_color(mut self, color: Color) -> Self {
        self.recolor(color);
        self
    }

    fn cap_block(&self, cap_origin: Point3) -> Block {
        let path = Path::new(vec![
            cap_origin,
            cap_origin.translated(1.0, 0.0, 0.0),
            cap_origin.translated(1.0, 1.0, 0.0),
        ]);
        Block::unit(cap_origin)
            .with_color(self.color)
            .with_solid(Solid::extrude(&path, 1.0))
    }

    /// Append a triangular extrusion cap at the start of the structure
    ///
    /// Supported on tracks and columns; stairs have no cap shape.
    pub fn with_start_cap(mut self) -> Result<Self, BuildError> {
        let cap = match self.kind {
            GroupKind::Track { .. } => {
                let cap_origin = match self.direction {
                    Direction::X => self.origin.translated(-1.0, 0.0, 0.0),
                    _ => self.origin.translated(0.0, -1.0, 0.0),
                };
                let pivot = cap_origin.translated(0.5, 0.5, 0.5);
                let block = self.cap_block(cap_origin);
                match self.direction {
                    Direction::X => block.rotated_x(pivot, -PI * 3.0 / 2.0),
                    _ => block
                        .rotated_y(pivot, -PI * 3.0 / 2.0)
                        .rotated_z(pivot, PI),
                }
            }
            GroupKind::Column { .. } => {
                let cap_origin = self.origin.translated(0.0, 0.0, -1.0);
                let pivot = cap_origin.translated(0.5, 0.5, 0.5);
                self.cap_block(cap_origin)
                    .rotated_y(pivot, FRAC_PI_2)
                    .rotated_x(pivot, -PI * 3.0 / 2.0)
            }
            GroupKind::Stairs { .. } => {
                return Err(BuildError::CapUnsupported {
                    kind: self.kind.name(),
                })
            }
        };
        self.blocks.push(cap);
        Ok(self)
    }

    /// Append a triangular extrusion cap at the end of the structure
    pub fn with_end_cap(mut self) -> Result<Self, BuildError> {
        let cap = match self.kind {
            GroupKind::Track { .. } => {
                let cap_origin = match self.direction {
                    Direction::X => self.origin.translated(self.dx, self.dy - 1.0, 0.0),
                    _ => self.origin.translated(self.dx - 1.0, self.dy, 0.0),
                };
                let pivot = cap_origin.translated(0.5, 0.5, 0.5);
                let block = self.cap_block(cap_origin);
                match self.direction {
                    Direction::X => block
                        .rotated_x(pivot, -FRAC_PI_2)
                        .rotated_z(pivot, PI),
                    _ => block.rotated_y(pivot, -FRAC_PI_2),
                }
            }
            GroupKind::Column { .. } => {
                let cap_origin = self.origin.translated(0.0, 0.0, self.dz);
                let pivot = cap_origin.translated(0.5, 0.5, 0.5);
                self.cap_block(cap_origin)
                    .rotated_y(pivot, FRAC_PI_2)
                    .rotated_x(pivot, -FRAC_PI_2)
            }
            GroupKind::Stairs { .. } => {
                return Err(BuildError::CapUnsupported {
                    kind: self.kind.name(),
                })
            }
        };
        self.blocks.push(cap);
        Ok(self)
    }

    /// Pivot half a unit inside the group's origin corner
    pub fn rotation_start_point(&self) -> Point3 {
        self.origin.translated(0.5, 0.5, 0.5)
    }

    /// Pivot at the group's geometric center
    pub fn rotation_center_point(&self) -> Point3 {
        self.origin
            .translated(self.dx / 2.0, self.dy / 2.0, self.dz / 2.0)
    }

    /// Pivot half a unit inside the group's far corner
    pub fn rotation_end_point(&self) -> Point3 {
        self.origin
            .translated(self.dx - 0.5, self.dy - 0.5, self.dz - 0.5)
    }

    /// Rotate every member block about the X axis; identities are kept
    pub fn rotated_x(mut self, pivot: Point3, angle: f64) -> Self {
        self.blocks = self
            .blocks
            .iter()
            .map(|b| b.rotated_x(pivot, angle))
            .collect();
        self
    }

    /// Rotate every member block about the Y axis; identities are kept
    pub fn rotated_y(mut self, pivot: Point3, angle: f64) -> Self {
        self.blocks = self
            .blocks
            .iter()
            .map(|b| b.rotated_y(pivot, angle))
            .collect();
        self
    }

    /// Rotate every member block about the Z axis; identities are kept
    pub fn rotated_z(mut self, pivot: Point3, angle: f64) -> Self {
        self.blocks = self
            .blocks
            .iter()
            .map(|b| b.rotated_z(pivot, angle))
            .collect();
        self
    }

    /// Rotate about the group's own tiling axis, pivoting at the far corner
    pub fn rotated_along_axis(self, angle: f64) -> Self {
        let pivot = self.rotation_end_point();
        match self.direction {
            Direction::Up | Direction::Down => self.rotated_z(pivot, angle),
            Direction::X => self.rotated_x(pivot, angle),
            Direction::Y => self.rotated_y(pivot, angle),
        }
    }
}
