//! Scene compositing and draw driving
//!
//! The [`Scene`] owns the ordered list of block groups and a shared handle
//! to the canvas collaborator. Every `draw()` flattens the groups to their
//! blocks, applies the scene rotation, rebuilds the occlusion graph, and
//! dispatches paint calls in a valid back-to-front order - or reports the
//! cycle that made ordering impossible, dispatching nothing.
//!
//! Scheduling is single-threaded and cooperative: with a non-zero delay,
//! draw calls are queued with a due time and an epoch tag, and delivered by
//! [`Scene::advance`]. A new `draw()` bumps the epoch and drops every
//! pending dispatch from superseded draws, so two frames never interleave
//! on the shared canvas.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, warn};

use isoroute_math::{Color, Path, Point3, Solid};

use crate::block::{Block, Direction};
use crate::canvas::Canvas;
use crate::equivalence::{self, Quadrant};
use crate::error::BuildError;
use crate::group::BlockGroup;
use crate::occlusion::{CycleError, OcclusionGraph};

/// Default structure color (the original's signature teal)
pub const DEFAULT_COLOR: Color = Color::new(59, 188, 188);

/// Grid pen colors
const GRID_BLUE: Color = Color::new(59, 188, 188);
const GRID_RED: Color = Color::new(160, 60, 50);

/// Scene construction parameters, with documented defaults
///
/// Passed explicitly at construction; there is no process-wide state.
#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    /// Starting route origin (default: world origin)
    pub origin: Point3,
    /// Initial rotation in radians (default: 0)
    pub rotation: f64,
    /// Grid extent used as the rotation pivot (default: 16)
    pub grid_size: u32,
    /// Delay between staggered draw dispatches (default: zero = immediate)
    pub delay: Duration,
    /// Color for blocks that specify none (default: teal)
    pub color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            origin: Point3::ORIGIN,
            rotation: 0.0,
            grid_size: 16,
            delay: Duration::ZERO,
            color: DEFAULT_COLOR,
        }
    }
}

/// Error from [`Scene::draw`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawError {
    /// No valid paint order exists; nothing was dispatched
    Cycle(CycleError),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::Cycle(e) => write!(f, "draw aborted: {}", e),
        }
    }
}

impl std::error::Error for DrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrawError::Cycle(e) => Some(e),
        }
    }
}

impl From<CycleError> for DrawError {
    fn from(e: CycleError) -> Self {
        DrawError::Cycle(e)
    }
}

/// A scheduled paint call awaiting delivery
#[derive(Debug)]
struct PendingDispatch {
    epoch: u64,
    due: Duration,
    solid: Solid,
    color: Color,
}

/// The scene: ordered block groups plus the draw driver state
pub struct Scene<C: Canvas> {
    canvas: Rc<RefCell<C>>,
    origin: Point3,
    rotation: f64,
    quadrant: Quadrant,
    grid_size: u32,
    delay: Duration,
    color: Color,
    groups: Vec<BlockGroup>,
    epoch: u64,
    clock: Duration,
    pending: Vec<PendingDispatch>,
}

impl<C: Canvas> Scene<C> {
    /// Create a scene owning the given canvas
    pub fn new(canvas: C, config: SceneConfig) -> Self {
        Self::shared(Rc::new(RefCell::new(canvas)), config)
    }

    /// Create a scene over an already-shared canvas handle
    pub fn shared(canvas: Rc<RefCell<C>>, config: SceneConfig) -> Self {
        Self {
            canvas,
            origin: config.origin,
            rotation: config.rotation,
            quadrant: Quadrant::from_rotation(config.rotation),
            grid_size: config.grid_size,
            delay: config.delay,
            color: config.color,
            groups: Vec::new(),
            epoch: 0,
            clock: Duration::ZERO,
            pending: Vec::new(),
        }
    }

    /// Create a new scene sharing this one's canvas, origin, and rotation,
    /// with an empty group list
    ///
    /// Used to compose independently-rotated sub-scenes onto one surface.
    pub fn split(&self) -> Scene<C> {
        Scene {
            canvas: Rc::clone(&self.canvas),
            origin: self.origin,
            rotation: self.rotation,
            quadrant: self.quadrant,
            grid_size: self.grid_size,
            delay: self.delay,
            color: self.color,
            groups: Vec::new(),
            epoch: 0,
            clock: Duration::ZERO,
            pending: Vec::new(),
        }
    }

    /// The shared canvas handle
    pub fn canvas_handle(&self) -> Rc<RefCell<C>> {
        Rc::clone(&self.canvas)
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[inline]
    pub fn rotation_quadrant(&self) -> Quadrant {
        self.quadrant
    }

    #[inline]
    pub fn groups(&self) -> &[BlockGroup] {
        &self.groups
    }

    /// Pending staggered dispatches not yet delivered
    pub fn pending_dispatches(&self) -> usize {
        self.pending.len()
    }

    /// Move the route origin by the given deltas
    pub fn update_origin(&mut self, dx: f64, dy: f64, dz: f64) {
        self.origin = self.origin.translated(dx, dy, dz);
    }

    /// Set the route origin
    pub fn set_origin(&mut self, origin: Point3) {
        self.origin = origin;
    }

    /// Set the per-dispatch delay for subsequent draws
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Add `delta` radians to the scene rotation
    pub fn rotate(&mut self, delta: f64) {
        self.set_rotation(self.rotation + delta);
    }

    /// Set the scene rotation, updating the derived quadrant
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.quadrant = Quadrant::from_rotation(rotation);
    }

    /// Append a pre-built group
    pub fn add_group(&mut self, group: BlockGroup) {
        self.groups.push(group);
    }

    /// Append several pre-built groups
    pub fn add_groups(&mut self, groups: impl IntoIterator<Item = BlockGroup>) {
        self.groups.extend(groups);
    }

    /// Remove the group with the given identity; returns whether one existed
    pub fn remove_group(&mut self, id: &crate::block::BlockId) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.id() != *id);
        self.groups.len() != before
    }

    /// Add a track at the current origin and advance the origin along it
    pub fn add_track(&mut self, length: i32, direction: Direction) -> Result<(), BuildError> {
        let group = BlockGroup::track(self.origin, length, direction)?;
        self.groups.push(group);
        let l = f64::from(length);
        match direction {
            Direction::X => self.update_origin(l, 0.0, 0.0),
            _ => self.update_origin(0.0, l, 0.0),
        }
        Ok(())
    }

    /// Add a column at the current origin and move the origin to its far end
    pub fn add_column(&mut self, height: i32, direction: Direction) -> Result<(), BuildError> {
        let group = BlockGroup::column(self.origin, height, direction)?;
        self.groups.push(group);
        let h = f64::from(height);
        let dz = if direction == Direction::Down || height < 0 {
            -h.abs()
        } else {
            h
        };
        self.update_origin(0.0, 0.0, dz);
        Ok(())
    }

    /// Add stairs climbing from the current origin and move the origin to
    /// the top landing
    pub fn add_stairs(
        &mut self,
        height: u32,
        direction: Direction,
        increments_per_stair: u32,
    ) -> Result<(), BuildError> {
        let entry = match direction {
            Direction::X => self.origin.translated(1.0, 0.0, 1.0),
            _ => self.origin.translated(0.0, 1.0, 1.0),
        };
        let group = BlockGroup::stairs(entry, height, direction, increments_per_stair)?;
        self.groups.push(group);
        let h = f64::from(height);
        match direction {
            Direction::X => self.update_origin(h + 1.0, 0.0, h),
            _ => self.update_origin(0.0, h + 1.0, h),
        }
        Ok(())
    }

    /// Find an existing anchor point equivalent to `query` under the
    /// current rotation quadrant
    pub fn equivalent_point(&self, query: Point3) -> Option<Point3> {
        equivalence::equivalent_point(&self.groups, query, self.quadrant)
    }

    /// Empty the group list; canvas and scheduling state are untouched
    pub fn flush(&mut self) {
        self.groups.clear();
    }

    /// Erase the rendered surface; scene state is untouched
    pub fn clear_canvas(&mut self) {
        let (width, height) = self.canvas.borrow().dimensions();
        self.canvas.borrow_mut().clear(0, 0, width, height);
    }

    /// Paint grid lines rotated with the scene
    pub fn draw_grid(&mut self, grid_size: u32, draw_negative: bool) {
        self.grid_size = grid_size;
        let g = f64::from(grid_size);
        let lo = if draw_negative { -g } else { 0.0 };
        let pivot = Point3::new(g / 2.0, g / 2.0, 0.0);
        let from = if draw_negative {
            -(grid_size as i64)
        } else {
            0
        };

        let mut canvas = self.canvas.borrow_mut();
        for i in from..=grid_size as i64 {
            let t = i as f64;
            let along_y = Path::new(vec![
                Point3::new(t, lo, 0.0),
                Point3::new(t, g, 0.0),
                Point3::new(t, lo, 0.0),
            ])
            .rotated_z(pivot, self.rotation);
            canvas.add(&Solid::from_path(along_y), GRID_BLUE);

            let along_x = Path::new(vec![
                Point3::new(lo, t, 0.0),
                Point3::new(g, t, 0.0),
                Point3::new(lo, t, 0.0),
            ])
            .rotated_z(pivot, self.rotation);
            canvas.add(&Solid::from_path(along_x), GRID_RED);
        }
    }

    /// Rebuild the occlusion order and dispatch one paint call per block
    ///
    /// Returns the number of blocks dispatched (or scheduled, when a delay
    /// is set). On a cycle, returns the error and dispatches nothing: the
    /// draw is atomic. Prior draws' pending dispatches are superseded.
    pub fn draw(&mut self) -> Result<usize, DrawError> {
        self.epoch += 1;
        if !self.pending.is_empty() {
            warn!(
                "draw epoch {}: dropping {} stale pending dispatches",
                self.epoch,
                self.pending.len()
            );
            let epoch = self.epoch;
            self.pending.retain(|p| p.epoch == epoch);
        }

        let g = f64::from(self.grid_size);
        let pivot = Point3::new(g / 2.0, g / 2.0, 0.0);
        let mut blocks: Vec<Block> = Vec::new();
        for group in &self.groups {
            for block in group.blocks() {
                let color = block.color.or(group.color).unwrap_or(self.color);
                blocks.push(
                    block
                        .rotated_z(pivot, self.rotation)
                        .with_color(Some(color)),
                );
            }
        }

        let graph = OcclusionGraph::from_blocks(&blocks);
        let node_order = graph.sequence()?;

        let mut by_node: Vec<Vec<usize>> = vec![Vec::new(); graph.node_count()];
        for (i, block) in blocks.iter().enumerate() {
            let node = graph
                .node_of(&block.id())
                .expect("every flattened block has a node");
            by_node[node].push(i);
        }
        let sequence: Vec<usize> = node_order
            .iter()
            .flat_map(|&n| by_node[n].iter().copied())
            .collect();
        debug!(
            "draw epoch {}: {} blocks in {} nodes",
            self.epoch,
            sequence.len(),
            graph.node_count()
        );

        if self.delay.is_zero() {
            let mut canvas = self.canvas.borrow_mut();
            for &i in &sequence {
                let block = &blocks[i];
                canvas.add(block.solid(), block.color.unwrap_or(self.color));
            }
        } else {
            for (step, &i) in sequence.iter().enumerate() {
                let block = &blocks[i];
                self.pending.push(PendingDispatch {
                    epoch: self.epoch,
                    due: self.clock + self.delay * step as u32,
                    solid: block.solid().clone(),
                    color: block.color.unwrap_or(self.color),
                });
            }
        }
        Ok(sequence.len())
    }

    /// Advance the cooperative clock, delivering every dispatch now due
    ///
    /// Returns the number of paint calls delivered.
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.clock += dt;
        let clock = self.clock;
        let mut delivered = 0;
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= clock {
                let p = self.pending.remove(i);
                self.canvas.borrow_mut().add(&p.solid, p.color);
                delivered += 1;
            } else {
                i += 1;
            }
        }
        delivered
    }
}
