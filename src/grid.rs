//! Grid state: vegetation layer, occupancy traces, prey spatial index,
//! and the boundary policy shared by both species.

use serde::{Deserialize, Serialize};

/// Composite per-cell display code. Precedence when grids disagree:
/// predator > prey > vegetation > unoccupied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellCode {
    Unoccupied = 0,
    Vegetation = 1,
    Prey = 2,
    Predator = 3,
}

/// Boundary policy applied independently per axis.
#[derive(Clone, Copy, Debug)]
pub struct Bounds {
    size: u16,
    wrap: bool,
}

impl Bounds {
    pub fn new(size: u16, wrap: bool) -> Self {
        Self { size, wrap }
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    /// Map a raw post-offset coordinate back into `[0, size)`.
    ///
    /// Wrap mode reenters from the opposite edge; clamp mode pins to the
    /// nearest valid coordinate.
    #[inline]
    pub fn resolve(&self, coord: i32) -> u16 {
        let size = i32::from(self.size);
        if self.wrap {
            coord.rem_euclid(size) as u16
        } else {
            coord.clamp(0, size - 1) as u16
        }
    }
}

/// SIZE x SIZE binary vegetation layer. Starts fully vegetated; feeding
/// clears cells, growth sets them back.
#[derive(Clone, Debug)]
pub struct VegetationGrid {
    size: usize,
    cells: Vec<bool>,
}

impl VegetationGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![true; size * size],
        }
    }

    #[inline]
    fn idx(&self, x: u16, y: u16) -> usize {
        y as usize * self.size + x as usize
    }

    #[inline]
    pub fn is_present(&self, x: u16, y: u16) -> bool {
        self.cells[self.idx(x, y)]
    }

    /// Strip vegetation at a cell, returning the amount eaten (1 or 0).
    /// Clearing an absent cell is a no-op.
    #[inline]
    pub fn consume(&mut self, x: u16, y: u16) -> u32 {
        let idx = self.idx(x, y);
        let amount = u32::from(self.cells[idx]);
        self.cells[idx] = false;
        amount
    }

    /// Apply a per-cell growth mask. Growth only ever adds vegetation.
    pub fn grow(&mut self, sites: &[bool]) {
        for (cell, &grew) in self.cells.iter_mut().zip(sites) {
            *cell = *cell || grew;
        }
    }

    /// Number of vegetated cells.
    pub fn covered(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn cells(&self) -> &[bool] {
        &self.cells
    }
}

/// Most-recent-writer trace of one species' positions. Display only, never
/// authoritative: with stacked agents it records whichever wrote last.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    size: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    #[inline]
    fn idx(&self, x: u16, y: u16) -> usize {
        y as usize * self.size + x as usize
    }

    #[inline]
    pub fn mark(&mut self, x: u16, y: u16) {
        let idx = self.idx(x, y);
        self.cells[idx] = true;
    }

    #[inline]
    pub fn clear(&mut self, x: u16, y: u16) {
        let idx = self.idx(x, y);
        self.cells[idx] = false;
    }

    #[inline]
    pub fn occupied(&self, x: u16, y: u16) -> bool {
        self.cells[self.idx(x, y)]
    }

    pub(crate) fn cells(&self) -> &[bool] {
        &self.cells
    }
}

/// Spatial index mapping cells to prey indices, rebuilt after each move
/// phase so predators can feed on exact co-location.
#[derive(Clone, Debug)]
pub struct SpatialIndex {
    size: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialIndex {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Vec::new(); size * size],
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, x: u16, y: u16, agent_idx: usize) {
        let idx = y as usize * self.size + x as usize;
        self.cells[idx].push(agent_idx);
    }

    /// All agent indices at one cell. Duplicated coordinates are kept as-is.
    #[inline]
    pub fn at(&self, x: u16, y: u16) -> &[usize] {
        &self.cells[y as usize * self.size + x as usize]
    }
}
