use super::camera_models::Camera;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Largest number of rows or columns in a layout grid
pub const MAX_GRID_SIZE: u32 = 8;

/// Camera layout model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    pub id: String,
    pub name: String,
    pub grid: LayoutGrid,
}

/// Grid of camera slots, row-major. `None` marks an empty slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutGrid {
    pub rows: u32,
    pub cols: u32,
    pub cameras: Vec<Option<String>>,
}

/// A grid cell after resolving its camera reference
#[derive(Debug, Clone, PartialEq)]
pub enum GridSlot<'a> {
    Camera(&'a Camera),
    Empty,
}

fn check_shape(rows: u32, cols: u32) -> Result<(), Error> {
    for (label, value) in [("rows", rows), ("cols", cols)] {
        if value == 0 || value > MAX_GRID_SIZE {
            return Err(Error::Validation(format!(
                "Grid {} must be between 1 and {}, got {}",
                label, MAX_GRID_SIZE, value
            )));
        }
    }
    Ok(())
}

impl LayoutGrid {
    /// An all-empty grid
    pub fn empty(rows: u32, cols: u32) -> Result<Self, Error> {
        check_shape(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cameras: vec![None; rows as usize * cols as usize],
        })
    }

    pub fn size(&self) -> usize {
        (self.rows as usize).saturating_mul(self.cols as usize)
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_shape(self.rows, self.cols)?;
        if self.cameras.len() != self.size() {
            return Err(Error::Validation(format!(
                "Grid {}x{} needs {} slots, got {}",
                self.rows,
                self.cols,
                self.size(),
                self.cameras.len()
            )));
        }
        Ok(())
    }

    /// Change the grid shape, keeping the cameras that still fit by index
    pub fn resize(&mut self, rows: u32, cols: u32) -> Result<(), Error> {
        check_shape(rows, cols)?;
        self.cameras.resize(rows as usize * cols as usize, None);
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Assign a camera (or an empty slot) to the cell at `index`
    pub fn set_cell(&mut self, index: usize, camera_id: Option<String>) -> Result<(), Error> {
        let size = self.cameras.len();
        let cell = self
            .cameras
            .get_mut(index)
            .ok_or_else(|| Error::Validation(format!("Cell {} outside grid of {}", index, size)))?;
        *cell = camera_id;
        Ok(())
    }
}

impl Layout {
    /// Blank 2x2 layout offered when creating a new one
    pub fn blank(id: String) -> Self {
        Self {
            id,
            name: "New Custom Layout".to_string(),
            grid: LayoutGrid {
                rows: 2,
                cols: 2,
                cameras: vec![None; 4],
            },
        }
    }

    /// Single-cell view of the first camera, used when no layouts are saved
    pub fn default_view(cameras: &[Camera]) -> Option<Self> {
        cameras.first().map(|camera| Self {
            id: "layout-default".to_string(),
            name: "Default View".to_string(),
            grid: LayoutGrid {
                rows: 1,
                cols: 1,
                cameras: vec![Some(camera.id.clone())],
            },
        })
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Layout name cannot be empty".to_string()));
        }
        self.grid.validate()
    }

    /// Resolve every cell against `cameras`. Ids with no matching camera
    /// become empty slots.
    pub fn resolve<'a>(&self, cameras: &'a [Camera]) -> Vec<GridSlot<'a>> {
        self.grid
            .cameras
            .iter()
            .map(|cell| {
                cell.as_deref()
                    .and_then(|id| cameras.iter().find(|c| c.id == id))
                    .map_or(GridSlot::Empty, GridSlot::Camera)
            })
            .collect()
    }
}
