//! Figure output for one example.
//!
//! The batch driver only sees [`FigureRenderer`]; layout and styling live
//! in the concrete renderer.

pub mod eps;

use std::path::Path;

use anyhow::Result;

use crate::data::group::GroupData;
use crate::data::model::Grid;

/// Circle panels show this square window of the complex plane.
pub const CIRCLE_WINDOW: (f64, f64) = (-6.0, 6.0);

/// Everything drawn for one example.
#[derive(Debug, Clone, Copy)]
pub struct Figure<'a> {
    pub example: u32,
    pub grid: &'a Grid,
    pub group: &'a GroupData,
}

impl<'a> Figure<'a> {
    pub fn new(example: u32, grid: &'a Grid, group: &'a GroupData) -> Self {
        Figure {
            example,
            grid,
            group,
        }
    }

    pub fn title(&self) -> String {
        format!("Example Number {}", self.example)
    }
}

pub trait FigureRenderer {
    /// Write `figure` to `path`, replacing any existing file.
    fn render(&self, figure: &Figure<'_>, path: &Path) -> Result<()>;
}

/// Map `value` from `[lo, hi]` onto `[0, extent]`.
pub(crate) fn scale(value: f64, (lo, hi): (f64, f64), extent: f64) -> f64 {
    (value - lo) / (hi - lo) * extent
}
