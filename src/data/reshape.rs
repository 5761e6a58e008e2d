//! Turns the flat coordinate/solution exports into an `n × n` grid.
//!
//! Samples are laid out with `x` as the outer (slow) index and `y` as the
//! inner (fast) index, so row `i` of each output array holds the `i`-th run
//! of equal `x` values. No interpolation happens: flattening any output
//! array row-major gives back the first `n * n` input samples.

use crate::error::{KpDataError, Result};

use super::model::{records, CoordinateSample, Grid, NumericTable, SolutionSample, SquareArray};

/// Reshape with the grid side inferred from where `x` first changes.
pub fn reshape(coords: &NumericTable, solution: &NumericTable) -> Result<Grid> {
    let coords: Vec<CoordinateSample> = records(coords)?;
    let solution: Vec<SolutionSample> = records(solution)?;
    reshape_samples(&coords, &solution, None)
}

/// Reshape onto a grid of the given side, skipping inference.
pub fn reshape_with_side(
    coords: &NumericTable,
    solution: &NumericTable,
    side: usize,
) -> Result<Grid> {
    let coords: Vec<CoordinateSample> = records(coords)?;
    let solution: Vec<SolutionSample> = records(solution)?;
    reshape_samples(&coords, &solution, Some(side))
}

/// Validate and reshape already-typed samples. `side == None` infers it.
///
/// Samples past `side * side` are dropped.
pub fn reshape_samples(
    coords: &[CoordinateSample],
    solution: &[SolutionSample],
    side: Option<usize>,
) -> Result<Grid> {
    if coords.len() != solution.len() {
        return Err(KpDataError::ShapeMismatch {
            coords: coords.len(),
            solution: solution.len(),
        });
    }

    let imag: Vec<f64> = solution.iter().map(|s| s.imag).collect();
    check_real_valued(&imag)?;

    let xs: Vec<f64> = coords.iter().map(|c| c.x).collect();
    let side = match side {
        Some(0) => return Err(KpDataError::ZeroGridSide),
        Some(n) => n,
        None => infer_grid_side(&xs).ok_or(KpDataError::GridInference {
            samples: xs.len(),
        })?,
    };

    let required = side
        .checked_mul(side)
        .ok_or(KpDataError::GridSideOverflow { side })?;
    if required > coords.len() {
        return Err(KpDataError::InsufficientSamples {
            side,
            required,
            available: coords.len(),
        });
    }
    if required < coords.len() {
        log::debug!(
            "Dropping {} trailing samples beyond the {side}x{side} grid",
            coords.len() - required
        );
    }

    let ys: Vec<f64> = coords.iter().map(|c| c.y).collect();
    let zs: Vec<f64> = solution.iter().map(|s| s.real).collect();

    Ok(Grid::new(
        coords[0].t,
        SquareArray::from_prefix(side, &xs),
        SquareArray::from_prefix(side, &ys),
        SquareArray::from_prefix(side, &zs),
    ))
}

/// Fails when the imaginary parts sum to a strictly positive value.
///
/// This is an aggregate test: a zero or negative sum passes even when
/// individual entries are nonzero, and existing exports are classified by
/// exactly this rule.
pub fn check_real_valued(imag: &[f64]) -> Result<()> {
    let imag_sum: f64 = imag.iter().sum();
    if imag_sum > 0.0 {
        return Err(KpDataError::ComplexSolution { imag_sum });
    }
    Ok(())
}

/// Index of the first change in `xs`, plus one. `None` if `xs` never changes.
///
/// Comparison is plain `!=`, so a NaN counts as a change.
pub fn infer_grid_side(xs: &[f64]) -> Option<usize> {
    xs.windows(2)
        .position(|pair| pair[0] != pair[1])
        .map(|i| i + 1)
}
