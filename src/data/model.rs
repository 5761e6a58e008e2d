use crate::error::{KpDataError, Result};

// ---------------------------------------------------------------------------
// NumericTable – one header-named table of floats
// ---------------------------------------------------------------------------

/// A delimited numeric table as read from disk: header names plus rows of
/// floats, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl NumericTable {
    /// Build a table from column names and rows. Every row must be as wide
    /// as the header; the loader guarantees this for tables read from disk.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        NumericTable { columns, rows }
    }

    /// Header names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Position of the column called `name` (ASCII case-insensitive).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Copy of the named column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }

    /// Single cell lookup by row index and field name.
    pub fn get(&self, row: usize, name: &str) -> Option<f64> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| r[idx])
    }
}

// ---------------------------------------------------------------------------
// Typed records
// ---------------------------------------------------------------------------

/// A record type that can be read out of a [`NumericTable`] by field name.
///
/// `FIELDS` lists the expected header names in their documented export
/// order. A name that is absent from the header falls back to that
/// position, since older exports carry arbitrary header text.
pub trait FromTable: Sized {
    /// Table name used in error messages.
    const TABLE: &'static str;
    const FIELDS: &'static [&'static str];

    /// Build a record from the resolved field values, in `FIELDS` order.
    fn from_fields(values: &[f64]) -> Self;
}

/// Read every row of `table` as a `T`, preserving row order.
pub fn records<T: FromTable>(table: &NumericTable) -> Result<Vec<T>> {
    let indices = resolve_fields::<T>(table)?;
    let mut values = vec![0.0; indices.len()];
    Ok(table
        .rows()
        .map(|row| {
            for (slot, &idx) in values.iter_mut().zip(&indices) {
                *slot = row[idx];
            }
            T::from_fields(&values)
        })
        .collect())
}

fn resolve_fields<T: FromTable>(table: &NumericTable) -> Result<Vec<usize>> {
    let by_name: Vec<Option<usize>> = T::FIELDS
        .iter()
        .map(|field| table.column_index(field))
        .collect();

    T::FIELDS
        .iter()
        .enumerate()
        .map(|(position, &field)| match by_name[position] {
            Some(idx) => Ok(idx),
            // A column claimed by name for another field is never reused.
            None if position < table.columns().len() && !by_name.contains(&Some(position)) => {
                log::warn!(
                    "{} table has no '{field}' column; using column {position} ('{}')",
                    T::TABLE,
                    table.columns()[position]
                );
                Ok(position)
            }
            None => Err(KpDataError::MissingField {
                table: T::TABLE,
                field,
            }),
        })
        .collect()
}

/// One row of the coordinate export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

impl FromTable for CoordinateSample {
    const TABLE: &'static str = "coordinate";
    const FIELDS: &'static [&'static str] = &["t", "x", "y"];

    fn from_fields(values: &[f64]) -> Self {
        CoordinateSample {
            t: values[0],
            x: values[1],
            y: values[2],
        }
    }
}

/// One row of the solution export, paired by index with a [`CoordinateSample`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionSample {
    pub real: f64,
    pub imag: f64,
}

impl FromTable for SolutionSample {
    const TABLE: &'static str = "solution";
    const FIELDS: &'static [&'static str] = &["real", "imag"];

    fn from_fields(values: &[f64]) -> Self {
        SolutionSample {
            real: values[0],
            imag: values[1],
        }
    }
}

/// A circle in the complex plane from the group export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleDescriptor {
    pub center_real: f64,
    pub center_imag: f64,
    pub radius: f64,
}

impl FromTable for CircleDescriptor {
    const TABLE: &'static str = "group";
    const FIELDS: &'static [&'static str] = &["centerReal", "centerImag", "radius"];

    fn from_fields(values: &[f64]) -> Self {
        CircleDescriptor {
            center_real: values[0],
            center_imag: values[1],
            radius: values[2],
        }
    }
}

// ---------------------------------------------------------------------------
// SquareArray / Grid – the reshaped output
// ---------------------------------------------------------------------------

/// An `n × n` array stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareArray {
    side: usize,
    data: Vec<f64>,
}

impl SquareArray {
    /// Wrap the first `side * side` values of `values`.
    pub(crate) fn from_prefix(side: usize, values: &[f64]) -> Self {
        SquareArray {
            side,
            data: values[..side * side].to_vec(),
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.side, self.side)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.side && col < self.side {
            Some(self.data[row * self.side + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.side {
            Some(&self.data[row * self.side..(row + 1) * self.side])
        } else {
            None
        }
    }

    /// Row-major flat view.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        if self.side == 0 {
            return Vec::new();
        }
        self.data.chunks(self.side).map(<[f64]>::to_vec).collect()
    }

    /// Smallest and largest finite value, if any.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// The sampled solution surface: X, Y and Z share one `n × n` shape, and
/// row `i` holds the samples whose `x` is the `i`-th distinct value.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    time: f64,
    x: SquareArray,
    y: SquareArray,
    z: SquareArray,
}

impl Grid {
    pub(crate) fn new(time: f64, x: SquareArray, y: SquareArray, z: SquareArray) -> Self {
        debug_assert_eq!(x.shape(), y.shape());
        debug_assert_eq!(x.shape(), z.shape());
        Grid { time, x, y, z }
    }

    pub fn side(&self) -> usize {
        self.z.side()
    }

    /// The `t` of the first sample; exports hold a single time slice.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn x(&self) -> &SquareArray {
        &self.x
    }

    pub fn y(&self) -> &SquareArray {
        &self.y
    }

    pub fn z(&self) -> &SquareArray {
        &self.z
    }

    /// Finite min/max of the solution amplitude.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.z.finite_range()
    }
}
