use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::ExamplePaths;
use crate::error::{KpDataError, Result};

use super::model::NumericTable;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// The three raw tables exported for one example.
#[derive(Debug, Clone)]
pub struct ExampleTables {
    pub coords: NumericTable,
    pub solution: NumericTable,
    pub group: NumericTable,
}

/// Load the coordinate, solution and group tables of one example.
pub fn load_example(paths: &ExamplePaths) -> Result<ExampleTables> {
    let coords = load_table(&paths.coords)?;
    let solution = load_table(&paths.solution)?;
    let group = load_table(&paths.group)?;
    log::debug!(
        "Loaded {} coordinate rows, {} solution rows, {} circles",
        coords.len(),
        solution.len(),
        group.len()
    );
    Ok(ExampleTables {
        coords,
        solution,
        group,
    })
}

/// Load one comma-delimited numeric table with a header row.
pub fn load_table(path: &Path) -> Result<NumericTable> {
    let file = File::open(path).map_err(|source| KpDataError::DataAccess {
        path: path.to_path_buf(),
        source,
    })?;
    load_table_from_reader(file, path)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout: one header row naming the fields, then one row of floats per
/// sample. Cells are trimmed, blank lines and `#` comment lines are skipped.
///
/// `origin` only labels error messages.
pub fn load_table_from_reader<R: Read>(reader: R, origin: &Path) -> Result<NumericTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(origin, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(malformed(origin, 1, "missing header row".into()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(origin, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != columns.len() {
            return Err(malformed(
                origin,
                line,
                format!(
                    "expected {} fields (header {:?}) but found {}",
                    columns.len(),
                    columns,
                    record.len()
                ),
            ));
        }

        let row = record
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                cell.parse::<f64>().map_err(|_| {
                    malformed(
                        origin,
                        line,
                        format!("'{cell}' in column '{}' is not a number", columns[col]),
                    )
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Ok(NumericTable::new(columns, rows))
}

fn malformed(origin: &Path, line: u64, message: String) -> KpDataError {
    KpDataError::MalformedData {
        path: origin.to_path_buf(),
        line,
        message,
    }
}

/// I/O failures surface as access errors, everything else as malformed data.
fn csv_error(origin: &Path, err: csv::Error) -> KpDataError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => KpDataError::DataAccess {
            path: PathBuf::from(origin),
            source,
        },
        csv::ErrorKind::Utf8 { err, .. } => malformed(origin, line, format!("invalid UTF-8: {err}")),
        other => malformed(origin, line, format!("{other:?}")),
    }
}
