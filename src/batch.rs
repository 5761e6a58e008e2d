use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::BatchConfig;
use crate::data::group::parse_group_data;
use crate::data::loader::load_example;
use crate::data::reshape::{reshape, reshape_with_side};
use crate::render::{Figure, FigureRenderer};

/// Outcome of a batch run. Every example in the range lands in exactly one list.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub rendered: Vec<(u32, PathBuf)>,
    pub failed: Vec<(u32, anyhow::Error)>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Process every example in the configured range. A failing example is
/// logged and recorded, and the loop moves on to the next one.
pub fn run_batch(config: &BatchConfig, renderer: &dyn FigureRenderer) -> BatchReport {
    let mut report = BatchReport::default();
    for example in config.examples() {
        log::info!("Example {example}");
        match process_example(config, example, renderer) {
            Ok(path) => {
                log::info!("Example {example}: wrote {}", path.display());
                report.rendered.push((example, path));
            }
            Err(e) => {
                log::error!("Example {example} skipped: {e:#}");
                report.failed.push((example, e));
            }
        }
    }
    log::info!(
        "Rendered {} of {} examples",
        report.rendered.len(),
        report.rendered.len() + report.failed.len()
    );
    report
}

/// Load, validate, reshape and render one example.
pub fn process_example(
    config: &BatchConfig,
    example: u32,
    renderer: &dyn FigureRenderer,
) -> Result<PathBuf> {
    let paths = config.paths(example);
    let tables = load_example(&paths).with_context(|| format!("loading example {example}"))?;

    let grid = match config.grid_side {
        Some(side) => reshape_with_side(&tables.coords, &tables.solution, side),
        None => reshape(&tables.coords, &tables.solution),
    }
    .with_context(|| format!("reshaping example {example}"))?;
    log::debug!("Example {example}: {0}x{0} grid at t = {1}", grid.side(), grid.time());

    let group = parse_group_data(&tables.group)
        .with_context(|| format!("parsing group data of example {example}"))?;

    let figure_path = config.figure_path(example);
    renderer.render(&Figure::new(example, &grid, &group), &figure_path)?;
    Ok(figure_path)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;

    use super::*;
    use crate::error::KpDataError;

    /// Records what it was asked to draw instead of writing files.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(String, usize, usize, PathBuf)>>,
    }

    impl FigureRenderer for Recorder {
        fn render(&self, figure: &Figure<'_>, path: &Path) -> Result<()> {
            self.calls.borrow_mut().push((
                figure.title(),
                figure.grid.side(),
                figure.group.len(),
                path.to_path_buf(),
            ));
            Ok(())
        }
    }

    fn write_example(dir: &Path, k: u32, imag: f64) {
        std::fs::write(
            dir.join(format!("coords{k}.csv")),
            "t,x,y\n0,0,0\n0,0,1\n0,1,0\n0,1,1\n",
        )
        .unwrap();
        std::fs::write(
            dir.join(format!("soln{k}.csv")),
            format!("real,imag\n1,0\n2,{imag}\n3,0\n4,0\n"),
        )
        .unwrap();
        std::fs::write(
            dir.join(format!("group{k}.csv")),
            "centerReal,centerImag,radius\n1.0,0.0,2.0\n-1.0,0.5,1.5\n",
        )
        .unwrap();
    }

    fn config_for(dir: &Path, last: u32) -> BatchConfig {
        BatchConfig {
            base_dir: dir.to_path_buf(),
            last_example: last,
            ..BatchConfig::default()
        }
    }

    #[test]
    fn bad_examples_do_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        write_example(dir.path(), 0, 0.0);
        write_example(dir.path(), 1, 0.25); // complex
        // example 2 has no files
        write_example(dir.path(), 3, 0.0);

        let recorder = Recorder::default();
        let report = run_batch(&config_for(dir.path(), 3), &recorder);

        let rendered: Vec<u32> = report.rendered.iter().map(|(k, _)| *k).collect();
        let failed: Vec<u32> = report.failed.iter().map(|(k, _)| *k).collect();
        assert_eq!(rendered, vec![0, 3]);
        assert_eq!(failed, vec![1, 2]);
        assert!(!report.all_succeeded());

        let complex = report.failed[0].1.downcast_ref::<KpDataError>();
        assert!(matches!(complex, Some(KpDataError::ComplexSolution { .. })));
        let missing = report.failed[1].1.downcast_ref::<KpDataError>();
        assert!(matches!(missing, Some(KpDataError::DataAccess { .. })));
        assert!(format!("{:#}", report.failed[1].1).contains("example 2"));

        let calls = recorder.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "Example Number 0");
        assert_eq!((calls[0].1, calls[0].2), (2, 2));
        assert_eq!(calls[1].3, dir.path().join("ExampleNum3.eps"));
    }

    #[test]
    fn explicit_grid_side_is_used() {
        let dir = tempfile::tempdir().unwrap();
        write_example(dir.path(), 0, 0.0);
        let config = BatchConfig {
            grid_side: Some(3),
            ..config_for(dir.path(), 0)
        };

        let err = process_example(&config, 0, &Recorder::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KpDataError>(),
            Some(KpDataError::InsufficientSamples { side: 3, .. })
        ));
    }

    #[test]
    fn writes_eps_figures_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        write_example(dir.path(), 0, 0.0);
        let config = config_for(dir.path(), 0);
        let report = run_batch(&config, &crate::render::eps::EpsRenderer);
        assert!(report.all_succeeded());
        let eps = std::fs::read_to_string(dir.path().join("ExampleNum0.eps")).unwrap();
        assert!(eps.contains("(Example Number 0)"));
    }
}
