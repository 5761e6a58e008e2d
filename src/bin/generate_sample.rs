//! Writes synthetic `coords<N>.csv` / `soln<N>.csv` / `group<N>.csv` exports
//! for trying out `kp-figures` without the solver.
//!
//! ```bash
//! cargo run --bin generate_sample -- sample_data
//! cargo run -- sample_data -n 5
//! ```

use std::path::{Path, PathBuf};

/// KP-II line soliton
/// `u = (k²/2) sech²((k x + k p y - k (k² + 3 p²) t) / 2)`.
fn line_soliton(x: f64, y: f64, t: f64, k: f64, p: f64) -> f64 {
    let theta = 0.5 * (k * x + k * p * y - k * (k * k + 3.0 * p * p) * t);
    0.5 * k * k / theta.cosh().powi(2)
}

struct Example {
    k: f64,
    p: f64,
    /// Imaginary part written for every sample.
    imag: f64,
    /// Circle centres are `a ± i`, as in the solver's genus-one runs.
    a: f64,
    radius: f64,
}

fn write_example(dir: &Path, num: usize, ex: &Example, side: usize, extent: f64) {
    let mut coords = csv::Writer::from_path(dir.join(format!("coords{num}.csv")))
        .expect("Failed to create coordinate file");
    let mut soln = csv::Writer::from_path(dir.join(format!("soln{num}.csv")))
        .expect("Failed to create solution file");
    coords.write_record(["t", "x", "y"]).expect("write header");
    soln.write_record(["real", "imag"]).expect("write header");

    let t = 0.0;
    let step = 2.0 * extent / (side - 1) as f64;
    // x is the outer index, y the inner one.
    for i in 0..side {
        let x = -extent + i as f64 * step;
        for j in 0..side {
            let y = -extent + j as f64 * step;
            coords
                .write_record(&[t.to_string(), x.to_string(), y.to_string()])
                .expect("write coordinate row");
            let u = line_soliton(x, y, t, ex.k, ex.p);
            soln.write_record(&[u.to_string(), ex.imag.to_string()])
                .expect("write solution row");
        }
    }
    coords.flush().expect("flush coordinates");
    soln.flush().expect("flush solution");

    let mut group = csv::Writer::from_path(dir.join(format!("group{num}.csv")))
        .expect("Failed to create group file");
    group
        .write_record(["centerReal", "centerImag", "radius"])
        .expect("write header");
    for im in [1.0, -1.0] {
        group
            .write_record(&[ex.a.to_string(), im.to_string(), ex.radius.to_string()])
            .expect("write group row");
    }
    group.flush().expect("flush group");
}

fn main() {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    std::fs::create_dir_all(&out_dir).expect("Failed to create output directory");

    let examples = [
        Example { k: 1.0, p: 0.0, imag: 0.0, a: 1.0, radius: 0.5 },
        Example { k: 1.0, p: 0.5, imag: 0.0, a: 2.0, radius: 0.5 },
        Example { k: 1.5, p: -0.5, imag: 0.0, a: 4.0, radius: 0.25 },
        Example { k: 0.8, p: 1.0, imag: 0.0, a: -1.0, radius: 0.5 },
        Example { k: 1.2, p: -1.0, imag: 0.0, a: -2.0, radius: 0.75 },
        // Not real-valued: kp-figures rejects this one.
        Example { k: 1.0, p: 0.0, imag: 1e-6, a: -4.0, radius: 0.5 },
    ];

    let side = 101;
    for (num, ex) in examples.iter().enumerate() {
        write_example(&out_dir, num, ex, side, 10.0);
    }

    println!(
        "Wrote {} examples ({side}x{side} samples each) to {}",
        examples.len(),
        out_dir.display()
    );
}
