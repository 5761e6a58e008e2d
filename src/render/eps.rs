use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use palette::Srgb;

use crate::color::{generate_palette, DivergingMap};
use crate::data::model::Grid;

use super::{scale, Figure, FigureRenderer, CIRCLE_WINDOW};

const PAGE_WIDTH: f64 = 600.0;
const PAGE_HEIGHT: f64 = 640.0;
/// Side of each panel's plotting area, in points.
const PANEL: f64 = 220.0;
const TABLE_ROWS: usize = 12;

/// Writes a 2×2 EPS figure: circles, circle table, top view of the
/// solution, and a profile through the middle grid row.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpsRenderer;

impl FigureRenderer for EpsRenderer {
    fn render(&self, figure: &Figure<'_>, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut out = BufWriter::new(file);
        write_eps(&mut out, figure)
            .and_then(|_| out.flush())
            .with_context(|| format!("writing {}", path.display()))
    }
}

/// Lower-left corner of the plotting area of panel `(col, row)`, row 0 on top.
fn panel_origin(col: usize, row: usize) -> (f64, f64) {
    (60.0 + col as f64 * 300.0, 50.0 + (1 - row) as f64 * 290.0)
}

pub fn write_eps<W: Write>(out: &mut W, figure: &Figure<'_>) -> io::Result<()> {
    writeln!(out, "%!PS-Adobe-3.0 EPSF-3.0")?;
    writeln!(out, "%%BoundingBox: 0 0 {} {}", PAGE_WIDTH, PAGE_HEIGHT)?;
    writeln!(out, "%%Title: {}", figure.title())?;
    writeln!(out, "%%Creator: kp-figures")?;
    writeln!(out, "%%EndComments")?;
    writeln!(out, "/F {{ /Helvetica findfont exch scalefont setfont }} bind def")?;
    writeln!(out, "1 setlinewidth 0 setgray")?;

    writeln!(out, "16 F")?;
    centered_text(out, PAGE_WIDTH / 2.0, PAGE_HEIGHT - 30.0, &figure.title())?;
    writeln!(out, "9 F")?;

    circle_panel(out, figure, panel_origin(0, 0))?;
    circle_table(out, figure, panel_origin(1, 0))?;
    surface_panel(out, figure.grid, panel_origin(0, 1))?;
    profile_panel(out, figure.grid, panel_origin(1, 1))?;

    writeln!(out, "showpage")?;
    writeln!(out, "%%EOF")
}

fn circle_panel<W: Write>(out: &mut W, figure: &Figure<'_>, (x0, y0): (f64, f64)) -> io::Result<()> {
    frame(out, x0, y0)?;
    let (lo, hi) = CIRCLE_WINDOW;
    axis_labels(out, x0, y0, "Re", "Im", (lo, hi), (lo, hi))?;

    writeln!(out, "gsave newpath {x0} {y0} {PANEL} {PANEL} rectclip")?;
    let colours = generate_palette(figure.group.len());
    for (circle, colour) in figure.group.circles().zip(colours) {
        let cx = x0 + scale(circle.center_real, CIRCLE_WINDOW, PANEL);
        let cy = y0 + scale(circle.center_imag, CIRCLE_WINDOW, PANEL);
        let r = circle.radius.abs() / (hi - lo) * PANEL;
        if !(cx.is_finite() && cy.is_finite() && r.is_finite()) {
            continue;
        }
        set_colour(out, colour)?;
        writeln!(out, "newpath {cx:.3} {cy:.3} {r:.3} 0 360 arc closepath stroke")?;
    }
    writeln!(out, "grestore")
}

fn circle_table<W: Write>(out: &mut W, figure: &Figure<'_>, (x0, y0): (f64, f64)) -> io::Result<()> {
    let columns = [x0, x0 + 80.0, x0 + 160.0];
    let mut y = y0 + PANEL - 12.0;
    for (x, label) in columns.iter().zip(["Real-Center", "Imag-Center", "Radius"]) {
        text(out, *x, y, label)?;
    }
    writeln!(out, "newpath {x0} {} moveto {PANEL} 0 rlineto stroke", y - 4.0)?;

    for circle in figure.group.circles().take(TABLE_ROWS) {
        y -= 14.0;
        let cells = [circle.center_real, circle.center_imag, circle.radius];
        for (x, value) in columns.iter().zip(cells) {
            text(out, *x, y, &format!("{value:.4}"))?;
        }
    }
    if figure.group.len() > TABLE_ROWS {
        y -= 14.0;
        text(out, x0, y, &format!("... {} more", figure.group.len() - TABLE_ROWS))?;
    }
    Ok(())
}

/// Top-down view: x increases to the right, y upwards, colour is Z.
fn surface_panel<W: Write>(out: &mut W, grid: &Grid, (x0, y0): (f64, f64)) -> io::Result<()> {
    let n = grid.side();
    let map = DivergingMap::from_range(grid.z_range());

    writeln!(out, "gsave {x0} {y0} translate {PANEL} {PANEL} scale")?;
    writeln!(out, "{n} {n} 8 [{n} 0 0 {n} 0 0]")?;
    writeln!(out, "currentfile /ASCIIHexDecode filter false 3 colorimage")?;
    let mut line = String::with_capacity(80);
    // Image rows run along y (bottom row first), columns along x.
    for j in 0..n {
        for i in 0..n {
            let c = map.color_for(grid.z().get(i, j).unwrap_or(f64::NAN));
            line.push_str(&format!("{:02x}{:02x}{:02x}", c.red, c.green, c.blue));
            if line.len() >= 72 {
                writeln!(out, "{line}")?;
                line.clear();
            }
        }
    }
    writeln!(out, "{line}>")?;
    writeln!(out, "grestore")?;

    frame(out, x0, y0)?;
    let (lo, hi) = map.range();
    axis_labels(out, x0, y0, "x", "y", axis_extent(grid, Axis::X), axis_extent(grid, Axis::Y))?;
    text(out, x0, y0 + PANEL + 6.0, &format!("u(x, y, t = {:.4}) in [{lo:.4}, {hi:.4}]", grid.time()))
}

/// Z against y along the middle row of the grid.
fn profile_panel<W: Write>(out: &mut W, grid: &Grid, (x0, y0): (f64, f64)) -> io::Result<()> {
    frame(out, x0, y0)?;
    let n = grid.side();
    let mid = n / 2;
    let (Some(ys), Some(zs)) = (grid.y().row(mid), grid.z().row(mid)) else {
        return Ok(());
    };
    let y_range = axis_extent(grid, Axis::Y);
    let z_range = DivergingMap::from_range(grid.z_range()).range();
    axis_labels(out, x0, y0, "y", "u", y_range, z_range)?;
    if let Some(x) = grid.x().get(mid, 0) {
        text(out, x0, y0 + PANEL + 6.0, &format!("profile at x = {x:.4}"))?;
    }

    writeln!(out, "gsave newpath {x0} {y0} {PANEL} {PANEL} rectclip newpath")?;
    let mut pen_down = false;
    for (&y, &z) in ys.iter().zip(zs) {
        let px = x0 + scale(y, y_range, PANEL);
        let py = y0 + scale(z, z_range, PANEL);
        if !(px.is_finite() && py.is_finite()) {
            pen_down = false;
            continue;
        }
        let op = if pen_down { "lineto" } else { "moveto" };
        writeln!(out, "{px:.3} {py:.3} {op}")?;
        pen_down = true;
    }
    writeln!(out, "stroke grestore")
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Coordinate span covered by the grid along one axis, widened if flat.
fn axis_extent(grid: &Grid, axis: Axis) -> (f64, f64) {
    let n = grid.side();
    let last = n.saturating_sub(1);
    let (a, b) = match axis {
        Axis::X => (grid.x().get(0, 0), grid.x().get(last, 0)),
        Axis::Y => (grid.y().get(0, 0), grid.y().get(0, last)),
    };
    match (a, b) {
        (Some(a), Some(b)) if a.is_finite() && b.is_finite() && a != b => (a.min(b), a.max(b)),
        (Some(a), _) if a.is_finite() => (a - 1.0, a + 1.0),
        _ => (0.0, 1.0),
    }
}

fn frame<W: Write>(out: &mut W, x0: f64, y0: f64) -> io::Result<()> {
    writeln!(out, "0 setgray newpath {x0} {y0} {PANEL} {PANEL} rectstroke")
}

fn axis_labels<W: Write>(
    out: &mut W,
    x0: f64,
    y0: f64,
    x_label: &str,
    y_label: &str,
    (x_lo, x_hi): (f64, f64),
    (y_lo, y_hi): (f64, f64),
) -> io::Result<()> {
    writeln!(out, "0 setgray")?;
    text(out, x0, y0 - 12.0, &format!("{x_lo:.2}"))?;
    right_text(out, x0 + PANEL, y0 - 12.0, &format!("{x_hi:.2}"))?;
    centered_text(out, x0 + PANEL / 2.0, y0 - 12.0, x_label)?;
    right_text(out, x0 - 4.0, y0, &format!("{y_lo:.2}"))?;
    right_text(out, x0 - 4.0, y0 + PANEL - 8.0, &format!("{y_hi:.2}"))?;
    right_text(out, x0 - 4.0, y0 + PANEL / 2.0, y_label)
}

fn set_colour<W: Write>(out: &mut W, colour: Srgb<u8>) -> io::Result<()> {
    let c: Srgb<f32> = colour.into_format();
    writeln!(out, "{:.3} {:.3} {:.3} setrgbcolor", c.red, c.green, c.blue)
}

fn text<W: Write>(out: &mut W, x: f64, y: f64, s: &str) -> io::Result<()> {
    writeln!(out, "{x:.2} {y:.2} moveto ({}) show", escape(s))
}

fn centered_text<W: Write>(out: &mut W, x: f64, y: f64, s: &str) -> io::Result<()> {
    writeln!(
        out,
        "({}) dup stringwidth pop 2 div {x:.2} exch sub {y:.2} moveto show",
        escape(s)
    )
}

fn right_text<W: Write>(out: &mut W, x: f64, y: f64, s: &str) -> io::Result<()> {
    writeln!(
        out,
        "({}) dup stringwidth pop {x:.2} exch sub {y:.2} moveto show",
        escape(s)
    )
}

/// PostScript string literal escaping.
fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_ascii() => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}
