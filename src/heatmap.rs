use plotters::prelude::*;
use std::io::Write;
use std::path::Path;
use tracing::info;
use crate::error::{LibraryError, Result};
use crate::frequency::ProbabilityMatrix;

const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

// ends of the "Blues" colour scale
const LIGHT: (f64, f64, f64) = (247.0, 251.0, 255.0);
const DARK: (f64, f64, f64) = (8.0, 48.0, 107.0);

// svg layout, in pixels
const CELL: i32 = 14;
const TITLE_HEIGHT: i32 = 50;
const LABEL_WIDTH: i32 = 30;
const LABEL_HEIGHT: i32 = 30;
const MARGIN: i32 = 20;
const COLORBAR_WIDTH: i32 = 20;
pub const LEGEND_STEPS: usize = 50;


#[derive(Debug, Clone, Copy)]
pub struct HeatmapStyle {
    pub color: bool,
}


fn shade (p: f64) -> char {

    if p <= 0.0 {
        return SHADES[0];
    }
    // anything above zero gets at least the lightest block
    let idx = (p.clamp(0.0, 1.0) * (SHADES.len() - 1) as f64).ceil() as usize;
    SHADES[idx.max(1)]
}


fn blues (p: f64) -> (u8, u8, u8) {

    let t = p.clamp(0.0, 1.0);
    let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    (mix(LIGHT.0, DARK.0), mix(LIGHT.1, DARK.1), mix(LIGHT.2, DARK.2))
}


pub fn render_heatmap<W: Write> (matrix: &ProbabilityMatrix, style: HeatmapStyle, out: &mut W) -> Result<()> {

    // rows are symbols, columns are positions
    // a ruler marks every tenth position, a legend explains the shading

    writeln!(out, "{} Frequency by Position", matrix.alphabet().label())?;

    let mut ruler = String::from("  ");
    let mut position = 0;
    while position < matrix.len() {
        if position % 10 == 0 {
            let label = position.to_string();
            ruler.push_str(&label);
            position += label.len();
        } else {
            ruler.push(' ');
            position += 1;
        }
    }
    writeln!(out, "{}", ruler.trim_end())?;

    for (row, &symbol) in matrix.symbols().iter().enumerate() {
        write!(out, "{} ", symbol as char)?;
        for &p in matrix.row(row) {
            if style.color {
                let (r, g, b) = blues(p);
                write!(out, "\x1b[48;2;{};{};{}m \x1b[0m", r, g, b)?;
            } else {
                write!(out, "{}", shade(p))?;
            }
        }
        writeln!(out)?;
    }

    write!(out, "  0.0 ")?;
    for step in 0..=4 {
        let p = step as f64 / 4.0;
        if style.color {
            let (r, g, b) = blues(p);
            write!(out, "\x1b[48;2;{};{};{}m  \x1b[0m", r, g, b)?;
        } else {
            write!(out, "{}{}", shade(p), shade(p))?;
        }
    }
    writeln!(out, " 1.0")?;

    Ok(())
}


fn plot_error<E: std::fmt::Display> (e: E) -> LibraryError {
    LibraryError::Plot(e.to_string())
}


/// Draw the matrix as an SVG grid, one filled cell per (symbol, position),
/// with the symbols down the side and a colour bar on the right.
pub fn plot_heatmap_svg (matrix: &ProbabilityMatrix, path: &Path) -> Result<()> {

    let symbols = matrix.symbols();
    let rows = symbols.len() as i32;
    let columns = matrix.len() as i32;

    let grid_x = LABEL_WIDTH + MARGIN;
    let grid_y = TITLE_HEIGHT + MARGIN;
    let grid_height = rows * CELL;
    let colorbar_x = grid_x + columns * CELL + MARGIN;
    let width = colorbar_x + COLORBAR_WIDTH + 2 * MARGIN + LABEL_WIDTH;
    let height = grid_y + grid_height + LABEL_HEIGHT + MARGIN;

    let root = SVGBackend::new(path, (width as u32, height as u32)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    root.draw(&Text::new(
        format!("{} Frequency by Position", matrix.alphabet().label()),
        (MARGIN, TITLE_HEIGHT / 2),
        ("sans-serif", 20).into_font().color(&BLACK),
    ))
    .map_err(plot_error)?;

    // symbol labels down the side
    for (row, &symbol) in symbols.iter().enumerate() {
        let y = grid_y + row as i32 * CELL;
        root.draw(&Text::new(
            (symbol as char).to_string(),
            (LABEL_WIDTH / 2, y),
            ("sans-serif", 12).into_font().color(&BLACK),
        ))
        .map_err(plot_error)?;
    }

    // position labels every tenth column
    for position in (0..columns).step_by(10) {
        root.draw(&Text::new(
            position.to_string(),
            (grid_x + position * CELL, grid_y + grid_height + LABEL_HEIGHT / 3),
            ("sans-serif", 10).into_font().color(&BLACK),
        ))
        .map_err(plot_error)?;
    }

    for row in 0..symbols.len() {
        for (position, &p) in matrix.row(row).iter().enumerate() {
            let x0 = grid_x + position as i32 * CELL;
            let y0 = grid_y + row as i32 * CELL;
            let (r, g, b) = blues(p);
            root.draw(&Rectangle::new(
                [(x0, y0), (x0 + CELL, y0 + CELL)],
                RGBColor(r, g, b).filled(),
            ))
            .map_err(plot_error)?;
        }
    }

    // colour bar, 1.0 at the top
    let step = grid_height as f64 / LEGEND_STEPS as f64;
    for i in 0..LEGEND_STEPS {
        let y0 = grid_y as f64 + i as f64 * step;
        let (r, g, b) = blues(1.0 - i as f64 / LEGEND_STEPS as f64);
        root.draw(&Rectangle::new(
            [(colorbar_x, y0 as i32), (colorbar_x + COLORBAR_WIDTH, (y0 + step).ceil() as i32)],
            RGBColor(r, g, b).filled(),
        ))
        .map_err(plot_error)?;
    }
    for (label, y) in [("1.0", grid_y), ("0.0", grid_y + grid_height)] {
        root.draw(&Text::new(
            label,
            (colorbar_x + COLORBAR_WIDTH + 5, y),
            ("sans-serif", 10).into_font().color(&BLACK),
        ))
        .map_err(plot_error)?;
    }

    root.present().map_err(plot_error)?;
    info!("wrote heatmap to {}", path.display());
    Ok(())
}
