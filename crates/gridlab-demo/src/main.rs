//! Terminal host for the gridlab workspaces.
//!
//! Usage: `gridlab-demo [settings.json] [sketch|fill|transform|all]`
//!
//! Plays a scripted session against each workspace the way a window would
//! drive it (pixel clicks, button actions, timer ticks) and prints the
//! resulting surface as text.

mod logging;
mod render;

use std::thread;
use std::time::Duration;

use anyhow::{Context, bail};
use gridlab_core::{
    AnimationState, CircleAlgorithm, Direction, FillAlgorithm, FillCanvas, LogicalPoint, Settings, SketchPad,
    TransformBench, Workspace,
};
use gridlab_core::workspace::transform::key_direction;
use tracing::{info, warn};

const DEFAULT_SETTINGS: &str = "gridlab.json";

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS.to_string());
    let scenario = args.next().unwrap_or_else(|| "all".to_string());

    let settings = Settings::load(&settings_path)
        .with_context(|| format!("loading settings from {settings_path}"))?;
    logging::init(settings.debug);
    info!(path = %settings_path, cell_size = settings.cell_size, animate = settings.animate, "settings loaded");

    match scenario.as_str() {
        "sketch"    => sketch(&settings)?,
        "fill"      => fill(&settings)?,
        "transform" => transform(&settings)?,
        "all" => {
            sketch(&settings)?;
            fill(&settings)?;
            transform(&settings)?;
        }
        other => bail!("unknown scenario '{other}', expected sketch, fill, transform or all"),
    }
    Ok(())
}

// ─── Host plumbing ────────────────────────────────────────────────────────────

/// Click the middle of the cell holding logical point `(x, y)`.
fn click<W: Workspace>(w: &mut W, x: i32, y: i32) -> anyhow::Result<LogicalPoint> {
    let grid = w.grid();
    let (left, top) = grid.logical_to_cell_top_left(LogicalPoint::new(x, y));
    let half = grid.cell_size() / 2;
    Ok(w.on_click(left + half, top + half)?)
}

/// Drive `tick` on a fixed interval until the workspace stops stepping.
fn run_timer<W: Workspace>(w: &mut W, interval: Duration) -> usize {
    let mut ticks = 0;
    while w.tick() == AnimationState::Stepping {
        ticks += 1;
        thread::sleep(interval);
    }
    ticks
}

fn show<W: Workspace>(title: &str, w: &W, settings: &Settings) {
    println!("── {title} ── {}", w.status());
    print!("{}", render::to_ascii(w.surface(), &settings.palette));
    println!();
}

// ─── Scenarios ────────────────────────────────────────────────────────────────

fn sketch(settings: &Settings) -> anyhow::Result<()> {
    let mut pad = SketchPad::new(settings)?;

    click(&mut pad, -10, -6)?;
    click(&mut pad, 9, 4)?;
    pad.draw_line()?;
    show("line", &pad, settings);

    for (algorithm, rim) in [
        (CircleAlgorithm::Polar, (-3, 3)),
        (CircleAlgorithm::Midpoint, (-1, 5)),
        (CircleAlgorithm::Cartesian, (1, 7)),
    ] {
        click(&mut pad, -3, -3)?;
        click(&mut pad, rim.0, rim.1)?;
        pad.set_algorithm(algorithm);
        pad.draw_circle()?;
        let ticks = run_timer(&mut pad, settings.ticks.circle());
        info!(algorithm = algorithm.as_str(), ticks, painted = pad.last_painted(), "circle drawn");
    }
    show("circles", &pad, settings);

    if let Some(record) = pad.undo() {
        info!(shape = %record.kind.label(), "undone");
    }
    show("after undo", &pad, settings);
    Ok(())
}

fn fill(settings: &Settings) -> anyhow::Result<()> {
    let mut canvas = FillCanvas::new(settings)?;

    let shapes: [(&[(i32, i32)], (i32, i32), FillAlgorithm); 3] = [
        (&[(-12, 2), (-3, 2), (-3, 10), (-12, 10)], (-8, 6), FillAlgorithm::Flood),
        (&[(1, 1), (11, 3), (6, 11)], (6, 5), FillAlgorithm::Boundary),
        (&[(-10, -12), (8, -12), (8, -2), (0, -7), (-10, -2)], (0, 0), FillAlgorithm::Scanline),
    ];

    for (vertices, seed, algorithm) in shapes {
        canvas.start_polygon();
        for &(x, y) in vertices {
            click(&mut canvas, x, y)?;
        }
        canvas.close_polygon()?;
        if algorithm != FillAlgorithm::Scanline {
            click(&mut canvas, seed.0, seed.1)?;
        }
        canvas.set_algorithm(algorithm);
        canvas.fill_polygon()?;
        let interval = match algorithm {
            FillAlgorithm::Scanline => settings.ticks.scanline(),
            _                       => settings.ticks.seed_fill(),
        };
        run_timer(&mut canvas, interval);
    }
    show("fills", &canvas, settings);

    // Replay after a geometry change: same logical picture, finer cells.
    let finer = (settings.cell_size / 2).max(gridlab_core::RASTER_MIN_CELL_SIZE);
    canvas.set_cell_size(finer)?;
    info!(cell_size = finer, "fills replayed after cell size change");
    Ok(())
}

fn transform(settings: &Settings) -> anyhow::Result<()> {
    let mut bench = match TransformBench::new(settings) {
        Ok(bench) => bench,
        Err(e) => {
            warn!("transform scenario skipped: {e}");
            return Ok(());
        }
    };

    for (x, y) in [(-2, -2), (4, -2), (4, 3), (-2, 3)] {
        click(&mut bench, x, y)?;
    }
    bench.close_polygon()?;

    bench.rotate(30.0)?;
    bench.scale(1.5, 1.5)?;
    bench.shear(0.3, 0.0)?;
    show("rotate, scale, shear", &bench, settings);

    click(&mut bench, -8, -8)?;
    click(&mut bench, 8, 4)?;
    bench.set_helper_line()?;
    bench.reflect_about_helper_line()?;
    show("reflect about helper line", &bench, settings);

    // Hold D and W for a few timer periods.
    bench.revert_to_original()?;
    let held: Vec<Direction> = "dw".chars().filter_map(key_direction).collect();
    for &direction in &held {
        bench.press(direction);
    }
    for _ in 0..4 {
        bench.tick();
        thread::sleep(settings.ticks.nudge());
    }
    for &direction in &held {
        bench.release(direction);
    }
    show("nudged", &bench, settings);
    Ok(())
}
