mod script;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use tessel_engine::coords::Rect;
use tessel_engine::input::{InputEvent, InputFrame, InputState};
use tessel_engine::logging::{LoggingConfig, init_logging};
use tessel_grid::prelude::*;

use crate::script::parse_script;

#[derive(Debug, Parser)]
#[command(
    name = "tessel-studio",
    about = "Replay pointer scripts against a .tgrid layout and print the resulting weights",
    version
)]
struct Cli {
    /// Layout file (`.tgrid`).
    layout: PathBuf,

    /// Pointer script to replay; without one only the initial layout is printed.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Grid width in logical pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Grid height in logical pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Log filter in `env_logger` syntax, e.g. `tessel_grid=debug`.
    #[arg(long)]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default().with_timestamps(false);
    if let Some(filter) = &cli.log {
        logging = logging.with_filter(filter);
    }
    init_logging(logging);

    let src = fs::read_to_string(&cli.layout)
        .with_context(|| format!("reading layout {}", cli.layout.display()))?;
    let layout = load_str(&src)
        .map_err(|e| match e {
            LoadError::Parse(p) => anyhow!("{}", p.render(&src)),
            other => anyhow!(other),
        })
        .with_context(|| format!("loading layout {}", cli.layout.display()))?;

    if !(cli.width > 0.0 && cli.height > 0.0) {
        return Err(anyhow!("grid size {}x{} must be positive", cli.width, cli.height));
    }
    let bounds = Rect::new(0.0, 0.0, cli.width, cli.height);
    let mut scene = layout.into_scene(bounds).context("setting up dividers")?;

    println!("layout {} ({}x{})", cli.layout.display(), cli.width, cli.height);
    print_weights(scene.grid());

    if let Some(path) = &cli.script {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        let frames = parse_script(&text).with_context(|| format!("parsing script {}", path.display()))?;
        replay(&mut scene, frames);
    }

    println!();
    println!("cell rects:");
    for cell in scene.cell_rects() {
        let r = cell.rect;
        println!(
            "  {:<12} {:>8.1} {:>8.1} {:>8.1} x {:<8.1}",
            cell.key, r.origin.x, r.origin.y, r.size.x, r.size.y
        );
    }
    Ok(())
}

fn replay(scene: &mut GridScene, frames: Vec<Vec<InputEvent>>) {
    let mut state = InputState { focused: true, ..Default::default() };
    let mut frame = InputFrame::default();

    for (n, events) in frames.into_iter().enumerate() {
        frame.clear();
        for ev in events {
            state.apply_event(&mut frame, ev);
        }
        let report = scene.frame(&frame);
        log::debug!("frame {n}: {} events", frame.events.len());

        let mut notes = Vec::new();
        notes.extend(report.grabbed.iter().map(|k| format!("grab {k}")));
        notes.extend(report.resized.iter().map(|k| format!("drag {k}")));
        notes.extend(report.released.iter().map(|k| format!("release {k}")));
        if notes.is_empty() {
            continue;
        }

        println!();
        println!("frame {n}: {}", notes.join(", "));
        if report.grid_changed {
            print_weights(scene.grid());
        }
    }
}

fn print_weights(grid: &GridLayout) {
    let rows: Vec<String> = grid
        .rows()
        .cells()
        .iter()
        .map(|c| format!("{}={:.4}", c.key, c.weight()))
        .collect();
    println!("  rows: {}", rows.join(" "));
    for (r, row) in grid.rows().cells().iter().enumerate() {
        let Some(track) = grid.row(r) else { continue };
        let cells: Vec<String> =
            track.cells().iter().map(|c| format!("{}={:.4}", c.key, c.weight())).collect();
        println!("  {}: {}", row.key, cells.join(" "));
    }
}
