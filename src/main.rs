//! Rollscope — terminal piano-roll demo.
//!
//! Attaches a built-in arpeggio pattern to the paint driver and scrolls it
//! across the terminal until `q` or Ctrl-C.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind};
use ratatui::widgets::Paragraph;

use rollscope::pattern::{LoopPattern, NoteField, RawPayload};
use rollscope::roll::{PaintDriver, PaintOptions};
use rollscope::term::TermSurface;

#[derive(Parser)]
#[command(name = "rollscope", version, about = "Scrolling piano-roll demo")]
struct Args {
    /// Tempo in cycles per minute.
    #[arg(long, default_value_t = 30.0)]
    cpm: f64,

    /// Cycles visible in the window.
    #[arg(long, default_value_t = 4.0)]
    cycles: f64,

    /// Playhead position within the window (0 = leading edge, 1 = trailing).
    #[arg(long, default_value_t = 0.5)]
    playhead: f64,

    /// Display frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// YAML file overriding the default paint options.
    #[arg(long)]
    options: Option<std::path::PathBuf>,
}

/// A one-cycle arpeggio, expressed as loosely-shaped payloads the way a
/// pattern engine would deliver them.
fn demo_pattern() -> LoopPattern {
    let names = ["C4", "E4", "G4", "B4", "C5", "B4", "G4", "E4"];
    LoopPattern::from_values(
        names
            .iter()
            .map(|n| {
                RawPayload {
                    note: Some(NoteField::Name(n.to_string())),
                    ..Default::default()
                }
                .resolve()
            })
            .collect(),
    )
}

fn load_options(args: &Args) -> Result<PaintOptions, Box<dyn std::error::Error>> {
    let mut options = match &args.options {
        Some(path) => PaintOptions::load_from_file(path)?,
        None => PaintOptions {
            autorange: true,
            labels: true,
            ..Default::default()
        },
    };
    options.cycles_visible = args.cycles;
    options.playhead_fraction = args.playhead.clamp(0.0, 1.0);
    options.id = "demo".to_string();
    Ok(options)
}

fn run(args: &Args, options: PaintOptions, stop: Arc<AtomicBool>) -> io::Result<()> {
    let mut driver = PaintDriver::new();
    driver.attach_default(Arc::new(demo_pattern()), options);

    let mut terminal = ratatui::init();
    let mut surface = TermSurface::new(0, 0);
    let frame_budget = Duration::from_secs_f64(1.0 / args.fps.max(1) as f64);
    let started = Instant::now();
    let cps = args.cpm / 60.0;

    while !stop.load(Ordering::Relaxed) {
        let frame_started = Instant::now();
        let now = started.elapsed().as_secs_f64() * cps;

        let size = terminal.size()?;
        surface.resize(size.width as usize, size.height as usize);
        driver.tick(now, &mut surface);

        let lines = surface.to_lines();
        terminal.draw(|frame| {
            frame.render_widget(Paragraph::new(lines), frame.area());
        })?;

        if event::poll(Duration::from_millis(1))? {
            if let CrosstermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    break;
                }
            }
        }

        let elapsed = frame_started.elapsed();
        if elapsed < frame_budget {
            std::thread::sleep(frame_budget - elapsed);
        }
    }

    ratatui::restore();

    if driver.skipped_ticks() > 0 {
        log::warn!("{} frames skipped on query errors", driver.skipped_ticks());
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let options = match load_options(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("failed to load options: {e}");
            std::process::exit(1);
        }
    };

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = stop.clone();
    if let Err(e) = ctrlc::set_handler(move || stop_handler.store(true, Ordering::Relaxed)) {
        eprintln!("failed to install signal handler: {e}");
    }

    if let Err(e) = run(&args, options, stop) {
        ratatui::restore();
        eprintln!("terminal error: {e}");
        std::process::exit(1);
    }
}
