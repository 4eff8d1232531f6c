use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use sky_panel_core::{
    Controller, NullSink, PanelConfig, Pixel, PixelSink, Rgb, ShutdownSignal, SkyPanelError,
};
use tracing_subscriber::EnvFilter;

fn main() -> sky_panel_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(&args),
        Commands::Modes => list_modes(),
    }
}

fn run(args: &RunArgs) -> sky_panel_core::Result<()> {
    let config = PanelConfig {
        width: args.width,
        height: args.height,
        fps: args.fps,
    };
    let sink = TerminalSink::new(config.width, config.height);
    let controller = Controller::new(&config, Box::new(sink));

    controller.set_mode(args.mode)?;
    if let Some(speed) = args.speed {
        controller.set_speed(speed)?;
    }
    if let Some(brightness) = args.brightness {
        controller.set_brightness(brightness)?;
    }
    if let Some(spec) = args.color.as_deref() {
        controller.set_color(parse_color(spec)?)?;
    }
    if args.random {
        controller.set_random_mode(true)?;
    }

    tracing::info!(mode = args.mode, fps = config.fps, "starting scheduler loop");
    let shutdown = ShutdownSignal::new();
    let worker = {
        let controller = controller.clone();
        let shutdown = shutdown.clone();
        thread::spawn(move || controller.run_loop(&shutdown))
    };
    controller.start()?;

    match args.duration {
        Some(seconds) => thread::sleep(Duration::from_secs_f32(seconds.max(0.0))),
        None => loop {
            thread::park();
        },
    }

    tracing::info!("shutting down");
    controller.stop()?;
    shutdown.shutdown();
    worker
        .join()
        .map_err(|_| SkyPanelError::msg("scheduler thread panicked"))??;
    Ok(())
}

fn list_modes() -> sky_panel_core::Result<()> {
    let controller = Controller::new(&PanelConfig::default(), Box::new(NullSink));
    let modes = controller.modes()?;
    let json = serde_json::to_string_pretty(&modes)
        .map_err(|error| SkyPanelError::msg(error.to_string()))?;
    println!("{json}");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Parses a `R,G,B` triple of 0-255 components.
fn parse_color(spec: &str) -> sky_panel_core::Result<Rgb> {
    let mut parts = spec.split(',').map(|part| part.trim().parse::<u8>());
    let mut next = || {
        parts
            .next()
            .ok_or_else(|| SkyPanelError::msg(format!("expected R,G,B, got `{spec}`")))?
            .map_err(|_| SkyPanelError::msg(format!("invalid color component in `{spec}`")))
    };
    let color = Rgb::new(next()?, next()?, next()?);
    if parts.next().is_some() {
        return Err(SkyPanelError::msg(format!(
            "expected exactly three components in `{spec}`"
        )));
    }
    Ok(color)
}

/// Terminal stand-in for the physical strip: undoes the serpentine
/// wiring order and paints each pixel as a truecolor background cell.
struct TerminalSink {
    width: usize,
    height: usize,
    stdout: io::Stdout,
}

impl TerminalSink {
    fn new(width: usize, height: usize) -> Self {
        let mut sink = Self {
            width,
            height,
            stdout: io::stdout(),
        };
        // Start from a clean screen so the frame repaints in place.
        let _ = sink.stdout.write_all(b"\x1b[2J");
        sink
    }

    fn physical_index(&self, x: usize, y: usize) -> usize {
        let row = if x % 2 == 0 { y } else { self.height - 1 - y };
        x * self.height + row
    }
}

impl PixelSink for TerminalSink {
    fn set_pixels(&mut self, pixels: &[Pixel]) -> sky_panel_core::Result<()> {
        let mut out = String::with_capacity(pixels.len() * 24);
        out.push_str("\x1b[H");
        for y in 0..self.height {
            for x in 0..self.width {
                let pixel = pixels
                    .get(self.physical_index(x, y))
                    .copied()
                    .unwrap_or(Pixel::OFF);
                out.push_str(&format!(
                    "\x1b[48;2;{};{};{}m  ",
                    pixel.r, pixel.g, pixel.b
                ));
            }
            out.push_str("\x1b[0m\n");
        }
        self.stdout.write_all(out.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> sky_panel_core::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "LED sky panel animation engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the animation loop with a terminal preview of the panel.
    Run(RunArgs),
    /// List the available animation modes as JSON.
    Modes,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Panel width in cells.
    #[arg(long, default_value_t = 14)]
    width: usize,
    /// Panel height in cells.
    #[arg(long, default_value_t = 14)]
    height: usize,
    /// Frames per second of the fixed-timestep loop.
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Initial mode id (see the `modes` subcommand).
    #[arg(short, long, default_value_t = 0)]
    mode: usize,
    /// Animation speed in [0, 1].
    #[arg(long)]
    speed: Option<f32>,
    /// Brightness multiplier applied to every frame.
    #[arg(long)]
    brightness: Option<f32>,
    /// Fixed color as `R,G,B` (overrides random mode).
    #[arg(long)]
    color: Option<String>,
    /// Pick a fresh random color at each mode-defined recolor event.
    #[arg(long)]
    random: bool,
    /// Stop after this many seconds; run until killed when absent.
    #[arg(long)]
    duration: Option<f32>,
}
