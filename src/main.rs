//! Flippyflap entry point
//!
//! Parses the command line, locks the configuration and runs the game loop
//! in the terminal.

use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;

use flippyflap::audio::AudioPlayer;
use flippyflap::consts::{FPS_LIMIT_MAX, FPS_LIMIT_MIN};
use flippyflap::driver::Driver;
use flippyflap::platform::terminal::farewell;
use flippyflap::platform::{TerminalInput, TerminalSession};
use flippyflap::renderer::{Assets, Surface, TerminalPresentation};
use flippyflap::sim::GameFacade;
use flippyflap::{Config, Result};

/// Play Flippyflap in your terminal.
///
/// Space or left click to flap, P to pause, M to mute, Q or Esc to quit.
#[derive(Parser, Debug)]
#[command(name = "flippyflap", version, about)]
struct Args {
    /// Use the whole terminal
    #[arg(short, long)]
    fullscreen: bool,

    /// Surface size in pixels (a terminal cell is 1x2 pixels)
    #[arg(short, long, num_args = 2, value_names = ["W", "H"], default_values_t = [80, 48])]
    resolution: Vec<u32>,

    /// Frame-rate cap
    #[arg(
        long,
        default_value_t = 60,
        value_parser = clap::value_parser!(u32).range(FPS_LIMIT_MIN as i64..=FPS_LIMIT_MAX as i64)
    )]
    fps: u32,

    /// Disable sounds
    #[arg(short, long)]
    mute: bool,

    /// Seed for column openings and clouds (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn configure(args: &Args) -> Result<Config> {
    let mut config = Config::default();
    config.set_fps_limit(args.fps)?;
    config.set_fullscreen(args.fullscreen)?;
    config.set_screen_size(args.resolution[0], args.resolution[1])?;
    config.set_mute(args.mute);
    // Everything but mute is read-only from here on
    config.lock()?;
    Ok(config)
}

fn run(args: Args) -> Result<u32> {
    let config = configure(&args)?;

    // Fail on broken art or a tiny terminal before taking over the screen
    let assets = Assets::load()?;
    let surface = Surface::fit(&config, TerminalSession::pixel_size()?)?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let facade = GameFacade::new(0);
    let audio = AudioPlayer::new(config.mute());

    let session = TerminalSession::enter()?;
    let presentation = TerminalPresentation::new(stdout(), surface, &facade, assets, audio, seed);
    let mut driver = Driver::new(config, facade, presentation);
    let result = driver.run(&mut TerminalInput::new());
    drop(session);

    result?;
    Ok(driver.into_facade().high_score())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Flippyflap starting...");

    match run(Args::parse()) {
        Ok(high_score) => {
            let _ = farewell(&format!("High score: {}", high_score));
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("flippyflap: {}", e);
            ExitCode::FAILURE
        }
    }
}
