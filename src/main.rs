use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;
use termreel::config::{DEFAULT_RESET_PAUSE, DEFAULT_START_DELAY, DEFAULT_TICK};
use termreel::script::{self, DEFAULT_SCRIPT};
use termreel::{AnsiSink, PlaybackConfig, PlaybackController, PlaybackEnd, Player};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "termreel",
    about = "Play a scripted terminal demo in the current terminal",
    version
)]
struct Args {
    /// Built-in script to play
    #[arg(short, long, default_value = DEFAULT_SCRIPT)]
    script: String,

    /// Milliseconds between typed characters
    #[arg(long, default_value_t = DEFAULT_TICK.as_millis() as u64)]
    tick_ms: u64,

    /// Milliseconds to wait before the first character
    #[arg(long, default_value_t = DEFAULT_START_DELAY.as_millis() as u64)]
    start_delay_ms: u64,

    /// Milliseconds to pause after the last line before starting over
    #[arg(
        long,
        default_value_t = DEFAULT_RESET_PAUSE.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    reset_pause_ms: u64,

    /// Stop after this many complete cycles instead of looping forever
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    cycles: Option<u64>,

    /// List the built-in scripts and exit
    #[arg(long)]
    list: bool,
}

impl Args {
    fn config(&self) -> PlaybackConfig {
        PlaybackConfig::default()
            .with_tick(Duration::from_millis(self.tick_ms))
            .with_start_delay(Duration::from_millis(self.start_delay_ms))
            .with_reset_pause(Duration::from_millis(self.reset_pause_ms))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    if args.list {
        for name in script::builtin_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let script = script::builtin(&args.script)
        .with_context(|| format!("Failed to load script: {}", args.script))?;
    let config = args.config();

    let controller = PlaybackController::new(script, &config);
    let mut player = Player::new(controller, AnsiSink::stdout(), &config);
    if let Some(cycles) = args.cycles {
        player = player.with_cycle_limit(cycles);
    }

    clear_screen()?;

    tokio::select! {
        end = player.run() => {
            if let PlaybackEnd::CycleLimit(cycles) = end {
                tracing::debug!(cycles, "finished");
            }
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
        }
    }

    print!("\x1B[0m\r\n");
    io::stdout().flush()?;
    Ok(())
}

fn clear_screen() -> Result<()> {
    print!("\x1B[2J\x1B[1;1H");
    io::stdout().flush()?;
    Ok(())
}
