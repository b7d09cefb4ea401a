use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use wrap_snake::config::Settings;
use wrap_snake::modes::{HeadlessMode, HumanMode};

#[derive(Parser)]
#[command(name = "wrap_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON settings file (game rules and render style)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells (overrides the settings file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells (overrides the settings file)
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between ticks (overrides the settings file)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Number of ticks to simulate in headless mode
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// RNG seed for headless mode
    #[arg(long, default_value = "0")]
    seed: u64,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with the arrow keys
    Human,
    /// Simulate without a terminal, steering at random
    Headless,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(width) = self.width {
            settings.game.grid_width = width;
        }
        if let Some(height) = self.height {
            settings.game.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.game.tick_interval_ms = tick_ms;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    log::info!(
        "starting on a {}x{} grid, tick every {} ms",
        settings.game.grid_width,
        settings.game.grid_height,
        settings.game.tick_interval_ms
    );

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(settings)?;
            human_mode.run().await?;
        }
        Mode::Headless => {
            let mut headless_mode = HeadlessMode::new(settings, cli.ticks, cli.seed)?;
            let summary = headless_mode.run().await;
            println!(
                "{:?} after {} ticks, snake length {}",
                summary.status, summary.ticks, summary.snake_length
            );
        }
    }

    Ok(())
}
