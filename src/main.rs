use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use squarewords::{
    generate_layout_with_seed, hint_for, render_layout, LayoutConfig, DEFAULT_WORDS, MAX_ATTEMPTS,
    MAX_DIM, MIN_DIM,
};

/// Settings read from the environment, with the library defaults where a variable is unset.
#[derive(Debug, Clone)]
struct Settings {
    layout: LayoutConfig,
    seed: Option<u64>,
    rust_log: String,
}

impl Settings {
    fn from_env() -> Result<Self> {
        let layout = LayoutConfig::new(
            env_or("SQUAREWORDS_MIN_DIM", MIN_DIM)?,
            env_or("SQUAREWORDS_MAX_DIM", MAX_DIM)?,
            env_or("SQUAREWORDS_MAX_ATTEMPTS", MAX_ATTEMPTS)?,
        ).context("Invalid layout configuration")?;

        let seed = match std::env::var("SQUAREWORDS_SEED") {
            Ok(seed) => Some(seed.parse::<u64>().context("SQUAREWORDS_SEED must be an integer")?),
            Err(_) => None,
        };

        Ok(Settings {
            layout,
            seed,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn env_or(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(value) => value.parse::<usize>()
            .with_context(|| format!("{key} must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}

fn main() -> Result<()> {
    let settings = Settings::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &settings.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Words come from the command line; with none, serve the default puzzle.
    let mut json = false;
    let mut words: Vec<String> = vec![];
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            words.extend(arg.split(',').map(|word| word.trim().to_string()));
        }
    }
    if words.is_empty() {
        words = DEFAULT_WORDS.iter().map(|word| word.to_string()).collect();
    }

    let generation = generate_layout_with_seed(&words, &settings.layout, settings.seed);

    if json {
        let output = serde_json::to_string_pretty(&generation.layout)
            .context("Failed to encode layout")?;
        println!("{}", output);
        return Ok(());
    }

    println!("{:?}", generation.statistics);
    println!("{:?}", generation.strategy);
    println!("{}", render_layout(&generation.layout));
    println!();
    for placement in &generation.layout.placements {
        println!("{:<16} {:?}", hint_for(&placement.word), placement.path.as_slice());
    }

    Ok(())
}
