//! noisescope - spectral experiments on 1D sample distributions
//!
//! Usage: `noisescope [config.toml]`
//!
//! Without a config file the built-in defaults are used. `NOISESCOPE_OUT`
//! overrides the output directory and `RUST_LOG` controls log verbosity.

mod runner;

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args().nth(1);
    let mut config = runner::load_config(config_path.as_deref())?;
    if let Ok(dir) = std::env::var("NOISESCOPE_OUT") {
        config.output_dir = dir;
    }

    let manifest = runner::run(config)?;
    tracing::info!(
        experiments = manifest.entries.len(),
        seed = manifest.seed,
        "run complete"
    );

    Ok(())
}
