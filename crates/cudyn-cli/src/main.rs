mod symbols;
mod verify;

use clap::{Parser, Subcommand};
use cudyn_core::config::{default_config_path, CudynConfig};
use cudyn_driver::CudaDriver;
use tracing::info;

#[derive(Parser)]
#[command(name = "cudyn")]
#[command(about = "cudyn - inspect the dynamically loaded NVIDIA CUDA driver")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the driver and show what it provides
    Info,

    /// List the driver entry points and how each one is resolved
    Symbols {
        /// Only show one group (init, version, device, primary-context,
        /// context, memory, stream, graphics, d3d10, d3d11)
        #[arg(short, long)]
        group: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the installed driver against the configured requirements
    Verify {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = CudynConfig::load_or_default(&config_path);
    cudyn_common::init_logging_with(&config.logging.filter);

    match cli.command {
        Commands::Info => {
            info!("loading CUDA driver");
            let driver = CudaDriver::get()?;

            let bound = driver.symbols().iter().filter(|s| s.is_bound()).count();
            let missing = driver.missing_optional();

            println!("CUDA driver: {}", driver.library_name());
            println!("  Platform:     {}", cudyn_common::platform::platform_name());
            match driver.driver_version() {
                Ok(version) => println!("  Version:      {}", version),
                Err(code) => println!(
                    "  Version:      unknown ({}: {})",
                    cudyn_driver::result_name(code),
                    cudyn_driver::result_description(code)
                ),
            }
            println!("  Entry points: {} bound", bound);
            if missing.is_empty() {
                println!("  Unavailable:  none");
            } else {
                println!("  Unavailable:  {}", missing.len());
                for name in missing {
                    println!("    {}", name);
                }
            }
        }

        Commands::Symbols { group, json } => {
            symbols::run_symbols(group.as_deref(), json)?;
        }

        Commands::Verify { json } => {
            verify::run_verify(&config_path, json)?;
        }
    }

    Ok(())
}
