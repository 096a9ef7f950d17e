use clap::{Parser, Subcommand};
use nasa_iotd::config::{self, CliOverrides, Settings};
use nasa_iotd::{logging, output, workflow};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "nasa-iotd")]
#[command(about = "Set NASA's Image of the Day as the desktop wallpaper")]
#[command(long_about = "\
Set NASA's Image of the Day as the desktop wallpaper

Fetches https://www.nasa.gov/image-of-the-day/, downloads the first image of
the first article, shrinks it to fit 3840x2160 if needed, saves it and sets it
as the wallpaper. Previous images are deleted unless --keep-history is given.

Every run prepends a timestamped block to iotdLog.log in the log directory.

Files:
  <data dir>/nasa_iotd/config.toml   # Optional settings
  <data dir>/nasa_iotd/images/       # Saved images (--save-dir)
  <data dir>/nasa_iotd/iotdLog.log   # Run log (--log-file)

Run 'nasa-iotd gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory the image is saved in
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Directory holding iotdLog.log
    #[arg(long = "log-file", value_name = "LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Keep previously downloaded images
    #[arg(long)]
    keep_history: bool,

    /// Download and save only, leave the wallpaper alone
    #[arg(long)]
    no_wallpaper: bool,

    /// Config file (default: <data dir>/nasa_iotd/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug output on stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Command::GenConfig) = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    logging::init_logging(cli.verbose);

    let base_dir = config::default_base_dir();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| base_dir.join(config::CONFIG_FILENAME));
    let file_config = config::load_config(&config_path)?;
    let settings = Settings::resolve(
        file_config,
        CliOverrides {
            save_dir: cli.save_dir,
            log_dir: cli.log_dir,
            keep_history: cli.keep_history,
            no_wallpaper: cli.no_wallpaper,
        },
        &base_dir,
    )?;

    let execution = workflow::execute(&settings);
    output::print_execution(&execution);

    Ok(ExitCode::from(execution.exit_status()))
}
