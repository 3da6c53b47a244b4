use clap::Parser;
use serenity::core::App;
use serenity::core::config::{self, CliOverrides, SerenityConfig};
use serenity::core::storage::{DirStorage, KeyValueStore, MemoryStorage};
use serenity::shell;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, File};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "serenity", about = "A quiet terminal document reader")]
struct Args {
    /// Document to open on startup
    #[arg(short, long)]
    open: Option<PathBuf>,

    /// Directory for persisted recents and settings
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace, off
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Config errors can't be logged yet; report after the logger is up.
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (SerenityConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        data_dir: args.data_dir,
        log_level: args.log_level,
    };
    let resolved = config::resolve(&file_config, &cli);

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Some(parent) = resolved.log_file.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("Serenity starting up, data dir {}", resolved.data_dir.display());
    if let Some(e) = config_error {
        log::error!("Ignoring config file: {}", e);
    }

    let storage: Box<dyn KeyValueStore> = match DirStorage::open(&resolved.data_dir) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("Falling back to in-memory storage: {}", e);
            Box::new(MemoryStorage::new())
        }
    };

    let app = App::new(storage, resolved.settings);
    let app = shell::run(app, args.open).await?;
    app.shutdown();
    Ok(())
}
