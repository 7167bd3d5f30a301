use clap::Parser;
use pms::cli::commands::Cli;
use pms::cli::handlers::{self, Context};
use pms::io::config_io;
use pms::io::paths::PmsPaths;
use pms::logging;

fn main() {
    let cli = Cli::parse();
    let paths = PmsPaths::resolve(cli.home.as_deref());
    let config = match config_io::read_config(&paths.config_file()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let guard =
                logging::init_tui(&paths.home, paths.log_file_name(), &config.log.level);
            let result = pms::tui::run(paths, config, cli.route.as_deref());
            if let Err(e) = &result {
                tracing::error!(error = %e, "tui exited with an error");
            }
            // Flush the file appender before exit skips destructors
            drop(guard);
            if let Err(e) = result {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(command) => {
            logging::init_cli(&config.log.level);
            let ctx = Context {
                paths,
                config,
                today: chrono::Local::now().date_naive(),
            };
            if let Err(e) = handlers::dispatch(command, &ctx, cli.json) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
