use clap::Parser;
use retrace_bin::{
    cli::{Cli, Command},
    commands,
};
use retrace_log::LogConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match retrace_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        },
    };

    let result = match cli.command {
        Command::Replay(args) => commands::replay::run(args)
            .await
            .map(|report| print!("{report}")),
        Command::Outline(args) => commands::outline::run(args, cli.config.as_deref())
            .map(|symbols| print!("{}", commands::outline::render(&symbols))),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
