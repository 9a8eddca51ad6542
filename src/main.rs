use clap::Parser;
use infinibrowser::AppError;
use infinibrowser::cli::dispatcher::Dispatcher;
use infinibrowser::cli::main_types::{Cli, Commands};
use infinibrowser::error::ConfigError;
use infinibrowser::storage::config::{Config, Profile};
use infinibrowser::utils::logging::{log_error, log_hint, print_verbose};
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        log_error(&format!("{} {}", e.severity().emoji(), e));
        if let Some(hint) = e.troubleshooting_hint() {
            log_hint(&hint);
        }
        print_verbose(verbose, &format!("Severity: {:?}", e.severity()));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = Config::load(config_path.clone())?;

    let explicit_profile = cli.profile.is_some();
    let profile_name = cli
        .profile
        .or(config.default_profile.clone())
        .unwrap_or_else(|| "default".to_string());

    let mut profile = match config.get_profile(&profile_name) {
        Some(profile) => profile.clone(),
        // `config set` is how a named profile comes into existence
        None if explicit_profile && !matches!(cli.command, Commands::Config { .. }) => {
            return Err(ConfigError::ProfileNotFound { name: profile_name }.into());
        }
        None => Profile::default(),
    };

    if let Some(base_url) = cli.base_url {
        profile.base_url = base_url;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        profile.timeout_ms = Some(timeout_ms);
    }

    print_verbose(cli.verbose, &format!("Using profile: {}", profile_name));
    print_verbose(cli.verbose, &format!("Base URL: {}", profile.base_url));

    let mut dispatcher = Dispatcher::new(profile, config, config_path, profile_name, cli.verbose);

    dispatcher.dispatch(cli.command).await
}
