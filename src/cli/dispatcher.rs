use crate::api::client::{DEFAULT_TIMEOUT_MS, InfinibrowserClient};
use crate::api::models::{ErrorBody, LineageStep};
use crate::api::request::RequestOptions;
use crate::api::response::ApiResult;
use crate::cli::main_types::{Commands, ConfigCommands};
use crate::error::{ApiError, AppError, CliError, ConfigError};
use crate::storage::config::{Config, Profile};
use crate::utils::logging::VerboseLogger;
use crate::utils::validation::{validate_timeout, validate_url};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

pub struct Dispatcher {
    /// Active profile with command-line overrides applied
    profile: Profile,
    config: Config,
    config_path: Option<PathBuf>,
    profile_name: String,
    logger: VerboseLogger,
}

impl Dispatcher {
    pub fn new(
        profile: Profile,
        config: Config,
        config_path: Option<PathBuf>,
        profile_name: String,
        verbose: bool,
    ) -> Self {
        Self {
            profile,
            config,
            config_path,
            profile_name,
            logger: VerboseLogger::new(verbose),
        }
    }

    // Built per API command so `config` can repair a profile the client rejects.
    fn client(&self) -> Result<InfinibrowserClient, AppError> {
        Ok(InfinibrowserClient::new(self.profile.client_config()?)?)
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Item { id } => {
                self.logger.log(&format!("Fetching item {}", id));
                let result = self.client()?.get_item(&id).await;
                report("/item", result)
            }
            Commands::Recipes { id, offset } => {
                self.logger
                    .log(&format!("Fetching recipes for {} (offset {:?})", id, offset));
                let result = self.client()?.get_recipes(&id, offset).await;
                report("/recipes", result)
            }
            Commands::Uses { id, offset } => {
                self.logger
                    .log(&format!("Fetching uses of {} (offset {:?})", id, offset));
                let result = self.client()?.get_uses(&id, offset).await;
                report("/uses", result)
            }
            Commands::Lineage { id } => {
                self.logger.log(&format!("Fetching lineage of {}", id));
                let result = self.client()?.get_lineage(&id).await;
                report("/recipe", result)
            }
            Commands::CustomLineage { id } => {
                self.logger.log(&format!("Fetching custom lineage {}", id));
                let result = self.client()?.get_custom_lineage(&id).await;
                report("/recipe/custom", result)
            }
            Commands::Optimize { id } => {
                self.logger.log(&format!("Optimizing lineage of {}", id));
                let result = self.client()?.optimize_lineage(&id).await;
                report("/optimize-lineage", result)
            }
            Commands::Share { steps_file } => {
                let steps = read_steps(&steps_file)?;
                self.logger
                    .log(&format!("Sharing lineage with {} steps", steps.len()));
                let result = self.client()?.share_lineage(&steps).await?;
                report("/analytics/share", result)
            }
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    fn handle_config_command(&mut self, command: ConfigCommands) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                self.logger.log("Showing configuration");
                println!("Active profile: {}", self.profile_name);
                println!("  base_url:   {}", self.profile.base_url);
                println!(
                    "  timeout_ms: {}",
                    self.profile.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)
                );

                let mut names: Vec<&String> = self.config.profiles.keys().collect();
                names.sort();
                if names.is_empty() {
                    println!("No saved profiles");
                }
                for name in names {
                    let marker = if self.config.default_profile.as_deref() == Some(name.as_str())
                    {
                        " (default)"
                    } else {
                        ""
                    };
                    println!("Profile {}{}", name, marker);
                }
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                self.logger
                    .log(&format!("Setting {} on profile {}", key, self.profile_name));
                let mut profile = self
                    .config
                    .get_profile(&self.profile_name)
                    .cloned()
                    .unwrap_or_default();
                apply_setting(&mut profile, &key, &value)?;

                self.config.set_profile(self.profile_name.clone(), profile);
                if self.config.default_profile.is_none() {
                    self.config.default_profile = Some(self.profile_name.clone());
                }
                self.config.save(self.config_path.clone())?;

                println!("✅ Set {} = {} on profile {}", key, value, self.profile_name);
                Ok(())
            }
        }
    }
}

fn apply_setting(profile: &mut Profile, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "base_url" => {
            validate_url(value)?;
            profile.base_url = value.to_string();
        }
        "timeout_ms" => {
            profile.timeout_ms = Some(validate_timeout(value)?);
        }
        _ => match key.strip_prefix("header.") {
            Some(name) if !name.is_empty() => {
                RequestOptions::new()
                    .header(name, value)
                    .map_err(|e| ConfigError::InvalidValue {
                        field: key.to_string(),
                        value: value.to_string(),
                        reason: e.to_string(),
                    })?;
                profile.headers.insert(name.to_string(), value.to_string());
            }
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                });
            }
        },
    }
    Ok(())
}

fn read_steps(path: &str) -> Result<Vec<LineageStep>, CliError> {
    let content = fs::read_to_string(path).map_err(|e| CliError::InputFile {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| CliError::InputFile {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Print a successful payload as JSON, or turn the failure into an `AppError`.
fn report<T: Serialize>(endpoint: &str, result: ApiResult<T, ErrorBody>) -> Result<(), AppError> {
    match result {
        ApiResult::Success { data, .. } => {
            let rendered = serde_json::to_string_pretty(&data)
                .map_err(|e| CliError::Output(e.to_string()))?;
            println!("{}", rendered);
            Ok(())
        }
        ApiResult::NotOk { data, raw_response } => Err(ApiError::NotOk {
            status: raw_response.status.as_u16(),
            endpoint: endpoint.to_string(),
            message: data.message,
        }
        .into()),
        ApiResult::Transport(error) => {
            log::debug!("{} failed with {}", endpoint, error.code());
            Err(error.into())
        }
    }
}
