use crate::cli::ConfigCommand;
use crate::config::Config;
use crate::error::{JekinError, Result};

pub fn execute(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init => {
            let config_path = Config::create_sample()?;
            println!("Created sample config file at: {}", config_path.display());
            println!("\nEdit it to point at your itinerary endpoint:");
            println!("  [source]");
            println!("  url = \"https://api.example.org/worker/itinerary\"");
        }
        ConfigCommand::Path => {
            let config_path = Config::config_file_path()?;
            println!("Config file path: {}", config_path.display());

            if config_path.exists() {
                println!("Status: File exists");
            } else {
                println!("Status: File does not exist (defaults in use)");
                println!("\nTo create a sample config file, run:");
                println!("  jekin config init");
            }

            match Config::load().and_then(|config| config.policy().map(|_| config)) {
                Ok(mut config) => {
                    println!("Valid: Yes");
                    if config.source_token().is_some() {
                        config.source.token = Some("********".to_string());
                    }
                    let effective = toml::to_string_pretty(&config).map_err(|e| {
                        JekinError::ConfigError(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("\nEffective configuration:\n\n{}", effective);
                }
                Err(e) => {
                    println!("Valid: No");
                    println!("Error: {}", e);
                }
            }
        }
    }

    Ok(())
}
