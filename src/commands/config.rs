use anyhow::Result;

use crate::config::Config;

/// Run the config command - print the effective configuration
pub async fn run(config: &Config) -> Result<()> {
    if let Some(path) = Config::user_config_path() {
        println!("# user config: {}", path.display());
    }
    println!("# registry: {}", config.depot.registry_path().display());
    println!("# templates: {}", config.depot.templates_dir().display());
    println!();
    print!("{}", config.to_toml_string()?);

    Ok(())
}
