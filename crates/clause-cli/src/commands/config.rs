use anyhow::Result;
use clause_config::Config;
use std::path::Path;

pub fn handle(path_only: bool, explicit: Option<&Path>, config: &Config) -> Result<()> {
    let path = explicit.map(Path::to_path_buf).unwrap_or_else(Config::config_path);

    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
