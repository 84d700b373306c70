//! Config command handlers.

use alganews_core::config::{self, Config};
use anyhow::{Context, Result};

pub fn path() -> Result<()> {
    println!("{}", config::paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let path = config::paths::config_path();
    Config::init(&path).with_context(|| format!("init config at {}", path.display()))?;
    println!("Created config at {}", path.display());
    Ok(())
}

pub fn generate() -> Result<()> {
    print!("{}", Config::generate()?);
    Ok(())
}
