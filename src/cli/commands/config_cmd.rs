//! config command - Print the effective configuration

use anyhow::{Context as _, Result};

use crate::cli::Context;

/// Print the effective configuration as TOML.
pub fn show(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;

    match config.loaded_from() {
        Some(path) => println!("# loaded from {}", path.display()),
        None => println!("# built-in defaults"),
    }
    print!(
        "{}",
        config
            .to_effective_toml()
            .context("Failed to render config")?
    );

    Ok(())
}
