// ABOUTME: `config` subcommands: show and edit the user config file.
// ABOUTME: Every edit validates first and writes the whole file back.

use super::context::Context;
use ai_shell::config::AppConfig;
use ai_shell::error::{Error, Result};
use serde::Serialize;

#[derive(Serialize)]
struct ConfigReport<'a> {
    path: String,
    #[serde(flatten)]
    config: &'a AppConfig,
}

pub fn show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    if ctx.output.is_json() {
        ctx.output.json(&ConfigReport {
            path: ctx.config_path.display().to_string(),
            config,
        })?;
        return Ok(());
    }

    let mode = config
        .mode
        .map(|m| m.to_string())
        .unwrap_or_else(|| "(auto-detect)".to_string());
    ctx.output
        .line(&format!("Config file:        {}", ctx.config_path.display()));
    ctx.output.line(&format!("Mode:               {mode}"));
    ctx.output
        .line(&format!("Default base image: {}", config.default_base_image));
    ctx.output.line(&format!(
        "Base image aliases: {}",
        config.base_image_aliases.len()
    ));
    Ok(())
}

pub fn set_mode(ctx: &Context, mode: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    config.set_mode(mode)?;
    save(ctx, &config)?;
    let mode = config.mode.map(|m| m.to_string()).unwrap_or_default();
    ctx.output
        .success(&format!("OK: configured ai-shell to use {mode}"));
    ctx.output
        .line(&format!("Config file: {}", ctx.config_path.display()));
    Ok(())
}

pub fn set_default_base_image(ctx: &Context, image: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    config.set_default_base_image(image)?;
    save(ctx, &config)?;
    ctx.output.success(&format!(
        "OK: default base image set to {}",
        config.default_base_image
    ));
    Ok(())
}

pub fn alias_set(ctx: &Context, alias: &str, image: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    config.set_alias(alias, image)?;
    save(ctx, &config)?;
    ctx.output
        .success(&format!("OK: alias {} -> {}", alias.trim(), image.trim()));
    Ok(())
}

pub fn alias_rm(ctx: &Context, alias: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    if !config.remove_alias(alias) {
        return Err(Error::InvalidArgs(format!("alias not found: {}", alias.trim())));
    }
    save(ctx, &config)?;
    ctx.output
        .success(&format!("OK: removed alias {}", alias.trim()));
    Ok(())
}

pub fn alias_ls(ctx: &Context) -> Result<()> {
    let aliases = &ctx.config.base_image_aliases;
    if ctx.output.is_json() {
        ctx.output.json(aliases)?;
        return Ok(());
    }
    if aliases.is_empty() {
        ctx.output.line("(no aliases)");
    }
    for (alias, image) in aliases {
        ctx.output.line(&format!("{alias}={image}"));
    }
    Ok(())
}

fn save(ctx: &Context, config: &AppConfig) -> Result<()> {
    config.save(&ctx.config_path)?;
    Ok(())
}
