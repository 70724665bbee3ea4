use color_eyre::Result;
use dialoguer::Input;
use movieverse_config::{Config, PathManager};
use serde_json::json;

use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let paths = PathManager::from_env().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    let config_file = paths.config_file();
    let mut config =
        Config::load(&config_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    match cmd {
        ConfigCommands::Show { full } => show_config(&config, full, output),
        ConfigCommands::Backend { url, timeout } => {
            if url.is_none() && timeout.is_none() {
                output.warn("Nothing to change. Pass --url or --timeout.");
                return Ok(());
            }
            if let Some(url) = url {
                config.backend.base_url = url.trim_end_matches('/').to_string();
            }
            if let Some(timeout) = timeout {
                config.backend.timeout_secs = timeout;
            }
            save(&config, &paths, output)
        }
        ConfigCommands::Tmdb { api_key } => {
            let api_key = prompt_if_missing(api_key, "TMDB API key")?;
            let mut tmdb = config.tmdb.take().unwrap_or_default();
            tmdb.api_key = api_key;
            config.tmdb = Some(tmdb);
            save(&config, &paths, output)
        }
        ConfigCommands::Youtube { api_key } => {
            let api_key = prompt_if_missing(api_key, "YouTube Data API key")?;
            let mut youtube = config.youtube.take().unwrap_or_default();
            youtube.api_key = api_key;
            config.youtube = Some(youtube);
            save(&config, &paths, output)
        }
    }
}

fn show_config(config: &Config, full: bool, output: &Output) -> Result<()> {
    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "backend": {
                "baseUrl": config.backend.base_url,
                "timeoutSecs": config.backend.timeout_secs,
            },
            "tmdb": config.tmdb.as_ref().map(|t| json!({
                "apiKey": mask(&t.api_key, full),
                "timeoutSecs": t.timeout_secs,
                "minIntervalMs": t.min_interval_ms,
            })),
            "youtube": config.youtube.as_ref().map(|y| json!({
                "apiKey": mask(&y.api_key, full),
                "timeoutSecs": y.timeout_secs,
                "maxResults": y.max_results,
            })),
            "fallbackTrailers": config.fallback_trailers.len(),
        }));
        return Ok(());
    }

    output.println(format!("Backend URL:     {}", config.backend.base_url));
    output.println(format!("Backend timeout: {}s", config.backend.timeout_secs));

    match &config.tmdb {
        Some(tmdb) => {
            output.println(format!(
                "TMDB:            api_key={} timeout={}s min_interval={}ms",
                mask(&tmdb.api_key, full),
                tmdb.timeout_secs,
                tmdb.min_interval_ms
            ));
        }
        None => output.println("TMDB:            not configured"),
    }

    match &config.youtube {
        Some(youtube) => {
            output.println(format!(
                "YouTube:         api_key={} timeout={}s max_results={}",
                mask(&youtube.api_key, full),
                youtube.timeout_secs,
                youtube.max_results
            ));
        }
        None => output.println("YouTube:         not configured"),
    }

    output.println(format!(
        "Fallback trailers: {} entries",
        config.fallback_trailers.len()
    ));
    Ok(())
}

fn save(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    config
        .save(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    output.success(format!(
        "Configuration saved to {}",
        paths.config_file().display()
    ));
    Ok(())
}

fn mask(secret: &str, full: bool) -> String {
    if full || secret.is_empty() {
        return secret.to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}
