use super::prompts;
use crate::output::Output;
use crate::ConfigCommands;
use cinelog_config::{Config, CredentialStore, PathManager, StoreBackend, SupabaseConfig};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Tmdb { api_key } => configure_tmdb(api_key, output),
        ConfigCommands::Store {
            backend,
            url,
            anon_key,
            enforce_unique,
        } => configure_store(backend, url, anon_key, enforce_unique, output),
    }
}

fn load_files(path_manager: &PathManager) -> Result<(Config, CredentialStore)> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| {
            color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
        })?;

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

    Ok((config, credentials))
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let (config, credentials) = load_files(&path_manager)?;

    let secret = |value: Option<String>| match value {
        Some(v) if full => v,
        Some(v) => mask_string(&v),
        None => "<not set>".to_string(),
    };
    let tmdb_key = secret(credentials.get_tmdb_api_key());
    let anon_key = secret(credentials.get_supabase_anon_key());
    let backend = backend_name(config.store.backend);

    if !output.is_human() {
        output.json(&json!({
            "type": "config",
            "config_file": config_file.display().to_string(),
            "exists": config_file.exists(),
            "catalog": {
                "base_url": config.catalog.base_url,
                "image_base_url": config.catalog.image_base_url,
                "request_timeout_secs": config.catalog.request_timeout_secs,
                "api_key": tmdb_key,
            },
            "store": {
                "backend": backend,
                "supabase_url": config.store.supabase.as_ref().map(|s| s.url.clone()),
                "supabase_table": config.store.supabase.as_ref().map(|s| s.table.clone()),
                "anon_key": anon_key,
            },
            "reviews": {
                "enforce_unique_per_identity": config.reviews.enforce_unique_per_identity,
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at: {} (showing defaults)",
            config_file.display()
        ));
        output.println("");
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display().to_string())]);
    table.add_row(vec![Cell::new("Catalog URL"), Cell::new(&config.catalog.base_url)]);
    table.add_row(vec![Cell::new("Image URL"), Cell::new(&config.catalog.image_base_url)]);
    table.add_row(vec![
        Cell::new("Request Timeout"),
        Cell::new(format!("{}s", config.catalog.request_timeout_secs)),
    ]);
    table.add_row(vec![Cell::new("TMDB API Key"), Cell::new(tmdb_key)]);
    table.add_row(vec![Cell::new("Review Store").fg(comfy_table::Color::Cyan), Cell::new(backend)]);
    match (&config.store.backend, &config.store.supabase) {
        (StoreBackend::Supabase, Some(supabase)) => {
            table.add_row(vec![Cell::new("Supabase URL"), Cell::new(&supabase.url)]);
            table.add_row(vec![Cell::new("Supabase Table"), Cell::new(&supabase.table)]);
            table.add_row(vec![Cell::new("Supabase Anon Key"), Cell::new(anon_key)]);
        }
        _ => {
            table.add_row(vec![
                Cell::new("Reviews File"),
                Cell::new(path_manager.local_reviews_file().display().to_string()),
            ]);
        }
    }
    table.add_row(vec![
        Cell::new("One Review Per Visitor"),
        Cell::new(if config.reviews.enforce_unique_per_identity {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        }),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);

    if let Err(e) = config.validate() {
        output.warn(format!("Configuration is invalid: {}", e));
    }

    Ok(())
}

fn configure_tmdb(api_key: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;
    let (config, mut credentials) = load_files(&path_manager)?;

    let api_key = match api_key {
        Some(key) => key,
        None => {
            output.println("Create an API key at https://www.themoviedb.org/settings/api");
            prompts::prompt_password("TMDB API Key")?
        }
    };
    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(color_eyre::eyre::eyre!("TMDB API key cannot be empty"));
    }

    credentials.set_tmdb_api_key(api_key);
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    let config_file = path_manager.config_file();
    if !config_file.exists() {
        config
            .save_to_file(&config_file)
            .map_err(|e| {
                color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e)
            })?;
    }

    output.success("TMDB API key saved");
    Ok(())
}

fn configure_store(
    backend: Option<StoreBackend>,
    url: Option<String>,
    anon_key: Option<String>,
    enforce_unique: Option<bool>,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;
    let (mut config, mut credentials) = load_files(&path_manager)?;

    if let Some(backend) = backend {
        config.store.backend = backend;
    }

    if let Some(url) = url {
        let url = url.trim().trim_end_matches('/').to_string();
        match config.store.supabase.as_mut() {
            Some(supabase) => supabase.url = url,
            None => config.store.supabase = Some(SupabaseConfig::new(url)),
        }
    }

    if config.store.backend == StoreBackend::Supabase {
        if config.store.supabase.is_none() {
            let url = prompts::prompt_string(
                "Supabase project URL (https://<project>.supabase.co)",
                None,
            )?;
            let url = url.trim().trim_end_matches('/').to_string();
            config.store.supabase = Some(SupabaseConfig::new(url));
        }

        let anon_key = match anon_key {
            Some(key) => Some(key),
            None if credentials.get_supabase_anon_key().is_none() => {
                Some(prompts::prompt_password("Supabase anon key")?)
            }
            None => None,
        };
        if let Some(key) = anon_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            credentials.set_supabase_anon_key(key);
            credentials
                .save()
                .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;
        }
    }

    if let Some(enforce) = enforce_unique {
        config.reviews.enforce_unique_per_identity = enforce;
    }

    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid store configuration: {}", e))?;

    let config_file = path_manager.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| {
            color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e)
        })?;

    output.success(format!("Review store set to '{}'", backend_name(config.store.backend)));
    Ok(())
}

fn backend_name(backend: StoreBackend) -> &'static str {
    match backend {
        StoreBackend::Local => "local",
        StoreBackend::Supabase => "supabase",
    }
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("abcdef123456"), "ab***56");
    }
}
