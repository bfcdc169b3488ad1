use color_eyre::Result;
use dialoguer::{Input, Password, Select};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read secret: {}", e))
}

/// Pick 1-5 stars. Returns the star count.
pub fn prompt_rating(prompt: &str) -> Result<u8> {
    let items: Vec<String> = (1..=5u8)
        .map(|n| format!("{} ({})", stars(n), n))
        .collect();

    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(4)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read rating: {}", e))?;

    Ok(index as u8 + 1)
}

/// Five-slot star bar, e.g. "★★★☆☆"
pub fn stars(filled: u8) -> String {
    let filled = filled.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }
}
