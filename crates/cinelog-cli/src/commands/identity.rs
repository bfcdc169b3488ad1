use super::AppContext;
use crate::output::Output;
use cinelog_core::IdentityProvider;
use color_eyre::Result;
use serde_json::json;

/// Show the visitor identity without creating one
pub async fn run_identity(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let current = ctx.identity.current();
    let storage_file = ctx.paths.local_storage_file();

    if !output.is_human() {
        output.json(&json!({
            "type": "identity",
            "user_identifier": current.as_ref().map(|i| i.as_str()),
            "storage_file": storage_file.display().to_string(),
        }));
        return Ok(());
    }

    match current {
        Some(identity) => {
            output.info(format!("Visitor identity: {}", identity));
            output.info(format!("Stored in: {}", storage_file.display()));
        }
        None => {
            output.info("No visitor identity yet. One is created with your first review.");
        }
    }

    Ok(())
}
