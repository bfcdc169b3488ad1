use super::movie::fetch_page;
use super::prompts::{prompt_rating, prompt_string};
use super::ui::{is_interactive, Spinner};
use super::AppContext;
use crate::output::Output;
use cinelog_core::{ReviewForm, SubmitError, ValidationError};
use color_eyre::Result;
use serde_json::json;
use tracing::debug;

pub async fn run_review(
    movie_id: u64,
    rating: Option<u8>,
    text: Option<String>,
    name: Option<String>,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::load()?;
    ctx.require_catalog_key()?;

    let page = fetch_page(&ctx, movie_id, output).await?;
    if page.user_has_reviewed {
        output.warn("You've already reviewed this movie!");
        return Ok(());
    }

    let interactive = is_interactive() && output.is_human();
    if interactive {
        output.println(format!("Reviewing {} ({})", page.snapshot.title, page.snapshot.year));
    }

    let mut form = ReviewForm::new();
    form.rating = match rating {
        Some(rating) => rating,
        None if interactive => prompt_rating("Your rating")?,
        None => 0,
    };
    form.review_text = match text {
        Some(text) => text,
        None if interactive => prompt_string("Your review", None)?,
        None => String::new(),
    };
    form.user_name = match name {
        Some(name) => name,
        None if interactive => prompt_string("Your name", None)?,
        None => String::new(),
    };

    let workflow = ctx.workflow();
    let review = loop {
        let spinner = Spinner::start("Submitting...", output.is_human());
        let result = form.submit(&workflow, &page.snapshot, &page.reviews).await;
        spinner.finish();
        debug!(states = ?form.last_attempt(), "Submission attempt finished");

        match result {
            Ok(review) => break review,
            Err(SubmitError::Validation(e)) if interactive => {
                // Input is kept; ask again only for the field at fault
                output.error(e.to_string());
                match e {
                    ValidationError::MissingRating | ValidationError::InvalidRating(_) => {
                        form.rating = prompt_rating("Your rating")?;
                    }
                    ValidationError::MissingReviewText | ValidationError::ReviewTextTooLong(_) => {
                        form.review_text = prompt_string("Your review", None)?;
                    }
                    ValidationError::MissingUserName | ValidationError::UserNameTooLong(_) => {
                        form.user_name = prompt_string("Your name", None)?;
                    }
                }
            }
            Err(e) => return Err(e.into()),
        }
    };

    output.success("Review submitted successfully!");

    // Reload so the aggregate includes the new review
    let refreshed = fetch_page(&ctx, movie_id, output).await?;

    if output.is_human() {
        output.info(format!(
            "{} is now rated {} ({})",
            refreshed.snapshot.title,
            refreshed.aggregate.display_mean(),
            refreshed.aggregate.count_label()
        ));
    } else {
        output.json(&json!({
            "type": "review_submitted",
            "review": serde_json::to_value(&review)?,
            "aggregate": serde_json::to_value(refreshed.aggregate)?,
            "user_has_reviewed": refreshed.user_has_reviewed,
        }));
    }

    Ok(())
}
