use super::prompts::stars;
use super::ui::Spinner;
use super::AppContext;
use crate::output::Output;
use chrono::{DateTime, Utc};
use cinelog_core::{load_movie_page, MoviePage};
use color_eyre::Result;
use comfy_table::{Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_movie(movie_id: u64, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    ctx.require_catalog_key()?;

    let page = fetch_page(&ctx, movie_id, output).await?;
    render_page(&page, output)
}

/// Load the page with a spinner while the requests are pending
pub async fn fetch_page(ctx: &AppContext, movie_id: u64, output: &Output) -> Result<MoviePage> {
    let spinner = Spinner::start("Loading movie...", output.is_human());
    let result =
        load_movie_page(&ctx.catalog, ctx.store.as_ref(), ctx.identity.as_ref(), movie_id).await;
    spinner.finish();
    Ok(result?)
}

pub fn render_page(page: &MoviePage, output: &Output) -> Result<()> {
    if !output.is_human() {
        output.json(&json!({ "type": "movie", "movie": serde_json::to_value(page)? }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let movie = &page.details.movie;
    println!();
    println!(
        "{} {}",
        movie.title.bright_cyan().bold(),
        format!("({})", movie.year()).bright_black()
    );

    let mut facts = Vec::new();
    if let Some(runtime) = page.details.runtime {
        facts.push(format!("Runtime: {} min", runtime));
    }
    if !page.details.genres.is_empty() {
        let genres: Vec<&str> = page.details.genres.iter().map(|g| g.name.as_str()).collect();
        facts.push(format!("Genres: {}", genres.join(", ")));
    }
    if !facts.is_empty() {
        println!("{}", facts.join("  |  "));
    }
    println!("Poster: {}", page.poster_url.bright_black());
    println!();

    let aggregate = &page.aggregate;
    println!(
        "{}  {}  {}",
        stars(aggregate.rounded_stars()).yellow(),
        aggregate.display_mean().bold(),
        format!("({})", aggregate.count_label()).bright_black()
    );
    println!();

    if !movie.overview.is_empty() {
        println!("{}", "Overview".bold());
        println!("{}", movie.overview);
        println!();
    }

    println!("{}", "User Reviews".bold());
    if page.reviews.is_empty() {
        println!("{}", "No reviews yet. Be the first to review this movie!".bright_black());
    } else {
        let now = Utc::now();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Name").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Review").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("When").add_attribute(comfy_table::Attribute::Bold),
        ]);
        for review in &page.reviews {
            table.add_row(vec![
                Cell::new(&review.user_name),
                Cell::new(stars(review.rating)).fg(comfy_table::Color::Yellow),
                Cell::new(&review.review_text),
                Cell::new(time_ago(review.created_at, now)),
            ]);
        }
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        println!("{}", table);
    }
    println!();

    if page.user_has_reviewed {
        output.info("You've already reviewed this movie!");
    } else {
        output.info(format!("Write a review with 'cinelog review {}'", page.movie_id()));
    }

    Ok(())
}

/// Distance from `then` to `now` in words, e.g. "3 days ago"
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 0 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let (amount, unit, about) = if minutes < 1 {
        return "less than a minute ago".to_string();
    } else if hours < 1 {
        (minutes, "minute", false)
    } else if days < 1 {
        (hours, "hour", true)
    } else if days < 30 {
        (days, "day", false)
    } else if days < 365 {
        (days / 30, "month", true)
    } else {
        (days / 365, "year", true)
    };

    let plural = if amount == 1 { "" } else { "s" };
    let prefix = if about { "about " } else { "" };
    format!("{}{} {}{} ago", prefix, amount, unit, plural)
}
