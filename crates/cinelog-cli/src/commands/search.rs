use super::ui::Spinner;
use super::AppContext;
use crate::output::Output;
use cinelog_core::{search_movies, SearchError};
use cinelog_models::PosterSize;
use cinelog_sources::CatalogService;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_search(query: String, output: &Output) -> Result<()> {
    // Empty queries are rejected before any setup or request
    if query.trim().is_empty() {
        return Err(SearchError::EmptyQuery.into());
    }

    let ctx = AppContext::load()?;
    ctx.require_catalog_key()?;

    let spinner = Spinner::start(
        format!("Searching for \"{}\"...", query.trim()),
        output.is_human(),
    );
    let result = search_movies(&ctx.catalog, &query).await;
    spinner.finish();
    let movies = result?;

    if !output.is_human() {
        let results: Vec<_> = movies
            .iter()
            .map(|m| {
                json!({
                    "id": m.id,
                    "title": m.title,
                    "year": m.year(),
                    "poster_url": ctx
                        .catalog
                        .poster_url(m.poster_path.as_deref(), PosterSize::W185),
                    "vote_average": m.vote_average,
                })
            })
            .collect();
        output.json(&json!({ "type": "search_results", "query": query, "results": results }));
        return Ok(());
    }

    if movies.is_empty() {
        output.info("No movies found. Try a different search term.");
        return Ok(());
    }

    if output.is_quiet() {
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Poster").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for movie in &movies {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title).fg(comfy_table::Color::Cyan),
            Cell::new(movie.year()),
            Cell::new(ctx.catalog.poster_url(movie.poster_path.as_deref(), PosterSize::W185)),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);
    println!(
        "{}",
        format!("{} result(s). Open one with 'cinelog movie <ID>'.", movies.len()).bright_black()
    );

    Ok(())
}
