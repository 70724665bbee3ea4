use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};
use movieverse_core::{recommendations, CategoryAggregator};
use movieverse_models::Category;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::context::AppContext;
use crate::output::{Output, OutputFormat};

pub async fn run_home(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let aggregator = CategoryAggregator::new(Arc::clone(&ctx.backend));
    let categories = Category::defaults();

    let spinner = start_spinner(output, "Loading categories...");
    let home = aggregator.load_home(&categories).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let trending = home
        .categories
        .iter()
        .find(|(category, _)| category.id == "trending")
        .map(|(_, movies)| movies.as_slice())
        .unwrap_or(&[]);
    let recommended = recommendations(&ctx.watchlist().items(), trending);

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "categories": home.categories.iter().map(|(category, movies)| json!({
                "id": category.id,
                "name": category.name,
                "movies": movies,
            })).collect::<Vec<_>>(),
            "featured": home.featured,
            "recommended": recommended,
            "notices": home.notices,
            "reviewCounts": home.review_counts,
            "errors": home.error_summary,
        }));
        return Ok(());
    }

    for notice in &home.notices {
        output.warn(notice.body());
    }

    if let Some(featured) = &home.featured {
        let year = featured
            .release_year
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        output.println(format!("Featured: {}{}", featured.display_title(), year));
        output.println("");
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Category", "Movies", "Top titles"]);
    for (category, movies) in &home.categories {
        let titles: Vec<String> = movies
            .iter()
            .take(3)
            .map(|movie| {
                let reviews = home
                    .review_counts
                    .get(&movie.external_id)
                    .copied()
                    .unwrap_or(0);
                if reviews > 0 {
                    format!("{} ({} reviews)", movie.display_title(), reviews)
                } else {
                    movie.display_title().to_string()
                }
            })
            .collect();
        table.add_row(vec![
            Cell::new(&category.name),
            Cell::new(movies.len()),
            Cell::new(titles.join(", ")),
        ]);
    }
    output.println(table.to_string());

    if !recommended.is_empty() {
        let titles: Vec<&str> = recommended.iter().map(|m| m.display_title()).collect();
        output.println(format!("Recommended for you: {}", titles.join(", ")));
    }

    if let Some(summary) = &home.error_summary {
        output.warn(summary);
    }

    Ok(())
}

fn start_spinner(output: &Output, msg: &str) -> Option<ProgressBar> {
    if output.format() != OutputFormat::Human {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid spinner template"),
    );
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}
