use chrono::Utc;
use color_eyre::Result;
use movieverse_core::{embed_url, load_details};
use movieverse_models::{relative_age, ReactionKind};
use serde_json::json;

use crate::commands::context::AppContext;
use crate::output::{Output, OutputFormat};

pub async fn run_details(
    source: &str,
    external_id: &str,
    screenshots: bool,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::init()?;
    let page = load_details(&ctx.backend, source, external_id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    ctx.tracker()
        .record("view_details", external_id, page.movie.display_title())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let resolver = ctx.trailer_resolver();
    let trailer = if page.movie.has_trailer() {
        page.movie.trailer.clone()
    } else {
        resolver
            .resolve(
                external_id,
                page.movie.title.as_deref(),
                page.movie.release_year,
            )
            .await
    };

    let shots = if screenshots {
        if page.movie.screenshots.is_empty() {
            resolver.screenshots(external_id).await
        } else {
            page.movie.screenshots.clone()
        }
    } else {
        Vec::new()
    };

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "movie": page.movie,
            "trailer": trailer,
            "embedTrailer": trailer.as_deref().map(embed_url),
            "screenshots": shots,
            "reviews": page.reviews,
            "reactions": page.reactions,
        }));
        return Ok(());
    }

    let year = page
        .movie
        .release_year
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    output.println(format!("{}{}", page.movie.display_title(), year));

    if let Some(genres) = &page.movie.genres {
        output.println(format!("Genres: {}", genres.display()));
    }
    if let Some(rating) = &page.movie.imdb_rating {
        output.println(format!("IMDb rating: {}", rating));
    }
    if let Some(overview) = &page.movie.overview {
        output.println("");
        output.println(overview);
    }

    output.println("");
    match &trailer {
        Some(url) => {
            output.println(format!("Trailer: {}", url));
            output.println(format!("Embed:   {}", embed_url(url)));
        }
        None => output.println("No trailer available."),
    }

    let free = page.movie.free_providers("US");
    if !free.is_empty() {
        output.println(format!("Free with ads on: {}", free.join(", ")));
    }

    if !shots.is_empty() {
        output.println("");
        output.println("Screenshots:");
        for shot in &shots {
            output.println(format!("  {}", shot));
        }
    }

    if page.reactions.total() > 0 {
        output.println("");
        let tallies: Vec<String> = ReactionKind::ALL
            .iter()
            .map(|kind| format!("{} {}", page.reactions.get(*kind), kind.label()))
            .collect();
        output.println(format!("Reactions: {}", tallies.join("  ")));
    }

    output.println("");
    if page.reviews.is_empty() {
        output.println("No reviews yet.");
    } else {
        let now = Utc::now();
        output.println(format!("Reviews ({}):", page.reviews.len()));
        for review in &page.reviews {
            let rating = review
                .rating
                .map(|r| format!(" [{}/10]", r))
                .unwrap_or_default();
            output.println(format!(
                "  {}{} ({}): {}",
                review.name,
                rating,
                relative_age(review.created_at, now),
                review.text
            ));
            for reply in &review.replies {
                output.println(format!(
                    "    ↳ {} ({}): {}",
                    reply.name,
                    relative_age(reply.created_at, now),
                    reply.text
                ));
            }
        }
    }

    Ok(())
}
