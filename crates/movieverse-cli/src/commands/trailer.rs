use color_eyre::Result;
use movieverse_core::embed_url;
use serde_json::json;

use crate::commands::context::AppContext;
use crate::output::{Output, OutputFormat};

pub async fn run_trailer(
    external_id: &str,
    title: Option<&str>,
    year: Option<u32>,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::init()?;

    if ctx.config.tmdb.is_none() && ctx.config.youtube.is_none() && ctx.config.fallback_trailers.is_empty() {
        output.warn("No trailer sources configured. Run 'movieverse config tmdb' or 'movieverse config youtube' first.");
    }

    let resolver = ctx.trailer_resolver();
    let trailer = resolver.resolve(external_id, title, year).await;

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "externalId": external_id,
            "trailer": trailer,
            "embedTrailer": trailer.as_deref().map(embed_url),
        }));
        return Ok(());
    }

    match &trailer {
        Some(url) => {
            ctx.tracker()
                .record("play_trailer", external_id, title.unwrap_or(""))
                .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
            output.success(format!("Trailer: {}", url));
            output.println(format!("Embed:   {}", embed_url(url)));
        }
        None => {
            output.error("No trailer found through any source.");
            if title.is_none() || year.is_none() {
                output.println("Hint: pass --title and --year to enable the search fallback.");
            }
        }
    }

    Ok(())
}
