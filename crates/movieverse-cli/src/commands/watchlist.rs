use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use movieverse_models::Movie;
use serde_json::json;
use tracing::warn;

use crate::commands::context::AppContext;
use crate::output::{Output, OutputFormat};

pub async fn run_add(source: &str, external_id: &str, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let watchlist = ctx.watchlist();

    if watchlist.contains(source, external_id) {
        output.warn(format!("{}/{} is already on the watchlist", source, external_id));
        return Ok(());
    }

    // Fetch full details so the stored entry carries title and poster;
    // fall back to a bare key when the backend is unreachable.
    let movie = match ctx.backend.get_movie_details(source, external_id).await {
        Ok(movie) => movie,
        Err(err) => {
            warn!(%err, "could not fetch details, storing bare watchlist entry");
            Movie::from_key(source, external_id)
        }
    };

    if !movie.has_valid_key() {
        output.error(format!(
            "Cannot add {}/{}: missing identifying data",
            source, external_id
        ));
        return Ok(());
    }

    watchlist
        .add(&movie)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    ctx.tracker()
        .record("add_to_watchlist", external_id, movie.display_title())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    output.success(format!("Added {} to the watchlist", movie.display_title()));
    Ok(())
}

pub fn run_remove(source: &str, external_id: &str, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let watchlist = ctx.watchlist();

    if !watchlist.contains(source, external_id) {
        output.warn(format!("{}/{} is not on the watchlist", source, external_id));
        return Ok(());
    }

    watchlist
        .remove(source, external_id)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    ctx.tracker()
        .record("remove_from_watchlist", external_id, "")
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    output.success(format!("Removed {}/{} from the watchlist", source, external_id));
    Ok(())
}

pub fn run_list(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let items = ctx.watchlist().items();

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "watchlist": items }));
        return Ok(());
    }

    if items.is_empty() {
        output.println("The watchlist is empty.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Title", "Year", "Source", "Id"]);
    for movie in &items {
        table.add_row(vec![
            movie.display_title().to_string(),
            movie
                .release_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
            movie.source.clone(),
            movie.external_id.clone(),
        ]);
    }
    output.println(table.to_string());
    Ok(())
}
