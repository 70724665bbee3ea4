use color_eyre::Result;
use movieverse_core::send_reaction;
use movieverse_models::ReactionKind;
use serde_json::json;

use crate::commands::context::AppContext;
use crate::output::{Output, OutputFormat};

pub async fn run_react(
    source: &str,
    external_id: &str,
    reaction: &str,
    output: &Output,
) -> Result<()> {
    let reaction: ReactionKind = reaction
        .parse()
        .map_err(|e: String| color_eyre::eyre::eyre!(e))?;

    let ctx = AppContext::init()?;
    let counts = send_reaction(&ctx.backend, source, external_id, reaction)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "reaction": reaction, "counts": counts }));
        return Ok(());
    }

    output.success(format!("Recorded '{}'", reaction));
    let tallies: Vec<String> = ReactionKind::ALL
        .iter()
        .map(|kind| format!("{} {}", counts.get(*kind), kind.label()))
        .collect();
    output.println(format!("Current tally: {}", tallies.join("  ")));
    Ok(())
}
