use color_eyre::Result;
use serde_json::json;

use crate::commands::context::AppContext;
use crate::output::{Output, OutputFormat};

pub async fn run_notices(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let notices = ctx
        .backend
        .get_notices()
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "notices": notices }));
        return Ok(());
    }

    if notices.is_empty() {
        output.println("No current notices.");
        return Ok(());
    }

    for notice in &notices {
        output.warn(notice.body());
    }
    Ok(())
}
