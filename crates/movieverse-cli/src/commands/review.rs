use color_eyre::Result;
use dialoguer::Input;
use movieverse_core::{submit_reply, submit_review};
use movieverse_models::{NewReply, NewReview};
use serde_json::json;

use crate::commands::context::AppContext;
use crate::output::{Output, OutputFormat};

pub async fn run_review(
    source: &str,
    external_id: &str,
    name: Option<String>,
    email: Option<String>,
    text: Option<String>,
    rating: Option<u8>,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::init()?;

    let review = NewReview {
        name: prompt_if_missing(name, "Your name")?,
        email: prompt_if_missing(email, "Your email")?,
        text: prompt_if_missing(text, "Review text")?,
        rating,
    };

    let reviews = submit_review(&ctx.backend, source, external_id, review)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "reviews": reviews }));
        return Ok(());
    }

    output.success(format!(
        "Review submitted. {} review(s) now on record.",
        reviews.len()
    ));
    Ok(())
}

pub async fn run_reply(
    source: &str,
    external_id: &str,
    review_id: &str,
    name: Option<String>,
    email: Option<String>,
    text: Option<String>,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::init()?;

    let reply = NewReply {
        name: prompt_if_missing(name, "Your name")?,
        email: prompt_if_missing(email, "Your email")?,
        text: prompt_if_missing(text, "Reply text")?,
    };

    let reviews = submit_reply(&ctx.backend, source, external_id, review_id, reply)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "reviews": reviews }));
        return Ok(());
    }

    output.success("Reply submitted.");
    Ok(())
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}
