use color_eyre::Result;
use dialoguer::Input;
use movieverse_core::{login, register};

use crate::commands::context::AppContext;
use crate::output::Output;

pub async fn run_login(email: Option<String>, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let email = prompt_email(email)?;
    let password = rpassword::prompt_password("Password: ")?;

    let token = login(&ctx.backend, &email, &password)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    ctx.store
        .set_token(&token)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    output.success(format!("Logged in as {}", email));
    Ok(())
}

pub async fn run_register(email: Option<String>, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let email = prompt_email(email)?;
    let password = rpassword::prompt_password("Password (6+ characters): ")?;
    let confirm = rpassword::prompt_password("Confirm password: ")?;
    if password != confirm {
        return Err(color_eyre::eyre::eyre!("Passwords do not match"));
    }

    let token = register(&ctx.backend, &email, &password)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    ctx.store
        .set_token(&token)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    output.success(format!("Account created for {}", email));
    Ok(())
}

pub fn run_logout(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    if ctx.store.token().is_none() {
        output.warn("Not logged in.");
        return Ok(());
    }
    ctx.store
        .clear_token()
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    output.success("Logged out.");
    Ok(())
}

fn prompt_email(email: Option<String>) -> Result<String> {
    match email {
        Some(email) => Ok(email),
        None => Ok(Input::new().with_prompt("Email").interact_text()?),
    }
}
