use renderdesk::error::Result;

use crate::cli::common::{settle, Context};
use crate::cli::terminal::{input_or_prompt, password_or_prompt};

pub async fn run(
    ctx: &Context,
    email: Option<&str>,
    password: Option<&str>,
    confirm_password: Option<&str>,
) -> Result<()> {
    let email = input_or_prompt(email, "Email")?;
    let password = password_or_prompt(password, "Password")?;
    let confirmation = password_or_prompt(confirm_password, "Confirm password")?;

    // The mismatch check lives in the operation so it is reported like any
    // other validation failure, before anything is sent.
    settle(
        ctx.client
            .register(email.trim(), &password, &confirmation)
            .await,
    )
}
