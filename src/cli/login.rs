use renderdesk::error::Result;

use crate::cli::common::{settle, Context};
use crate::cli::terminal::{input_or_prompt, password_or_prompt};

pub async fn run(ctx: &Context, email: Option<&str>, password: Option<&str>) -> Result<()> {
    let email = input_or_prompt(email, "Email")?;
    let password = password_or_prompt(password, "Password")?;

    settle(ctx.client.login(email.trim(), &password).await)
}
