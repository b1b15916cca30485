use std::io::{BufRead, Write};

use crate::args::{LoginArgs, OutputMode, WhoamiArgs};
use crate::commands::CommandContext;
use crate::controller::SessionController;
use crate::view::stats::render_user;
use crate::view::{to_pretty_json, to_pretty_yaml};

pub async fn handle_login(ctx: &CommandContext, args: LoginArgs) -> anyhow::Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_password(&args.username)?,
    };

    let mut session = SessionController::new(ctx.api()?);
    session.login(&args.username, &password).await;

    if let Some(message) = session.error_message() {
        anyhow::bail!("login failed: {message}");
    }
    match session.current_user() {
        Some(user) => println!("logged in as {}", user.username),
        None => println!("logged in"),
    }
    Ok(())
}

pub fn handle_logout(ctx: &CommandContext) -> anyhow::Result<()> {
    let mut session = SessionController::new(ctx.api()?);
    session.logout();
    println!("logged out");
    Ok(())
}

pub async fn handle_whoami(ctx: &CommandContext, args: WhoamiArgs) -> anyhow::Result<()> {
    let user = ctx.api()?.get_current_user().await?;
    match args.output.mode() {
        OutputMode::Table => println!("{}", render_user(&user)),
        OutputMode::Json => println!("{}", to_pretty_json(&user)?),
        OutputMode::Yaml => print!("{}", to_pretty_yaml(&user)?),
    }
    Ok(())
}

fn prompt_password(username: &str) -> anyhow::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "password for {username}: ")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\n', '\r']).to_string();
    if password.is_empty() {
        anyhow::bail!("password cannot be empty; pass --password or set PEERCTL_PASSWORD");
    }
    Ok(password)
}
