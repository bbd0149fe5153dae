//! `taskboard login`, `signup`, `logout` and `whoami` commands.

use crate::context::ServiceContext;
use crate::session::Session;

/// Execute the `login` command.
///
/// # Errors
///
/// Returns an error string if the credentials are rejected.
pub async fn login(ctx: &ServiceContext, email: &str, password: &str) -> Result<(), String> {
    let session =
        ctx.auth.login(email, password).await.map_err(|e| format!("Login failed: {e}"))?;
    begin(ctx, session);
    Ok(())
}

/// Execute the `signup` command.
///
/// # Errors
///
/// Returns an error string if registration is rejected.
pub async fn signup(
    ctx: &ServiceContext,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), String> {
    let session =
        ctx.auth.signup(name, email, password).await.map_err(|e| format!("Signup failed: {e}"))?;
    begin(ctx, session);
    Ok(())
}

/// Execute the `logout` command.
pub fn logout(ctx: &ServiceContext) {
    match ctx.session.end() {
        Some(session) => println!("Logged out {}.", session.user.email),
        None => println!("Not logged in."),
    }
}

/// Execute the `whoami` command.
pub fn whoami(ctx: &ServiceContext) {
    println!("{}", describe(ctx.session.snapshot().as_ref()));
}

fn begin(ctx: &ServiceContext, session: Session) {
    tracing::info!(user = %session.user.id, "session started");
    println!("Logged in as {} <{}>.", session.user.name, session.user.email);
    ctx.session.begin(session);
}

fn describe(session: Option<&Session>) -> String {
    session.map_or_else(
        || "Not logged in.".to_string(),
        |s| {
            format!(
                "{} <{}> (logged in {})",
                s.user.name,
                s.user.email,
                s.started_at.format("%Y-%m-%d %H:%M UTC")
            )
        },
    )
}
