//! Sign-in and session commands

use std::time::Instant;

use daybook_domain::{Result, UserSession};
use serde::{Deserialize, Serialize};

use crate::utils::logging::{error_label, log_command_execution};
use crate::AppContext;

/// Session summary for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub session: Option<UserSession>,
    /// Whether a delegated calendar credential is cached.
    pub has_calendar_access: bool,
}

/// Run the interactive provider sign-in.
pub async fn sign_in(ctx: &AppContext) -> Result<UserSession> {
    let command_name = "auth::sign_in";
    let start = Instant::now();

    let result = ctx.sessions.sign_in().await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));
    result
}

/// End the session and forget the cached credential.
pub async fn sign_out(ctx: &AppContext) -> Result<()> {
    let command_name = "auth::sign_out";
    let start = Instant::now();

    let result = ctx.sessions.sign_out().await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));
    result
}

pub fn session_status(ctx: &AppContext) -> Result<SessionStatus> {
    Ok(SessionStatus {
        session: ctx.sessions.current_session(),
        has_calendar_access: ctx.credentials.get()?.is_some(),
    })
}
