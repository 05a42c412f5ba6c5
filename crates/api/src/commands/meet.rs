//! Video-link commands

use std::time::Instant;

use daybook_domain::{EventDraft, ProvisionError, ProvisionState};
use serde::{Deserialize, Serialize};

use crate::utils::logging::{log_command_execution, provision_error_label};
use crate::AppContext;

/// Outcome of a link request, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MeetLinkResult {
    #[serde(rename_all = "camelCase")]
    Generated { link: String },
    #[serde(rename_all = "camelCase")]
    Failed { error: ProvisionError, message: String, remedy: String, requires_reauthentication: bool },
}

impl MeetLinkResult {
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Generated { link } => Some(link),
            Self::Failed { .. } => None,
        }
    }
}

impl From<Result<String, ProvisionError>> for MeetLinkResult {
    fn from(result: Result<String, ProvisionError>) -> Self {
        match result {
            Ok(link) => Self::Generated { link },
            Err(error) => Self::Failed {
                message: error.to_string(),
                remedy: error.remedy().to_string(),
                requires_reauthentication: error.requires_reauthentication(),
                error,
            },
        }
    }
}

/// Provision a fresh join link.
pub async fn generate_meet_link(ctx: &AppContext) -> MeetLinkResult {
    let command_name = "meet::generate_meet_link";
    let start = Instant::now();

    let result = ctx.provisioner.provision().await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(provision_error_label));
    result.into()
}

/// Provision a link into the draft being authored. The draft is untouched
/// on failure.
pub async fn attach_meet_link(ctx: &AppContext, draft: &mut EventDraft) -> MeetLinkResult {
    let command_name = "meet::attach_meet_link";
    let start = Instant::now();

    let result = ctx.provisioner.attach_to(draft).await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(provision_error_label));
    result.and_then(|()| draft.video_link.clone().ok_or(ProvisionError::LinkNotFound)).into()
}

/// Current stage of the provisioner; the trigger is disabled while an
/// attempt is in flight.
pub fn provision_state(ctx: &AppContext) -> ProvisionState {
    ctx.provisioner.state()
}
