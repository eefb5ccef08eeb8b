//! Enroll/withdraw orchestration: request, interpret, notify.

use std::sync::Arc;

use shared::protocol::UserAction;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    error::ClientError,
    notification::{NotificationKind, NotificationService},
    page::Page,
    RosterApi,
};

pub const ENROLL_REJECTED_FALLBACK: &str = "An error occurred";
pub const ENROLL_FAILED_MESSAGE: &str = "Failed to sign up. Please try again.";
pub const WITHDRAW_REJECTED_FALLBACK: &str = "Failed to remove participant.";
pub const WITHDRAW_FAILED_MESSAGE: &str = "Failed to remove participant. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted the change.
    Applied { message: String },
    /// The server answered with a non-success status.
    Rejected { message: String },
    /// The request never completed or its response was unreadable.
    Failed { message: String },
}

impl MutationOutcome {
    pub fn message(&self) -> &str {
        match self {
            Self::Applied { message } | Self::Rejected { message } | Self::Failed { message } => {
                message
            }
        }
    }

    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Applied { .. } => NotificationKind::Success,
            Self::Rejected { .. } | Self::Failed { .. } => NotificationKind::Error,
        }
    }

    /// Only an accepted change can have moved server state.
    pub fn requires_refetch(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

pub struct MutationController {
    api: Arc<dyn RosterApi>,
    notifier: NotificationService,
    page: Arc<Mutex<Page>>,
}

impl MutationController {
    pub fn new(
        api: Arc<dyn RosterApi>,
        notifier: NotificationService,
        page: Arc<Mutex<Page>>,
    ) -> Self {
        Self {
            api,
            notifier,
            page,
        }
    }

    /// Single entry point for every mutating user action. The roster
    /// snapshot is never touched here; callers re-fetch when the outcome
    /// asks for it.
    pub async fn dispatch(&self, action: UserAction) -> MutationOutcome {
        info!(
            action = action.name(),
            activity = action.activity(),
            participant = action.participant(),
            "dispatching roster mutation"
        );

        let outcome = match &action {
            UserAction::Enroll {
                activity,
                participant,
            } => self.enroll(activity, participant).await,
            UserAction::Withdraw {
                activity,
                participant,
            } => self.withdraw(activity, participant).await,
        };

        self.notifier
            .notify(outcome.message(), outcome.kind())
            .await;
        outcome
    }

    async fn enroll(&self, activity: &str, participant: &str) -> MutationOutcome {
        match self.api.signup(activity, participant).await {
            Ok(message) => {
                self.page.lock().await.reset_form();
                MutationOutcome::Applied { message }
            }
            Err(err) => failure(&err, ENROLL_REJECTED_FALLBACK, ENROLL_FAILED_MESSAGE),
        }
    }

    async fn withdraw(&self, activity: &str, participant: &str) -> MutationOutcome {
        match self.api.unregister(activity, participant).await {
            Ok(_) => {
                // Immediate feedback; the follow-up re-fetch replaces the list anyway.
                let removed = self
                    .page
                    .lock()
                    .await
                    .remove_participant_entry(activity, participant);
                if !removed {
                    warn!(activity, participant, "withdrawn participant had no rendered entry");
                }
                MutationOutcome::Applied {
                    message: format!("{participant} has been removed from {activity}."),
                }
            }
            Err(err) => failure(&err, WITHDRAW_REJECTED_FALLBACK, WITHDRAW_FAILED_MESSAGE),
        }
    }
}

fn failure(err: &ClientError, rejected_fallback: &str, generic: &str) -> MutationOutcome {
    let message = err.user_message(rejected_fallback, generic);
    match err {
        ClientError::Rejected { status, .. } => {
            info!(status, message = %message, "roster mutation rejected");
            MutationOutcome::Rejected { message }
        }
        _ => {
            error!(error = %err, kind = ?err.kind(), "roster mutation failed");
            MutationOutcome::Failed { message }
        }
    }
}
