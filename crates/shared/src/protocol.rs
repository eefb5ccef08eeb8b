use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}

/// Unregister responses may carry a message, but clients must not rely on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnregisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantQuery {
    pub email: String,
}

/// A roster mutation requested from the page. Stays in process; the wire
/// carries only the path segments and the `email` query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserAction {
    Enroll {
        activity: String,
        participant: String,
    },
    Withdraw {
        activity: String,
        participant: String,
    },
}

impl UserAction {
    pub fn enroll(activity: impl Into<String>, participant: impl Into<String>) -> Self {
        Self::Enroll {
            activity: activity.into(),
            participant: participant.into(),
        }
    }

    pub fn withdraw(activity: impl Into<String>, participant: impl Into<String>) -> Self {
        Self::Withdraw {
            activity: activity.into(),
            participant: participant.into(),
        }
    }

    pub fn activity(&self) -> &str {
        match self {
            Self::Enroll { activity, .. } | Self::Withdraw { activity, .. } => activity,
        }
    }

    pub fn participant(&self) -> &str {
        match self {
            Self::Enroll { participant, .. } | Self::Withdraw { participant, .. } => participant,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Enroll { .. } => "enroll",
            Self::Withdraw { .. } => "withdraw",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn user_action_exposes_its_target() {
        let enroll = UserAction::enroll("Chess Club", "emma@mergington.edu");
        let withdraw = UserAction::withdraw("Chess Club", "emma@mergington.edu");

        assert_eq!(enroll.name(), "enroll");
        assert_eq!(withdraw.name(), "withdraw");
        assert_eq!(withdraw.activity(), "Chess Club");
        assert_eq!(withdraw.participant(), "emma@mergington.edu");
        assert_ne!(enroll, withdraw);
    }

    #[test]
    fn user_actions_dedupe_by_value() {
        let actions: HashSet<_> = [
            UserAction::withdraw("Gym Class", "john@mergington.edu"),
            UserAction::withdraw("Gym Class", "john@mergington.edu"),
            UserAction::withdraw("Gym Class", "olivia@mergington.edu"),
        ]
        .into_iter()
        .collect();

        assert_eq!(actions.len(), 2);
    }
}
