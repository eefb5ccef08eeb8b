use std::{
    collections::VecDeque,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use shared::domain::{Activity, Roster};
use tokio::sync::Mutex;

use crate::{ClientError, RosterApi};

/// Scripted answer for the next call of a given kind.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Ok,
    Reject(u16, Option<&'static str>),
    Transport,
    Decode,
}

impl Reply {
    fn into_error(self, endpoint: &str) -> Option<ClientError> {
        match self {
            Reply::Ok => None,
            Reply::Reject(status, detail) => Some(ClientError::Rejected {
                endpoint: endpoint.to_string(),
                status,
                detail: detail.map(str::to_string),
            }),
            Reply::Transport => Some(ClientError::transport(endpoint, "connection refused")),
            Reply::Decode => Some(ClientError::decode(
                endpoint,
                serde_json::from_str::<Roster>("<html>").unwrap_err(),
            )),
        }
    }
}

/// In-memory roster server.
pub(crate) struct FakeRosterApi {
    activities: Mutex<Vec<(String, Activity)>>,
    fetch_replies: Mutex<VecDeque<Reply>>,
    mutation_replies: Mutex<VecDeque<Reply>>,
    /// When set, accepted mutations do not change what later fetches return.
    stale_reads: bool,
    fetch_calls: AtomicUsize,
    mutation_calls: AtomicUsize,
}

impl FakeRosterApi {
    pub(crate) fn new(activities: Vec<(String, Activity)>) -> Self {
        Self {
            activities: Mutex::new(activities),
            fetch_replies: Mutex::new(VecDeque::new()),
            mutation_replies: Mutex::new(VecDeque::new()),
            stale_reads: false,
            fetch_calls: AtomicUsize::new(0),
            mutation_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_stale_reads(mut self) -> Self {
        self.stale_reads = true;
        self
    }

    pub(crate) async fn script_fetch(&self, reply: Reply) {
        self.fetch_replies.lock().await.push_back(reply);
    }

    pub(crate) async fn script_mutation(&self, reply: Reply) {
        self.mutation_replies.lock().await.push_back(reply);
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    async fn next_mutation_error(&self, endpoint: &str) -> Option<ClientError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.mutation_replies
            .lock()
            .await
            .pop_front()
            .unwrap_or(Reply::Ok)
            .into_error(endpoint)
    }
}

#[async_trait]
impl RosterApi for FakeRosterApi {
    async fn fetch_roster(&self) -> Result<Roster, ClientError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .fetch_replies
            .lock()
            .await
            .pop_front()
            .unwrap_or(Reply::Ok);
        if let Some(err) = reply.into_error("GET /activities") {
            return Err(err);
        }
        Ok(self.activities.lock().await.iter().cloned().collect())
    }

    async fn signup(&self, activity: &str, participant: &str) -> Result<String, ClientError> {
        if let Some(err) = self.next_mutation_error("POST signup").await {
            return Err(err);
        }
        if !self.stale_reads {
            let mut activities = self.activities.lock().await;
            if let Some((_, record)) = activities.iter_mut().find(|(name, _)| name == activity) {
                record.participants.push(participant.to_string());
            }
        }
        Ok(format!("Signed up {participant} for {activity}"))
    }

    async fn unregister(
        &self,
        activity: &str,
        participant: &str,
    ) -> Result<Option<String>, ClientError> {
        if let Some(err) = self.next_mutation_error("DELETE unregister").await {
            return Err(err);
        }
        if !self.stale_reads {
            let mut activities = self.activities.lock().await;
            if let Some((_, record)) = activities.iter_mut().find(|(name, _)| name == activity) {
                record.participants.retain(|p| p != participant);
            }
        }
        Ok(None)
    }
}

pub(crate) fn activity(max_participants: u32, participants: &[&str]) -> Activity {
    Activity {
        description: "Weekly meetup".to_string(),
        schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
        max_participants,
        participants: participants.iter().map(|p| p.to_string()).collect(),
    }
}

pub(crate) fn sample_activities() -> Vec<(String, Activity)> {
    vec![
        (
            "Chess Club".to_string(),
            activity(12, &["michael@mergington.edu", "daniel@mergington.edu"]),
        ),
        ("Programming Class".to_string(), activity(20, &[])),
        (
            "Gym Class".to_string(),
            activity(1, &["john@mergington.edu"]),
        ),
    ]
}

pub(crate) fn sample_roster() -> Roster {
    sample_activities().into_iter().collect()
}
