//! Application wiring: owns the roster snapshot and routes page events.

use std::sync::Arc;

use shared::{domain::Roster, error::FormError, protocol::UserAction};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    mutation::{MutationController, MutationOutcome},
    notification::{NotificationService, NotificationState},
    page::Page,
    view, RosterApi,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    Loading,
    Ready,
    LoadFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Loaded,
    FormSubmitted,
    WithdrawActivated {
        activity: String,
        participant: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Loaded(AppPhase),
    Mutation(MutationOutcome),
    /// The activated affordance is no longer on the page.
    Ignored,
}

struct AppState {
    phase: AppPhase,
    snapshot: Option<Arc<Roster>>,
}

pub struct AppController {
    api: Arc<dyn RosterApi>,
    page: Arc<Mutex<Page>>,
    notifier: NotificationService,
    mutations: MutationController,
    state: Mutex<AppState>,
}

impl AppController {
    pub fn new(api: Arc<dyn RosterApi>) -> Self {
        Self::with_notifier(api, NotificationService::new())
    }

    pub fn with_notifier(api: Arc<dyn RosterApi>, notifier: NotificationService) -> Self {
        let page = Arc::new(Mutex::new(Page::new()));
        let mutations = MutationController::new(api.clone(), notifier.clone(), page.clone());
        Self {
            api,
            page,
            notifier,
            mutations,
            state: Mutex::new(AppState {
                phase: AppPhase::Loading,
                snapshot: None,
            }),
        }
    }

    pub async fn handle(&self, event: PageEvent) -> Result<EventOutcome, FormError> {
        match event {
            PageEvent::Loaded => Ok(EventOutcome::Loaded(self.load().await)),
            PageEvent::FormSubmitted => self.submit_form().await.map(EventOutcome::Mutation),
            PageEvent::WithdrawActivated {
                activity,
                participant,
            } => Ok(self
                .activate_withdraw(&activity, &participant)
                .await
                .map_or(EventOutcome::Ignored, EventOutcome::Mutation)),
        }
    }

    /// Initial load. Ends in `Ready` or `LoadFailed`; failures are never
    /// retried.
    pub async fn load(&self) -> AppPhase {
        {
            let mut state = self.state.lock().await;
            state.phase = AppPhase::Loading;
            self.page.lock().await.show_loading();
        }

        match self.api.fetch_roster().await {
            Ok(roster) => {
                self.install(roster).await;
                AppPhase::Ready
            }
            Err(err) => {
                error!(error = %err, kind = ?err.kind(), "failed to load activities");
                let mut state = self.state.lock().await;
                state.phase = AppPhase::LoadFailed;
                self.page.lock().await.show_load_failure();
                AppPhase::LoadFailed
            }
        }
    }

    pub async fn submit_form(&self) -> Result<MutationOutcome, FormError> {
        let form = self.page.lock().await.form().clone();
        let participant = form.participant.trim();
        if participant.is_empty() {
            return Err(FormError::MissingParticipant);
        }
        if form.activity.is_empty() {
            return Err(FormError::MissingActivity);
        }
        let known = self
            .snapshot()
            .await
            .is_some_and(|roster| roster.contains(&form.activity));
        if !known {
            return Err(FormError::UnknownActivity(form.activity));
        }

        Ok(self
            .dispatch(UserAction::enroll(form.activity.as_str(), participant))
            .await)
    }

    /// Runs the withdraw affordance rendered for this participant, if the
    /// current page still shows one.
    pub async fn activate_withdraw(
        &self,
        activity: &str,
        participant: &str,
    ) -> Option<MutationOutcome> {
        let action = self
            .page
            .lock()
            .await
            .find_withdraw(activity, participant)
            .cloned();
        match action {
            Some(action) => Some(self.dispatch(action).await),
            None => {
                debug!(activity, participant, "withdraw affordance not on page");
                None
            }
        }
    }

    pub async fn dispatch(&self, action: UserAction) -> MutationOutcome {
        let outcome = self.mutations.dispatch(action).await;
        if outcome.requires_refetch() {
            self.refresh().await;
        }
        outcome
    }

    /// Post-mutation re-fetch. Responses are applied in arrival order; a
    /// failure keeps the current snapshot and view.
    async fn refresh(&self) {
        if self.phase().await == AppPhase::LoadFailed {
            debug!("skipping roster refresh after failed load");
            return;
        }
        match self.api.fetch_roster().await {
            Ok(roster) => self.install(roster).await,
            Err(err) => {
                warn!(error = %err, kind = ?err.kind(), "roster refresh failed; keeping current view")
            }
        }
    }

    async fn install(&self, roster: Roster) {
        let roster = Arc::new(roster);
        let rendered = view::render(&roster);
        let activities = roster.len();
        // Lock order is state, then page. Snapshot and view change together.
        let mut state = self.state.lock().await;
        state.snapshot = Some(roster);
        state.phase = AppPhase::Ready;
        self.page.lock().await.apply(rendered);
        drop(state);
        info!(activities, "roster rendered");
    }

    pub async fn fill_form(&self, activity: &str, participant: &str) {
        self.page.lock().await.fill_form(activity, participant);
    }

    pub async fn phase(&self) -> AppPhase {
        self.state.lock().await.phase
    }

    pub async fn snapshot(&self) -> Option<Arc<Roster>> {
        self.state.lock().await.snapshot.clone()
    }

    pub async fn page(&self) -> Page {
        self.page.lock().await.clone()
    }

    pub async fn notification(&self) -> NotificationState {
        self.notifier.snapshot().await
    }

    pub fn notifier(&self) -> &NotificationService {
        &self.notifier
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
