//! In-memory page surface: the activity list container, the activity
//! selector, and the enrollment form.

use std::fmt;

use askama::Template as _;
use shared::protocol::UserAction;

use crate::{
    templates::{OptionRow, PageTemplate},
    view::{option_values, ActivityCard, RenderedRoster, SelectOption},
};

pub const LOADING_MESSAGE: &str = "Loading activities...";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load activities. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    Loading,
    Cards(Vec<ActivityCard>),
    LoadFailed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollForm {
    pub activity: String,
    pub participant: String,
}

impl EnrollForm {
    pub fn is_empty(&self) -> bool {
        self.activity.is_empty() && self.participant.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    list: ListContent,
    options: Vec<SelectOption>,
    form: EnrollForm,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            list: ListContent::Loading,
            options: vec![SelectOption::placeholder()],
            form: EnrollForm::default(),
        }
    }
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &ListContent {
        &self.list
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn option_values(&self) -> Vec<&str> {
        option_values(&self.options)
    }

    pub fn form(&self) -> &EnrollForm {
        &self.form
    }

    pub fn cards(&self) -> &[ActivityCard] {
        match &self.list {
            ListContent::Cards(cards) => cards.as_slice(),
            ListContent::Loading | ListContent::LoadFailed => &[],
        }
    }

    /// Replaces list and options wholesale.
    pub fn apply(&mut self, rendered: RenderedRoster) {
        self.list = ListContent::Cards(rendered.cards);
        self.options = rendered.options;
    }

    pub fn show_loading(&mut self) {
        self.list = ListContent::Loading;
    }

    /// Swaps the list for the static failure message. Options are left as
    /// they are.
    pub fn show_load_failure(&mut self) {
        self.list = ListContent::LoadFailed;
    }

    pub fn fill_form(&mut self, activity: impl Into<String>, participant: impl Into<String>) {
        self.form = EnrollForm {
            activity: activity.into(),
            participant: participant.into(),
        };
    }

    pub fn reset_form(&mut self) {
        self.form = EnrollForm::default();
    }

    pub fn remove_participant_entry(&mut self, activity: &str, participant: &str) -> bool {
        let ListContent::Cards(cards) = &mut self.list else {
            return false;
        };
        cards
            .iter_mut()
            .find(|card| card.name == activity)
            .is_some_and(|card| card.remove_participant(participant))
    }

    pub fn contains_participant_entry(&self, activity: &str, participant: &str) -> bool {
        self.find_withdraw(activity, participant).is_some()
    }

    /// The withdraw affordance rendered for `participant` under `activity`.
    pub fn find_withdraw(&self, activity: &str, participant: &str) -> Option<&UserAction> {
        self.cards()
            .iter()
            .filter(|card| card.name == activity)
            .flat_map(ActivityCard::withdraw_affordances)
            .find(|action| action.participant() == participant)
    }

    /// The option matching the form's activity is marked selected.
    pub fn to_html(&self) -> askama::Result<String> {
        let status = match &self.list {
            ListContent::Loading => Some(LOADING_MESSAGE),
            ListContent::LoadFailed => Some(LOAD_FAILED_MESSAGE),
            ListContent::Cards(_) => None,
        };
        let options = self
            .options
            .iter()
            .map(|option| OptionRow {
                value: &option.value,
                label: &option.label,
                selected: !option.is_placeholder() && option.value == self.form.activity,
            })
            .collect();

        PageTemplate {
            status,
            cards: self.cards(),
            options,
        }
        .render()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.list {
            ListContent::Loading => writeln!(f, "{LOADING_MESSAGE}"),
            ListContent::LoadFailed => writeln!(f, "{LOAD_FAILED_MESSAGE}"),
            ListContent::Cards(cards) => {
                for card in cards {
                    writeln!(f, "{card}")?;
                }
                Ok(())
            }
        }
    }
}
