//! Projection of a roster snapshot into list content and selection options.

use std::fmt;

use askama::Template as _;
use shared::{domain::Roster, protocol::UserAction};

use crate::templates::ActivityCardsTemplate;

pub const NO_PARTICIPANTS_PLACEHOLDER: &str = "No participants yet";
pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: SELECT_PLACEHOLDER.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantEntry {
    Placeholder,
    /// A participant line with its withdraw affordance bound at render time.
    Participant {
        participant: String,
        withdraw: UserAction,
    },
}

impl ParticipantEntry {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Placeholder => NO_PARTICIPANTS_PLACEHOLDER,
            Self::Participant { participant, .. } => participant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<ParticipantEntry>,
}

impl ActivityCard {
    /// Drops the first entry for `participant`. The placeholder is not
    /// re-added when the list becomes empty; the next render takes care of it.
    pub fn remove_participant(&mut self, participant: &str) -> bool {
        let position = self.participants.iter().position(|entry| {
            matches!(entry, ParticipantEntry::Participant { participant: p, .. } if p == participant)
        });
        match position {
            Some(index) => {
                self.participants.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn withdraw_affordances(&self) -> impl Iterator<Item = &UserAction> {
        self.participants.iter().filter_map(|entry| match entry {
            ParticipantEntry::Participant { withdraw, .. } => Some(withdraw),
            ParticipantEntry::Placeholder => None,
        })
    }
}

impl fmt::Display for ActivityCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  {}", self.description)?;
        writeln!(f, "  Schedule: {}", self.schedule)?;
        writeln!(f, "  Availability: {} spots left", self.spots_left)?;
        writeln!(f, "  Participants:")?;
        for entry in &self.participants {
            match entry {
                ParticipantEntry::Placeholder => writeln!(f, "    ({})", entry.text())?,
                ParticipantEntry::Participant { participant, .. } => {
                    writeln!(f, "    - {participant}")?
                }
            }
        }
        Ok(())
    }
}

/// Everything a snapshot contributes to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRoster {
    pub cards: Vec<ActivityCard>,
    pub options: Vec<SelectOption>,
}

impl RenderedRoster {
    /// Activity names offered for selection, without the placeholder.
    pub fn option_values(&self) -> Vec<&str> {
        option_values(&self.options)
    }

    /// Card markup for the list container, server text escaped.
    pub fn to_html(&self) -> askama::Result<String> {
        ActivityCardsTemplate { cards: &self.cards }.render()
    }
}

pub fn option_values(options: &[SelectOption]) -> Vec<&str> {
    options
        .iter()
        .filter(|option| !option.is_placeholder())
        .map(|option| option.value.as_str())
        .collect()
}

pub fn render(roster: &Roster) -> RenderedRoster {
    let mut cards = Vec::with_capacity(roster.len());
    let mut options = Vec::with_capacity(roster.len() + 1);
    options.push(SelectOption::placeholder());

    for (name, activity) in roster.iter() {
        let participants = if activity.participants.is_empty() {
            vec![ParticipantEntry::Placeholder]
        } else {
            activity
                .participants
                .iter()
                .map(|participant| ParticipantEntry::Participant {
                    participant: participant.clone(),
                    withdraw: UserAction::withdraw(name, participant.as_str()),
                })
                .collect()
        };

        cards.push(ActivityCard {
            name: name.to_string(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: activity.spots_left(),
            participants,
        });
        options.push(SelectOption {
            value: name.to_string(),
            label: name.to_string(),
        });
    }

    RenderedRoster { cards, options }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
