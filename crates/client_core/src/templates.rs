use askama::Template;

use crate::view::ActivityCard;

#[derive(Template)]
#[template(path = "activity_cards.html")]
pub(crate) struct ActivityCardsTemplate<'a> {
    pub(crate) cards: &'a [ActivityCard],
}

/// The list container and the activity selector. `status` replaces the
/// cards while loading or after a failed load.
#[derive(Template)]
#[template(path = "page.html")]
pub(crate) struct PageTemplate<'a> {
    pub(crate) status: Option<&'a str>,
    pub(crate) cards: &'a [ActivityCard],
    pub(crate) options: Vec<OptionRow<'a>>,
}

pub(crate) struct OptionRow<'a> {
    pub(crate) value: &'a str,
    pub(crate) label: &'a str,
    pub(crate) selected: bool,
}
