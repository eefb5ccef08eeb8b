use super::*;
use crate::test_support::{activity, sample_roster};

#[test]
fn options_follow_roster_order_after_placeholder() {
    let roster = sample_roster();
    let rendered = render(&roster);

    assert_eq!(rendered.options[0], SelectOption::placeholder());
    let expected: Vec<&str> = roster.names().collect();
    assert_eq!(rendered.option_values(), expected);
}

#[test]
fn spots_left_matches_capacity_minus_participants() {
    let roster = sample_roster();
    let rendered = render(&roster);

    for (card, (_, record)) in rendered.cards.iter().zip(roster.iter()) {
        assert_eq!(
            card.spots_left,
            i64::from(record.max_participants) - record.participants.len() as i64
        );
    }
    assert_eq!(rendered.cards[2].spots_left, 0);
}

#[test]
fn empty_activity_renders_single_placeholder() {
    let rendered = render(&sample_roster());
    let programming = &rendered.cards[1];

    assert_eq!(programming.participants, vec![ParticipantEntry::Placeholder]);
    assert_eq!(programming.participants[0].text(), "No participants yet");
}

#[test]
fn each_participant_gets_a_bound_withdraw_affordance() {
    let rendered = render(&sample_roster());
    let chess = &rendered.cards[0];

    assert_eq!(chess.participants.len(), 2);
    assert!(!chess.participants.contains(&ParticipantEntry::Placeholder));
    let affordances: Vec<_> = chess.withdraw_affordances().cloned().collect();
    assert_eq!(
        affordances,
        vec![
            UserAction::withdraw("Chess Club", "michael@mergington.edu"),
            UserAction::withdraw("Chess Club", "daniel@mergington.edu"),
        ]
    );
}

#[test]
fn rendering_is_idempotent() {
    let roster = sample_roster();
    let first = render(&roster);
    let second = render(&roster);

    assert_eq!(first, second);
    assert_eq!(
        first.to_html().expect("render"),
        second.to_html().expect("render")
    );
}

#[test]
fn empty_roster_renders_only_the_placeholder_option() {
    let rendered = render(&Roster::new());

    assert!(rendered.cards.is_empty());
    assert_eq!(rendered.options, vec![SelectOption::placeholder()]);
}

#[test]
fn markup_escapes_server_text() {
    let roster: Roster = [(
        "<b>Drama</b>".to_string(),
        activity(3, &["a&b@mergington.edu"]),
    )]
    .into_iter()
    .collect();

    let html = render(&roster).to_html().expect("render");
    assert!(html.contains("<h4>&lt;b&gt;Drama&lt;/b&gt;</h4>"));
    assert!(html.contains("<li>a&amp;b@mergington.edu<span class=\"delete-icon\""));
    assert!(html.contains("data-activity=\"&lt;b&gt;Drama&lt;/b&gt;\""));
    assert!(html.contains("data-participant=\"a&amp;b@mergington.edu\""));
    assert!(html.contains("2 spots left"));
    assert!(!html.contains("<b>Drama</b>"));
}

#[test]
fn plain_text_lists_placeholder_and_participants() {
    let rendered = render(&sample_roster());
    let text: String = rendered.cards.iter().map(ToString::to_string).collect();

    assert!(text.contains("Availability: 10 spots left"));
    assert!(text.contains("    - michael@mergington.edu"));
    assert!(text.contains("    (No participants yet)"));
}
