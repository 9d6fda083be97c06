//! Dialog state machine.
//!
//! [`transition`] is pure: it takes the stored record, the classified input and the current
//! time, and returns what to persist and what to send. [`Transition`] keeps the two apart so
//! the executor can only ever write before it replies.

use crate::commands::{lifespan_quick_picks, main_menu, Command};
use crate::date_math::{death_date, remaining_breakdown};
use crate::error::{DialogError, Result};
use crate::input::{parse_birth_date, parse_lifespan, Input};
use crate::messages;
use chrono::{NaiveDate, NaiveDateTime};
use dclock_core::ReplyKeyboard;
use storage::UserDialogState;

/// Stage of the dialog, derived from the record's flags and stored answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// Nothing pending and no complete answer set.
    New,
    AwaitingLifespan,
    AwaitingBirthday,
    /// Nothing pending, lifespan and birth date stored.
    Complete,
}

impl DialogState {
    pub fn of(record: &UserDialogState) -> Self {
        if record.awaiting_lifespan {
            DialogState::AwaitingLifespan
        } else if record.awaiting_birthday {
            DialogState::AwaitingBirthday
        } else if record.has_answers() {
            DialogState::Complete
        } else {
            DialogState::New
        }
    }
}

/// One outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<ReplyKeyboard>,
}

impl Reply {
    pub fn with_keyboard(text: impl Into<String>, keyboard: ReplyKeyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    pub fn menu(text: impl Into<String>) -> Self {
        Self::with_keyboard(text, main_menu())
    }
}

/// Effects of one message: an optional record to persist, then replies in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub persist: Option<UserDialogState>,
    pub replies: Vec<Reply>,
}

impl Transition {
    fn reply(reply: Reply) -> Self {
        Self {
            persist: None,
            replies: vec![reply],
        }
    }

    fn save_and_reply(state: UserDialogState, replies: Vec<Reply>) -> Self {
        Self {
            persist: Some(state),
            replies,
        }
    }
}

/// Decides the effects of `input` for a user in `record`'s state. At most one state change per call.
pub fn transition(record: &UserDialogState, input: &Input, now: NaiveDateTime) -> Result<Transition> {
    match (DialogState::of(record), input) {
        (DialogState::AwaitingLifespan, Input::Numeric(raw)) => {
            let years = parse_lifespan(raw)?;
            let next = UserDialogState {
                awaiting_lifespan: false,
                awaiting_birthday: true,
                expected_lifespan_years: Some(years),
                ..record.clone()
            };
            Ok(Transition::save_and_reply(
                next,
                vec![Reply::with_keyboard(
                    messages::MSG_ASK_BIRTHDAY,
                    lifespan_quick_picks(),
                )],
            ))
        }
        (DialogState::AwaitingBirthday, Input::Date(raw)) => {
            let birth_date = parse_birth_date(raw)?;
            let years = record.expected_lifespan_years.ok_or_else(|| {
                DialogError::MissingPrerequisite(format!(
                    "birth date for {} received before lifespan",
                    record.username
                ))
            })?;
            let replies = report(birth_date, years, now)?;
            let next = UserDialogState {
                awaiting_lifespan: false,
                awaiting_birthday: false,
                birth_date: Some(birth_date),
                ..record.clone()
            };
            Ok(Transition::save_and_reply(next, replies))
        }
        (_, Input::Command(cmd)) => command(record, *cmd, now),
        _ => Ok(Transition::reply(Reply::menu(messages::MSG_UNKNOWN_COMMAND))),
    }
}

fn command(record: &UserDialogState, cmd: Command, now: NaiveDateTime) -> Result<Transition> {
    match cmd {
        Command::Help => Ok(Transition::reply(Reply::menu(messages::MSG_HELP))),
        Command::Start | Command::OpenNotebook => {
            Ok(Transition::reply(Reply::menu(messages::welcome())))
        }
        Command::BeginCalculation => {
            let next = UserDialogState {
                awaiting_lifespan: true,
                awaiting_birthday: false,
                ..record.clone()
            };
            Ok(Transition::save_and_reply(
                next,
                vec![Reply::with_keyboard(
                    messages::MSG_ASK_LIFESPAN,
                    lifespan_quick_picks(),
                )],
            ))
        }
        Command::TimeLeft => match (record.birth_date, record.expected_lifespan_years) {
            (None, _) => Ok(Transition::reply(Reply::menu(
                messages::complete_calculation_first(),
            ))),
            (Some(_), None) => Err(DialogError::MissingPrerequisite(format!(
                "birth date stored without lifespan for {}",
                record.username
            ))),
            (Some(birth_date), Some(years)) => Ok(Transition {
                persist: None,
                replies: report(birth_date, years, now)?,
            }),
        },
        Command::LifeCalendar => Ok(Transition::reply(Reply::menu(messages::MSG_LIFE_CALENDAR))),
    }
}

/// Breakdown reply, followed by the already-passed notice when the date is behind `now`.
fn report(birth_date: NaiveDate, lifespan_years: u32, now: NaiveDateTime) -> Result<Vec<Reply>> {
    let death = death_date(birth_date, lifespan_years).ok_or_else(|| {
        DialogError::Parse(format!(
            "{lifespan_years} years after {birth_date} is out of range"
        ))
    })?;
    let remaining = remaining_breakdown(death, now);

    let mut replies = vec![Reply::menu(messages::remaining_report(death, &remaining))];
    if remaining.is_negative() {
        replies.push(Reply::menu(messages::MSG_ALREADY_PASSED));
    }
    Ok(replies)
}
