//! Command vocabulary: slash commands and the main menu button labels.

use dclock_core::ReplyKeyboard;

pub const HELP_CMD: &str = "/help";
pub const START_CMD: &str = "/start";
pub const BEGIN_CALCULATION_CMD: &str = "👋 Start";
pub const TIME_LEFT_CMD: &str = "🕘 How much time do i have left?";
pub const OPEN_NOTEBOOK_CMD: &str = "📖 Open my notebook";
pub const LIFE_CALENDAR_CMD: &str = "📅 Life calendar";

/// Suggested lifespans offered as quick replies.
pub const LIFESPAN_QUICK_PICKS: [u32; 4] = [60, 70, 80, 90];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Start,
    BeginCalculation,
    TimeLeft,
    OpenNotebook,
    LifeCalendar,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Help,
        Command::Start,
        Command::BeginCalculation,
        Command::TimeLeft,
        Command::OpenNotebook,
        Command::LifeCalendar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Command::Help => HELP_CMD,
            Command::Start => START_CMD,
            Command::BeginCalculation => BEGIN_CALCULATION_CMD,
            Command::TimeLeft => TIME_LEFT_CMD,
            Command::OpenNotebook => OPEN_NOTEBOOK_CMD,
            Command::LifeCalendar => LIFE_CALENDAR_CMD,
        }
    }

    /// Exact label match; callers trim first.
    pub fn from_label(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.label() == text)
    }
}

/// The persistent 2x2 menu shown with most replies.
pub fn main_menu() -> ReplyKeyboard {
    ReplyKeyboard::new([
        [BEGIN_CALCULATION_CMD, TIME_LEFT_CMD],
        [OPEN_NOTEBOOK_CMD, LIFE_CALENDAR_CMD],
    ])
}

/// Lifespan suggestions, two per row.
pub fn lifespan_quick_picks() -> ReplyKeyboard {
    ReplyKeyboard::new(
        LIFESPAN_QUICK_PICKS
            .chunks(2)
            .map(|row| row.iter().map(|years| years.to_string()).collect::<Vec<_>>()),
    )
}
