//! User-facing texts.

use crate::commands::BEGIN_CALCULATION_CMD;
use crate::date_math::{format_date, RemainingTime};
use chrono::NaiveDate;

pub const MSG_HELP: &str = "I am a bot designed to remind you how precious every day of your life is!

Tell me your expected lifespan and your birth date (e.g. 01.01.1990), and I'll calculate how much time you might have left. This isn't about fear, it's about inspiration! Discover how much time you have to chase your dreams, achieve your goals, and make a mark on the world.

💡 Tap «👋 Start» to begin.";

pub const MSG_UNKNOWN_COMMAND: &str = "Unknown command 🤔";

pub const MSG_ASK_LIFESPAN: &str =
    "Please select your expected lifespan, or type any whole number of years.";

pub const MSG_ASK_BIRTHDAY: &str =
    "Got it! Now send me your birth date in the format DD.MM.YYYY, for example 14.09.2002";

pub const MSG_LIFE_CALENDAR: &str =
    "📅 The life calendar is still being drawn. Meanwhile, ask me how much time you have left.";

pub const MSG_ALREADY_PASSED: &str =
    "⚠️ This date is already behind you. Every day from now on is a bonus, so make it count!";

pub fn welcome() -> String {
    format!("👋 Hello! I'm Death-clock.\n\n{MSG_HELP}")
}

pub fn complete_calculation_first() -> String {
    format!("Please complete the calculation first: tap «{BEGIN_CALCULATION_CMD}».")
}

pub fn remaining_report(death_date: NaiveDate, remaining: &RemainingTime) -> String {
    format!(
        "⏳ Estimated date: {date}\n\n\
         Time left:\n\
         • {years} years and {months} months ({total_months} months)\n\
         • {weeks} weeks\n\
         • {days} days",
        date = format_date(death_date),
        years = remaining.years,
        months = remaining.months,
        total_months = remaining.total_months,
        weeks = remaining.weeks,
        days = remaining.days,
    )
}
