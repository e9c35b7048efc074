//! Time-of-day reasoning for meal suggestions.
//!
//! Everything here is deterministic given a [`ClockSnapshot`]; callers grab
//! one snapshot per operation so a turn that straddles an hour boundary
//! stays internally consistent.

use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike, Weekday};
use std::fmt;

/// Maximum number of suggestion strings returned to the UI.
pub const MAX_SUGGESTIONS: usize = 4;

/// Meal period derived from the hour of day.
///
/// The six buckets cover the full 24-hour cycle with no gaps or overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealPeriod {
    Breakfast,
    Brunch,
    Lunch,
    Snack,
    Dinner,
    LateNight,
}

impl MealPeriod {
    /// Current meal period for an hour in `0..24`.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=9 => MealPeriod::Breakfast,
            10..=11 => MealPeriod::Brunch,
            12..=14 => MealPeriod::Lunch,
            15..=16 => MealPeriod::Snack,
            17..=20 => MealPeriod::Dinner,
            _ => MealPeriod::LateNight,
        }
    }

    /// Forward-looking meal period used for advisory text.
    ///
    /// Advisory only: this is not the literal successor of
    /// [`MealPeriod::from_hour`] (late evening already points at tomorrow's
    /// breakfast).
    pub fn next_after(hour: u32) -> Self {
        match hour {
            0..=4 => MealPeriod::Breakfast,
            5..=11 => MealPeriod::Lunch,
            12..=16 => MealPeriod::Dinner,
            _ => MealPeriod::Breakfast,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealPeriod::Breakfast => "Breakfast",
            MealPeriod::Brunch => "Brunch",
            MealPeriod::Lunch => "Lunch",
            MealPeriod::Snack => "Snack",
            MealPeriod::Dinner => "Dinner",
            MealPeriod::LateNight => "Late Night Snack",
        }
    }
}

impl fmt::Display for MealPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekday / weekend split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Weekend => "Weekend",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time-of-day greeting.
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        17..=21 => "Good evening",
        _ => "Hello",
    }
}

/// A point-in-time reading of the local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSnapshot {
    pub hour: u32,
    pub minute: u32,
    pub weekday: Weekday,
    pub date: NaiveDate,
}

impl ClockSnapshot {
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn from_datetime(datetime: &DateTime<Local>) -> Self {
        Self {
            hour: datetime.hour(),
            minute: datetime.minute(),
            weekday: datetime.weekday(),
            date: datetime.date_naive(),
        }
    }

    pub fn meal_period(&self) -> MealPeriod {
        MealPeriod::from_hour(self.hour)
    }

    pub fn day_type(&self) -> DayType {
        DayType::from_weekday(self.weekday)
    }

    pub fn greeting(&self) -> &'static str {
        greeting(self.hour)
    }
}

/// Full weekday name for context text.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Hint sentence for a (meal period, day type) pair.
///
/// Pairs without a table entry (brunch on a weekday) get no hint.
fn period_hint(period: MealPeriod, day_type: DayType) -> Option<&'static str> {
    match (period, day_type) {
        (MealPeriod::Breakfast, _) => {
            Some("Users typically want quick, energizing breakfast ideas now")
        }
        (MealPeriod::Brunch, DayType::Weekend) => {
            Some("Weekend brunch time - users may want more elaborate, leisurely recipes")
        }
        (MealPeriod::Brunch, DayType::Weekday) => None,
        (MealPeriod::Lunch, DayType::Weekday) => {
            Some("Weekday lunch - users likely want quick, easy recipes")
        }
        (MealPeriod::Lunch, DayType::Weekend) => {
            Some("Weekend lunch - users have more time for cooking")
        }
        (MealPeriod::Snack, _) => Some("Afternoon snack time - users want light, quick options"),
        (MealPeriod::Dinner, DayType::Weekday) => {
            Some("Weekday dinner - balance convenience with nutrition")
        }
        (MealPeriod::Dinner, DayType::Weekend) => {
            Some("Weekend dinner - users may want special or longer recipes")
        }
        (MealPeriod::LateNight, _) => Some("Late night - suggest light, easy options if asked"),
    }
}

/// Render the fixed-format time context block injected into the prompt.
pub fn time_context_block(snapshot: &ClockSnapshot) -> String {
    let period = snapshot.meal_period();
    let day_type = snapshot.day_type();

    let mut block = format!(
        "CURRENT TIME CONTEXT:\n\
         - Current time: {:02}:{:02} ({})\n\
         - Day: {} ({})\n\
         - Current meal period: {}\n\
         - Next meal: {}",
        snapshot.hour,
        snapshot.minute,
        if snapshot.hour >= 12 { "PM" } else { "AM" },
        weekday_name(snapshot.weekday),
        day_type,
        period,
        MealPeriod::next_after(snapshot.hour),
    );

    if let Some(hint) = period_hint(period, day_type) {
        block.push_str("\n- ");
        block.push_str(hint);
    }

    block.push_str(&format!(
        "\n\nWhen suggesting recipes or meal ideas, prioritize options appropriate for {}.",
        period
    ));

    block
}

/// Time-appropriate suggested queries, capped at [`MAX_SUGGESTIONS`].
pub fn time_based_suggestions(
    period: MealPeriod,
    day_type: DayType,
    has_saved_recipes: bool,
    has_shopping_list: bool,
    has_meal_plan: bool,
) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();
    let mut push = |s: &str| suggestions.push(s.to_string());

    match period {
        MealPeriod::Breakfast => {
            push("What's a quick breakfast I can make?");
            push("Suggest a healthy breakfast");
            if day_type == DayType::Weekend {
                push("Give me a special weekend breakfast idea");
            }
        }
        MealPeriod::Brunch => {
            push("What's a good brunch recipe?");
            if day_type == DayType::Weekend {
                push("Suggest an impressive brunch dish");
            }
        }
        MealPeriod::Lunch => {
            if day_type == DayType::Weekday {
                push("What's a quick lunch idea?");
                push("Suggest a lunch I can make in 20 minutes");
            } else {
                push("What should I make for lunch?");
                push("Suggest a nice weekend lunch");
            }
        }
        MealPeriod::Snack => {
            push("What's a healthy snack I can make?");
            push("Suggest a quick afternoon pick-me-up");
        }
        MealPeriod::Dinner => {
            push("What should I cook for dinner tonight?");
            if day_type == DayType::Weekday {
                push("Give me an easy weeknight dinner idea");
            } else {
                push("Suggest a special dinner recipe");
            }
            if has_meal_plan {
                push("What's on my meal plan for tonight?");
            }
        }
        MealPeriod::LateNight => {
            push("What's a light late-night snack?");
            push("Suggest something easy to make now");
        }
    }

    if has_saved_recipes {
        push("What can I make from my saved recipes?");
    }
    if has_shopping_list {
        push("What recipes use my shopping list items?");
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
