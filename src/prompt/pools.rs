//! Static exemplar pools the composer samples from on every call.

use chrono::{Datelike, Months, NaiveDate};

use crate::rng::{RandomSource, sample};

pub const SENSORY_DETAILS: &[&str] = &[
    "the hum of a server rack in a closet that was never meant to hold one",
    "cold coffee on the desk by the second hour",
    "a whiteboard still covered in last quarter's arrows",
    "the click of a laptop closing at the end of a long call",
    "rain on the office window during a post-mortem",
    "the smell of a new notebook on the first day of a project",
    "a phone buzzing face-down with another alert",
    "sticky notes curling off a monitor bezel",
    "the quiet after a deploy finally goes green",
    "a printer jammed halfway through the only copy",
    "fluorescent light flickering over a conference table",
    "the weight of a binder nobody has opened in years",
];

pub const NAMED_TOOLS: &[&str] = &[
    "Google Search Console",
    "a plain spreadsheet",
    "Notion",
    "Figma",
    "GitHub Actions",
    "Trello",
    "Ahrefs",
    "Screaming Frog",
    "a kitchen timer",
    "Slack",
    "Postman",
    "Grafana",
];

pub const ANECDOTE_SEEDS: &[&str] = &[
    "a client who insisted on the opposite approach and was partly right",
    "the first attempt that failed in front of the whole team",
    "a shortcut that cost a full weekend later",
    "advice from a colleague that only made sense a year on",
    "a number that looked wrong and turned out to be the real story",
    "a tool that was abandoned, then quietly brought back",
];

/// Exemplars drawn for one composed prompt.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Exemplars {
    pub dates: Vec<String>,
    pub sensory_details: Vec<&'static str>,
    pub tools: Vec<&'static str>,
    pub anecdote: &'static str,
}

/// Month-year labels between one and eighteen months before `today`.
pub fn recent_dates(today: NaiveDate, count: usize, rng: &mut dyn RandomSource) -> Vec<String> {
    let offsets: Vec<u32> = (1..=18).collect();
    let mut picked = sample(rng, &offsets, count);
    picked.sort_unstable();
    picked
        .into_iter()
        .filter_map(|months| today.checked_sub_months(Months::new(months)))
        .map(|date| format!("{} {}", date.format("%B"), date.year()))
        .collect()
}

pub fn draw_exemplars(today: NaiveDate, rng: &mut dyn RandomSource) -> Exemplars {
    let dates = recent_dates(today, 2, rng);
    let sensory_details = sample(rng, SENSORY_DETAILS, 3);
    let tools = sample(rng, NAMED_TOOLS, 3);
    let anecdote = sample(rng, ANECDOTE_SEEDS, 1)
        .into_iter()
        .next()
        .unwrap_or(ANECDOTE_SEEDS[0]);
    Exemplars {
        dates,
        sensory_details,
        tools,
        anecdote,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[test]
    fn dates_are_in_the_past_and_ordered_newest_first() {
        let dates = recent_dates(today(), 2, &mut SeededRandom::from_seed(3));
        assert_eq!(dates.len(), 2);
        assert_ne!(dates[0], dates[1]);
        assert!(!dates.iter().any(|d| d == "March 2026"));
    }

    #[test]
    fn one_month_back_crosses_year_boundary() {
        let jan = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let mut rng = crate::rng::ForcedRandom::never();
        assert_eq!(recent_dates(jan, 1, &mut rng), vec!["December 2025".to_string()]);
    }

    #[test]
    fn exemplars_are_distinct_and_seeded() {
        let a = draw_exemplars(today(), &mut SeededRandom::from_seed(11));
        let b = draw_exemplars(today(), &mut SeededRandom::from_seed(11));
        assert_eq!(a, b);
        assert_eq!(a.sensory_details.len(), 3);
        let mut tools = a.tools.clone();
        tools.dedup();
        assert_eq!(tools.len(), 3);
    }
}
