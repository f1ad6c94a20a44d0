use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    OneWeek,
    TwoWeeks,
    Unstoppable,
}

impl Milestone {
    pub fn for_streak(streak: u32) -> Option<Milestone> {
        match streak {
            s if s >= 30 => Some(Milestone::Unstoppable),
            s if s >= 14 => Some(Milestone::TwoWeeks),
            s if s >= 7 => Some(Milestone::OneWeek),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Milestone::OneWeek => "One week down! Momentum is building!",
            Milestone::TwoWeeks => "Two weeks strong! Keep pushing!",
            Milestone::Unstoppable => "UNSTOPPABLE! You're a machine!",
        }
    }
}

/// Everything the dashboard shows about overall progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub day_number: u32,
    pub days_remaining: u32,
    pub percent: u32,
    pub streak: u32,
    pub milestone: Option<Milestone>,
}

impl Default for ProgressSummary {
    fn default() -> Self {
        Self {
            day_number: 1,
            days_remaining: 74,
            percent: 1,
            streak: 0,
            milestone: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestone_thresholds() {
        assert_eq!(Milestone::for_streak(0), None);
        assert_eq!(Milestone::for_streak(6), None);
        assert_eq!(Milestone::for_streak(7), Some(Milestone::OneWeek));
        assert_eq!(Milestone::for_streak(13), Some(Milestone::OneWeek));
        assert_eq!(Milestone::for_streak(14), Some(Milestone::TwoWeeks));
        assert_eq!(Milestone::for_streak(29), Some(Milestone::TwoWeeks));
        assert_eq!(Milestone::for_streak(30), Some(Milestone::Unstoppable));
        assert_eq!(Milestone::for_streak(75), Some(Milestone::Unstoppable));
    }
}
