use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The seven daily tasks of the challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    Diet,
    Water,
    Reading,
    Workout1,
    Workout2Outdoor,
    ProgressPhoto,
    NoAlcohol,
}

impl Task {
    pub const COUNT: usize = 7;

    pub fn all() -> [Task; Task::COUNT] {
        [
            Task::Diet,
            Task::Water,
            Task::Reading,
            Task::Workout1,
            Task::Workout2Outdoor,
            Task::ProgressPhoto,
            Task::NoAlcohol,
        ]
    }

    /// Column name in `daily_checkins`.
    pub fn column(&self) -> &'static str {
        match self {
            Task::Diet => "diet",
            Task::Water => "water",
            Task::Reading => "reading",
            Task::Workout1 => "workout1",
            Task::Workout2Outdoor => "workout2_outdoor",
            Task::ProgressPhoto => "progress_photo",
            Task::NoAlcohol => "no_alcohol",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Task::Diet => "Follow a healthy diet",
            Task::Water => "Drink 1 gallon of water",
            Task::Reading => "Read 10 pages",
            Task::Workout1 => "Workout #1 (45 min)",
            Task::Workout2Outdoor => "Workout #2 Outdoor (45 min)",
            Task::ProgressPhoto => "Take a progress photo",
            Task::NoAlcohol => "No alcohol",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Task::Diet => "No cheat meals",
            Task::Water => "Stay hydrated",
            Task::Reading => "Non-fiction book",
            Task::Workout1 => "Any workout",
            Task::Workout2Outdoor => "Must be outside",
            Task::ProgressPhoto => "Document your journey",
            Task::NoAlcohol => "Stay disciplined",
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Task {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "diet" => Ok(Task::Diet),
            "water" => Ok(Task::Water),
            "reading" | "read" => Ok(Task::Reading),
            "workout1" | "workout" => Ok(Task::Workout1),
            "workout2-outdoor" | "workout2" | "outdoor" => Ok(Task::Workout2Outdoor),
            "progress-photo" | "photo" => Ok(Task::ProgressPhoto),
            "no-alcohol" | "alcohol" => Ok(Task::NoAlcohol),
            _ => Err(anyhow::anyhow!("Unknown task: {}", s)),
        }
    }
}

/// One user's completion state for one calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinRecord {
    pub check_date: NaiveDate,
    pub diet: bool,
    pub water: bool,
    pub reading: bool,
    pub workout1: bool,
    pub workout2_outdoor: bool,
    pub progress_photo: bool,
    pub no_alcohol: bool,
}

impl CheckinRecord {
    /// A fresh record with every task still open.
    pub fn empty(check_date: NaiveDate) -> Self {
        Self {
            check_date,
            ..Default::default()
        }
    }

    pub fn get(&self, task: Task) -> bool {
        match task {
            Task::Diet => self.diet,
            Task::Water => self.water,
            Task::Reading => self.reading,
            Task::Workout1 => self.workout1,
            Task::Workout2Outdoor => self.workout2_outdoor,
            Task::ProgressPhoto => self.progress_photo,
            Task::NoAlcohol => self.no_alcohol,
        }
    }

    pub fn set(&mut self, task: Task, value: bool) {
        let flag = match task {
            Task::Diet => &mut self.diet,
            Task::Water => &mut self.water,
            Task::Reading => &mut self.reading,
            Task::Workout1 => &mut self.workout1,
            Task::Workout2Outdoor => &mut self.workout2_outdoor,
            Task::ProgressPhoto => &mut self.progress_photo,
            Task::NoAlcohol => &mut self.no_alcohol,
        };
        *flag = value;
    }

    /// A day counts only when all seven tasks are done.
    pub fn is_complete(&self) -> bool {
        self.diet
            && self.water
            && self.reading
            && self.workout1
            && self.workout2_outdoor
            && self.progress_photo
            && self.no_alcohol
    }

    pub fn completed_count(&self) -> usize {
        Task::all().iter().filter(|t| self.get(**t)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn empty_record_is_incomplete() {
        let rec = CheckinRecord::empty(date());
        assert!(!rec.is_complete());
        assert_eq!(rec.completed_count(), 0);
    }

    #[test]
    fn all_flags_make_a_complete_day() {
        let mut rec = CheckinRecord::empty(date());
        for task in Task::all() {
            assert!(!rec.is_complete());
            rec.set(task, true);
        }
        assert!(rec.is_complete());
        assert_eq!(rec.completed_count(), Task::COUNT);
    }

    #[test]
    fn set_touches_only_one_flag() {
        let mut rec = CheckinRecord::empty(date());
        rec.set(Task::Workout2Outdoor, true);
        assert!(rec.workout2_outdoor);
        assert_eq!(rec.completed_count(), 1);
        assert!(rec.get(Task::Workout2Outdoor));
        assert!(!rec.get(Task::Workout1));
    }

    #[test]
    fn parses_cli_task_names() {
        assert_eq!(Task::from_str("diet").unwrap(), Task::Diet);
        assert_eq!(Task::from_str("Workout2-Outdoor").unwrap(), Task::Workout2Outdoor);
        assert_eq!(Task::from_str("workout2_outdoor").unwrap(), Task::Workout2Outdoor);
        assert_eq!(Task::from_str("photo").unwrap(), Task::ProgressPhoto);
        assert_eq!(Task::from_str("no-alcohol").unwrap(), Task::NoAlcohol);
        assert!(Task::from_str("sleep").is_err());
    }

    #[test]
    fn columns_are_unique() {
        let mut cols: Vec<_> = Task::all().iter().map(|t| t.column()).collect();
        cols.sort();
        cols.dedup();
        assert_eq!(cols.len(), Task::COUNT);
    }
}
