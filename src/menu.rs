use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// Declaration order is week order, so BTreeSet<Weekday> iterates Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
pub enum MealType {
    Lunch,
    Dinner,
}

impl MealType {
    pub fn name(self) -> &'static str {
        match self {
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Regular,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetTier::Low => f.write_str("low"),
            BudgetTier::Regular => f.write_str("regular"),
            BudgetTier::High => f.write_str("high"),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Winter => f.write_str("winter"),
            Season::Spring => f.write_str("spring"),
            Season::Summer => f.write_str("summer"),
            Season::Autumn => f.write_str("autumn"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRequest {
    pub days: BTreeSet<Weekday>,
    pub meal_types: BTreeSet<MealType>,
    pub people_count: u32,
    pub budget_tier: BudgetTier,
    /// Free text, typically comma separated ("milk, eggs, bread").
    pub recurring_items: String,
    pub multiday_allowed: bool,
    pub prior_week_dishes: Vec<String>,
    pub season: Season,
}

impl MenuRequest {
    pub const PEOPLE_RANGE: (u32, u32) = (1, 20);

    /// Rejects requests no menu could satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(anyhow!("Select at least one day"));
        }
        if self.meal_types.is_empty() {
            return Err(anyhow!("Select at least one meal type"));
        }
        let (min, max) = Self::PEOPLE_RANGE;
        if self.people_count < min || self.people_count > max {
            return Err(anyhow!(
                "people_count must be between {} and {}, got {}",
                min,
                max,
                self.people_count
            ));
        }
        Ok(())
    }
}
