use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    pub age: u32,
    pub weight_kg: u32,
    pub height_cm: u32,
}

impl UserProfile {
    pub const AGE_RANGE: (u32, u32) = (1, 100);
    pub const WEIGHT_RANGE: (u32, u32) = (1, 200);
    pub const HEIGHT_RANGE: (u32, u32) = (100, 220);

    pub fn new(gender: Gender, age: u32, weight_kg: u32, height_cm: u32) -> Result<Self> {
        check_range("age", age, Self::AGE_RANGE)?;
        check_range("weight_kg", weight_kg, Self::WEIGHT_RANGE)?;
        check_range("height_cm", height_cm, Self::HEIGHT_RANGE)?;
        Ok(Self {
            gender,
            age,
            weight_kg,
            height_cm,
        })
    }
}

fn check_range(field: &str, value: u32, (min, max): (u32, u32)) -> Result<()> {
    if value < min || value > max {
        return Err(anyhow!("{} must be between {} and {}, got {}", field, min, max, value));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.3,
            ActivityLevel::Moderate => 1.5,
            ActivityLevel::Active => 1.7,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    /// The sentence a user picks from when describing their routine.
    pub fn description(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => {
                "Little activity, I prefer to rest in my free time or do a hobby at home"
            }
            ActivityLevel::Moderate => {
                "I sit most of the time during work, but I do go to the gym 3-4 times a week"
            }
            ActivityLevel::Active => {
                "My workday is relatively active and I train almost everyday or at least 5 times 1 hour or more"
            }
            ActivityLevel::VeryActive => {
                "My work is active and I go once or multiple times a day to the gym"
            }
        }
    }

    pub fn from_description(description: &str) -> Option<Self> {
        let description = description.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.description() == description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalorieEstimate {
    pub basal_rate: f64,
    pub multiplier: f64,
    pub target_calories: f64,
}

/// Harris-Benedict basal rate scaled by the activity multiplier.
pub fn estimate_calories(profile: &UserProfile, activity: ActivityLevel) -> CalorieEstimate {
    let weight = f64::from(profile.weight_kg);
    let height = f64::from(profile.height_cm);
    let age = f64::from(profile.age);

    let basal_rate = match profile.gender {
        Gender::Male => 66.4730 + 13.7516 * weight + 5.0033 * height - 6.7550 * age,
        Gender::Female => 655.0955 + 9.5634 * weight + 1.8449 * height - 4.6756 * age,
    };
    let multiplier = activity.multiplier();

    CalorieEstimate {
        basal_rate,
        multiplier,
        target_calories: basal_rate * multiplier,
    }
}
