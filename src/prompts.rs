//! Instruction texts sent to the chat model.
//!
//! Every builder here is a pure formatter: no I/O, inputs are only borrowed.

use crate::calories::{ActivityLevel, CalorieEstimate, UserProfile};
use crate::menu::MenuRequest;

pub const MULTIDAY_ALLOWED_RULE: &str = "The same dish may be served on two consecutive days, but only for the same meal type (lunch on both days or dinner on both days).";
pub const NO_CROSS_MEAL_RULE: &str = "Never serve a lunch dish as a dinner or a dinner dish as a lunch.";

pub fn build_recipe_prompt(target_calories: f64) -> String {
    format!(
        "You are a nutrition-aware cooking assistant.
My daily calorie target is {:.2} calories.
Suggest one breakfast, one lunch and one dinner recipe that together add up to about that target.
For each recipe give the title, the ingredients with quantities, short preparation steps and the approximate calories per serving.",
        target_calories
    )
}

/// Recipe request carrying the full profile block after the instruction.
///
/// `template` replaces the default instruction when the user supplies their own.
pub fn build_profile_recipe_prompt(
    template: Option<&str>,
    profile: &UserProfile,
    activity: ActivityLevel,
    estimate: &CalorieEstimate,
    additional_ingredients: Option<&str>,
) -> String {
    let mut prompt = match template {
        Some(text) => text.trim_end().to_string(),
        None => build_recipe_prompt(estimate.target_calories),
    };

    prompt.push_str(&format!(
        "\nGender: {}\nAge: {}\nWeight: {}kg\nHeight: {}cm\nBasal Metabolic Rate: {:.2}\nActivity: {}\nActivity Multiplier: {}\nNecessary Calories: {:.2}",
        profile.gender,
        profile.age,
        profile.weight_kg,
        profile.height_cm,
        estimate.basal_rate,
        activity.description(),
        estimate.multiplier,
        estimate.target_calories,
    ));

    if let Some(ingredients) = additional_ingredients.map(str::trim).filter(|s| !s.is_empty()) {
        prompt.push_str(&format!(
            "\nAdditional considerations are the following ingredients: {}",
            ingredients
        ));
    }
    prompt
}

pub fn build_menu_prompt(request: &MenuRequest) -> String {
    let days = join_names(request.days.iter().map(|d| d.name()));
    let meals = join_names(request.meal_types.iter().map(|m| m.name()));

    let mut lines = vec![
        format!(
            "Create a weekly menu and a shopping list for a household with a {} budget.",
            request.budget_tier
        ),
        format!("Only include these days: {}.", days),
        format!("Only plan these meals: {}.", meals),
        format!("The menu is for {} people.", request.people_count),
    ];

    if !request.prior_week_dishes.is_empty() {
        lines.push(format!(
            "Do not include these dishes, they were served last week: {}.",
            request.prior_week_dishes.join(", ")
        ));
    }

    let recurring = request.recurring_items.trim();
    if !recurring.is_empty() {
        lines.push(format!(
            "Always Buy: add these items to the shopping list every week: {}.",
            recurring
        ));
    }

    if request.multiday_allowed {
        lines.push(MULTIDAY_ALLOWED_RULE.to_string());
    }
    lines.push(NO_CROSS_MEAL_RULE.to_string());

    lines.push(format!(
        "Prefer ingredients that are in season in {}.",
        request.season
    ));
    lines.push(
        "Present the menu as a markdown table sorted by date, with a short explanation of each dish."
            .to_string(),
    );
    lines.push("Name the vegetables of each dish explicitly.".to_string());
    lines.push(format!(
        "Scale the shopping list quantities to {} people.",
        request.people_count
    ));
    lines.push(
        "After the table, repeat every meal on its own line as '<Day> <MealType>: <Dish>' (for example 'Monday Lunch: Pasta Primavera'), then finish with one line 'Shopping List: item, item, item'."
            .to_string(),
    );

    lines.join("\n")
}

pub fn build_feedback_prompt(current_menu: &str, feedback: &str) -> String {
    format!(
        "Here is the weekly menu you proposed:
{}

The user has the following feedback:
{}

Produce a refined version of the menu that takes the feedback into account and keeps every other constraint.
Keep the same format: the markdown table, one line per meal as '<Day> <MealType>: <Dish>', and a final 'Shopping List: item, item, item' line.",
        current_menu.trim(),
        feedback.trim()
    )
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calories::{estimate_calories, Gender};
    use crate::menu::tests::sample_request;
    use crate::menu::{BudgetTier, MealType, Weekday};

    #[test]
    fn test_recipe_prompt_names_target_and_meals() {
        let prompt = build_recipe_prompt(2553.01875);
        assert!(prompt.contains("2553.02 calories"));
        for meal in ["breakfast", "lunch", "dinner"] {
            assert!(prompt.contains(meal), "missing {}", meal);
        }
    }

    #[test]
    fn test_profile_prompt_appends_details() {
        let profile = UserProfile::new(Gender::Female, 25, 60, 165).unwrap();
        let estimate = estimate_calories(&profile, ActivityLevel::Sedentary);
        let prompt = build_profile_recipe_prompt(
            None,
            &profile,
            ActivityLevel::Sedentary,
            &estimate,
            Some(" zucchini, feta "),
        );
        assert!(prompt.contains("Gender: Female"));
        assert!(prompt.contains("Weight: 60kg"));
        assert!(prompt.contains("Height: 165cm"));
        assert!(prompt.contains("Activity Multiplier: 1.3"));
        assert!(prompt.contains("Necessary Calories: 1841.34"));
        assert!(prompt.ends_with("following ingredients: zucchini, feta"));
    }

    #[test]
    fn test_profile_prompt_uses_custom_template_and_skips_blank_ingredients() {
        let profile = UserProfile::new(Gender::Male, 30, 70, 175).unwrap();
        let estimate = estimate_calories(&profile, ActivityLevel::Moderate);
        let prompt = build_profile_recipe_prompt(
            Some("Give me vegetarian recipes only.\n\n"),
            &profile,
            ActivityLevel::Moderate,
            &estimate,
            Some("   "),
        );
        assert!(prompt.starts_with("Give me vegetarian recipes only.\nGender: Male"));
        assert!(!prompt.contains("Additional considerations"));
    }

    #[test]
    fn test_menu_prompt_contains_every_selection() {
        let mut request = sample_request();
        request.days = Weekday::ALL.into_iter().collect();
        request.people_count = 17;
        request.budget_tier = BudgetTier::High;
        let prompt = build_menu_prompt(&request);

        for day in Weekday::ALL {
            assert!(prompt.contains(day.name()), "missing {}", day);
        }
        for meal in [MealType::Lunch, MealType::Dinner] {
            assert!(prompt.contains(meal.name()));
        }
        assert!(prompt.contains("17"));
        assert!(prompt.contains("high"));
        assert!(prompt.contains("Only include these days: Monday, Tuesday, Wednesday"));
        assert!(prompt.contains("Lasagna"));
        assert!(prompt.contains("milk, eggs"));
        assert!(prompt.contains("autumn"));
        assert!(prompt.contains("markdown table sorted by date"));
    }

    #[test]
    fn test_multiday_rule_only_when_allowed() {
        let mut request = sample_request();
        let strict = build_menu_prompt(&request);
        assert!(!strict.contains(MULTIDAY_ALLOWED_RULE));
        assert!(strict.contains(NO_CROSS_MEAL_RULE));

        request.multiday_allowed = true;
        let relaxed = build_menu_prompt(&request);
        assert!(relaxed.contains(MULTIDAY_ALLOWED_RULE));
        assert!(relaxed.contains(NO_CROSS_MEAL_RULE));
    }

    #[test]
    fn test_menu_prompt_omits_empty_optional_sections() {
        let mut request = sample_request();
        request.prior_week_dishes.clear();
        request.recurring_items = "  ".to_string();
        let prompt = build_menu_prompt(&request);
        assert!(!prompt.contains("served last week"));
        assert!(!prompt.contains("Always Buy"));
    }

    #[test]
    fn test_feedback_prompt_embeds_menu_and_feedback() {
        let prompt = build_feedback_prompt("Monday Lunch: Soup\n", "  less soup please ");
        assert!(prompt.contains("Monday Lunch: Soup\n\nThe user"));
        assert!(prompt.contains("less soup please\n"));
        assert!(prompt.contains("Shopping List:"));
    }
}
