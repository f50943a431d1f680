use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Meal Type")]
    pub meal_type: String,
    #[serde(rename = "Dish")]
    pub dish: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingItem {
    #[serde(rename = "Item")]
    pub item: String,
}

/// Whatever structure could be recovered from a model reply. May be partial or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedMenu {
    pub entries: Vec<MenuEntry>,
    pub shopping_list: Vec<ShoppingItem>,
}

impl ParsedMenu {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.shopping_list.is_empty()
    }
}

struct LinePatterns {
    entry: Regex,
    shopping: Regex,
}

impl LinePatterns {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            entry: Regex::new(r"^(\w+)\s+(\w+):\s*(.+)$")?,
            shopping: Regex::new(r"(?i)^shopping list:\s*(.+)$")?,
        })
    }
}

fn patterns() -> Option<&'static LinePatterns> {
    static PATTERNS: OnceLock<Option<LinePatterns>> = OnceLock::new();
    PATTERNS.get_or_init(|| LinePatterns::new().ok()).as_ref()
}

// Markdown decoration models like to add around otherwise well-formed lines.
fn strip_decoration(line: &str) -> String {
    let line = line.trim();
    let line = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .unwrap_or(line);
    line.replace("**", "").trim().to_string()
}

/// Best-effort, line-oriented extraction of `<Day> <MealType>: <Dish>` lines and
/// `Shopping List: a, b, c` lines. Never fails; unmatched lines are ignored.
pub fn parse_menu_reply(reply: &str) -> ParsedMenu {
    let mut parsed = ParsedMenu::default();
    let Some(patterns) = patterns() else {
        return parsed;
    };

    for raw_line in reply.lines() {
        let cleaned = strip_decoration(raw_line);
        let line = cleaned.as_str();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = patterns.shopping.captures(line) {
            parsed.shopping_list.extend(
                caps[1]
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| ShoppingItem {
                        item: item.to_string(),
                    }),
            );
            continue;
        }

        if let Some(caps) = patterns.entry.captures(line) {
            parsed.entries.push(MenuEntry {
                day: caps[1].to_string(),
                meal_type: caps[2].to_string(),
                dish: caps[3].trim().to_string(),
            });
        }
    }

    debug!(
        entries = parsed.entries.len(),
        shopping_items = parsed.shopping_list.len(),
        "parsed menu reply"
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, meal_type: &str, dish: &str) -> MenuEntry {
        MenuEntry {
            day: day.to_string(),
            meal_type: meal_type.to_string(),
            dish: dish.to_string(),
        }
    }

    fn items(parsed: &ParsedMenu) -> Vec<&str> {
        parsed.shopping_list.iter().map(|s| s.item.as_str()).collect()
    }

    #[test]
    fn test_parses_entry_and_shopping_list() {
        let parsed =
            parse_menu_reply("Monday Lunch: Pasta Primavera\nShopping List: tomatoes, basil, olive oil");
        assert_eq!(parsed.entries, vec![entry("Monday", "Lunch", "Pasta Primavera")]);
        assert_eq!(items(&parsed), vec!["tomatoes", "basil", "olive oil"]);
    }

    #[test]
    fn test_unstructured_reply_yields_nothing() {
        let parsed = parse_menu_reply("I'm sorry, I can't help with that.\n\nHave a nice day");
        assert!(parsed.is_empty());
        assert!(parse_menu_reply("").is_empty());
    }

    #[test]
    fn test_error_text_is_not_mistaken_for_a_menu() {
        let parsed = parse_menu_reply("API key not found in environment: OPENAI_API_KEY");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_keeps_order_and_skips_prose_and_table_rows() {
        let reply = "\
Here is your plan for the week!

| Date | Meal | Dish |
|------|------|------|
| Monday | Lunch | Lentil soup |

Monday Lunch: Lentil soup with carrots and celery
- Monday Dinner: Baked salmon, green beans
**Tuesday Lunch:** Chickpea salad
Shopping List: lentils, carrots,, celery , salmon
Enjoy your meals.";
        let parsed = parse_menu_reply(reply);
        assert_eq!(
            parsed.entries,
            vec![
                entry("Monday", "Lunch", "Lentil soup with carrots and celery"),
                entry("Monday", "Dinner", "Baked salmon, green beans"),
                entry("Tuesday", "Lunch", "Chickpea salad"),
            ]
        );
        assert_eq!(items(&parsed), vec!["lentils", "carrots", "celery", "salmon"]);
    }

    #[test]
    fn test_shopping_line_casing_does_not_leak_into_menu() {
        let parsed = parse_menu_reply(
            "Monday Dinner: Omelette\nShopping list: eggs, milk\nSHOPPING LIST: chives",
        );
        assert_eq!(parsed.entries, vec![entry("Monday", "Dinner", "Omelette")]);
        assert_eq!(items(&parsed), vec!["eggs", "milk", "chives"]);
    }

    #[test]
    fn test_multiple_shopping_lines_accumulate() {
        let parsed = parse_menu_reply("Shopping List: rice\nShopping List: beans, corn");
        assert!(parsed.entries.is_empty());
        assert_eq!(items(&parsed), vec!["rice", "beans", "corn"]);
    }
}
