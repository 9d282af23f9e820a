use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyEntry {
    pub food: &'static str,
    pub fahrenheit: u16,
    pub celsius: u16,
    pub note: &'static str,
}

impl fmt::Display for SafetyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}°F / {}°C", self.food, self.fahrenheit, self.celsius)?;
        if !self.note.is_empty() {
            write!(f, " ({})", self.note)?;
        }
        Ok(())
    }
}

/// Safe minimum internal temperatures for common foods (USDA)
pub const SAFETY_TABLE: &[SafetyEntry] = &[
    SafetyEntry {
        food: "Poultry (chicken, turkey, duck)",
        fahrenheit: 165,
        celsius: 74,
        note: "whole, pieces and ground",
    },
    SafetyEntry {
        food: "Ground meat (beef, pork, lamb, veal)",
        fahrenheit: 160,
        celsius: 71,
        note: "",
    },
    SafetyEntry {
        food: "Beef, pork, lamb and veal steaks, chops and roasts",
        fahrenheit: 145,
        celsius: 63,
        note: "rest for 3 minutes",
    },
    SafetyEntry {
        food: "Fresh ham",
        fahrenheit: 145,
        celsius: 63,
        note: "rest for 3 minutes",
    },
    SafetyEntry {
        food: "Precooked ham (reheating)",
        fahrenheit: 140,
        celsius: 60,
        note: "",
    },
    SafetyEntry {
        food: "Fish and shellfish",
        fahrenheit: 145,
        celsius: 63,
        note: "flesh opaque and flakes with a fork",
    },
    SafetyEntry {
        food: "Egg dishes",
        fahrenheit: 160,
        celsius: 71,
        note: "cook eggs until yolk and white are firm",
    },
    SafetyEntry {
        food: "Leftovers and casseroles",
        fahrenheit: 165,
        celsius: 74,
        note: "",
    },
];

/// Entries whose food name contains `query`, ignoring case
pub fn lookup(query: &str) -> Vec<&'static SafetyEntry> {
    let query = query.trim().to_lowercase();
    SAFETY_TABLE
        .iter()
        .filter(|entry| entry.food.to_lowercase().contains(&query))
        .collect()
}
