//! Two-level categorical filter selection.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::attr;

/// Attribute categories the dataset can be filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    /// Education level of the school
    Level,
    /// Public or private ownership
    Status,
}

impl FilterCategory {
    /// Attribute name this category filters on.
    pub fn attribute(&self) -> &'static str {
        match self {
            FilterCategory::Level => attr::LEVEL,
            FilterCategory::Status => attr::STATUS,
        }
    }

    /// Values a selection in this category may take, in menu order.
    pub fn legal_values(&self) -> &'static [&'static str] {
        match self {
            FilterCategory::Level => &["Secondary", "Primary"],
            FilterCategory::Status => &["Private", "Public"],
        }
    }

    /// Whether `value` is one of this category's legal values.
    pub fn accepts(&self, value: &str) -> bool {
        self.legal_values().contains(&value)
    }

    /// Get all categories in menu order.
    pub fn all() -> &'static [FilterCategory] {
        &[FilterCategory::Level, FilterCategory::Status]
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

impl FromStr for FilterCategory {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterCategory::all()
            .iter()
            .copied()
            .find(|c| c.attribute() == s)
            .ok_or_else(|| FilterError::UnknownCategory(s.to_string()))
    }
}

/// Errors raised while editing a filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The category name is not one of the fixed enumeration
    #[error("Unknown filter category '{0}'")]
    UnknownCategory(String),

    /// A value was chosen before a category
    #[error("Select a filter category first")]
    NoCategory,

    /// The value is not legal for the current category
    #[error("'{value}' is not a valid option for {category}")]
    IllegalValue {
        /// Category the value was offered for
        category: FilterCategory,
        /// The rejected value
        value: String,
    },
}

/// The `(category, value)` pair chosen in the filter controls.
///
/// Only complete once both halves are set. Changing the category always
/// drops the value, since the legal value set depends on the category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    category: Option<FilterCategory>,
    value: Option<String>,
}

impl FilterSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently chosen category.
    pub fn category(&self) -> Option<FilterCategory> {
        self.category
    }

    /// Currently chosen value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Options the value dropdown should offer (empty until a category is chosen).
    pub fn value_options(&self) -> &'static [&'static str] {
        self.category.map(|c| c.legal_values()).unwrap_or(&[])
    }

    /// Choose a category (or clear it), resetting the value.
    pub fn set_category(&mut self, category: Option<FilterCategory>) {
        self.category = category;
        self.value = None;
    }

    /// Choose a value; it must be legal for the current category.
    pub fn set_value(&mut self, value: &str) -> Result<(), FilterError> {
        let category = self.category.ok_or(FilterError::NoCategory)?;
        if !category.accepts(value) {
            return Err(FilterError::IllegalValue {
                category,
                value: value.to_string(),
            });
        }
        self.value = Some(value.to_string());
        Ok(())
    }

    /// Both halves, if the selection is complete.
    pub fn complete(&self) -> Option<(FilterCategory, &str)> {
        match (self.category, self.value.as_deref()) {
            (Some(category), Some(value)) if !value.is_empty() => Some((category, value)),
            _ => None,
        }
    }

    /// Whether both halves are set and "Run Filter" may be invoked.
    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }

    /// Clear both halves.
    pub fn clear(&mut self) {
        self.category = None;
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("LEVEL".parse::<FilterCategory>(), Ok(FilterCategory::Level));
        assert_eq!("STATUS".parse::<FilterCategory>(), Ok(FilterCategory::Status));
        assert_eq!(
            "level".parse::<FilterCategory>(),
            Err(FilterError::UnknownCategory("level".to_string()))
        );
    }

    #[test]
    fn test_value_requires_category() {
        let mut selection = FilterSelection::new();
        assert_eq!(selection.set_value("Primary"), Err(FilterError::NoCategory));
        assert!(selection.value_options().is_empty());
    }

    #[test]
    fn test_value_must_be_legal_for_category() {
        let mut selection = FilterSelection::new();
        selection.set_category(Some(FilterCategory::Status));

        assert!(matches!(
            selection.set_value("Primary"),
            Err(FilterError::IllegalValue { .. })
        ));
        assert!(selection.set_value("Public").is_ok());
        assert_eq!(
            selection.complete(),
            Some((FilterCategory::Status, "Public"))
        );
    }

    #[test]
    fn test_changing_category_resets_value() {
        let mut selection = FilterSelection::new();
        selection.set_category(Some(FilterCategory::Level));
        selection.set_value("Primary").unwrap();
        assert!(selection.is_complete());

        selection.set_category(Some(FilterCategory::Status));
        assert_eq!(selection.value(), None);
        assert!(!selection.is_complete());
        assert_eq!(selection.value_options(), &["Private", "Public"]);
    }
}
