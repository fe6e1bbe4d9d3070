//! Core category domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The color given to a new category unless the user picks another.
pub const DEFAULT_COLOR: &str = "#ff7b7b";

/// The colors offered as one-click swatches in the category form.
pub const PRESET_COLORS: [&str; 12] = [
    DEFAULT_COLOR,
    "#6fc2ff",
    "#ffd16f",
    "#bb6fff",
    "#6fffac",
    "#7bffce",
    "#cfcfcf",
    "#ff6b9d",
    "#ffa06b",
    "#a8e6cf",
    "#84b6f4",
    "#f39c12",
];

/// A validated, non-empty category name with surrounding whitespace removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyCategoryName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a category name without validation, e.g. for names read back
    /// from the database.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A CSS hex color in the canonical lowercase `#rrggbb` form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Color(String);

impl Color {
    /// Parse a hex color of the form `#rrggbb` or `#rgb`.
    ///
    /// The short form is expanded and the digits are lowercased, so "#ABC"
    /// becomes "#aabbcc".
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidColor] if `color` is not a hex color.
    pub fn new(color: &str) -> Result<Self, Error> {
        let trimmed = color.trim();
        let invalid = || Error::InvalidColor(trimmed.to_owned());

        let digits = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let digits = digits.to_ascii_lowercase();
        match digits.len() {
            6 => Ok(Self(format!("#{digits}"))),
            3 => {
                let expanded = digits
                    .chars()
                    .flat_map(|c| [c, c])
                    .collect::<String>();
                Ok(Self(format!("#{expanded}")))
            }
            _ => Err(invalid()),
        }
    }

    /// Create a color without validation, e.g. for colors read back from the database.
    pub fn new_unchecked(color: &str) -> Self {
        Self(color.to_owned())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(DEFAULT_COLOR.to_owned())
    }
}

impl AsRef<str> for Color {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = i64;

/// A named, colored label for transactions (e.g., 'Food', 'Salary').
///
/// Transactions refer to categories by name, so renaming a category leaves
/// existing transactions with the old name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub color: Color,
}

/// The id and name of a category, all the filter panel needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLabel {
    pub id: CategoryId,
    pub name: String,
}

impl From<&Category> for CategoryLabel {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.to_string(),
        }
    }
}

/// Form data for category creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
    pub color: String,
}


#[cfg(test)]
mod color_tests {
    use crate::{
        Error,
        category::{Color, PRESET_COLORS, domain::DEFAULT_COLOR},
    };

    #[test]
    fn accepts_long_form() {
        assert_eq!(Color::new("#6fc2ff").unwrap().as_ref(), "#6fc2ff");
    }

    #[test]
    fn lowercases_digits() {
        assert_eq!(Color::new("#FFD16F").unwrap().as_ref(), "#ffd16f");
    }

    #[test]
    fn expands_short_form() {
        assert_eq!(Color::new("#AbC").unwrap().as_ref(), "#aabbcc");
    }

    #[test]
    fn rejects_malformed_colors() {
        for color in ["", "ff7b7b", "#ff7b7", "#gggggg", "red", "#ff7b7b00", "#", "#ff 7b7"] {
            assert_eq!(
                Color::new(color),
                Err(Error::InvalidColor(color.trim().to_owned())),
                "want {color:?} to be rejected"
            );
        }
    }

    #[test]
    fn presets_are_valid_and_start_with_default() {
        assert_eq!(PRESET_COLORS[0], DEFAULT_COLOR);
        assert_eq!(Color::default().as_ref(), DEFAULT_COLOR);

        for color in PRESET_COLORS {
            assert_eq!(Color::new(color).unwrap().as_ref(), color);
        }
    }
}

#[cfg(test)]
mod category_label_tests {
    use crate::category::{Category, CategoryLabel, CategoryName, Color};

    #[test]
    fn label_keeps_id_and_name() {
        let category = Category {
            id: 7,
            name: CategoryName::new_unchecked("Eating Out"),
            color: Color::default(),
        };

        assert_eq!(
            CategoryLabel::from(&category),
            CategoryLabel {
                id: 7,
                name: "Eating Out".to_owned(),
            }
        );
    }
}
