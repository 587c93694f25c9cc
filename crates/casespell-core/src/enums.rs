// Shared enums: FormatStyle, Verdict

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Naming convention used to split compound identifiers into sub-words.
///
/// Serialized with the convention's own spelling, so a settings file lists
/// `"camelCase"`, `"snake_case"` and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatStyle {
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,
}

impl FormatStyle {
    /// Every style, in declaration order.
    pub const ALL: [FormatStyle; 5] = [
        FormatStyle::CamelCase,
        FormatStyle::PascalCase,
        FormatStyle::SnakeCase,
        FormatStyle::KebabCase,
        FormatStyle::ScreamingSnakeCase,
    ];

    /// The convention's own spelling, e.g. `"kebab-case"`.
    pub fn name(self) -> &'static str {
        match self {
            FormatStyle::CamelCase => "camelCase",
            FormatStyle::PascalCase => "PascalCase",
            FormatStyle::SnakeCase => "snake_case",
            FormatStyle::KebabCase => "kebab-case",
            FormatStyle::ScreamingSnakeCase => "SCREAMING_SNAKE_CASE",
        }
    }
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known [`FormatStyle`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format style: {0}")]
pub struct UnknownFormatStyle(pub String);

impl FromStr for FormatStyle {
    type Err = UnknownFormatStyle;

    /// Accepts the convention's spelling (`"snake_case"`) as well as the
    /// lowercase variant name with separators removed (`"snakecase"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(style) = FormatStyle::ALL.into_iter().find(|st| st.name() == trimmed) {
            return Ok(style);
        }
        let folded: String = trimmed
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "camel" | "camelcase" => Ok(FormatStyle::CamelCase),
            "pascal" | "pascalcase" => Ok(FormatStyle::PascalCase),
            "snake" | "snakecase" => Ok(FormatStyle::SnakeCase),
            "kebab" | "kebabcase" => Ok(FormatStyle::KebabCase),
            "screaming" | "screamingsnake" | "screamingsnakecase" => {
                Ok(FormatStyle::ScreamingSnakeCase)
            }
            _ => Err(UnknownFormatStyle(trimmed.to_string())),
        }
    }
}

/// Outcome of classifying one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The word is in the user dictionary.
    Known,
    /// At least one oracle accepts the word, or no oracle is loaded.
    Correct,
    /// The word splits under this style into sub-words that are all correct.
    Learnable(FormatStyle),
    /// No oracle accepts the word and no configured style explains it.
    Misspelled,
}

impl Verdict {
    /// Whether the word should stay flagged for the user.
    pub fn is_misspelled(self) -> bool {
        self == Verdict::Misspelled
    }
}
