// Case type detection and conversion for whole words

use crate::character::{is_lower, is_upper, simple_lower, simple_upper};

/// Classification of character casing within a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseType {
    /// No letters found in the word (only digits, punctuation, etc.).
    NoLetters,
    /// All letters are lowercase: "parser".
    AllLower,
    /// First letter is uppercase, rest are lowercase: "Parser".
    FirstUpper,
    /// Mixed case that does not fit other patterns: "xmlParser".
    Complex,
    /// All letters are uppercase: "XML".
    AllUpper,
}

/// Detect the case pattern of a word.
///
/// Non-letter characters (digits, joiners) are ignored when determining the
/// case pattern.
pub fn detect_case(word: &str) -> CaseType {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return CaseType::NoLetters;
    };

    let mut first_uc = false;
    let mut rest_lc = true;
    let mut all_uc = true;
    let mut no_letters = true;

    if is_upper(first) {
        first_uc = true;
        no_letters = false;
    }
    if is_lower(first) {
        all_uc = false;
        no_letters = false;
    }

    for c in chars {
        if is_upper(c) {
            no_letters = false;
            rest_lc = false;
        }
        if is_lower(c) {
            all_uc = false;
            no_letters = false;
        }
    }

    if no_letters {
        return CaseType::NoLetters;
    }
    if all_uc {
        return CaseType::AllUpper;
    }
    if !rest_lc {
        return CaseType::Complex;
    }
    if first_uc {
        CaseType::FirstUpper
    } else {
        CaseType::AllLower
    }
}

/// Return a copy of `word` converted to the given case pattern.
///
/// - `NoLetters` / `Complex` -- the word is returned unchanged.
/// - `AllLower` -- every letter is lowercased.
/// - `AllUpper` -- every letter is uppercased.
/// - `FirstUpper` -- first character is uppercased, rest are lowercased.
pub fn with_case(word: &str, case_type: CaseType) -> String {
    match case_type {
        CaseType::NoLetters | CaseType::Complex => word.to_string(),
        CaseType::AllLower => word.chars().map(simple_lower).collect(),
        CaseType::AllUpper => word.chars().map(simple_upper).collect(),
        CaseType::FirstUpper => {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => std::iter::once(simple_upper(first))
                    .chain(chars.map(simple_lower))
                    .collect(),
                None => String::new(),
            }
        }
    }
}
