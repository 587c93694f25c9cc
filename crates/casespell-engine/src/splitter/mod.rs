// Naming-convention aware word splitting
//
// Every function returns the input unchanged as a one-element vector when it
// finds no boundary of its kind. A non-empty word never yields an empty segment.

use casespell_core::character::{CharClass, char_class};
use casespell_core::enums::FormatStyle;

/// Split `word` according to `style`.
pub fn split(word: &str, style: FormatStyle) -> Vec<&str> {
    match style {
        FormatStyle::CamelCase => split_camel_case(word),
        FormatStyle::PascalCase => split_pascal_case(word),
        FormatStyle::SnakeCase => split_snake_case(word),
        FormatStyle::KebabCase => split_kebab_case(word),
        FormatStyle::ScreamingSnakeCase => split_screaming_snake_case(word),
    }
}

// ============================================================================
// Separator-based styles
// ============================================================================

/// Split on `sep`, dropping empty segments.
fn split_on(word: &str, sep: char) -> Vec<&str> {
    let parts: Vec<&str> = word.split(sep).filter(|p| !p.is_empty()).collect();
    if parts.len() > 1 { parts } else { vec![word] }
}

/// `user_name` -> `user`, `name`
pub fn split_snake_case(word: &str) -> Vec<&str> {
    split_on(word, '_')
}

/// `MAX_VALUE` -> `MAX`, `VALUE`
pub fn split_screaming_snake_case(word: &str) -> Vec<&str> {
    split_on(word, '_')
}

/// `user-name` -> `user`, `name`
pub fn split_kebab_case(word: &str) -> Vec<&str> {
    split_on(word, '-')
}

// ============================================================================
// Case transition styles
// ============================================================================

/// Whether a segment boundary lies between `prev` and `cur`.
///
/// `next` is the class of the character after `cur`, if any.
fn is_case_boundary(prev: CharClass, cur: CharClass, next: Option<CharClass>) -> bool {
    let (Some(prev_script), Some(cur_script)) = (prev.script(), cur.script()) else {
        return false;
    };
    if prev_script != cur_script {
        return true;
    }
    if prev.is_lower() && cur.is_upper() {
        return true;
    }
    // Keep acronyms together: the last capital of a run starts the next word
    // when a lowercase letter of the same script follows it.
    prev.is_upper()
        && cur.is_upper()
        && next.is_some_and(|n| n.is_lower() && n.script() == Some(cur_script))
}

/// Byte offsets at which `word` splits by case transitions.
fn case_boundaries(word: &str) -> Vec<usize> {
    let chars: Vec<(usize, CharClass)> = word
        .char_indices()
        .map(|(offset, c)| (offset, char_class(c)))
        .collect();

    (1..chars.len())
        .filter(|&i| {
            let next = chars.get(i + 1).map(|&(_, class)| class);
            is_case_boundary(chars[i - 1].1, chars[i].1, next)
        })
        .map(|i| chars[i].0)
        .collect()
}

fn split_at_case_boundaries(word: &str) -> Vec<&str> {
    let boundaries = case_boundaries(word);
    if boundaries.is_empty() {
        return vec![word];
    }

    let mut parts = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0;
    for end in boundaries {
        parts.push(&word[start..end]);
        start = end;
    }
    parts.push(&word[start..]);
    parts
}

/// `getUserID` -> `get`, `User`, `ID`
pub fn split_camel_case(word: &str) -> Vec<&str> {
    split_at_case_boundaries(word)
}

/// `XMLHttpRequest` -> `XML`, `Http`, `Request`
pub fn split_pascal_case(word: &str) -> Vec<&str> {
    split_at_case_boundaries(word)
}
