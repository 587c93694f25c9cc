// Character classification for the supported letter set
//
// The tokenizer and the case splitter only understand a fixed set of letters:
// basic Latin, the accented Latin letters used by German and French, and the
// Russian and Ukrainian Cyrillic alphabets. Everything else is treated as a
// word separator.

// ---------------------------------------------------------------------------
// Letter set
// ---------------------------------------------------------------------------

/// Accented Latin letters accepted in words, in upper/lower pairs where the
/// pair exists. `ß` has no single-character uppercase form.
const LATIN_EXTENDED: &[char] = &[
    '\u{00C4}', '\u{00E4}', // Ä ä
    '\u{00D6}', '\u{00F6}', // Ö ö
    '\u{00DC}', '\u{00FC}', // Ü ü
    '\u{00DF}', // ß
    '\u{00C0}', '\u{00E0}', // À à
    '\u{00C2}', '\u{00E2}', // Â â
    '\u{00C7}', '\u{00E7}', // Ç ç
    '\u{00C8}', '\u{00E8}', // È è
    '\u{00C9}', '\u{00E9}', // É é
    '\u{00CA}', '\u{00EA}', // Ê ê
    '\u{00CB}', '\u{00EB}', // Ë ë
    '\u{00CE}', '\u{00EE}', // Î î
    '\u{00CF}', '\u{00EF}', // Ï ï
    '\u{00D4}', '\u{00F4}', // Ô ô
    '\u{00D9}', '\u{00F9}', // Ù ù
    '\u{00DB}', '\u{00FB}', // Û û
];

/// Cyrillic letters outside the contiguous А-я block.
const CYRILLIC_EXTRA: &[char] = &[
    '\u{0401}', '\u{0451}', // Ё ё
    '\u{0490}', '\u{0491}', // Ґ ґ
    '\u{0404}', '\u{0454}', // Є є
    '\u{0406}', '\u{0456}', // І і
    '\u{0407}', '\u{0457}', // Ї ї
];

/// Characters that may join two letter runs inside a single word.
pub const JOINERS: &[char] = &['-', '\'', '_'];

/// Writing system of a letter in the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Latin,
    Cyrillic,
}

/// Returns the script of `c` if it belongs to the supported letter set.
pub fn script_of(c: char) -> Option<Script> {
    if c.is_ascii_alphabetic() || LATIN_EXTENDED.contains(&c) {
        return Some(Script::Latin);
    }
    if ('\u{0410}'..='\u{044F}').contains(&c) || CYRILLIC_EXTRA.contains(&c) {
        return Some(Script::Cyrillic);
    }
    None
}

/// Check whether `c` belongs to the supported letter set.
pub fn is_word_letter(c: char) -> bool {
    script_of(c).is_some()
}

/// Check whether `c` may join two letter runs (`-`, `'` or `_`).
pub fn is_joiner(c: char) -> bool {
    JOINERS.contains(&c)
}

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

/// Classification used by the case splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    LatinUpper,
    LatinLower,
    CyrillicUpper,
    CyrillicLower,
    Joiner,
    /// Anything outside the letter set and the joiners.
    Other,
}

impl CharClass {
    /// Script of the letter, or `None` for joiners and other characters.
    pub fn script(self) -> Option<Script> {
        match self {
            CharClass::LatinUpper | CharClass::LatinLower => Some(Script::Latin),
            CharClass::CyrillicUpper | CharClass::CyrillicLower => Some(Script::Cyrillic),
            CharClass::Joiner | CharClass::Other => None,
        }
    }

    pub fn is_upper(self) -> bool {
        matches!(self, CharClass::LatinUpper | CharClass::CyrillicUpper)
    }

    /// Caseless letters (`ß`) count as lowercase.
    pub fn is_lower(self) -> bool {
        matches!(self, CharClass::LatinLower | CharClass::CyrillicLower)
    }
}

/// Returns the class of a character.
pub fn char_class(c: char) -> CharClass {
    match script_of(c) {
        Some(Script::Latin) if is_upper(c) => CharClass::LatinUpper,
        Some(Script::Latin) => CharClass::LatinLower,
        Some(Script::Cyrillic) if is_upper(c) => CharClass::CyrillicUpper,
        Some(Script::Cyrillic) => CharClass::CyrillicLower,
        None if is_joiner(c) => CharClass::Joiner,
        None => CharClass::Other,
    }
}

// ---------------------------------------------------------------------------
// Simple case conversion
//
// The standard library's to_lowercase / to_uppercase produce iterators
// because some characters map to several characters. Words are compared
// character by character, so only the first character of the mapping is
// taken.
// ---------------------------------------------------------------------------

/// Convert a character to its simple lowercase equivalent.
pub fn simple_lower(c: char) -> char {
    let mut iter = c.to_lowercase();
    iter.next().unwrap_or(c)
}

/// Convert a character to its simple uppercase equivalent.
pub fn simple_upper(c: char) -> char {
    let mut iter = c.to_uppercase();
    iter.next().unwrap_or(c)
}

/// Check whether a character is an uppercase letter.
pub fn is_upper(c: char) -> bool {
    c != simple_lower(c)
}

/// Check whether a character is a lowercase letter.
///
/// `ß` uppercases to "SS", whose first character differs, so it is lowercase.
pub fn is_lower(c: char) -> bool {
    c != simple_upper(c)
}
