//! Shared types for the casespell workspace.
//!
//! - [`character`] -- the fixed Latin/Cyrillic letter set and per-character classes
//! - [`case`] -- case pattern detection and conversion for whole words
//! - [`enums`] -- naming conventions and classification verdicts
//! - [`token`] -- word tokens produced by the tokenizer

pub mod case;
pub mod character;
pub mod enums;
pub mod token;
