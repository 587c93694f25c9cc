//! Case-aware compound word learning.
//!
//! Words that no spelling oracle recognizes are split according to the
//! configured naming conventions. When every piece is a correctly spelled
//! word, the compound is appended to the user's dictionary file, which is
//! shared with other processes and guarded by a FIFO lock.
//!
//! # Architecture
//!
//! - [`tokenizer`] -- candidate word extraction from document text
//! - [`splitter`] -- naming-convention aware word splitting
//! - [`store`] -- the synchronized dictionary file and its in-memory cache
//! - [`oracle`] -- per-language correctness oracles
//! - [`decision`] -- word classification and the learn-by-splitting rule
//! - [`config`] -- user settings
//! - [`session`] -- the context object tying the pieces together

pub mod config;
pub mod decision;
pub mod oracle;
pub mod session;
pub mod splitter;
pub mod store;
pub mod tokenizer;

pub use casespell_core::enums::{FormatStyle, Verdict};
