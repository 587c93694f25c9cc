// Text encoding of the dictionary file
//
// The encoding is a static property of the host platform, never sniffed from
// the file content. Byte-order marks are not interpreted: a BOM decodes to
// U+FEFF and encodes back to the same bytes.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::{Encoding, UTF_8, UTF_16LE};

/// Encoding used to read and write the dictionary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
}

impl TextEncoding {
    /// UTF-16LE on Windows, where the system spelling dictionaries use it;
    /// UTF-8 everywhere else.
    pub fn for_platform() -> Self {
        if cfg!(windows) {
            TextEncoding::Utf16Le
        } else {
            TextEncoding::Utf8
        }
    }

    fn encoding(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Utf16Le => UTF_16LE,
        }
    }

    /// Label of the encoding, e.g. `"UTF-16LE"`.
    pub fn name(self) -> &'static str {
        self.encoding().name()
    }

    /// Decode `bytes`, or return `None` if they are malformed.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        self.encoding()
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(Cow::into_owned)
    }

    /// Encode `text`.
    ///
    /// `encoding_rs` only encodes into UTF-8 for the UTF-16 family, so the
    /// little-endian code units are produced here.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
