use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

/// Tried in order; the first encoding that accepts the bytes wins.
pub const DECODE_ORDER: [TextEncoding; 2] = [TextEncoding::Utf8, TextEncoding::Latin1];

#[derive(Debug, Clone)]
pub struct Decoded {
    pub text: String,
    pub encoding: TextEncoding,
}

impl TextEncoding {
    pub fn try_decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            TextEncoding::Latin1 => Some(latin1(bytes)),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => f.write_str("utf-8"),
            TextEncoding::Latin1 => f.write_str("latin-1"),
        }
    }
}

// Every byte is a code point in U+0000..=U+00FF.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

pub fn decode(bytes: &[u8]) -> Decoded {
    DECODE_ORDER
        .iter()
        .find_map(|&encoding| {
            encoding
                .try_decode(bytes)
                .map(|text| Decoded { text, encoding })
        })
        .unwrap_or_else(|| Decoded {
            text: latin1(bytes),
            encoding: TextEncoding::Latin1,
        })
}
