//! Character reference decoding for text runs.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CHARACTER_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);")
        .expect("valid character reference pattern")
});

/// Decodes the character references Etherpad emits. Unknown names are kept verbatim.
pub fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    CHARACTER_REFERENCE.replace_all(raw, |caps: &Captures<'_>| {
        let reference = &caps[1];
        resolve(reference).map_or_else(|| caps[0].to_string(), String::from)
    })
}

fn resolve(reference: &str) -> Option<char> {
    if let Some(hex) = reference
        .strip_prefix("#x")
        .or_else(|| reference.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }

    if let Some(decimal) = reference.strip_prefix('#') {
        return decimal.parse().ok().and_then(char::from_u32);
    }

    match reference {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}
