// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ISBN key normalization and checksum validation.

/// Strip separators and upper-case the check digit.
///
/// `"978-7-111-54742-6"` becomes `"9787111547426"`, `"0-306-40615-x"`
/// becomes `"030640615X"`. Characters other than digits, `x`/`X`, hyphens and
/// whitespace are kept so that validation can reject them.
pub fn normalize_isbn(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Validate a normalized ISBN-10 or ISBN-13.
pub fn is_valid_isbn(normalized: &str) -> bool {
    match normalized.len() {
        10 => is_valid_isbn10(normalized),
        13 => is_valid_isbn13(normalized),
        _ => false,
    }
}

fn is_valid_isbn10(s: &str) -> bool {
    let mut sum = 0u32;
    for (i, c) in s.chars().enumerate() {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'X' if i == 9 => 10,
            _ => return false,
        };
        sum += digit * (10 - i as u32);
    }
    sum % 11 == 0
}

fn is_valid_isbn13(s: &str) -> bool {
    let mut sum = 0u32;
    for (i, c) in s.chars().enumerate() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 0 { digit } else { digit * 3 };
    }
    sum % 10 == 0
}

#[cfg(test)]
#[path = "isbn_tests.rs"]
mod tests;
