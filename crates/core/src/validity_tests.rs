// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

#[yare::parameterized(
    empty_cell        = { None,                            false },
    empty_string      = { Some(""),                        false },
    whitespace        = { Some("  \t"),                    false },
    skipped           = { Some("skipped: empty key"),      false },
    failed            = { Some("failed: retry limit exceeded"), false },
    error_upper       = { Some("ERROR: timeout"),          false },
    padded_failed     = { Some("   Failed"),               false },
    resolved          = { Some("K825.6"),                  true },
    padded_resolved   = { Some(" TP312 "),                 true },
    error_without_colon = { Some("Errors in typesetting"), true },
)]
fn unconstrained(value: Option<&str>, expected: bool) {
    assert_eq!(ValidityPredicate::new().is_valid(value), expected);
}

#[yare::parameterized(
    matches      = { "I247.5",  true },
    wrong_shape  = { "n/a",     false },
    lowercase    = { "i247.5",  false },
)]
fn shaped(value: &str, expected: bool) {
    let predicate = ValidityPredicate::with_pattern(r"^[A-Z][A-Z0-9.\-/]*$").unwrap();
    assert_eq!(predicate.is_valid(Some(value)), expected);
}

#[test]
fn invalid_pattern_is_rejected() {
    assert!(ValidityPredicate::with_pattern("(").is_err());
}

proptest! {
    #[test]
    fn placeholders_are_never_valid(prefix in "(skipped|failed|error:|SKIPPED|Failed|ERROR:)", rest in ".*") {
        let value = format!("{prefix}{rest}");
        prop_assert!(!ValidityPredicate::new().is_valid(Some(&value)));
    }

    #[test]
    fn alphanumeric_values_are_valid(value in "[A-Z][A-Z0-9]{0,12}") {
        prop_assume!(!is_placeholder(&value));
        prop_assert!(ValidityPredicate::new().is_valid(Some(&value)));
    }
}
