// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

/// Formats a number as an ECMAScript literal that reads back to the same `f64`.
pub fn number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Number.POSITIVE_INFINITY".to_string()
    } else if value == f64::NEG_INFINITY {
        "Number.NEGATIVE_INFINITY".to_string()
    } else {
        format!("{:?}", value)
    }
}

/// `[a, b, c, d]` or `undefined`.
pub fn number_array(values: Option<[f64; 4]>) -> String {
    match values {
        Some(values) => format!("[{}]", values.map(number).join(", ")),
        None => "undefined".to_string(),
    }
}
