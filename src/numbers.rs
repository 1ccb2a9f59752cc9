pub fn min_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first < second {
        first
    } else {
        second
    }
}

pub fn max_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first > second {
        first
    } else {
        second
    }
}

/// Rounds half-way cases towards positive infinity, so -2.5 becomes -2 and 2.5 becomes 3.
pub fn round_half_towards_positive(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds to the nearest multiple of `step`, with half-way cases going towards positive infinity.
pub fn round_to_nearest_multiple(value: f64, step: f64) -> f64 {
    round_half_towards_positive(value / step) * step
}

/// Formats an integer with French digit grouping (a narrow no-break space between each group of
/// three digits), e.g. 1460 -> "1 460".
pub fn format_grouped_fr(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(digit);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
