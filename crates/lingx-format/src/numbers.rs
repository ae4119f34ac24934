//! Locale-aware number rendering

struct Separators {
    group: &'static str,
    decimal: &'static str,
}

fn separators(language: &str) -> Separators {
    match language {
        "de" | "es" | "it" | "nl" | "pt" | "da" => Separators {
            group: ".",
            decimal: ",",
        },
        "fr" | "fi" | "sv" | "nb" | "cs" | "pl" | "ru" => Separators {
            group: "\u{202f}",
            decimal: ",",
        },
        _ => Separators {
            group: ",",
            decimal: ".",
        },
    }
}

/// Group an unsigned digit string in threes from the right
fn group_digits(digits: &str, group: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push_str(group);
        }
        out.push(c);
    }
    out
}

fn render(language: &str, value: f64, min_fraction: usize, max_fraction: usize) -> String {
    let seps = separators(language);
    let negative = value.is_sign_negative() && value != 0.0;
    let rounded = format!("{:.*}", max_fraction, value.abs());

    let (int_part, fraction) = match rounded.split_once('.') {
        Some((i, f)) => (i, f),
        None => (rounded.as_str(), ""),
    };

    let mut fraction = fraction.trim_end_matches('0').to_string();
    while fraction.len() < min_fraction {
        fraction.push('0');
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, seps.group));
    if !fraction.is_empty() {
        out.push_str(seps.decimal);
        out.push_str(&fraction);
    }
    out
}

/// Grouped decimal with up to three fraction digits
pub fn format_decimal(language: &str, value: f64) -> String {
    render(language, value, 0, 3)
}

/// Rounded whole number with grouping
pub fn format_integer(language: &str, value: f64) -> String {
    render(language, value.round(), 0, 0)
}

/// Percentage: scaled by 100, rounded, suffixed per locale
pub fn format_percent(language: &str, value: f64) -> String {
    let body = render(language, value * 100.0, 0, 0);
    match language {
        "de" | "fr" | "es" | "fi" | "sv" | "cs" | "pl" | "ru" => format!("{}\u{a0}%", body),
        _ => format!("{}%", body),
    }
}

/// Currency amount with two fraction digits and the locale's default symbol
pub fn format_currency(language: &str, value: f64) -> String {
    let body = render(language, value, 2, 2);
    match language {
        "de" | "fr" | "es" | "it" | "nl" | "pt" | "fi" => format!("{}\u{a0}€", body),
        "ja" => format!("¥{}", render(language, value, 0, 0)),
        "gb" => format!("£{}", body),
        _ => format!("${}", body),
    }
}
