use url::Url;

use crate::catalog::Format;

/// Insert `,` every three digits into the integer part of a plain decimal string.
///
/// A leading `-` and any fractional part are preserved: `"-1234567.5"` becomes
/// `"-1,234,567.5"`.
#[must_use]
pub fn group_thousands(s: &str) -> String {
    let (sign, rest) = s.strip_prefix('-').map_or(("", s), |r| ("-", r));
    let (int, frac) = rest.split_once('.').map_or((rest, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer count with thousands separators; zero, negative or unparsable is absent.
#[must_use]
pub fn format_count(raw: &str) -> Option<String> {
    let v = parse_number(raw)?;
    if v <= 0.0 {
        return None;
    }
    Some(group_thousands(&format!("{:.0}", v.round())))
}

/// One decimal place with thousands separators.
#[must_use]
pub fn format_decimal1(v: f64) -> String {
    group_thousands(&format!("{v:.1}"))
}

/// Apply a catalog display format to an extracted value.
#[must_use]
pub fn apply(format: Format, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match format {
        Format::Text => Some(raw.to_string()),
        Format::Count => format_count(raw),
        Format::Decimal1 => parse_number(raw).map(format_decimal1),
    }
}

/// Bare host of a URL: no scheme, no `www.` prefix, no path.
///
/// Scheme-less input such as `example.com/ir` is accepted.
#[must_use]
pub fn host_only(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = Url::parse(raw)
        .ok()
        .filter(|u| u.host_str().is_some())
        .or_else(|| Url::parse(&format!("http://{raw}")).ok())?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    (!host.is_empty()).then(|| host.to_string())
}

/// Collapse whitespace runs to one space and trim the ends.
#[must_use]
pub fn normalize_space(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
