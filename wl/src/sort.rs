use std::cmp::Ordering;

use wl_types::FieldValue;

/// Comparison key of one row under a single-column sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SortKey {
    display: String,
    folded: String,
    num: Option<f64>,
    missing: bool,
}

impl SortKey {
    /// Key for a displayed value.
    ///
    /// The numeric part comes from `raw` when given, else from the display text, else
    /// from the item's own field for the column. A blank display is missing regardless.
    pub(crate) fn new(display: String, raw: Option<f64>, field: Option<&FieldValue>) -> Self {
        if display.trim().is_empty() {
            return Self {
                display,
                missing: true,
                ..Self::default()
            };
        }
        let num = raw
            .or_else(|| parse_formatted_number(&display))
            .or_else(|| {
                field.and_then(|f| f.as_f64().or_else(|| parse_formatted_number(&f.to_string())))
            });
        Self {
            folded: display.to_lowercase(),
            display,
            num,
            missing: false,
        }
    }
}

/// Parse a display number such as `$1,234.56`, `-3.4%`, `(5.6)` or `2.95T`.
///
/// Everything except digits, signs, the decimal point, `%` and a K/M/B/T suffix is
/// dropped. Parentheses negate; percentages stay in percent units.
pub(crate) fn parse_formatted_number(s: &str) -> Option<f64> {
    let mut t = s.trim();
    let mut negate = false;
    if let Some(inner) = t.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        negate = true;
        t = inner.trim();
    }

    let cleaned: String = t
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | '%') || is_suffix(*c))
        .collect();
    let mut u = cleaned.strip_suffix('%').unwrap_or(&cleaned);

    let mut mult = 1.0;
    if let Some(last) = u.chars().last().filter(|c| is_suffix(*c)) {
        mult = match last.to_ascii_uppercase() {
            'K' => 1e3,
            'M' => 1e6,
            'B' => 1e9,
            _ => 1e12,
        };
        u = &u[..u.len() - 1];
    }

    let v: f64 = u.parse().ok()?;
    let v = if negate { -v } else { v };
    Some(v * mult)
}

const fn is_suffix(c: char) -> bool {
    matches!(c, 'K' | 'M' | 'B' | 'T' | 'k' | 'm' | 'b' | 't')
}

/// Stable sort of rows by their keys; rows without a key count as missing.
///
/// Missing values always go last. The column compares numerically when every present
/// key is numeric, otherwise by case-insensitive text; ties fall back to the exact
/// display text. `descending` flips the order of present values only.
pub(crate) fn sort_rows<T>(rows: &mut [(T, Option<SortKey>)], descending: bool) {
    let numeric = rows
        .iter()
        .filter_map(|(_, k)| k.as_ref())
        .filter(|k| !k.missing)
        .all(|k| k.num.is_some());
    rows.sort_by(|(_, a), (_, b)| compare(a.as_ref(), b.as_ref(), numeric, descending));
}

fn compare(a: Option<&SortKey>, b: Option<&SortKey>, numeric: bool, descending: bool) -> Ordering {
    let a = a.filter(|k| !k.missing);
    let b = b.filter(|k| !k.missing);
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let primary = match (numeric, a.num, b.num) {
                (true, Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.folded.cmp(&b.folded),
            };
            let ord = primary.then_with(|| a.display.cmp(&b.display));
            if descending { ord.reverse() } else { ord }
        }
    }
}
