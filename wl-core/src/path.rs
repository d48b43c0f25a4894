use serde_json::Value;

/// Terminal segment yielding the length of the array it follows.
pub const LEN_SEGMENT: &str = "#";

/// Extract a display string from `root` following a dotted `path`.
///
/// `path` may hold several alternatives separated by `|`; the first alternative that
/// yields a non-empty value wins. Strings are trimmed, numbers and booleans are
/// stringified, and anything else (null, object, array) counts as absent.
#[must_use]
pub fn extract(root: &Value, path: &str) -> Option<String> {
    path.split('|')
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .find_map(|alt| extract_one(root, alt))
}

fn extract_one(root: &Value, path: &str) -> Option<String> {
    if let Some(prefix) = path.strip_suffix(LEN_SEGMENT) {
        let prefix = prefix.strip_suffix('.').unwrap_or(prefix);
        let node = if prefix.is_empty() { root } else { lookup(root, prefix)? };
        return node.as_array().map(|a| a.len().to_string());
    }
    lookup(root, path).and_then(scalar_text)
}

/// Stringify a scalar leaf; `None` for null, containers and blank text.
#[must_use]
pub fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Walk a single dotted path (no alternatives) and return the node it names.
#[must_use]
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |cur, seg| match cur {
        Value::Object(map) => map.get(seg),
        Value::Array(items) => items.get(seg.parse::<usize>().ok()?),
        _ => None,
    })
}
