use std::collections::{BTreeSet, HashSet};

use wl_types::Item;

/// Columns forced to the front of an inferred view, in order.
pub const DEFAULT_LEAD: [&str; 4] = ["sym", "name", "price", "chg%"];

/// Build the final column list for a watchlist.
///
/// A non-empty `explicit` list is returned as given, minus repeated entries (first
/// occurrence wins); nothing is added to it.
///
/// Otherwise columns are inferred from `items`: the union of their field keys, plus
/// `sym` when any item has a non-empty symbol and `name` when any item has a display
/// name. When `sym` is present, whether added or found among the field keys, the view
/// starts with `sym`, `name`, `price`, `chg%`, followed by the
/// remaining keys in lexicographic order.
pub fn compute_columns<S: AsRef<str>>(explicit: &[S], items: &[Item]) -> Vec<String> {
    if !explicit.is_empty() {
        let mut seen = HashSet::with_capacity(explicit.len());
        return explicit
            .iter()
            .map(AsRef::as_ref)
            .filter(|c| seen.insert(*c))
            .map(str::to_string)
            .collect();
    }

    let mut discovered: BTreeSet<&str> = BTreeSet::new();
    let mut has_sym = false;
    for item in items {
        has_sym |= !item.symbol.is_empty();
        if item.display_name().is_some() {
            discovered.insert("name");
        }
        discovered.extend(item.fields.keys().map(String::as_str));
    }

    if !has_sym && !discovered.contains("sym") {
        return discovered.into_iter().map(str::to_string).collect();
    }

    let mut out: Vec<String> = DEFAULT_LEAD.iter().map(|c| (*c).to_string()).collect();
    out.extend(
        discovered
            .into_iter()
            .filter(|k| !DEFAULT_LEAD.contains(k))
            .map(str::to_string),
    );
    out
}
