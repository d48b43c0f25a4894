use serde_json::Value;

use wl_types::{Fundamentals, Module, Need, Officer, Quote, WlError};

use crate::catalog::{ColumnDef, Extract};
use crate::format::{self, normalize_space};
use crate::path;
use crate::service::Enrichment;

/// Title fragments (lower-case) identifying the chief executive in an officer roster.
const CEO_TITLES: [&str; 3] = ["ceo", "president", "representative director"];

/// Decode one raw quoteSummary result object into a quote and fundamentals.
///
/// `payload` holds one member per upstream module (`price`, `assetProfile`, ...). Only
/// the sections of the modules covered by `need` are kept, so the result never
/// carries data the caller did not ask for. A missing `price` member fails with
/// `NoPriceData`.
pub fn decode(symbol: &str, need: Need, payload: &Value) -> Result<Enrichment, WlError> {
    let price = payload
        .get(Module::Price.upstream())
        .filter(|v| v.is_object())
        .ok_or_else(|| WlError::no_price_data(symbol))?;

    let quote = decode_quote(price);

    let mut fundamentals = Fundamentals::default();
    for upstream in need.upstream_modules() {
        if let Some(section) = payload.get(upstream) {
            fundamentals.insert_section(upstream, section.clone());
        }
    }

    if need.contains(Need::ASSET_PROFILE)
        && let Some(roster) = payload
            .get(Module::AssetProfile.upstream())
            .and_then(|ap| ap.get("companyOfficers"))
            .and_then(Value::as_array)
    {
        let officers: Vec<Officer> = roster.iter().map(decode_officer).collect();
        fundamentals.ceo = pick_ceo(&officers).cloned();
        fundamentals.avg_officer_age = average_age(&officers);
    }

    Ok((quote, fundamentals))
}

/// Display value of a path column read from the sections in `fundamentals`.
///
/// `None` when the column is not path-extracted or yields nothing after formatting.
#[must_use]
pub fn column_value(def: &ColumnDef, fundamentals: &Fundamentals) -> Option<String> {
    let Extract::Path(p) = &def.extract else {
        return None;
    };
    path::extract(fundamentals.raw(), p).and_then(|raw| format::apply(def.format, &raw))
}

fn decode_quote(price: &Value) -> Quote {
    let mut quote = Quote::default();

    let p = price.get("regularMarketPrice");
    quote.price = p
        .and_then(|v| path::lookup(v, "fmt"))
        .and_then(path::scalar_text)
        .or_else(|| raw_f64(p).map(|raw| format!("{raw:.2}")))
        .unwrap_or_default();

    let cp = price.get("regularMarketChangePercent");
    quote.change_raw = raw_f64(cp);
    quote.change_pct = cp
        .and_then(|v| path::lookup(v, "fmt"))
        .and_then(path::scalar_text)
        .or_else(|| quote.change_raw.map(|raw| format!("{raw:.2}%")))
        .unwrap_or_default();

    quote.name = path::extract(price, "shortName|longName").unwrap_or_default();
    quote
}

/// Raw numeric value of an upstream `{raw, fmt}` pair, or of a bare number.
fn raw_f64(v: Option<&Value>) -> Option<f64> {
    let v = v?;
    v.get("raw").and_then(Value::as_f64).or_else(|| v.as_f64())
}

fn decode_officer(v: &Value) -> Officer {
    let text = |key: &str| {
        v.get(key)
            .and_then(Value::as_str)
            .map(normalize_space)
            .unwrap_or_default()
    };
    Officer {
        name: text("name"),
        title: text("title"),
        age: v
            .get("age")
            .and_then(Value::as_u64)
            .and_then(|a| u32::try_from(a).ok()),
    }
}

/// First officer whose title names the chief executive, else the first listed.
#[must_use]
pub fn pick_ceo(officers: &[Officer]) -> Option<&Officer> {
    officers
        .iter()
        .find(|o| {
            let title = o.title.to_lowercase();
            CEO_TITLES.iter().any(|kw| title.contains(kw))
        })
        .or_else(|| officers.first())
}

/// Mean over officers reporting an age; `None` when nobody does.
#[must_use]
pub fn average_age(officers: &[Officer]) -> Option<f64> {
    let ages: Vec<f64> = officers.iter().filter_map(|o| o.age).map(f64::from).collect();
    if ages.is_empty() {
        return None;
    }
    Some(ages.iter().sum::<f64>() / ages.len() as f64)
}
