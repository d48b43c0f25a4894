use proptest::prelude::*;
use wl_core::{Catalog, ColumnDef, Extract, Format, Module, Need};

#[test]
fn canonicalize_resolves_aliases_case_insensitively() {
    let c = Catalog::builtin();
    assert_eq!(c.canonicalize("  MarketCap "), ("mktcap".to_string(), true));
    assert_eq!(c.canonicalize("DIV%"), ("div_yield%".to_string(), true));
    assert_eq!(c.canonicalize("Symbol"), ("sym".to_string(), true));
    assert_eq!(c.canonicalize("PRICE"), ("price".to_string(), true));
}

#[test]
fn canonicalize_unknown_returns_lowercased_input() {
    let c = Catalog::builtin();
    assert_eq!(c.canonicalize(" Thesis "), ("thesis".to_string(), false));
    assert!(c.get("thesis").is_none());
}

#[test]
fn registered_key_wins_over_identical_alias() {
    let mut c = Catalog::new();
    c.register(ColumnDef::path("alpha", Module::SummaryDetail, "summaryDetail.a").alias("beta"));
    c.register(ColumnDef::path("beta", Module::FinancialData, "financialData.b"));
    assert_eq!(c.canonicalize("beta"), ("beta".to_string(), true));
}

#[test]
fn colliding_alias_last_registration_wins() {
    let mut c = Catalog::new();
    c.register(ColumnDef::path("one", Module::SummaryDetail, "summaryDetail.one").alias("x"));
    c.register(ColumnDef::path("two", Module::FinancialData, "financialData.two").alias("X"));
    assert_eq!(c.canonicalize("x"), ("two".to_string(), true));
}

#[test]
fn reregistering_a_key_overwrites_it() {
    let mut c = Catalog::new();
    c.register(ColumnDef::path("k", Module::SummaryDetail, "summaryDetail.k"));
    c.register(ColumnDef::derived("K", Module::AssetProfile));
    assert_eq!(c.len(), 1);
    let def = c.get("k").unwrap();
    assert_eq!(def.extract, Extract::Derived);
    assert_eq!(def.module, Some(Module::AssetProfile));
}

#[test]
fn builtin_paths_prefer_fmt_then_raw() {
    let c = Catalog::builtin();
    let def = c.get("beta").unwrap();
    assert_eq!(
        def.extract,
        Extract::Path("summaryDetail.beta.fmt|summaryDetail.beta.raw".into())
    );
    assert_eq!(c.get("employees").unwrap().format, Format::Count);
    assert_eq!(c.get("avg_officer_age").unwrap().format, Format::Decimal1);
}

#[test]
fn list_by_module_is_sorted_and_skips_local_columns() {
    let c = Catalog::builtin();
    let by = c.list_by_module();
    let profile = &by[&Module::AssetProfile];
    let mut sorted = profile.clone();
    sorted.sort();
    assert_eq!(profile, &sorted);
    assert!(profile.contains(&"ceo".to_string()));
    assert!(by.values().all(|keys| !keys.contains(&"sym".to_string())));
    assert_eq!(by[&Module::ChangePercent], vec!["chg%".to_string()]);
}

#[test]
fn need_for_maps_columns_to_module_flags() {
    let c = Catalog::builtin();
    assert_eq!(c.need_for(&["sym"]), Need::empty());
    assert_eq!(c.need_for(&["price"]), Need::PRICE);
    assert_eq!(c.need_for(&["chg"]), Need::CHG_PCT);
    assert_eq!(
        c.need_for(&["sym", "hq", "pe", "reco"]),
        Need::ASSET_PROFILE | Need::SUMMARY_DETAIL | Need::FINANCIAL_DATA
    );
    assert_eq!(c.need_for(&["thesis", "notes"]), Need::empty());
    assert_eq!(c.need_for::<&str>(&[]), Need::empty());
}

fn column_pool() -> Vec<&'static str> {
    vec![
        "sym", "Symbol", "name", "price", "chg%", "CHG", "exchange", "sector", "hq", "ceo",
        "mktcap", "market_cap", "pe", "reco", "cash", "thesis", "notes",
    ]
}

proptest! {
    #[test]
    fn need_for_ignores_order_and_duplicates(
        picks in proptest::collection::vec(0usize..17, 0..24),
        seed in any::<u64>(),
    ) {
        let c = Catalog::builtin();
        let pool = column_pool();
        let cols: Vec<&str> = picks.iter().map(|i| pool[*i]).collect();

        let mut shuffled = cols.clone();
        let n = shuffled.len();
        if n > 1 {
            let mut s = seed;
            for i in (1..n).rev() {
                s = s.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                let j = (s >> 33) as usize % (i + 1);
                shuffled.swap(i, j);
            }
        }
        let mut doubled = cols.clone();
        doubled.extend(cols.iter().copied());

        let base = c.need_for(&cols);
        prop_assert_eq!(base, c.need_for(&shuffled));
        prop_assert_eq!(base, c.need_for(&doubled));
    }

    #[test]
    fn local_and_unknown_columns_need_nothing(
        picks in proptest::collection::vec(prop_oneof![Just("sym"), Just("symbol"), Just("thesis"), Just("x")], 0..10)
    ) {
        let c = Catalog::builtin();
        prop_assert_eq!(c.need_for(&picks), Need::empty());
    }
}
