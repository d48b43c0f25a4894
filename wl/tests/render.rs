mod helpers;

use helpers::*;
use wl::{Item, Need, RenderOptions, Watchlist};
use wl_mock::MockService;

#[tokio::test]
async fn inferred_columns_for_a_symbol_list() {
    let (wl, _) = wl_with_mock();
    let table = wl
        .render(&list("core", &[AAPL, MSFT, TOYOTA]), &RenderOptions::default())
        .await
        .unwrap();

    assert_eq!(table.name, "core");
    assert_eq!(table.columns, ["sym", "name", "price", "chg%"]);
    assert_eq!(table.symbols(), [AAPL, MSFT, TOYOTA]);
    assert_eq!(
        table.rows[0].cells,
        ["AAPL", "Apple Inc.", "189.84", "1.23%"]
    );
    assert_eq!(
        table.rows[1].cells,
        ["MSFT", "Microsoft Corporation", "411.22", "-0.50%"]
    );
    assert_eq!(table.column("price"), ["189.84", "411.22", "2,850.50"]);
}

#[tokio::test]
async fn user_fields_follow_the_default_lead() {
    let (wl, _) = wl_with_mock();
    let list = Watchlist {
        name: "ideas".into(),
        columns: vec![],
        items: vec![
            Item::new(AAPL).with_field("thesis", "services growth"),
            Item::new(MSFT)
                .with_name("Microsoft")
                .with_field("target", 500.0),
        ],
    };
    let table = wl.render(&list, &RenderOptions::default()).await.unwrap();

    assert_eq!(
        table.columns,
        ["sym", "name", "price", "chg%", "target", "thesis"]
    );
    assert_eq!(table.column("name"), ["Apple Inc.", "Microsoft"]);
    assert_eq!(table.column("thesis"), ["services growth", ""]);
    assert_eq!(table.column("target"), ["", "500"]);
}

#[tokio::test]
async fn explicit_columns_are_kept_verbatim() {
    let (wl, _) = wl_with_mock();
    let mut wlist = list("explicit", &[AAPL]);
    wlist.columns = vec!["price".into(), "price".into(), "sym".into()];

    let table = wl.render(&wlist, &RenderOptions::default()).await.unwrap();
    assert_eq!(table.columns, ["price", "sym"]);
    assert_eq!(table.rows[0].cells, ["189.84", "AAPL"]);

    // render options take precedence over the list's own columns
    let opts = RenderOptions::default().with_columns(["Symbol", "MarketCap", "CEO"]);
    let table = wl.render(&wlist, &opts).await.unwrap();
    assert_eq!(table.columns, ["Symbol", "MarketCap", "CEO"]);
    assert_eq!(
        table.rows[0].cells,
        ["AAPL", "2.95T", "Mr. Timothy D. Cook — CEO & Director (62)"]
    );
}

#[tokio::test]
async fn failing_symbols_render_blank_cells() {
    let (wl, _) = wl_with_mock();
    let opts = RenderOptions::default().with_columns(["sym", "price", "sector", "hq"]);
    let table = wl
        .render(&list("mixed", &[FAIL, NOPRICE, "UNKNOWN", TOYOTA]), &opts)
        .await
        .unwrap();

    assert_eq!(table.rows[0].cells, ["FAIL", "", "", ""]);
    assert_eq!(table.rows[1].cells, ["NOPRICE", "", "", ""]);
    assert_eq!(table.rows[2].cells, ["UNKNOWN", "", "", ""]);
    assert_eq!(
        table.rows[3].cells,
        [
            "7203.T",
            "2,850.50",
            "Consumer Cyclical",
            "Tokyo, Japan · 03-1234 · example.com"
        ]
    );
}

#[tokio::test]
async fn cached_render_fetches_each_symbol_once() {
    let (wl, mock) = wl_with_mock();
    let opts =
        RenderOptions::default().with_columns(["sym", "name", "price", "chg%", "sector", "hq", "ceo"]);
    let wlist = list("once", &[AAPL, MSFT]);

    wl.render(&wlist, &opts).await.unwrap();
    assert_eq!(mock.calls(), 2);
    let row_need = Need::PRICE | Need::CHG_PCT | Need::ASSET_PROFILE;
    assert!(mock.requests().iter().all(|(_, need)| *need == row_need));

    wl.render(&wlist, &opts).await.unwrap();
    assert_eq!(mock.calls(), 2);
}

#[tokio::test]
async fn uncached_render_fetches_per_column() {
    let (b, mock) = builder_with(MockService::new());
    let wl = b.no_cache().build().unwrap();
    let opts =
        RenderOptions::default().with_columns(["sym", "name", "price", "chg%", "sector", "hq", "ceo"]);

    let table = wl.render(&list("direct", &[AAPL, MSFT]), &opts).await.unwrap();
    assert_eq!(table.column("sector"), ["Technology", "Technology"]);
    // every column but sym reaches the service
    assert_eq!(mock.calls(), 12);
}

#[tokio::test]
async fn empty_symbols_never_reach_the_service() {
    let (wl, mock) = wl_with_mock();
    let wlist = Watchlist {
        name: "notes".into(),
        columns: vec![],
        items: vec![Item::new("").with_field("note", "cash")],
    };
    let table = wl.render(&wlist, &RenderOptions::default()).await.unwrap();

    assert_eq!(table.columns, ["note"]);
    assert_eq!(table.rows[0].cells, ["cash"]);
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn render_all_keeps_input_order() {
    let (wl, _) = wl_with_mock();
    let lists = [list("b", &[MSFT]), list("a", &[AAPL]), list("empty", &[])];
    let tables = wl.render_all(&lists, &RenderOptions::default()).await.unwrap();

    let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["b", "a", "empty"]);
    assert!(tables[2].columns.is_empty());
    assert!(tables[2].rows.is_empty());
}
