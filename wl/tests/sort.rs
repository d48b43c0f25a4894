mod helpers;

use helpers::*;
use wl::{Item, Need, RenderOptions, Watchlist};

#[tokio::test]
async fn chg_pct_sorts_by_raw_change_with_missing_last() {
    let (wl, _) = wl_with_mock();
    let wlist = list("movers", &[FAIL, AAPL, MSFT, TOYOTA]);

    let asc = wl
        .render(&wlist, &RenderOptions::default().sorted_by("chg%", false))
        .await
        .unwrap();
    assert_eq!(asc.symbols(), [MSFT, TOYOTA, AAPL, FAIL]);

    let desc = wl
        .render(&wlist, &RenderOptions::default().sorted_by("chg", true))
        .await
        .unwrap();
    assert_eq!(desc.symbols(), [AAPL, TOYOTA, MSFT, FAIL]);
}

#[tokio::test]
async fn text_columns_sort_case_insensitively() {
    let (wl, _) = wl_with_mock();
    let wlist = list("names", &[TOYOTA, MSFT, AAPL]);
    let table = wl
        .render(&wlist, &RenderOptions::default().sorted_by("name", false))
        .await
        .unwrap();
    assert_eq!(
        table.column("name"),
        ["Apple Inc.", "Microsoft Corporation", "TOYOTA MOTOR CORP"]
    );
}

#[tokio::test]
async fn hidden_sort_column_joins_the_need() {
    let (wl, mock) = wl_with_mock();
    let opts = RenderOptions::default()
        .with_columns(["sym"])
        .sorted_by("marketcap", true);
    let table = wl
        .render(&list("caps", &[AAPL, TOYOTA, MSFT]), &opts)
        .await
        .unwrap();

    assert_eq!(table.columns, ["sym"]);
    assert_eq!(table.symbols(), [TOYOTA, MSFT, AAPL]);
    assert_eq!(mock.calls(), 3);
    assert!(
        mock.requests()
            .iter()
            .all(|(_, need)| *need == Need::SUMMARY_DETAIL)
    );
}

#[tokio::test]
async fn user_fields_sort_numerically() {
    let (wl, _) = wl_with_mock();
    let wlist = Watchlist {
        name: "ranked".into(),
        columns: vec!["sym".into(), "rank".into()],
        items: vec![
            Item::new("A").with_field("rank", 10.0),
            Item::new("B").with_field("rank", 9.0),
            Item::new("C"),
            Item::new("D").with_field("rank", "2"),
        ],
    };
    let table = wl
        .render(&wlist, &RenderOptions::default().sorted_by("rank", false))
        .await
        .unwrap();
    assert_eq!(table.symbols(), ["D", "B", "A", "C"]);

    let table = wl
        .render(&wlist, &RenderOptions::default().sorted_by("rank", true))
        .await
        .unwrap();
    assert_eq!(table.symbols(), ["A", "B", "D", "C"]);
}
