mod helpers;

use std::time::Duration;

use helpers::*;
use wl::{RenderOptions, WlError};
use wl_mock::MockService;

#[tokio::test(start_paused = true)]
async fn in_flight_items_are_capped() {
    let mock = MockService::new().with_default_latency(Duration::from_millis(100));
    let (b, mock) = builder_with(mock);
    let wl = b.concurrency(3).build().unwrap();

    let symbols: Vec<String> = (0..10).map(|i| format!("S{i}")).collect();
    let refs: Vec<&str> = symbols.iter().map(String::as_str).collect();
    let opts = RenderOptions::default().with_columns(["sym", "price"]);
    let table = wl.render(&list("wide", &refs), &opts).await.unwrap();

    assert_eq!(table.rows.len(), 10);
    assert_eq!(mock.calls(), 10);
    assert_eq!(mock.peak_in_flight(), 3);
}

#[tokio::test(start_paused = true)]
async fn rows_keep_list_order_despite_latency() {
    let mock = MockService::new()
        .with_latency(AAPL, Duration::from_millis(300))
        .with_latency(MSFT, Duration::from_millis(10));
    let (b, _) = builder_with(mock);
    let wl = b.build().unwrap();

    let table = wl
        .render(&list("slow-first", &[AAPL, MSFT, TOYOTA]), &RenderOptions::default())
        .await
        .unwrap();
    assert_eq!(table.symbols(), [AAPL, MSFT, TOYOTA]);
    assert_eq!(table.column("price"), ["189.84", "411.22", "2,850.50"]);
}

#[tokio::test(start_paused = true)]
async fn request_deadline_fails_the_render() {
    let mock = MockService::new().with_default_latency(Duration::from_secs(10));
    let (b, _) = builder_with(mock);
    let wl = b.request_timeout(Duration::from_secs(1)).build().unwrap();

    let err = wl
        .render(&list("late", &[AAPL, MSFT]), &RenderOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err, WlError::request_timeout("render late"));
}

#[tokio::test(start_paused = true)]
async fn slow_failing_symbol_only_blanks_its_row() {
    let (b, _) = builder_with(MockService::new());
    let wl = b.request_timeout(Duration::from_secs(5)).build().unwrap();

    let table = wl
        .render(&list("partial", &["TIMEOUT", AAPL]), &RenderOptions::default())
        .await
        .unwrap();
    assert_eq!(table.rows[0].cells, ["TIMEOUT", "", "", ""]);
    assert_eq!(table.rows[1].cells[2], "189.84");
}
