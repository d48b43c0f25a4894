mod common;

use std::time::Duration;

use common::get_service;
use tracing_subscriber::EnvFilter;
use wl::{CacheConfig, Item, RenderOptions, Table, Watchlist, Wl};

fn print_table(table: &Table) {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            table
                .rows
                .iter()
                .map(|r| r.cells[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    println!("== {} ==", table.name);
    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{c:<w$}"))
        .collect();
    println!("{}", header.join("  "));
    for row in &table.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect();
        println!("{}", cells.join("  "));
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Logs go to stderr; try RUST_LOG=wl=debug,wl_middleware=trace.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // 2. Build the renderer with a short-lived cache and a render deadline.
    let wl = Wl::builder()
        .with_service(get_service())
        .cache(CacheConfig::new(Duration::from_secs(30), 128))
        .concurrency(4)
        .request_timeout(Duration::from_secs(20))
        .build()?;

    // 3. An inferred view: symbols plus a user field.
    let tech = Watchlist {
        name: "tech".into(),
        columns: vec![],
        items: vec![
            Item::new("AAPL").with_field("thesis", "services growth"),
            Item::new("MSFT"),
            Item::new("7203.T").with_name("Toyota"),
        ],
    };
    print_table(&wl.render(&tech, &RenderOptions::default().sorted_by("chg%", true)).await?);

    // 4. An explicit view built from column sets.
    let mut columns = vec!["sym".to_string()];
    columns.extend(wl.expand_sets(&["price", "assetProfile"])?);
    let opts = RenderOptions::default().with_columns(columns);
    print_table(&wl.render(&tech, &opts).await?);

    // 5. Rendering again within the TTL is served from the cache.
    println!("{}", serde_json::to_string_pretty(&wl.render(&tech, &opts).await?)?);

    Ok(())
}
