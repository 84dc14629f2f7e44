use coingecko_market_sdk::{
    axis_labels, format_percent_change, format_usd, CancelToken, CoinGeckoClient,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = CoinGeckoClient::from_env()?;
    let cancel = CancelToken::new();

    // Abort whatever is in flight on Ctrl-C
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    println!("Top coins by market cap");
    println!("{:-<60}", "");

    let coins = client.market_page(&cancel).await?;
    for coin in &coins {
        let change = coin
            .price_change_percentage_24h
            .map(format_percent_change)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<20} {:<8} {:>18} {:>10}",
            coin.name,
            coin.display_symbol(),
            format_usd(coin.current_price),
            change
        );
    }

    let Some(first) = coins.first() else {
        return Ok(());
    };

    let days = client.config().chart_days;
    let overview = client.coin_overview(&first.id, days, &cancel).await?;
    let detail = &overview.detail;

    println!();
    println!("{} ({})", detail.name, detail.display_symbol());
    println!("{:-<60}", "");
    println!("Price:       {}", format_usd(detail.current_price));
    println!("Market Cap:  {}", format_usd(detail.market_cap));
    println!("Volume 24h:  {}", format_usd(detail.total_volume));
    println!("High 24h:    {}", format_usd(detail.high_24h));
    println!("Low 24h:     {}", format_usd(detail.low_24h));

    println!();
    println!("Last {} days", days);
    let labels = axis_labels(&overview.chart, 4);
    for (point, label) in overview.chart.iter().zip(labels) {
        println!("{:>12} {}", label, format_usd(point.price));
    }

    let metrics = client.metrics().await;
    println!();
    println!(
        "{} requests via {}, p50={:.0}ms, success_rate={:.1}%",
        metrics.total_requests,
        metrics.transport_name,
        metrics.latency_p50_ms,
        metrics.success_rate * 100.0
    );

    Ok(())
}
