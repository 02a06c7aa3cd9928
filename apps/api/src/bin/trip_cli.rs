//! Interactive terminal front-end: type a request, get ranked suggestions.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use recommend_a_trip_api::{
    models::{MatchStatus, PriceBucket},
    services::{
        insights::chart_data,
        report::{rating_bars, render_lines},
        RecommendationService,
    },
    Config,
};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_distribution(buckets: &[PriceBucket]) {
    for bucket in buckets {
        let bar = "█".repeat(bucket.count);
        println!(
            "   {:<10} {} {} ({:.1}%)",
            bucket.label,
            style(bar).cyan(),
            bucket.count,
            bucket.percentage
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recommend_a_trip_api=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    println!("{}", "=".repeat(50));
    println!("{}", style("乌兰察布文旅智能推荐系统 启动中...").bold());
    println!("{}", "=".repeat(50));

    let config = Config::load().context("Failed to load configuration")?;
    let service =
        RecommendationService::from_config(&config).context("Failed to build recommender")?;

    let stats = service.catalog().stats();
    if stats.total() == 0 {
        println!(
            "{} 没有可用的数据，请检查 {}",
            style("✗").red(),
            config.catalog_path.display()
        );
        return Ok(());
    }
    println!(
        "{} 已加载数据：景点 {} 个，美食 {} 个，民宿 {} 个",
        style("✓").green(),
        stats.scenic_spots,
        stats.food,
        stats.homestay
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("\n请输入你的需求 (输入 'q' 退出):\n>> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let input = line?;
        let input = input.trim();

        if input.eq_ignore_ascii_case("q") {
            println!("感谢使用，再见！");
            break;
        }
        if input.is_empty() {
            continue;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
        spinner.set_message(format!("正在分析意图: '{}' ...", input));
        spinner.enable_steady_tick(100);

        let catalog = service.catalog();
        let outcome = service.recommend(&catalog, input, None).await;
        spinner.finish_and_clear();

        println!(
            "{} 解析结果: {} (耗时 {:.2}s)",
            style("✓").green(),
            serde_json::to_string(&outcome.intent)?,
            outcome.resolved_in.as_secs_f64()
        );

        if outcome.status != MatchStatus::Found {
            if let Some(message) = outcome.message() {
                println!("\n{}", style(message).yellow());
            }
            continue;
        }
        if outcome.results.is_empty() {
            continue;
        }

        println!("\n为你找到 {} 个好去处：", outcome.results.len());
        for line in render_lines(&outcome.results) {
            println!("   {}", line);
        }

        let charts = chart_data(&outcome.results);
        println!("\n{}", style("评分对比").bold());
        for bar in rating_bars(&charts.ratings) {
            println!("   {}", style(bar).green());
        }

        println!("\n{}", style("价格区间分布").bold());
        print_distribution(&charts.price_distribution_detailed);
    }

    Ok(())
}
