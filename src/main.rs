use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use quicklog::{quicklog_info, quicklog_warn, Config, QuicklogLayer};

fn main() -> Result<()> {
    let config = Config::load().context("Failed to load quicklog config")?;
    let log = config.build();

    // Application tracing goes to stderr and into the quicklog
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quicklog=info,quicklog_demo=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(QuicklogLayer::new(Arc::clone(&log)))
        .init();

    tracing::info!(capacity = config.effective_capacity(), "Quicklog demo starting");

    quicklog_info!(log, "g1", "hi");
    quicklog_info!(log, "g1", "test");
    quicklog_warn!(log, "g1", "test");
    quicklog_warn!(log, "g1", "test");
    for worker in 0..3 {
        quicklog_info!(log, "g2", "worker {} ready", worker);
    }
    quicklog_warn!(log, "other", "disk usage at {}%", 91);
    tracing::warn!("cache miss rate above threshold");

    for group in sorted_groups(log.groups()) {
        println!("[{}]", group);
        for entry in log.entries(&group) {
            println!(
                "  {}",
                entry.formatted_message(&config.timezone, config.exact_time)
            );
        }
    }

    let snapshot = log.export_snapshot(&config.timezone, config.exact_time, Some("g"));
    let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
    println!("{}", json);

    Ok(())
}

fn sorted_groups(mut groups: Vec<String>) -> Vec<String> {
    groups.sort();
    groups
}
