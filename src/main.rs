use anyhow::Context;
use popstack::{
    DEMO_VIEWPORT_HEIGHT, HeadlessRenderer, Popstack,
    config::PopstackConfig,
    subscriptions::driver,
    util::{Callbacks, Hook, Notification},
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, prelude::*};

fn main() -> anyhow::Result<()> {
    color_backtrace::install();
    init_logging();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => PopstackConfig::load_or_default(&path),
        None => PopstackConfig::default(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to build runtime")?;

    runtime.block_on(run(config))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    #[cfg(feature = "systemd")]
    if let Ok(journald) = tracing_journald::layer() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .with(journald)
            .init();
        return;
    }

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

/// Read one JSON notification per line from stdin and show them until all
/// have expired.
async fn run(config: PopstackConfig) -> anyhow::Result<()> {
    let interval = config.interval();
    let callbacks = Callbacks::new()
        .with_ready(|surface| info!("Surface {surface} ready"))
        .with(Hook::AfterOpen, |ctx| {
            println!("open  {:?} {}", ctx.element, ctx.notification.title);
            true
        })
        .with(Hook::Close, |ctx| {
            println!("close {:?} {:?}", ctx.element, ctx.reason);
            true
        });

    let (renderer, completions) = HeadlessRenderer::channel(DEMO_VIEWPORT_HEIGHT);
    let engine = Popstack::new("popstack-demo", config, callbacks, renderer)?;
    let (handle, task) = driver::spawn(engine, completions);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Notification>(line) {
            Ok(notification) => handle.add(notification).await?,
            Err(err) => warn!("Skipping malformed notification: {}", err),
        }
    }

    loop {
        let snapshot = handle.snapshot().await?;
        if snapshot.destroyed || (snapshot.queued == 0 && snapshot.rendered == 0) {
            break;
        }
        tokio::time::sleep(interval).await;
    }

    handle.destroy().await?;
    task.await.context("driver task panicked")??;
    Ok(())
}
