//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::generator::Generator;
use crate::{Blog, CONFIG_FILE};

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let store = blog.load_store()?;
    tracing::info!("Loaded {} posts", store.len());

    let report = Generator::new(blog).generate(&store)?;
    if report.skipped > 0 {
        tracing::warn!("{} posts were not written", report.skipped);
    }

    tracing::info!(
        "Generated {} post pages and copied {} static files in {:.2}s",
        report.posts,
        report.assets,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Watch content, static files and config, regenerating on change
///
/// Blocks until the watcher goes away.
pub fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for dir in [&blog.content_dir, &blog.static_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }

    let config_path = blog.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut blog = blog.clone();
    for result in rx {
        match result {
            Ok(events) => {
                if events.iter().any(|e| e.path == config_path) {
                    match Blog::new(&blog.base_dir) {
                        Ok(reloaded) => blog = reloaded,
                        Err(e) => tracing::error!("Failed to reload config: {}", e),
                    }
                }

                tracing::info!("{} files changed, regenerating...", events.len());
                if let Err(e) = run(&blog) {
                    tracing::error!("Generation failed: {}", e);
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}
