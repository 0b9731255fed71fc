//! Static site build command.

use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use phosphor_docs::StaticBuilder;
use phosphor_ui::{SpinnerTicker, SPINNER_FRAMES};

use crate::config::Config;

/// Run the build command.
pub async fn run(
    config: &Config,
    output: Option<PathBuf>,
    minify: Option<bool>,
    strict: bool,
) -> Result<()> {
    tracing::info!("Building static site...");

    let catalog = Arc::new(config.catalog()?);
    let build_config = config.build_config(output, minify, strict);
    let builder = StaticBuilder::new(build_config, catalog);

    let result = with_spinner("Building", builder.build()).await?;

    tracing::info!(
        "Built {} pages with {} previews in {}ms",
        result.pages,
        result.previews,
        result.duration_ms
    );
    for name in &result.missing {
        tracing::warn!("Rendered not-found page for component {}", name);
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

/// Show a spinner on stderr while `work` runs. Does nothing unless stderr is
/// a terminal.
async fn with_spinner<F: Future>(label: &str, work: F) -> F::Output {
    if !io::stderr().is_terminal() {
        return work.await;
    }

    let ticker = SpinnerTicker::start();
    let mut frames = ticker.subscribe();
    let label = label.to_string();

    let painter = tokio::spawn(async move {
        loop {
            let frame = SPINNER_FRAMES[*frames.borrow_and_update()];
            {
                let mut stderr = io::stderr().lock();
                let _ = write!(stderr, "\r{} {}", frame, label);
                let _ = stderr.flush();
            }

            // Ends once the ticker stops.
            if frames.changed().await.is_err() {
                break;
            }
        }
    });

    let output = work.await;

    ticker.stop();
    let _ = painter.await;
    eprint!("\r\x1b[2K");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn spinner_passes_output_through() {
        assert_eq!(with_spinner("Working", async { 42 }).await, 42);
    }

    #[tokio::test]
    async fn builds_configured_site() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(
            docs.join("kbd.mdx"),
            "---\ntitle: Kbd\ncomponent: kbd\n---\n\n```tsx live\n<Kbd>Esc</Kbd>\n```\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.docs.dir = docs.display().to_string();
        let out = temp.path().join("site");

        run(&config, Some(out.clone()), None, true).await.unwrap();

        let html = std::fs::read_to_string(out.join("kbd/index.html")).unwrap();
        assert!(html.contains("kbd-key"));
        assert!(out.join("registry.json").exists());
    }
}
