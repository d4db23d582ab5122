//! # sketch2img
//!
//! Command-line front end for the sketch session.

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use sketch_app::{load_touch_log, AppConfig, CliArgs, Command, SketchSession};
use sketch_client::GenerationClient;
use sketch_renderer::{RasterSurface, SketchExporter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sketch2img=info,sketch_app=info,sketch_client=info,sketch_renderer=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = AppConfig::from(&args);
    tracing::debug!(
        "Config: endpoint={} canvas={}x{} stroke_width={}",
        config.endpoint,
        config.canvas.width,
        config.canvas.height,
        config.stroke_width
    );

    let client = GenerationClient::new(&config.client_config())
        .with_context(|| format!("invalid endpoint {}", config.endpoint))?;

    match args.command {
        Command::Generate { events, output } => generate(&config, client, &events, &output).await,
        Command::Render {
            events,
            output,
            svg,
        } => render(&config, client, &events, &output, svg),
        Command::Health => health(&client).await,
    }
}

/// Build a session and replay a touch log into it.
fn replay_session(
    config: &AppConfig,
    client: GenerationClient,
    events: &Path,
) -> anyhow::Result<SketchSession<GenerationClient>> {
    let log = load_touch_log(events)?;
    let session = SketchSession::new(config.initial_state(), client)
        .with_surface(RasterSurface::new(SketchExporter::with_defaults()));
    let changed = session.replay(&log);

    let drawing = session.snapshot();
    tracing::info!(
        "Replayed {} events ({changed} applied): {} strokes, {} points",
        log.len(),
        drawing.drawing().stroke_count(),
        drawing.drawing().point_count()
    );
    Ok(session)
}

async fn generate(
    config: &AppConfig,
    client: GenerationClient,
    events: &Path,
    output: &Path,
) -> anyhow::Result<()> {
    let session = replay_session(config, client, events)?;

    session.submit().await.context("generation failed")?;

    let decoded = session
        .decoded_result()
        .context("submission succeeded without a result")??;
    std::fs::write(output, &decoded.encoded)
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(
        "Wrote {}x{} {:?} image to {}",
        decoded.width,
        decoded.height,
        decoded.format,
        output.display()
    );
    Ok(())
}

fn render(
    config: &AppConfig,
    client: GenerationClient,
    events: &Path,
    output: &Path,
    svg: bool,
) -> anyhow::Result<()> {
    let session = replay_session(config, client, events)?;

    let bytes = if svg {
        SketchExporter::with_defaults()
            .render_to_svg(&session.snapshot())
            .into_bytes()
    } else {
        session.capture()?
    };
    std::fs::write(output, &bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!("Wrote sketch ({} bytes) to {}", bytes.len(), output.display());
    Ok(())
}

async fn health(client: &GenerationClient) -> anyhow::Result<()> {
    let status = client
        .health()
        .await
        .with_context(|| format!("health check against {} failed", client.base_url()))?;

    println!(
        "{}: {} (model {}, {} -> {} channels)",
        client.base_url(),
        status.status,
        status.model.as_deref().unwrap_or("unknown"),
        status.n_channels.map_or_else(|| "?".to_string(), |n| n.to_string()),
        status.n_classes.map_or_else(|| "?".to_string(), |n| n.to_string()),
    );
    if !status.is_ok() {
        anyhow::bail!("server reported status {}", status.status);
    }
    Ok(())
}
