use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use whisper_worker::pipeline::whisper::WhisperLoader;
use whisper_worker::worker::{self, Command, Event};
use whisper_worker::{Config, SymphoniaDecoder};

/// Speech-to-text worker speaking newline-delimited JSON on stdio.
///
/// Commands come in on stdin (`loadModel`, `transcribe`), progress and
/// result events go out on stdout. Logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "whisper-worker", version)]
struct Cli {
    /// Path to a config file (resolved by the config crate)
    #[arg(long)]
    config: Option<String>,

    /// Load the configured default model size at startup
    #[arg(long)]
    preload: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("model dir: {}", cfg.model.model_dir);

    let loader = Arc::new(WhisperLoader::new(cfg.model.model_dir.clone()));
    let decoder = Arc::new(SymphoniaDecoder::new(cfg.audio.sample_rate));
    let (mut session, mut events) = worker::spawn(
        loader,
        decoder,
        cfg.model.clone(),
        cfg.service.channel_capacity,
    );

    if cli.preload {
        session
            .send(Command::LoadModel {
                model_size: cfg.model.default_size.clone(),
            })
            .await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut stdin_done = false;

    loop {
        tokio::select! {
            maybe_event = events.recv() => {
                let Some(event) = maybe_event else { break };
                write_event(&mut stdout, &event).await?;
            }
            maybe_line = lines.next_line(), if !stdin_done => {
                match maybe_line? {
                    Some(line) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<Command>(line) {
                            Ok(command) => {
                                // Both channels are bounded. Flush events
                                // the session already produced before
                                // queueing more work for it.
                                while let Ok(event) = events.try_recv() {
                                    write_event(&mut stdout, &event).await?;
                                }
                                session.send(command).await?;
                            }
                            Err(e) => warn!("ignoring malformed command: {e}"),
                        }
                    }
                    None => {
                        // EOF: stop accepting commands, keep draining
                        // events until the session exits.
                        stdin_done = true;
                        session.close();
                    }
                }
            }
        }
    }

    let stats = session.shutdown().await?;
    info!(
        commands = stats.commands_received,
        loads_ok = stats.loads_ok,
        loads_failed = stats.loads_failed,
        transcriptions_ok = stats.transcriptions_ok,
        transcriptions_failed = stats.transcriptions_failed,
        rejected_busy = stats.rejected_busy,
        uptime_secs = stats.uptime_secs(),
        "worker exiting"
    );
    Ok(())
}

async fn write_event(stdout: &mut tokio::io::Stdout, event: &Event) -> Result<()> {
    let mut line = serde_json::to_vec(event)?;
    line.push(b'\n');
    stdout.write_all(&line).await?;
    stdout.flush().await?;
    Ok(())
}
