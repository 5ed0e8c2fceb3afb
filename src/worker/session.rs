use super::messages::{Command, Event};
use super::stats::WorkerStats;
use crate::audio::AudioDecoder;
use crate::config::ModelConfig;
use crate::error::DecodeError;
use crate::pipeline::{whisper_model_id, InferOptions, LoadOptions, LoadedModel, ModelLoader};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Fallback text when the pipeline returns an empty transcription.
const NO_TRANSCRIPTION_TEXT: &str = "No transcription available.";

const BUSY_LOAD: &str = "Model is currently being loaded or processing audio";
const BUSY_TRANSCRIBE: &str = "Already processing audio";
const NOT_LOADED: &str = "Model not loaded";

/// Controller state. One instance per session, mutated only by the
/// session loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub model_loaded: bool,
    pub is_processing: bool,
}

/// Result of a completed load or transcribe operation, applied back to
/// the session by the loop.
struct OpOutcome {
    event: Event,
    /// Replacement model handle when a load succeeded
    model: Option<Arc<dyn LoadedModel>>,
}

type OpFuture = Pin<Box<dyn Future<Output = OpOutcome> + Send>>;

/// The worker session controller.
///
/// Serializes access to one non-reentrant resource: the loaded model.
/// Commands arrive on an mpsc channel; progress and results go out on
/// another. At most one operation is in flight at any time, guarded by
/// `is_processing`; a command that arrives during a busy window is
/// rejected immediately with a failure event and no state change.
pub struct WorkerSession {
    state: SessionState,
    model: Option<Arc<dyn LoadedModel>>,
    loader: Arc<dyn ModelLoader>,
    decoder: Arc<dyn AudioDecoder>,
    model_config: ModelConfig,
    events: mpsc::Sender<Event>,
    stats: WorkerStats,
}

impl WorkerSession {
    pub fn new(
        loader: Arc<dyn ModelLoader>,
        decoder: Arc<dyn AudioDecoder>,
        model_config: ModelConfig,
        events: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            state: SessionState::default(),
            model: None,
            loader,
            decoder,
            model_config,
            events,
            stats: WorkerStats::new(),
        }
    }

    /// Run the session until the command channel closes, returning the
    /// final session statistics.
    ///
    /// Commands are received concurrently with the in-flight operation so
    /// busy rejections are immediate; the operation itself is strictly
    /// sequential and its result event is emitted only after it fully
    /// resolves.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> WorkerStats {
        self.emit(Event::progress("Worker initialized and ready")).await;
        info!("worker session started");

        let mut in_flight: Option<OpFuture> = None;

        loop {
            tokio::select! {
                maybe_cmd = commands.recv() => {
                    let Some(cmd) = maybe_cmd else {
                        // Host hung up: let any pending operation finish,
                        // then exit.
                        if let Some(op) = in_flight.take() {
                            let outcome = op.await;
                            self.complete(outcome).await;
                        }
                        break;
                    };

                    self.stats.commands_received += 1;
                    if let Some(op) = self.dispatch(cmd).await {
                        in_flight = Some(op);
                    }
                }
                outcome = poll_op(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    self.complete(outcome).await;
                }
            }
        }

        info!(
            uptime_secs = self.stats.uptime_secs(),
            stats = ?self.stats,
            "worker session finished"
        );

        self.stats
    }

    /// Check preconditions for a command and either reject it with a
    /// failure event or start the operation.
    async fn dispatch(&mut self, cmd: Command) -> Option<OpFuture> {
        match cmd {
            Command::LoadModel { model_size } => {
                if self.state.is_processing {
                    self.stats.rejected_busy += 1;
                    warn!(%model_size, "rejecting loadModel: worker busy");
                    self.emit(Event::model_loaded_err(BUSY_LOAD)).await;
                    return None;
                }

                self.state.is_processing = true;
                self.emit(Event::progress("Initializing Whisper model...")).await;

                let loader = Arc::clone(&self.loader);
                let events = self.events.clone();
                let options = LoadOptions::from(&self.model_config);

                Some(Box::pin(async move {
                    let model_id = whisper_model_id(&model_size);
                    send_event(&events, Event::progress(format!("Loading {}...", model_id))).await;

                    match loader.load(&model_id, &options).await {
                        Ok(handle) => {
                            info!(%model_id, "model loaded");
                            OpOutcome {
                                event: Event::model_loaded_ok(),
                                model: Some(handle),
                            }
                        }
                        Err(e) => {
                            error!(%model_id, "model load failed: {e}");
                            OpOutcome {
                                event: Event::model_loaded_err(e.to_string()),
                                model: None,
                            }
                        }
                    }
                }))
            }

            Command::Transcribe {
                audio_data,
                language,
            } => {
                // Loaded check comes before the busy check: a transcribe
                // during the very first load reports "not loaded".
                if !self.state.model_loaded {
                    warn!("rejecting transcribe: no model loaded");
                    self.emit(Event::transcription_err(NOT_LOADED)).await;
                    return None;
                }
                if self.state.is_processing {
                    self.stats.rejected_busy += 1;
                    warn!("rejecting transcribe: worker busy");
                    self.emit(Event::transcription_err(BUSY_TRANSCRIBE)).await;
                    return None;
                }

                // model_loaded implies a handle is present
                let Some(model) = self.model.clone() else {
                    self.emit(Event::transcription_err(NOT_LOADED)).await;
                    return None;
                };

                self.state.is_processing = true;
                self.emit(Event::progress("Processing audio...")).await;

                let decoder = Arc::clone(&self.decoder);
                let events = self.events.clone();

                Some(Box::pin(async move {
                    // Decoding is CPU-bound; keep it off the runtime
                    // worker threads.
                    let decoded = tokio::task::spawn_blocking(move || decoder.decode(&audio_data))
                        .await
                        .unwrap_or_else(|e| {
                            Err(DecodeError::Codec(format!("decode task failed: {e}")))
                        });
                    let decoded = match decoded {
                        Ok(decoded) => decoded,
                        Err(e) => {
                            error!("audio decode failed: {e}");
                            return OpOutcome {
                                event: Event::transcription_err(e.to_string()),
                                model: None,
                            };
                        }
                    };

                    send_event(&events, Event::progress("Running transcription...")).await;

                    let options = InferOptions { language };
                    match model.infer(&decoded.samples, &options).await {
                        Ok(transcription) => {
                            let text = if transcription.text.is_empty() {
                                NO_TRANSCRIPTION_TEXT.to_string()
                            } else {
                                transcription.text
                            };
                            OpOutcome {
                                event: Event::transcription_ok(text),
                                model: None,
                            }
                        }
                        Err(e) => {
                            error!("inference failed: {e}");
                            OpOutcome {
                                event: Event::transcription_err(e.to_string()),
                                model: None,
                            }
                        }
                    }
                }))
            }
        }
    }

    /// Apply a finished operation: clear the busy flag, install a new
    /// model handle if the load produced one, then report the result.
    ///
    /// A failed load leaves `model_loaded` untouched, so a prior
    /// successful load survives a failed reload. An inference failure
    /// does not invalidate the handle.
    async fn complete(&mut self, outcome: OpOutcome) {
        self.state.is_processing = false;

        if let Some(handle) = outcome.model {
            self.model = Some(handle);
            self.state.model_loaded = true;
        }

        match &outcome.event {
            Event::ModelLoaded { success: true, .. } => self.stats.loads_ok += 1,
            Event::ModelLoaded { success: false, .. } => self.stats.loads_failed += 1,
            Event::TranscriptionResult { success: true, .. } => self.stats.transcriptions_ok += 1,
            Event::TranscriptionResult { success: false, .. } => {
                self.stats.transcriptions_failed += 1
            }
            Event::Progress { .. } => {}
        }

        self.emit(outcome.event).await;
    }

    async fn emit(&self, event: Event) {
        send_event(&self.events, event).await;
    }
}

async fn send_event(events: &mpsc::Sender<Event>, event: Event) {
    if events.send(event).await.is_err() {
        warn!("event channel closed, dropping event");
    }
}

async fn poll_op(op: &mut Option<OpFuture>) -> OpOutcome {
    match op {
        Some(fut) => fut.await,
        // Branch is guarded by `in_flight.is_some()` in the select
        None => std::future::pending().await,
    }
}
