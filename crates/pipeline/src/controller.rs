use {
    crate::{
        AnnouncementThrottle, BoundedFrameBuffer, PipelineConfig, PipelineError, PipelineState,
        RunState,
    },
    detect::DetectionWorker,
    speak::{SpeechBackend, SpeechDispatcher},
    std::{
        sync::Arc,
        time::{Duration, Instant},
    },
    tokio::task::JoinHandle,
    video::{CameraError, DeviceSelector, FrameSource, discover, list_candidate_devices},
};

// parts handed to the units when the pipeline starts
struct Parts {
    source: Box<dyn FrameSource>,
    worker: DetectionWorker,
}

/// Owns the pipeline and drives its lifecycle.
pub struct PipelineController {
    config: PipelineConfig,
    state: RunState,
    buffer: Arc<BoundedFrameBuffer>,
    dispatcher: Arc<SpeechDispatcher>,
    parts: Option<Parts>,
    units: Vec<JoinHandle<()>>,
}

impl PipelineController {
    /// Build a controller in the Created state.
    ///
    /// The speech worker starts right away; the camera is not touched until
    /// [`start`](Self::start).
    pub fn new(
        config: PipelineConfig,
        source: Box<dyn FrameSource>,
        worker: DetectionWorker,
        backends: Vec<Box<dyn SpeechBackend>>,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        let buffer = Arc::new(BoundedFrameBuffer::new(config.buffer_capacity()));
        let dispatcher = Arc::new(SpeechDispatcher::new(backends));
        Ok(Self {
            config,
            state: RunState::new(),
            buffer,
            dispatcher,
            parts: Some(Parts { source, worker }),
            units: Vec::new(),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        self.state.get()
    }

    pub fn buffer(&self) -> &BoundedFrameBuffer {
        &self.buffer
    }

    /// Why the pipeline stopped on its own, if it did.
    pub fn stop_cause(&self) -> Option<String> {
        self.state.cause()
    }

    /// Resolve once the pipeline is stopping, either because [`stop`](Self::stop)
    /// was called or because the camera failed.
    pub async fn stopping(&self) {
        self.state.stopping().await
    }

    fn candidates(&self) -> Vec<DeviceSelector> {
        if self.config.device_candidates().is_empty() {
            list_candidate_devices()
        } else {
            self.config.device_candidates().to_vec()
        }
    }

    /// Find a working camera and start both units.
    ///
    /// Returns the device that was selected.
    pub async fn start(&mut self) -> Result<DeviceSelector, PipelineError> {
        let state = self.state.get();
        if state != PipelineState::Created {
            return Err(PipelineError::AlreadyStarted(state));
        }
        let Some(Parts { source, worker }) = self.parts.take() else {
            return Err(PipelineError::AlreadyStarted(state));
        };

        let candidates = self.candidates();
        log::info!("probing {} camera candidates", candidates.len());
        let discovery = tokio::task::spawn_blocking(move || {
            let mut source = source;
            let selected = discover(&mut source, &candidates);
            (source, selected)
        })
        .await;

        let (mut source, selected) = match discovery {
            Ok(result) => result,
            Err(error) => {
                self.state.set(PipelineState::Stopped);
                self.shutdown_speech().await;
                return Err(PipelineError::Join(error.to_string()));
            }
        };

        let Some(selected) = selected else {
            log::error!("no working camera found");
            source.close();
            self.state.set(PipelineState::Stopped);
            self.shutdown_speech().await;
            return Err(PipelineError::NoCamera);
        };

        self.state.set(PipelineState::Running);
        log::info!("pipeline running on {}", selected);
        if let Some(message) = self.config.start_message() {
            self.dispatcher.enqueue(message);
        }

        self.units.push(tokio::task::spawn_blocking({
            let buffer = Arc::clone(&self.buffer);
            let state = self.state.clone();
            move || acquire(source, &buffer, &state)
        }));

        self.units.push(tokio::task::spawn_blocking({
            let consumer = Consumer {
                worker,
                buffer: Arc::clone(&self.buffer),
                state: self.state.clone(),
                dispatcher: Arc::clone(&self.dispatcher),
                objects: AnnouncementThrottle::new(self.config.announcement_interval()),
                texts: AnnouncementThrottle::new(self.config.announcement_interval()),
                pop_timeout: self.config.pop_timeout(),
            };
            move || consumer.run()
        }));

        Ok(selected)
    }

    /// Stop both units, release the camera and buffered frames, and shut the
    /// speech worker down. Calling it again does nothing.
    ///
    /// Returns after at most one camera read, one buffer wait and one speech
    /// call.
    pub async fn stop(&mut self) {
        if self.state.get() == PipelineState::Stopped {
            return;
        }
        log::info!("stopping pipeline");

        if !self.state.request_stop(None) && self.state.get() == PipelineState::Created {
            self.state.set(PipelineState::Stopping);
        }
        self.buffer.close();

        for unit in self.units.drain(..) {
            if let Err(error) = unit.await {
                log::error!("pipeline unit failed: {}", error);
            }
        }

        // never started
        if let Some(mut parts) = self.parts.take() {
            parts.source.close();
        }

        let drained = self.buffer.drain();
        if drained > 0 {
            log::debug!("released {} buffered frames", drained);
        }

        self.shutdown_speech().await;
        self.state.set(PipelineState::Stopped);
        log::info!(
            "pipeline stopped ({} frames evicted, {} rejected)",
            self.buffer.evicted(),
            self.buffer.rejected()
        );
    }

    async fn shutdown_speech(&self) {
        let dispatcher = Arc::clone(&self.dispatcher);
        if let Err(error) = tokio::task::spawn_blocking(move || dispatcher.shutdown()).await {
            log::error!("speech shutdown failed: {}", error);
        }
    }
}

// acquisition unit: camera -> buffer
fn acquire(mut source: Box<dyn FrameSource>, buffer: &BoundedFrameBuffer, state: &RunState) {
    while state.is_running() {
        match source.next_frame() {
            Ok(frame) => {
                buffer.push(frame);
            }
            Err(CameraError::EndOfStream) => {
                log::info!("camera stream ended");
                state.request_stop(Some("camera stream ended".to_string()));
            }
            Err(error) => {
                log::error!("camera failed: {}", error);
                state.request_stop(Some(format!("camera failed: {}", error)));
            }
        }
    }
    source.close();
}

// consumption unit: buffer -> detection -> throttle -> speech
struct Consumer {
    worker: DetectionWorker,
    buffer: Arc<BoundedFrameBuffer>,
    state: RunState,
    dispatcher: Arc<SpeechDispatcher>,
    objects: AnnouncementThrottle,
    texts: AnnouncementThrottle,
    pop_timeout: Duration,
}

impl Consumer {
    fn run(mut self) {
        while self.state.is_running() {
            let Some(frame) = self.buffer.pop(self.pop_timeout) else {
                continue;
            };

            let summary = self.worker.process(&frame);
            if let Some(announcement) = self.objects.offer(&summary, Instant::now()) {
                log::info!("announce: {}", announcement.text);
                self.dispatcher.enqueue(announcement.text);
            }

            if self.worker.reads_text() {
                let text = self.worker.read_text(&frame);
                if let Some(announcement) = self.texts.offer_text(&text, Instant::now()) {
                    log::info!("announce: {}", announcement.text);
                    self.dispatcher.enqueue(announcement.text);
                }
            }
        }
    }
}
