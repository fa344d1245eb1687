use {
    crate::{SpeechBackend, SpeechError},
    std::{
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, AtomicU64, Ordering},
            mpsc as std_mpsc,
        },
        thread::JoinHandle,
    },
    tokio::sync::oneshot,
};

type Reply = Result<SpeechReceipt, SpeechError>;

/// Which backend spoke a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechReceipt {
    pub id: u64,
    pub backend: String,
}

/// Outcome of one enqueued job. Dropping the ticket does not cancel the job.
#[derive(Debug)]
pub struct SpeechTicket {
    id: u64,
    reply_rx: oneshot::Receiver<Reply>,
}

impl SpeechTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub async fn wait(self) -> Reply {
        self.reply_rx.await.unwrap_or(Err(SpeechError::Closed))
    }

    /// Like [`wait`](Self::wait), for callers outside the async runtime.
    pub fn blocking_wait(self) -> Reply {
        self.reply_rx.blocking_recv().unwrap_or(Err(SpeechError::Closed))
    }
}

struct SpeechJob {
    id: u64,
    text: String,
    reply_tx: oneshot::Sender<Reply>,
}

/// Serializes speech jobs onto one worker thread.
pub struct SpeechDispatcher {
    job_tx: Mutex<Option<std_mpsc::Sender<SpeechJob>>>,
    cancel: Arc<AtomicBool>,
    next_id: AtomicU64,
    worker: Mutex<Option<JoinHandle<()>>>,
}

fn deliver(backends: &mut [Box<dyn SpeechBackend>], id: u64, text: &str) -> Reply {
    for backend in backends.iter_mut() {
        match backend.speak(text) {
            Ok(()) => {
                log::debug!("job {} spoken by {}", id, backend.name());
                return Ok(SpeechReceipt {
                    id,
                    backend: backend.name().to_string(),
                });
            }
            Err(error) => {
                log::warn!("speech backend {} failed on job {}: {}", backend.name(), id, error);
            }
        }
    }
    log::error!("no speech backend could say {:?}", text);
    Err(SpeechError::Exhausted(backends.len()))
}

impl SpeechDispatcher {
    /// Start the worker thread. Backends are tried in the given order.
    pub fn new(backends: Vec<Box<dyn SpeechBackend>>) -> Self {
        let (job_tx, job_rx) = std_mpsc::channel::<SpeechJob>();
        let cancel = Arc::new(AtomicBool::new(false));

        let names: Vec<&str> = backends.iter().map(|backend| backend.name()).collect();
        log::info!("speech backends: {}", names.join(", "));

        let worker = std::thread::spawn({
            let cancel = Arc::clone(&cancel);
            let mut backends = backends;
            move || {
                while let Ok(job) = job_rx.recv() {
                    let reply = if cancel.load(Ordering::Relaxed) {
                        log::debug!("job {} canceled", job.id);
                        Err(SpeechError::Canceled)
                    } else {
                        deliver(&mut backends, job.id, &job.text)
                    };
                    // the caller may have dropped the ticket
                    let _ = job.reply_tx.send(reply);
                }
            }
        });

        Self {
            job_tx: Mutex::new(Some(job_tx)),
            cancel,
            next_id: AtomicU64::new(1),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Queue `text` behind any pending jobs. Never blocks.
    pub fn enqueue(&self, text: impl Into<String>) -> SpeechTicket {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply_tx, reply_rx) = oneshot::channel();
        let job = SpeechJob {
            id,
            text: text.into(),
            reply_tx,
        };

        let job_tx = self.job_tx.lock().unwrap_or_else(|e| e.into_inner());
        let rejected = match job_tx.as_ref() {
            Some(job_tx) => job_tx.send(job).err().map(|error| error.0),
            None => Some(job),
        };
        if let Some(job) = rejected {
            let _ = job.reply_tx.send(Err(SpeechError::Closed));
        }
        SpeechTicket { id, reply_rx }
    }

    /// Queue `text` and wait until it has been spoken or has failed.
    pub async fn speak(&self, text: impl Into<String>) -> Reply {
        self.enqueue(text).wait().await
    }

    pub fn is_closed(&self) -> bool {
        self.job_tx.lock().unwrap_or_else(|e| e.into_inner()).is_none()
    }

    /// Stop accepting jobs, let the current one finish, fail the queued ones
    /// with [`SpeechError::Canceled`] and join the worker thread.
    ///
    /// Blocks for at most one backend call. Calling it again does nothing.
    pub fn shutdown(&self) {
        self.cancel.store(true, Ordering::Relaxed);
        let Some(job_tx) = self.job_tx.lock().unwrap_or_else(|e| e.into_inner()).take() else {
            return;
        };
        drop(job_tx);

        let worker = self.worker.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(worker) = worker {
            if worker.join().is_err() {
                log::error!("speech worker panicked");
            }
        }
        log::info!("speech dispatcher shut down");
    }
}

impl Drop for SpeechDispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
