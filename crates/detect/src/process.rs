use {
    crate::{Detection, DetectionError, Detector},
    serde::{Deserialize, Serialize},
    std::{
        io::{BufRead, BufReader, Write},
        path::PathBuf,
        process::{Child, ChildStdin, ChildStdout, Command, Stdio},
    },
    video::Frame,
};

/// Command line of an external detector process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDetectorConfig {
    pub program: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Serialize)]
struct FrameHeader {
    width: usize,
    height: usize,
    channels: usize,
    threshold: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Reply {
    Detections(Vec<Detection>),
    Failure { error: String },
}

struct ChildIo {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl ChildIo {
    fn kill(mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Detector backed by a long-running model process.
///
/// For every frame one JSON header line
/// `{"width":W,"height":H,"channels":C,"threshold":T}` is written to the
/// child's stdin, followed by the `W*H*C` raw pixel bytes. The child answers
/// with one line holding a JSON array of
/// `{"label":..,"confidence":..,"bbox":[x0,y0,x1,y1]}`, or with
/// `{"error":".."}` when the model failed on that frame.
///
/// A model failure keeps the child running. If the child dies or breaks the
/// protocol it is killed and respawned on the next frame.
pub struct ProcessDetector {
    config: ProcessDetectorConfig,
    io: Option<ChildIo>,
}

impl ProcessDetector {
    /// Start the detector process.
    pub fn spawn(config: ProcessDetectorConfig) -> Result<Self, DetectionError> {
        let io = Self::start(&config)?;
        Ok(Self {
            config,
            io: Some(io),
        })
    }

    pub fn config(&self) -> &ProcessDetectorConfig {
        &self.config
    }

    fn start(config: &ProcessDetectorConfig) -> Result<ChildIo, DetectionError> {
        let mut child = Command::new(&config.program)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|error| {
                DetectionError::NotLoaded(format!(
                    "cannot start {}: {}",
                    config.program.display(),
                    error
                ))
            })?;
        let stdin = child.stdin.take().ok_or_else(|| {
            DetectionError::NotLoaded("detector stdin not captured".to_string())
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            DetectionError::NotLoaded("detector stdout not captured".to_string())
        })?;
        log::info!("started detector process {}", config.program.display());
        Ok(ChildIo {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    fn exchange(
        io: &mut ChildIo,
        frame: &Frame,
        threshold: f32,
    ) -> Result<Vec<Detection>, DetectionError> {
        let header = serde_json::to_string(&FrameHeader {
            width: frame.width(),
            height: frame.height(),
            channels: frame.channels(),
            threshold,
        })?;
        writeln!(io.stdin, "{}", header)?;
        io.stdin.write_all(frame.data())?;
        io.stdin.flush()?;

        let mut line = String::new();
        if io.stdout.read_line(&mut line)? == 0 {
            return Err(DetectionError::NotLoaded(
                "detector process closed its output".to_string(),
            ));
        }
        match serde_json::from_str(line.trim())? {
            Reply::Detections(detections) => Ok(detections),
            Reply::Failure { error } => Err(DetectionError::Inference(error)),
        }
    }
}

impl Detector for ProcessDetector {
    fn detect(&mut self, frame: &Frame, threshold: f32) -> Result<Vec<Detection>, DetectionError> {
        let mut io = match self.io.take() {
            Some(io) => io,
            None => Self::start(&self.config)?,
        };

        let result = Self::exchange(&mut io, frame, threshold);
        match &result {
            Ok(_) | Err(DetectionError::Inference(_)) => self.io = Some(io),
            // the stream may be out of step now, start over next frame
            Err(_) => io.kill(),
        }
        result
    }
}

impl Drop for ProcessDetector {
    fn drop(&mut self) {
        if let Some(io) = self.io.take() {
            io.kill();
        }
    }
}
