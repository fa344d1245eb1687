use {
    crate::SpeechError,
    std::{
        ffi::OsString,
        path::Path,
        process::{Command, Stdio},
    },
};

/// One way of turning text into speech. Backends are driven from a single
/// thread and need not be reentrant.
pub trait SpeechBackend: Send {
    fn name(&self) -> &str;
    fn speak(&mut self, text: &str) -> Result<(), SpeechError>;
}

impl<B: SpeechBackend + ?Sized> SpeechBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        (**self).speak(text)
    }
}

// argument placeholders
const TEXT: &str = "{text}";
const FILE: &str = "{file}";

fn run(program: &OsString, args: &[String], text: &str, file: Option<&Path>) -> Result<(), SpeechError> {
    let args = args.iter().map(|arg| {
        let arg = arg.replace(TEXT, text);
        match file {
            Some(file) => arg.replace(FILE, &file.to_string_lossy()),
            None => arg,
        }
    });
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()?;
    if !output.status.success() {
        return Err(SpeechError::Backend(format!(
            "{} {}: {}",
            program.to_string_lossy(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}

/// Speaks by running a synthesizer command. `{text}` in the arguments is
/// replaced by the text to speak.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    name: String,
    program: OsString,
    args: Vec<String>,
}

impl CommandBackend {
    pub fn new<I, S>(name: impl Into<String>, program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `espeak-ng {text}`
    pub fn espeak() -> Self {
        Self::new("espeak", "espeak-ng", [TEXT])
    }

    /// `spd-say --wait {text}`
    pub fn spd_say() -> Self {
        Self::new("spd-say", "spd-say", ["--wait", TEXT])
    }
}

impl SpeechBackend for CommandBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        run(&self.program, &self.args, text, None)
    }
}

/// Synthesizes into a temporary WAV file, then plays that file.
///
/// Both command lines may use `{file}`; the synthesizer also gets `{text}`.
/// The file is removed after playback.
#[derive(Debug, Clone)]
pub struct FileBackend {
    name: String,
    synthesize: (OsString, Vec<String>),
    play: (OsString, Vec<String>),
}

impl Default for FileBackend {
    fn default() -> Self {
        Self {
            name: "file".to_string(),
            synthesize: ("espeak-ng".into(), vec!["-w".into(), FILE.into(), TEXT.into()]),
            play: ("aplay".into(), vec!["-q".into(), FILE.into()]),
        }
    }
}

impl FileBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_synthesizer<I, S>(mut self, program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synthesize = (program.into(), args.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_player<I, S>(mut self, program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.play = (program.into(), args.into_iter().map(Into::into).collect());
        self
    }
}

impl SpeechBackend for FileBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        let path = tempfile::Builder::new()
            .prefix("ikshana-")
            .suffix(".wav")
            .tempfile()?
            .into_temp_path();
        run(&self.synthesize.0, &self.synthesize.1, text, Some(&*path))?;
        run(&self.play.0, &self.play.1, text, Some(&*path))?;
        path.close()?;
        Ok(())
    }
}

/// Writes the text to the log instead of speaking it. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBackend;

impl SpeechBackend for LogBackend {
    fn name(&self) -> &str {
        "log"
    }

    fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        log::info!("say: {}", text);
        Ok(())
    }
}

/// Look up a built-in backend: `espeak`, `spd-say`, `file` or `log`.
pub fn backend_by_name(name: &str) -> Option<Box<dyn SpeechBackend>> {
    match name {
        "espeak" => Some(Box::new(CommandBackend::espeak())),
        "spd-say" => Some(Box::new(CommandBackend::spd_say())),
        "file" => Some(Box::new(FileBackend::new())),
        "log" => Some(Box::new(LogBackend)),
        _ => None,
    }
}
