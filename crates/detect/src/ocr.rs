use {
    crate::OcrError,
    std::{
        ffi::OsString,
        io::Write,
        process::{Command, Stdio},
    },
    video::Frame,
};

/// Text recognition capability. An empty string means no text was found.
pub trait TextReader: Send {
    fn extract_text(&mut self, frame: &Frame) -> Result<String, OcrError>;
}

impl<R: TextReader + ?Sized> TextReader for Box<R> {
    fn extract_text(&mut self, frame: &Frame) -> Result<String, OcrError> {
        (**self).extract_text(frame)
    }
}

/// OCR through the `tesseract` command line tool.
///
/// The frame is PNG-encoded and piped to the tool's stdin; whatever it prints
/// on stdout is the recognized text.
#[derive(Debug, Clone)]
pub struct TesseractReader {
    program: OsString,
    args: Vec<OsString>,
}

impl Default for TesseractReader {
    fn default() -> Self {
        Self {
            program: "tesseract".into(),
            args: vec!["stdin".into(), "stdout".into()],
        }
    }
}

impl TesseractReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a tesseract language pack, e.g. `eng`.
    pub fn with_language(mut self, language: &str) -> Self {
        self.args.push("-l".into());
        self.args.push(language.into());
        self
    }

    /// Replace the whole command line. The command must read a PNG on stdin.
    pub fn with_command<I, S>(mut self, program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.program = program.into();
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl TextReader for TesseractReader {
    fn extract_text(&mut self, frame: &Frame) -> Result<String, OcrError> {
        let png = frame.to_png()?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(error) = stdin.write_all(&png) {
                // the tool quit early, reap it before reporting
                drop(stdin);
                let _ = child.kill();
                let _ = child.wait();
                return Err(error.into());
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(OcrError::Engine(format!(
                "{} ({})",
                String::from_utf8_lossy(&output.stderr).trim(),
                output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
