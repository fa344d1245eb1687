use speak::{CommandBackend, FileBackend, SpeechBackend, SpeechError};

#[test]
fn test_command_backend_success() {
    let mut backend = CommandBackend::new("true", "true", Vec::<String>::new());
    assert_eq!(backend.name(), "true");
    backend.speak("hello").unwrap();
}

#[test]
fn test_command_backend_failure_carries_stderr() {
    let mut backend = CommandBackend::new("bad", "sh", ["-c", "echo no audio >&2; exit 1"]);
    match backend.speak("hello") {
        Err(SpeechError::Backend(message)) => assert!(message.contains("no audio")),
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[test]
fn test_missing_program_is_io_error() {
    let mut backend = CommandBackend::new("ghost", "/nonexistent/ikshana-tts", ["{text}"]);
    assert!(matches!(backend.speak("hello"), Err(SpeechError::Io(_))));
}

#[test]
fn test_file_backend_synthesizes_then_plays() {
    let dir = tempfile::tempdir().unwrap();
    let played = dir.path().join("played.txt");
    let mut backend = FileBackend::new()
        .with_synthesizer("sh", ["-c", "printf '%s' \"$1\" > \"$0\"", "{file}", "{text}"])
        .with_player("sh", ["-c", "cp \"$0\" \"$1\"", "{file}", played.to_str().unwrap()]);
    assert_eq!(backend.name(), "file");

    backend.speak("I see cup: 1").unwrap();
    assert_eq!(std::fs::read_to_string(&played).unwrap(), "I see cup: 1");
}

#[test]
fn test_file_backend_stops_when_synthesis_fails() {
    let dir = tempfile::tempdir().unwrap();
    let played = dir.path().join("played.txt");
    let mut backend = FileBackend::new()
        .with_name("wav")
        .with_synthesizer("false", Vec::<String>::new())
        .with_player("touch", [played.to_str().unwrap()]);
    assert_eq!(backend.name(), "wav");
    assert!(backend.speak("hello").is_err());
    assert!(!played.exists());
}
