mod common;

use std::{
    io::Write,
    sync::{Arc, Mutex},
};

use base64::{engine::general_purpose::STANDARD, Engine};
use stash_common::league::League;

use common::{authenticated, ScriptedTransport};

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}

#[test]
fn test_malformed_document_is_logged_once_as_base64() {
    let document = r#"{"numTabs": 2, "items": [{"w": 1"#;
    let mut model = authenticated(ScriptedTransport::default().with_raw_tab(0, document));

    let (result, logs) = capture(|| model.get_single_tab(0, &League::default(), false));

    assert!(result.unwrap_err().is_malformed_response());

    let encoded = STANDARD.encode(document);
    assert_eq!(logs.matches(&encoded).count(), 1);
    assert!(logs.contains("JSON Serialization Failed: base64 bytes:"));

    let lines: Vec<&str> = logs.lines().collect();
    let position = lines
        .iter()
        .position(|line| line.contains(&encoded))
        .unwrap();
    assert!(lines[position - 1].contains("base64 bytes:"));
    assert!(lines[position + 1].trim_end().ends_with("END"));
}

#[test]
fn test_null_document_is_logged() {
    let mut model = authenticated(ScriptedTransport::default().with_raw_tab(0, "null"));

    let (result, logs) = capture(|| model.get_single_tab(0, &League::default(), false));

    assert!(result.unwrap_err().is_malformed_response());
    assert!(logs.contains("Proxy was null: base64 bytes:"));
    assert_eq!(logs.matches(&STANDARD.encode("null")).count(), 1);
}

#[test]
fn test_empty_stash_logs_no_diagnostics() {
    let transport =
        ScriptedTransport::default().with_raw_tab(0, r#"{"numTabs": 0, "items": null}"#);
    let mut model = authenticated(transport);

    let (result, logs) = capture(|| model.get_single_tab(0, &League::default(), false));

    assert!(result.unwrap().is_empty());
    assert!(!logs.contains("base64 bytes"));
}
