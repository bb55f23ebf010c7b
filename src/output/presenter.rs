//! Terminal rendition of the upload session
//!
//! The presenter is a pure read client: it never mutates the session, it only
//! follows the state channel and prints what it sees.

use std::io::Write;

use tokio::sync::watch;
use tracing::debug;

use crate::domain::model::{AnalysisResult, OutputFormat, SessionState};

/// Text shown while a submission is in flight
pub const LOADING_MESSAGE: &str = "Analyzing your media...";

/// Heading above rendered analysis results
pub const RESULTS_TITLE: &str = "Analysis Results";

/// Render a session state, or `None` when there is nothing to show
pub fn render(state: &SessionState, format: OutputFormat) -> Option<String> {
    match state {
        SessionState::Idle => None,
        SessionState::Submitting => Some(LOADING_MESSAGE.to_string()),
        SessionState::Failed(message) => Some(format!("Error: {}", message)),
        SessionState::Succeeded(result) => Some(render_result(result, format)),
    }
}

/// Render an analysis result in the requested format
pub fn render_result(result: &AnalysisResult, format: OutputFormat) -> String {
    render_document(RESULTS_TITLE, result, format)
}

/// Render any service document; `title` heads the text format only
pub fn render_document(title: &str, document: &AnalysisResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => document.to_pretty_json(),
        OutputFormat::Yaml => serde_yaml::to_string(document.as_value())
            .unwrap_or_else(|_| document.to_pretty_json()),
        OutputFormat::Text => {
            let mut output = format!("{}\n{}\n", title, "=".repeat(title.len()));
            for (key, value) in document.entries() {
                let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                output.push_str(&format!("\n{}\n", key));
                for line in pretty.lines() {
                    output.push_str(&format!("  {}\n", line));
                }
            }
            output
        }
    }
}

/// Follows a session and writes each rendered state
///
/// Loading and error output goes to `status`, results go to `results`.
pub struct Presenter {
    format: OutputFormat,
    status: Box<dyn Write + Send>,
    results: Box<dyn Write + Send>,
}

impl Presenter {
    /// Presenter writing to the process's stderr and stdout
    pub fn terminal(format: OutputFormat) -> Self {
        Self::with_writers(format, Box::new(std::io::stderr()), Box::new(std::io::stdout()))
    }

    pub fn with_writers(
        format: OutputFormat,
        status: Box<dyn Write + Send>,
        results: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            format,
            status,
            results,
        }
    }

    /// Write one state
    pub fn show(&mut self, state: &SessionState) -> std::io::Result<()> {
        let Some(text) = render(state, self.format) else {
            return Ok(());
        };

        let out = match state {
            SessionState::Succeeded(_) => &mut self.results,
            _ => &mut self.status,
        };
        writeln!(out, "{}", text)?;
        out.flush()
    }

    /// Render every change until the session is dropped
    pub async fn follow(mut self, mut state_rx: watch::Receiver<SessionState>) -> std::io::Result<()> {
        while state_rx.changed().await.is_ok() {
            let state = state_rx.borrow_and_update().clone();
            debug!(state = state.name(), "Rendering session state");
            self.show(&state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Writer appending into a shared buffer
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn verdict() -> AnalysisResult {
        AnalysisResult::new(json!({"label": "authentic", "score": 0.92}))
    }

    #[test]
    fn test_render_simple_states() {
        assert_eq!(render(&SessionState::Idle, OutputFormat::Text), None);
        assert_eq!(
            render(&SessionState::Submitting, OutputFormat::Text).as_deref(),
            Some(LOADING_MESSAGE)
        );
        assert_eq!(
            render(&SessionState::Failed("boom".to_string()), OutputFormat::Json).as_deref(),
            Some("Error: boom")
        );
    }

    #[test]
    fn test_render_text_lists_every_entry() {
        let text = render_result(&verdict(), OutputFormat::Text);
        assert!(text.starts_with("Analysis Results"));
        assert!(text.contains("\nlabel\n  \"authentic\"\n"));
        assert!(text.contains("\nscore\n  0.92\n"));
    }

    #[test]
    fn test_render_text_nested_values_are_pretty_printed() {
        let result = AnalysisResult::new(json!({
            "Transcription": {"content": "hello", "metadata": {"token_count": 3}}
        }));
        let text = render_result(&result, OutputFormat::Text);
        assert!(text.contains("Transcription\n  {\n"));
        assert!(text.contains("    \"content\": \"hello\""));
    }

    #[test]
    fn test_render_json_round_trips() {
        let rendered = render_result(&verdict(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, json!({"label": "authentic", "score": 0.92}));
    }

    #[test]
    fn test_render_yaml() {
        let rendered = render_result(&verdict(), OutputFormat::Yaml);
        assert!(rendered.contains("label: authentic"));
        assert!(rendered.contains("score: 0.92"));
    }

    #[test]
    fn test_show_routes_results_and_status() {
        let status = SharedBuffer::default();
        let results = SharedBuffer::default();
        let mut presenter = Presenter::with_writers(
            OutputFormat::Json,
            Box::new(status.clone()),
            Box::new(results.clone()),
        );

        presenter.show(&SessionState::Submitting).unwrap();
        presenter.show(&SessionState::Succeeded(verdict())).unwrap();

        assert_eq!(status.contents(), format!("{}\n", LOADING_MESSAGE));
        assert!(results.contents().contains("\"label\": \"authentic\""));
    }

    #[tokio::test]
    async fn test_follow_stops_when_session_is_dropped() {
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);
        let status = SharedBuffer::default();
        let results = SharedBuffer::default();
        let presenter = Presenter::with_writers(
            OutputFormat::Text,
            Box::new(status.clone()),
            Box::new(results.clone()),
        );

        let follower = tokio::spawn(presenter.follow(state_rx));
        state_tx.send_replace(SessionState::Failed("offline".to_string()));
        drop(state_tx);

        follower.await.unwrap().unwrap();
        assert_eq!(status.contents(), "Error: offline\n");
        assert!(results.contents().is_empty());
    }
}
