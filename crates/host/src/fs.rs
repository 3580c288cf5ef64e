use crate::{Host, HostError};
use std::io::{BufRead, Write};

/// Host backed by the local filesystem and the terminal.
///
/// Confirmation prompts go to stderr and read a `y`/`n` answer from stdin,
/// unless an answer is preset with [`FsHost::assume`].
#[derive(Debug, Default)]
pub struct FsHost {
    answer: Option<bool>,
    title: String,
}

impl FsHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every confirmation with `answer` instead of prompting.
    pub fn assume(answer: bool) -> Self {
        Self {
            answer: Some(answer),
            title: String::new(),
        }
    }

    /// Last title set by the core.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Host for FsHost {
    fn create_file(&mut self, path: &str, initial_body: &str) -> Result<(), HostError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| HostError::io(path, e))?;
            }
        }
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => HostError::AlreadyExists(path.to_string()),
                _ => HostError::io(path, e),
            })?;
        file.write_all(initial_body.as_bytes())
            .map_err(|e| HostError::io(path, e))?;
        tracing::debug!(path, "created file");
        Ok(())
    }

    fn write_file(&mut self, path: &str, body: &str) -> Result<(), HostError> {
        std::fs::write(path, body).map_err(|e| HostError::io(path, e))?;
        tracing::debug!(path, bytes = body.len(), "wrote file");
        Ok(())
    }

    fn read_file(&mut self, path: &str) -> Result<String, HostError> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => HostError::NotFound(path.to_string()),
            _ => HostError::io(path, e),
        })
    }

    fn confirm(&mut self, question: &str) -> bool {
        if let Some(answer) = self.answer {
            tracing::debug!(question, answer, "confirmation answered by preset");
            return answer;
        }
        eprint!("{question} [y/N] ");
        let _ = std::io::stderr().flush();
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn set_window_title(&mut self, text: &str) {
        tracing::debug!(title = text, "window title");
        self.title = text.to_string();
    }
}
