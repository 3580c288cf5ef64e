use crate::{Host, HostError};
use std::collections::BTreeMap;

/// In-memory host that records every interaction.
///
/// Used by headless tooling and by tests that need to observe titles,
/// notifications and prompts, or script failures.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    pub files: BTreeMap<String, String>,
    pub titles: Vec<String>,
    pub notifications: Vec<String>,
    pub prompts: Vec<String>,
    /// Answer returned by [`Host::confirm`].
    pub confirm_answer: bool,
    pub fail_writes: bool,
    pub fail_creates: bool,
    pub fail_reads: bool,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            files: BTreeMap::new(),
            titles: Vec::new(),
            notifications: Vec::new(),
            prompts: Vec::new(),
            confirm_answer: true,
            fail_writes: false,
            fail_creates: false,
            fail_reads: false,
        }
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    pub fn with_file(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.files.insert(path.into(), body.into());
        self
    }

    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn last_title(&self) -> Option<&str> {
        self.titles.last().map(String::as_str)
    }

    pub fn last_notification(&self) -> Option<&str> {
        self.notifications.last().map(String::as_str)
    }
}

impl Host for MemoryHost {
    fn create_file(&mut self, path: &str, initial_body: &str) -> Result<(), HostError> {
        if self.fail_creates {
            return Err(HostError::io(path, "create refused"));
        }
        if self.files.contains_key(path) {
            return Err(HostError::AlreadyExists(path.to_string()));
        }
        self.files.insert(path.to_string(), initial_body.to_string());
        Ok(())
    }

    fn write_file(&mut self, path: &str, body: &str) -> Result<(), HostError> {
        if self.fail_writes {
            return Err(HostError::io(path, "write refused"));
        }
        self.files.insert(path.to_string(), body.to_string());
        Ok(())
    }

    fn read_file(&mut self, path: &str) -> Result<String, HostError> {
        if self.fail_reads {
            return Err(HostError::io(path, "read refused"));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| HostError::NotFound(path.to_string()))
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.prompts.push(question.to_string());
        self.confirm_answer
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }

    fn set_window_title(&mut self, text: &str) {
        self.titles.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_interactions() {
        let mut host = MemoryHost::new();
        host.set_window_title("a");
        host.notify("hello");
        assert!(host.confirm("sure?"));
        assert_eq!(host.last_title(), Some("a"));
        assert_eq!(host.last_notification(), Some("hello"));
        assert_eq!(host.prompts, vec!["sure?".to_string()]);
    }

    #[test]
    fn scripted_failures() {
        let mut host = MemoryHost::new().with_file("a", "1");
        host.fail_writes = true;
        host.fail_creates = true;
        host.fail_reads = true;
        assert!(host.write_file("a", "2").is_err());
        assert!(host.create_file("b", "").is_err());
        assert!(host.read_file("a").is_err());
        assert_eq!(host.file("a"), Some("1"));
        assert_eq!(host.file("b"), None);
    }

    #[test]
    fn create_does_not_clobber() {
        let mut host = MemoryHost::new().with_file("a", "1");
        assert_eq!(
            host.create_file("a", "2"),
            Err(HostError::AlreadyExists("a".into()))
        );
        assert_eq!(host.file("a"), Some("1"));
    }
}
