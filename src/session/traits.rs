use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Trait for the platform file dialogs
///
/// This keeps the session decoupled from how a document reaches it. A desktop
/// build opens a picker, the CLI reads a path, tests use [`MockFileProvider`].
pub trait FileProvider {
    /// Read a whole document. Exactly one callback runs, or none when the
    /// user cancels.
    fn open_file(&self, on_success: &mut dyn FnMut(String), on_error: &mut dyn FnMut(String));

    /// Write a whole document in a single attempt.
    fn save_file(&self, text: &str) -> Result<(), String>;
}

/// Reads and writes one fixed path
#[derive(Debug, Clone)]
pub struct FsFileProvider {
    path: PathBuf,
}

impl FsFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileProvider for FsFileProvider {
    fn open_file(&self, on_success: &mut dyn FnMut(String), on_error: &mut dyn FnMut(String)) {
        match fs::read_to_string(&self.path) {
            Ok(text) => on_success(text),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read template");
                on_error(err.to_string())
            }
        }
    }

    fn save_file(&self, text: &str) -> Result<(), String> {
        fs::write(&self.path, text).map_err(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to write template");
            err.to_string()
        })
    }
}

// Mock implementation for testing

/// What the next `open_file` call does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOpen {
    Text(String),
    Error(String),
    Cancel,
}

#[derive(Debug, Default)]
struct MockFiles {
    next_open: Option<MockOpen>,
    saved: Vec<String>,
    save_error: Option<String>,
}

/// In-memory file provider
///
/// Clones share state, so a test can keep a handle while the session owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MockFileProvider {
    files: Arc<Mutex<MockFiles>>,
}

impl MockFileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` on the next open
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.set_next_open(MockOpen::Text(text.into()));
        self
    }

    pub fn set_next_open(&self, next: MockOpen) {
        self.lock().next_open = Some(next);
    }

    /// Make every save fail with `message`
    pub fn fail_saves(&self, message: impl Into<String>) {
        self.lock().save_error = Some(message.into());
    }

    /// Documents written so far, oldest first
    pub fn saved(&self) -> Vec<String> {
        self.lock().saved.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockFiles> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileProvider for MockFileProvider {
    fn open_file(&self, on_success: &mut dyn FnMut(String), on_error: &mut dyn FnMut(String)) {
        let next = self.lock().next_open.take().unwrap_or(MockOpen::Cancel);
        match next {
            MockOpen::Text(text) => on_success(text),
            MockOpen::Error(message) => on_error(message),
            MockOpen::Cancel => {}
        }
    }

    fn save_file(&self, text: &str) -> Result<(), String> {
        let mut files = self.lock();
        if let Some(message) = &files.save_error {
            return Err(message.clone());
        }
        files.saved.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(provider: &dyn FileProvider) -> Result<Option<String>, String> {
        let mut text = None;
        let mut failure = None;
        provider.open_file(&mut |t| text = Some(t), &mut |m| failure = Some(m));
        match failure {
            Some(message) => Err(message),
            None => Ok(text),
        }
    }

    #[test]
    fn test_fs_provider_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsFileProvider::new(dir.path().join("template.json"));

        provider.save_file("{\"TemplateName\": \"Fs\"}").unwrap();
        assert_eq!(open(&provider).unwrap().as_deref(), Some("{\"TemplateName\": \"Fs\"}"));
    }

    #[test]
    fn test_fs_provider_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsFileProvider::new(dir.path().join("missing.json"));

        assert!(open(&provider).is_err());
    }

    #[test]
    fn test_fs_provider_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsFileProvider::new(dir.path().join("no-such-dir").join("out.json"));

        assert!(provider.save_file("{}").is_err());
    }

    #[test]
    fn test_mock_provider_serves_once() {
        let provider = MockFileProvider::new().with_text("{}");

        assert_eq!(open(&provider).unwrap().as_deref(), Some("{}"));
        assert_eq!(open(&provider).unwrap(), None);
    }

    #[test]
    fn test_mock_provider_errors_and_saves() {
        let provider = MockFileProvider::new();
        provider.set_next_open(MockOpen::Error("permission denied".to_string()));
        assert_eq!(open(&provider).unwrap_err(), "permission denied");

        let handle = provider.clone();
        provider.save_file("first").unwrap();
        assert_eq!(handle.saved(), vec!["first".to_string()]);

        handle.fail_saves("disk full");
        assert_eq!(provider.save_file("second").unwrap_err(), "disk full");
        assert_eq!(handle.saved().len(), 1);
    }
}
