/// Editor session
///
/// Holds the document being edited and applies the load and save rules the
/// editor relies on: a failed load never touches the current document, every
/// edit replaces the document as a whole, and I/O is attempted once.

pub mod traits;

use thiserror::Error;

use crate::codec::{self, CodecError};
use crate::config::TemplateGenerationConfig;
use traits::FileProvider;

/// Errors returned by [`Session::save`]
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No template is loaded")]
    NoDocument,

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Platform message, verbatim
    #[error("{0}")]
    Io(String),
}

/// What the editor should display
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionView<'a> {
    /// Nothing loaded yet
    Empty,
    /// A load failed; the message replaces the whole editor
    Error(&'a str),
    Document(&'a TemplateGenerationConfig),
}

pub struct Session<F: FileProvider> {
    files: F,
    document: Option<TemplateGenerationConfig>,
    error: Option<String>,
    revision: u64,
    compact: bool,
}

impl<F: FileProvider> Session<F> {
    pub fn new(files: F) -> Self {
        Self {
            files,
            document: None,
            error: None,
            revision: 0,
            compact: false,
        }
    }

    /// Save without indentation.
    pub fn with_compact_output(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Keep the document and error state but read and write through `files`
    /// from now on.
    pub fn with_files<G: FileProvider>(self, files: G) -> Session<G> {
        Session {
            files,
            document: self.document,
            error: self.error,
            revision: self.revision,
            compact: self.compact,
        }
    }

    pub fn document(&self) -> Option<&TemplateGenerationConfig> {
        self.document.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Bumped whenever the document is replaced
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn files(&self) -> &F {
        &self.files
    }

    pub fn view(&self) -> SessionView<'_> {
        match (&self.error, &self.document) {
            (Some(message), _) => SessionView::Error(message),
            (None, Some(document)) => SessionView::Document(document),
            (None, None) => SessionView::Empty,
        }
    }

    /// Ask the provider for a document and load it.
    ///
    /// Provider failures are kept verbatim as the error state. A cancelled
    /// open changes nothing.
    pub fn open(&mut self) {
        let mut text = None;
        let mut failure = None;
        self.files
            .open_file(&mut |contents| text = Some(contents), &mut |message| failure = Some(message));

        if let Some(message) = failure {
            self.error = Some(message);
            return;
        }
        if let Some(text) = text {
            if let Err(err) = self.load_text(&text) {
                tracing::debug!(error = %err, "open kept the previous document");
            }
        }
    }

    /// Decode `text` and make it the current document.
    ///
    /// On failure the previous document stays as it was and the error state
    /// is set.
    pub fn load_text(&mut self, text: &str) -> Result<(), CodecError> {
        match codec::decode(text) {
            Ok(document) => {
                tracing::info!(template = %document.template_name, "template loaded");
                self.replace(document);
                self.error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "template failed to load");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Replace the document with `f(document)`. Returns false when nothing
    /// is loaded.
    pub fn edit(&mut self, f: impl FnOnce(TemplateGenerationConfig) -> TemplateGenerationConfig) -> bool {
        match self.document.take() {
            Some(document) => {
                self.replace(f(document));
                true
            }
            None => false,
        }
    }

    /// Start from a blank template, discarding the current one.
    pub fn create(&mut self, template_name: impl Into<String>) {
        self.replace(TemplateGenerationConfig::new(template_name));
        self.error = None;
    }

    /// Leave the error view, returning to whatever document was loaded.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Encode the document and hand it to the provider once.
    pub fn save(&self) -> Result<(), SessionError> {
        let document = self.document.as_ref().ok_or(SessionError::NoDocument)?;
        let text = if self.compact {
            codec::encode_compact(document)?
        } else {
            codec::encode(document)?
        };
        self.files.save_file(&text).map_err(SessionError::Io)?;
        tracing::info!(template = %document.template_name, bytes = text.len(), "template saved");
        Ok(())
    }

    fn replace(&mut self, document: TemplateGenerationConfig) {
        self.document = Some(document);
        self.revision += 1;
    }
}
