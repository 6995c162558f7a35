/// tplcfg - Map template configuration model
///
/// This library provides the typed document model for procedural map
/// templates, the lenient JSON codec that reads and writes them, and the
/// editor session and validation built on top.

pub mod codec;
pub mod config;
pub mod session;
pub mod validation;

// Re-export commonly used types
pub use codec::{CodecError, decode, encode};
pub use config::{ConnectionModel, CustomBuildingConfig, TemplateGenerationConfig, ZoneGenerationConfig};
pub use session::{Session, SessionError, SessionView};
pub use validation::{Warning, validate};
