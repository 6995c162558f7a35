/// JSON codec for map templates
///
/// Decoding tolerates unknown keys, absent keys and mis-typed optional values;
/// encoding omits every field that holds its default so files stay minimal.

mod error;
pub(crate) mod lenient;
pub mod variant;

pub use error::CodecError;
pub use variant::{CustomBuildingWire, DwellingGenerationWire, OneOf};

use serde::Deserialize;
use serde_json::Value;

use crate::config::TemplateGenerationConfig;

/// Decode a template from JSON text.
///
/// # Example
/// ```
/// let template = tplcfg::codec::decode(r#"{"TemplateName": "Duel", "Zones": []}"#).unwrap();
/// assert_eq!(template.template_name, "Duel");
/// ```
pub fn decode(text: &str) -> Result<TemplateGenerationConfig, CodecError> {
    let value: Value = serde_json::from_str(text).map_err(CodecError::Syntax)?;
    let template = from_value(value)?;
    tracing::debug!(
        template = %template.template_name,
        zones = template.zones.len(),
        connections = template.connections.len(),
        bytes = text.len(),
        "decoded template"
    );
    Ok(template)
}

/// Decode a template from an already parsed JSON value.
pub fn from_value(value: Value) -> Result<TemplateGenerationConfig, CodecError> {
    if !value.is_object() {
        return Err(CodecError::NotAnObject {
            found: lenient::json_kind(&value),
        });
    }
    TemplateGenerationConfig::deserialize(value).map_err(CodecError::Schema)
}

/// Encode a template as indented JSON, the format written to disk.
pub fn encode(template: &TemplateGenerationConfig) -> Result<String, CodecError> {
    let text = serde_json::to_string_pretty(template).map_err(CodecError::Encode)?;
    tracing::debug!(template = %template.template_name, bytes = text.len(), "encoded template");
    Ok(text)
}

/// Encode a template as single-line JSON.
pub fn encode_compact(template: &TemplateGenerationConfig) -> Result<String, CodecError> {
    serde_json::to_string(template).map_err(CodecError::Encode)
}

pub fn to_value(template: &TemplateGenerationConfig) -> Result<Value, CodecError> {
    serde_json::to_value(template).map_err(CodecError::Encode)
}
