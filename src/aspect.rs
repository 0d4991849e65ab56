//! Aspect evaluator for node metadata.
//!
//! Node metadata arrives as a JSON document whose `aspects` member lists the aspect
//! names applied to the node:
//!
//! ```json
//! {"nodeRef": "workspace://SpacesStore/1234", "aspects": ["cm:titled", "cm:versionable"]}
//! ```
//!
//! The evaluator answers whether a given aspect is among them.

use crate::error::{CallLogError, Result};
use serde_json::Value;
use tracing::warn;

/// Member of the metadata document that holds the applied aspects.
pub const ASPECTS_KEY: &str = "aspects";

/// Checks node metadata for an applied aspect.
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectEvaluator;

impl AspectEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Whether `condition` names one of the aspects in `json_response`.
    ///
    /// A document that cannot be parsed, is not a JSON object, or has no `aspects` member
    /// is reported at warn level and evaluates to false.
    pub fn check_json_against_condition(&self, condition: &str, json_response: &str) -> bool {
        match self.applies(condition, json_response) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Failed to read JSON response from metadata service");
                false
            }
        }
    }

    /// Strict form of [`AspectEvaluator::check_json_against_condition`] that returns errors
    /// instead of logging them.
    ///
    /// Fails when the document does not parse, is not an object, or lacks `aspects`. A
    /// non-array `aspects` member and non-string entries simply do not match.
    pub fn applies(&self, condition: &str, json_response: &str) -> Result<bool> {
        let json: Value = serde_json::from_str(json_response)?;
        let object = json.as_object().ok_or_else(|| {
            CallLogError::InvalidMetadata("document is not a JSON object".to_string())
        })?;
        let aspects = object.get(ASPECTS_KEY).ok_or_else(|| {
            CallLogError::InvalidMetadata(format!("no '{}' member", ASPECTS_KEY))
        })?;

        let matched = aspects
            .as_array()
            .map(|aspects| aspects.iter().filter_map(Value::as_str).any(|a| a == condition))
            .unwrap_or(false);

        Ok(matched)
    }
}
