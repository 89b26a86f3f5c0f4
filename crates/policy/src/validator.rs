//! Policy configuration validation

use crate::catalog::PolicyCatalog;
use serde_json::Value;
use std::sync::Arc;
use swagger_import_common::{ImportError, Policy, Result};

const INVALID_CONFIGURATION: &str = "Invalid policy configuration";
const UNABLE_TO_VALIDATE: &str = "Unable to validate policy configuration";

/// Checks policy configurations against the schema the catalog knows for
/// the policy
#[derive(Debug, Clone)]
pub struct ConfigurationValidator {
    catalog: Arc<PolicyCatalog>,
}

impl ConfigurationValidator {
    pub fn new(catalog: Arc<PolicyCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PolicyCatalog {
        &self.catalog
    }

    /// Validate `policy.configuration`
    ///
    /// Null-valued members are stripped from the configuration first, and the
    /// stripped text is stored back into the policy whatever the outcome of
    /// the schema check. Policies without configuration or without a schema
    /// only need to be JSON.
    pub fn validate(&self, policy: &mut Policy) -> Result<()> {
        if policy.configuration.trim().is_empty() {
            return Ok(());
        }

        let mut configuration: Value = serde_json::from_str(&policy.configuration)
            .map_err(|_| ImportError::InvalidConfiguration(UNABLE_TO_VALIDATE.to_string()))?;
        clear_null_values(&mut configuration);
        policy.configuration = configuration.to_string();

        let Some(schema) = self
            .catalog
            .schema_for(&policy.name)
            .filter(|s| !s.trim().is_empty())
        else {
            return Ok(());
        };

        let schema: Value = serde_json::from_str(schema)
            .map_err(|_| ImportError::InvalidConfiguration(UNABLE_TO_VALIDATE.to_string()))?;
        let validator = jsonschema::Validator::new(&schema)
            .map_err(|_| ImportError::InvalidConfiguration(UNABLE_TO_VALIDATE.to_string()))?;

        if let Some(error) = validator.iter_errors(&configuration).next() {
            return Err(ImportError::InvalidConfiguration(format!(
                "{} : {}",
                INVALID_CONFIGURATION, error
            )));
        }

        Ok(())
    }
}

/// Remove null-valued object members, recursively
fn clear_null_values(value: &mut Value) {
    match value {
        Value::Object(members) => {
            members.retain(|_, v| !v.is_null());
            members.values_mut().for_each(clear_null_values);
        }
        Value::Array(items) => items.iter_mut().for_each(clear_null_values),
        _ => {}
    }
}
