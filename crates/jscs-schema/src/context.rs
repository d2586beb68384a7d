//! Shared state for one validation pass: the document root every pointer
//! resolves against, the options, and the append-only violation sink.

use serde_json::Value;

use jscs_core::{resolve, Location, PointerError, SchemaError};

use crate::config::ValidatorConfig;
use crate::report::{ValidationReport, Violation};

pub(crate) struct Context<'doc> {
    root: &'doc Value,
    config: &'doc ValidatorConfig,
    violations: Vec<Violation>,
}

impl<'doc> Context<'doc> {
    pub(crate) fn new(root: &'doc Value, config: &'doc ValidatorConfig) -> Self {
        Self {
            root,
            config,
            violations: Vec::new(),
        }
    }

    pub(crate) fn config(&self) -> &ValidatorConfig {
        self.config
    }

    pub(crate) fn resolve(&self, pointer: &str) -> Result<&'doc Value, PointerError> {
        resolve(pointer, self.root)
    }

    pub(crate) fn report(&mut self, location: &Location, error: impl Into<SchemaError>) {
        let error = error.into();
        tracing::trace!(%location, %error, "violation");
        self.violations.push(Violation {
            location: location.clone(),
            error,
        });
    }

    pub(crate) fn finish(self) -> ValidationReport {
        ValidationReport::new(self.violations)
    }
}
