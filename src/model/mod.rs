//! # Model
//!
//! The explicit, per-run model the generators consume: declared parameter
//! types with their parsed rules, and routed endpoints grouped by service.
//!
//! An [`ApiModel`] is built once from [`crate::decl::Declarations`] by
//! [`build_model`] and is never mutated afterwards. Both maps keep
//! declaration order, which is what makes generated output byte-stable across
//! runs.

mod build;
mod endpoint;
mod types;

pub use build::build_model;
pub use endpoint::*;
pub use types::*;

use indexmap::IndexMap;

/// Parameter types and services of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiModel {
    /// Parameter types keyed by name, in declaration order
    pub types: IndexMap<String, ParameterType>,
    /// Services keyed by receiver name, in order of first routed handler
    pub services: IndexMap<String, Service>,
}

impl ApiModel {
    pub fn parameter_type(&self, name: &str) -> Option<&ParameterType> {
        self.types.get(name)
    }

    /// Look a field up by its composite key.
    pub fn field(&self, key: &FieldKey) -> Option<&Field> {
        self.types
            .get(&key.type_name)
            .and_then(|ty| ty.field(&key.field_name))
    }

    /// All endpoints, service by service.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.services.values().flat_map(|s| s.endpoints.iter())
    }
}
