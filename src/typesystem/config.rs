//! Limits applied by the type registry
//!
//! Hierarchies and generic instantiations are walked recursively. The limits below bound
//! those walks so that a malformed registration can not recurse without end.

/// Upper bound on any walk along the base relation, independent of registry configuration
pub(crate) const MAX_BASE_WALK: usize = 4096;

/// Configuration for a [`crate::typesystem::TypeRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSystemConfig {
    /// Maximum number of base types above a newly built type (default: 64)
    pub max_hierarchy_depth: usize,

    /// Maximum nesting of generic arguments while closing a generic definition (default: 32)
    /// e.g. `List<List<List<int>>>` has a depth of 3
    pub max_generic_depth: usize,
}

impl Default for TypeSystemConfig {
    fn default() -> Self {
        Self {
            max_hierarchy_depth: 64,
            max_generic_depth: 32,
        }
    }
}

impl TypeSystemConfig {
    /// Creates a configuration with tight limits, for registries fed from untrusted input
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_hierarchy_depth: 16,
            max_generic_depth: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_system_config_presets() {
        let default = TypeSystemConfig::default();
        assert_eq!(default.max_hierarchy_depth, 64);
        assert_eq!(default.max_generic_depth, 32);

        let strict = TypeSystemConfig::strict();
        assert!(strict.max_hierarchy_depth < default.max_hierarchy_depth);
        assert!(strict.max_generic_depth < default.max_generic_depth);
    }
}
