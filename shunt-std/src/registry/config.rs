//! Registry configuration.
//!
//! Two independent knobs decide how the registry behaves once fallback
//! discovery has populated the dynamic table:
//!
//! - [`Precedence`] orders the search over ancestor types.
//! - [`CacheKeyPolicy`] decides which key a discovered converter is cached under.
//!
//! [`RegistryConfig::legacy`] combines the choices that let a cached list
//! converter shadow the built-in container converter.
//! [`RegistryConfig::corrected`] is the default and does not.

/// Order of the ancestor search after exact-key lookup misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
    /// Search every ancestor in the static table, then every ancestor in the
    /// dynamic table. A static converter at any level beats a dynamic one.
    #[default]
    StaticFirst,
    /// Search ancestor by ancestor, checking static then dynamic at each
    /// level. A dynamic converter at a more specific level beats a static one
    /// at a broader level.
    SpecificityFirst,
}

/// Key under which a fallback-discovered converter is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheKeyPolicy {
    /// Cache under the ancestor the strategy matched on.
    #[default]
    MatchedAncestor,
    /// Cache under the concrete source type observed by the call.
    ConcreteSource,
}

/// Registry behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryConfig {
    /// Ancestor search order.
    pub precedence: Precedence,
    /// Cache key derivation for discovered converters.
    pub cache_key: CacheKeyPolicy,
}

impl RegistryConfig {
    /// Static-first search, caching on the matched ancestor.
    pub const fn corrected() -> Self {
        Self {
            precedence: Precedence::StaticFirst,
            cache_key: CacheKeyPolicy::MatchedAncestor,
        }
    }

    /// Specificity-first search, caching on the concrete source type.
    ///
    /// Reproduces the precedence corruption: once a list body has been
    /// converted to text, container bodies convert through the cached list
    /// converter instead of the built-in container converter.
    pub const fn legacy() -> Self {
        Self {
            precedence: Precedence::SpecificityFirst,
            cache_key: CacheKeyPolicy::ConcreteSource,
        }
    }

    /// Replace the search order.
    pub const fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Replace the cache key policy.
    pub const fn with_cache_key(mut self, cache_key: CacheKeyPolicy) -> Self {
        self.cache_key = cache_key;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_corrected() {
        assert_eq!(RegistryConfig::default(), RegistryConfig::corrected());
        assert_ne!(RegistryConfig::default(), RegistryConfig::legacy());
    }

    #[test]
    fn knobs_are_independent() {
        let mixed = RegistryConfig::legacy().with_precedence(Precedence::StaticFirst);
        assert_eq!(mixed.cache_key, CacheKeyPolicy::ConcreteSource);
        assert_eq!(mixed.precedence, Precedence::StaticFirst);
    }
}
