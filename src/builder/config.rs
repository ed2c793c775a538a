//! Tree builder configuration

/// Configuration for the tree builder
///
/// The default accepts any well-formed input; `max_depth` is an opt-in limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Replace every one-element child group with the bare element
    pub collapse_single_child_groups: bool,
    /// Keep children in one ordered list instead of grouping them by name
    pub index_children_positionally: bool,
    /// Fail with `EmptyInput` when no top-level element is produced
    pub require_root: bool,
    /// Report malformed nesting instead of recovering a partial tree
    pub strict: bool,
    /// Maximum nesting depth (0 means unlimited)
    pub max_depth: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl Config {
    /// Create a new config with no depth limit
    pub const fn unlimited() -> Self {
        Self::new(0)
    }

    /// Create a new config with a specific depth limit and default options
    pub const fn new(max_depth: u16) -> Self {
        Self {
            collapse_single_child_groups: false,
            index_children_positionally: false,
            require_root: false,
            strict: false,
            max_depth,
        }
    }

    #[must_use]
    pub const fn with_collapse(mut self, enabled: bool) -> Self {
        self.collapse_single_child_groups = enabled;
        self
    }

    #[must_use]
    pub const fn with_positional(mut self, enabled: bool) -> Self {
        self.index_children_positionally = enabled;
        self
    }

    #[must_use]
    pub const fn with_require_root(mut self, enabled: bool) -> Self {
        self.require_root = enabled;
        self
    }

    #[must_use]
    pub const fn with_strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Collapsing only applies to name-keyed children
    pub const fn collapses(self) -> bool {
        self.collapse_single_child_groups && !self.index_children_positionally
    }
}
