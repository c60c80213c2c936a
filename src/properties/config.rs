/// Controls how a [`crate::PropertyTable`] treats structural problems and template
/// chains.
///
/// The default is lenient: stray children, unnamed records and duplicate names are
/// reported through [`crate::Diagnostics`] and skipped, which is what real-world
/// exporters require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyTableConfig {
    /// Fail construction on children whose key is not `P`
    pub reject_foreign_elements: bool,

    /// Fail construction on `P` records without a readable name
    pub reject_unnamed: bool,

    /// Fail construction when a property name appears twice
    pub reject_duplicates: bool,

    /// Maximum number of template hops a lookup may take (`None` = unbounded)
    pub max_template_depth: Option<usize>,
}

impl Default for PropertyTableConfig {
    fn default() -> Self {
        Self::lenient()
    }
}

impl PropertyTableConfig {
    /// Report structural problems as diagnostics and continue.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            reject_foreign_elements: false,
            reject_unnamed: false,
            reject_duplicates: false,
            max_template_depth: None,
        }
    }

    /// Turn every structural problem into a construction error.
    ///
    /// Useful for validating exporter output; real-world files frequently fail it.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            reject_foreign_elements: true,
            reject_unnamed: true,
            reject_duplicates: true,
            max_template_depth: None,
        }
    }

    /// Bounds the number of template hops a lookup may take.
    #[must_use]
    pub fn with_max_template_depth(mut self, depth: usize) -> Self {
        self.max_template_depth = Some(depth);
        self
    }
}
