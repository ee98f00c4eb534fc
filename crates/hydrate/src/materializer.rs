mod builder;
pub use builder::Builder;

use crate::Materialized;
use hydrate_core::{EntityMetadata, MappingNode, RowCursor};

use std::{fmt, sync::Arc};

/// Turns row cursors into object graphs according to a mapping.
///
/// A materializer is cheap to clone and may be shared; every call to
/// [`materialize`](Materializer::materialize) runs an independent pass with
/// its own identity registry.
#[derive(Clone)]
pub struct Materializer {
    pub(crate) metadata: Arc<dyn EntityMetadata>,
    pub(crate) options: Options,
}

/// Tunables of a materialization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// How mapping column names are matched against row column names.
    pub column_case: ColumnCase,

    /// Emit warnings for mappings that cannot tell subtypes apart or that
    /// request optimistic locking without mapping the version member.
    pub diagnostics: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColumnCase {
    /// Column names must match exactly.
    #[default]
    Sensitive,

    /// Column names are compared ignoring ASCII case.
    Insensitive,
}

impl Materializer {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Creates a materializer with default options.
    pub fn new(metadata: impl EntityMetadata + 'static) -> Self {
        Self {
            metadata: Arc::new(metadata),
            options: Options::default(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Prepares a pass of `rows` through `mapping`.
    ///
    /// Nothing is read until the returned value is consumed.
    pub fn materialize<'m, C>(&'m self, mapping: &'m MappingNode, rows: C) -> Materialized<'m, C>
    where
        C: RowCursor,
    {
        Materialized::new(self, mapping, rows)
    }
}

impl fmt::Debug for Materializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Materializer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            column_case: ColumnCase::Sensitive,
            diagnostics: true,
        }
    }
}
