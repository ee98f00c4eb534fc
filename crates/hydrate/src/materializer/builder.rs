use super::{ColumnCase, Materializer, Options};
use hydrate_core::{bail, EntityMetadata, Result};

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    /// Entity metadata provider; required.
    metadata: Option<Arc<dyn EntityMetadata>>,

    options: Options,
}

impl Builder {
    pub fn metadata(&mut self, metadata: impl EntityMetadata + 'static) -> &mut Self {
        self.metadata = Some(Arc::new(metadata));
        self
    }

    /// Use a metadata provider that is already shared.
    pub fn shared_metadata(&mut self, metadata: Arc<dyn EntityMetadata>) -> &mut Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn column_case(&mut self, column_case: ColumnCase) -> &mut Self {
        self.options.column_case = column_case;
        self
    }

    /// Match column names ignoring ASCII case.
    pub fn case_insensitive_columns(&mut self) -> &mut Self {
        self.column_case(ColumnCase::Insensitive)
    }

    pub fn diagnostics(&mut self, enabled: bool) -> &mut Self {
        self.options.diagnostics = enabled;
        self
    }

    pub fn build(&self) -> Result<Materializer> {
        let Some(metadata) = &self.metadata else {
            bail!("materializer requires an entity metadata provider");
        };

        Ok(Materializer {
            metadata: metadata.clone(),
            options: self.options.clone(),
        })
    }
}
