//! Host-SPI surface
//!
//! The host query engine talks to the adapter through [`TableProvider`], a
//! fixed callback set decoupled from any specific engine. The concrete
//! [`SearchIndexProvider`] wires the pipeline: predicate compiler → split
//! planner → scan executor, all over one cluster client.

use std::sync::Arc;

use serde_json::Value;

use super::errors::ProviderResult;
use crate::client::{IndexMetadata, SearchClient};
use crate::config::ScanParams;
use crate::query::{compile, ColumnConstraint};
use crate::scan::{DocumentStream, ScanExecutor};
use crate::split::{SplitDescriptor, SplitPlanner, TableIdentity};

/// Fixed SPI a host engine calls into
pub trait TableProvider {
    /// Resolves the column listing of a table
    fn table_metadata(&self, table: &TableIdentity) -> ProviderResult<IndexMetadata>;

    /// Compiles the constraints and plans the splits for one table scan
    fn plan_splits(
        &self,
        table: &TableIdentity,
        constraints: &[ColumnConstraint],
        params: &ScanParams,
    ) -> ProviderResult<Vec<SplitDescriptor>>;

    /// Opens one split and returns its row stream
    fn execute_split(&self, split: &SplitDescriptor) -> ProviderResult<DocumentStream>;
}

/// Administrative operations boundary.
///
/// Index lifecycle and bulk writes are external collaborators; the trait
/// pins down their shape without this core implementing them.
pub trait AdminOps {
    /// Creates an index with the given column mapping
    fn create_index(&self, table: &TableIdentity, columns: &[(String, Value)])
        -> ProviderResult<()>;

    /// Drops an index
    fn drop_index(&self, table: &TableIdentity) -> ProviderResult<()>;

    /// Bulk-inserts documents into an index
    fn insert_many(&self, table: &TableIdentity, documents: Vec<Value>) -> ProviderResult<()>;
}

/// Concrete provider over one search cluster
pub struct SearchIndexProvider {
    client: Arc<dyn SearchClient>,
    planner: SplitPlanner,
    executor: ScanExecutor,
}

impl SearchIndexProvider {
    /// Creates a provider over the given cluster client
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self {
            planner: SplitPlanner::new(Arc::clone(&client)),
            executor: ScanExecutor::new(Arc::clone(&client)),
            client,
        }
    }
}

impl TableProvider for SearchIndexProvider {
    fn table_metadata(&self, table: &TableIdentity) -> ProviderResult<IndexMetadata> {
        Ok(self.client.index_metadata(table.index())?)
    }

    fn plan_splits(
        &self,
        table: &TableIdentity,
        constraints: &[ColumnConstraint],
        params: &ScanParams,
    ) -> ProviderResult<Vec<SplitDescriptor>> {
        let compiled = compile(constraints)?;
        Ok(self.planner.plan(table, &compiled, params)?)
    }

    fn execute_split(&self, split: &SplitDescriptor) -> ProviderResult<DocumentStream> {
        Ok(self.executor.open(split)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockSearchClient;
    use crate::query::FieldType;

    #[test]
    fn test_metadata_passes_through() {
        let metadata = IndexMetadata::new(
            "logs",
            vec![("message".to_string(), FieldType::Text)],
        );
        let client = Arc::new(MockSearchClient::new().with_metadata(metadata.clone()));
        let provider = SearchIndexProvider::new(client);

        let resolved = provider
            .table_metadata(&TableIdentity::new("default", "logs"))
            .unwrap();
        assert_eq!(resolved, metadata);
    }

    #[test]
    fn test_mapping_failure_is_opaque_and_fatal() {
        let client = Arc::new(MockSearchClient::new());
        let provider = SearchIndexProvider::new(client);

        let err = provider
            .table_metadata(&TableIdentity::new("default", "missing"))
            .unwrap_err();
        assert_eq!(err.code(), "MAPPING_ERROR");
    }

    #[test]
    fn test_unsupported_predicate_fails_before_planning() {
        let client = Arc::new(MockSearchClient::new());
        let provider = SearchIndexProvider::new(client);

        let constraints = vec![ColumnConstraint::equal(
            "_type",
            FieldType::Keyword,
            serde_json::json!("doc"),
        )];
        let err = provider
            .plan_splits(
                &TableIdentity::new("default", "logs"),
                &constraints,
                &ScanParams::default(),
            )
            .unwrap_err();
        assert_eq!(err.code(), "PREDICATE_UNSUPPORTED");
    }
}
