//! Split planner
//!
//! Decides how many parallel scan units a table scan becomes. Shard-aware
//! mode produces one split per shard, routed to that shard; otherwise the
//! whole table is one split. Planning does no network I/O except the shard
//! topology lookup in shard-aware mode, and a topology failure fails the
//! whole call.

use std::sync::Arc;

use super::descriptor::{SplitDescriptor, TableIdentity};
use super::errors::{PlanError, PlanResult};
use super::request::ScanRequest;
use crate::client::SearchClient;
use crate::config::ScanParams;
use crate::observability::{emit, ScanEvent, Severity};
use crate::query::CompiledQuery;

/// Plans table scans into split descriptors
pub struct SplitPlanner {
    client: Arc<dyn SearchClient>,
}

impl SplitPlanner {
    /// Creates a planner over the given cluster client
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }

    /// Produces the splits for one table scan.
    ///
    /// Every descriptor shares the same compiled query, page size, and
    /// session timeout; shard-aware descriptors differ only in their routing
    /// hint.
    pub fn plan(
        &self,
        table: &TableIdentity,
        compiled: &CompiledQuery,
        params: &ScanParams,
    ) -> PlanResult<Vec<SplitDescriptor>> {
        let base = ScanRequest::new(
            table.index(),
            compiled.document.clone(),
            params.page_size,
            params.session_timeout.as_millis() as u64,
        );

        let requests = if params.shard_aware {
            let shards =
                self.client
                    .shard_topology(table.index())
                    .map_err(|source| PlanError::Topology {
                        index: table.index().to_string(),
                        source,
                    })?;
            shards
                .into_iter()
                .map(|shard| base.clone().with_shard(shard))
                .collect()
        } else {
            vec![base]
        };

        let mut splits = Vec::with_capacity(requests.len());
        for request in &requests {
            splits.push(SplitDescriptor::new(
                table.clone(),
                request,
                params.session_timeout,
                compiled.pushdown.clone(),
            )?);
        }

        emit(
            Severity::Info,
            &ScanEvent::SplitsPlanned {
                index: table.index().to_string(),
                splits: splits.len(),
                shard_aware: params.shard_aware,
            },
        );

        Ok(splits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockSearchClient;
    use crate::query::compile;

    fn compiled() -> CompiledQuery {
        compile(&[]).unwrap()
    }

    #[test]
    fn test_single_split_by_default() {
        let client = Arc::new(MockSearchClient::new());
        let planner = SplitPlanner::new(client);

        let splits = planner
            .plan(
                &TableIdentity::new("default", "logs"),
                &compiled(),
                &ScanParams::default(),
            )
            .unwrap();

        assert_eq!(splits.len(), 1);
        let request = splits[0].request().unwrap();
        assert_eq!(request.routing, None);
        assert_eq!(request.index, "logs");
    }

    #[test]
    fn test_shard_aware_produces_one_split_per_shard() {
        let client = Arc::new(MockSearchClient::new().with_topology("logs", vec![0, 1, 2]));
        let planner = SplitPlanner::new(client);
        let params = ScanParams::default().with_shard_aware(true);

        let splits = planner
            .plan(&TableIdentity::new("default", "logs"), &compiled(), &params)
            .unwrap();

        assert_eq!(splits.len(), 3);
        let routings: Vec<Option<String>> = splits
            .iter()
            .map(|s| s.request().unwrap().routing)
            .collect();
        assert_eq!(
            routings,
            vec![
                Some("_shards:0".to_string()),
                Some("_shards:1".to_string()),
                Some("_shards:2".to_string()),
            ]
        );
        // Identical query across all splits
        let queries: Vec<_> = splits.iter().map(|s| s.request().unwrap().query).collect();
        assert!(queries.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_topology_failure_fails_the_plan() {
        let client = Arc::new(
            MockSearchClient::new()
                .with_topology("logs", vec![0])
                .fail_topology(),
        );
        let planner = SplitPlanner::new(client);
        let params = ScanParams::default().with_shard_aware(true);

        let err = planner
            .plan(&TableIdentity::new("default", "logs"), &compiled(), &params)
            .unwrap_err();
        assert_eq!(err.code(), "SPLIT_TOPOLOGY");
    }
}
