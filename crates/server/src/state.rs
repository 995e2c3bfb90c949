use ledgerlink_graph::GraphClient;
use ledgerlink_quickbooks::QuickBooksClient;

use crate::config::Config;

/// Shared, immutable application state. Both clients are stateless (tokens
/// travel with each request), so one instance serves every user.
pub struct AppState {
    pub config: Config,
    pub graph: GraphClient,
    pub quickbooks: QuickBooksClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let graph = GraphClient::with_base_url(config.graph_base_url.clone());
        let quickbooks = QuickBooksClient::with_base_url(config.quickbooks_base_url.clone());
        AppState {
            config,
            graph,
            quickbooks,
        }
    }
}
