use std::sync::Arc;

use stockcheck_availability::{
    evaluate, normalize, render, KindPolicy, RawStockRequest, ReasonCode, RenderOptions,
    StockCheckReply,
};
use stockcheck_inventory::{CatalogError, InMemoryCatalog, InventoryFact, InventoryLookup};

use crate::config::ApiConfig;

/// Everything a request handler needs: the inventory lookup and the check policy.
pub struct AppServices {
    lookup: Arc<dyn InventoryLookup>,
    /// Set when the lookup is the in-memory catalog (exposed read-only for local runs).
    catalog: Option<Arc<InMemoryCatalog>>,
    policy: KindPolicy,
    render: RenderOptions,
}

impl AppServices {
    /// Wire services around an external lookup (e.g. a storefront catalog client).
    pub fn new(lookup: Arc<dyn InventoryLookup>, policy: KindPolicy, render: RenderOptions) -> Self {
        Self {
            lookup,
            catalog: None,
            policy,
            render,
        }
    }

    /// Wire services around an in-memory catalog.
    pub fn with_catalog(catalog: Arc<InMemoryCatalog>, policy: KindPolicy, render: RenderOptions) -> Self {
        Self {
            lookup: catalog.clone(),
            catalog: Some(catalog),
            policy,
            render,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let catalog = InMemoryCatalog::from_json_file(path)?;
                tracing::info!(
                    path = %path.display(),
                    products = catalog.len(),
                    "loaded inventory catalog"
                );
                catalog
            }
            None => {
                tracing::warn!("no catalog configured; every product will be reported as not found");
                InMemoryCatalog::new()
            }
        };

        Ok(Self::with_catalog(
            Arc::new(catalog),
            config.kind_policy.clone(),
            config.render.clone(),
        ))
    }

    pub fn catalog_facts(&self) -> Option<Vec<InventoryFact>> {
        self.catalog.as_ref().map(|c| c.list())
    }

    /// Run one availability check end to end: normalize, evaluate, render.
    ///
    /// Lookup failures are logged here and answered with the generic
    /// `unexpected_error` message.
    #[tracing::instrument(
        name = "stock_check",
        skip_all,
        fields(product_id = tracing::field::Empty, kind = tracing::field::Empty)
    )]
    pub fn check(&self, raw: &RawStockRequest) -> StockCheckReply {
        let request = match normalize(raw, &self.policy) {
            Ok(request) => request,
            Err(reason) => {
                tracing::info!(code = reason.code(), "stock check rejected");
                return StockCheckReply::rejected(&reason);
            }
        };

        let span = tracing::Span::current();
        span.record("product_id", request.product_id().get());
        span.record("kind", request.kind().as_str());

        match evaluate(&request, &*self.lookup) {
            Ok(outcome) => {
                tracing::info!(outcome = outcome.label(), "stock check evaluated");
                render(&outcome, &self.render)
            }
            Err(e) => {
                tracing::error!(error = %e, "inventory lookup failed");
                StockCheckReply::rejected(&ReasonCode::UnexpectedError)
            }
        }
    }
}
