//! State

use std::sync::Arc;

use kasir_app::context::AppContext;

#[cfg(test)]
use kasir_app::domain::{products::ProductsService, registers::RegistersService};

/// Shared handler state, injected into the depot once per router.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }

    /// State over explicit service implementations, bypassing the register wiring.
    #[cfg(test)]
    pub(crate) fn with_services(
        products: Arc<dyn ProductsService>,
        registers: Arc<dyn RegistersService>,
    ) -> Arc<Self> {
        Self::from_app_context(AppContext {
            products,
            registers,
        })
    }
}
