//! Tool Router - builds the rmcp ToolRouter from the definitions.
//!
//! Each tool knows how to create its own route; the payments gateway is
//! captured by every route closure rather than read from global state.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{CreateCheckoutSessionTool, ListProductsTool};
use crate::payments::PaymentsApi;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(payments: Arc<dyn PaymentsApi>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(CreateCheckoutSessionTool::create_route(payments.clone()))
        .with_route(ListProductsTool::create_route(payments))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::payments::mock::MockPayments;

    struct TestServer {}

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(Arc::new(MockPayments::new()));
        let tools = router.list_all();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"create_checkout_session"));
        assert!(names.contains(&"list_products"));
    }

    #[test]
    fn test_registry_matches_router() {
        let payments = Arc::new(MockPayments::new());
        let registry = ToolRegistry::new(payments.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(payments);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
