//! Custom routes utilities for extending the API router.

use aide::axum::ApiRouter;

use crate::service::ServiceState;

/// Extra routes merged into the main API router.
///
/// Private routes are nested under `/api` next to the built-in resources and
/// are expected to take an [`AuthState`]. Public routes are mounted at the root.
///
/// ```rust,ignore
/// use quill_server::handler::CustomRoutes;
///
/// let custom = CustomRoutes::new()
///     .with_private_routes(some_private_router)
///     .with_public_routes(some_public_router);
/// ```
///
/// [`AuthState`]: crate::extract::AuthState
#[derive(Default, Clone)]
pub struct CustomRoutes {
    /// Custom routes under `/api`.
    pub private_routes: Option<ApiRouter<ServiceState>>,
    /// Custom routes outside `/api`.
    pub public_routes: Option<ApiRouter<ServiceState>>,
}

impl CustomRoutes {
    /// Creates a new empty `CustomRoutes` instance.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the private routes.
    pub fn with_private_routes(mut self, routes: ApiRouter<ServiceState>) -> Self {
        self.private_routes = Some(routes);
        self
    }

    /// Sets the public routes.
    pub fn with_public_routes(mut self, routes: ApiRouter<ServiceState>) -> Self {
        self.public_routes = Some(routes);
        self
    }

    /// Returns true if no custom routes are configured.
    pub fn is_empty(&self) -> bool {
        self.private_routes.is_none() && self.public_routes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        assert!(CustomRoutes::new().is_empty());
        assert!(!CustomRoutes::new().with_public_routes(ApiRouter::new()).is_empty());
    }
}
