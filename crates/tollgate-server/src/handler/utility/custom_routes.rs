use aide::axum::ApiRouter;

use crate::service::ServiceState;

type Routes = ApiRouter<ServiceState>;

/// Extra routers mounted next to the built-in ones.
///
/// Private routes share the products' authentication requirement and
/// can extract [`AuthState`]; public routes never require a token.
/// Repeated calls merge rather than replace.
///
/// ```rust
/// use aide::axum::ApiRouter;
/// use tollgate_server::handler::CustomRoutes;
///
/// let custom = CustomRoutes::new().with_public_routes(ApiRouter::new());
/// assert!(!custom.is_empty());
/// ```
///
/// [`AuthState`]: crate::extract::AuthState
#[derive(Default)]
pub struct CustomRoutes {
    private_routes: Option<Routes>,
    public_routes: Option<Routes>,
}

fn merge(existing: Option<Routes>, routes: Routes) -> Option<Routes> {
    Some(match existing {
        Some(existing) => existing.merge(routes),
        None => routes,
    })
}

impl CustomRoutes {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_private_routes(self, routes: Routes) -> Self {
        Self {
            private_routes: merge(self.private_routes, routes),
            ..self
        }
    }

    pub fn with_public_routes(self, routes: Routes) -> Self {
        Self {
            public_routes: merge(self.public_routes, routes),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.private_routes.is_none() && self.public_routes.is_none()
    }

    /// Splits into `(private, public)`.
    pub(crate) fn into_parts(self) -> (Option<Routes>, Option<Routes>) {
        (self.private_routes, self.public_routes)
    }
}

#[cfg(test)]
mod test {
    use aide::axum::ApiRouter;

    use super::CustomRoutes;

    #[test]
    fn empty_until_routes_are_added() {
        assert!(CustomRoutes::new().is_empty());

        let (private, public) = CustomRoutes::new()
            .with_public_routes(ApiRouter::new())
            .with_public_routes(ApiRouter::new())
            .into_parts();
        assert!(private.is_none());
        assert!(public.is_some());
    }
}
