//! Handler registration.
//!
//! Handlers are registered on a [`RouterBuilder`] during initialization. The
//! builder validates every registration against the table invariants:
//!
//! - no two HTTP registrations share a method and a template shape
//!   (templates differing only in parameter names are the same shape);
//! - every non-HTTP kind has at most one handler;
//! - at most one fallback handler exists.
//!
//! [`RouterBuilder::build`] consumes the builder and freezes the table into a
//! [`Router`], so registration after dispatch has begun cannot be expressed.

use std::collections::BTreeMap;

use events::{EventKind, NormalizedEvent};
use tracing::debug;

use crate::{RegistrationError, RouteSpec, Router};

/// A bound handler: receives the normalized event and the caller's opaque
/// context, and returns whatever the caller's runtime expects.
pub type Handler<C, T, E> = Box<dyn Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync>;

/// One entry of the registry table.
pub struct HandlerRegistration<C, T, E> {
    kind: EventKind,
    route: Option<RouteSpec>,
    handler: Handler<C, T, E>,
}

impl<C, T, E> HandlerRegistration<C, T, E> {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The route, present exactly for [`EventKind::HttpGateway`] registrations.
    pub fn route(&self) -> Option<&RouteSpec> {
        self.route.as_ref()
    }

    pub(crate) fn invoke(&self, event: NormalizedEvent, context: &C) -> Result<T, E> {
        (self.handler)(event, context)
    }
}

impl<C, T, E> std::fmt::Debug for HandlerRegistration<C, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistration")
            .field("kind", &self.kind)
            .field("route", &self.route)
            .field("handler", &"<Box<dyn Fn>>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// HTTP registrations in insertion order, one slot per other kind, and the
/// optional fallback.
pub struct RegistryTable<C, T, E> {
    http: Vec<HandlerRegistration<C, T, E>>,
    by_kind: BTreeMap<EventKind, HandlerRegistration<C, T, E>>,
    fallback: Option<HandlerRegistration<C, T, E>>,
}

impl<C, T, E> RegistryTable<C, T, E> {
    fn new() -> Self {
        Self {
            http: Vec::new(),
            by_kind: BTreeMap::new(),
            fallback: None,
        }
    }

    /// HTTP registrations with their routes, in registration order.
    pub fn http_routes(&self) -> impl Iterator<Item = (&RouteSpec, &HandlerRegistration<C, T, E>)> {
        self.http
            .iter()
            .filter_map(|registration| Some((registration.route.as_ref()?, registration)))
    }

    /// The single registration for a non-HTTP kind.
    pub fn for_kind(&self, kind: EventKind) -> Option<&HandlerRegistration<C, T, E>> {
        self.by_kind.get(&kind)
    }

    pub fn fallback(&self) -> Option<&HandlerRegistration<C, T, E>> {
        self.fallback.as_ref()
    }

    /// Number of registrations, excluding the fallback.
    pub fn len(&self) -> usize {
        self.http.len() + self.by_kind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.fallback.is_none()
    }
}

impl<C, T, E> std::fmt::Debug for RegistryTable<C, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryTable")
            .field("http", &self.http)
            .field("by_kind", &self.by_kind)
            .field("fallback", &self.fallback)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects registrations during initialization.
///
/// `C` is the invocation context type, `T` the handlers' output, `E` their
/// error. All handlers of one router share these types.
pub struct RouterBuilder<C, T, E> {
    table: RegistryTable<C, T, E>,
}

impl<C, T, E> RouterBuilder<C, T, E> {
    pub fn new() -> Self {
        Self {
            table: RegistryTable::new(),
        }
    }

    /// Binds `handler` to `kind`.
    ///
    /// `route` is required for [`EventKind::HttpGateway`] and forbidden for
    /// every other kind. [`EventKind::Unclassified`] cannot be registered here;
    /// use [`Self::register_fallback`].
    pub fn register<F>(
        &mut self,
        kind: EventKind,
        route: Option<RouteSpec>,
        handler: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync + 'static,
    {
        let handler: Handler<C, T, E> = Box::new(handler);
        match (kind, route) {
            (EventKind::Unclassified, _) => return Err(RegistrationError::UnclassifiedKind),
            (EventKind::HttpGateway, None) => return Err(RegistrationError::MissingRoute),
            (EventKind::HttpGateway, Some(route)) => {
                if self
                    .table
                    .http
                    .iter()
                    .filter_map(|r| r.route.as_ref())
                    .any(|existing| existing.conflicts_with(&route))
                {
                    return Err(RegistrationError::DuplicateRoute { route });
                }
                debug!(%route, "registered http handler");
                self.table.http.push(HandlerRegistration {
                    kind,
                    route: Some(route),
                    handler,
                });
            }
            (kind, Some(route)) => return Err(RegistrationError::UnexpectedRoute { kind, route }),
            (kind, None) => {
                if self.table.by_kind.contains_key(&kind) {
                    return Err(RegistrationError::DuplicateKind { kind });
                }
                debug!(%kind, "registered handler");
                self.table.by_kind.insert(
                    kind,
                    HandlerRegistration {
                        kind,
                        route: None,
                        handler,
                    },
                );
            }
        }
        Ok(self)
    }

    /// Binds the handler used when nothing else matches. It receives
    /// [`NormalizedEvent::Custom`] wrapping the raw event.
    pub fn register_fallback<F>(&mut self, handler: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync + 'static,
    {
        if self.table.fallback.is_some() {
            return Err(RegistrationError::DuplicateFallback);
        }
        debug!("registered fallback handler");
        self.table.fallback = Some(HandlerRegistration {
            kind: EventKind::Unclassified,
            route: None,
            handler: Box::new(handler),
        });
        Ok(self)
    }

    /// Binds an HTTP handler to `method` + `template` (e.g. `"GET"`, `"/users/{id}"`).
    pub fn http<F>(
        &mut self,
        template: &str,
        method: &str,
        handler: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync + 'static,
    {
        let route = RouteSpec::new(template, method)?;
        self.register(EventKind::HttpGateway, Some(route), handler)
    }

    pub fn queue<F>(&mut self, handler: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register(EventKind::Queue, None, handler)
    }

    pub fn object_store<F>(&mut self, handler: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register(EventKind::ObjectStore, None, handler)
    }

    pub fn change_stream<F>(&mut self, handler: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register(EventKind::ChangeStream, None, handler)
    }

    pub fn data_stream<F>(&mut self, handler: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register(EventKind::DataStream, None, handler)
    }

    pub fn pub_sub<F>(&mut self, handler: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register(EventKind::PubSub, None, handler)
    }

    pub fn bus<F>(&mut self, handler: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register(EventKind::Bus, None, handler)
    }

    pub fn log_stream<F>(&mut self, handler: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register(EventKind::LogStream, None, handler)
    }

    /// Alias of [`Self::register_fallback`].
    pub fn fallback<F>(&mut self, handler: F) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(NormalizedEvent, &C) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register_fallback(handler)
    }

    /// Freezes the table. The returned router is read-only.
    pub fn build(self) -> Router<C, T, E> {
        Router::from_table(self.table)
    }
}

impl<C, T, E> Default for RouterBuilder<C, T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, T, E> std::fmt::Debug for RouterBuilder<C, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterBuilder")
            .field("table", &self.table)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Builder = RouterBuilder<(), &'static str, String>;

    fn ok(_: NormalizedEvent, _: &()) -> Result<&'static str, String> {
        Ok("ok")
    }

    #[test]
    fn test_duplicate_route_is_rejected() {
        let mut builder = Builder::new();
        builder.http("/users/{id}", "GET", ok).unwrap();
        let err = builder.http("/users/{id}", "get", ok).unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateRoute { .. }));
        assert_eq!(err.to_string(), "a handler is already registered for route GET /users/{id}");
    }

    #[test]
    fn test_same_template_different_method_is_allowed() {
        let mut builder = Builder::new();
        builder.http("/users", "GET", ok).unwrap().http("/users", "POST", ok).unwrap();
        assert_eq!(builder.table.http_routes().count(), 2);
    }

    #[test]
    fn test_duplicate_kind_is_rejected() {
        let mut builder = Builder::new();
        builder.queue(ok).unwrap();
        assert_eq!(
            builder.queue(ok).unwrap_err(),
            RegistrationError::DuplicateKind { kind: EventKind::Queue }
        );
    }

    #[test]
    fn test_duplicate_fallback_is_rejected() {
        let mut builder = Builder::new();
        builder.register_fallback(ok).unwrap();
        assert_eq!(builder.fallback(ok).unwrap_err(), RegistrationError::DuplicateFallback);
    }

    #[test]
    fn test_route_presence_is_validated() {
        let mut builder = Builder::new();
        assert_eq!(
            builder.register(EventKind::HttpGateway, None, ok).unwrap_err(),
            RegistrationError::MissingRoute
        );

        let route = RouteSpec::new("/x", "GET").unwrap();
        assert!(matches!(
            builder.register(EventKind::Bus, Some(route), ok),
            Err(RegistrationError::UnexpectedRoute { kind: EventKind::Bus, .. })
        ));

        assert_eq!(
            builder.register(EventKind::Unclassified, None, ok).unwrap_err(),
            RegistrationError::UnclassifiedKind
        );
        assert!(builder.table.is_empty());
    }

    #[test]
    fn test_invalid_route_string_is_reported() {
        let mut builder = Builder::new();
        assert!(matches!(
            builder.http("no-slash", "GET", ok),
            Err(RegistrationError::InvalidRoute(_))
        ));
    }

    #[test]
    fn test_same_shape_route_is_a_duplicate() {
        let mut builder = Builder::new();
        builder.http("/users/{id}", "GET", ok).unwrap();
        let err = builder.http("/users/{uid}", "GET", ok).unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateRoute { .. }));
        assert_eq!(builder.table.len(), 1);

        builder.http("/users/me", "GET", ok).unwrap();
        assert_eq!(builder.table.len(), 2);
    }
}
