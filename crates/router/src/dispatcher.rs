//! The dispatch entry point.
//!
//! ```text
//! RawEvent ─► classify ─► (HTTP: normalize ─► match routes) ─► normalize ─► handler
//!                  │                          │
//!                  └── unclassified ──────────┴── no registration ─► fallback | NoHandlerFound
//! ```
//!
//! Dispatch only reads the frozen [`RegistryTable`]; a [`Router`] can be
//! shared by reference across threads and invoked concurrently. Exactly one
//! handler runs per call, and nothing is retried: classification and
//! normalization are deterministic functions of the input.

use events::{normalize, normalize_http_gateway, CustomEvent, EventKind, NormalizedEvent, RawEvent};
use tracing::debug;

use crate::registry::{RegistryTable, RouterBuilder};
use crate::{classify, DispatchError};

/// An immutable table of handlers plus the dispatch algorithm.
///
/// Built with [`Router::builder`].
pub struct Router<C, T, E> {
    table: RegistryTable<C, T, E>,
}

impl<C, T, E> Router<C, T, E> {
    /// Starts a new, empty registration table.
    pub fn builder() -> RouterBuilder<C, T, E> {
        RouterBuilder::new()
    }

    pub(crate) fn from_table(table: RegistryTable<C, T, E>) -> Self {
        Self { table }
    }

    /// Number of registrations, excluding the fallback.
    pub fn route_count(&self) -> usize {
        self.table.len()
    }

    pub fn has_fallback(&self) -> bool {
        self.table.fallback().is_some()
    }

    /// Classifies `raw` without dispatching it.
    pub fn classify(&self, raw: &RawEvent) -> EventKind {
        classify(raw)
    }

    /// Routes `raw` to exactly one handler and returns its result.
    ///
    /// `context` is forwarded to the handler unexamined. The handler's `Ok`
    /// value is returned as-is; its error is returned unmodified inside
    /// [`DispatchError::Handler`].
    ///
    /// # Errors
    ///
    /// - [`DispatchError::NoHandlerFound`] when nothing matches and no
    ///   fallback is registered.
    /// - [`DispatchError::Parse`] when the matched kind's required fields are
    ///   absent or malformed.
    /// - [`DispatchError::Handler`] when the handler fails.
    pub fn dispatch(&self, raw: RawEvent, context: &C) -> Result<T, DispatchError<E>> {
        let kind = classify(&raw);
        match kind {
            EventKind::HttpGateway => self.dispatch_http(raw, context),
            EventKind::Queue
            | EventKind::ObjectStore
            | EventKind::ChangeStream
            | EventKind::DataStream
            | EventKind::PubSub
            | EventKind::Bus
            | EventKind::LogStream => self.dispatch_kind(kind, raw, context),
            EventKind::Unclassified => self.dispatch_fallback(kind, raw, context),
        }
    }

    fn dispatch_http(&self, raw: RawEvent, context: &C) -> Result<T, DispatchError<E>> {
        let kind = EventKind::HttpGateway;
        if self.table.http_routes().next().is_none() {
            return self.dispatch_fallback(kind, raw, context);
        }

        let mut event = normalize_http_gateway(&raw)?;
        let matched = self
            .table
            .http_routes()
            .find_map(|(route, registration)| Some((route, registration, route.matches(&event)?)));

        match matched {
            Some((route, registration, params)) => {
                debug!(%route, path = %event.path, "route matched");
                event.path_parameters.extend(params);
                registration
                    .invoke(NormalizedEvent::HttpGateway(event), context)
                    .map_err(DispatchError::Handler)
            }
            None => {
                debug!(method = %event.http_method, path = %event.path, "no route matched");
                self.dispatch_fallback(kind, raw, context)
            }
        }
    }

    fn dispatch_kind(&self, kind: EventKind, raw: RawEvent, context: &C) -> Result<T, DispatchError<E>> {
        let Some(registration) = self.table.for_kind(kind) else {
            return self.dispatch_fallback(kind, raw, context);
        };
        let event = normalize(kind, &raw)?;
        registration
            .invoke(event, context)
            .map_err(DispatchError::Handler)
    }

    fn dispatch_fallback(&self, kind: EventKind, raw: RawEvent, context: &C) -> Result<T, DispatchError<E>> {
        let Some(fallback) = self.table.fallback() else {
            return Err(DispatchError::NoHandlerFound { kind });
        };
        debug!(%kind, "dispatching to fallback handler");
        fallback
            .invoke(NormalizedEvent::Custom(CustomEvent::new(raw)), context)
            .map_err(DispatchError::Handler)
    }
}

impl<C, T, E> std::fmt::Debug for Router<C, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").field("table", &self.table).finish()
    }
}
