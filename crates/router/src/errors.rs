//! Error types for route parsing, handler registration, and dispatch.
//!
//! [`RegistrationError`] is produced at setup time and is fatal to
//! initialization. [`DispatchError`] is produced per call and is recoverable
//! by the caller (e.g. by answering with a generic failure response).
//!
//! None of these errors are logged by the router; they are returned to the
//! caller exactly once.

use events::{EventKind, ParseError};
use thiserror::Error;

use crate::RouteSpec;

// ---------------------------------------------------------------------------
// Route templates
// ---------------------------------------------------------------------------

/// A path template or route string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Templates are absolute request paths.
    #[error("path template '{template}' must start with '/'")]
    MissingLeadingSlash {
        /// The rejected template.
        template: String,
    },

    /// A `{}` placeholder without a name.
    #[error("path template '{template}' contains an unnamed parameter")]
    EmptyParameter {
        /// The rejected template.
        template: String,
    },

    /// A brace that does not delimit a whole segment.
    #[error("path template '{template}' has a malformed segment '{segment}'")]
    MalformedSegment {
        /// The rejected template.
        template: String,
        /// The offending segment.
        segment: String,
    },

    /// The same placeholder name appears twice.
    #[error("path template '{template}' binds parameter '{name}' more than once")]
    DuplicateParameter {
        /// The rejected template.
        template: String,
        /// The repeated parameter name.
        name: String,
    },

    /// The HTTP method was empty or whitespace.
    #[error("route method must not be empty")]
    EmptyMethod,

    /// A `"METHOD /path"` route string without both parts.
    #[error("route '{route}' must have the form 'METHOD /path'")]
    InvalidRouteString {
        /// The rejected route string.
        route: String,
    },
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// A handler registration conflicts with the table or is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// An HTTP handler with the same path template and method already exists.
    #[error("a handler is already registered for route {route}")]
    DuplicateRoute {
        /// The conflicting route.
        route: RouteSpec,
    },

    /// A non-HTTP kind already has its single handler.
    #[error("a handler is already registered for {kind} events")]
    DuplicateKind {
        /// The conflicting kind.
        kind: EventKind,
    },

    /// A fallback handler already exists.
    #[error("a fallback handler is already registered")]
    DuplicateFallback,

    /// HTTP registrations are disambiguated by route and must carry one.
    #[error("http_gateway registrations require a route")]
    MissingRoute,

    /// Only HTTP registrations may carry a route.
    #[error("{kind} registrations cannot carry a route (got {route})")]
    UnexpectedRoute {
        /// The kind being registered.
        kind: EventKind,
        /// The route that was supplied.
        route: RouteSpec,
    },

    /// Unclassified events are served by the fallback handler.
    #[error("unclassified events are handled by the fallback; use register_fallback")]
    UnclassifiedKind,

    /// A route string given to a convenience method did not parse.
    #[error(transparent)]
    InvalidRoute(#[from] RouteError),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Failure of a single dispatch call.
///
/// `E` is the registered handlers' error type; it is carried unmodified in
/// [`DispatchError::Handler`].
#[derive(Debug, Error)]
pub enum DispatchError<E> {
    /// Nothing matched and no fallback is registered.
    #[error("no handler found for {kind} event")]
    NoHandlerFound {
        /// Kind the event was classified as.
        kind: EventKind,
    },

    /// The event matched a registration but could not be normalized.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The invoked handler returned an error.
    #[error("{0}")]
    Handler(E),
}

impl<E> DispatchError<E> {
    /// Returns the handler's own error, if that is what failed.
    pub fn into_handler_error(self) -> Option<E> {
        match self {
            DispatchError::Handler(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if no registration (and no fallback) accepted the event.
    pub fn is_no_handler_found(&self) -> bool {
        matches!(self, DispatchError::NoHandlerFound { .. })
    }
}
