//! Universal event router for AWS Lambda functions.
//!
//! One function entry point receives events from many producers. This crate
//! decides which producer an event came from, picks the registered handler,
//! normalizes the event into that producer's typed record, and invokes the
//! handler with it.
//!
//! ```text
//! RawEvent ─► classify ─► match ─► normalize ─► dispatch ─► handler result
//! ```
//!
//! ## Architectural Layer
//!
//! **Pure routing logic.** No I/O, no async runtime, no global state. The
//! hosting runtime owns the invocation loop and calls [`Router::dispatch`]
//! once per event; the per-invocation context is opaque and simply forwarded.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`classifier`] | [`classify`] and the ordered [`RULES`] |
//! | [`path`] | [`PathTemplate`] and [`RouteSpec`] matching |
//! | [`registry`] | [`RouterBuilder`] and the frozen [`RegistryTable`] |
//! | [`dispatcher`] | [`Router`] and the dispatch algorithm |
//! | [`errors`] | [`RouteError`], [`RegistrationError`], [`DispatchError`] |
//!
//! ## Example
//!
//! ```
//! use router::{NormalizedEvent, Router};
//! use serde_json::json;
//!
//! let mut builder = Router::<(), String, String>::builder();
//! builder
//!     .http("/users/{id}", "GET", |event, _| match event {
//!         NormalizedEvent::HttpGateway(req) => Ok(req.path_parameters["id"].clone()),
//!         _ => Err("unexpected event".to_string()),
//!     })
//!     .unwrap();
//! let router = builder.build();
//!
//! let raw = json!({"httpMethod": "GET", "path": "/users/42"});
//! assert_eq!(router.dispatch(raw, &()).unwrap(), "42");
//! ```

pub mod classifier;
pub mod dispatcher;
pub mod errors;
pub mod path;
pub mod registry;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use classifier::{classify, Rule, Shape, RULES};
pub use dispatcher::Router;
pub use errors::{DispatchError, RegistrationError, RouteError};
pub use path::{PathParams, PathTemplate, RouteSpec, Segment};
pub use registry::{Handler, HandlerRegistration, RegistryTable, RouterBuilder};

pub use events::{self, CustomEvent, EventKind, NormalizedEvent, ParseError, RawEvent};
