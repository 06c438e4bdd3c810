//! `centralstore-client` — transport interceptor and session wiring.
//!
//! **Responsibility:** the HTTP boundary of the client. Attaches the bearer
//! credential to outbound requests, classifies authorization failures once
//! and centrally, and wires the expired-session signal back into the
//! session lifecycle. The client is a thin shell around the central-storage
//! API; the server independently authorizes every request.

pub mod hooks;
pub mod http;
pub mod telemetry;
pub mod wiring;

pub use hooks::{FaultHooks, LogOnlyHooks};
pub use http::{classify, ApiClient};
pub use wiring::{Navigator, NoticeSink, SessionWiring};
