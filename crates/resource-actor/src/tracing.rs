//! # Observability & Tracing
//!
//! Structured logging setup for actor systems built on this crate.
//!
//! Every actor logs its lifecycle (startup, each operation, shutdown) with
//! the entity type and ID as structured fields; client wrappers add
//! `#[instrument]` spans so a request can be followed from the caller into
//! the actor that served it.
//!
//! Verbosity is controlled through `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle events
//! RUST_LOG=debug cargo run    # full request payloads
//! ```

/// Initializes the tracing/logging infrastructure for the application.
///
/// Call once at startup, before any actor is spawned.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
