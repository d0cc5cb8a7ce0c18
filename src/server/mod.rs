//! HTTP server exposing the gift recommendation core.
//!
//! The UI (or any other caller) reaches the gateway through these routes.
//! All responses carry permissive CORS headers and pre-flight requests are
//! answered.
//!
//! # Endpoints
//!
//! - `GET  /health`      — Liveness probe
//! - `POST /gift-helper` — Recommendations for a canonical payload
//! - `POST /gift-ideas`  — Recommendations for raw questionnaire values

pub mod routes;

pub use routes::{app_router, AppState};
