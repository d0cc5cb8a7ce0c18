//! # giftwise
//!
//! Gift idea recommendations for a shop questionnaire.
//!
//! The questionnaire UI hands over raw form values; the [`PayloadMapper`]
//! turns them into a canonical [`GiftRequest`] through fixed lookup tables,
//! and the [`RecommendationGateway`] sends that payload to an LLM
//! chat-completion endpoint and validates the answer into
//! [`Recommendations`]. [`GiftAssistant`] wires both into the two operations
//! the UI calls, `submit` and `refetch`; the [`server`] module exposes them
//! over HTTP.

pub mod assistant;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mapper;
pub mod server;
pub mod types;

pub use assistant::GiftAssistant;
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use gateway::RecommendationGateway;
pub use mapper::{LookupTables, PayloadMapper, RawFormValues};
pub use types::{
    Budget, GiftRequest, RecipientProfile, Recommendation, Recommendations, RiskTolerance,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
