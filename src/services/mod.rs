pub mod accounts;
pub mod library;
pub mod recommendations;
pub mod sinks;

pub use recommendations::{fallback_recommendations, RecommendationSource, StaticSource, TmdbSource};
pub use sinks::{DecisionSink, InMemorySink, ListRouting, RemoteSink};
