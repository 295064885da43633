pub mod extract_service;
pub mod fetch_service;
pub mod pipeline;
pub mod rate_limiter;
pub mod sentiment_service;
