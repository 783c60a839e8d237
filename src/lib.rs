//! faqrouter: FAQ answer routing between similarity retrieval and
//! constrained LLM generation
//!
//! Per query the service retrieves the closest pre-authored FAQ answer with
//! its similarity score, then routes on that score: high scores return the
//! document as-is, gray-zone scores get an extra LLM relevance verdict, and
//! low scores go straight to a generative answer grounded in the app's
//! knowledge context.
//!
//! # Examples
//!
//! ```rust,no_run
//! use faqrouter::AppConfig;
//! use faqrouter::FaqService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = FaqService::new(&config)?;
//!
//!     let answer = service.get_response("How do I add food daily?").await?;
//!     println!("{answer}");
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod fallback;
pub mod judge;
pub mod llm;
pub mod logging;
pub mod prompts;
pub mod retrieval;
pub mod router;

pub use config::AppConfig;
pub use errors::*;
pub use router::FaqService;
pub use router::RoutePath;
pub use router::RoutedResponse;
pub use router::Thresholds;
