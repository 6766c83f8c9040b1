pub mod models;
pub mod config;
pub mod client;
pub mod color;
pub mod customizer;
pub mod view;

pub use client::{StyleClient, StyleError, StyleService};
pub use config::Config;
pub use customizer::{RequestState, StyleCustomizer, SubmitOutcome, EXAMPLE_PROMPTS};
pub use models::{PresentationRequest, StyleResult};
