pub mod advice;
pub mod aio;
pub mod analyzer;
pub mod classify;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod fetch;
pub mod industry;
pub mod integrate;
pub mod page_facts;
pub mod personalization;
pub mod seo;
pub mod text;

pub use analyzer::{AnalysisReport, Analyzer};
pub use error::{Result, SeoAioError};
