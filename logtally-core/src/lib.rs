pub mod cli;
pub mod conf;
pub mod error;
pub mod logging;
pub mod summary;

pub use error::SummaryError;
