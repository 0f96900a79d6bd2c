pub mod conf;
pub mod render;
pub mod summarize;

#[cfg(test)]
mod tests;

pub use conf::ConfigCmd;
pub use render::OutputFormat;
pub use summarize::{SummarizeArgs, run_summarize};
