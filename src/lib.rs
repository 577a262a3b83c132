pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod utils;

pub use config::{Config, Mode};
pub use self::core::{plan, ExtractorEngine, Launcher, Plan, PlayerPage, ResolveError, ToolInvocation};
pub use extractors::SvtPlayExtractor;
