pub mod catalog;
pub mod command;
pub mod error;
pub mod extractor;
pub mod launcher;
pub mod metadata;
pub mod planner;
pub mod prompt;
pub mod resolver;
pub mod selector;
pub mod title;

pub use catalog::parse_catalog;
pub use command::{subtitle_fetch, synthesize, CommandRequest, Executable, ToolInvocation};
pub use error::{ResolveError, Result};
pub use extractor::{Extractor, ExtractorEngine};
pub use launcher::Launcher;
pub use metadata::{
    PageMetadata, PlayerPage, PlayerType, QualityConstraint, ResolvedTarget, StreamCatalog, StreamVariant,
};
pub use planner::{plan, Plan};
pub use prompt::{ConsolePrompter, NoPrompt, Prompter};
pub use resolver::{file_extension, resolve_target, rewrite_url, verify_file_name};
pub use selector::{format_listing, select_variant};
pub use title::{TitleParser, TitleStrategy};
