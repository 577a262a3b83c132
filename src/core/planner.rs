use crate::config::Config;
use crate::core::error::Result;
use crate::core::prompt::Prompter;
use crate::core::{
    parse_catalog, resolve_target, select_variant, subtitle_fetch, synthesize, verify_file_name, CommandRequest,
    PageMetadata, PlayerPage, ResolvedTarget, StreamVariant, TitleParser, ToolInvocation,
};
use crate::utils::split_args;

/// Everything decided for one page, in execution order.
#[derive(Debug, Clone)]
pub struct Plan {
    pub metadata: PageMetadata,
    pub variant: StreamVariant,
    pub target: ResolvedTarget,
    pub invocations: Vec<ToolInvocation>,
}

/// Resolve `page` into the commands to run. Nothing is executed here.
pub fn plan(page: &PlayerPage, config: &Config, prompter: &mut dyn Prompter) -> Result<Plan> {
    let metadata = TitleParser::new().parse(&page.title);
    if metadata.is_empty() {
        tracing::warn!("No program or episode name in title {:?}", page.title);
    }
    let catalog = parse_catalog(&page.flashvars)?;
    let variant = select_variant(&catalog, &config.quality_constraint(), prompter)?;
    let target = resolve_target(&variant, &metadata, config.extension.as_deref());

    tracing::info!(
        "Stream: {} kbps {} -> {}",
        variant.bitrate_kbps,
        variant.player_type,
        target.final_url
    );

    let mut invocations = Vec::new();

    if config.subtitles {
        match catalog.subtitle_url.as_deref() {
            Some(url) => {
                let path = config.output_path(&target.subtitle_file_name());
                let path = verify_file_name(&path, config.silent, prompter)?;
                invocations.push(subtitle_fetch(url, &path));
            }
            None => tracing::info!("No subtitles available"),
        }
    }

    let output = if config.mode.writes_output() {
        let path = config.output_path(&target.file_name());
        Some(verify_file_name(&path, config.silent, prompter)?)
    } else {
        None
    };

    let extra_args = split_args(&config.extra_args)?;
    invocations.push(synthesize(
        config.mode,
        &CommandRequest {
            url: &target.final_url,
            player_url: &page.player_url,
            output: output.as_deref(),
            extra_args: &extra_args,
        },
    ));

    Ok(Plan {
        metadata,
        variant,
        target,
        invocations,
    })
}
