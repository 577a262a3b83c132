use crate::config::{Config, Mode, Quality};
use crate::core::{
    plan, ConsolePrompter, ExtractorEngine, Launcher, NoPrompt, Plan, PlayerPage, Prompter,
};
use crate::extractors::{parse_embed_page, SvtPlayExtractor};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "svtget")]
#[command(about = "Download, play or transcode streams from SVT Play")]
#[command(version)]
pub struct Cli {
    /// SVT Play page URL (http://www.svtplay.se/...)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Quality of the stream: l=340, m=850, n=1400, h=2400 kbps
    #[arg(short, long, value_enum)]
    pub quality: Option<Quality>,

    /// Play the stream with ffplay
    #[arg(short, long, conflicts_with = "transcode")]
    pub play: bool,

    /// Transcode with ffmpeg, use -x to pass args to ffmpeg
    #[arg(short, long)]
    pub transcode: bool,

    /// Fetch subtitles
    #[arg(short, long)]
    pub subtitles: bool,

    /// Extension for the output file
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Args to pass on to the launched application
    #[arg(short = 'x', long, value_name = "ARGS", allow_hyphen_values = true)]
    pub xargs: Option<String>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Don't output any information
    #[arg(long)]
    pub silent: bool,

    /// Dry run, only prints the commands
    #[arg(long)]
    pub debug: bool,

    /// Fail instead of asking questions on stdin
    #[arg(long)]
    pub non_interactive: bool,

    /// Read a saved embed page instead of fetching URL
    #[arg(long, value_name = "FILE")]
    pub page_file: Option<PathBuf>,

    /// TOML file with default options
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// File config with command-line flags layered on top.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if self.play {
            config.mode = Mode::Play;
        } else if self.transcode {
            config.mode = Mode::Transcode;
        }
        if let Some(quality) = self.quality {
            config.bitrate = Some(quality.kbps());
        }
        if let Some(extension) = &self.extension {
            config.extension = Some(extension.clone());
        }
        if let Some(xargs) = &self.xargs {
            config.extra_args = xargs.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        config.subtitles |= self.subtitles;
        config.silent |= self.silent;
        config.debug |= self.debug;
        if self.non_interactive {
            config.interactive = false;
        }

        Ok(config)
    }

    async fn fetch_page(&self, config: &Config) -> Result<PlayerPage> {
        if let Some(path) = &self.page_file {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read page file {}", path.display()))?;
            let site = Url::parse(&config.site_url)?;
            return parse_embed_page(&html, &site);
        }

        let mut engine = ExtractorEngine::new();
        engine.register_extractor(Box::new(SvtPlayExtractor::new(config)?));
        engine.extract(&self.url).await
    }

    pub async fn run(&self) -> Result<()> {
        let config = self.config()?;
        tracing::debug!("Options: {:?}", config);

        let page = self.fetch_page(&config).await?;

        let plan = plan_blocking(page, config.clone()).await?;

        let launcher = Launcher::new(config.silent, config.debug);
        launcher.run_all(&plan.invocations).await?;

        Ok(())
    }
}

/// The console prompter reads stdin synchronously, so planning runs on the blocking pool.
async fn plan_blocking(page: PlayerPage, config: Config) -> Result<Plan> {
    let plan = tokio::task::spawn_blocking(move || {
        let mut prompter: Box<dyn Prompter> = if config.interactive {
            Box::new(ConsolePrompter::stdio())
        } else {
            Box::new(NoPrompt)
        };
        plan(&page, &config, prompter.as_mut())
    })
    .await
    .context("Planning task failed")??;

    Ok(plan)
}
