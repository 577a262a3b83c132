use crate::config::Mode;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static HTTP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://").expect("valid regex"));
static RTMP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^rtmp([est]|te)?://").expect("valid regex"));

const DEFAULT_CODEC_ARGS: [&str; 4] = ["-acodec", "copy", "-vcodec", "copy"];

/// External program an invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Executable {
    /// Plain HTTP fetch (curl)
    HttpFetch,
    /// RTMP dump (rtmpdump)
    RtmpDump,
    Player,
    Transcoder,
}

impl Executable {
    pub fn program(&self) -> &'static str {
        match self {
            Executable::HttpFetch => "curl",
            Executable::RtmpDump => "rtmpdump",
            Executable::Player => "ffplay",
            Executable::Transcoder => "ffmpeg",
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Executable::HttpFetch | Executable::RtmpDump)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub executable: Executable,
    pub args: Vec<String>,
}

impl ToolInvocation {
    fn new(executable: Executable) -> Self {
        Self {
            executable,
            args: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_alphanumeric() || "-_./:=@%+,?&".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Shell-quoted command line, for printing only.
impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable.program())?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Everything the synthesizer needs about one stream.
#[derive(Debug, Clone)]
pub struct CommandRequest<'a> {
    pub url: &'a str,
    /// Player-embed reference used for SWF verification
    pub player_url: &'a str,
    /// Required for download and transcode, ignored for play
    pub output: Option<&'a Path>,
    pub extra_args: &'a [String],
}

pub fn is_rtmp(url: &str) -> bool {
    RTMP.is_match(url)
}

/// Input for ffplay/ffmpeg; RTMP URLs carry librtmp's SWF options inline.
fn media_input(url: &str, player_url: &str) -> String {
    if is_rtmp(url) {
        format!("{} swfUrl={} swfVfy=1", url, player_url)
    } else {
        url.to_string()
    }
}

fn output_arg(output: Option<&Path>) -> String {
    output.map(|p| p.to_string_lossy().into_owned()).unwrap_or_default()
}

pub fn synthesize(mode: Mode, request: &CommandRequest<'_>) -> ToolInvocation {
    let output = output_arg(request.output);

    match mode {
        Mode::Download if HTTP.is_match(request.url) => ToolInvocation::new(Executable::HttpFetch)
            .arg(request.url)
            .arg("-o")
            .arg(output)
            .args(request.extra_args.iter().cloned()),
        Mode::Download => ToolInvocation::new(Executable::RtmpDump)
            .arg("-r")
            .arg(request.url)
            .arg("-W")
            .arg(request.player_url)
            .arg("-o")
            .arg(output)
            .args(request.extra_args.iter().cloned()),
        Mode::Play => ToolInvocation::new(Executable::Player)
            .args(request.extra_args.iter().cloned())
            .arg(media_input(request.url, request.player_url)),
        Mode::Transcode => {
            let invocation = ToolInvocation::new(Executable::Transcoder)
                .arg("-i")
                .arg(media_input(request.url, request.player_url));
            let invocation = if request.extra_args.is_empty() {
                invocation.args(DEFAULT_CODEC_ARGS)
            } else {
                invocation.args(request.extra_args.iter().cloned())
            };
            invocation.arg(output)
        }
    }
}

pub fn subtitle_fetch(url: &str, output: &Path) -> ToolInvocation {
    ToolInvocation::new(Executable::HttpFetch)
        .arg(url)
        .arg("-o")
        .arg(output.to_string_lossy())
}
