use crate::core::error::Result;
use crate::core::prompt::Prompter;
use crate::core::{PageMetadata, PlayerType, ResolvedTarget, StreamVariant};
use crate::utils::base_file_name;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use url::Url;

static SCHEME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^:]+://").expect("valid regex"));

/// Swap the URL scheme for the protocol the downstream tools expect.
pub fn rewrite_url(variant: &StreamVariant) -> String {
    let scheme = match variant.player_type {
        PlayerType::Ios => "applehttp://",
        PlayerType::Wmv => "mmsh://",
        PlayerType::Flash | PlayerType::Other(_) => return variant.url.clone(),
    };
    SCHEME.replace(&variant.url, scheme).into_owned()
}

/// Output extension including its dot, or empty if none can be derived.
pub fn file_extension(original_url: &str, extension_override: Option<&str>) -> String {
    if let Some(ext) = extension_override.map(|e| e.trim_start_matches('.')).filter(|e| !e.is_empty()) {
        return format!(".{}", ext);
    }

    let path = Url::parse(original_url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| original_url.to_string());
    let segment = path.rsplit('/').next().unwrap_or_default();

    match segment.rfind('.') {
        Some(dot) if dot + 1 < segment.len() => segment[dot..].to_string(),
        _ => String::new(),
    }
}

pub fn resolve_target(
    variant: &StreamVariant,
    metadata: &PageMetadata,
    extension_override: Option<&str>,
) -> ResolvedTarget {
    let target = ResolvedTarget {
        final_url: rewrite_url(variant),
        file_extension: file_extension(&variant.url, extension_override),
        base_file_name: base_file_name(metadata),
    };
    tracing::debug!("Resolved {} -> {}", variant.url, target.final_url);
    target
}

/// `name.ext` -> `name_new.ext`
fn alternative_name(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) => format!("{}_new{}", &file_name[..dot], &file_name[dot..]),
        None => format!("{}_new", file_name),
    }
}

/// Settle where output goes when `path` already exists.
///
/// Silent mode overwrites. Otherwise the operator may overwrite, accept a
/// `_new` name or type another file name in the same directory.
pub fn verify_file_name(path: &Path, silent: bool, prompter: &mut dyn Prompter) -> Result<PathBuf> {
    if !path.is_file() || silent {
        return Ok(path.to_path_buf());
    }

    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let proposed = dir.join(alternative_name(&file_name));

    prompter.show(&format!("The file {} exists already!", path.display()))?;
    let overwrite = prompter.ask("Do you want to overwrite? [y/N] ")?;
    if overwrite.trim().eq_ignore_ascii_case("y") {
        return Ok(path.to_path_buf());
    }

    let other = prompter.ask(&format!("Use new file name {}? [other file name] ", proposed.display()))?;
    let other = other.trim();
    if other.is_empty() {
        Ok(proposed)
    } else {
        Ok(dir.join(other))
    }
}
