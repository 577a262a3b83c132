use crate::config::Config;
use crate::core::{Extractor, PlayerPage, ResolveError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

const SVTPLAY_DOMAIN: &str = "svtplay.se";

pub struct SvtPlayExtractor {
    client: reqwest::Client,
    site: Url,
}

impl SvtPlayExtractor {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout))
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("Failed to create HTTP client")?;
        let site = Url::parse(&config.site_url)
            .with_context(|| format!("Invalid site URL {}", config.site_url))?;

        Ok(Self { client, site })
    }

    /// The same page in its `type=embed` form, which carries the player params.
    pub fn embed_url(url: &Url) -> Url {
        let mut embed = url.clone();
        embed.query_pairs_mut().append_pair("type", "embed");
        embed
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("{:?}", e))
}

fn param_value(document: &Html, name: &str) -> Result<Option<String>> {
    let css = selector(&format!("param[name='{}']", name))?;
    Ok(document
        .select(&css)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(str::to_string))
}

/// Pull the title, player reference and flashvars out of an embed page.
///
/// The player reference is resolved against `site`, so both absolute paths
/// and full URLs work.
pub fn parse_embed_page(html: &str, site: &Url) -> Result<PlayerPage> {
    let document = Html::parse_document(html);

    let title_selector = selector("[data-title]")?;
    let title = document
        .select(&title_selector)
        .next()
        .and_then(|el| el.value().attr("data-title"))
        .map(str::to_string)
        .unwrap_or_else(|| {
            tracing::warn!("Page has no data-title, output file will be unnamed");
            String::new()
        });

    let movie = param_value(&document, "movie")?
        .ok_or(ResolveError::MissingPageElement("player reference (movie param)"))?;
    let player_url = site
        .join(&movie)
        .with_context(|| format!("Invalid player reference {}", movie))?
        .to_string();

    let flashvars = param_value(&document, "flashvars")?
        .ok_or(ResolveError::MissingPageElement("stream catalog (flashvars param)"))?;

    tracing::debug!("Page title: {:?}, player: {}", title, player_url);

    Ok(PlayerPage {
        title,
        player_url,
        flashvars,
    })
}

#[async_trait]
impl Extractor for SvtPlayExtractor {
    fn name(&self) -> &'static str {
        "svtplay"
    }

    fn suitable(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
            && url
                .host_str()
                .map(|host| host == SVTPLAY_DOMAIN || host.ends_with(&format!(".{}", SVTPLAY_DOMAIN)))
                .unwrap_or(false)
    }

    async fn extract(&self, url: &Url) -> Result<PlayerPage> {
        let embed = Self::embed_url(url);
        tracing::info!("Fetching {}", embed);

        let html = self
            .client
            .get(embed.as_str())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        tracing::debug!("Embed page length: {}", html.len());

        parse_embed_page(&html, &self.site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="playerWrapper" data-title="Nyheter - Rapport | SVT Play">
<object>
<param name="movie" value="/public/swf/video/svtplayer-2012.15.swf">
<param name="flashvars" value="json={&quot;video&quot;:{&quot;videoReferences&quot;:[]}}">
</object>
</div>
</body></html>"#;

    fn site() -> Url {
        Url::parse("http://www.svtplay.se").unwrap()
    }

    #[test]
    fn test_parse_embed_page() {
        let page = parse_embed_page(PAGE, &site()).unwrap();

        assert_eq!(page.title, "Nyheter - Rapport | SVT Play");
        assert_eq!(page.player_url, "http://www.svtplay.se/public/swf/video/svtplayer-2012.15.swf");
        assert_eq!(page.flashvars, r#"json={"video":{"videoReferences":[]}}"#);
    }

    #[test]
    fn test_missing_title_is_empty() {
        let html = PAGE.replace(r#" data-title="Nyheter - Rapport | SVT Play""#, "");
        let page = parse_embed_page(&html, &site()).unwrap();
        assert_eq!(page.title, "");
    }

    #[test]
    fn test_missing_flashvars_fails() {
        let html = PAGE.replace(r#"name="flashvars""#, r#"name="other""#);
        let err = parse_embed_page(&html, &site()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::MissingPageElement(_))
        ));
    }

    #[test]
    fn test_suitable_and_embed_url() {
        let extractor = SvtPlayExtractor::new(&Config::default()).unwrap();

        assert!(extractor.suitable(&Url::parse("http://www.svtplay.se/video/123/rapport").unwrap()));
        assert!(extractor.suitable(&Url::parse("https://svtplay.se/rapport").unwrap()));
        assert!(!extractor.suitable(&Url::parse("http://www.svt.se/nyheter").unwrap()));
        assert!(!extractor.suitable(&Url::parse("http://notsvtplay.se/x").unwrap()));

        let url = Url::parse("http://www.svtplay.se/video/123/rapport").unwrap();
        assert_eq!(
            SvtPlayExtractor::embed_url(&url).as_str(),
            "http://www.svtplay.se/video/123/rapport?type=embed"
        );
    }
}
