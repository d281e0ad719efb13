use crate::color::accent::AccentColor;

/// Optional background for a post. Raw images win over URLs.
#[derive(Clone, Debug, Default)]
pub enum BackgroundSource {
    #[default]
    None,
    Image(image::DynamicImage),
    /// Encoded image bytes, decoded during the render.
    Bytes(Vec<u8>),
    /// Resolved through the renderer's [`ImageFetcher`].
    Url(String),
}

/// Collaborator that turns a background URL into encoded image bytes.
///
/// Implementations own timeouts and transport errors; any failure is reported as `None` and
/// the render falls back to a solid background.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Option<Vec<u8>>;
}

/// Fetcher for deployments without network access. Always yields `None`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFetcher;

impl ImageFetcher for NoFetcher {
    fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        tracing::debug!(url, "no image fetcher configured");
        None
    }
}

/// Everything one render needs besides configuration.
#[derive(Clone, Debug, Default)]
pub struct RenderRequest {
    pub headline: String,
    /// Footer text; when blank the footer shows source and date.
    pub subheading: String,
    pub source: String,
    pub date: String,
    pub background: BackgroundSource,
    pub accent: Option<AccentColor>,
    /// Text marking the end of the highlighted span, which always starts at the first word.
    pub highlight_phrase: Option<String>,
    pub highlight_padding: Option<u32>,
    /// Selects a per-requester template override.
    pub requester: Option<String>,
}

impl RenderRequest {
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            ..Self::default()
        }
    }

    pub fn subheading(mut self, text: impl Into<String>) -> Self {
        self.subheading = text.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn background(mut self, background: BackgroundSource) -> Self {
        self.background = background;
        self
    }

    pub fn background_image(self, img: image::DynamicImage) -> Self {
        self.background(BackgroundSource::Image(img))
    }

    pub fn background_url(self, url: impl Into<String>) -> Self {
        self.background(BackgroundSource::Url(url.into()))
    }

    pub fn accent(mut self, accent: AccentColor) -> Self {
        self.accent = Some(accent);
        self
    }

    /// Parse free-form color input (hex, `r,g,b`, or a color name).
    pub fn accent_str(self, input: &str) -> Self {
        self.accent(AccentColor::parse(input))
    }

    pub fn highlight(mut self, phrase: impl Into<String>) -> Self {
        self.highlight_phrase = Some(phrase.into());
        self
    }

    pub fn padding(mut self, px: u32) -> Self {
        self.highlight_padding = Some(px);
        self
    }

    pub fn requester(mut self, id: impl Into<String>) -> Self {
        self.requester = Some(id.into());
        self
    }

    /// Footer text for an opaque post: the subheading, else `"{source} • {date}"`.
    pub fn post_footer_text(&self) -> String {
        if self.subheading.trim().is_empty() {
            format!("{} • {}", self.source, self.date)
        } else {
            self.subheading.clone()
        }
    }

    /// Footer text for an overlay: the subheading, else source and date with blanks skipped.
    pub fn overlay_footer_text(&self) -> String {
        if !self.subheading.trim().is_empty() {
            return self.subheading.clone();
        }
        [self.source.as_str(), self.date.as_str()]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/request.rs"]
mod tests;
