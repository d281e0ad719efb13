use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use image::{DynamicImage, RgbaImage};

use crate::assets::decode::{decode_image, encode_png};
use crate::color::accent::resolve_accent_color;
use crate::compose::background::{BackgroundKind, apply_gradient, prepare_background};
use crate::compose::logo::stamp_logo;
use crate::config::loader::{ConfigLoader, StaticConfigLoader};
use crate::config::model::LayoutConfig;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::NewsframeResult;
use crate::layout::headline::HeadlinePlan;
use crate::pipeline::archive::{Archive, ArchiveRecord, POST_FILE};
use crate::pipeline::request::{BackgroundSource, ImageFetcher, NoFetcher, RenderRequest};
use crate::render::footer::draw_footer;
use crate::render::headline::draw_headline;
use crate::render::surface::{TextLayer, composite_onto};

/// What a render decided, for callers that want more than the bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderReport {
    pub canvas: Canvas,
    pub badge_color: Rgb8,
    pub background: BackgroundKind,
    pub headline: HeadlinePlan,
    pub footer_anchor_y: f64,
    pub logo_drawn: bool,
    /// Archive folder, when archiving was configured and succeeded.
    pub archived: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub png: Vec<u8>,
    pub report: RenderReport,
}

/// Renders posts and overlays.
///
/// Holds no per-render state; one value can serve any number of requests, including from
/// several threads.
pub struct Renderer {
    loader: Box<dyn ConfigLoader>,
    fetcher: Arc<dyn ImageFetcher>,
    archive: Option<Archive>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Box::new(StaticConfigLoader::default()))
    }
}

impl Renderer {
    pub fn new(loader: Box<dyn ConfigLoader>) -> Self {
        Self {
            loader,
            fetcher: Arc::new(NoFetcher),
            archive: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn ImageFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_archive(mut self, archive: Archive) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Opaque PNG post, or `None` after logging the failure.
    pub fn render(&self, req: &RenderRequest) -> Option<Vec<u8>> {
        match self.render_detailed(req) {
            Ok(out) => Some(out.png),
            Err(err) => {
                tracing::error!(%err, "failed to render post");
                None
            }
        }
    }

    /// Transparent PNG overlay with the same layout as a post, or `None` after logging.
    pub fn render_overlay(&self, req: &RenderRequest) -> Option<Vec<u8>> {
        match self.render_overlay_detailed(req) {
            Ok(out) => Some(out.png),
            Err(err) => {
                tracing::error!(%err, "failed to render overlay");
                None
            }
        }
    }

    #[tracing::instrument(skip(self, req), fields(headline = %req.headline))]
    pub fn render_detailed(&self, req: &RenderRequest) -> NewsframeResult<RenderOutput> {
        let cfg = self.loader.layout(req.requester.as_deref())?;
        let source = self.resolve_background(&req.background);
        let (mut canvas, background) = prepare_background(
            source.as_deref(),
            cfg.canvas.width,
            cfg.canvas.height,
            cfg.bg_color,
        );

        let badge_color = resolve_accent_color(Some(&canvas), req.accent.as_ref(), cfg.accent_default);
        apply_gradient(&mut canvas, &cfg);
        let logo_drawn = stamp_logo(&mut canvas, cfg.logo.as_ref());

        let footer = req.post_footer_text();
        let (headline, footer_anchor_y) =
            draw_text(&mut canvas, &cfg, req, &footer, badge_color)?;
        let png = encode_png(&canvas, true)?;

        let archived = self.archive(req, &footer, &png);
        tracing::info!(bytes = png.len(), ?background, %badge_color, "rendered post");
        Ok(RenderOutput {
            png,
            report: RenderReport {
                canvas: cfg.canvas,
                badge_color,
                background,
                headline,
                footer_anchor_y,
                logo_drawn,
                archived,
            },
        })
    }

    #[tracing::instrument(skip(self, req), fields(headline = %req.headline))]
    pub fn render_overlay_detailed(&self, req: &RenderRequest) -> NewsframeResult<RenderOutput> {
        let cfg = self.loader.layout(req.requester.as_deref())?;
        let mut canvas = RgbaImage::new(cfg.canvas.width, cfg.canvas.height);

        let badge_color = resolve_accent_color(None, req.accent.as_ref(), cfg.accent_default);
        apply_gradient(&mut canvas, &cfg);
        let logo_drawn = stamp_logo(&mut canvas, cfg.logo.as_ref());

        let footer = req.overlay_footer_text();
        let (headline, footer_anchor_y) =
            draw_text(&mut canvas, &cfg, req, &footer, badge_color)?;
        let png = encode_png(&canvas, false)?;

        tracing::info!(bytes = png.len(), %badge_color, "rendered overlay");
        Ok(RenderOutput {
            png,
            report: RenderReport {
                canvas: cfg.canvas,
                badge_color,
                background: BackgroundKind::Transparent,
                headline,
                footer_anchor_y,
                logo_drawn,
                archived: None,
            },
        })
    }

    /// Decoded background, or `None` when absent or unusable.
    fn resolve_background<'a>(&self, source: &'a BackgroundSource) -> Option<Cow<'a, DynamicImage>> {
        let bytes = match source {
            BackgroundSource::None => return None,
            BackgroundSource::Image(img) => return Some(Cow::Borrowed(img)),
            BackgroundSource::Bytes(bytes) => Cow::Borrowed(bytes.as_slice()),
            BackgroundSource::Url(url) => match self.fetcher.fetch(url) {
                Some(bytes) => Cow::Owned(bytes),
                None => {
                    tracing::warn!(url, "background fetch failed, using solid fill");
                    return None;
                }
            },
        };
        match decode_image(&bytes) {
            Ok(img) => Some(Cow::Owned(img)),
            Err(err) => {
                tracing::warn!(%err, "background decode failed, using solid fill");
                None
            }
        }
    }

    fn archive(&self, req: &RenderRequest, summary: &str, png: &[u8]) -> Option<PathBuf> {
        let archive = self.archive.as_ref()?;
        let image_url = match &req.background {
            BackgroundSource::None => String::new(),
            BackgroundSource::Image(_) | BackgroundSource::Bytes(_) => "manual_upload".to_owned(),
            BackgroundSource::Url(url) => url.clone(),
        };
        let record = ArchiveRecord {
            title: req.headline.clone(),
            source: req.source.clone(),
            date: req.date.clone(),
            image_url,
            summary: summary.to_owned(),
            generated_image: POST_FILE.to_owned(),
        };
        match archive.save(&record, png) {
            Ok(folder) => Some(folder),
            Err(err) => {
                tracing::error!(%err, "archive failed");
                None
            }
        }
    }
}

/// Footer first, then the headline stacked on its anchor, composited over `canvas`.
fn draw_text(
    canvas: &mut RgbaImage,
    cfg: &LayoutConfig,
    req: &RenderRequest,
    footer: &str,
    badge_color: Rgb8,
) -> NewsframeResult<(HeadlinePlan, f64)> {
    let mut layer = TextLayer::new(cfg.canvas)?;
    let anchor = draw_footer(&mut layer, footer, cfg);
    let plan = draw_headline(
        &mut layer,
        anchor,
        &req.headline,
        badge_color,
        cfg,
        req.highlight_phrase.as_deref(),
        req.highlight_padding,
    );
    composite_onto(canvas, &layer.finish()?);
    Ok((plan, anchor))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/render.rs"]
mod tests;
