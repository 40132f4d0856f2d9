//! Embed markup rendering from stored records.
//!
//! Rendering never touches the network: it reparses the stored descriptor,
//! pulls the player markup out of the embed node and, for the sidebar,
//! rewrites the declared `width`/`height` attributes to fit.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::document::DescriptorDocument;
use crate::error::RenderError;
use crate::models::{CanonicalRecord, EmbedOptions, Location};
use crate::traits::{DEFAULT_EMBED_TAG, EmbedProvider};

// `width="..."` not preceded by a name character, so `data-width` and
// `max-width` stay as they are. Group 1 keeps the preceding character.
static WIDTH_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(^|[^\w-])width="[^"]*""#).expect("Invalid regex"));

static HEIGHT_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(^|[^\w-])height="[^"]*""#).expect("Invalid regex"));

// ============================================================================
// Renderer
// ============================================================================

/// Rebuilds embed markup from a stored [`CanonicalRecord`].
#[derive(Debug, Clone)]
pub struct EmbedRenderer {
    embed_tag: String,
}

impl EmbedRenderer {
    /// Creates a renderer reading the default `html` node.
    pub fn new() -> Self {
        Self {
            embed_tag: DEFAULT_EMBED_TAG.to_string(),
        }
    }

    /// Creates a renderer reading a custom embed node.
    pub fn with_embed_tag(tag: impl Into<String>) -> Self {
        Self {
            embed_tag: tag.into(),
        }
    }

    /// Creates a renderer for the provider's embed node.
    pub fn for_provider(provider: &dyn EmbedProvider) -> Self {
        Self::with_embed_tag(provider.embed_tag_name())
    }

    /// Returns the embed node name.
    pub fn embed_tag(&self) -> &str {
        &self.embed_tag
    }

    /// Renders the record's embed markup for the given placement.
    ///
    /// # Errors
    ///
    /// - [`RenderError::SourceMissing`] if the record holds no document
    /// - [`RenderError::Unparsable`] if the document cannot be parsed
    /// - [`RenderError::NodeMissing`] if the embed node is absent
    pub fn render(
        &self,
        record: &CanonicalRecord,
        options: &EmbedOptions,
    ) -> Result<String, RenderError> {
        if record.raw_document.trim().is_empty() {
            return Err(RenderError::SourceMissing);
        }

        let doc = DescriptorDocument::parse(record.format, &record.raw_document)
            .map_err(RenderError::Unparsable)?;

        let player = doc
            .first_element_text(&self.embed_tag)
            .ok_or_else(|| RenderError::NodeMissing(self.embed_tag.clone()))?;

        if options.location == Location::Sidebar {
            let width = options.effective_width();
            let height = options.effective_height();
            debug!(width, height, "Resizing embed for sidebar");
            return Ok(rewrite_dimensions(&player, width, height));
        }

        Ok(player)
    }
}

impl Default for EmbedRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrites every `width="..."` and `height="..."` attribute.
///
/// Other attributes, including `data-width` or `max-height`, are left alone.
pub fn rewrite_dimensions(markup: &str, width: u32, height: u32) -> String {
    let resized = WIDTH_ATTR_RE.replace_all(markup, |caps: &Captures<'_>| {
        format!(r#"{}width="{width}""#, &caps[1])
    });
    HEIGHT_ATTR_RE
        .replace_all(&resized, |caps: &Captures<'_>| {
            format!(r#"{}height="{height}""#, &caps[1])
        })
        .into_owned()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DescriptorFormat;

    fn record(raw: &str, format: DescriptorFormat) -> CanonicalRecord {
        let mut record = CanonicalRecord::failure("Test", "https://api.example.com/oembed");
        record.raw_document = raw.to_string();
        record.format = format;
        record.failed = false;
        record
    }

    const PLAYER_XML: &str = "<oembed><html>&lt;iframe src=\"https://player.example.com/1\" width=\"640\" height=\"360\" data-width=\"9\"&gt;&lt;/iframe&gt;</html></oembed>";

    #[test]
    fn test_empty_source_fails() {
        let rec = record("", DescriptorFormat::Xml);
        let err = EmbedRenderer::new()
            .render(&rec, &EmbedOptions::main(640, 360))
            .unwrap_err();
        assert!(matches!(err, RenderError::SourceMissing));
    }

    #[test]
    fn test_unparsable_source_fails() {
        let rec = record("<oembed><html>", DescriptorFormat::Xml);
        let err = EmbedRenderer::new()
            .render(&rec, &EmbedOptions::main(640, 360))
            .unwrap_err();
        assert!(matches!(err, RenderError::Unparsable(_)));
    }

    #[test]
    fn test_missing_node_fails() {
        let rec = record("<error>Could not load</error>", DescriptorFormat::Xml);
        let err = EmbedRenderer::new()
            .render(&rec, &EmbedOptions::main(640, 360))
            .unwrap_err();
        assert!(matches!(err, RenderError::NodeMissing(tag) if tag == "html"));
    }

    #[test]
    fn test_main_returns_markup_unchanged() {
        let rec = record(PLAYER_XML, DescriptorFormat::Xml);
        let html = EmbedRenderer::new()
            .render(&rec, &EmbedOptions::main(100, 50))
            .unwrap();
        assert_eq!(
            html,
            "<iframe src=\"https://player.example.com/1\" width=\"640\" height=\"360\" data-width=\"9\"></iframe>"
        );
    }

    #[test]
    fn test_sidebar_uses_side_width() {
        let rec = record(PLAYER_XML, DescriptorFormat::Xml);
        let opts = EmbedOptions::sidebar(640, 360).with_width_side(240);
        let html = EmbedRenderer::new().render(&rec, &opts).unwrap();
        assert!(html.contains(" width=\"240\""));
        assert!(html.contains(" height=\"360\""));
        assert!(html.contains("data-width=\"9\""));
    }

    #[test]
    fn test_sidebar_without_side_falls_back() {
        let rec = record(PLAYER_XML, DescriptorFormat::Xml);
        let html = EmbedRenderer::new()
            .render(&rec, &EmbedOptions::sidebar(300, 169))
            .unwrap();
        assert!(html.contains(" width=\"300\""));
        assert!(html.contains(" height=\"169\""));
    }

    #[test]
    fn test_json_record_renders() {
        let json = r#"{"html":"<iframe width=\"100%\" height=\"166\"></iframe>"}"#;
        let rec = record(json, DescriptorFormat::Json);
        let html = EmbedRenderer::new()
            .render(&rec, &EmbedOptions::sidebar(200, 100))
            .unwrap();
        assert_eq!(html, r#"<iframe width="200" height="100"></iframe>"#);
    }

    #[test]
    fn test_custom_embed_tag() {
        let rec = record("<oembed><code>&lt;embed width=\"1\"/&gt;</code></oembed>", DescriptorFormat::Xml);
        let html = EmbedRenderer::with_embed_tag("code")
            .render(&rec, &EmbedOptions::main(1, 1))
            .unwrap();
        assert_eq!(html, r#"<embed width="1"/>"#);
    }

    #[test]
    fn test_rewrite_all_occurrences() {
        let markup = r#"<object width="1" height="2"><embed width="3" height="4"></embed></object>"#;
        assert_eq!(
            rewrite_dimensions(markup, 10, 20),
            r#"<object width="10" height="20"><embed width="10" height="20"></embed></object>"#
        );
    }

    #[test]
    fn test_rewrite_leaves_unrelated_attributes() {
        let markup = r#"<div style="max-width: 1px" data-height="7" width=""></div>"#;
        assert_eq!(
            rewrite_dimensions(markup, 5, 6),
            r#"<div style="max-width: 1px" data-height="7" width="5"></div>"#
        );
    }
}
