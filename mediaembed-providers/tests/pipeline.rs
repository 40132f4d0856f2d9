//! Select, fetch and render through the built-in registry.

use std::sync::Arc;

use async_trait::async_trait;
use mediaembed_core::{EmbedOptions, EmbedRenderer, FetchParams, RenderError};
use mediaembed_fetch::{DescriptorFetcher, HttpError, Transport};
use mediaembed_providers::ProviderRegistry;

struct CannedTransport(&'static str);

#[async_trait]
impl Transport for CannedTransport {
    async fn fetch_document(&self, _url: &str) -> Result<String, HttpError> {
        Ok(self.0.to_string())
    }
}

struct DownTransport;

#[async_trait]
impl Transport for DownTransport {
    async fn fetch_document(&self, _url: &str) -> Result<String, HttpError> {
        Err(HttpError::Status(503))
    }
}

const YOUTUBE_DOC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<oembed>
  <title>Never Gonna Give You Up</title>
  <thumbnail_url>https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg</thumbnail_url>
  <html>&lt;iframe width="480" height="270" src="https://www.youtube.com/embed/dQw4w9WgXcQ" frameborder="0"&gt;&lt;/iframe&gt;</html>
</oembed>"#;

const SOUNDCLOUD_DOC: &str = r#"{"version":1.0,"type":"rich","title":"Flickermood","thumbnail_url":"https://i1.sndcdn.com/a.jpg","html":"<iframe width=\"100%\" height=\"400\" src=\"https://w.soundcloud.com/player/\"></iframe>"}"#;

#[tokio::test]
async fn test_youtube_select_fetch_render() {
    let registry = ProviderRegistry::builtin();
    let url = "https://youtu.be/dQw4w9WgXcQ";
    let provider = registry.select(url).unwrap();

    let fetcher = DescriptorFetcher::new(Arc::new(CannedTransport(YOUTUBE_DOC)));
    let record = fetcher.fetch(provider, &FetchParams::for_url(url)).await;

    assert!(!record.failed);
    assert_eq!(record.provider, "YouTube");
    assert_eq!(record.title, "Never Gonna Give You Up");
    assert_eq!(record.id, mediaembed_core::create_handle(&record.source_url));

    let renderer = EmbedRenderer::for_provider(provider);
    let main = renderer.render(&record, &EmbedOptions::main(640, 360)).unwrap();
    assert!(main.contains(r#"width="480""#));

    let side = renderer
        .render(&record, &EmbedOptions::sidebar(640, 360).with_width_side(200))
        .unwrap();
    assert!(side.contains(r#"width="200""#));
    assert!(side.contains(r#"height="360""#));
    assert!(side.contains(r#"frameborder="0""#));
}

#[tokio::test]
async fn test_soundcloud_json_render() {
    let registry = ProviderRegistry::builtin();
    let url = "https://soundcloud.com/forss/flickermood";
    let provider = registry.select(url).unwrap();

    let fetcher = DescriptorFetcher::new(Arc::new(CannedTransport(SOUNDCLOUD_DOC)));
    let record = fetcher.fetch(provider, &FetchParams::for_url(url)).await;
    assert!(!record.failed);
    assert_eq!(record.title, "Flickermood");

    let side = EmbedRenderer::for_provider(provider)
        .render(&record, &EmbedOptions::sidebar(300, 166))
        .unwrap();
    assert!(side.contains(r#"width="300""#));
    assert!(side.contains(r#"height="166""#));
}

#[tokio::test]
async fn test_failed_record_does_not_render() {
    let registry = ProviderRegistry::builtin();
    let url = "https://vimeo.com/1";
    let provider = registry.select(url).unwrap();

    let fetcher = DescriptorFetcher::new(Arc::new(DownTransport));
    let record = fetcher.fetch(provider, &FetchParams::for_url(url)).await;
    assert!(record.failed);

    let err = EmbedRenderer::for_provider(provider)
        .render(&record, &EmbedOptions::main(640, 360))
        .unwrap_err();
    assert!(matches!(err, RenderError::NodeMissing(tag) if tag == "html"));
}
