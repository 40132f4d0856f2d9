// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `MediaEmbed` Providers
//!
//! Concrete oEmbed providers for the `MediaEmbed` workspace.
//!
//! ## Built-in Providers
//!
//! | Provider | Domains | Format | Id field |
//! |----------|---------|--------|----------|
//! | Vimeo | vimeo.com | XML | `video_id` |
//! | YouTube | youtube.com, youtu.be | XML | from URL |
//! | Flickr | flickr.com, flic.kr | XML | from URL |
//! | Dailymotion | dailymotion.com, dai.ly | XML | from URL |
//! | SoundCloud | soundcloud.com, snd.sc | JSON | from URL |
//!
//! Additional endpoints can be declared in settings and are loaded through
//! [`GenericProvider`].
//!
//! ## Usage
//!
//! ```ignore
//! use mediaembed_core::FetchParams;
//! use mediaembed_fetch::{DescriptorFetcher, FetchContext};
//! use mediaembed_providers::ProviderRegistry;
//!
//! let registry = ProviderRegistry::builtin();
//! let url = "https://vimeo.com/76979871";
//! let provider = registry.select(url).unwrap();
//!
//! let fetcher = DescriptorFetcher::from_context(&FetchContext::new()?);
//! let record = fetcher.fetch(provider, &FetchParams::for_url(url)).await;
//! ```

pub mod builtin;
pub mod endpoint;
pub mod generic;
pub mod registry;

// Re-export key types
pub use builtin::{
    DailymotionProvider, FlickrProvider, SoundCloudProvider, VimeoProvider, YouTubeProvider,
};
pub use endpoint::build_api_url;
pub use generic::GenericProvider;
pub use registry::{ProviderRegistry, select_provider};
