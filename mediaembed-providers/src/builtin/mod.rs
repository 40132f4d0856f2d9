//! Built-in providers.
//!
//! Each provider is a plain struct holding its domain set; everything else
//! is static. Providers are listed in registry order.

mod dailymotion;
mod flickr;
mod soundcloud;
mod vimeo;
mod youtube;

pub use dailymotion::DailymotionProvider;
pub use flickr::FlickrProvider;
pub use soundcloud::SoundCloudProvider;
pub use vimeo::VimeoProvider;
pub use youtube::YouTubeProvider;

/// Author credited on the built-in providers.
pub(crate) const AUTHOR: &str = "Nicolas Brassard";

/// Author website credited on the built-in providers.
pub(crate) const AUTHOR_WEBSITE: &str = "https://github.com/nitriques/mediaembed";
