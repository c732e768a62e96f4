//! Static site generator for folio blogs.
//!
//! Renders every post in a directory to a standalone page, plus a blog index,
//! a JSON post index, a stylesheet and a sitemap.

pub mod assets;
pub mod builder;
pub mod templates;

pub use assets::AssetPipeline;
pub use builder::{normalize_base_url, BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use templates::{PostView, Site, TemplateEngine};
