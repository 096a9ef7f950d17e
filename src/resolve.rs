//! Locate the Image of the Day inside the page HTML.
//!
//! The page is parsed with `scraper`. The first `<article>` element is the
//! story, and the first `<img>` inside it is the picture. Its `src` is made
//! absolute:
//!
//! | `src` | Result |
//! |---|---|
//! | `https://host/p.jpg` | unchanged |
//! | `//host/p.jpg` | `https://host/p.jpg` |
//! | `/p.jpg` | `{origin}/p.jpg` |

use scraper::{Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("The image could not be found on the NASA page (no <img> inside the first <article>)")]
    NoImage,
    #[error("The article image has no src attribute")]
    MissingSrc,
    #[error("Image URL {0} has no file name")]
    NoFilename(String),
}

static ARTICLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article").expect("`article` is a valid selector"));
static IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("`img` is a valid selector"));

/// Find the article image in `html` and return its absolute URL.
///
/// `origin` is the scheme + host used for root-relative paths, without a
/// trailing slash (e.g. `https://www.nasa.gov`).
pub fn find_image_url(html: &str, origin: &str) -> Result<String, ResolveError> {
    let document = Html::parse_document(html);

    let img = document
        .select(&ARTICLE)
        .next()
        .and_then(|article| article.select(&IMG).next())
        .ok_or(ResolveError::NoImage)?;

    let src = img
        .value()
        .attr("src")
        .filter(|s| !s.trim().is_empty())
        .ok_or(ResolveError::MissingSrc)?;

    Ok(normalize_src(src, origin))
}

/// Turn a protocol-relative or root-relative `src` into an absolute URL.
///
/// Anything else is assumed to be absolute already and returned as-is.
pub fn normalize_src(src: &str, origin: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else if src.starts_with('/') {
        format!("{origin}{src}")
    } else {
        src.to_string()
    }
}

/// The filename an image URL is saved under: everything after the last `/`.
///
/// Query strings and fragments are not stripped, so two URLs that differ only
/// there map to different files, and two different images that share a
/// trailing segment map to the same one.
pub fn target_filename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
