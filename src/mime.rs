//! MIME type lookup by file extension.
//!
//! Pages are HTML unless their URL path ends in a known extension
//! (`/feed.xml`, `/sitemap.txt`, `/manifest.json`), in which case the rendered
//! body is served with that extension's type.

/// Returns the MIME type for the extension of the last segment of `path`,
/// or `None` when there is no extension or it is not recognised.
///
/// ```
/// use render_html::mime::lookup;
/// assert_eq!(lookup("/feed.xml"), Some("application/xml"));
/// assert_eq!(lookup("/about"), None);
/// ```
pub fn lookup(path: &str) -> Option<&'static str> {
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    from_extension(&ext.to_ascii_lowercase())
}

fn from_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        // Text
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "txt" | "text" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "ics" => "text/calendar",
        "xml" => "application/xml",
        "rss" => "application/rss+xml",
        "atom" => "application/atom+xml",

        // Script / data
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "map" => "application/json",
        "webmanifest" => "application/manifest+json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "avif" => "image/avif",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        // Documents
        "pdf" => "application/pdf",

        _ => return None,
    };
    Some(mime)
}
