//! HTML rendering for the embed and landing pages.

use crate::embed::PreviewFields;

/// Landing page shown at the root path
const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <title>dex-embed</title>
</head>
<body>
    <h1>dex-embed</h1>
    <p>
        Rich link previews for MangaDex titles. Replace the host of a
        <code>mangadex.org/title/...</code> link with this server to get
        an embeddable page that redirects readers to the original title.
    </p>
</body>
</html>
"#;

/// Escape a string for interpolation into HTML text or attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the landing page
pub fn render_index_page() -> &'static str {
    INDEX_PAGE
}

/// Render the embed page for a resolved preview.
///
/// The page carries OpenGraph and Twitter card meta tags for unfurlers
/// and a meta-refresh redirect to the canonical URL for human visitors.
/// The image tags are omitted when no cover was resolved.
pub fn render_embed_page(fields: &PreviewFields) -> String {
    let title = escape_html(&fields.title);
    let description = escape_html(&fields.description);
    let canonical_url = escape_html(&fields.canonical_url);

    let image_meta = if fields.image_url.is_empty() {
        String::new()
    } else {
        let image_url = escape_html(&fields.image_url);
        format!(
            "    <meta property=\"og:image\" content=\"{image_url}\" />\n    <meta name=\"twitter:image\" content=\"{image_url}\" />\n"
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <title>{title}</title>
    <meta property="og:title" content="{title}" />
    <meta property="og:description" content="{description}" />
    <meta property="og:url" content="{canonical_url}" />
    <meta property="og:site_name" content="MangaDex" />
    <meta property="og:type" content="website" />
    <meta name="twitter:card" content="summary_large_image" />
{image_meta}    <meta http-equiv="refresh" content="0; url={canonical_url}" />
</head>
<body>
    <p>Redirecting to <a href="{canonical_url}">{canonical_url}</a></p>
</body>
</html>
"#
    )
}
