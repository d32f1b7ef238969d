//! DOM evidence extraction
//!
//! Pulls the element sources relevant to player detection out of a rendered
//! document: script srcs, iframe srcs, and `<video><source>` srcs and MIME
//! types. Relative sources are resolved against the page URL.

use scraper::{Html, Selector};
use url::Url;

/// Element sources gathered from one rendered article page
#[derive(Debug, Clone, Default)]
pub struct DomSources {
    pub script_sources: Vec<String>,
    pub iframe_sources: Vec<String>,
    pub video_sources: Vec<String>,
    pub video_mime_types: Vec<String>,
}

/// Extracts player-relevant element sources from rendered HTML
pub fn extract_dom_sources(html: &str, page_url: &Url) -> DomSources {
    let document = Html::parse_document(html);

    let script_sources = collect_sources(&document, "script[src]", page_url);
    let iframe_sources = collect_sources(&document, "iframe[src]", page_url);
    let video_sources = collect_sources(&document, "video source[src]", page_url);
    let video_mime_types = collect_mime_types(&document);

    DomSources {
        script_sources,
        iframe_sources,
        video_sources,
        video_mime_types,
    }
}

/// Collects the resolved `src` attributes of all elements matching `selector`
fn collect_sources(document: &Html, selector: &str, page_url: &Url) -> Vec<String> {
    let selector = match Selector::parse(selector) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .filter_map(|src| page_url.join(src.trim()).ok())
        .map(|url| url.to_string())
        .collect()
}

/// Collects the non-empty `type` attributes of `<video><source>` elements
fn collect_mime_types(document: &Html) -> Vec<String> {
    let selector = match Selector::parse("video source") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("type"))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://www.example.com/news/story.html").unwrap()
    }

    #[test]
    fn test_extract_script_sources() {
        let html = r#"<html><head>
            <script src="https://cdn.jwplayer.com/players/x.js"></script>
            <script src="/local/app.js"></script>
            <script>inline();</script>
        </head><body></body></html>"#;
        let sources = extract_dom_sources(html, &page_url());
        assert_eq!(
            sources.script_sources,
            vec![
                "https://cdn.jwplayer.com/players/x.js",
                "https://www.example.com/local/app.js",
            ]
        );
    }

    #[test]
    fn test_extract_iframe_sources() {
        let html = r#"<html><body>
            <iframe src="https://www.youtube.com/embed/abc"></iframe>
            <iframe></iframe>
        </body></html>"#;
        let sources = extract_dom_sources(html, &page_url());
        assert_eq!(
            sources.iframe_sources,
            vec!["https://www.youtube.com/embed/abc"]
        );
    }

    #[test]
    fn test_extract_video_sources_and_mime_types() {
        let html = r#"<html><body>
            <video>
                <source src="/media/clip.mp4" type="video/mp4">
                <source src="/media/clip.webm" type="video/webm">
            </video>
        </body></html>"#;
        let sources = extract_dom_sources(html, &page_url());
        assert_eq!(
            sources.video_sources,
            vec![
                "https://www.example.com/media/clip.mp4",
                "https://www.example.com/media/clip.webm",
            ]
        );
        assert_eq!(sources.video_mime_types, vec!["video/mp4", "video/webm"]);
    }

    #[test]
    fn test_mime_type_without_src_is_still_collected() {
        // A <source> can carry a type while src is injected later by JS
        let html = r#"<html><body><video><source type="video/mp4"></video></body></html>"#;
        let sources = extract_dom_sources(html, &page_url());
        assert!(sources.video_sources.is_empty());
        assert_eq!(sources.video_mime_types, vec!["video/mp4"]);
    }

    #[test]
    fn test_empty_document() {
        let sources = extract_dom_sources("<html></html>", &page_url());
        assert!(sources.script_sources.is_empty());
        assert!(sources.iframe_sources.is_empty());
        assert!(sources.video_sources.is_empty());
        assert!(sources.video_mime_types.is_empty());
    }
}
