//! Image link discovery in note bodies
//!
//! Three tiers are tried in order and the first hit of the first matching
//! tier wins:
//!
//! 1. Embedded local images: `![[photo.png]]`
//! 2. Remote markdown images: `![alt](https://host/photo.jpg)`
//! 3. Any markdown link to a web page: `[text](https://host/page)`

use std::sync::LazyLock;

use regex::bytes::Regex;

static LOCAL_IMAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)!\[\[(.*?\.(?:png|jpg|jpeg|gif))\]\]").expect("local image regex")
});

static REMOTE_IMAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)!\[.*?\]\((https?://.*?\.(?:png|jpg|jpeg|gif))\)")
        .expect("remote image regex")
});

static ANY_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[.*?\]\((https?://[^\s)]+)\)").expect("link regex"));

/// Finds the most relevant image for a note body.
pub trait ImageLinkFinder: Send + Sync {
    /// Return the best link, or an empty string when the body has none
    fn find(&self, body: &[u8]) -> String;
}

/// Regex based finder over the three link tiers
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexImageLinkFinder;

impl RegexImageLinkFinder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageLinkFinder for RegexImageLinkFinder {
    fn find(&self, body: &[u8]) -> String {
        [&*LOCAL_IMAGE_REGEX, &*REMOTE_IMAGE_REGEX, &*ANY_LINK_REGEX]
            .into_iter()
            .find_map(|re| re.captures(body).and_then(|cap| cap.get(1)))
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(body: &str) -> String {
        RegexImageLinkFinder::new().find(body.as_bytes())
    }

    #[test]
    fn local_embed() {
        assert_eq!(find("Look:\n![[photos/pie.png]]\n"), "photos/pie.png");
    }

    #[test]
    fn local_embed_extension_is_case_insensitive() {
        assert_eq!(find("![[photo.PNG]]"), "photo.PNG");
        assert_eq!(find("![[scan.JpEg]]"), "scan.JpEg");
    }

    #[test]
    fn local_embed_beats_remote_image() {
        let body = "![x](https://y.com/b.jpg)\n\n![[a.png]]\n";
        assert_eq!(find(body), "a.png");
    }

    #[test]
    fn remote_image_captures_url_only() {
        assert_eq!(
            find("Intro ![the pie](https://cdn.example.com/img/pie.GIF) outro"),
            "https://cdn.example.com/img/pie.GIF"
        );
    }

    #[test]
    fn remote_image_beats_plain_link() {
        let body = "[site](https://example.com/page)\n![p](http://example.com/p.jpeg)\n";
        assert_eq!(find(body), "http://example.com/p.jpeg");
    }

    #[test]
    fn plain_link_fallback() {
        assert_eq!(
            find("See [the recipe](https://example.com/page) for details."),
            "https://example.com/page"
        );
    }

    #[test]
    fn first_match_of_a_tier_wins() {
        let body = "![[first.jpg]] and ![[second.png]]";
        assert_eq!(find(body), "first.jpg");
    }

    #[test]
    fn non_image_embeds_and_relative_links_are_ignored() {
        assert_eq!(find("![[other note]] [local](notes/pie.md) ![x](pie.png)"), "");
    }

    #[test]
    fn empty_when_nothing_matches() {
        assert_eq!(find("Just text, no links."), "");
        assert_eq!(find(""), "");
    }

    #[test]
    fn links_do_not_span_lines() {
        assert_eq!(find("![[half\nimage.png]]"), "");
    }
}
