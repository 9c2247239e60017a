//! Builds a [`Corpus`] out of a directory of HTML pages.

use crate::{Corpus, Error, Result};
use regex::Regex;
use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
    sync::LazyLock,
};
use walkdir::WalkDir;

static ANCHOR_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("Invalid regex"));

/// Every `href` of an `<a>` tag in `html`, in document order.
pub fn extract_links(html: &str) -> Vec<String> {
    ANCHOR_HREF
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Reads the `.html` files directly inside `dir`, one page per file named
/// after it. Links that leave the corpus or point back at their own page
/// are dropped.
pub fn crawl<P: AsRef<Path>>(dir: P) -> Result<Corpus> {
    let dir = dir.as_ref();
    let mut pages: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Io {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".html") {
            continue;
        }
        let html = std::fs::read_to_string(entry.path()).map_err(|source| Error::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        let links: BTreeSet<_> = extract_links(&html)
            .into_iter()
            .filter(|link| *link != name)
            .collect();
        pages.insert(name, links);
    }

    let names: BTreeSet<_> = pages.keys().cloned().collect();
    for links in pages.values_mut() {
        links.retain(|link| names.contains(link));
    }
    tracing::debug!(dir = %dir.display(), pages = pages.len(), "crawled corpus");
    Corpus::new(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn anchors() {
        let html = r#"
            <html><body>
            <a href="2.html">two</a>
            <a class="x" href="3.html">three</a>
            <link href="style.css">
            <A href="upper.html">ignored</A>
            <a href="2.html">again</a>
            </body></html>
        "#;
        assert_eq!(extract_links(html), vec!["2.html", "3.html", "2.html"]);
    }

    #[test]
    fn crawl_directory() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, body: &str| fs::write(dir.path().join(name), body).unwrap();
        write("1.html", r#"<a href="2.html">2</a><a href="1.html">self</a>"#);
        write(
            "2.html",
            r#"<a href="1.html">1</a><a href="3.html">3</a><a href="https://example.com">x</a>"#,
        );
        write("3.html", "no links");
        write("notes.txt", r#"<a href="1.html">not a page</a>"#);
        fs::create_dir(dir.path().join("nested.html")).unwrap();

        let c = crawl(dir.path()).unwrap();
        assert_eq!(
            format!("{c:?}"),
            r#"{"1.html": ["2.html"], "2.html": ["1.html", "3.html"], "3.html": []}"#
        );
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let res = crawl(dir.path().join("absent"));
        assert!(matches!(res, Err(Error::Io { .. })), "{res:?}");
    }

    #[test]
    fn empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let c = crawl(dir.path()).unwrap();
        assert!(c.is_empty());
    }
}
