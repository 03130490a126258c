//! Host page injection.
//!
//! The host page is parsed with html5ever, so elements are located the way
//! a browser sees them: markup inside comments, `<script>` text or
//! attribute values never matches. Injected content is kept verbatim. Each
//! target gets a marker comment in the tree, and serialisation swaps the
//! markers for their content.

use std::rc::Rc;

use html5ever::parse_document;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

use crate::error::{FolioError, Result};

const MARKER_PREFIX: &str = "folio-slot";

/// `#id` or `.class` selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
}

impl Selector {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(id) = s.strip_prefix('#') {
            (!id.is_empty()).then(|| Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            (!class.is_empty()).then(|| Self::Class(class.to_string()))
        } else {
            None
        }
    }

    fn matches(&self, node: &Handle) -> bool {
        let NodeData::Element { ref attrs, .. } = node.data else {
            return false;
        };
        let attrs = attrs.borrow();
        match self {
            Self::Id(id) => attrs
                .iter()
                .any(|a| &*a.name.local == "id" && &*a.value == id.as_str()),
            Self::Class(class) => attrs.iter().any(|a| {
                &*a.name.local == "class" && a.value.split_ascii_whitespace().any(|c| c == class)
            }),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
        }
    }
}

/// A parsed host page plus the content injected into it.
pub struct HostPage {
    source: String,
    dom: RcDom,
    /// `(marker, content)` in injection order.
    slots: Vec<(String, String)>,
    prefix: Option<String>,
}

impl HostPage {
    pub fn new(html: impl Into<String>) -> Self {
        let source = html.into();
        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .one(StrTendril::from_slice(&source));
        Self {
            source,
            dom,
            slots: Vec::new(),
            prefix: None,
        }
    }

    /// The page as it now stands. A page nothing was injected into is
    /// returned byte for byte.
    pub fn to_html(&self) -> Result<String> {
        if self.slots.is_empty() {
            return Ok(self.source.clone());
        }
        let html = serialize_children(&self.dom.document)?;
        Ok(self.splice(&html))
    }

    /// Inner content of the first element matching `selector`.
    pub fn inner(&self, selector: &Selector) -> Option<String> {
        let node = find(&self.dom.document, |n| selector.matches(n))?;
        let html = serialize_children(&node).ok()?;
        Some(self.splice(&html))
    }

    /// Replace the entire content of the matched element.
    pub fn replace_inner(&mut self, selector: &Selector, content: &str) -> Result<()> {
        let node = find(&self.dom.document, |n| selector.matches(n))
            .ok_or_else(|| FolioError::ElementNotFound(selector.to_string()))?;
        for child in node.children.borrow_mut().drain(..) {
            child.parent.set(None);
        }
        self.fill(&node, content)
    }

    /// Append `content` as the last child of the first `tag` element
    /// (e.g. `head`, `body`).
    pub fn append_to(&mut self, tag: &str, content: &str) -> Result<()> {
        let tag = tag.to_ascii_lowercase();
        let node = find(&self.dom.document, |n| match n.data {
            NodeData::Element { ref name, .. } => &*name.local == tag.as_str(),
            _ => false,
        })
        .ok_or_else(|| FolioError::ElementNotFound(tag.clone()))?;
        self.fill(&node, content)
    }

    fn fill(&mut self, parent: &Handle, content: &str) -> Result<()> {
        let marker = self.next_marker()?;
        let comment = Node::new(NodeData::Comment {
            contents: StrTendril::from_slice(&marker),
        });
        comment.parent.set(Some(Rc::downgrade(parent)));
        parent.children.borrow_mut().push(comment);
        self.slots.push((marker, content.to_string()));
        Ok(())
    }

    /// Markers use a prefix that appears nowhere in the parsed page.
    fn next_marker(&mut self) -> Result<String> {
        if self.prefix.is_none() {
            let baseline = serialize_children(&self.dom.document)?;
            let mut prefix = MARKER_PREFIX.to_string();
            while baseline.contains(&prefix) {
                prefix.push('x');
            }
            self.prefix = Some(prefix);
        }
        let prefix = self.prefix.as_deref().unwrap_or(MARKER_PREFIX);
        Ok(format!("{prefix}-{}", self.slots.len()))
    }

    /// Swap every marker comment in `html` for its content in one pass, so
    /// injected content is never rescanned.
    fn splice(&self, html: &str) -> String {
        let mut hits: Vec<(usize, usize, &str)> = self
            .slots
            .iter()
            .filter_map(|(marker, content)| {
                let comment = format!("<!--{marker}-->");
                html.find(&comment)
                    .map(|pos| (pos, comment.len(), content.as_str()))
            })
            .collect();
        hits.sort_by_key(|&(pos, _, _)| pos);

        let extra: usize = hits.iter().map(|&(_, _, c)| c.len()).sum();
        let mut out = String::with_capacity(html.len() + extra);
        let mut last = 0;
        for (pos, len, content) in hits {
            out.push_str(&html[last..pos]);
            out.push_str(content);
            last = pos + len;
        }
        out.push_str(&html[last..]);
        out
    }
}

/// First node in document order satisfying `pred`.
fn find(root: &Handle, pred: impl Fn(&Handle) -> bool) -> Option<Handle> {
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if pred(&node) {
            return Some(node);
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    None
}

fn serialize_children(node: &Handle) -> Result<String> {
    let mut out = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    serialize(&mut out, &SerializableHandle::from(node.clone()), opts)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>t</title></head><body>
<div class="filter-container"></div>
<div id="portfolio-container"><div class="old"><div>x</div></div></div>
<div class="gallery wide" data-x='a>b'><p>old</p></div>
</body></html>"#;

    #[test]
    fn parses_selectors() {
        assert_eq!(Selector::parse("#a"), Some(Selector::Id("a".into())));
        assert_eq!(Selector::parse(".b"), Some(Selector::Class("b".into())));
        assert_eq!(Selector::parse("div"), None);
        assert_eq!(Selector::parse("#"), None);
    }

    #[test]
    fn finds_nested_inner_content() {
        let page = HostPage::new(PAGE);
        let inner = page.inner(&Selector::Id("portfolio-container".into())).unwrap();
        assert_eq!(inner, r#"<div class="old"><div>x</div></div>"#);
    }

    #[test]
    fn class_match_tolerates_quoted_gt() {
        let page = HostPage::new(PAGE);
        let inner = page.inner(&Selector::Class("gallery".into())).unwrap();
        assert_eq!(inner, "<p>old</p>");
    }

    #[test]
    fn replace_inner_replaces_everything() {
        let mut page = HostPage::new(PAGE);
        let sel = Selector::Class("filter-container".into());
        page.replace_inner(&sel, "<button>All</button>").unwrap();
        assert_eq!(page.inner(&sel).unwrap(), "<button>All</button>");

        page.replace_inner(&sel, "<button>Web</button>").unwrap();
        let html = page.to_html().unwrap();
        assert!(html.contains(r#"<div class="filter-container"><button>Web</button></div>"#));
        assert!(!html.contains("All"));
    }

    #[test]
    fn injected_content_is_kept_verbatim() {
        let mut page = HostPage::new(PAGE);
        let content = "<span data-x='1'>a &times; b</span><img src=x>";
        page.replace_inner(&Selector::Id("portfolio-container".into()), content)
            .unwrap();
        assert!(page.to_html().unwrap().contains(content));
    }

    #[test]
    fn untouched_page_is_returned_verbatim() {
        let page = HostPage::new(PAGE);
        assert_eq!(page.to_html().unwrap(), PAGE);
    }

    #[test]
    fn commented_out_container_is_skipped() {
        let html = r#"<body>
<!-- old layout: <div id="portfolio-container"></div> -->
<div id="portfolio-container"><p>Loading</p></div>
</body>"#;
        let mut page = HostPage::new(html);
        page.replace_inner(&Selector::Id("portfolio-container".into()), "NEW")
            .unwrap();

        let out = page.to_html().unwrap();
        assert!(out.contains(r#"<!-- old layout: <div id="portfolio-container"></div> -->"#));
        assert!(out.contains(r#"<div id="portfolio-container">NEW</div>"#));
        assert!(!out.contains("Loading"));
    }

    #[test]
    fn script_text_is_not_markup() {
        let html = r#"<head><script>var t = '<div class="gallery"></div>';</script></head>
<body><div class="gallery">old</div></body>"#;
        let mut page = HostPage::new(html);
        page.replace_inner(&Selector::Class("gallery".into()), "tiles")
            .unwrap();

        let out = page.to_html().unwrap();
        assert!(out.contains(r#"var t = '<div class="gallery"></div>';"#));
        assert!(out.contains(r#"<div class="gallery">tiles</div>"#));
    }

    #[test]
    fn marker_prefix_avoids_page_text() {
        let html = "<body><p>folio-slot-0</p><div id=\"c\"></div></body>";
        let mut page = HostPage::new(html);
        page.replace_inner(&Selector::Id("c".into()), "X").unwrap();

        let out = page.to_html().unwrap();
        assert!(out.contains("<p>folio-slot-0</p>"));
        assert!(out.contains(r#"<div id="c">X</div>"#));
    }

    #[test]
    fn missing_element_is_an_error() {
        let mut page = HostPage::new(PAGE);
        let err = page
            .replace_inner(&Selector::Id("nope".into()), "")
            .unwrap_err();
        assert!(matches!(err, FolioError::ElementNotFound(ref s) if s == "#nope"));
    }

    #[test]
    fn append_to_head() {
        let mut page = HostPage::new(PAGE);
        page.append_to("head", "<style></style>").unwrap();
        assert!(page.to_html().unwrap().contains("<style></style></head>"));
    }
}
