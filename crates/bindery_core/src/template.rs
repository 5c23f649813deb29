//! Template source to fragment conversion.
//!
//! # Responsibility
//! - Turn raw template markup into a reusable node forest.
//! - Render a fragment back to markup for inspection.
//!
//! # Invariants
//! - Parsing never fails; malformed markup degrades instead of erroring.
//! - Unmatched close tags are dropped, unclosed elements close at end of input.

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<!--(.*?)-->|</\s*([A-Za-z][\w:-]*)\s*>|<([A-Za-z][\w:-]*)((?:\s+[^\s=/>]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)\s*(/?)>"#,
    )
    .expect("valid template token regex")
});
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s=/>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("valid template attribute regex")
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// One node of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    Element(TemplateElement),
    Text(String),
    Comment(String),
}

/// Element node with attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<TemplateNode>,
}

impl TemplateElement {
    fn new(tag: &str, attrs: Vec<(String, String)>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs,
            children: Vec::new(),
        }
    }

    /// Returns the value of attribute `name`, if declared.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Parsed, renderable template fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFragment {
    nodes: Vec<TemplateNode>,
}

impl TemplateFragment {
    /// Parses `source` into a fragment.
    pub fn parse(source: &str) -> Self {
        // Open elements; the bottom entry is a synthetic root.
        let mut stack: Vec<TemplateElement> = vec![TemplateElement::new("", Vec::new())];
        let mut cursor = 0;

        for captures in TOKEN_RE.captures_iter(source) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            push_text(&mut stack, &source[cursor..whole.start()]);
            cursor = whole.end();

            if let Some(comment) = captures.get(1) {
                append(&mut stack, TemplateNode::Comment(comment.as_str().to_string()));
            } else if let Some(close) = captures.get(2) {
                close_element(&mut stack, &close.as_str().to_ascii_lowercase());
            } else if let Some(open) = captures.get(3) {
                let attrs = captures
                    .get(4)
                    .map(|raw| parse_attrs(raw.as_str()))
                    .unwrap_or_default();
                let element = TemplateElement::new(open.as_str(), attrs);
                let self_closing = captures.get(5).is_some_and(|m| !m.as_str().is_empty());
                if self_closing || VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    append(&mut stack, TemplateNode::Element(element));
                } else {
                    stack.push(element);
                }
            }
        }
        push_text(&mut stack, &source[cursor..]);

        while stack.len() > 1 {
            fold_top(&mut stack);
        }
        let nodes = stack.pop().map(|root| root.children).unwrap_or_default();
        Self { nodes }
    }

    pub fn nodes(&self) -> &[TemplateNode] {
        &self.nodes
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Renders the fragment back to markup.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            render_node(node, &mut out);
        }
        out
    }
}

fn parse_attrs(raw: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(raw)
        .filter_map(|captures| {
            let name = captures.get(1)?.as_str().to_string();
            let value = captures
                .get(2)
                .or_else(|| captures.get(3))
                .or_else(|| captures.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

fn push_text(stack: &mut [TemplateElement], text: &str) {
    if text.is_empty() {
        return;
    }
    append(stack, TemplateNode::Text(text.to_string()));
}

fn append(stack: &mut [TemplateElement], node: TemplateNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn close_element(stack: &mut Vec<TemplateElement>, tag: &str) {
    let Some(depth) = stack.iter().skip(1).rposition(|open| open.tag == tag) else {
        return;
    };
    // `depth` is relative to the slice after the synthetic root.
    while stack.len() > depth + 1 {
        fold_top(stack);
    }
}

fn fold_top(stack: &mut Vec<TemplateElement>) {
    if let Some(done) = stack.pop() {
        append(stack, TemplateNode::Element(done));
    }
}

fn render_node(node: &TemplateNode, out: &mut String) {
    match node {
        TemplateNode::Text(text) => out.push_str(text),
        TemplateNode::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        TemplateNode::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attrs {
                out.push_str(&format!(" {name}=\"{value}\""));
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                return;
            }
            for child in &element.children {
                render_node(child, out);
            }
            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TemplateFragment, TemplateNode};

    #[test]
    fn parses_nested_elements_and_text() {
        let fragment = TemplateFragment::parse("<p>hi <b>there</b></p>tail");
        assert_eq!(fragment.len(), 2);

        let TemplateNode::Element(p) = &fragment.nodes()[0] else {
            panic!("expected element");
        };
        assert_eq!(p.tag, "p");
        assert_eq!(p.children.len(), 2);
        assert_eq!(p.children[0], TemplateNode::Text("hi ".to_string()));
        assert_eq!(fragment.nodes()[1], TemplateNode::Text("tail".to_string()));
    }

    #[test]
    fn keeps_attributes_in_source_order() {
        let fragment =
            TemplateFragment::parse(r#"<div sd-text="msg" class='box' hidden data-x=1></div>"#);
        let TemplateNode::Element(div) = &fragment.nodes()[0] else {
            panic!("expected element");
        };
        let names: Vec<&str> = div.attrs.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["sd-text", "class", "hidden", "data-x"]);
        assert_eq!(div.attr("sd-text"), Some("msg"));
        assert_eq!(div.attr("class"), Some("box"));
        assert_eq!(div.attr("hidden"), Some(""));
        assert_eq!(div.attr("data-x"), Some("1"));
    }

    #[test]
    fn void_and_self_closing_elements_take_no_children() {
        let fragment = TemplateFragment::parse("<br><input value=\"a\"/><span>x</span>");
        assert_eq!(fragment.len(), 3);
        assert_eq!(
            fragment.to_markup(),
            "<br><input value=\"a\"><span>x</span>"
        );
    }

    #[test]
    fn tolerates_unmatched_and_unclosed_tags() {
        let fragment = TemplateFragment::parse("</em><ul><li>one<li>two</ul>");
        assert_eq!(fragment.len(), 1);
        assert_eq!(
            fragment.to_markup(),
            "<ul><li>one<li>two</li></li></ul>"
        );
    }

    #[test]
    fn keeps_comments() {
        let fragment = TemplateFragment::parse("<!-- note --><p></p>");
        assert_eq!(
            fragment.nodes()[0],
            TemplateNode::Comment(" note ".to_string())
        );
    }

    #[test]
    fn empty_source_gives_empty_fragment() {
        assert!(TemplateFragment::parse("").is_empty());
    }
}
