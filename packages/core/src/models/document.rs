//! Parsed Document Tree
//!
//! The tree a wiki parser hands to the task extractor. Node kinds form a
//! closed enum so consumers dispatch with exhaustive `match` instead of
//! probing attributes.
//!
//! A paragraph holds inline runs interleaved with list blocks; a list item
//! holds its own inline content plus any nested lists:
//!
//! ```text
//! ParseTree
//! └── Paragraph
//!     ├── Text("TODO:\n")
//!     └── List(Bullet)
//!         ├── ListItem [ ] "A"
//!         └── ListItem [*] "B"
//!             └── List(Bullet)
//!                 └── ListItem [ ] "B-1"
//! ```
//!
//! The tree serializes to tagged JSON so an external parser can supply it,
//! and [`ParseTree`] implements `Display` to render canonical wiki text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root of a parsed document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseTree {
    pub children: Vec<Node>,
}

impl ParseTree {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// True when the document has no content at all
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Node {
    /// Block of inline runs and lists, separated from others by blank lines
    Paragraph(Vec<Node>),
    /// Bullet or numbered list
    List(List),
    /// Strike-through span (`~~text~~`)
    Strike(Vec<Node>),
    /// Plain text run; may contain line breaks inside a paragraph
    Text(String),
    /// Inline tag reference, stored without the leading `@`
    Tag(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }
}

/// List kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Bullet,
    Numbered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub kind: ListKind,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub bullet: Bullet,
    /// Inline nodes of the item's own line
    pub content: Vec<Node>,
    /// Lists nested below this item
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<List>,
}

impl ListItem {
    pub fn new(bullet: Bullet, content: Vec<Node>) -> Self {
        Self {
            bullet,
            content,
            children: Vec::new(),
        }
    }
}

/// Bullet marker of a list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bullet {
    /// `*`
    Plain,
    /// `1.`, `a.` - the marker text including the dot
    Numbered(String),
    /// `[ ]` open checkbox
    Unchecked,
    /// `[*]` checkbox marked done
    Checked,
    /// `[x]` checkbox closed without being done
    Crossed,
}

impl Bullet {
    pub fn is_checkbox(&self) -> bool {
        matches!(self, Self::Unchecked | Self::Checked | Self::Crossed)
    }

    /// Only an unchecked box counts as closed; plain bullets are open
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Checked | Self::Crossed)
    }

    fn marker(&self) -> &str {
        match self {
            Self::Plain => "*",
            Self::Numbered(marker) => marker,
            Self::Unchecked => "[ ]",
            Self::Checked => "[*]",
            Self::Crossed => "[x]",
        }
    }
}

/// Concatenate the text of inline nodes
///
/// With `include_strike = false` the content of strike-through spans is
/// dropped, leaving only the text that is still "live". Markup characters
/// are never included; tags render as `@name`. Block nodes are skipped.
pub fn inline_text(nodes: &[Node], include_strike: bool) -> String {
    let mut out = String::new();
    collect_inline_text(nodes, include_strike, &mut out);
    out
}

fn collect_inline_text(nodes: &[Node], include_strike: bool, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Tag(name) => {
                out.push('@');
                out.push_str(name);
            }
            Node::Strike(inner) => {
                if include_strike {
                    collect_inline_text(inner, include_strike, out);
                }
            }
            Node::Paragraph(_) | Node::List(_) => {}
        }
    }
}

// ============================================================================
// Wiki rendering
// ============================================================================

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for (i, node) in self.children.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            render_block(node, &mut out);
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }
        f.write_str(&out)
    }
}

fn render_block(node: &Node, out: &mut String) {
    match node {
        Node::Paragraph(children) => {
            for child in children {
                render_block(child, out);
            }
        }
        Node::List(list) => {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            render_list(list, 0, out);
        }
        inline => render_inline(std::slice::from_ref(inline), out),
    }
}

fn render_list(list: &List, level: usize, out: &mut String) {
    for item in &list.items {
        out.push_str(&"\t".repeat(level));
        out.push_str(item.bullet.marker());
        out.push(' ');
        render_inline(&item.content, out);
        out.push('\n');
        for child in &item.children {
            render_list(child, level + 1, out);
        }
    }
}

fn render_inline(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Tag(name) => {
                out.push('@');
                out.push_str(name);
            }
            Node::Strike(inner) => {
                out.push_str("~~");
                render_inline(inner, out);
                out.push_str("~~");
            }
            Node::Paragraph(_) | Node::List(_) => render_block(node, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkbox(bullet: Bullet, text: &str) -> ListItem {
        ListItem::new(bullet, vec![Node::text(text)])
    }

    #[test]
    fn test_bullet_states() {
        assert!(Bullet::Unchecked.is_checkbox());
        assert!(Bullet::Unchecked.is_open());
        assert!(!Bullet::Checked.is_open());
        assert!(!Bullet::Crossed.is_open());
        assert!(!Bullet::Plain.is_checkbox());
        assert!(Bullet::Plain.is_open());
        assert!(!Bullet::Numbered("1.".to_string()).is_checkbox());
    }

    #[test]
    fn test_inline_text_with_and_without_strike() {
        let nodes = vec![
            Node::Strike(vec![Node::text("TODO")]),
            Node::text(": ignore "),
            Node::tag("home"),
        ];
        assert_eq!(inline_text(&nodes, true), "TODO: ignore @home");
        assert_eq!(inline_text(&nodes, false), ": ignore @home");
    }

    #[test]
    fn test_render_paragraph_with_nested_list() {
        let mut parent = checkbox(Bullet::Checked, "Parent");
        parent.children.push(List {
            kind: ListKind::Bullet,
            items: vec![checkbox(Bullet::Crossed, "Child")],
        });

        let tree = ParseTree::new(vec![
            Node::Paragraph(vec![
                Node::text("TODO "),
                Node::tag("home"),
                Node::List(List {
                    kind: ListKind::Bullet,
                    items: vec![checkbox(Bullet::Unchecked, "A"), parent],
                }),
            ]),
            Node::Paragraph(vec![Node::Strike(vec![Node::text("gone")])]),
        ]);

        assert_eq!(
            tree.to_string(),
            "TODO @home\n[ ] A\n[*] Parent\n\t[x] Child\n\n~~gone~~\n"
        );
    }

    #[test]
    fn test_json_round_trip_preserves_tree() {
        let tree = ParseTree::new(vec![Node::Paragraph(vec![Node::List(List {
            kind: ListKind::Numbered,
            items: vec![checkbox(Bullet::Numbered("1.".to_string()), "one")],
        })])]);

        let json = serde_json::to_string(&tree).unwrap();
        let back: ParseTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
