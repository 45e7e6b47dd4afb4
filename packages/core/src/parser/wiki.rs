//! Wiki Text Parser
//!
//! Turns zim-style wiki text into a [`ParseTree`]. Only the block and inline
//! constructs the task extractor cares about are recognized; everything else
//! is kept as plain text.
//!
//! # Syntax
//!
//! - Paragraphs are separated by one or more blank lines
//! - `[ ] `, `[*] `, `[x] ` start checkbox items
//! - `* ` starts a bullet item, `1. ` or `a. ` a numbered item
//! - Indentation (tab or 4 spaces per level) nests items below the previous
//!   item
//! - `~~text~~` is strike-through, `@word` after whitespace is a tag
//!
//! # Examples
//!
//! ```rust
//! use tasklist_core::{Node, WikiParser};
//!
//! let tree = WikiParser::new().parse("TODO:\n[ ] A\n\t[*] B\n");
//! assert_eq!(tree.children.len(), 1);
//! assert!(matches!(tree.children[0], Node::Paragraph(_)));
//! assert_eq!(tree.to_string(), "TODO:\n[ ] A\n\t[*] B\n");
//! ```

use crate::models::{Bullet, List, ListItem, ListKind, Node, ParseTree};
use regex::Regex;
use std::sync::LazyLock;

/// Default indentation width of one nesting level, in columns
const DEFAULT_TAB_WIDTH: usize = 4;

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+|[a-zA-Z])\.(?:\s+|$)").unwrap());

/// Parser for wiki text
#[derive(Debug, Clone, Copy)]
pub struct WikiParser {
    tab_width: usize,
}

impl Default for WikiParser {
    fn default() -> Self {
        Self::new()
    }
}

/// One classified source line
#[derive(Debug)]
enum Line<'a> {
    Text(&'a str),
    Item(RawItem<'a>),
}

#[derive(Debug)]
struct RawItem<'a> {
    level: usize,
    bullet: Bullet,
    text: &'a str,
}

impl WikiParser {
    pub fn new() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    /// Use a different number of spaces per indentation level
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    /// Parse wiki text into a document tree
    ///
    /// Parsing never fails; unknown syntax becomes plain text.
    pub fn parse(&self, text: &str) -> ParseTree {
        let mut children = Vec::new();
        let mut paragraph: Vec<&str> = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                if !paragraph.is_empty() {
                    children.push(self.parse_paragraph(&paragraph));
                    paragraph.clear();
                }
            } else {
                paragraph.push(line);
            }
        }

        if !paragraph.is_empty() {
            children.push(self.parse_paragraph(&paragraph));
        }

        ParseTree::new(children)
    }

    fn parse_paragraph(&self, lines: &[&str]) -> Node {
        let classified: Vec<Line> = lines.iter().map(|l| self.classify(l)).collect();
        let mut nodes = Vec::new();
        let mut i = 0;

        while i < classified.len() {
            match &classified[i] {
                Line::Text(text) => {
                    nodes.extend(parse_inline(text));
                    nodes.push(Node::text("\n"));
                    i += 1;
                }
                Line::Item(_) => {
                    // Collect the run of consecutive list lines
                    let mut run = Vec::new();
                    while let Some(Line::Item(item)) = classified.get(i) {
                        run.push(item);
                        i += 1;
                    }
                    let base = run.iter().map(|item| item.level).min().unwrap_or(0);
                    let mut pos = 0;
                    for list in build_lists(&run, &mut pos, base) {
                        nodes.push(Node::List(list));
                    }
                }
            }
        }

        Node::Paragraph(merge_text(nodes))
    }

    fn classify<'a>(&self, line: &'a str) -> Line<'a> {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];
        let columns: usize = indent
            .chars()
            .map(|c| if c == '\t' { self.tab_width } else { 1 })
            .sum();
        let level = columns / self.tab_width;

        match split_bullet(trimmed) {
            Some((bullet, text)) => Line::Item(RawItem {
                level,
                bullet,
                text,
            }),
            None => Line::Text(line),
        }
    }
}

/// Split a list marker off the start of a line
fn split_bullet(line: &str) -> Option<(Bullet, &str)> {
    for (marker, bullet) in [
        ("[ ]", Bullet::Unchecked),
        ("[*]", Bullet::Checked),
        ("[x]", Bullet::Crossed),
        ("*", Bullet::Plain),
    ] {
        if let Some(rest) = line.strip_prefix(marker) {
            if rest.is_empty() || rest.starts_with([' ', '\t']) {
                return Some((bullet, rest.trim_start()));
            }
        }
    }

    let caps = NUMBERED_RE.captures(line)?;
    let whole = caps.get(0)?;
    let marker = format!("{}.", caps.get(1)?.as_str());
    Some((Bullet::Numbered(marker), &line[whole.end()..]))
}

/// Build nested lists from a run of items starting at `level`
fn build_lists(items: &[&RawItem], pos: &mut usize, level: usize) -> Vec<List> {
    let mut lists: Vec<List> = Vec::new();

    while let Some(raw) = items.get(*pos) {
        if raw.level < level {
            break;
        }

        if raw.level > level {
            if let Some(parent) = lists.last_mut().and_then(|l| l.items.last_mut()) {
                let nested = build_lists(items, pos, raw.level);
                parent.children.extend(nested);
                continue;
            }
        }

        let kind = match raw.bullet {
            Bullet::Numbered(_) => ListKind::Numbered,
            _ => ListKind::Bullet,
        };
        let item = ListItem::new(raw.bullet.clone(), parse_inline(raw.text));

        match lists.last_mut() {
            Some(list) if list.kind == kind => list.items.push(item),
            _ => lists.push(List {
                kind,
                items: vec![item],
            }),
        }
        *pos += 1;
    }

    lists
}

/// Parse strike-through spans and tags out of a line of text
fn parse_inline(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut buf = String::new();
    let mut rest = text;
    let mut prev: Option<char> = None;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("~~") {
            if let Some(end) = after.find("~~") {
                flush_text(&mut buf, &mut nodes);
                nodes.push(Node::Strike(parse_inline(&after[..end])));
                rest = &after[end + 2..];
                prev = Some('~');
                continue;
            }
        }

        if c == '@' && prev.map_or(true, char::is_whitespace) {
            let name_len: usize = rest[1..]
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .map(char::len_utf8)
                .sum();
            if name_len > 0 {
                let name = &rest[1..1 + name_len];
                flush_text(&mut buf, &mut nodes);
                nodes.push(Node::tag(name));
                prev = name.chars().last();
                rest = &rest[1 + name_len..];
                continue;
            }
        }

        buf.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }

    flush_text(&mut buf, &mut nodes);
    nodes
}

fn flush_text(buf: &mut String, nodes: &mut Vec<Node>) {
    if !buf.is_empty() {
        nodes.push(Node::Text(std::mem::take(buf)));
    }
}

/// Join adjacent text runs
fn merge_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match (merged.last_mut(), node) {
            (Some(Node::Text(prev)), Node::Text(text)) => prev.push_str(&text),
            (_, node) => merged.push(node),
        }
    }
    merged
}

#[cfg(test)]
#[path = "wiki_test.rs"]
mod wiki_test;
