//! Field extraction from raw comment text using Markdown parsing

use super::{DocComment, ParamField};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// A list item with its own text and nested items
#[derive(Debug, Default)]
struct ListItem {
    text: String,
    children: Vec<ListItem>,
}

/// Strip comment markers and common indentation from a raw comment
///
/// Accepts `///` line comments, `/** */` block comments and text that was
/// already stripped by the producer of the dump.
pub fn normalize_raw_comment(raw: &str) -> String {
    let is_block = raw.trim_start().starts_with("/**");

    let mut lines: Vec<&str> = Vec::new();
    for line in raw.lines() {
        let trimmed = line.trim_start();
        let mut content = if let Some(rest) = trimmed.strip_prefix("///") {
            rest
        } else if let Some(rest) = trimmed.strip_prefix("/**") {
            rest
        } else if is_block && trimmed.starts_with('*') && !trimmed.starts_with("*/") {
            &trimmed[1..]
        } else {
            line
        };

        if is_block {
            content = content.trim_end();
            content = content.strip_suffix("*/").unwrap_or(content);
            if content.trim() == "*/" {
                content = "";
            }
        }

        lines.push(content.trim_end());
    }

    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let dedented: Vec<&str> = lines
        .iter()
        .map(|l| l.get(indent..).unwrap_or_else(|| l.trim_start()))
        .collect();

    let start = dedented.iter().position(|l| !l.trim().is_empty());
    let end = dedented.iter().rposition(|l| !l.trim().is_empty());

    match (start, end) {
        (Some(start), Some(end)) => dedented[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Parse a raw comment into its structured fields
pub fn parse_doc_comment(raw: &str) -> DocComment {
    let text = normalize_raw_comment(raw);
    let mut doc = DocComment::default();

    let mut prose_blocks: Vec<String> = Vec::new();
    let mut prose = String::new();
    let mut top_items: Vec<ListItem> = Vec::new();
    let mut lists: Vec<Vec<ListItem>> = Vec::new();
    let mut items: Vec<ListItem> = Vec::new();

    for event in Parser::new(&text) {
        match event {
            Event::Start(Tag::List(_)) => lists.push(Vec::new()),
            Event::End(TagEnd::List(_)) => {
                let finished = lists.pop().unwrap_or_default();
                match items.last_mut() {
                    Some(item) => item.children.extend(finished),
                    None => top_items.extend(finished),
                }
            }
            Event::Start(Tag::Item) => items.push(ListItem::default()),
            Event::End(TagEnd::Item) => {
                if let Some(item) = items.pop() {
                    if let Some(list) = lists.last_mut() {
                        list.push(item);
                    }
                }
            }
            Event::Text(text) | Event::Code(text) => match items.last_mut() {
                Some(item) => item.text.push_str(&text),
                None => prose.push_str(&text),
            },
            Event::SoftBreak | Event::HardBreak => match items.last_mut() {
                Some(item) => item.text.push(' '),
                None => prose.push(' '),
            },
            Event::End(TagEnd::Paragraph) if !items.is_empty() => {
                if let Some(item) = items.last_mut() {
                    item.text.push(' ');
                }
            }
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock) => {
                flush_prose(&mut prose, &mut prose_blocks);
            }
            _ => {}
        }
    }
    flush_prose(&mut prose, &mut prose_blocks);

    let mut blocks = prose_blocks.into_iter();
    doc.brief = blocks.next();
    doc.body.extend(blocks);

    for item in top_items {
        classify_item(item, &mut doc);
    }

    doc
}

fn flush_prose(prose: &mut String, blocks: &mut Vec<String>) {
    let block = prose.trim();
    if !block.is_empty() {
        blocks.push(block.to_string());
    }
    prose.clear();
}

/// Sort a top-level list item into a field or plain body content
fn classify_item(item: ListItem, doc: &mut DocComment) {
    let text = item.text.trim();

    if let Some(rest) = strip_keyword(text, "parameters") {
        if rest.trim_start().starts_with(':') {
            for child in &item.children {
                if let Some((name, body)) = split_field(&child.text) {
                    doc.param_fields.push(ParamField { name, body });
                }
            }
            return;
        }
    }

    if let Some(rest) = strip_keyword(text, "parameter") {
        if rest.starts_with(char::is_whitespace) {
            if let Some((name, body)) = split_field(rest) {
                doc.param_fields.push(ParamField { name, body });
                return;
            }
        }
    }

    if let Some(body) = strip_keyword(text, "returns").and_then(field_body) {
        doc.returns_field = Some(body);
        return;
    }

    if let Some(body) = strip_keyword(text, "throws").and_then(field_body) {
        doc.throws_field = Some(body);
        return;
    }

    let mut block = text.to_string();
    for child in &item.children {
        block.push(' ');
        block.push_str(child.text.trim());
    }
    if !block.trim().is_empty() {
        doc.body.push(block.trim().to_string());
    }
}

/// Case-insensitive keyword prefix match returning the remaining text
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let len = keyword.len();
    if text.len() < len || !text.is_char_boundary(len) {
        return None;
    }
    if text[..len].eq_ignore_ascii_case(keyword) {
        Some(&text[len..])
    } else {
        None
    }
}

/// Body of a `Keyword: body` field, given the text after the keyword
fn field_body(rest: &str) -> Option<String> {
    rest.trim_start()
        .strip_prefix(':')
        .map(|body| body.trim().to_string())
}

/// Split `name: body`; the name must be a single word
fn split_field(text: &str) -> Option<(String, String)> {
    let (name, body) = text.trim().split_once(':')?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some((name.to_string(), body.trim().to_string()))
}
