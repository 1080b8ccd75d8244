//! Extension points of the projection layer.
//!
//! A [`GraphHooks`] implementation is handed to the assembler at construction.
//! Every method has a default, so an implementation only overrides what it
//! changes. [`DefaultHooks`] overrides nothing.

use super::assembler::AggregateResponse;
use super::field::FieldMap;
use super::request::RawParams;
use crate::model::{Comment, Post, Term};
use std::collections::BTreeMap;

pub trait GraphHooks: Send + Sync {
    /// Rendered form of a post's content.
    fn render_content(&self, post: &Post) -> String {
        autop(&post.content)
    }

    /// Rendered form of a post's title.
    fn render_title(&self, post: &Post) -> String {
        texturize_title(&post.title)
    }

    /// Rendered form of a comment's content.
    fn render_comment(&self, comment: &Comment) -> String {
        autop(&comment.content)
    }

    fn transform_post(&self, fields: FieldMap, _post: &Post) -> FieldMap {
        fields
    }

    fn transform_term(&self, fields: FieldMap, _term: &Term) -> FieldMap {
        fields
    }

    fn transform_comment(&self, fields: FieldMap, _comment: &Comment) -> FieldMap {
        fields
    }

    /// Applied to the bare object returned by the single-post endpoint.
    fn transform_legacy_post(&self, fields: FieldMap, _post: &Post) -> FieldMap {
        fields
    }

    /// Sees the final aggregate of every batch endpoint.
    fn transform_response(
        &self,
        response: AggregateResponse,
        _params: &RawParams,
    ) -> AggregateResponse {
        response
    }

    /// Answers a post query instead of the store. A non-empty result is used
    /// as-is, skipping the allow-list and the read-permission check.
    fn custom_query(&self, _filters: &BTreeMap<String, Vec<String>>) -> Option<Vec<u64>> {
        None
    }
}

/// Hooks with every default behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl GraphHooks for DefaultHooks {}

/// Wraps blank-line separated blocks in `<p>` and turns the remaining single
/// newlines into `<br />`.
pub fn autop(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::new();
    for block in normalized.split("\n\n") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        let lines: Vec<&str> = block.lines().map(str::trim_end).collect();
        out.push_str("<p>");
        out.push_str(&lines.join("<br />\n"));
        out.push_str("</p>\n");
    }
    out
}

/// Trims a title and encodes bare ampersands, leaving existing entities alone.
pub fn texturize_title(title: &str) -> String {
    let title = title.trim();
    let mut out = String::with_capacity(title.len());
    for (index, c) in title.char_indices() {
        if c == '&' && !starts_entity(&title[index + 1..]) {
            out.push_str("&#038;");
        } else {
            out.push(c);
        }
    }
    out
}

/// Whether `rest` (the text after an `&`) is the body of an HTML entity.
fn starts_entity(rest: &str) -> bool {
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];
    match body.strip_prefix('#') {
        Some(digits) => {
            let digits = digits.strip_prefix(['x', 'X']).unwrap_or(digits);
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autop_builds_paragraphs_and_breaks() {
        assert_eq!(autop("Hello"), "<p>Hello</p>\n");
        assert_eq!(
            autop("One\ntwo\n\nThree\r\n"),
            "<p>One<br />\ntwo</p>\n<p>Three</p>\n"
        );
        assert_eq!(autop("  \n\n "), "");
    }

    #[test]
    fn title_ampersands_are_encoded_once() {
        assert_eq!(texturize_title(" Fish & Chips "), "Fish &#038; Chips");
        assert_eq!(texturize_title("Fish &amp; Chips"), "Fish &amp; Chips");
        assert_eq!(texturize_title("A &#8211; B"), "A &#8211; B");
    }
}
