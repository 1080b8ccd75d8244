//! Native attribute tables, one per resource kind.
//!
//! Each function maps a field name to the attribute of the same name, or
//! `None` when the resource has no such attribute, in which case the resolver
//! falls back to metadata.

use super::field::FieldValue;
use crate::model::{Comment, Post, Term, DATE_FORMAT};
use chrono::NaiveDateTime;

fn date(value: &NaiveDateTime) -> FieldValue {
    FieldValue::Text(value.format(DATE_FORMAT).to_string())
}

pub fn post_attribute(post: &Post, name: &str) -> Option<FieldValue> {
    let value = match name {
        "id" => FieldValue::UInt(post.id.0),
        "title" => FieldValue::text(&post.title),
        "content" => FieldValue::text(&post.content),
        "excerpt" => FieldValue::text(&post.excerpt),
        "status" => FieldValue::text(post.status.as_str()),
        "type" | "post_type" => FieldValue::text(&post.post_type),
        "author" => FieldValue::UInt(post.author),
        "date" => date(&post.date),
        "modified" => date(&post.modified),
        "slug" => FieldValue::text(&post.slug),
        "parent" => FieldValue::UInt(post.parent),
        "password" => FieldValue::text(&post.password),
        "menu_order" => FieldValue::Int(post.menu_order),
        "comment_status" => FieldValue::text(&post.comment_status),
        _ => return None,
    };
    Some(value)
}

pub fn term_attribute(term: &Term, name: &str) -> Option<FieldValue> {
    let value = match name {
        "id" => FieldValue::UInt(term.id.0),
        "name" => FieldValue::text(&term.name),
        "slug" => FieldValue::text(&term.slug),
        "taxonomy" => FieldValue::text(&term.taxonomy),
        "description" => FieldValue::text(&term.description),
        "parent" => FieldValue::UInt(term.parent),
        "count" => FieldValue::UInt(term.count),
        _ => return None,
    };
    Some(value)
}

pub fn comment_attribute(comment: &Comment, name: &str) -> Option<FieldValue> {
    let value = match name {
        "id" => FieldValue::UInt(comment.id.0),
        "post_id" => FieldValue::UInt(comment.post_id.0),
        "author" => FieldValue::text(&comment.author),
        "author_email" => FieldValue::text(&comment.author_email),
        "author_url" => FieldValue::text(&comment.author_url),
        "author_ip" => FieldValue::text(&comment.author_ip),
        "date" => date(&comment.date),
        "content" => FieldValue::text(&comment.content),
        "status" => FieldValue::text(comment.status.as_str()),
        "agent" => FieldValue::text(&comment.agent),
        "type" => FieldValue::text(&comment.comment_type),
        "parent" => FieldValue::UInt(comment.parent),
        "user_id" => FieldValue::UInt(comment.user_id),
        _ => return None,
    };
    Some(value)
}

/// Metadata lookup. Missing or empty values resolve to `""`, never null.
pub fn meta_value(meta: &crate::model::Meta, name: &str) -> FieldValue {
    FieldValue::text(meta.get(name).cloned().unwrap_or_default())
}
