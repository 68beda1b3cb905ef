//! # Language Module
//!
//! This module contains facilities for HLASM source analysis.
//! The root module `lang` contains code shared with any language client:
//! URI normalization and tolerant JSON field readers.
//!
//! The `hlasm` submodule contains the analysis pipeline itself.

pub mod hlasm;
pub mod server;

use lsp_types as lsp;
use thiserror::Error;

use crate::DYNERR;

#[derive(Error,Debug)]
pub enum Error {
    #[error("Parsing error")]
    Parsing,
    #[error("Path not found")]
    PathNotFound,
    #[error("Could not parse URL")]
    BadUrl
}

/// This works by normalizing to the server's convention, i.e., anything that comes from the
/// client must be normalized.
/// As an example, the client may send "file:///c%3A" while the server generates "file:///C:".
pub fn normalize_client_uri(uri: lsp::Url) -> lsp::Url {
    if let Ok(path) = uri.to_file_path() {
        if let Ok(new_uri) = lsp::Url::from_file_path(path) {
            return new_uri;
        }
    }
    uri
}

/// Make a file URI for a local path, already in the server's convention.
pub fn uri_from_file_path(path: &std::path::Path) -> Result<lsp::Url,DYNERR> {
    match lsp::Url::from_file_path(path) {
        Ok(uri) => Ok(uri),
        Err(_) => Err(Box::new(Error::BadUrl))
    }
}

/// Try to update a named string from a serde `Value` presumed to be an object.
/// If there is any error do not change the value.
pub fn update_json_string(maybe_obj: &serde_json::Value, key: &str, curr: &mut String) {
    if let Some(outer) = maybe_obj.as_object() {
        if let Some(x) = outer.get(key) {
            match x.as_str() { Some(x) => *curr = x.to_string(), _ => {} };
        }
    }
}

/// Try to update a named integer from a serde `Value` presumed to be an object.
/// If there is any error do not change the value.
pub fn update_json_i64(maybe_obj: &serde_json::Value, key: &str, curr: &mut i64) {
    if let Some(outer) = maybe_obj.as_object() {
        if let Some(x) = outer.get(key) {
            match x.as_i64() { Some(x) => *curr = x, _ => {} };
        }
    }
}

/// Try to update a named list of strings from a serde `Value` presumed to be an object.
/// If there is any error do not change the value.
pub fn update_json_vec_str(maybe_obj: &serde_json::Value, key: &str, curr: &mut Vec<String>) {
    if let Some(outer) = maybe_obj.as_object() {
        if let Some(x) = outer.get(key) {
            let mut ans: Vec<String> = Vec::new();
            if let Some(a) = x.as_array() {
                for v in a {
                    match v.as_str() {
                        Some(s) => ans.push(s.to_owned()),
                        None => return
                    }
                }
                *curr = ans;
            }
        }
    }
}
