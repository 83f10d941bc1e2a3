// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading and writing index files.
//!
//! An index ships in two forms with identical content:
//!
//! - `searchindex.json`: the bare object, fetched by the widget.
//! - `searchindex.js`: the object wrapped in `Object.assign(window.search, …);`
//!   so pages opened from `file://` can load it with a `<script>` tag.
//!
//! Older books wrote `window.search = …;`, which is still accepted on load.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::BookIndex;

const JS_PREFIX: &str = "Object.assign(window.search, ";
const JS_SUFFIX: &str = ");";
const LEGACY_JS_PREFIX: &str = "window.search = ";

/// Parse an index from JSON or from the script wrapper.
pub fn from_str(text: &str) -> Result<BookIndex> {
    let body = strip_js_wrapper(text)?;
    Ok(serde_json::from_str(body)?)
}

/// Read and parse an index file.
pub fn load_path(path: impl AsRef<Path>) -> Result<BookIndex> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let index = from_str(&text)?;
    tracing::debug!(
        path = %path.display(),
        docs = index.doc_count(),
        "loaded search index"
    );
    Ok(index)
}

/// Extract the JSON object from a script-wrapped index. Bare JSON passes through.
pub fn strip_js_wrapper(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }
    if let Some(rest) = trimmed.strip_prefix(JS_PREFIX) {
        return rest
            .strip_suffix(JS_SUFFIX)
            .map(str::trim)
            .ok_or(Error::MalformedWrapper("missing closing `);`"));
    }
    if let Some(rest) = trimmed.strip_prefix(LEGACY_JS_PREFIX) {
        let rest = rest.strip_suffix(';').unwrap_or(rest);
        return Ok(rest.trim());
    }
    Err(Error::MalformedWrapper(
        "expected a JSON object or `Object.assign(window.search, ...)`",
    ))
}

pub fn to_json(index: &BookIndex) -> Result<String> {
    Ok(serde_json::to_string(index)?)
}

pub fn to_js(index: &BookIndex) -> Result<String> {
    Ok(format!("{}{}{}", JS_PREFIX, to_json(index)?, JS_SUFFIX))
}

pub fn write_json(index: &BookIndex, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json(index)?).map_err(|e| Error::io(path, e))
}

pub fn write_js(index: &BookIndex, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_js(index)?).map_err(|e| Error::io(path, e))
}
