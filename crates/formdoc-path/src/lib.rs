//! Path addressing for form documents.
//!
//! A path is an ordered list of steps; each step names either an object key
//! or a sequence index written as a decimal digit string. Paths resolve
//! against whichever container kind is actually present in the value tree,
//! so the same accessor works for objects and arrays alike.
//!
//! # Example
//!
//! ```
//! use formdoc_path::{parse_pointer, format_pointer, get};
//!
//! let path = parse_pointer("/tags/0").unwrap();
//! assert_eq!(path, vec!["tags".to_string(), "0".to_string()]);
//! assert_eq!(format_pointer(&path), "/tags/0");
//!
//! let doc = serde_json::json!({"tags": ["x", "y"]});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!("x")));
//! ```

use thiserror::Error;

mod get;
pub use get::{get, get_mut};

/// One step of a path: an object key or a decimal sequence index.
pub type PathStep = String;

/// An ordered sequence of steps addressing one location in a value tree.
pub type Path = Vec<PathStep>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("pointer must be absolute or empty")]
    NotAbsolute,
    #[error("path has no parent")]
    NoParent,
}

/// Unescapes one pointer step (`~1` becomes `/`, `~0` becomes `~`).
pub fn unescape_step(step: &str) -> String {
    if !step.contains('~') {
        return step.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    step.replace("~1", "/").replace("~0", "~")
}

/// Escapes one pointer step (`~` becomes `~0`, `/` becomes `~1`).
pub fn escape_step(step: &str) -> String {
    if !step.contains('/') && !step.contains('~') {
        return step.to_string();
    }
    // Order matters: ~ must be escaped before /
    step.replace('~', "~0").replace('/', "~1")
}

/// Parse an absolute pointer string into unescaped path steps.
///
/// `""` is the root path; every other pointer must start with `/`.
///
/// # Example
///
/// ```
/// use formdoc_path::parse_pointer;
///
/// assert_eq!(parse_pointer("").unwrap(), Vec::<String>::new());
/// assert_eq!(parse_pointer("/a~1b/~0k/0").unwrap(), vec!["a/b", "~k", "0"]);
/// assert!(parse_pointer("a/b").is_err());
/// ```
pub fn parse_pointer(pointer: &str) -> Result<Path, PathError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    if !pointer.starts_with('/') {
        return Err(PathError::NotAbsolute);
    }
    Ok(pointer.split('/').skip(1).map(unescape_step).collect())
}

/// Parse a pointer that may lack the leading `/`.
pub fn parse_pointer_relaxed(pointer: &str) -> Result<Path, PathError> {
    if pointer.starts_with('/') || pointer.is_empty() {
        return parse_pointer(pointer);
    }
    let mut absolute = String::with_capacity(pointer.len() + 1);
    absolute.push('/');
    absolute.push_str(pointer);
    parse_pointer(&absolute)
}

/// Format unescaped path steps into a pointer string.
///
/// Returns the empty string for the root path.
pub fn format_pointer(path: &[PathStep]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for step in path {
        out.push('/');
        out.push_str(&escape_step(step));
    }
    out
}

/// Check if a path addresses the root value.
pub fn is_root(path: &[PathStep]) -> bool {
    path.is_empty()
}

/// Check if `parent` strictly contains `child`.
pub fn is_child(parent: &[PathStep], child: &[PathStep]) -> bool {
    if parent.len() >= child.len() {
        return false;
    }
    parent.iter().zip(child).all(|(a, b)| a == b)
}

/// Get the parent path of a given path.
///
/// # Errors
///
/// Returns an error for the root path.
pub fn parent(path: &[PathStep]) -> Result<Path, PathError> {
    if path.is_empty() {
        return Err(PathError::NoParent);
    }
    Ok(path[..path.len() - 1].to_vec())
}

/// Check if a step is a canonical non-negative sequence index.
///
/// Leading zeros are rejected except for `"0"` itself.
///
/// # Example
///
/// ```
/// use formdoc_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(step: &str) -> bool {
    if step.is_empty() {
        return false;
    }
    let bytes = step.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}
