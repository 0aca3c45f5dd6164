use crate::url::Origin;
use std::collections::HashSet;

/// Decides whether a raw link target is in scope and returns its absolute form
///
/// # Rules
///
/// - A target that already starts with the origin's `scheme://host` is kept verbatim,
///   provided the origin is followed by a path, query, fragment or nothing at all
///   (so `http://example.com.evil.org` does not pass for `http://example.com`).
/// - A target starting with `/` is resolved against the origin. A protocol-relative
///   target (`//host/path`) is resolved the same way and only kept if it lands
///   back on the origin.
/// - Everything else is discarded: other hosts, fragment-only anchors,
///   `mailto:`/`javascript:`/`tel:` and document-relative paths.
///
/// # Examples
///
/// ```
/// use sitewalk::url::{resolve_in_scope, Origin};
/// use url::Url;
///
/// let origin = Origin::of(&Url::parse("http://example.com/x").unwrap()).unwrap();
/// assert_eq!(
///     resolve_in_scope(&origin, "/y").as_deref(),
///     Some("http://example.com/y")
/// );
/// assert_eq!(resolve_in_scope(&origin, "http://other.com/z"), None);
/// ```
pub fn resolve_in_scope(origin: &Origin, target: &str) -> Option<String> {
    let target = target.trim();

    if target.is_empty() || target.starts_with('#') {
        return None;
    }

    if target.starts_with('/') {
        let resolved = origin.join(target)?;
        return origin.contains(&resolved).then(|| resolved.into());
    }

    let rest = target.strip_prefix(origin.as_str())?;
    if rest.is_empty() || rest.starts_with(['/', '?', '#']) {
        Some(target.to_string())
    } else {
        None
    }
}

/// Filters a page's raw link targets down to in-scope absolute URLs
///
/// Order of first appearance is kept and repeats within the batch are dropped.
pub fn filter_links<S: AsRef<str>>(origin: &Origin, targets: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for target in targets {
        match resolve_in_scope(origin, target.as_ref()) {
            Some(url) => {
                if seen.insert(url.clone()) {
                    links.push(url);
                }
            }
            None => tracing::trace!("Discarding out-of-scope link: {:?}", target.as_ref()),
        }
    }

    links
}
