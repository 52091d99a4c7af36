//! Path normalization.
//!
//! Every path the router sees, whether a registered pattern or a location
//! change, goes through [`normalize`] first.

/// Segment separator.
pub const SEPARATOR: char = '/';

/// Canonicalize a raw path.
///
/// The result has exactly one leading separator added if it was missing and no
/// trailing separator, except for the root path `/` itself. The empty string
/// normalizes to `/`. The function is total and idempotent.
///
/// ```
/// use sentier_router::normalize;
///
/// assert_eq!(normalize(""), "/");
/// assert_eq!(normalize("users/"), "/users");
/// assert_eq!(normalize("/users/42"), "/users/42");
/// ```
pub fn normalize(raw: &str) -> String {
	let trimmed = raw.trim_end_matches(SEPARATOR);
	if trimmed.is_empty() {
		return SEPARATOR.to_string();
	}

	let mut path = String::with_capacity(trimmed.len() + 1);
	if !trimmed.starts_with(SEPARATOR) {
		path.push(SEPARATOR);
	}
	path.push_str(trimmed);
	path
}

/// Split a normalized path into its segments.
///
/// The root path yields a single empty segment, which is how the root route is
/// keyed in the trie.
pub fn segments(path: &str) -> std::str::Split<'_, char> {
	path.strip_prefix(SEPARATOR).unwrap_or(path).split(SEPARATOR)
}

/// Return the fragment of a full URL: everything after the last `#`.
///
/// A URL without `#` has an empty fragment.
pub fn fragment(url: &str) -> &str {
	url.rfind('#').map(|i| &url[i + 1..]).unwrap_or("")
}
