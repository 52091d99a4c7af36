//! Matching paths against the route trie.
//!
//! The walk is a single greedy left-to-right descent with no backtracking:
//!
//! 1. A literal child is taken when one exists for the segment, unless this is
//!    the last segment and that child has no route ending on it.
//! 2. Otherwise the parameter child is taken and the segment value captured.
//! 3. Otherwise matching fails.
//!
//! A literal child is therefore preferred for every non-final segment even when
//! its subtree cannot match the rest of the path; the parameter branch is not
//! tried in that case.

use crate::args::RouteArgs;
use crate::path::{normalize, segments};
use crate::trie::{RouteEntry, RouteTrie};
use percent_encoding::percent_decode_str;

/// A successful match.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The matched route.
	pub entry: RouteEntry,
	/// Captured parameter values, aligned with `entry.param_names()`.
	pub param_values: Vec<String>,
	/// Raw segments of the matched path.
	pub raw_segments: Vec<String>,
}

impl RouteMatch {
	/// Arguments handed to view-models.
	pub fn args(&self) -> RouteArgs {
		RouteArgs::new(
			self.raw_segments.clone(),
			self.entry.param_names(),
			self.param_values.clone(),
		)
	}
}

/// Result of matching a path.
#[derive(Debug, Clone)]
pub enum MatchResult {
	/// The whole path was consumed and ended on a route.
	Matched(RouteMatch),
	/// No route matches.
	Unmatched,
}

impl MatchResult {
	/// Whether a route matched.
	pub fn is_matched(&self) -> bool {
		matches!(self, Self::Matched(_))
	}

	/// The match, if any.
	pub fn into_match(self) -> Option<RouteMatch> {
		match self {
			Self::Matched(m) => Some(m),
			Self::Unmatched => None,
		}
	}
}

/// Walks a [`RouteTrie`].
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
	decode_params: bool,
}

impl Default for Matcher {
	fn default() -> Self {
		Self::new()
	}
}

impl Matcher {
	/// A matcher that percent-decodes captured values.
	pub fn new() -> Self {
		Self {
			decode_params: true,
		}
	}

	/// Enable or disable percent-decoding of captured values.
	pub fn decode_params(mut self, decode: bool) -> Self {
		self.decode_params = decode;
		self
	}

	/// Match `path` against `trie`. The path is normalized first.
	pub fn match_path(&self, trie: &RouteTrie, path: &str) -> MatchResult {
		let path = normalize(path);
		let raw_segments: Vec<&str> = segments(&path).collect();
		let last = raw_segments.len() - 1;
		let mut node = trie.root();
		let mut param_values = Vec::new();

		for (i, segment) in raw_segments.iter().enumerate() {
			let literal = node
				.literal(segment)
				.filter(|child| i != last || child.terminal().is_some());

			node = if let Some(child) = literal {
				child
			} else if let Some(child) = node.param() {
				param_values.push(self.decode(segment));
				child
			} else {
				return MatchResult::Unmatched;
			};
		}

		match node.terminal() {
			Some(entry) => MatchResult::Matched(RouteMatch {
				entry: entry.clone(),
				param_values,
				raw_segments: raw_segments.into_iter().map(str::to_string).collect(),
			}),
			None => MatchResult::Unmatched,
		}
	}

	fn decode(&self, segment: &str) -> String {
		if self.decode_params {
			percent_decode_str(segment).decode_utf8_lossy().into_owned()
		} else {
			segment.to_string()
		}
	}
}

/// Match `path` against `trie` with the default [`Matcher`].
pub fn match_path(trie: &RouteTrie, path: &str) -> MatchResult {
	Matcher::new().match_path(trie, path)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::view::RouteSpec;
	use rstest::{fixture, rstest};
	use serde_json::json;

	fn spec(template: &str) -> RouteSpec {
		RouteSpec::fixed(template, json!(null))
	}

	#[fixture]
	fn trie() -> RouteTrie {
		let mut trie = RouteTrie::new();
		trie.insert("/", spec("home"));
		trie.insert("/users", spec("users"));
		trie.insert("/users/:id", spec("user"));
		trie.insert("/users/new", spec("user-new"));
		trie.insert("/users/:id/posts/:post", spec("post"));
		trie
	}

	fn template_of(result: MatchResult) -> Option<String> {
		result.into_match().map(|m| m.entry.template().to_string())
	}

	#[rstest]
	#[case("/", "home")]
	#[case("", "home")]
	#[case("/users", "users")]
	#[case("users/", "users")]
	#[case("/users/new", "user-new")]
	#[case("/users/7", "user")]
	#[case("/users/7/posts/9", "post")]
	fn test_matches(trie: RouteTrie, #[case] path: &str, #[case] template: &str) {
		assert_eq!(template_of(match_path(&trie, path)), Some(template.to_string()));
	}

	#[rstest]
	#[case("/nope")]
	#[case("/users/7/posts")]
	#[case("/users/7/posts/9/extra")]
	fn test_unmatched(trie: RouteTrie, #[case] path: &str) {
		assert!(!match_path(&trie, path).is_matched());
	}

	#[rstest]
	fn test_literal_match_has_no_params(trie: RouteTrie) {
		let m = match_path(&trie, "/users/new").into_match().unwrap();
		assert!(m.param_values.is_empty());
		assert_eq!(m.raw_segments, vec!["users", "new"]);
	}

	#[rstest]
	fn test_params_are_positional_and_decoded(trie: RouteTrie) {
		let m = match_path(&trie, "/users/j%C3%B6rg/posts/a%2Fb").into_match().unwrap();
		assert_eq!(m.param_values, vec!["jörg", "a/b"]);
		assert_eq!(m.raw_segments, vec!["users", "j%C3%B6rg", "posts", "a%2Fb"]);

		let args = m.args();
		assert_eq!(args.get("id"), Some("jörg"));
		assert_eq!(args.get("post"), Some("a/b"));
	}

	#[rstest]
	fn test_decoding_can_be_disabled(trie: RouteTrie) {
		let m = Matcher::new()
			.decode_params(false)
			.match_path(&trie, "/users/a%20b")
			.into_match()
			.unwrap();
		assert_eq!(m.param_values, vec!["a%20b"]);
	}

	#[rstest]
	fn test_literal_without_terminal_falls_back_to_param_on_last_segment() {
		let mut trie = RouteTrie::new();
		trie.insert("/a/:id", spec("param"));
		trie.insert("/a/b/c", spec("deep"));

		let m = match_path(&trie, "/a/b").into_match().unwrap();
		assert_eq!(m.entry.template(), "param");
		assert_eq!(m.param_values, vec!["b"]);
	}

	#[rstest]
	fn test_no_backtracking_on_inner_segments() {
		let mut trie = RouteTrie::new();
		trie.insert("/a/:id/edit", spec("edit"));
		trie.insert("/a/b/view", spec("view"));

		// The literal "b" branch is taken and cannot match "edit".
		assert!(!match_path(&trie, "/a/b/edit").is_matched());
		assert!(match_path(&trie, "/a/x/edit").is_matched());
	}

	#[rstest]
	fn test_param_route_matches_root_without_root_route() {
		let mut trie = RouteTrie::new();
		trie.insert("/:slug", spec("slug"));

		let m = match_path(&trie, "/").into_match().unwrap();
		assert_eq!(m.param_values, vec![""]);
	}
}
