//! Route trie.
//!
//! Patterns are stored segment by segment. Each node has any number of literal
//! children, at most one parameter child shared by every parameter name at that
//! depth, and optionally a terminal [`RouteEntry`] for a route ending there.

use crate::path::{normalize, segments};
use crate::view::{RouteSpec, ViewSource};
use std::collections::HashMap;

/// Default parameter sigil.
pub const PARAM_SIGIL: char = ':';

/// Terminal payload of a registered route.
#[derive(Debug, Clone)]
pub struct RouteEntry {
	pattern: String,
	param_names: Vec<String>,
	source: ViewSource,
	template: String,
}

impl RouteEntry {
	/// Normalized pattern the route was registered under.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Parameter names, in the order their segments appear in the pattern.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// What the route renders.
	pub fn source(&self) -> &ViewSource {
		&self.source
	}

	/// Template identifier.
	pub fn template(&self) -> &str {
		&self.template
	}
}

/// One trie node.
#[derive(Debug, Default)]
pub struct TrieNode {
	literals: HashMap<String, TrieNode>,
	param: Option<Box<TrieNode>>,
	terminal: Option<RouteEntry>,
}

impl TrieNode {
	/// Child for a literal segment.
	pub fn literal(&self, segment: &str) -> Option<&TrieNode> {
		self.literals.get(segment)
	}

	/// The parameter child.
	pub fn param(&self) -> Option<&TrieNode> {
		self.param.as_deref()
	}

	/// The route ending at this node.
	pub fn terminal(&self) -> Option<&RouteEntry> {
		self.terminal.as_ref()
	}
}

/// Trie of registered route patterns.
#[derive(Debug)]
pub struct RouteTrie {
	root: TrieNode,
	sigil: char,
	len: usize,
}

impl Default for RouteTrie {
	fn default() -> Self {
		Self::new()
	}
}

impl RouteTrie {
	/// Creates an empty trie using `:` as the parameter sigil.
	pub fn new() -> Self {
		Self::with_sigil(PARAM_SIGIL)
	}

	/// Creates an empty trie with a custom parameter sigil.
	pub fn with_sigil(sigil: char) -> Self {
		Self {
			root: TrieNode::default(),
			sigil,
			len: 0,
		}
	}

	/// Register a pattern.
	///
	/// Two patterns with the same segment sequence (parameter names aside)
	/// share a terminal; the later registration replaces the earlier one, which
	/// is returned.
	pub fn insert(&mut self, pattern: &str, spec: RouteSpec) -> Option<RouteEntry> {
		let pattern = normalize(pattern);
		let sigil = self.sigil;
		let mut param_names = Vec::new();
		let mut node = &mut self.root;

		for segment in segments(&pattern) {
			node = match segment.strip_prefix(sigil) {
				Some(name) => {
					param_names.push(name.to_string());
					node.param.get_or_insert_with(Box::default).as_mut()
				}
				None => node.literals.entry(segment.to_string()).or_default(),
			};
		}

		tracing::trace!(pattern = %pattern, params = ?param_names, "registering route");
		let replaced = node.terminal.replace(RouteEntry {
			pattern,
			param_names,
			source: spec.data,
			template: spec.template,
		});
		if replaced.is_none() {
			self.len += 1;
		}
		replaced
	}

	/// Root node.
	pub fn root(&self) -> &TrieNode {
		&self.root
	}

	/// Parameter sigil in use.
	pub fn sigil(&self) -> char {
		self.sigil
	}

	/// Number of distinct routes.
	pub fn len(&self) -> usize {
		self.len
	}

	/// Whether no route is registered.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn spec(template: &str) -> RouteSpec {
		RouteSpec::fixed(template, json!(null))
	}

	#[rstest]
	fn test_root_pattern_is_empty_literal() {
		let mut trie = RouteTrie::new();
		trie.insert("/", spec("home"));

		let root = trie.root().literal("").and_then(TrieNode::terminal).unwrap();
		assert_eq!(root.pattern(), "/");
		assert_eq!(root.template(), "home");
	}

	#[rstest]
	fn test_param_names_in_order() {
		let mut trie = RouteTrie::new();
		trie.insert("users/:user_id/posts/:post_id/", spec("post"));

		let entry = trie
			.root()
			.literal("users")
			.and_then(TrieNode::param)
			.and_then(|n| n.literal("posts"))
			.and_then(TrieNode::param)
			.and_then(TrieNode::terminal)
			.unwrap();
		assert_eq!(entry.pattern(), "/users/:user_id/posts/:post_id");
		assert_eq!(entry.param_names(), &["user_id", "post_id"]);
	}

	#[rstest]
	fn test_parameter_names_share_one_branch() {
		let mut trie = RouteTrie::new();
		trie.insert("/a/:id", spec("by-id"));
		trie.insert("/a/:slug/edit", spec("edit"));

		let param = trie.root().literal("a").and_then(TrieNode::param).unwrap();
		assert_eq!(param.terminal().unwrap().template(), "by-id");
		assert!(param.literal("edit").and_then(TrieNode::terminal).is_some());
	}

	#[rstest]
	fn test_last_registration_wins() {
		let mut trie = RouteTrie::new();
		assert!(trie.insert("/a", spec("first")).is_none());
		let replaced = trie.insert("a/", spec("second")).unwrap();

		assert_eq!(replaced.template(), "first");
		assert_eq!(trie.len(), 1);
		let entry = trie.root().literal("a").and_then(TrieNode::terminal).unwrap();
		assert_eq!(entry.template(), "second");
	}

	#[rstest]
	fn test_custom_sigil() {
		let mut trie = RouteTrie::with_sigil('$');
		trie.insert("/a/$id", spec("param"));
		trie.insert("/a/:id", spec("literal"));

		let a = trie.root().literal("a").unwrap();
		assert_eq!(a.param().and_then(TrieNode::terminal).unwrap().param_names(), &["id"]);
		assert!(a.literal(":id").and_then(TrieNode::terminal).is_some());
	}
}
