//! Named-slot fragment container.
//!
//! A template is parsed from a markup string containing two kinds of tags:
//!
//! - value slots: `{$name}` — an empty region filled in with [`Template::set`]
//!   or [`Template::set_html`];
//! - regions: `{Name}...{/Name}` — a named block whose content can be read,
//!   replaced, appended to, cleared, or cloned out as a fresh template. The
//!   shorthand `{/}` closes the innermost open region.
//!
//! Tag names may repeat; operations by name affect every tag carrying it,
//! which is what lets a composed cell repeat a value slot and still bind in
//! one call.

use crate::error::{MarkupError, Result};
use crate::escape::escape_html;

#[derive(Debug, Clone)]
enum Node {
	Text(String),
	Tag { name: String, children: Vec<Node> },
}

/// A parsed markup fragment with named slots and regions.
#[derive(Debug, Clone, Default)]
pub struct Template {
	nodes: Vec<Node>,
}

enum Token {
	Slot(String),
	Open(String),
	Close(String),
}

/// Consume an identifier (`[A-Za-z0-9_]*`) from the start of `s`.
fn lex_ident(s: &str) -> (&str, usize) {
	let end = s
		.char_indices()
		.find(|(_, c)| !c.is_ascii_alphanumeric() && *c != '_')
		.map(|(i, _)| i)
		.unwrap_or(s.len());
	(&s[..end], end)
}

/// Try to read one template tag from `s`, which starts at a `{`.
///
/// Returns the token and the number of bytes consumed, or `None` when the
/// brace does not introduce a tag and should be kept as literal text.
fn lex_tag(s: &str) -> Option<(Token, usize)> {
	let body = &s[1..];
	if let Some(rest) = body.strip_prefix('$') {
		let (name, len) = lex_ident(rest);
		if !name.is_empty() && rest[len..].starts_with('}') {
			return Some((Token::Slot(name.to_string()), 2 + len + 1));
		}
	} else if let Some(rest) = body.strip_prefix('/') {
		let (name, len) = lex_ident(rest);
		if rest[len..].starts_with('}') {
			return Some((Token::Close(name.to_string()), 2 + len + 1));
		}
	} else {
		let (name, len) = lex_ident(body);
		if !name.is_empty() && body[len..].starts_with('}') {
			return Some((Token::Open(name.to_string()), 1 + len + 1));
		}
	}
	None
}

fn flush_text(text: &mut String, nodes: &mut Vec<Node>) {
	if !text.is_empty() {
		nodes.push(Node::Text(std::mem::take(text)));
	}
}

fn parse_nodes(src: &str) -> Result<Vec<Node>> {
	let mut stack: Vec<(String, Vec<Node>)> = Vec::new();
	let mut current: Vec<Node> = Vec::new();
	let mut text = String::new();
	let mut rest = src;

	while let Some(pos) = rest.find('{') {
		let (before, at) = rest.split_at(pos);
		text.push_str(before);
		match lex_tag(at) {
			Some((token, len)) => {
				flush_text(&mut text, &mut current);
				match token {
					Token::Slot(name) => current.push(Node::Tag {
						name,
						children: Vec::new(),
					}),
					Token::Open(name) => {
						stack.push((name, std::mem::take(&mut current)));
					}
					Token::Close(name) => {
						let Some((open_name, parent)) = stack.pop() else {
							return Err(MarkupError::UnexpectedClose { name });
						};
						if !name.is_empty() && name != open_name {
							return Err(MarkupError::UnexpectedClose { name });
						}
						let children = std::mem::replace(&mut current, parent);
						current.push(Node::Tag {
							name: open_name,
							children,
						});
					}
				}
				rest = &at[len..];
			}
			None => {
				text.push('{');
				rest = &at[1..];
			}
		}
	}
	text.push_str(rest);
	flush_text(&mut text, &mut current);

	if let Some((name, _)) = stack.pop() {
		return Err(MarkupError::UnclosedRegion { name });
	}
	Ok(current)
}

fn render_nodes(nodes: &[Node], out: &mut String) {
	for node in nodes {
		match node {
			Node::Text(text) => out.push_str(text),
			Node::Tag { children, .. } => render_nodes(children, out),
		}
	}
}

/// Apply `f` to the children of every tag named `name`; returns whether any
/// tag matched. Matched tags are not descended into.
fn for_each_tag(nodes: &mut [Node], name: &str, f: &mut dyn FnMut(&mut Vec<Node>)) -> bool {
	let mut found = false;
	for node in nodes {
		if let Node::Tag {
			name: tag_name,
			children,
		} = node
		{
			if tag_name == name {
				f(children);
				found = true;
			} else {
				found |= for_each_tag(children, name, f);
			}
		}
	}
	found
}

fn find_tag<'a>(nodes: &'a [Node], name: &str) -> Option<&'a [Node]> {
	for node in nodes {
		if let Node::Tag {
			name: tag_name,
			children,
		} = node
		{
			if tag_name == name {
				return Some(children);
			}
			if let Some(hit) = find_tag(children, name) {
				return Some(hit);
			}
		}
	}
	None
}

impl Template {
	/// Parse a template from its markup source.
	pub fn parse(src: &str) -> Result<Self> {
		Ok(Self {
			nodes: parse_nodes(src)?,
		})
	}

	/// Whether any tag with the given name exists.
	pub fn has(&self, name: &str) -> bool {
		find_tag(&self.nodes, name).is_some()
	}

	/// Set a data value into every tag with the given name, HTML-escaped.
	///
	/// Returns whether any tag matched; unknown names are a no-op so callers
	/// can bind a whole record without checking which fields have slots.
	pub fn set(&mut self, name: &str, value: &str) -> bool {
		self.set_html(name, &escape_html(value))
	}

	/// Set raw markup into every tag with the given name.
	pub fn set_html(&mut self, name: &str, html: &str) -> bool {
		for_each_tag(&mut self.nodes, name, &mut |children| {
			*children = vec![Node::Text(html.to_string())];
		})
	}

	/// Append raw markup to every tag with the given name.
	pub fn append_html(&mut self, name: &str, html: &str) -> bool {
		for_each_tag(&mut self.nodes, name, &mut |children| {
			children.push(Node::Text(html.to_string()));
		})
	}

	/// Clear the content of every tag with the given name. The tags remain
	/// and can be refilled later.
	pub fn del(&mut self, name: &str) -> bool {
		for_each_tag(&mut self.nodes, name, &mut |children| children.clear())
	}

	/// Render the content of the first tag with the given name.
	pub fn get_html(&self, name: &str) -> Option<String> {
		find_tag(&self.nodes, name).map(|children| {
			let mut out = String::new();
			render_nodes(children, &mut out);
			out
		})
	}

	/// Clone the content of a region out as an independent template.
	pub fn clone_region(&self, name: &str) -> Result<Template> {
		let children = find_tag(&self.nodes, name).ok_or_else(|| MarkupError::UnknownRegion {
			name: name.to_string(),
		})?;
		Ok(Template {
			nodes: children.to_vec(),
		})
	}

	/// Render the template to a flat markup string.
	pub fn render(&self) -> String {
		let mut out = String::new();
		render_nodes(&self.nodes, &mut out);
		out
	}
}
