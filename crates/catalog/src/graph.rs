// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{BTreeSet, HashMap};

use viewdb_type::Namespace;

/// Longest chain of views that may be stacked on top of each other.
pub const MAX_VIEW_DEPTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
	#[error("view cycle detected: {}", render_path(.path))]
	Cycle {
		path: Vec<Namespace>,
	},

	#[error("view depth limit exceeded for '{view}'; maximum depth is {max_depth}")]
	DepthExceeded {
		view: Namespace,
		max_depth: usize,
	},
}

fn render_path(path: &[Namespace]) -> String {
	path.iter().map(Namespace::to_string).collect::<Vec<_>>().join(" -> ")
}

/// Dependency graph between views and the namespaces they read.
///
/// A node with outgoing edges is a view. Any other node, including a view that
/// has been removed while others still point at it, is a terminal.
#[derive(Debug, Default)]
pub struct ViewGraph {
	children: HashMap<Namespace, BTreeSet<Namespace>>,
	parents: HashMap<Namespace, BTreeSet<Namespace>>,
}

impl ViewGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `view -> refs` if doing so keeps the graph acyclic and the longest
	/// chain through `view` within [`MAX_VIEW_DEPTH`]. On error the graph is
	/// left as it was.
	pub fn insert_and_validate(&mut self, view: &Namespace, refs: BTreeSet<Namespace>) -> Result<(), GraphError> {
		debug_assert!(!self.children.contains_key(view), "view must be removed before it is re-inserted");

		let mut path = vec![view.clone()];
		let mut memo = HashMap::new();
		let mut below = 0;
		for reference in &refs {
			below = below.max(self.height(view, reference, &mut path, &mut memo)?);
		}

		let mut path = vec![view.clone()];
		let mut memo = HashMap::new();
		let above = self.ascent(view, view, &mut path, &mut memo)?;

		if above + 1 + below > MAX_VIEW_DEPTH {
			return Err(GraphError::DepthExceeded {
				view: view.clone(),
				max_depth: MAX_VIEW_DEPTH,
			});
		}

		self.insert_without_validating(view, refs);
		Ok(())
	}

	pub fn insert_without_validating(&mut self, view: &Namespace, refs: BTreeSet<Namespace>) {
		for reference in &refs {
			self.parents.entry(reference.clone()).or_default().insert(view.clone());
		}
		self.children.entry(view.clone()).or_default().extend(refs);
	}

	/// Removes the outgoing edges of `view` and returns them. Edges pointing at
	/// `view` from other views are kept.
	pub fn remove(&mut self, view: &Namespace) -> Option<BTreeSet<Namespace>> {
		let refs = self.children.remove(view)?;
		for reference in &refs {
			if let Some(parents) = self.parents.get_mut(reference) {
				parents.remove(view);
				if parents.is_empty() {
					self.parents.remove(reference);
				}
			}
		}
		Some(refs)
	}

	pub fn clear(&mut self) {
		self.children.clear();
		self.parents.clear();
	}

	/// Number of views in the graph.
	pub fn len(&self) -> usize {
		self.children.len()
	}

	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	pub fn contains(&self, view: &Namespace) -> bool {
		self.children.contains_key(view)
	}

	pub fn references(&self, view: &Namespace) -> Option<&BTreeSet<Namespace>> {
		self.children.get(view)
	}

	// Number of views in the longest chain starting at `node`, following
	// outgoing edges. `path` holds the chain from the inserted view.
	fn height(
		&self,
		origin: &Namespace,
		node: &Namespace,
		path: &mut Vec<Namespace>,
		memo: &mut HashMap<Namespace, usize>,
	) -> Result<usize, GraphError> {
		if node == origin || path.contains(node) {
			let mut path = path.clone();
			path.push(node.clone());
			return Err(GraphError::Cycle {
				path,
			});
		}
		if let Some(height) = memo.get(node) {
			return Ok(*height);
		}
		let Some(children) = self.children.get(node) else {
			return Ok(0);
		};
		if path.len() >= MAX_VIEW_DEPTH {
			return Err(GraphError::DepthExceeded {
				view: origin.clone(),
				max_depth: MAX_VIEW_DEPTH,
			});
		}

		path.push(node.clone());
		let mut below = 0;
		for child in children {
			below = below.max(self.height(origin, child, path, memo)?);
		}
		path.pop();

		memo.insert(node.clone(), below + 1);
		Ok(below + 1)
	}

	// Number of views stacked above `node`, following incoming edges.
	fn ascent(
		&self,
		origin: &Namespace,
		node: &Namespace,
		path: &mut Vec<Namespace>,
		memo: &mut HashMap<Namespace, usize>,
	) -> Result<usize, GraphError> {
		if let Some(above) = memo.get(node) {
			return Ok(*above);
		}
		let Some(parents) = self.parents.get(node) else {
			return Ok(0);
		};

		let mut above = 0;
		for parent in parents {
			if path.contains(parent) {
				let mut path = path.clone();
				path.push(parent.clone());
				path.reverse();
				return Err(GraphError::Cycle {
					path,
				});
			}
			if path.len() >= MAX_VIEW_DEPTH {
				return Err(GraphError::DepthExceeded {
					view: origin.clone(),
					max_depth: MAX_VIEW_DEPTH,
				});
			}
			path.push(parent.clone());
			above = above.max(self.ascent(origin, parent, path, memo)? + 1);
			path.pop();
		}

		memo.insert(node.clone(), above);
		Ok(above)
	}
}
