use crate::rsz::graph::MAX_GRAPH_DEPTH;
use crate::rsz::{InstanceGraph, InstanceId, Result, RszError, Value};

enum Child {
	Resolved(InstanceId),
	Unresolved { class: String, field: String, raw: String },
}

struct Frame {
	id: InstanceId,
	children: Vec<Child>,
	next: usize,
}

/// Post-order walk over every instance reachable from a root.
///
/// Each instance is yielded after all of its children, so the root comes
/// last. Shared instances are yielded once per path that reaches them. The
/// walk stops after the first error.
pub struct Flatten<'a> {
	graph: &'a InstanceGraph,
	stack: Vec<Frame>,
	pending_root: Option<InstanceId>,
	failed: bool,
}

impl<'a> Flatten<'a> {
	/// Start a walk rooted at `root`.
	pub fn new(graph: &'a InstanceGraph, root: InstanceId) -> Self {
		Self {
			graph,
			stack: Vec::new(),
			pending_root: Some(root),
			failed: false,
		}
	}

	fn frame(&self, id: InstanceId) -> Result<Frame> {
		let instance = self.graph.get(id)?;
		let mut children = Vec::new();
		if instance.user_data.is_none() {
			for (field, slot) in instance.fields() {
				if !field.is_reference() {
					continue;
				}
				for value in slot.values() {
					children.push(match value {
						Value::Instance(child) => Child::Resolved(*child),
						other => Child::Unresolved {
							class: instance.class.name.to_string(),
							field: field.name.to_string(),
							raw: other.to_string(),
						},
					});
				}
			}
		}
		Ok(Frame { id, children, next: 0 })
	}

	fn push(&mut self, id: InstanceId) -> Result<()> {
		if self.stack.len() >= MAX_GRAPH_DEPTH as usize {
			return Err(RszError::GraphDepthExceeded { max_depth: MAX_GRAPH_DEPTH });
		}
		let frame = self.frame(id)?;
		self.stack.push(frame);
		Ok(())
	}

	fn step(&mut self) -> Result<Option<InstanceId>> {
		if let Some(root) = self.pending_root.take() {
			self.push(root)?;
		}

		loop {
			let Some(top) = self.stack.last_mut() else {
				return Ok(None);
			};

			if top.next == top.children.len() {
				let id = top.id;
				self.stack.pop();
				return Ok(Some(id));
			}

			let child = &top.children[top.next];
			top.next += 1;
			match child {
				Child::Resolved(id) => {
					let id = *id;
					self.push(id)?;
				}
				Child::Unresolved { class, field, raw } => {
					return Err(RszError::UnresolvedReference {
						class: class.clone(),
						field: field.clone(),
						raw: raw.clone(),
					});
				}
			}
		}
	}
}

impl Iterator for Flatten<'_> {
	type Item = Result<InstanceId>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}
		match self.step() {
			Ok(item) => item.map(Ok),
			Err(err) => {
				self.failed = true;
				self.stack.clear();
				Some(Err(err))
			}
		}
	}
}

/// Collect the post-order sequence of every instance reachable from `root`.
pub fn flatten(graph: &InstanceGraph, root: InstanceId) -> Result<Vec<InstanceId>> {
	Flatten::new(graph, root).collect()
}
