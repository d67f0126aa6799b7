use std::fmt::Write as _;

use crate::rsz::graph::MAX_GRAPH_DEPTH;
use crate::rsz::{FieldValue, InstanceGraph, InstanceId, Result, RszError, RszField, Value};

/// Layout knobs for `stringify`.
#[derive(Debug, Clone)]
pub struct StringifyOptions {
	/// Spaces added per nesting level.
	pub indent_width: usize,
}

impl Default for StringifyOptions {
	fn default() -> Self {
		Self { indent_width: 2 }
	}
}

/// Render an instance and everything it references as indented text.
///
/// With a `table`, raw indices left in reference fields are looked up and
/// expanded; indices outside the table print as-is. A reference cycle fails
/// with `GraphDepthExceeded`. Diagnostic output only.
pub fn stringify(graph: &InstanceGraph, id: InstanceId, table: Option<&[InstanceId]>, options: &StringifyOptions) -> Result<String> {
	let mut out = String::new();
	let mut printer = Printer {
		graph,
		table,
		options,
		path: Vec::new(),
	};
	printer.instance(&mut out, id, 0)?;
	Ok(out)
}

struct Printer<'a> {
	graph: &'a InstanceGraph,
	table: Option<&'a [InstanceId]>,
	options: &'a StringifyOptions,
	// instances currently being expanded, outermost first
	path: Vec<InstanceId>,
}

impl Printer<'_> {
	fn pad(&self, out: &mut String, level: u32) {
		let width = self.options.indent_width * level as usize;
		out.extend(std::iter::repeat_n(' ', width));
	}

	fn instance(&mut self, out: &mut String, id: InstanceId, level: u32) -> Result<()> {
		if level >= MAX_GRAPH_DEPTH || self.path.contains(&id) {
			return Err(RszError::GraphDepthExceeded { max_depth: MAX_GRAPH_DEPTH });
		}

		let graph = self.graph;
		let instance = graph.get(id)?;
		if instance.is_null() {
			out.push_str("NULL");
			return Ok(());
		}

		let _ = write!(out, "{} {{", instance.name());
		if let Some(user_data) = &instance.user_data {
			out.push('\n');
			self.pad(out, level + 1);
			let _ = writeln!(out, "RSZUserDataPath = {};", user_data.path);
			self.pad(out, level);
			out.push('}');
			return Ok(());
		}

		self.path.push(id);
		out.push('\n');
		for (field, slot) in instance.fields() {
			self.pad(out, level + 1);
			let _ = write!(out, "{}: {} = ", field.name, field.kind());
			match slot {
				FieldValue::Single(value) => self.value(out, field, value, level + 1)?,
				FieldValue::Array(items) => self.array(out, field, items, level + 1)?,
			}
			out.push_str(";\n");
		}
		self.path.pop();
		self.pad(out, level);
		out.push('}');
		Ok(())
	}

	fn array(&mut self, out: &mut String, field: &RszField, items: &[Value], level: u32) -> Result<()> {
		if items.is_empty() {
			out.push_str("[]");
			return Ok(());
		}

		if !field.is_reference() {
			out.push('[');
			for (i, item) in items.iter().enumerate() {
				if i > 0 {
					out.push_str(", ");
				}
				self.value(out, field, item, level)?;
			}
			out.push(']');
			return Ok(());
		}

		out.push_str("[\n");
		for (i, item) in items.iter().enumerate() {
			self.pad(out, level + 1);
			self.value(out, field, item, level + 1)?;
			if i + 1 < items.len() {
				out.push(',');
			}
			out.push('\n');
		}
		self.pad(out, level);
		out.push(']');
		Ok(())
	}

	fn value(&mut self, out: &mut String, field: &RszField, value: &Value, level: u32) -> Result<()> {
		if !field.is_reference() {
			let _ = write!(out, "{value}");
			return Ok(());
		}

		match value {
			Value::Instance(child) => self.instance(out, *child, level),
			Value::Index(raw) => match self.lookup(*raw) {
				Some(child) => self.instance(out, child, level),
				None => {
					let _ = write!(out, "{raw}");
					Ok(())
				}
			},
			other => {
				let _ = write!(out, "{other}");
				Ok(())
			}
		}
	}

	fn lookup(&self, raw: i32) -> Option<InstanceId> {
		let table = self.table?;
		let slot = usize::try_from(raw).ok()?;
		table.get(slot).copied()
	}
}
