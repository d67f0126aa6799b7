use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use rsz::rsz::{Cursor, InstanceGraph, InstanceId, ReadOptions, Result, RszClass, RszError, Schema, read_instances, resolve_references};

/// Positional schema/data inputs shared by commands that read instance data.
#[derive(clap::Args)]
pub struct DataArgs {
	pub schema: PathBuf,
	pub data: PathBuf,
	/// Class of each instance in the data, in order; `NULL` reserves a slot without reading bytes.
	#[arg(long = "class", required = true)]
	pub classes: Vec<String>,
	#[arg(long)]
	pub offset: Option<String>,
	#[arg(long = "first-index", default_value_t = 0)]
	pub first_index: i32,
}

/// Instances decoded from one data file.
pub(crate) struct Decoded {
	pub graph: InstanceGraph,
	pub table: Vec<InstanceId>,
	pub bytes: Vec<u8>,
	pub start: usize,
	pub end: usize,
	pub resolved: bool,
}

/// Print a payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Parse decimal or `0x`-prefixed hex byte offset.
pub(crate) fn parse_offset(value: &str) -> Result<usize> {
	let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		Some(digits) => usize::from_str_radix(digits, 16),
		None => value.parse::<usize>(),
	};
	parsed.map_err(|_| RszError::InvalidArgument {
		name: "offset",
		value: value.to_owned(),
	})
}

/// Look up each class name, mapping `NULL` to the NULL class.
pub(crate) fn resolve_classes(schema: &Schema, names: &[String]) -> Result<Vec<Arc<RszClass>>> {
	names
		.iter()
		.map(|name| {
			if name == "NULL" {
				return Ok(RszClass::null());
			}
			schema.get_by_name(name).cloned().ok_or_else(|| RszError::SchemaNotFound { name: name.clone() })
		})
		.collect()
}

/// Load the schema and data file, then read instances back to back.
///
/// References are resolved only when the table starts at index 0; a table
/// whose raw indices point outside it is left unresolved with a warning.
pub(crate) fn decode_data(args: &DataArgs) -> Result<Decoded> {
	let schema = Schema::open(&args.schema)?;
	let classes = resolve_classes(&schema, &args.classes)?;
	let bytes = std::fs::read(&args.data)?;
	let start = args.offset.as_deref().map(parse_offset).transpose()?.unwrap_or(0);

	let mut graph = InstanceGraph::new();
	let (table, end) = {
		let mut cursor = Cursor::new(&bytes);
		cursor.seek(start)?;
		let table = read_instances(&mut graph, &classes, &mut cursor, args.first_index, &ReadOptions::default())?;
		(table, cursor.pos())
	};
	tracing::debug!(instances = table.len(), start, end, "decoded instance data");

	let resolved = if args.first_index == 0 {
		match resolve_references(&mut graph, &table) {
			Ok(()) => true,
			Err(RszError::TableIndexOutOfRange { index, len }) => {
				tracing::warn!(index, len, "reference points outside the decoded table; leaving raw indices");
				false
			}
			Err(err) => return Err(err),
		}
	} else {
		tracing::warn!(first_index = args.first_index, "table does not start at slot 0; leaving raw indices");
		false
	};

	Ok(Decoded {
		graph,
		table,
		bytes,
		start,
		end,
		resolved,
	})
}

/// Table entries no other entry references, skipping NULL.
pub(crate) fn roots(graph: &InstanceGraph, table: &[InstanceId]) -> Result<Vec<InstanceId>> {
	let mut referenced = HashSet::new();
	for &id in table {
		let instance = graph.get(id)?;
		for (field, slot) in instance.fields() {
			if field.is_reference() {
				referenced.extend(slot.values().filter_map(|value| value.as_instance()));
			}
		}
	}

	let mut out = Vec::new();
	for &id in table {
		if !referenced.contains(&id) && !graph.get(id)?.is_null() {
			out.push(id);
		}
	}
	Ok(out)
}

#[cfg(test)]
mod tests;
