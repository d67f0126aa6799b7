use std::path::PathBuf;

use rsz::rsz::{RszClass, RszError, Schema};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	#[arg(long)]
	pub filter: Option<String>,
	#[arg(long)]
	pub json: bool,
}

#[derive(clap::Args)]
pub struct ClassArgs {
	pub schema: PathBuf,
	pub name: String,
	#[arg(long)]
	pub json: bool,
}

/// List schema classes, optionally filtered by name substring.
pub fn run(args: Args) -> rsz::rsz::Result<()> {
	let Args { schema: path, filter, json } = args;

	let schema = Schema::open(&path)?;
	let mut classes: Vec<_> = schema
		.classes()
		.iter()
		.filter(|class| filter.as_deref().is_none_or(|needle| class.name.contains(needle)))
		.collect();
	classes.sort_by(|a, b| a.name.cmp(&b.name));

	if json {
		let payload = ClassesJson {
			path: path.display().to_string(),
			count: classes.len(),
			classes: classes
				.iter()
				.map(|class| ClassRowJson {
					name: class.name.to_string(),
					type_id: format!("{:08x}", class.type_id),
					crc: format!("{:08x}", class.crc),
					fields: class.fields.len(),
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("classes: {}", classes.len());
	println!();
	println!("name\ttype_id\tcrc\tfields");
	for class in classes {
		println!("{}\t{:08x}\t{:08x}\t{}", class.name, class.type_id, class.crc, class.fields.len());
	}
	Ok(())
}

/// Print one class's field declarations.
pub fn run_class(args: ClassArgs) -> rsz::rsz::Result<()> {
	let ClassArgs { schema: path, name, json } = args;

	let schema = Schema::open(&path)?;
	let class = schema.get_by_name(&name).ok_or_else(|| RszError::SchemaNotFound { name: name.clone() })?;

	if json {
		return emit_json(&class_json(class));
	}

	println!("class: {}", class.name);
	println!("type_id: {:08x}", class.type_id);
	println!("crc: {:08x}", class.crc);
	println!("fields: {}", class.fields.len());
	println!();
	println!("name\ttype\tsize\talign\tarray\tnative\toriginal_type");
	for field in &class.fields {
		println!(
			"{}\t{}\t{}\t{}\t{}\t{}\t{}",
			field.name,
			field.kind(),
			field.size,
			field.align,
			field.array,
			field.native,
			if field.original_type.is_empty() { "-" } else { &field.original_type }
		);
	}
	Ok(())
}

fn class_json(class: &RszClass) -> ClassJson {
	ClassJson {
		name: class.name.to_string(),
		type_id: format!("{:08x}", class.type_id),
		crc: format!("{:08x}", class.crc),
		fields: class
			.fields
			.iter()
			.map(|field| FieldJson {
				name: field.name.to_string(),
				kind: field.kind().to_string(),
				size: field.size,
				align: field.align,
				array: field.array,
				native: field.native,
				original_type: field.original_type.to_string(),
			})
			.collect(),
	}
}

#[derive(serde::Serialize)]
struct ClassesJson {
	path: String,
	count: usize,
	classes: Vec<ClassRowJson>,
}

#[derive(serde::Serialize)]
struct ClassRowJson {
	name: String,
	type_id: String,
	crc: String,
	fields: usize,
}

#[derive(serde::Serialize)]
struct ClassJson {
	name: String,
	type_id: String,
	crc: String,
	fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	#[serde(rename = "type")]
	kind: String,
	size: usize,
	align: usize,
	array: bool,
	native: bool,
	original_type: String,
}
