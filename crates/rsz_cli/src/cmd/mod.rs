/// Schema class listing and single-class field dump.
pub mod classes;
/// Default instance graph construction.
pub mod create;
/// Instance data decode command.
pub mod decode;
/// JSON projection of instance graphs.
pub mod json;
/// Decode then re-encode byte comparison.
pub mod roundtrip;
/// Shared argument parsing and loading helpers.
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;
