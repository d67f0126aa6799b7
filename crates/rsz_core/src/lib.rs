//! Public library API for decoding, editing, and re-encoding RSZ instance data.

/// RSZ value codec, type inference, instance graphs, and graph operations.
pub mod rsz;
