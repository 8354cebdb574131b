//! Stored object types and operations
//!
//! Every object is immutable and identified by the SHA-1 of its framed form.
//! There are two kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Message, timestamp, up to two parents and the path → blob map
//!
//! All objects share the framing `<kind> <size>\0<body>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
