//! Staging area file format
//!
//! The staging area records the additions and removals that the next commit
//! will fold onto HEAD's tree. It lives in `.twig/index`.
//!
//! ## File Format
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "STAG" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Addition count (4 bytes)
//!   - Removal count (4 bytes)
//!
//! Entries (variable length), additions first, each in path order:
//!   - Object ID (20 bytes)
//!   - Path length (2 bytes)
//!   - Path (UTF-8)
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod stage_entry;
pub mod stage_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the staging area header in bytes
pub const HEADER_SIZE: usize = 16; // 4 bytes for marker, 4 for version, 4 + 4 for the counts

/// Magic signature identifying staging area files
pub const SIGNATURE: &str = "STAG";

/// Staging area file format version
pub const VERSION: u32 = 1;
