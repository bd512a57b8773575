//! Header Module
//!
//! Attribute model and wire format for the companion header file.
//!
//! ## File Format (V1)
//! ```text
//! ┌───────────┬────────────┬───────────────┬───────────┬───────────────────┐
//! │ Magic (4) │ Version(2) │ Payload Len(4)│ CRC32 (4) │ Payload (bincode) │
//! └───────────┴────────────┴───────────────┴───────────┴───────────────────┘
//! ```
//!
//! - Magic: `SFHD`
//! - Integers are little-endian
//! - CRC32 covers the payload only
//! - Payload is the bincode encoding of a `BTreeMap<String, AttributeValue>`,
//!   so key order (and therefore the bytes) is deterministic
//!
//! Every save writes one complete snapshot from offset 0. The file never
//! holds more than one version.

mod value;
mod codec;

pub use value::{AttributeValue, Attributes};
pub use codec::{decode_header, encode_header, HEADER_SIZE, MAGIC, MAX_HEADER_SIZE, VERSION};
