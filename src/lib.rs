//!
//! A streaming decoder for IPFIX (RFC 7011) messages.
//!
//! IPFIX data records can only be split into fields with the help of templates sent earlier in
//! the same stream. The [`Walker`] keeps the templates of every observation domain it has seen,
//! walks the sets of each message handed to it and reports every decoded field to a handler as
//! a slice of the input buffer.
//!
//! ```
//! use ipfix_walk::{MessageHeader, Walker};
//! use bytes::{BufMut, BytesMut};
//!
//! let mut message = BytesMut::new();
//! message.put_u16(10); // Version.
//! message.put_u16(47); // Message length.
//! message.put_u32(1576012482); // Export time.
//! message.put_u32(1); // Sequence number.
//! message.put_u32(7); // Observation domain.
//!
//! message.put_u16(2); // Template set.
//! message.put_u16(16);
//! message.put_u16(256); // Template ID.
//! message.put_u16(2); // Field count.
//! message.put_u16(8); // sourceIPv4Address
//! message.put_u16(4);
//! message.put_u16(82); // interfaceName, variable length.
//! message.put_u16(65535);
//!
//! message.put_u16(256); // Data set for template 256.
//! message.put_u16(15);
//! message.put_slice(b"\xc0\xa8\x7a\x01");
//! message.put_u8(5);
//! message.put_slice(b"wlan0");
//! message.put_u8(0); // Padding.
//!
//! let mut fields = vec![];
//! let handler = |header: &MessageHeader, eid: u32, fid: u16, value: &[u8]| {
//!     assert_eq!(header.domain_id, 7);
//!     fields.push((eid, fid, value.to_vec()));
//!     Ok::<_, Box<dyn std::error::Error + Send + Sync>>(())
//! };
//!
//! let mut walker = Walker::new(None, handler, 64, 1500).unwrap();
//! walker.walk_buffer(&message).unwrap();
//! assert!(walker.templates().contains(7, 256));
//! drop(walker);
//!
//! assert_eq!(
//!     fields,
//!     vec![(0, 8, b"\xc0\xa8\x7a\x01".to_vec()), (0, 82, b"wlan0".to_vec())]
//! );
//! ```
//!
//! The [`registry`] module describes the IANA information elements for handlers that want to
//! name or validate the values they receive.
#![warn(missing_docs)]
#![allow(clippy::match_bool)]

pub mod decode;
pub mod error;
pub mod filter;
pub mod header;
pub mod registry;
pub mod set;
pub mod template;
pub mod walker;

pub use error::WalkError;
pub use filter::Filter;
pub use header::MessageHeader;
pub use template::{FieldSpecifier, Template, TemplateStore};
pub use walker::{FieldHandler, Walker, WalkerConfig};
