//! Codec for the DNS wire-message format: a bounded 512 byte packet buffer,
//! the 12 byte header bit layout, label/compression-pointer name handling,
//! and the question/record codecs that compose into a full message.
//!
//! Decode flows bytes -> buffer -> fields -> message, encode the reverse.
//! All failures propagate as an ordered [`ErrorChain`] rather than panics;
//! malformed input is always a recoverable error for the caller.

#![allow(clippy::upper_case_acronyms)]

pub mod error;
pub mod header;
pub mod packet;
pub mod packet_buffer;
pub mod query_type;
pub mod question;
pub mod record;

pub use error::{Annotate, ErrorChain, ErrorCode, ErrorUnit, Result};
pub use header::{DnsHeader, ResponseCode};
pub use packet::DnsPacket;
pub use packet_buffer::PacketBuffer;
pub use query_type::QueryType;
pub use question::DnsQuestion;
pub use record::DnsRecord;
