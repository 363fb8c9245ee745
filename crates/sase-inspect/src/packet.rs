//! Packet view handed to inspectors
//!
//! Only the pieces an inspector needs on the fast path: the payload and
//! the host's per-packet flag word.

use bytes::Bytes;

/// Packet is reassembled stream data (duplicate view of seen bytes)
pub const PKT_REBUILT_STREAM: u32 = 0x0000_0002;

/// Per-packet flag word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PacketFlags(u32);

impl PacketFlags {
    /// No flags set
    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline(always)]
    pub const fn contains(&self, bit: u32) -> bool {
        self.0 & bit == bit
    }

    pub fn insert(&mut self, bit: u32) {
        self.0 |= bit;
    }
}

/// Packet as seen by an inspector
#[derive(Debug, Clone, Default)]
pub struct Packet {
    /// Host flags
    pub flags: PacketFlags,
    /// Payload bytes (zero-copy)
    pub data: Bytes,
}

impl Packet {
    /// Create packet over a payload
    pub fn new(data: Bytes) -> Self {
        Self {
            flags: PacketFlags::empty(),
            data,
        }
    }

    /// Builder: set flag bits
    pub fn with_flags(mut self, bits: u32) -> Self {
        self.flags.insert(bits);
        self
    }

    /// Reassembled-stream packet (bytes were already seen once)
    #[inline(always)]
    pub fn is_rebuilt_stream(&self) -> bool {
        self.flags.contains(PKT_REBUILT_STREAM)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
