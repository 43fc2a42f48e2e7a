//! Datagram fragmentation protocol
//!
//! A rendered message is sliced into framed chunks so each datagram stays
//! within the packet bound. Every frame carries a fixed 12-byte header:
//!
//! ```text
//! magic(2) | unix seconds(4, BE) | correlation id(4, BE) | seq(1) | total(1)
//! ```
//!
//! All frames of one message share the timestamp and the random correlation
//! id; `seq` runs 0..total. A message needing more frames than the ceiling
//! is never partially sent.
//!
//! Single-packet messages are framed too, so the effective single-frame
//! payload capacity is the packet bound minus the 12 header bytes: a
//! rendered message in the 8181..=8192 byte window already needs two
//! frames (and is dropped under the default ceiling of 1).

use crate::core::LogError;
use chrono::Utc;

/// Packet size bound for one datagram.
pub const MAX_DATAGRAM: usize = 0x2000;

pub const MAGIC: [u8; 2] = [0x1e, 0x0f];

pub const HEADER_LEN: usize = 12;

/// Payload bytes carried per frame.
pub const CHUNK_CAPACITY: usize = MAX_DATAGRAM - HEADER_LEN;

/// Split `payload` into framed datagrams, at most `ceiling` of them.
///
/// Returns the frames in sequence order, or an oversize error (to be
/// degraded into a root-logger diagnostic) when the message would need
/// more frames than allowed.
pub fn split(payload: &[u8], ceiling: usize) -> Result<Vec<Vec<u8>>, LogError> {
    // seq and total are one byte each, so 255 frames is the hard limit
    // whatever the configured ceiling says.
    let ceiling = ceiling.clamp(1, u8::MAX as usize);
    let total = payload.len().div_ceil(CHUNK_CAPACITY).max(1);
    if total > ceiling {
        return Err(LogError::Oversize {
            len: payload.len(),
            needed: total,
            ceiling,
        });
    }

    let timestamp = Utc::now().timestamp() as u32;
    let correlation: u32 = rand::random();

    let mut frames = Vec::with_capacity(total);
    for seq in 0..total {
        let chunk = &payload[seq * CHUNK_CAPACITY..payload.len().min((seq + 1) * CHUNK_CAPACITY)];
        let mut frame = Vec::with_capacity(HEADER_LEN + chunk.len());
        frame.extend_from_slice(&MAGIC);
        frame.extend_from_slice(&timestamp.to_be_bytes());
        frame.extend_from_slice(&correlation.to_be_bytes());
        frame.push(seq as u8);
        frame.push(total as u8);
        frame.extend_from_slice(chunk);
        frames.push(frame);
    }

    Ok(frames)
}

/// Header fields of one frame, used by tests and receivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub timestamp: u32,
    pub correlation: u32,
    pub seq: u8,
    pub total: u8,
}

impl FrameHeader {
    pub fn parse(frame: &[u8]) -> Option<FrameHeader> {
        if frame.len() < HEADER_LEN || frame[..2] != MAGIC {
            return None;
        }
        Some(FrameHeader {
            timestamp: u32::from_be_bytes(frame[2..6].try_into().ok()?),
            correlation: u32::from_be_bytes(frame[6..10].try_into().ok()?),
            seq: frame[10],
            total: frame[11],
        })
    }
}
