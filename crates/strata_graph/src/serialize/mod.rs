//! Compact binary form of a [`BitSetGraph`].
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! [version: i32][node_count: i32]
//! node_count x ( [0u8]                                   empty row
//!              | [1u8][len: i32][len bytes of Bits::to_bytes] )
//! ```
//!
//! Only outbound rows are stored; inbound rows are rebuilt on read. There
//! is no compatibility logic: any other version is rejected.

use std::io::{Read, Write};

use strata_bits::Bits;

use crate::{BitSetGraph, GraphError};

/// Version tag written at the head of every serialized graph.
pub const GRAPH_FORMAT_VERSION: i32 = 1;

const ROW_EMPTY: u8 = 0;
const ROW_PRESENT: u8 = 1;

/// Rows reserved up front while decoding, regardless of the claimed count.
const MAX_PREALLOCATED_ROWS: usize = 4096;

fn encode_len(len: usize) -> Result<[u8; 4], GraphError> {
    i32::try_from(len)
        .map(i32::to_be_bytes)
        .map_err(|_| GraphError::CorruptPayload(format!("length {len} exceeds i32::MAX")))
}

fn read_i32(input: &mut impl Read) -> Result<i32, GraphError> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

fn read_len(input: &mut impl Read, what: &str) -> Result<usize, GraphError> {
    let value = read_i32(input)?;
    usize::try_from(value)
        .map_err(|_| GraphError::CorruptPayload(format!("negative {what} {value}")))
}

impl BitSetGraph {
    /// Encode the graph into a fresh byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GraphError> {
        let mut out = Vec::new();
        out.extend_from_slice(&GRAPH_FORMAT_VERSION.to_be_bytes());
        out.extend_from_slice(&encode_len(self.len())?);
        for row in &*self.outbound {
            if row.is_empty() {
                out.push(ROW_EMPTY);
            } else {
                let payload = row.to_bytes();
                out.push(ROW_PRESENT);
                out.extend_from_slice(&encode_len(payload.len())?);
                out.extend_from_slice(&payload);
            }
        }
        Ok(out)
    }

    /// Write the encoded graph to `out`.
    pub fn write_to(&self, out: &mut impl Write) -> Result<(), GraphError> {
        out.write_all(&self.to_bytes()?)?;
        Ok(())
    }

    /// Decode a graph from `input`.
    pub fn read_from(input: &mut impl Read) -> Result<Self, GraphError> {
        let version = read_i32(input)?;
        if version != GRAPH_FORMAT_VERSION {
            return Err(GraphError::UnsupportedVersion {
                found: version,
                expected: GRAPH_FORMAT_VERSION,
            });
        }
        let node_count = read_len(input, "node count")?;

        let mut outbound = Vec::with_capacity(node_count.min(MAX_PREALLOCATED_ROWS));
        for node in 0..node_count {
            let mut tag = [0u8; 1];
            input.read_exact(&mut tag)?;
            let row = match tag[0] {
                ROW_EMPTY => Bits::new(),
                ROW_PRESENT => {
                    let len = read_len(input, "row length")?;
                    let mut payload = Vec::new();
                    input
                        .by_ref()
                        .take(u64::try_from(len).unwrap_or(u64::MAX))
                        .read_to_end(&mut payload)?;
                    if payload.len() != len {
                        return Err(GraphError::CorruptPayload(format!(
                            "row {node} truncated: expected {len} bytes, got {}",
                            payload.len()
                        )));
                    }
                    Bits::from_bytes(&payload)
                }
                other => {
                    return Err(GraphError::CorruptPayload(format!(
                        "row {node} has unknown presence tag {other}"
                    )))
                }
            };
            outbound.push(row);
        }

        BitSetGraph::from_adjacency(outbound).map_err(|err| match err {
            GraphError::NodeOutOfRange { node, size } => GraphError::CorruptPayload(format!(
                "edge target {node} is out of range for {size} nodes"
            )),
            other => other,
        })
    }

    /// Decode a graph from a byte slice produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GraphError> {
        let mut input = bytes;
        Self::read_from(&mut input)
    }
}

/// Serde goes through the outbound rows so that a deserialized graph is
/// always rebuilt by the checked constructor.
#[cfg(feature = "cache")]
mod cache {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use strata_bits::Bits;

    use crate::{BitSetGraph, GraphError};

    #[derive(Serialize, Deserialize)]
    struct GraphRows {
        outbound: Vec<Bits>,
    }

    impl Serialize for BitSetGraph {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            GraphRows {
                outbound: self.outbound.to_vec(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for BitSetGraph {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let rows = GraphRows::deserialize(deserializer)?;
            BitSetGraph::from_adjacency(rows.outbound)
                .map_err(|err: GraphError| serde::de::Error::custom(err))
        }
    }
}
