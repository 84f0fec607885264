//! Errors raised while building, checking or decoding graphs.

/// Error from graph construction, name resolution or deserialization.
///
/// Every variant is surfaced synchronously to the immediate caller; none is
/// retried. A decoding error means the caller should rebuild the graph from
/// source rather than trust any part of the payload.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// An edge endpoint or queried node id is not below the node count.
    #[error("node {node} is out of range for a graph of {size} nodes")]
    NodeOutOfRange { node: usize, size: usize },

    /// Outbound and inbound adjacency arrays have different lengths.
    #[error("outbound adjacency has {outbound} rows but inbound has {inbound}")]
    SizeMismatch { outbound: usize, inbound: usize },

    /// An edge is present in one adjacency direction but not the other.
    #[error("edge {from} -> {to} is not recorded in both directions")]
    AsymmetricEdge { from: usize, to: usize },

    /// The name table of a string graph is not strictly ascending.
    #[error("name table is not sorted and unique at index {index}: {previous:?} then {name:?}")]
    UnsortedNames {
        index: usize,
        previous: String,
        name: String,
    },

    /// The name table length differs from the node count.
    #[error("{names} names supplied for a graph of {nodes} nodes")]
    NameCountMismatch { names: usize, nodes: usize },

    /// An edge refers to a name absent from the name table.
    #[error("unknown node name {0:?}")]
    UnknownName(String),

    /// The serialized form carries a version this build cannot read.
    #[error("unsupported graph format version {found} (expected {expected})")]
    UnsupportedVersion { found: i32, expected: i32 },

    /// The serialized form is structurally invalid.
    #[error("corrupt graph payload: {0}")]
    CorruptPayload(String),

    /// Reading or writing the serialized form failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
