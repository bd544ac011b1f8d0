//! Built-in wire types the dictionary refers to but does not define.

mod attribute_id;
mod byte_string;
mod datetime;
mod diagnostic_info;
mod guid;
mod node_id;
mod status;
mod text;

pub use attribute_id::AttributeId;
pub use byte_string::ByteString;
pub use datetime::{DateTime, UNIX_EPOCH_TICKS};
pub use diagnostic_info::{DiagnosticInfo, MAX_DIAGNOSTIC_DEPTH};
pub use guid::Guid;
pub use node_id::{ExpandedNodeId, Identifier, NodeId};
pub use status::StatusCode;
pub use text::{LocalizedText, QualifiedName, XmlElement};
