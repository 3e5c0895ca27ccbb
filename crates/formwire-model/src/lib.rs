pub mod attrs;
pub mod control;
pub mod document;
pub mod error;
pub mod events;
pub mod ids;
pub mod options;
pub mod tree;

pub use control::{ControlGroup, ControlRef, is_form_control, resolve_control};
pub use document::{Ancestors, Document, Element, Node, NodeKind};
pub use error::{ModelError, Result};
pub use events::{Event, EventType, Listener, ListenerRegistry};
pub use ids::NodeId;
pub use options::EnhanceOptions;
pub use tree::Ancestry;
