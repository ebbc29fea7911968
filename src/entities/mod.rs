//! Entity type definitions

pub mod field;
pub mod record;
pub mod segment;

pub use field::{Field, FieldParseError, FieldValue};
pub use record::{ChannelType, MarketRecord};
pub use segment::{Segment, SegmentDetail};
