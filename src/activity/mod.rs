//! Local activity log.
//!
//! One JSON line per dispatched action in `~/.inferencia/activity-log.jsonl`,
//! plus the aggregation behind `inferencia historico`.

pub mod logger;
pub mod reporter;

pub use logger::{ActivityEntry, ActivityLog};
