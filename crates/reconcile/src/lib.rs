pub mod annotate;
pub mod filename;
pub mod match_engine;

pub use annotate::{annotate, AnnotatedReceipt};
pub use filename::amount_from_name;
pub use match_engine::{MatchResult, MatchStatus, PurchaseIndex};
