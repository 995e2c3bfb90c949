pub mod client;
pub mod types;

pub use client::{GraphClient, GraphError, DEFAULT_BASE_URL};
pub use types::{Collection, Drive, DriveItem};
