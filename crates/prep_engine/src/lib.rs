//! Interview prep engine: research service client, response decoding and the fetch worker.
mod client;
mod decode;
mod engine;
mod types;

pub use client::{ClientSettings, ReqwestResearchClient, ResearchSource, DEFAULT_BASE_URL};
pub use decode::{decode_health, decode_record, DecodeError};
pub use engine::{EngineHandle, EngineSettings};
pub use types::{EngineEvent, FailureKind, FetchError};
