// Conversion engine - independent of UI

pub mod batch;
pub mod core;
pub mod error;
pub mod probe;
pub mod registry;
pub mod session;
pub mod worker;

pub use batch::{BatchSummary, convert_all};
pub use self::core::*;
pub use error::{ConversionFailure, ProbeError, ProbeFailure, SessionError};
pub use probe::{EncoderAvailability, VendorEncoders, ensure_usable, probe};
pub use registry::EncoderCandidate;
pub use session::{BatchPlan, OUTPUT_SUBDIR, Session};
pub use worker::{BatchHandle, WorkerMessage, start_batch};
