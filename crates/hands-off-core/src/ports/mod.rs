//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the detection core and the
//! camera, inference, audio, and presentation collaborators.

mod alert_sink;
mod events;
mod frame_source;
mod landmarks;
mod preprocess;

pub use alert_sink::AlertSink;
pub use events::{DiscardEvents, FrameEvent, FrameEventSink};
pub use frame_source::FrameSource;
pub use landmarks::{FaceLandmarkProvider, HandLandmarkProvider, LandmarkBackend};
pub use preprocess::FramePreprocessor;
