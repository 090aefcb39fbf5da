//! Hands Off Core - hand-to-mouth detection and alerting.
//!
//! This crate contains the landmark domain types, the proximity detector,
//! the edge-triggered alert state machine, the ports to camera, inference,
//! and audio collaborators, and the session runtime that ties them together.

pub mod alert;
pub mod detector;
pub mod domain;
pub mod error;
pub mod ports;
pub mod session;

pub use alert::{advance, AlertMachine};
pub use detector::{detect, ProximityConfig, ProximityDetector, DEFAULT_THRESHOLD};
pub use domain::{
    AlertState, DecodedFrame, FaceObservation, Fingertip, FrameObservations, HandObservation,
    Landmark, PixelFormat, RawFrame, Rotation, SessionStats, StatusView,
};
pub use error::{ObservationError, PreprocessError, SessionError};
pub use ports::{
    AlertSink, DiscardEvents, FaceLandmarkProvider, FrameEvent, FrameEventSink,
    FramePreprocessor, FrameSource, HandLandmarkProvider, LandmarkBackend,
};
pub use session::{Session, SessionConfig, SessionParts, StatusUpdate, StatusWatcher};
