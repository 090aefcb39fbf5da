//! Core domain types: landmarks, observations, frames, and alert state.

mod alert;
mod frame;
mod landmark;
mod observation;
mod stats;

pub use alert::{AlertState, Emphasis, StatusColor, StatusView};
pub use frame::{DecodedFrame, PixelFormat, RawFrame, Rotation};
pub use landmark::Landmark;
pub use observation::{
    FaceObservation, Fingertip, FrameObservations, HandObservation, HAND_LANDMARK_COUNT,
    LOWER_LIP_CENTER, UPPER_LIP_CENTER,
};
pub use stats::SessionStats;
