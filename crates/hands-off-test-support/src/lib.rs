//! Test support utilities for hands-off.
//!
//! Provides mocks of every core port plus builders for hand and face
//! observations and raw camera frames.
//!
//! # Example
//!
//! ```
//! use hands_off_core::{detect, Fingertip};
//! use hands_off_test_support::{FaceBuilder, HandBuilder};
//!
//! let face = FaceBuilder::with_mouth_at(0.5, 0.5).build();
//! let hand = HandBuilder::away()
//!     .fingertip(Fingertip::Index, 0.55, 0.5)
//!     .build();
//!
//! assert!(detect(&[hand], &[face]));
//! ```

mod builders;
mod mocks;

pub use builders::{FaceBuilder, FrameBuilder, HandBuilder};
pub use mocks::{
    MockAlertSink, MockBackend, MockEventSink, MockFrameSource, MockPreprocessor, ReleaseGuard,
    ReleaseTracker, ScriptedFaces, ScriptedHands, ScriptedProvider,
};
