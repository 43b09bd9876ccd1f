//! Widget modules for UI rendering.
//!
//! Each widget is a pure function that reads the current [`super::Screen`]
//! or [`super::Prompt`] and renders into a region of the frame.

pub mod footer;
pub mod header;
pub mod popup;
pub mod story;
