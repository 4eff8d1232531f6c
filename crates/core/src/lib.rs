//! Core library for the Sky Panel application.
//!
//! The crate drives a 2-D grid of addressable lights: per-mode frame
//! generators, the controller that owns timing and mode state, and the
//! panel mapper that turns a logical frame into the physically ordered,
//! intensity-corrected pixel sequence for the strip. Transport concerns
//! (HTTP, hardware drivers) stay outside; they talk to [`Controller`]
//! and implement [`PixelSink`].

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod frame;
pub mod generator;
pub mod math;
pub mod panel;
pub mod registry;

pub use clock::{ShutdownSignal, TickClock};
pub use config::PanelConfig;
pub use controller::{Controller, ControllerState};
pub use error::{Result, SkyPanelError};
pub use frame::{FrameBuffer, GridSpec, LightValue, Rgb};
pub use generator::{Generator, ModeParams};
pub use panel::{NullSink, PanelMapper, Pixel, PixelSink};
pub use registry::{ModeDescriptor, ModeRegistry};
