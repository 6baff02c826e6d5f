pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod io;
pub mod mixer;
pub mod recipe;
pub mod render;
pub mod resample;
pub mod source;
pub mod spectrum;

pub use display::ComponentKind;
pub use error::MixerError;
pub use mixer::{MixRequest, Mixer, Mode, Region, RegionMasks, RegionSelector, SLOT_COUNT};
pub use source::ImageSource;
