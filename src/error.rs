use std::fmt;

use crate::mixer::SLOT_COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MixerError {
    InvalidImage(String),
    InvalidSlot(usize),
    NoImagesLoaded,
}

impl fmt::Display for MixerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidImage(msg) => write!(f, "invalid image: {msg}"),
            Self::InvalidSlot(slot) => {
                write!(f, "invalid slot {slot} (expected 0..{SLOT_COUNT})")
            }
            Self::NoImagesLoaded => write!(f, "no images loaded"),
        }
    }
}

impl std::error::Error for MixerError {}
