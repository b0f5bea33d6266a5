//! Synthetic sample sources

mod bimodal;

pub use bimodal::{BiModalNormal, BimodalConfig, SamplePair};
