//! Post-processing of raw detection head outputs.
//!
//! Decoding turns a flat output tensor into thresholded candidates according
//! to an explicit [`Layout`]; non-max suppression then removes overlapping
//! duplicates.

mod decoder;
mod labels;
mod layout;
mod nms;
mod postprocessor;
mod tensor;

pub use decoder::{Decoder, FrameSize};
pub use labels::Labels;
pub use layout::{Layout, TensorDims};
pub use nms::non_max_suppression;
pub use postprocessor::Postprocessor;
pub use tensor::{RawTensor, TensorBuf};
