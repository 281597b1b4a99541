//! Trait for inference engines feeding the pipeline.

use crate::postprocess::TensorBuf;

/// An inference backend producing one raw output tensor per frame.
///
/// Implement this trait to connect any detection model to the pipeline.
/// Preprocessing and execution are the implementor's concern; the pipeline
/// only sees the output buffer.
///
/// # Example
///
/// ```ignore
/// use detrack_rs::{TensorBuf, TensorSource};
///
/// struct MyEngine {
///     // Your interpreter here
/// }
///
/// impl TensorSource for MyEngine {
///     type Error = std::io::Error;
///
///     fn infer(
///         &mut self,
///         input: &[u8],
///         width: u32,
///         height: u32,
///     ) -> Result<TensorBuf, Self::Error> {
///         // Run inference and return the output head
///         todo!()
///     }
/// }
/// ```
pub trait TensorSource {
    /// Error type for inference failures.
    type Error;

    /// Run inference on raw image data.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn infer(&mut self, input: &[u8], width: u32, height: u32) -> Result<TensorBuf, Self::Error>;
}
