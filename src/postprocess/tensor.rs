//! Raw inference output handed over by the inference engine.

use crate::error::TensorError;

/// Borrowed view over a flat `f32` output buffer and its declared shape.
///
/// The value count always equals the product of the shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawTensor<'a> {
    data: &'a [f32],
    shape: &'a [usize],
}

impl<'a> RawTensor<'a> {
    pub fn new(data: &'a [f32], shape: &'a [usize]) -> Result<Self, TensorError> {
        check_len(data.len(), shape)?;
        Ok(Self { data, shape })
    }

    #[inline]
    pub fn data(&self) -> &'a [f32] {
        self.data
    }

    #[inline]
    pub fn shape(&self) -> &'a [usize] {
        self.shape
    }
}

/// Owned output buffer, for sources that allocate per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorBuf {
    data: Vec<f32>,
    shape: Vec<usize>,
}

impl TensorBuf {
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, TensorError> {
        check_len(data.len(), &shape)?;
        Ok(Self { data, shape })
    }

    pub fn view(&self) -> RawTensor<'_> {
        RawTensor {
            data: &self.data,
            shape: &self.shape,
        }
    }
}

/// Product of the dimensions, or `None` if it does not fit in `usize`.
fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

fn check_len(got: usize, shape: &[usize]) -> Result<(), TensorError> {
    let expected = element_count(shape).ok_or_else(|| TensorError::Overflow(shape.to_vec()))?;
    if expected != got {
        return Err(TensorError::Length {
            shape: shape.to_vec(),
            expected,
            got,
        });
    }
    Ok(())
}
