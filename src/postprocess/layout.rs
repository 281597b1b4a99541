//! Memory layouts of YOLO-style detection heads.

use ndarray::ArrayView2;
use serde::Deserialize;

use crate::error::TensorError;

/// How candidate attributes are ordered in the flat output buffer.
///
/// `A` is the attribute count per candidate (box, optional objectness, class
/// scores) and `N` the candidate count. A leading batch dimension of 1 is
/// optional for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// `[1, 4+L, N]`, attribute-major (YOLOv8/v11 export default).
    ///
    /// Attribute `a` of candidate `i` lives at `a * N + i`.
    #[default]
    PlanarTransposed,
    /// `[1, 4+L, N]` read without an intermediate transpose.
    ///
    /// Accepted for configurations written against older exports. It uses the
    /// same `a * N + i` convention as [`Layout::PlanarTransposed`], so both
    /// decode a given buffer identically.
    PlanarDirect,
    /// `[1, N, 4+L]`, candidate-major.
    Interleaved,
    /// `[N, 5+L]`, candidate-major with an objectness score at index 4.
    ObjectnessPrefixed,
}

/// Candidate and attribute counts resolved from a tensor shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorDims {
    pub candidates: usize,
    pub attributes: usize,
}

impl Layout {
    /// Attributes preceding the class scores.
    #[inline]
    pub fn box_attributes(self) -> usize {
        match self {
            Layout::ObjectnessPrefixed => 5,
            _ => 4,
        }
    }

    #[inline]
    pub fn has_objectness(self) -> bool {
        self == Layout::ObjectnessPrefixed
    }

    #[inline]
    fn is_planar(self) -> bool {
        matches!(self, Layout::PlanarTransposed | Layout::PlanarDirect)
    }

    /// Resolve candidate and attribute counts from a declared shape.
    pub fn dims(self, shape: &[usize]) -> Result<TensorDims, TensorError> {
        let (outer, inner) = match *shape {
            [1, outer, inner] | [outer, inner] => (outer, inner),
            [batch, _, _] => return Err(TensorError::Batch(batch)),
            _ => return Err(TensorError::Rank(shape.len())),
        };

        let dims = if self.is_planar() {
            TensorDims {
                candidates: inner,
                attributes: outer,
            }
        } else {
            TensorDims {
                candidates: outer,
                attributes: inner,
            }
        };

        if dims.attributes <= self.box_attributes() {
            return Err(TensorError::Layout {
                layout: self,
                shape: shape.to_vec(),
            });
        }
        Ok(dims)
    }

    /// Number of class scores per candidate.
    #[inline]
    pub fn classes(self, dims: TensorDims) -> usize {
        dims.attributes - self.box_attributes()
    }

    /// Flat buffer offset of `attribute` for `candidate`.
    #[inline]
    pub fn flat_index(self, attribute: usize, candidate: usize, dims: TensorDims) -> usize {
        if self.is_planar() {
            attribute * dims.candidates + candidate
        } else {
            candidate * dims.attributes + attribute
        }
    }

    /// A `(candidates, attributes)` view over the buffer.
    pub(crate) fn view<'a>(
        self,
        data: &'a [f32],
        dims: TensorDims,
    ) -> Result<ArrayView2<'a, f32>, TensorError> {
        let TensorDims {
            candidates,
            attributes,
        } = dims;
        let shape = if self.is_planar() {
            (attributes, candidates)
        } else {
            (candidates, attributes)
        };
        let expected = candidates
            .checked_mul(attributes)
            .ok_or_else(|| TensorError::Overflow(vec![shape.0, shape.1]))?;
        let view = ArrayView2::from_shape(shape, data).map_err(|_| TensorError::Length {
            shape: vec![shape.0, shape.1],
            expected,
            got: data.len(),
        })?;

        // Planar buffers are attribute-major; swapping the axes gives a
        // strided per-candidate view without copying.
        Ok(if self.is_planar() {
            view.reversed_axes()
        } else {
            view
        })
    }
}
