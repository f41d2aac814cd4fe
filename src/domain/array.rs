//! Multi-dimensional numeric arrays
//!
//! Signal payloads are stored flat in row-major order together with their
//! shape, so a `[sig_len, n_sig]` matrix keeps sample `t` of signal `s` at
//! index `t * n_sig + s`.

use super::errors::EncodeError;

/// Element storage of an [`NdArray`]
#[derive(Debug, Clone, PartialEq)]
pub enum NdData {
    /// Integer elements (digital samples)
    Int(Vec<i64>),
    /// Floating elements (physical samples)
    Float(Vec<f64>),
}

impl NdData {
    /// Number of stored elements
    pub fn len(&self) -> usize {
        match self {
            NdData::Int(values) => values.len(),
            NdData::Float(values) => values.len(),
        }
    }

    /// Whether no elements are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type name, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            NdData::Int(_) => "int64",
            NdData::Float(_) => "float64",
        }
    }
}

/// Row-major numeric array with an explicit shape
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    data: NdData,
}

impl NdArray {
    /// Creates an array, checking that the data fills the shape exactly
    ///
    /// An empty shape denotes a zero-dimensional array holding one element.
    pub fn new(shape: Vec<usize>, data: NdData) -> Result<Self, EncodeError> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(EncodeError::ShapeMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// One-dimensional integer array
    pub fn from_ints(values: Vec<i64>) -> Self {
        Self {
            shape: vec![values.len()],
            data: NdData::Int(values),
        }
    }

    /// One-dimensional floating array
    pub fn from_floats(values: Vec<f64>) -> Self {
        Self {
            shape: vec![values.len()],
            data: NdData::Float(values),
        }
    }

    /// Array dimensions, outermost first
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Flat element storage
    pub fn data(&self) -> &NdData {
        &self.data
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }
}
