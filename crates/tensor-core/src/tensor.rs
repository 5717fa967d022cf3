// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type, allocation factory and release.

use crate::{Shape, TensorError};

/// An owned, n-dimensional `f32` tensor stored in contiguous memory.
///
/// `Tensor` is the only data carrier in the inference pipeline. It
/// exclusively owns its buffer; kernels borrow tensors immutably and
/// return new ones, so a buffer is never aliased.
///
/// # Memory Layout
/// Data is stored in row-major (C) order: the last dimension varies fastest.
/// The buffer length always equals `shape.num_elements()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    data: Vec<f32>,
}

impl Tensor {
    /// Creates a new tensor filled with zeros.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Tensor, Shape};
    /// let t = Tensor::zeros(Shape::matrix(2, 3).unwrap());
    /// assert_eq!(t.size_bytes(), 24); // 2 * 3 * 4 bytes
    /// assert!(t.as_slice().iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(shape: Shape) -> Self {
        let data = vec![0.0f32; shape.num_elements()];
        Self { shape, data }
    }

    /// Creates a tensor that takes ownership of an existing buffer.
    ///
    /// # Errors
    /// Returns [`TensorError::BufferSizeMismatch`] if `data.len()` differs
    /// from `shape.num_elements()`.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Tensor, Shape};
    /// let t = Tensor::from_vec(Shape::vector(3).unwrap(), vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_vec(shape: Shape, data: Vec<f32>) -> Result<Self, TensorError> {
        let expected = shape.num_elements();
        if data.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Returns the number of elements held by the buffer.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the memory footprint of this tensor's buffer in bytes.
    pub fn size_bytes(&self) -> usize {
        self.shape.size_bytes()
    }

    /// Returns the buffer as a read-only slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the buffer as a mutable slice for in-place population.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Writes `values` sequentially into the buffer, starting at index 0.
    ///
    /// Writing fewer than [`size`](Tensor::size) values leaves the remaining
    /// slots untouched (zero, for a freshly allocated tensor). Writing more
    /// is rejected before anything is written.
    ///
    /// Returns the number of values written.
    ///
    /// # Errors
    /// Returns [`TensorError::BufferOverflow`] if `values` is longer than the
    /// tensor.
    pub fn fill_from(&mut self, values: &[f32]) -> Result<usize, TensorError> {
        if values.len() > self.data.len() {
            return Err(TensorError::BufferOverflow {
                capacity: self.data.len(),
                requested: values.len(),
            });
        }
        self.data[..values.len()].copy_from_slice(values);
        Ok(values.len())
    }

    /// Fills the tensor with a constant value.
    pub fn fill(&mut self, value: f32) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Returns the number of rows when viewed as `[rows, last_dim]`.
    pub fn num_rows(&self) -> usize {
        self.shape.rows_and_cols().0
    }

    /// Borrows row `index` of the tensor viewed as `[rows, last_dim]`.
    ///
    /// # Errors
    /// Returns [`TensorError::IndexOutOfBounds`] if `index >= rows`.
    pub fn row_slice(&self, index: usize) -> Result<&[f32], TensorError> {
        let (rows, cols) = self.shape.rows_and_cols();
        if index >= rows {
            return Err(TensorError::IndexOutOfBounds { index, len: rows });
        }
        Ok(&self.data[index * cols..(index + 1) * cols])
    }

    /// Copies row `index` into a freshly allocated `[1, last_dim]` tensor.
    ///
    /// This is how a single sample is extracted from a batch; the result
    /// owns its own buffer.
    ///
    /// # Errors
    /// Returns [`TensorError::IndexOutOfBounds`] if `index >= rows`.
    pub fn row(&self, index: usize) -> Result<Tensor, TensorError> {
        let values = self.row_slice(index)?;
        let mut sample = Tensor::zeros(Shape::matrix(1, values.len())?);
        sample.fill_from(values)?;
        Ok(sample)
    }

    /// Consumes the tensor and returns its buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Releases the tensor's buffer and shape descriptor.
    ///
    /// Takes `self` by value: after this call the tensor cannot be named
    /// again, so reading it or releasing it a second time does not compile.
    pub fn release(self) {
        tracing::trace!(shape = %self.shape, bytes = self.size_bytes(), "tensor released");
        drop(self);
    }
}

/// Allocates a zero-filled tensor of the given shape.
///
/// # Errors
/// Returns [`TensorError::InvalidShape`] if `dims` is empty or any
/// dimension is zero.
///
/// # Examples
/// ```
/// use tensor_core::create_zero_tensor;
/// let t = create_zero_tensor(&[1, 784]).unwrap();
/// assert_eq!(t.size(), 784);
/// assert!(create_zero_tensor(&[]).is_err());
/// ```
pub fn create_zero_tensor(dims: &[usize]) -> Result<Tensor, TensorError> {
    Ok(Tensor::zeros(Shape::try_from(dims)?))
}

/// Releases a tensor. Equivalent to [`Tensor::release`].
pub fn free_tensor(tensor: Tensor) {
    tensor.release();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let t = Tensor::zeros(Shape::matrix(2, 3).unwrap());
        assert_eq!(t.size(), 6);
        assert_eq!(t.size_bytes(), 24);
        assert_eq!(t.shape(), &Shape::matrix(2, 3).unwrap());
        assert!(t.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_create_zero_tensor() {
        for dims in [vec![1usize], vec![784, 128], vec![128, 10], vec![2, 3, 4]] {
            let t = create_zero_tensor(&dims).unwrap();
            assert_eq!(t.size(), dims.iter().product::<usize>());
            assert_eq!(t.shape().dims(), &dims[..]);
            assert!(t.as_slice().iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn test_create_zero_tensor_invalid() {
        assert!(matches!(
            create_zero_tensor(&[]),
            Err(TensorError::InvalidShape { .. })
        ));
        assert!(matches!(
            create_zero_tensor(&[3, 0]),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_from_vec() {
        let data = vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let t = Tensor::from_vec(Shape::matrix(2, 3).unwrap(), data.clone()).unwrap();
        assert_eq!(t.as_slice(), &data[..]);
        assert_eq!(t.into_vec(), data);
    }

    #[test]
    fn test_from_vec_size_mismatch() {
        let result = Tensor::from_vec(Shape::matrix(2, 3).unwrap(), vec![0.0; 5]);
        assert_eq!(
            result.unwrap_err(),
            TensorError::BufferSizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn test_fill_from_full() {
        let mut t = create_zero_tensor(&[2, 2]).unwrap();
        assert_eq!(t.fill_from(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 4);
        assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_fill_from_short_leaves_tail() {
        let mut t = create_zero_tensor(&[5]).unwrap();
        assert_eq!(t.fill_from(&[7.0, 8.0]).unwrap(), 2);
        assert_eq!(t.as_slice(), &[7.0, 8.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_fill_from_overflow() {
        let mut t = create_zero_tensor(&[2]).unwrap();
        let err = t.fill_from(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            TensorError::BufferOverflow {
                capacity: 2,
                requested: 3
            }
        );
        // Nothing was written.
        assert_eq!(t.as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn test_fill() {
        let mut t = create_zero_tensor(&[5]).unwrap();
        t.fill(2.5);
        assert!(t.as_slice().iter().all(|&x| (x - 2.5).abs() < 1e-6));
    }

    #[test]
    fn test_as_mut_slice() {
        let mut t = create_zero_tensor(&[3]).unwrap();
        let slice = t.as_mut_slice();
        slice[0] = 10.0;
        slice[1] = 20.0;
        slice[2] = 30.0;
        assert_eq!(t.as_slice(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_row_copy_is_independent() {
        let batch = Tensor::from_vec(
            Shape::matrix(3, 2).unwrap(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap();
        let mut sample = batch.row(1).unwrap();
        assert_eq!(sample.shape(), &Shape::matrix(1, 2).unwrap());
        assert_eq!(sample.as_slice(), &[3.0, 4.0]);

        sample.fill(0.0);
        assert_eq!(batch.row_slice(1).unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn test_row_out_of_bounds() {
        let batch = create_zero_tensor(&[3, 2]).unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(
            batch.row(3).unwrap_err(),
            TensorError::IndexOutOfBounds { index: 3, len: 3 }
        );
    }

    #[test]
    fn test_release() {
        let t = create_zero_tensor(&[4, 4]).unwrap();
        let clone = t.clone();
        free_tensor(t);
        // The clone owns a separate buffer and is unaffected.
        assert_eq!(clone.size(), 16);
        clone.release();
    }
}
