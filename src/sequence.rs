//! Sequence marker utilities
//!
//! Locating a marker token (usually EOS) in batches of generated token ids.

use burn::tensor::backend::Backend;
use burn::tensor::{Bool, Int, Tensor};

use crate::error::{Error, Result};

/// Find the first occurrence of `val` in every row of `inputs`
///
/// # Arguments
/// * `inputs` - Token ids of shape `[batch, max_len]`
/// * `val` - Marker to look for, e.g. the EOS id
///
/// # Returns
/// Tuple of (found `[batch]`, index `[batch]`). The index of a row where
/// `found` is false carries no meaning; check `found` first.
///
/// # Example
///
/// ```rust
/// use burn::backend::NdArray;
/// use burn::tensor::{Int, Tensor};
/// use syntax_vae::sequence::find_val;
///
/// let device = Default::default();
/// let tokens = Tensor::<NdArray<f32>, 2, Int>::from_ints([[5, 6, 7, 2, 2]], &device);
/// let (found, index) = find_val(tokens, 2).unwrap();
///
/// assert_eq!(found.into_data().to_vec::<bool>().unwrap(), vec![true]);
/// assert_eq!(index.into_data().to_vec::<i64>().unwrap(), vec![3]);
/// ```
pub fn find_val<B: Backend>(
    inputs: Tensor<B, 2, Int>,
    val: i64,
) -> Result<(Tensor<B, 1, Bool>, Tensor<B, 1, Int>)> {
    find_val_along(inputs, val, 1)
}

/// [`find_val`] along an explicit axis
///
/// With `axis = 0` every column is searched and the results have one entry
/// per column.
pub fn find_val_along<B: Backend>(
    inputs: Tensor<B, 2, Int>,
    val: i64,
    axis: usize,
) -> Result<(Tensor<B, 1, Bool>, Tensor<B, 1, Int>)> {
    let rows = match axis {
        1 => inputs,
        0 => inputs.transpose(),
        _ => return Err(Error::InvalidAxis { axis, rank: 2 }),
    };

    let [batch_size, len] = rows.dims();
    if len == 0 {
        return Err(Error::shape_mismatch("find_val search axis length", "> 0", 0));
    }
    let device = rows.device();

    let val_match = rows.equal_elem(val).float();

    // Running count of matches: [batch, len] x upper-triangular ones [len, len]
    let cumulative = val_match.clone().matmul(upper_triangular::<B>(len, &device));
    let first = cumulative.equal_elem(1.0).float() * val_match;

    let found = first.clone().max_dim(1).squeeze_dims::<1>(&[1]).greater_elem(0.0);

    let positions = Tensor::<B, 1, Int>::arange(0..len as i64, &device)
        .float()
        .reshape([1, len])
        .expand([batch_size, len]);
    let index = (first * positions).sum_dim(1).squeeze_dims::<1>(&[1]).int();

    tracing::trace!(batch_size, len, val, "find_val");
    Ok((found, index))
}

fn upper_triangular<B: Backend>(size: usize, device: &B::Device) -> Tensor<B, 2> {
    let data: Vec<f32> = (0..size * size)
        .map(|idx| if idx / size <= idx % size { 1.0 } else { 0.0 })
        .collect();
    Tensor::<B, 1>::from_floats(data.as_slice(), device).reshape([size, size])
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_upper_triangular() {
        let device = Default::default();
        let tri = upper_triangular::<TestBackend>(3, &device);

        assert_eq!(
            tri.into_data().to_vec::<f32>().unwrap(),
            vec![1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_find_val_first_occurrence() {
        let device = Default::default();
        let inputs = Tensor::<TestBackend, 2, Int>::from_ints(
            [[5, 6, 7, 2, 9, 2], [2, 2, 2, 0, 0, 0], [1, 1, 1, 1, 1, 2]],
            &device,
        );

        let (found, index) = find_val(inputs, 2).unwrap();

        assert_eq!(
            found.into_data().to_vec::<bool>().unwrap(),
            vec![true, true, true]
        );
        assert_eq!(index.into_data().to_vec::<i64>().unwrap(), vec![3, 0, 5]);
    }

    #[test]
    fn test_find_val_missing() {
        let device = Default::default();
        let inputs = Tensor::<TestBackend, 2, Int>::from_ints([[1, 3, 4], [3, 3, 2]], &device);

        let (found, index) = find_val(inputs, 2).unwrap();

        assert_eq!(found.into_data().to_vec::<bool>().unwrap(), vec![false, true]);
        assert_eq!(index.into_data().to_vec::<i64>().unwrap()[1], 2);
    }

    #[test]
    fn test_find_val_along_columns() {
        let device = Default::default();
        let inputs = Tensor::<TestBackend, 2, Int>::from_ints([[0, 9, 1], [9, 9, 1], [9, 0, 1]], &device);

        let (found, index) = find_val_along(inputs, 9, 0).unwrap();

        assert_eq!(
            found.into_data().to_vec::<bool>().unwrap(),
            vec![true, true, false]
        );
        let index = index.into_data().to_vec::<i64>().unwrap();
        assert_eq!(&index[..2], &[1, 0]);
    }

    #[test]
    fn test_find_val_invalid_axis() {
        let device = Default::default();
        let inputs = Tensor::<TestBackend, 2, Int>::zeros([2, 3], &device);

        let err = find_val_along(inputs, 0, 2).unwrap_err();
        assert_eq!(err, Error::InvalidAxis { axis: 2, rank: 2 });
    }

    #[test]
    fn test_find_val_empty_rows() {
        let device = Default::default();
        let inputs = Tensor::<TestBackend, 2, Int>::zeros([2, 0], &device);

        let err = find_val(inputs, 2).unwrap_err();
        assert_eq!(
            err,
            Error::shape_mismatch("find_val search axis length", "> 0", 0)
        );
    }

    #[test]
    fn test_find_val_along_empty_columns() {
        let device = Default::default();
        let inputs = Tensor::<TestBackend, 2, Int>::zeros([0, 3], &device);

        assert!(matches!(
            find_val_along(inputs, 2, 0).unwrap_err(),
            Error::ShapeMismatch { .. }
        ));
    }
}
