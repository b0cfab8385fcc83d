#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use burn::tensor::{Int, Tensor, TensorData};
    use rand::prelude::*;
    use syntax_vae::prelude::*;

    type Backend = NdArray<f32>;

    const EOS_ID: i64 = 2;

    fn tokens_from_rows(rows: &[Vec<i64>]) -> Tensor<Backend, 2, Int> {
        let device = Default::default();
        let width = rows[0].len();
        let flat: Vec<i64> = rows.iter().flatten().copied().collect();
        Tensor::from_data(TensorData::new(flat, [rows.len(), width]), &device)
    }

    #[test]
    fn test_eos_at_position_three() {
        let device = Default::default();
        let tokens =
            Tensor::<Backend, 2, Int>::from_ints([[7, 8, 9, 2, 5, 6], [7, 8, 9, 4, 5, 6]], &device);

        let (found, index) = find_val(tokens, EOS_ID).unwrap();
        let found = found.into_data().to_vec::<bool>().unwrap();
        let index = index.into_data().to_vec::<i64>().unwrap();

        assert!(found[0]);
        assert_eq!(index[0], 3);
        assert!(!found[1]);
    }

    #[test]
    fn test_matches_naive_search_on_random_rows() {
        let mut rng = StdRng::seed_from_u64(22222);
        let (batch, max_len) = (32, 12);

        let rows: Vec<Vec<i64>> = (0..batch)
            .map(|_| {
                (0..max_len)
                    .map(|_| {
                        if rng.gen_bool(0.1) {
                            EOS_ID
                        } else {
                            rng.gen_range(3..40)
                        }
                    })
                    .collect()
            })
            .collect();

        let (found, index) = find_val(tokens_from_rows(&rows), EOS_ID).unwrap();
        let found = found.into_data().to_vec::<bool>().unwrap();
        let index = index.into_data().to_vec::<i64>().unwrap();

        for (row, tokens) in rows.iter().enumerate() {
            match tokens.iter().position(|&t| t == EOS_ID) {
                Some(position) => {
                    assert!(found[row], "Row {} should contain EOS", row);
                    assert_eq!(index[row], position as i64, "Row {}", row);
                }
                None => assert!(!found[row], "Row {} has no EOS", row),
            }
        }
    }

    #[test]
    fn test_sequence_lengths_use_first_eos() {
        let tokens = tokens_from_rows(&[
            vec![5, 2, 2, 2],
            vec![5, 5, 5, 5],
            vec![2, 5, 5, 2],
        ]);

        let lengths = sequence_lengths(tokens, EOS_ID).unwrap();
        assert_eq!(lengths.into_data().to_vec::<i64>().unwrap(), vec![2, 4, 1]);
    }

    #[test]
    fn test_invalid_axis() {
        let tokens = tokens_from_rows(&[vec![1, 2, 3]]);
        assert_eq!(
            find_val_along(tokens, EOS_ID, 3).unwrap_err(),
            Error::InvalidAxis { axis: 3, rank: 2 }
        );
    }

    #[test]
    fn test_empty_search_axis() {
        let device = Default::default();

        let no_columns = Tensor::<Backend, 2, Int>::zeros([2, 0], &device);
        assert!(matches!(
            find_val(no_columns, EOS_ID).unwrap_err(),
            Error::ShapeMismatch { .. }
        ));

        let no_rows = Tensor::<Backend, 2, Int>::zeros([0, 3], &device);
        assert!(matches!(
            find_val_along(no_rows, EOS_ID, 0).unwrap_err(),
            Error::ShapeMismatch { .. }
        ));
    }
}
