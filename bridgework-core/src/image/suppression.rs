//! 3x3 non-maximum suppression

use ndarray::s;

use super::grid::Grid;

/// Keep each cell that equals the maximum of its clamped 3x3 neighborhood,
/// zero the rest.
///
/// Edge and corner cells compare against fewer than nine samples; the
/// window is clamped, never padded or wrapped. Ties are kept, so a plateau
/// of equal values survives intact. A NaN cell is always zeroed and NaN
/// neighbors are skipped.
pub fn non_max_suppression(input: &Grid) -> Grid {
    let (rows, cols) = input.shape();
    let src = input.view();
    let mut suppressed = input.map(|_| 0.0);

    for i in 0..rows {
        let (r0, r1) = (i.saturating_sub(1), (i + 1).min(rows - 1));
        for j in 0..cols {
            let (c0, c1) = (j.saturating_sub(1), (j + 1).min(cols - 1));
            let current = src[[i, j]];

            let local_max = src
                .slice(s![r0..=r1, c0..=c1])
                .fold(f64::NEG_INFINITY, |max, &v| max.max(v));

            if current == local_max {
                suppressed.set(i, j, current);
            }
        }
    }

    tracing::debug!(
        rows,
        cols,
        kept = suppressed.count_nonzero(),
        "non_max_suppression"
    );
    suppressed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<f64>>) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_constant_grid_is_unchanged() {
        let input = grid(vec![vec![7.0; 4]; 3]);
        assert_eq!(non_max_suppression(&input), input);
    }

    #[test]
    fn test_single_peak() {
        let input = grid(vec![
            vec![1.0, 2.0, 1.0, 0.5],
            vec![2.0, 9.0, 3.0, 0.5],
            vec![1.0, 2.0, 1.0, 0.5],
        ]);
        let out = non_max_suppression(&input);
        // The 0.5 column never sees the peak but always has a larger neighbor.
        let expected = grid(vec![
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 9.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_edges_use_clamped_window() {
        // (0, 3) only sees columns 2..=3, so it is a local max even though
        // the global max sits at (0, 0).
        let input = grid(vec![vec![9.0, 1.0, 2.0, 5.0], vec![0.0, 0.0, 0.0, 0.0]]);
        let out = non_max_suppression(&input);
        assert_eq!(out.to_rows(), vec![vec![9.0, 0.0, 0.0, 5.0], vec![0.0; 4]]);
    }

    #[test]
    fn test_ties_are_kept() {
        let input = grid(vec![vec![1.0, 4.0, 4.0, 1.0]]);
        let out = non_max_suppression(&input);
        assert_eq!(out.to_rows(), vec![vec![0.0, 4.0, 4.0, 0.0]]);
    }

    #[test]
    fn test_single_cell() {
        let input = grid(vec![vec![-3.0]]);
        assert_eq!(non_max_suppression(&input).get(0, 0), -3.0);
    }

    #[test]
    fn test_nan_cells_are_zeroed() {
        let input = grid(vec![vec![f64::NAN, 1.0], vec![0.5, 0.25]]);
        let out = non_max_suppression(&input);
        assert_eq!(out.to_rows(), vec![vec![0.0, 1.0], vec![0.0, 0.0]]);
    }
}
