//! Separable filter kernels and convolution with a replicated border

use ndarray::Array2;

use super::grid::Grid;
use crate::error::{BridgeError, Result};

/// Largest supported kernel size
pub const MAX_KSIZE: usize = 31;

fn check_ksize(ksize: usize) -> Result<()> {
    if ksize == 0 || ksize % 2 == 0 || ksize > MAX_KSIZE {
        return Err(BridgeError::invalid(format!(
            "kernel size must be odd and between 1 and {}, got {}",
            MAX_KSIZE, ksize
        )));
    }
    Ok(())
}

/// 1D Gaussian kernel normalized to sum 1.
///
/// A non-positive `sigma` is derived from the kernel size as
/// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_kernel(ksize: usize, sigma: f64) -> Result<Vec<f64>> {
    check_ksize(ksize)?;
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
    };

    let center = (ksize as f64 - 1.0) / 2.0;
    let scale = -0.5 / (sigma * sigma);
    let mut kernel: Vec<f64> = (0..ksize)
        .map(|i| {
            let d = i as f64 - center;
            (scale * d * d).exp()
        })
        .collect();

    let sum: f64 = kernel.iter().sum();
    kernel.iter_mut().for_each(|v| *v /= sum);
    Ok(kernel)
}

/// 1D Sobel-family kernel of the given derivative order.
///
/// Built from the binomial smoothing row, differenced `order` times, and
/// scaled by `1 / 2^(ksize - order - 1)`.
pub fn sobel_kernel(order: usize, ksize: usize) -> Result<Vec<f64>> {
    check_ksize(ksize)?;
    if ksize < 3 {
        return Err(BridgeError::invalid("derivative kernels need ksize >= 3"));
    }
    if order >= ksize {
        return Err(BridgeError::invalid(format!(
            "derivative order {} must be smaller than kernel size {}",
            order, ksize
        )));
    }

    let mut kernel = vec![0.0f64; ksize + 1];
    kernel[0] = 1.0;

    for _ in 0..ksize - order - 1 {
        let mut prev = kernel[0];
        for j in 1..=ksize {
            let next = kernel[j] + kernel[j - 1];
            kernel[j - 1] = prev;
            prev = next;
        }
    }

    for _ in 0..order {
        let mut prev = -kernel[0];
        for j in 1..=ksize {
            let next = kernel[j - 1] - kernel[j];
            kernel[j - 1] = prev;
            prev = next;
        }
    }

    kernel.truncate(ksize);
    let scale = 0.5f64.powi((ksize - order - 1) as i32);
    kernel.iter_mut().for_each(|v| *v *= scale);
    Ok(kernel)
}

/// Kernel pair `(kx, ky)` for the `(dx, dy)` derivative
pub fn derivative_kernels(dx: usize, dy: usize, ksize: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    Ok((sobel_kernel(dx, ksize)?, sobel_kernel(dy, ksize)?))
}

/// Convolve along columns with `kx`, then along rows with `ky`.
///
/// Kernels are flipped (true convolution) and samples outside the grid
/// repeat the nearest edge value.
pub fn convolve_separable(grid: &Grid, kx: &[f64], ky: &[f64]) -> Result<Grid> {
    if kx.is_empty() || ky.is_empty() {
        return Err(BridgeError::invalid("convolution kernels must not be empty"));
    }
    let (rows, cols) = grid.shape();
    let src = grid.view();

    let ax = (kx.len() / 2) as isize;
    let horizontal = Array2::from_shape_fn((rows, cols), |(r, c)| {
        kx.iter()
            .rev()
            .enumerate()
            .map(|(k, w)| w * src[[r, clamp(c as isize + k as isize - ax, cols)]])
            .sum::<f64>()
    });

    let ay = (ky.len() / 2) as isize;
    let out = Array2::from_shape_fn((rows, cols), |(r, c)| {
        ky.iter()
            .rev()
            .enumerate()
            .map(|(k, w)| w * horizontal[[clamp(r as isize + k as isize - ay, rows), c]])
            .sum::<f64>()
    });

    Grid::from_array(out)
}

fn clamp(index: isize, len: usize) -> usize {
    index.clamp(0, len as isize - 1) as usize
}
