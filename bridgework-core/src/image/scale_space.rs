//! Laplacian scale space driven by non-maximum suppression

use std::time::{Duration, Instant};

use super::grid::Grid;
use super::kernels::{convolve_separable, derivative_kernels, gaussian_kernel};
use super::suppression::non_max_suppression;
use crate::config::ScaleSpaceConfig;
use crate::error::Result;

/// One level of a scale space
#[derive(Debug, Clone)]
pub struct ScaleLevel {
    /// Gaussian sigma used for this level
    pub sigma: f64,

    /// Suppressed, scale-normalized squared Laplacian response
    pub response: Grid,

    /// Time spent in non-maximum suppression
    pub elapsed: Duration,
}

/// Gaussian blur followed by the sum of second derivatives along x and y
pub fn laplacian_of_gaussian(grid: &Grid, ksize: usize, sigma: f64) -> Result<Grid> {
    let gauss = gaussian_kernel(ksize, sigma)?;
    let blurred = convolve_separable(grid, &gauss, &gauss)?;

    let (dxx_x, dxx_y) = derivative_kernels(2, 0, ksize)?;
    let (dyy_x, dyy_y) = derivative_kernels(0, 2, ksize)?;
    let dxx = convolve_separable(&blurred, &dxx_x, &dxx_y)?;
    let dyy = convolve_separable(&blurred, &dyy_x, &dyy_y)?;

    Grid::from_array(&dxx.view() + &dyy.view())
}

/// Build `config.levels` scales, starting at `config.sigma` and multiplying
/// by `config.sigma_step` each time.
///
/// Each level is `(LoG * sigma^2)^2` passed through
/// [`non_max_suppression`].
///
/// # Errors
///
/// Returns `InvalidInput` when the configuration is invalid.
pub fn laplacian_scale_space(grid: &Grid, config: &ScaleSpaceConfig) -> Result<Vec<ScaleLevel>> {
    config.validate()?;

    let mut levels = Vec::with_capacity(config.levels);
    let mut sigma = config.sigma;
    let mut total = Duration::ZERO;

    for index in 0..config.levels {
        let normalization = sigma * sigma;
        let response = laplacian_of_gaussian(grid, config.ksize, sigma)?
            .map(|v| (v * normalization).powi(2));

        let started = Instant::now();
        let suppressed = non_max_suppression(&response);
        let elapsed = started.elapsed();
        total += elapsed;

        tracing::info!(
            level = index,
            sigma,
            kept = suppressed.count_nonzero(),
            elapsed_us = elapsed.as_micros() as u64,
            "non-max suppression"
        );

        levels.push(ScaleLevel {
            sigma,
            response: suppressed,
            elapsed,
        });
        sigma *= config.sigma_step;
    }

    tracing::info!(
        levels = levels.len(),
        total_us = total.as_micros() as u64,
        "scale space complete"
    );
    Ok(levels)
}
