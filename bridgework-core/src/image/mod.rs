//! Array processing example
//!
//! The exposed routine is [`non_max_suppression`]: a clamped 3x3
//! neighborhood maximum filter over a [`Grid`]. The Laplacian scale space
//! in [`scale_space`] is the driver that feeds it filtered images.
//!
//! # Example
//!
//! ```rust
//! use bridgework_core::image::{Grid, non_max_suppression};
//!
//! let grid = Grid::from_rows(vec![
//!     vec![1.0, 2.0, 1.0],
//!     vec![2.0, 5.0, 2.0],
//!     vec![1.0, 2.0, 1.0],
//! ])?;
//! let peaks = non_max_suppression(&grid);
//! assert_eq!(peaks.count_nonzero(), 1);
//! # Ok::<(), bridgework_core::error::BridgeError>(())
//! ```

mod grid;
mod kernels;
pub mod scale_space;
mod suppression;

pub use grid::Grid;
pub use kernels::{
    MAX_KSIZE, convolve_separable, derivative_kernels, gaussian_kernel, sobel_kernel,
};
pub use scale_space::{ScaleLevel, laplacian_of_gaussian, laplacian_scale_space};
pub use suppression::non_max_suppression;
