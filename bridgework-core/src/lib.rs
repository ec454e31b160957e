//! # Bridgework - native examples for a scripting host
//!
//! Bridgework is a set of small, independent examples of exposing native
//! code to a scripting language. This crate holds the host-independent
//! implementations; `bridgework-python` exposes them to Python and
//! `bridgework-cli` runs them from a terminal.
//!
//! - **Scalars**: integer/float addition, square root, and a `generic_sum`
//!   overloaded over int, float and string
//! - **Hello**: a fixed greeting
//! - **Containers**: type inspection, integer filtering, dict printing and
//!   one-level flattening over any [`value::HostValue`]
//! - **Geometry**: a generic [`geometry::Point3`] value type with distance
//!   and addition
//! - **Image**: 3x3 non-maximum suppression and a Laplacian scale space
//!
//! ## Quick Start
//!
//! ```rust
//! use bridgework_core::prelude::*;
//!
//! assert_eq!(sum_ints(2, 3)?, 5);
//! assert_eq!(generic_sum("a".to_string(), "b".to_string()), "ab");
//!
//! let items = vec![Value::Int(1), Value::from("a"), Value::Int(2)];
//! assert_eq!(get_int_list(&items), vec![1, 2]);
//!
//! let p = Point3::new(1, 1, 1) + Point3::new(1, 2, 4);
//! assert_eq!(p.to_string(), "Point3D -> x: 2 y: 3 z: 5");
//! # Ok::<(), BridgeError>(())
//! ```

pub mod basic;
pub mod config;
pub mod containers;
pub mod error;
pub mod geometry;
pub mod hello;
pub mod image;
pub mod logging;
pub mod value;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::basic::{Summable, dynamic_sum, generic_sum, sqrt_num, sum_floats, sum_ints};
    pub use crate::config::{BridgeworkConfig, ConfigBuilder, LoggingConfig, ScaleSpaceConfig};
    pub use crate::containers::{
        check_types, flatten_2d_list, get_int_list, iterate_dict, string_entries, type_names,
    };
    pub use crate::error::{BridgeError, Result};
    pub use crate::geometry::{Coordinate, Point3};
    pub use crate::hello::greet;
    pub use crate::image::{Grid, ScaleLevel, laplacian_scale_space, non_max_suppression};
    pub use crate::logging::init_tracing;
    pub use crate::value::{Complex, HostValue, Value};
}
