//! Scalar arithmetic and generic overloading
//!
//! The statically typed side uses the [`Summable`] trait, so
//! `generic_sum` is one function instantiated per scalar type. Hosts that
//! only know their values at runtime go through [`dynamic_sum`], which
//! tries the overloads in a fixed order: integer, float, string.

use crate::error::{BridgeError, Result};
use crate::value::{HostValue, Value};

/// Add two integers.
///
/// # Errors
///
/// Returns `InvalidInput` when the sum does not fit in 64 bits.
pub fn sum_ints(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b)
        .ok_or_else(|| BridgeError::invalid(format!("integer overflow adding {} and {}", a, b)))
}

/// Add two floats.
pub fn sum_floats(a: f64, b: f64) -> f64 {
    a + b
}

/// Square root. Negative input yields NaN.
pub fn sqrt_num(x: f64) -> f64 {
    x.sqrt()
}

/// Types that `generic_sum` can be instantiated with
pub trait Summable: Sized {
    /// Combine two values of the same type
    fn sum(self, other: Self) -> Self;
}

macro_rules! impl_summable_numeric {
    ($($t:ty),*) => {
        $(
            impl Summable for $t {
                fn sum(self, other: Self) -> Self {
                    self + other
                }
            }
        )*
    };
}

impl_summable_numeric!(i32, i64, f32, f64);

impl Summable for String {
    fn sum(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

/// Add (or concatenate) two values of the same type
pub fn generic_sum<T: Summable>(a: T, b: T) -> T {
    a.sum(b)
}

/// Runtime overload resolution for `generic_sum`.
///
/// Both ints: integer sum. Both numeric: float sum. Both strings:
/// concatenation.
///
/// # Errors
///
/// Returns `InvalidInput` if no overload accepts both arguments or the
/// integer sum overflows.
pub fn dynamic_sum<V: HostValue>(a: &V, b: &V) -> Result<Value> {
    if let (Some(x), Some(y)) = (a.to_int(), b.to_int()) {
        tracing::debug!(x, y, "generic_sum: int overload");
        return sum_ints(x, y).map(Value::Int);
    }
    if let (Some(x), Some(y)) = (a.to_float(), b.to_float()) {
        tracing::debug!(x, y, "generic_sum: float overload");
        return Ok(Value::Float(generic_sum(x, y)));
    }
    if let (Some(x), Some(y)) = (a.to_text(), b.to_text()) {
        tracing::debug!("generic_sum: string overload");
        return Ok(Value::Str(generic_sum(x, y)));
    }

    Err(BridgeError::invalid(format!(
        "generic_sum has no overload for ({}, {})",
        a.type_name()?,
        b.type_name()?
    )))
}
