//! Python bindings for the Bridgework examples
//!
//! This module exposes the `bridgework-core` examples to Python using PyO3.
//! Each example lives in its own submodule:
//!
//! - `bridgework.basic`: `sum_ints`, `sum_floats`, `sqrt_num`, `generic_sum`
//! - `bridgework.hello`: `greet`
//! - `bridgework.containers`: `check_types`, `get_int_list`, `iterate_dict`, `flatten_2D_list`
//! - `bridgework.geometry`: `Point3D`
//! - `bridgework.image`: `non_max_suppression`, `laplacian_scale_space`

#![allow(unsafe_op_in_unsafe_fn)] // PyO3 macros generate safe unsafe code
#![allow(clippy::useless_conversion)] // PyO3 PyResult type alias triggers false positives

use numpy::{
    IntoPyArray, PyArray2, PyArrayMethods, PyUntypedArray, PyUntypedArrayMethods,
};
use pyo3::exceptions::{PyException, PyOverflowError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyComplex, PyDict, PyList, PyString};

use bridgework_core::basic;
use bridgework_core::config::{LoggingConfig, ScaleSpaceConfig};
use bridgework_core::containers;
use bridgework_core::error::{BridgeError, Result};
use bridgework_core::geometry::Point3;
use bridgework_core::hello;
use bridgework_core::image::{self, Grid};
use bridgework_core::value::{HostValue, Value};

// ============================================================================
// Error Handling
// ============================================================================

/// Python exception for Bridgework errors
#[derive(Debug)]
pub struct BridgeworkPythonError(BridgeError);

impl std::fmt::Display for BridgeworkPythonError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BridgeworkPythonError {}

impl From<BridgeError> for BridgeworkPythonError {
    fn from(err: BridgeError) -> Self {
        Self(err)
    }
}

impl From<BridgeworkPythonError> for PyErr {
    fn from(err: BridgeworkPythonError) -> PyErr {
        match err.0 {
            BridgeError::InvalidInput(message) => PyValueError::new_err(message),
            other => PyException::new_err(other.to_string()),
        }
    }
}

/// Helper to convert Rust Result to Python Result
fn to_py_result<T>(result: Result<T>) -> PyResult<T> {
    result.map_err(|e| BridgeworkPythonError::from(e).into())
}

// ============================================================================
// Host value seam
// ============================================================================

/// A Python object seen through the core's `HostValue` trait
struct HostObject<'py>(Bound<'py, PyAny>);

impl<'py> HostValue for HostObject<'py> {
    fn type_name(&self) -> Result<String> {
        self.0
            .get_type()
            .getattr("__name__")
            .and_then(|name| name.extract::<String>())
            .map_err(|e| BridgeError::Host(e.to_string()))
    }

    fn to_int(&self) -> Option<i64> {
        self.0.extract::<i64>().ok()
    }

    fn to_float(&self) -> Option<f64> {
        self.0.extract::<f64>().ok()
    }

    fn to_text(&self) -> Option<String> {
        self.0
            .downcast::<PyString>()
            .ok()
            .and_then(|s| s.extract::<String>().ok())
    }

    fn to_list(&self) -> Option<Vec<Self>> {
        self.0
            .downcast::<PyList>()
            .ok()
            .map(|list| list.iter().map(HostObject).collect())
    }
}

fn host_objects<'py>(list: &Bound<'py, PyList>) -> Vec<HostObject<'py>> {
    list.iter().map(HostObject).collect()
}

/// Helper to convert a core `Value` to a Python object
fn value_to_python(py: Python, value: &Value) -> PyResult<PyObject> {
    match value {
        Value::None => Ok(py.None()),
        Value::Bool(b) => Ok(b.to_object(py)),
        Value::Int(i) => Ok(i.to_object(py)),
        Value::Float(f) => Ok(f.to_object(py)),
        Value::Str(s) => Ok(s.to_object(py)),
        Value::Complex(c) => Ok(PyComplex::from_doubles_bound(py, c.re, c.im).to_object(py)),
        Value::List(items) => {
            let list = PyList::empty_bound(py);
            for item in items {
                list.append(value_to_python(py, item)?)?;
            }
            Ok(list.to_object(py))
        }
        Value::Dict(entries) => {
            let dict = PyDict::new_bound(py);
            for (key, value) in entries {
                dict.set_item(value_to_python(py, key)?, value_to_python(py, value)?)?;
            }
            Ok(dict.to_object(py))
        }
        Value::Object { type_name } => Err(PyValueError::new_err(format!(
            "cannot rebuild a '{}' object from its type name",
            type_name
        ))),
    }
}

/// Write text produced by the core to Python's `sys.stdout`
fn write_stdout(py: Python<'_>, bytes: &[u8]) -> PyResult<()> {
    let text = String::from_utf8_lossy(bytes);
    py.import_bound("sys")?
        .getattr("stdout")?
        .call_method1("write", (text.as_ref(),))?;
    Ok(())
}

// ============================================================================
// basic
// ============================================================================

/// Add two integers
#[pyfunction]
fn sum_ints(a: i64, b: i64) -> PyResult<i64> {
    to_py_result(basic::sum_ints(a, b))
}

/// Add two floats
#[pyfunction]
fn sum_floats(a: f64, b: f64) -> f64 {
    basic::sum_floats(a, b)
}

/// Square root (NaN for negative input)
#[pyfunction]
fn sqrt_num(x: f64) -> f64 {
    basic::sqrt_num(x)
}

/// Add two ints, two floats, or concatenate two strings
#[pyfunction]
fn generic_sum(py: Python<'_>, a: Bound<'_, PyAny>, b: Bound<'_, PyAny>) -> PyResult<PyObject> {
    let sum = to_py_result(basic::dynamic_sum(&HostObject(a), &HostObject(b)))?;
    value_to_python(py, &sum)
}

// ============================================================================
// hello
// ============================================================================

/// Return "Hello, world!"
#[pyfunction]
fn greet() -> String {
    hello::greet()
}

// ============================================================================
// containers
// ============================================================================

/// Print the type name of each element
#[pyfunction]
fn check_types(py: Python<'_>, items: &Bound<'_, PyList>) -> PyResult<()> {
    let mut buffer = Vec::new();
    to_py_result(containers::check_types(&host_objects(items), &mut buffer))?;
    write_stdout(py, &buffer)
}

/// Keep only the integer elements
#[pyfunction]
fn get_int_list(items: &Bound<'_, PyList>) -> Vec<i64> {
    containers::get_int_list(&host_objects(items))
}

/// Print each `key: value` pair of a str -> str dict
#[pyfunction]
fn iterate_dict(py: Python<'_>, dict: &Bound<'_, PyDict>) -> PyResult<()> {
    let entries: Vec<(HostObject, HostObject)> = dict
        .iter()
        .map(|(key, value)| (HostObject(key), HostObject(value)))
        .collect();
    let mut buffer = Vec::new();
    to_py_result(containers::iterate_dict(&entries, &mut buffer))?;
    write_stdout(py, &buffer)
}

/// Flatten a list of lists by one level
#[pyfunction]
#[pyo3(name = "flatten_2D_list")]
fn flatten_2d_list<'py>(
    py: Python<'py>,
    items: &Bound<'py, PyList>,
) -> PyResult<Bound<'py, PyList>> {
    let flat = to_py_result(containers::flatten_2d_list(&host_objects(items)))?;
    Ok(PyList::new_bound(py, flat.into_iter().map(|h| h.0)))
}

// ============================================================================
// geometry
// ============================================================================

/// Python wrapper for an integer 3D point
#[pyclass(name = "Point3D", module = "bridgework.geometry")]
#[derive(Clone)]
pub struct PyPoint3D {
    inner: Point3<i32>,
}

#[pymethods]
impl PyPoint3D {
    #[new]
    fn new(x: i32, y: i32, z: i32) -> Self {
        Self {
            inner: Point3::new(x, y, z),
        }
    }

    #[getter]
    fn x(&self) -> i32 {
        self.inner.x()
    }

    #[setter]
    fn set_x(&mut self, value: i32) {
        self.inner.set_x(value);
    }

    #[getter]
    fn y(&self) -> i32 {
        self.inner.y()
    }

    #[setter]
    fn set_y(&mut self, value: i32) {
        self.inner.set_y(value);
    }

    #[getter]
    fn z(&self) -> i32 {
        self.inner.z()
    }

    #[setter]
    fn set_z(&mut self, value: i32) {
        self.inner.set_z(value);
    }

    /// Euclidean distance to another point
    fn distance(&self, other: PyRef<'_, Self>) -> f64 {
        self.inner.distance(&other.inner)
    }

    /// Text rendering, same as `str(point)`
    #[allow(clippy::inherent_to_string)]
    fn to_string(&self) -> String {
        self.inner.to_string()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Point3D({}, {}, {})",
            self.inner.x(),
            self.inner.y(),
            self.inner.z()
        )
    }

    fn __eq__(&self, other: PyRef<'_, Self>) -> bool {
        self.inner == other.inner
    }

    fn __add__(&self, other: PyRef<'_, Self>) -> PyResult<Self> {
        let (a, b) = (self.inner, other.inner);
        let fits = a.x().checked_add(b.x()).is_some()
            && a.y().checked_add(b.y()).is_some()
            && a.z().checked_add(b.z()).is_some();
        if !fits {
            return Err(PyOverflowError::new_err(
                "Point3D addition overflows a 32-bit coordinate",
            ));
        }
        Ok(Self { inner: a + b })
    }
}

// ============================================================================
// image
// ============================================================================

/// Read any 2D array-like into a `Grid`.
///
/// float64 ndarrays are read directly; everything else goes through
/// `numpy.asarray(obj, dtype="float64")`.
fn grid_from_array(py: Python<'_>, obj: &Bound<'_, PyAny>) -> PyResult<Grid> {
    let converted;
    let array = if obj.downcast::<PyArray2<f64>>().is_ok() {
        obj
    } else {
        tracing::debug!("converting array-like input with numpy.asarray");
        let kwargs = PyDict::new_bound(py);
        kwargs.set_item("dtype", "float64")?;
        converted = py
            .import_bound("numpy")?
            .call_method("asarray", (obj,), Some(&kwargs))?;
        &converted
    };

    let ndim = array.downcast::<PyUntypedArray>()?.ndim();
    if ndim != 2 {
        return Err(PyValueError::new_err(format!(
            "expected a 2-dimensional array, got {} dimension(s)",
            ndim
        )));
    }

    let typed = array.downcast::<PyArray2<f64>>()?;
    let readonly = typed.readonly();
    to_py_result(Grid::from_array(readonly.as_array().to_owned()))
}

fn grid_to_array<'py>(py: Python<'py>, grid: Grid) -> Bound<'py, PyArray2<f64>> {
    grid.into_array().into_pyarray_bound(py)
}

/// Keep the cells equal to their clamped 3x3 neighborhood maximum, zero the rest
#[pyfunction]
fn non_max_suppression<'py>(
    py: Python<'py>,
    array: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let grid = grid_from_array(py, array)?;
    Ok(grid_to_array(py, image::non_max_suppression(&grid)))
}

/// Laplacian scale space: a list of `(sigma, suppressed_response)` tuples
#[pyfunction]
#[pyo3(signature = (array, levels=10, ksize=5, sigma=1.0, sigma_step=1.2))]
fn laplacian_scale_space<'py>(
    py: Python<'py>,
    array: &Bound<'py, PyAny>,
    levels: usize,
    ksize: usize,
    sigma: f64,
    sigma_step: f64,
) -> PyResult<Vec<(f64, Bound<'py, PyArray2<f64>>)>> {
    let grid = grid_from_array(py, array)?;
    let config = ScaleSpaceConfig {
        ksize,
        levels,
        sigma,
        sigma_step,
    };
    let scales = to_py_result(image::laplacian_scale_space(&grid, &config))?;
    Ok(scales
        .into_iter()
        .map(|level| (level.sigma, grid_to_array(py, level.response)))
        .collect())
}

// ============================================================================
// Module definition
// ============================================================================

/// Install a tracing subscriber; returns False if one was already installed
#[pyfunction]
#[pyo3(signature = (level=None))]
fn init_logging(level: Option<String>) -> PyResult<bool> {
    let mut config = LoggingConfig::default();
    if let Some(level) = level {
        config.level = level;
    }
    to_py_result(bridgework_core::logging::init_tracing(&config))
}

/// Create a submodule and make it importable as `bridgework.<name>`
fn add_submodule<'py>(
    parent: &Bound<'py, PyModule>,
    name: &str,
    populate: impl FnOnce(&Bound<'py, PyModule>) -> PyResult<()>,
) -> PyResult<()> {
    let py = parent.py();
    let module = PyModule::new_bound(py, name)?;
    populate(&module)?;
    parent.add_submodule(&module)?;
    py.import_bound("sys")?
        .getattr("modules")?
        .set_item(format!("bridgework.{}", name), &module)?;
    Ok(())
}

/// Python module definition
#[pymodule]
fn bridgework(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", bridgework_core::VERSION)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;

    add_submodule(m, "basic", |sub| {
        sub.add_function(wrap_pyfunction!(sum_ints, sub)?)?;
        sub.add_function(wrap_pyfunction!(sum_floats, sub)?)?;
        sub.add_function(wrap_pyfunction!(sqrt_num, sub)?)?;
        sub.add_function(wrap_pyfunction!(generic_sum, sub)?)?;
        Ok(())
    })?;

    add_submodule(m, "hello", |sub| {
        sub.add_function(wrap_pyfunction!(greet, sub)?)?;
        Ok(())
    })?;

    add_submodule(m, "containers", |sub| {
        sub.add_function(wrap_pyfunction!(check_types, sub)?)?;
        sub.add_function(wrap_pyfunction!(get_int_list, sub)?)?;
        sub.add_function(wrap_pyfunction!(iterate_dict, sub)?)?;
        sub.add_function(wrap_pyfunction!(flatten_2d_list, sub)?)?;
        Ok(())
    })?;

    add_submodule(m, "geometry", |sub| {
        sub.add_class::<PyPoint3D>()?;
        Ok(())
    })?;

    add_submodule(m, "image", |sub| {
        sub.add_function(wrap_pyfunction!(non_max_suppression, sub)?)?;
        // Legacy misspelled alias
        sub.add("non_max_supression", sub.getattr("non_max_suppression")?)?;
        sub.add_function(wrap_pyfunction!(laplacian_scale_space, sub)?)?;
        Ok(())
    })?;

    Ok(())
}
