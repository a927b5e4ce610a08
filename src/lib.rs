pub mod core;
pub mod parsers;

#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use crate::python::PyBuilder;
#[cfg(feature = "python")]
use crate::python::functions::*;

#[cfg(feature = "python")]
#[pymodule]
fn ligbuild(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBuilder>()?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    m.add_function(wrap_pyfunction!(sample_sequence, m)?)?;
    m.add_function(wrap_pyfunction!(run_build_cli, m)?)?;

    Ok(())
}
