use hpges::{self, HpgeOptions, Registry};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// A constructed HPGe detector.
#[pyclass]
struct Detector {
    inner: hpges::Hpge,
}

#[pymethods]
impl Detector {
    #[getter]
    fn variant(&self) -> String {
        self.inner.variant().to_string()
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name().to_string()
    }

    #[getter]
    fn r(&self) -> Vec<f64> {
        self.inner.profile().r()
    }

    #[getter]
    fn z(&self) -> Vec<f64> {
        self.inner.profile().z()
    }

    /// Volume in mm^3.
    #[getter]
    fn volume(&self) -> f64 {
        self.inner.volume()
    }

    /// Mass in g.
    #[getter]
    fn mass(&self) -> f64 {
        self.inner.mass()
    }
}

/// Builds a detector from a metadata JSON file.
#[pyfunction]
#[pyo3(signature = (path, name=None, enrichment=None))]
fn make_hpge(path: &str, name: Option<String>, enrichment: Option<f64>) -> PyResult<Detector> {
    let options = HpgeOptions {
        name,
        material: enrichment.map(hpges::make_enriched_germanium),
        ..HpgeOptions::default()
    };
    let mut registry = Registry::new();
    hpges::make_hpge(path, &mut registry, options)
        .map(|inner| Detector { inner })
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// HPGe detector geometry implemented in Rust.
#[pymodule]
fn _hpges_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(make_hpge, m)?)?;
    m.add_class::<Detector>()?;
    Ok(())
}
