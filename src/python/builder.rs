use pyo3::prelude::*;
use std::path::PathBuf;
use crate::core::builder::model::{Builder as CoreBuilder};
use crate::core::builder::config::Recipe;

fn runtime_err(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string())
}

#[pyclass(name = "Builder")]
pub struct PyBuilder {
    pub inner: CoreBuilder,
}

#[pymethods]
impl PyBuilder {
    #[new]
    pub fn new() -> Self {
        Self { inner: CoreBuilder::new() }
    }

    /// Loads a recipe; relative input paths resolve against its directory.
    pub fn load_recipe(&mut self, path: String) -> PyResult<()> {
        let recipe = Recipe::from_yaml(&path).map_err(|e| runtime_err(format!("Failed to load recipe: {:#}", e)))?;
        let base = PathBuf::from(&path).parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
        self.inner.set_recipe(recipe, base);
        Ok(())
    }

    #[pyo3(signature = (seed=None))]
    pub fn build(&mut self, seed: Option<u64>) -> PyResult<()> {
        if let (Some(s), Some(recipe)) = (seed, self.inner.recipe.as_mut()) {
            recipe.seed = Some(s);
            self.inner.plan = None;
        }
        self.inner.build().map_err(runtime_err)
    }

    /// [(monomers, linkers), ...] per chain.
    pub fn chains(&self) -> PyResult<Vec<(Vec<String>, Vec<String>)>> {
        let generation = self.inner.generation.as_ref().ok_or_else(|| runtime_err("Not built"))?;
        Ok(generation.chains.iter().map(|c| {
            (
                c.monomers.iter().map(|m| m.name().to_string()).collect(),
                c.linkers.iter().map(|l| l.name().to_string()).collect(),
            )
        }).collect())
    }

    #[pyo3(signature = (output_dir=None))]
    pub fn write(&self, output_dir: Option<String>) -> PyResult<Vec<String>> {
        let dir = output_dir.map(PathBuf::from).unwrap_or_else(|| self.inner.default_output_dir());
        let written = self.inner.write_outputs(&dir).map_err(runtime_err)?;
        Ok(written.iter().map(|p| p.to_string_lossy().into_owned()).collect())
    }
}
