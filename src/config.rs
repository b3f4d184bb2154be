//! JSON configuration of the `dehighlight` tool.
use crate::pipeline::DehighlightParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Fused raster destination
    pub image: PathBuf,
    /// Optional JSON report destination
    pub report_json: Option<PathBuf>,
    /// Directory receiving intermediate rasters
    pub debug_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ToolConfig {
    /// Captures of the same photo, in any order
    pub inputs: Vec<PathBuf>,
    pub output: OutputConfig,
    #[serde(default)]
    pub params: DehighlightParams,
}

impl ToolConfig {
    /// Resolve relative paths against `base`, usually the config's directory.
    pub fn rebase(mut self, base: &Path) -> Self {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        self.inputs.iter_mut().for_each(join);
        join(&mut self.output.image);
        self.output.report_json.iter_mut().for_each(join);
        self.output.debug_dir.iter_mut().for_each(join);
        self
    }
}

pub fn load_config(path: &Path) -> Result<ToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: ToolConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    if config.inputs.is_empty() {
        return Err(format!("Config {} lists no inputs", path.display()));
    }
    config
        .params
        .validate()
        .map_err(|e| format!("Invalid params in {}: {e}", path.display()))?;
    Ok(config)
}
