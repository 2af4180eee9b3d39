use super::command::{FrameworkCommand, RunnerError};
use super::framework::{Framework, Script, path_arg};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Settings for the ONNX conversion instructions.
#[derive(Debug, Clone, Serialize)]
pub struct ExportConfig {
    /// Interpreter and checkout as the user is expected to type them
    pub framework: Framework,
    /// Checkpoint to convert
    pub weights: PathBuf,
    /// Export format passed to `--include`
    pub format: String,
    /// Where the web app loads its model from
    pub app_model_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            framework: Framework {
                python: "python".to_string(),
                dir: PathBuf::from("Clothing-Detection-with-YOLOV8-main"),
            },
            weights: PathBuf::from("Clothing-Detection-with-YOLOV8-main/yolov5s.pt"),
            format: "onnx".to_string(),
            app_model_path: PathBuf::from("binuscoc-app/public/model.onnx"),
        }
    }
}

impl ExportConfig {
    /// Build the `export.py` command the user should run.
    pub fn command(&self) -> FrameworkCommand {
        self.framework
            .command(Script::Export)
            .flag("weights", path_arg(&self.weights))
            .flag("include", &self.format)
    }

    /// File name the export step produces, e.g. `yolov5s.onnx`.
    pub fn exported_file_name(&self) -> String {
        let stem = self
            .weights
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        format!("{stem}.{}", self.format)
    }

    fn requirements_path(&self) -> String {
        path_arg(&self.framework.dir.join("requirements.txt"))
    }
}

/// Check that the checkpoint to convert is present.
///
/// The result is informational only and never changes the printed instructions.
pub fn probe_checkpoint(config: &ExportConfig) -> Result<(), RunnerError> {
    if !config.weights.is_file() {
        return Err(RunnerError::MissingPath {
            what: "Checkpoint",
            path: config.weights.clone(),
        });
    }
    Ok(())
}

/// Write the manual conversion steps.
pub fn write_instructions<W: Write>(config: &ExportConfig, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "To convert your model to ONNX for the web app:")?;
    writeln!(
        out,
        "1. Install yolov5 requirements: pip install -r {} (if available) or 'pip install ultralytics'",
        config.requirements_path()
    )?;
    writeln!(out, "2. Run the export command:")?;
    writeln!(out, "   {}", config.command())?;
    writeln!(
        out,
        "3. Move the generated '{}' to '{}'",
        config.exported_file_name(),
        path_arg(&config.app_model_path)
    )?;
    Ok(())
}

/// Probe the checkpoint, report any problem on stderr, then print the steps.
pub fn export_instructions<W: Write>(config: &ExportConfig, out: &mut W) -> std::io::Result<()> {
    if let Err(e) = probe_checkpoint(config) {
        tracing::warn!("checkpoint probe failed");
        eprintln!("{e}");
    }
    write_instructions(config, out)
}
