use super::command::{CommandRunner, FrameworkCommand, RunnerError, run_checked};
use super::framework::{Framework, Script, path_arg};
use serde::Serialize;
use std::path::PathBuf;

/// Training configuration struct.
#[derive(Debug, Clone, Serialize)]
pub struct TrainConfig {
    /// The YOLOv5 checkout and interpreter
    pub framework: Framework,
    /// The dataset descriptor yaml
    pub data: PathBuf,
    /// The starting weights, a file or a released checkpoint name
    pub weights: String,
    /// Training image size in pixels
    pub img_size: u32,
    /// Images per batch
    pub batch_size: u32,
    /// Number of epochs
    pub epochs: u32,
    /// Compute device passed to the framework
    pub device: String,
}

/// Default configuration for training.
impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            framework: Framework::default(),
            data: PathBuf::from("clothing-detection-dataset/yolo_data.yaml"),
            weights: "yolov5s.pt".to_string(),
            img_size: 640,
            batch_size: 8,
            epochs: 50,
            device: "cpu".to_string(),
        }
    }
}

impl TrainConfig {
    /// Check that the checkout and the dataset descriptor exist.
    pub fn check_paths(&self) -> Result<(), RunnerError> {
        if !self.framework.dir.exists() {
            return Err(RunnerError::MissingPath {
                what: "YOLOv5 folder",
                path: self.framework.dir.clone(),
            });
        }
        if !self.data.exists() {
            return Err(RunnerError::MissingPath {
                what: "Dataset YAML",
                path: self.data.clone(),
            });
        }
        Ok(())
    }

    /// Build the `train.py` argument list.
    pub fn command(&self) -> FrameworkCommand {
        self.framework
            .command(Script::Train)
            .flag("img", self.img_size)
            .flag("batch", self.batch_size)
            .flag("epochs", self.epochs)
            .flag("data", path_arg(&self.data))
            .flag("weights", &self.weights)
            .flag("device", &self.device)
    }
}

/// Train the detector, failing if a required path is missing or the run fails.
pub fn train(config: &TrainConfig, runner: &mut dyn CommandRunner) -> Result<(), RunnerError> {
    config.check_paths()?;
    let command = config.command();
    tracing::info!(epochs = config.epochs, batch = config.batch_size, "starting training");
    run_checked(runner, &command)
}
