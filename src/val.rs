use super::command::{CommandRunner, FrameworkCommand, run_unchecked};
use super::framework::{Framework, Script, path_arg};
use serde::Serialize;
use std::path::PathBuf;

/// Validation configuration struct.
#[derive(Debug, Clone, Serialize)]
pub struct ValConfig {
    /// The YOLOv5 checkout and interpreter
    pub framework: Framework,
    /// The trained checkpoint
    pub weights: PathBuf,
    /// The dataset descriptor yaml
    pub data: PathBuf,
    /// Validation image size in pixels
    pub img_size: u32,
}

impl Default for ValConfig {
    fn default() -> Self {
        Self {
            framework: Framework::default(),
            weights: PathBuf::from("yolov5/runs/train/exp2/weights/best.pt"),
            data: PathBuf::from("clothing-detection-dataset/yolo_data.yaml"),
            img_size: 640,
        }
    }
}

impl ValConfig {
    /// Build the `val.py` command.
    pub fn command(&self) -> FrameworkCommand {
        self.framework
            .command(Script::Val)
            .flag("weights", path_arg(&self.weights))
            .flag("data", path_arg(&self.data))
            .flag("img", self.img_size)
    }
}

/// Validate the trained model. Failures are logged and otherwise ignored.
pub fn validate(config: &ValConfig, runner: &mut dyn CommandRunner) {
    run_unchecked(runner, &config.command());
}
