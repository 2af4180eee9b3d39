use super::command::{CommandRunner, FrameworkCommand, run_unchecked};
use super::framework::{Framework, Script, path_arg};
use serde::Serialize;
use std::path::PathBuf;

/// Detection configuration struct.
#[derive(Debug, Clone, Serialize)]
pub struct DetectConfig {
    /// The YOLOv5 checkout and interpreter
    pub framework: Framework,
    /// The trained checkpoint
    pub weights: PathBuf,
    /// Directory of images to run detection on
    pub source: PathBuf,
    /// The confidence threshold for the model
    pub confidence_threshold: f32,
    /// Name of the output run under `runs/detect`
    pub name: String,
}

/// Default configuration for detection.
impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            framework: Framework::default(),
            weights: PathBuf::from("yolov5/runs/train/exp2/weights/best.pt"),
            source: PathBuf::from("clothing-detection-dataset/split_dataset/val/images"),
            confidence_threshold: 0.25,
            name: "dressguard_test".to_string(),
        }
    }
}

impl DetectConfig {
    /// Build the `detect.py` command.
    pub fn command(&self) -> FrameworkCommand {
        self.framework
            .command(Script::Detect)
            .flag("weights", path_arg(&self.weights))
            .flag("source", path_arg(&self.source))
            .flag("conf", self.confidence_threshold)
            .flag("name", &self.name)
    }
}

/// Run detection through the shell. The exit status is only logged.
pub fn detect(config: &DetectConfig, runner: &mut dyn CommandRunner) {
    run_unchecked(runner, &config.command());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Invocation, testing::RecordingRunner};

    #[test]
    fn test_detect_shell_string() {
        let config = DetectConfig {
            framework: Framework {
                python: "python3".to_string(),
                dir: PathBuf::from("yolov5"),
            },
            ..Default::default()
        };
        let line = config.command().to_shell_string();
        let script = path_arg(&PathBuf::from("yolov5").join("detect.py"));
        assert!(line.starts_with(&format!("python3 {script} ")));
        assert!(line.contains("--weights yolov5/runs/train/exp2/weights/best.pt"));
        assert!(line.contains("--source clothing-detection-dataset/split_dataset/val/images"));
        assert!(line.contains("--conf 0.25"));
        assert!(line.ends_with("--name dressguard_test"));
    }

    #[test]
    fn test_detect_ignores_failure() {
        let config = DetectConfig::default();
        let mut runner = RecordingRunner::exiting_with(1);
        detect(&config, &mut runner);
        assert_eq!(runner.calls.len(), 1);
        assert_eq!(runner.calls[0].1, Invocation::Shell);

        let mut runner = RecordingRunner::failing_to_spawn();
        detect(&config, &mut runner);
        assert_eq!(runner.calls[0].0, config.command());
    }
}
