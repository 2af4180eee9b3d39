use super::command::FrameworkCommand;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Environment variable consulted for the python interpreter.
pub const PYTHON_ENV: &str = "PYTHON";

/// Interpreter used when nothing else is configured.
pub const DEFAULT_PYTHON: &str = "python3";

/// YOLOv5 entry point scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// `train.py`
    Train,
    /// `val.py`
    Val,
    /// `detect.py`
    Detect,
    /// `export.py`
    Export,
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.py",
            match self {
                Script::Train => "train",
                Script::Val => "val",
                Script::Detect => "detect",
                Script::Export => "export",
            }
        )
    }
}

/// Location of the YOLOv5 checkout and the interpreter that runs it.
#[derive(Debug, Clone, Serialize)]
pub struct Framework {
    /// The python interpreter.
    pub python: String,
    /// The YOLOv5 checkout directory.
    pub dir: PathBuf,
}

impl Default for Framework {
    fn default() -> Self {
        Self {
            python: resolve_python(None),
            dir: PathBuf::from("yolov5"),
        }
    }
}

impl Framework {
    /// Path of an entry point script inside the checkout.
    pub fn script_path(&self, script: Script) -> PathBuf {
        self.dir.join(script.to_string())
    }

    /// Start a command that runs `script` with the configured interpreter.
    pub fn command(&self, script: Script) -> FrameworkCommand {
        FrameworkCommand::new(self.python.clone()).arg(path_arg(&self.script_path(script)))
    }
}

/// Pick the interpreter: explicit value, then `$PYTHON`, then `python3`.
pub fn resolve_python(explicit: Option<String>) -> String {
    pick_python(explicit, std::env::var(PYTHON_ENV).ok())
}

fn pick_python(explicit: Option<String>, from_env: Option<String>) -> String {
    explicit
        .or(from_env.filter(|p| !p.is_empty()))
        .unwrap_or_else(|| DEFAULT_PYTHON.to_string())
}

/// Render a path as a command line argument.
pub(crate) fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_names() {
        assert_eq!(Script::Train.to_string(), "train.py");
        assert_eq!(Script::Val.to_string(), "val.py");
        assert_eq!(Script::Detect.to_string(), "detect.py");
        assert_eq!(Script::Export.to_string(), "export.py");
    }

    #[test]
    fn test_framework_command() {
        let framework = Framework {
            python: "python3".to_string(),
            dir: PathBuf::from("yolov5"),
        };
        let cmd = framework.command(Script::Detect);
        assert_eq!(cmd.program, "python3");
        assert_eq!(cmd.args, vec![path_arg(&Path::new("yolov5").join("detect.py"))]);
    }

    #[test]
    fn test_resolve_python_prefers_explicit() {
        assert_eq!(resolve_python(Some("/usr/bin/python3.11".into())), "/usr/bin/python3.11");
        assert_eq!(
            pick_python(Some("/usr/bin/python3.11".into()), Some("/opt/conda/bin/python".into())),
            "/usr/bin/python3.11"
        );
    }

    #[test]
    fn test_python_from_environment() {
        assert_eq!(
            pick_python(None, Some("/opt/conda/bin/python".into())),
            "/opt/conda/bin/python"
        );
        assert_eq!(pick_python(None, Some(String::new())), DEFAULT_PYTHON);
        assert_eq!(pick_python(None, None), DEFAULT_PYTHON);
    }
}
