#![deny(missing_docs)]

//! Command runners for the DressGuard YOLOv5 clothing detector
//!
//! This crate builds the command lines for YOLOv5's `train.py`, `val.py` and
//! `detect.py`, launches them as subprocesses, and prints the manual steps for
//! exporting a checkpoint to ONNX for the web app.
//!
//! # Examples
//!
//! ```no_run
//! use dressguard_yolo::{SystemRunner, TrainConfig, train};
//!
//! let config = TrainConfig {
//!     epochs: 10,
//!     ..Default::default()
//! };
//!
//! train(&config, &mut SystemRunner).expect("Training failed");
//! ```

/// Command lines, process launching and the runner error type
mod command;

/// Detection runner
mod detect;

/// ONNX export instructions
mod export;

/// YOLOv5 checkout and interpreter resolution
mod framework;

/// Training runner
mod train;

/// Validation runner
mod val;

pub use command::{
    CommandRunner, FrameworkCommand, Invocation, Plan, RunOutcome, RunnerError, ShellStyle,
    SystemRunner, run_checked, run_unchecked,
};
pub use detect::{DetectConfig, detect};
pub use export::{ExportConfig, export_instructions, probe_checkpoint, write_instructions};
pub use framework::{DEFAULT_PYTHON, Framework, PYTHON_ENV, Script, resolve_python};
pub use train::{TrainConfig, train};
pub use val::{ValConfig, validate};

/// Install the fmt subscriber used by the command line tools.
///
/// `RUST_LOG` overrides the default `dressguard_yolo=info` filter.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dressguard_yolo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
