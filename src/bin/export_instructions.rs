use argh::FromArgs;
use std::path::PathBuf;

use dressguard_yolo::ExportConfig;

#[derive(FromArgs)]
/// Print the steps for converting a checkpoint to ONNX for the web app
struct Args {
    /// checkpoint to convert
    #[argh(option)]
    weights: Option<PathBuf>,

    /// where the web app expects the model
    #[argh(option)]
    app_model_path: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dressguard_yolo::init_logging();
    let args: Args = argh::from_env();

    let defaults = ExportConfig::default();
    let config = ExportConfig {
        weights: args.weights.unwrap_or(defaults.weights),
        app_model_path: args.app_model_path.unwrap_or(defaults.app_model_path),
        ..defaults
    };

    dressguard_yolo::export_instructions(&config, &mut std::io::stdout().lock())?;

    Ok(())
}
