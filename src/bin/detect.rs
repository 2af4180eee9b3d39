use argh::FromArgs;
use std::path::PathBuf;

use dressguard_yolo::{DetectConfig, Framework, Plan, SystemRunner, resolve_python};

#[derive(FromArgs)]
/// Run the trained clothing detector over a directory of images
struct Args {
    /// python interpreter, defaults to $PYTHON or python3
    #[argh(option)]
    python: Option<String>,

    /// path to the YOLOv5 checkout
    #[argh(option)]
    yolov5_dir: Option<PathBuf>,

    /// path to the trained weights
    #[argh(option)]
    weights: Option<PathBuf>,

    /// directory of input images
    #[argh(option)]
    source: Option<PathBuf>,

    /// the confidence threshold for the model
    #[argh(option)]
    conf: Option<f32>,

    /// name of the output run
    #[argh(option)]
    name: Option<String>,

    /// print the planned command as json instead of running it
    #[argh(switch)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dressguard_yolo::init_logging();
    let args: Args = argh::from_env();

    let defaults = DetectConfig::default();
    let config = DetectConfig {
        framework: Framework {
            python: resolve_python(args.python),
            dir: args.yolov5_dir.unwrap_or(defaults.framework.dir),
        },
        weights: args.weights.unwrap_or(defaults.weights),
        source: args.source.unwrap_or(defaults.source),
        confidence_threshold: args.conf.unwrap_or(defaults.confidence_threshold),
        name: args.name.unwrap_or(defaults.name),
    };

    if args.dry_run {
        let command = config.command();
        println!("{}", Plan::new(&config, &command).to_json()?);
        return Ok(());
    }

    println!("Running detection...");
    dressguard_yolo::detect(&config, &mut SystemRunner);

    Ok(())
}
