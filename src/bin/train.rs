use argh::FromArgs;
use std::path::PathBuf;

use dressguard_yolo::{Framework, Plan, SystemRunner, TrainConfig, resolve_python};

#[derive(FromArgs)]
/// Train the YOLOv5 clothing detector
struct Args {
    /// python interpreter, defaults to $PYTHON or python3
    #[argh(option)]
    python: Option<String>,

    /// path to the YOLOv5 checkout
    #[argh(option)]
    yolov5_dir: Option<PathBuf>,

    /// path to the dataset yaml
    #[argh(option)]
    data: Option<PathBuf>,

    /// starting weights
    #[argh(option)]
    weights: Option<String>,

    /// training image size
    #[argh(option)]
    img: Option<u32>,

    /// batch size
    #[argh(option)]
    batch: Option<u32>,

    /// number of epochs
    #[argh(option)]
    epochs: Option<u32>,

    /// compute device, e.g. cpu or 0
    #[argh(option)]
    device: Option<String>,

    /// print the planned command as json instead of running it
    #[argh(switch)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dressguard_yolo::init_logging();
    let args: Args = argh::from_env();

    let defaults = TrainConfig::default();
    let config = TrainConfig {
        framework: Framework {
            python: resolve_python(args.python),
            dir: args.yolov5_dir.unwrap_or(defaults.framework.dir),
        },
        data: args.data.unwrap_or(defaults.data),
        weights: args.weights.unwrap_or(defaults.weights),
        img_size: args.img.unwrap_or(defaults.img_size),
        batch_size: args.batch.unwrap_or(defaults.batch_size),
        epochs: args.epochs.unwrap_or(defaults.epochs),
        device: args.device.unwrap_or(defaults.device),
    };

    if args.dry_run {
        let command = config.command();
        println!("{}", Plan::new(&config, &command).to_json()?);
        return Ok(());
    }

    config.check_paths()?;
    println!("Training YOLOv5...");
    dressguard_yolo::train(&config, &mut SystemRunner)?;

    Ok(())
}
