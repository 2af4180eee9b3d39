use argh::FromArgs;
use std::path::PathBuf;

use dressguard_yolo::{Framework, Plan, SystemRunner, ValConfig, resolve_python};

#[derive(FromArgs)]
/// Validate the trained clothing detector
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

    /// path to the dataset yaml
    #[argh(option)]
    data: Option<PathBuf>,

    /// validation image size
    #[argh(option)]
    img: Option<u32>,

    /// print the planned command as json instead of running it
    #[argh(switch)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dressguard_yolo::init_logging();
    let args: Args = argh::from_env();

    let defaults = ValConfig::default();
    let config = ValConfig {
        framework: Framework {
            python: resolve_python(args.python),
            dir: args.yolov5_dir.unwrap_or(defaults.framework.dir),
        },
        weights: args.weights.unwrap_or(defaults.weights),
        data: args.data.unwrap_or(defaults.data),
        img_size: args.img.unwrap_or(defaults.img_size),
    };

    if args.dry_run {
        let command = config.command();
        println!("{}", Plan::new(&config, &command).to_json()?);
        return Ok(());
    }

    println!("Validating model...");
    dressguard_yolo::validate(&config, &mut SystemRunner);

    Ok(())
}
