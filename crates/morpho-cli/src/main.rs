use argh::FromArgs;
use std::io::Write;
use std::path::{Path, PathBuf};

use morpho::{
    image::GrayImage,
    imgproc::morphology::{self, MorphOp},
    io::pgm,
};

#[derive(FromArgs)]
/// Apply a morphological filter (dilation or erosion) to a binary PGM image
struct Args {
    /// path to the input PGM image (default: image.pgm)
    #[argh(option, short = 'i', default = "PathBuf::from(\"image.pgm\")")]
    image_path: PathBuf,

    /// operation to apply: dilate or erode (prompts interactively if omitted)
    #[argh(option, short = 'o')]
    operation: Option<String>,

    /// output path (default: dilated.pgm or eroded.pgm per operation)
    #[argh(option)]
    output: Option<PathBuf>,

    /// print an ascii rendering of the result
    #[argh(switch, short = 'p')]
    preview: bool,
}

/// Loads the input image, applies the operation, and saves the result.
fn run(
    op: MorphOp,
    input_path: &Path,
    output_path: &Path,
) -> Result<GrayImage, Box<dyn std::error::Error>> {
    let image = pgm::read_image_pgm(input_path)?;
    log::info!("loaded {} from {}", image.size(), input_path.display());

    let filtered = morphology::apply(&image, op);
    pgm::write_image_pgm(output_path, &filtered)?;
    log::info!("{} completed, saved to {}", op, output_path.display());

    Ok(filtered)
}

fn parse_operation(raw: &str) -> Result<MorphOp, Box<dyn std::error::Error>> {
    match raw {
        "dilate" => Ok(MorphOp::Dilate),
        "erode" => Ok(MorphOp::Erode),
        other => Err(format!("unknown operation {other:?} (expected dilate or erode)").into()),
    }
}

fn prompt_operation() -> Result<MorphOp, Box<dyn std::error::Error>> {
    print!("Choose operation:\n1. Dilation\n2. Erosion\nEnter your choice: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    match line.trim() {
        "1" => Ok(MorphOp::Dilate),
        "2" => Ok(MorphOp::Erode),
        other => Err(format!("invalid choice {other:?} (expected 1 or 2)").into()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = argh::from_env();

    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let op = match &args.operation {
        Some(raw) => parse_operation(raw)?,
        None => prompt_operation()?,
    };

    let output_path = args.output.unwrap_or_else(|| match op {
        MorphOp::Dilate => PathBuf::from("dilated.pgm"),
        MorphOp::Erode => PathBuf::from("eroded.pgm"),
    });

    let filtered = run(op, &args.image_path, &output_path)?;

    if args.preview {
        println!("{}", filtered.to_ascii());
    }

    Ok(())
}
