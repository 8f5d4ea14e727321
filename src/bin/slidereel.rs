use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "slidereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a slideshow job to an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render the frame at a given time as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input render job JSON (images + settings).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input render job JSON (images + settings).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timeline time in seconds.
    #[arg(long)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_job(path: &Path) -> anyhow::Result<slidereel::RenderJob> {
    let f = File::open(path).with_context(|| format!("open render job '{}'", path.display()))?;
    let r = BufReader::new(f);
    let job: slidereel::RenderJob =
        serde_json::from_reader(r).with_context(|| "parse render job JSON")?;
    Ok(job)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let job = read_job(&args.in_path)?;
    let sequence = slidereel::Sequence::from_specs(job.images);

    let sink: Arc<slidereel::ProgressSink> = Arc::new(|percent: u8, message: &str| {
        eprintln!("[{percent:3}%] {message}");
    });

    slidereel::render_video(&sequence, &job.settings, &args.out, sink)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let job = read_job(&args.in_path)?;
    let sequence = slidereel::Sequence::from_specs(job.images);

    let timeline = slidereel::build_timeline(&sequence, &job.settings)?;
    let frame = timeline.sample(args.at);
    frame.write_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
