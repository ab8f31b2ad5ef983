// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::inference::DEFAULT_INPUT_SIZE;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Run Options:
    --source, -s <SOURCE>  Image file or directory of images
    --poses, -p <POSES>    JSON file with recorded pose results
    --width <WIDTH>        Width of each view [default: 896]
    --height <HEIGHT>      Height of each view [default: 512]
    --heatmap              Overlay one heatmap channel per frame
    --frames <N>           Stop after N frames
    --save <FILE>          Save the last rendered frame
    --font <FILE>          TrueType font for text labels [default: cached Arial.ttf]
    --offline              Do not download the default font
    --show                 Display frames in a window
    --verbose              Show verbose output

Examples:
    pose3d-viz run --source person.jpg --poses poses.json --save scene.png
    pose3d-viz run -s frames/ -p poses.json --show --heatmap
    pose3d-viz run -s person.jpg -p poses.json --frames 36 --show --font DejaVuSans.ttf"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render pose results over a frame source in 2D and 3D
    Run(RunArgs),
}

/// Arguments for the run command.
#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Image file or directory of images
    #[arg(short, long)]
    pub source: PathBuf,

    /// JSON file with recorded pose results
    #[arg(short, long)]
    pub poses: PathBuf,

    /// Width of each of the two views
    #[arg(long, default_value_t = 896)]
    pub width: u32,

    /// Height of the views
    #[arg(long, default_value_t = 512)]
    pub height: u32,

    /// Estimator input height
    #[arg(long, default_value_t = DEFAULT_INPUT_SIZE.0)]
    pub input_height: usize,

    /// Estimator input width
    #[arg(long, default_value_t = DEFAULT_INPUT_SIZE.1)]
    pub input_width: usize,

    /// Overlay one heatmap channel per frame
    #[arg(long, default_value_t = false)]
    pub heatmap: bool,

    /// Rotation of the 3D view around the z axis, in degrees
    #[arg(long, default_value_t = 0.0)]
    pub rotation: f32,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Save the last rendered frame to this file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// TrueType font for text labels, instead of the cached default
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Do not download the default font
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Display frames in a window
    #[arg(long, default_value_t = false)]
    pub show: bool,

    /// Show verbose output
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

impl RunArgs {
    /// Frame limit: `--frames` if given, otherwise unlimited in a window and a single
    /// frame without one.
    #[must_use]
    pub fn frame_limit(&self) -> Option<u64> {
        self.frames.or(if self.show { None } else { Some(1) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_args_defaults() {
        let args = Cli::parse_from(["app", "run", "--source", "a.jpg", "--poses", "p.json"]);
        let Commands::Run(run) = args.command;
        assert_eq!(run.source, PathBuf::from("a.jpg"));
        assert_eq!(run.poses, PathBuf::from("p.json"));
        assert_eq!((run.width, run.height), (896, 512));
        assert_eq!((run.input_height, run.input_width), DEFAULT_INPUT_SIZE);
        assert!(!run.heatmap);
        assert!(!run.show);
        assert!(!run.verbose);
        assert!(run.rotation.abs() < f32::EPSILON);
        assert!(run.save.is_none());
        assert!(run.font.is_none());
        assert!(!run.offline);
        assert_eq!(run.frame_limit(), Some(1));
    }

    #[test]
    fn test_run_args_custom() {
        let args = Cli::parse_from([
            "app", "run", "-s", "frames/", "-p", "p.json", "--width", "640", "--height", "480",
            "--heatmap", "--show", "--save", "out.png", "--rotation", "15", "--offline",
        ]);
        let Commands::Run(run) = args.command;
        assert_eq!((run.width, run.height), (640, 480));
        assert!(run.heatmap);
        assert!(run.show);
        assert_eq!(run.save, Some(PathBuf::from("out.png")));
        assert!((run.rotation - 15.0).abs() < f32::EPSILON);
        assert!(run.offline);
        assert_eq!(run.frame_limit(), None);
    }

    #[test]
    fn test_frames_overrides_limit() {
        let args = Cli::parse_from(["app", "run", "-s", "a.jpg", "-p", "p.json", "--frames", "36"]);
        let Commands::Run(run) = args.command;
        assert_eq!(run.frame_limit(), Some(36));
    }

    #[test]
    fn test_missing_poses_is_error() {
        assert!(Cli::try_parse_from(["app", "run", "--source", "a.jpg"]).is_err());
    }
}
