use crate::tools::{
    AddAudioConfig, ConvertConfig, CropConfig, ExtractConfig, ExtractFramesConfig, FrameMode,
    GifConfig, ScaleConfig, StitchConfig, ToolConfig, ToolId, TrimConfig, parse_crf,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ffcmd",
    version,
    about = "Fill in a few fields, get a ready-to-paste ffmpeg command"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Working directory prepended to relative paths (overrides the saved one for this run)
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub base: Option<String>,

    /// Join base and relative paths with the host separator instead of `\`
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub native_separators: bool,

    /// Preferences file (default: <config dir>/ffcmd/prefs.json)
    #[arg(long, global = true, env = "FFCMD_PREFS", value_hint = ValueHint::FilePath)]
    pub prefs: Option<PathBuf>,

    /// Also copy the generated command to the clipboard
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub copy: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut a segment out of a video
    Trim(TrimArgs),
    /// Join several files through a concat manifest
    Stitch(StitchArgs),
    /// Re-encode into another codec/container
    Convert(ConvertArgs),
    /// Save the audio track
    Extract(ExtractArgs),
    /// Change resolution
    Scale(ScaleArgs),
    /// High quality GIF via a generated palette
    Gif(GifArgs),
    /// Replace or mix in an audio track
    #[command(alias = "addAudio")]
    AddAudio(AddAudioArgs),
    /// Grab a single frame or an image sequence
    #[command(alias = "extractFrames")]
    ExtractFrames(ExtractFramesArgs),
    /// Crop one file, or every .mp4 in the working directory
    Crop(CropArgs),
    /// Fill in the forms interactively
    Interactive,
    /// Show or change the saved base path and separator
    Base {
        #[command(subcommand)]
        action: Option<BaseAction>,
    },
    /// Open an external link (asks once per URL)
    Open(OpenArgs),
    /// List the available tools, or show one tool's default command
    Tools {
        /// Tool id, e.g. trim or addAudio
        tool: Option<ToolId>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum BaseAction {
    /// Print the saved base path
    Show,
    /// Save a new base path
    Set {
        #[arg(value_hint = ValueHint::DirPath)]
        path: String,
    },
    /// Forget the saved base path
    Clear,
    /// Save the separator used when joining (backslash|native)
    Separator { value: String },
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    pub url: String,

    /// Skip the external link notice
    #[arg(short = 'y', long, action = ArgAction::SetTrue)]
    pub yes: bool,

    /// Copy the URL instead of opening it
    #[arg(long, action = ArgAction::SetTrue)]
    pub copy_url: bool,
}

#[derive(Args, Debug, Default)]
pub struct TrimArgs {
    /// Input video file
    #[arg(short = 'i', long, value_hint = ValueHint::FilePath)]
    pub input: Option<String>,

    /// Start time (HH:MM:SS)
    #[arg(long)]
    pub start: Option<String>,

    /// End time (HH:MM:SS), or a duration with --duration
    #[arg(long)]
    pub end: Option<String>,

    /// Read --end as a duration (-t) instead of an end time (-to)
    #[arg(long, action = ArgAction::SetTrue)]
    pub duration: bool,

    /// Re-encode (slower, frame accurate)
    #[arg(long, action = ArgAction::SetTrue)]
    pub re_encode: bool,

    /// Output file
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    pub output: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct StitchArgs {
    /// Files to join, in order (default: part1.mp4 part2.mp4)
    #[arg(value_hint = ValueHint::FilePath)]
    pub files: Vec<String>,

    /// Output file
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    pub output: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Input file
    #[arg(short = 'i', long, value_hint = ValueHint::FilePath)]
    pub input: Option<String>,

    /// Video codec (libx264)
    #[arg(long)]
    pub vcodec: Option<String>,

    /// Audio codec (aac)
    #[arg(long)]
    pub acodec: Option<String>,

    /// Quality 0-51, lower is better; anything unparsable becomes 23
    #[arg(long, allow_hyphen_values = true)]
    pub crf: Option<String>,

    /// Output file
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    pub output: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    /// Input video file
    #[arg(short = 'i', long, value_hint = ValueHint::FilePath)]
    pub input: Option<String>,

    /// Audio format (mp3, aac, wav)
    #[arg(long)]
    pub format: Option<String>,

    /// Audio bitrate
    #[arg(long)]
    pub bitrate: Option<String>,

    /// Output file (default: audio.<format>)
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    pub output: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ScaleArgs {
    /// Input file
    #[arg(short = 'i', long, value_hint = ValueHint::FilePath)]
    pub input: Option<String>,

    /// Width in pixels (-1 keeps aspect)
    #[arg(long, allow_hyphen_values = true)]
    pub width: Option<String>,

    /// Height in pixels (-1 keeps aspect)
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,

    /// Use --height as given even when a width is set
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_aspect: bool,

    /// Output file
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    pub output: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct GifArgs {
    /// Input video file
    #[arg(short = 'i', long, value_hint = ValueHint::FilePath)]
    pub input: Option<String>,

    /// Output GIF
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    pub output: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct AddAudioArgs {
    /// Video input
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub video: Option<String>,

    /// Audio input
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub audio: Option<String>,

    /// Mix with the original audio instead of replacing it
    #[arg(long, action = ArgAction::SetTrue)]
    pub mix: bool,

    /// Output file
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    pub output: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ExtractFramesArgs {
    /// Input video file
    #[arg(short = 'i', long, value_hint = ValueHint::FilePath)]
    pub input: Option<String>,

    /// single or sequence
    #[arg(long)]
    pub mode: Option<FrameMode>,

    /// Timestamp of the single frame (HH:MM:SS)
    #[arg(long)]
    pub at: Option<String>,

    /// Frames per second for a sequence
    #[arg(long)]
    pub fps: Option<String>,

    /// Output image (a sequence gets _%04d before the extension)
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    pub output: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct CropArgs {
    /// Input file
    #[arg(short = 'i', long, value_hint = ValueHint::FilePath)]
    pub input: Option<String>,

    /// Crop width
    #[arg(long, allow_hyphen_values = true)]
    pub width: Option<String>,

    /// Crop height
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,

    /// Left offset
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<String>,

    /// Top offset
    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<String>,

    /// Emit a loop over every .mp4 in the working directory
    #[arg(long, action = ArgAction::SetTrue)]
    pub batch: bool,

    /// With --batch, start each loop with a cd into the base path
    #[arg(long, action = ArgAction::SetTrue, requires = "batch")]
    pub cd_base: bool,

    /// Output file
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    pub output: Option<String>,
}

/// Overwrite `slot` when a value was given on the command line.
fn apply(slot: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl TrimArgs {
    pub fn into_config(self) -> ToolConfig {
        let mut c = TrimConfig::default();
        apply(&mut c.input, self.input);
        apply(&mut c.start_time, self.start);
        apply(&mut c.end_time, self.end);
        apply(&mut c.output, self.output);
        c.use_duration = self.duration;
        c.re_encode = self.re_encode;
        ToolConfig::Trim(c)
    }
}

impl StitchArgs {
    pub fn into_config(self) -> ToolConfig {
        let mut c = StitchConfig::default();
        if !self.files.is_empty() {
            c.files = self.files;
        }
        apply(&mut c.output, self.output);
        ToolConfig::Stitch(c)
    }
}

impl ConvertArgs {
    pub fn into_config(self) -> ToolConfig {
        let mut c = ConvertConfig::default();
        apply(&mut c.input, self.input);
        apply(&mut c.video_codec, self.vcodec);
        apply(&mut c.audio_codec, self.acodec);
        apply(&mut c.output, self.output);
        if let Some(raw) = self.crf {
            c.crf = parse_crf(&raw);
        }
        ToolConfig::Convert(c)
    }
}

impl ExtractArgs {
    pub fn into_config(self) -> ToolConfig {
        let mut c = ExtractConfig::default();
        apply(&mut c.input, self.input);
        apply(&mut c.bitrate, self.bitrate);
        if let Some(format) = self.format {
            c.output = ExtractConfig::default_output(&format);
            c.format = format;
        }
        apply(&mut c.output, self.output);
        ToolConfig::Extract(c)
    }
}

impl ScaleArgs {
    pub fn into_config(self) -> ToolConfig {
        let mut c = ScaleConfig::default();
        apply(&mut c.input, self.input);
        apply(&mut c.width, self.width);
        apply(&mut c.height, self.height);
        apply(&mut c.output, self.output);
        c.maintain_aspect = !self.no_aspect;
        ToolConfig::Scale(c)
    }
}

impl GifArgs {
    pub fn into_config(self) -> ToolConfig {
        let mut c = GifConfig::default();
        apply(&mut c.input, self.input);
        apply(&mut c.output, self.output);
        ToolConfig::Gif(c)
    }
}

impl AddAudioArgs {
    pub fn into_config(self) -> ToolConfig {
        let mut c = AddAudioConfig::default();
        apply(&mut c.video_input, self.video);
        apply(&mut c.audio_input, self.audio);
        apply(&mut c.output, self.output);
        c.replace_original = !self.mix;
        ToolConfig::AddAudio(c)
    }
}

impl ExtractFramesArgs {
    pub fn into_config(self) -> ToolConfig {
        let mut c = ExtractFramesConfig::default();
        apply(&mut c.input, self.input);
        apply(&mut c.timestamp, self.at);
        apply(&mut c.fps, self.fps);
        apply(&mut c.output, self.output);
        if let Some(mode) = self.mode {
            c.mode = mode;
        }
        ToolConfig::ExtractFrames(c)
    }
}

impl CropArgs {
    pub fn into_config(self) -> ToolConfig {
        let mut c = CropConfig::default();
        apply(&mut c.input, self.input);
        apply(&mut c.width, self.width);
        apply(&mut c.height, self.height);
        apply(&mut c.x, self.x);
        apply(&mut c.y, self.y);
        apply(&mut c.output, self.output);
        c.is_batch = self.batch;
        c.cd_to_base = self.cd_base;
        ToolConfig::Crop(c)
    }
}

impl Commands {
    /// The tool configuration for generator subcommands, `None` for the rest.
    pub fn into_tool_config(self) -> Option<ToolConfig> {
        let config = match self {
            Commands::Trim(a) => a.into_config(),
            Commands::Stitch(a) => a.into_config(),
            Commands::Convert(a) => a.into_config(),
            Commands::Extract(a) => a.into_config(),
            Commands::Scale(a) => a.into_config(),
            Commands::Gif(a) => a.into_config(),
            Commands::AddAudio(a) => a.into_config(),
            Commands::ExtractFrames(a) => a.into_config(),
            Commands::Crop(a) => a.into_config(),
            Commands::Interactive
            | Commands::Base { .. }
            | Commands::Open(_)
            | Commands::Tools { .. } => {
                return None;
            }
        };
        Some(config)
    }
}
