use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CRF: u32 = 23;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    Trim,
    Stitch,
    Convert,
    Extract,
    Scale,
    Gif,
    AddAudio,
    ExtractFrames,
    Crop,
}

impl ToolId {
    pub const ALL: [ToolId; 9] = [
        ToolId::Trim,
        ToolId::Stitch,
        ToolId::Convert,
        ToolId::Extract,
        ToolId::Scale,
        ToolId::Gif,
        ToolId::AddAudio,
        ToolId::ExtractFrames,
        ToolId::Crop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolId::Trim => "trim",
            ToolId::Stitch => "stitch",
            ToolId::Convert => "convert",
            ToolId::Extract => "extract",
            ToolId::Scale => "scale",
            ToolId::Gif => "gif",
            ToolId::AddAudio => "addAudio",
            ToolId::ExtractFrames => "extractFrames",
            ToolId::Crop => "crop",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolId::Trim => "Trim / Cut",
            ToolId::Stitch => "Stitch / Merge",
            ToolId::Convert => "Convert Format",
            ToolId::Extract => "Extract Audio",
            ToolId::Scale => "Resize / Scale",
            ToolId::Gif => "Video to GIF",
            ToolId::AddAudio => "Add Audio",
            ToolId::ExtractFrames => "Extract Frames",
            ToolId::Crop => "Crop Video",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolId::Trim => "Cut video segments",
            ToolId::Stitch => "Join multiple files",
            ToolId::Convert => "Change container/codec",
            ToolId::Extract => "Save audio track",
            ToolId::Scale => "Change resolution",
            ToolId::Gif => "Create optimized GIFs",
            ToolId::AddAudio => "Replace or mix an audio track",
            ToolId::ExtractFrames => "Grab a still or an image sequence",
            ToolId::Crop => "Cut a region out of the frame",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted: String = raw
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        ToolId::ALL
            .into_iter()
            .find(|tool| tool.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown tool `{raw}`"))
    }
}

/// Parse the leading integer of CRF text (`"18.5"` is 18). Zero, a negative
/// sign or no leading digits fall back to 23.
pub fn parse_crf(raw: &str) -> u32 {
    let text = raw.trim_start();
    let unsigned = text.strip_prefix('+').unwrap_or(text);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    match unsigned[..end].parse::<u32>() {
        Ok(0) | Err(_) => DEFAULT_CRF,
        Ok(crf) => crf,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimConfig {
    pub input: String,
    pub start_time: String,
    /// End timestamp, or a duration when `use_duration` is set.
    pub end_time: String,
    pub use_duration: bool,
    pub re_encode: bool,
    pub output: String,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            input: "input.mp4".into(),
            start_time: "00:00:00".into(),
            end_time: "00:00:10".into(),
            use_duration: false,
            re_encode: false,
            output: "trimmed.mp4".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchConfig {
    pub files: Vec<String>,
    pub output: String,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            files: vec!["part1.mp4".into(), "part2.mp4".into()],
            output: "stitched.mp4".into(),
        }
    }
}

impl StitchConfig {
    /// Name used for a newly added (or blank) entry at `index`.
    pub fn placeholder(index: usize) -> String {
        format!("video{}.mp4", index + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub input: String,
    pub video_codec: String,
    pub audio_codec: String,
    pub crf: u32,
    pub output: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input: "source.mkv".into(),
            video_codec: "libx264".into(),
            audio_codec: "aac".into(),
            crf: DEFAULT_CRF,
            output: "output.mp4".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub input: String,
    /// `mp3`, `aac` or `wav`.
    pub format: String,
    pub bitrate: String,
    pub output: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: "video.mp4".into(),
            format: "mp3".into(),
            bitrate: "192k".into(),
            output: "audio.mp3".into(),
        }
    }
}

impl ExtractConfig {
    pub const FORMATS: [&'static str; 3] = ["mp3", "aac", "wav"];

    pub fn default_output(format: &str) -> String {
        format!("audio.{format}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleConfig {
    pub input: String,
    pub width: String,
    pub height: String,
    pub maintain_aspect: bool,
    pub output: String,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            input: "input.mp4".into(),
            width: "1920".into(),
            height: "-1".into(),
            maintain_aspect: true,
            output: "resized.mp4".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GifConfig {
    pub input: String,
    pub output: String,
}

impl Default for GifConfig {
    fn default() -> Self {
        Self {
            input: "input.mp4".into(),
            output: "output.gif".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAudioConfig {
    pub video_input: String,
    pub audio_input: String,
    /// Drop the video's own audio instead of mixing both tracks.
    pub replace_original: bool,
    pub output: String,
}

impl Default for AddAudioConfig {
    fn default() -> Self {
        Self {
            video_input: "video.mp4".into(),
            audio_input: "audio.mp3".into(),
            replace_original: true,
            output: "output_with_audio.mp4".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameMode {
    #[default]
    Single,
    Sequence,
}

impl FrameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameMode::Single => "single",
            FrameMode::Sequence => "sequence",
        }
    }
}

impl FromStr for FrameMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(FrameMode::Single),
            "sequence" => Ok(FrameMode::Sequence),
            other => Err(format!("unknown frame mode `{other}` (single|sequence)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractFramesConfig {
    pub input: String,
    pub mode: FrameMode,
    pub timestamp: String,
    pub fps: String,
    pub output: String,
}

impl Default for ExtractFramesConfig {
    fn default() -> Self {
        Self {
            input: "input.mp4".into(),
            mode: FrameMode::Single,
            timestamp: "00:00:01".into(),
            fps: "1".into(),
            output: "frame.png".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropConfig {
    pub input: String,
    pub width: String,
    pub height: String,
    pub x: String,
    pub y: String,
    pub output: String,
    /// Emit a loop over every `.mp4` in the working directory instead.
    pub is_batch: bool,
    /// Prefix each batch loop with a `cd` into the base path.
    pub cd_to_base: bool,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            input: "input.mp4".into(),
            width: "640".into(),
            height: "480".into(),
            x: "0".into(),
            y: "0".into(),
            output: "cropped.mp4".into(),
            is_batch: false,
            cd_to_base: false,
        }
    }
}

/// One configuration record per tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolConfig {
    Trim(TrimConfig),
    Stitch(StitchConfig),
    Convert(ConvertConfig),
    Extract(ExtractConfig),
    Scale(ScaleConfig),
    Gif(GifConfig),
    AddAudio(AddAudioConfig),
    ExtractFrames(ExtractFramesConfig),
    Crop(CropConfig),
}

impl ToolConfig {
    pub fn default_for(tool: ToolId) -> Self {
        match tool {
            ToolId::Trim => ToolConfig::Trim(TrimConfig::default()),
            ToolId::Stitch => ToolConfig::Stitch(StitchConfig::default()),
            ToolId::Convert => ToolConfig::Convert(ConvertConfig::default()),
            ToolId::Extract => ToolConfig::Extract(ExtractConfig::default()),
            ToolId::Scale => ToolConfig::Scale(ScaleConfig::default()),
            ToolId::Gif => ToolConfig::Gif(GifConfig::default()),
            ToolId::AddAudio => ToolConfig::AddAudio(AddAudioConfig::default()),
            ToolId::ExtractFrames => ToolConfig::ExtractFrames(ExtractFramesConfig::default()),
            ToolId::Crop => ToolConfig::Crop(CropConfig::default()),
        }
    }

    pub fn tool(&self) -> ToolId {
        match self {
            ToolConfig::Trim(_) => ToolId::Trim,
            ToolConfig::Stitch(_) => ToolId::Stitch,
            ToolConfig::Convert(_) => ToolId::Convert,
            ToolConfig::Extract(_) => ToolId::Extract,
            ToolConfig::Scale(_) => ToolId::Scale,
            ToolConfig::Gif(_) => ToolId::Gif,
            ToolConfig::AddAudio(_) => ToolId::AddAudio,
            ToolConfig::ExtractFrames(_) => ToolId::ExtractFrames,
            ToolConfig::Crop(_) => ToolId::Crop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crf_fallback() {
        assert_eq!(parse_crf("18"), 18);
        assert_eq!(parse_crf(" 28 "), 28);
        assert_eq!(parse_crf("abc"), DEFAULT_CRF);
        assert_eq!(parse_crf(""), DEFAULT_CRF);
        assert_eq!(parse_crf("0"), DEFAULT_CRF);
        assert_eq!(parse_crf("-4"), DEFAULT_CRF);
        assert_eq!(parse_crf("18.5"), 18);
        assert_eq!(parse_crf("20abc"), 20);
        assert_eq!(parse_crf("+30"), 30);
        assert_eq!(parse_crf("0.9"), DEFAULT_CRF);
        assert_eq!(parse_crf(".5"), DEFAULT_CRF);
    }

    #[test]
    fn test_tool_id_parse_accepts_both_spellings() {
        assert_eq!("addAudio".parse::<ToolId>(), Ok(ToolId::AddAudio));
        assert_eq!("add-audio".parse::<ToolId>(), Ok(ToolId::AddAudio));
        assert_eq!("extract_frames".parse::<ToolId>(), Ok(ToolId::ExtractFrames));
        assert_eq!("GIF".parse::<ToolId>(), Ok(ToolId::Gif));
        assert!("blur".parse::<ToolId>().is_err());
    }

    #[test]
    fn test_default_config_matches_tool() {
        for tool in ToolId::ALL {
            assert_eq!(ToolConfig::default_for(tool).tool(), tool);
        }
    }

    #[test]
    fn test_frame_mode_parse() {
        assert_eq!("Sequence".parse::<FrameMode>(), Ok(FrameMode::Sequence));
        assert!("burst".parse::<FrameMode>().is_err());
    }
}
