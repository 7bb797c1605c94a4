use crate::filters::{
    audio_encoder, build_amix_graph, build_crop_filter, build_gif_filter, build_scale_filter,
    or_default, sequence_pattern, AMIX_LABEL,
};
use crate::paths::PathResolver;
use crate::tools::{
    AddAudioConfig, ConvertConfig, CropConfig, ExtractConfig, ExtractFramesConfig, FrameMode,
    GifConfig, ScaleConfig, StitchConfig, ToolConfig, TrimConfig,
};

pub const CONCAT_MANIFEST: &str = "files.txt";
pub const BATCH_PREFIX: &str = "cropped_";

/// Build the ffmpeg command text for `config`. Pure: same inputs, same output.
pub fn generate(config: &ToolConfig, paths: &PathResolver) -> String {
    match config {
        ToolConfig::Trim(c) => trim(c, paths),
        ToolConfig::Stitch(c) => stitch(c, paths),
        ToolConfig::Convert(c) => convert(c, paths),
        ToolConfig::Extract(c) => extract(c, paths),
        ToolConfig::Scale(c) => scale(c, paths),
        ToolConfig::Gif(c) => gif(c, paths),
        ToolConfig::AddAudio(c) => add_audio(c, paths),
        ToolConfig::ExtractFrames(c) => extract_frames(c, paths),
        ToolConfig::Crop(c) => crop(c, paths),
    }
}

/// Every path field of `config`, resolved the same way `generate` resolves it.
pub fn path_fields(config: &ToolConfig, paths: &PathResolver) -> Vec<(String, String)> {
    let field = |label: &str, raw: &str, fallback: &str| {
        (label.to_string(), paths.resolve(raw, fallback))
    };
    match config {
        ToolConfig::Trim(c) => vec![
            field("Input", &c.input, "input.mp4"),
            field("Output", &c.output, "trimmed.mp4"),
        ],
        ToolConfig::Stitch(c) => {
            let mut fields: Vec<_> = c
                .files
                .iter()
                .enumerate()
                .map(|(idx, f)| {
                    field(&format!("File {}", idx + 1), f, &StitchConfig::placeholder(idx))
                })
                .collect();
            fields.push(field("Output", &c.output, "stitched.mp4"));
            fields
        }
        ToolConfig::Convert(c) => vec![
            field("Input", &c.input, "source.mkv"),
            field("Output", &c.output, "output.mp4"),
        ],
        ToolConfig::Extract(c) => vec![
            field("Input", &c.input, "video.mp4"),
            field("Output", &c.output, "audio.mp3"),
        ],
        ToolConfig::Scale(c) => vec![
            field("Input", &c.input, "input.mp4"),
            field("Output", &c.output, "resized.mp4"),
        ],
        ToolConfig::Gif(c) => vec![
            field("Input", &c.input, "input.mp4"),
            field("Output", &c.output, "output.gif"),
        ],
        ToolConfig::AddAudio(c) => vec![
            field("Video input", &c.video_input, "video.mp4"),
            field("Audio input", &c.audio_input, "audio.mp3"),
            field("Output", &c.output, "output_with_audio.mp4"),
        ],
        ToolConfig::ExtractFrames(c) => {
            let output = match c.mode {
                FrameMode::Single => c.output.clone(),
                FrameMode::Sequence => sequence_pattern(or_default(&c.output, "frame.png")),
            };
            vec![
                field("Input", &c.input, "input.mp4"),
                field("Output", &output, "frame.png"),
            ]
        }
        ToolConfig::Crop(c) if c.is_batch => vec![],
        ToolConfig::Crop(c) => vec![
            field("Input", &c.input, "input.mp4"),
            field("Output", &c.output, "cropped.mp4"),
        ],
    }
}

fn trim(c: &TrimConfig, paths: &PathResolver) -> String {
    let input = paths.resolve(&c.input, "input.mp4");
    let output = paths.resolve(&c.output, "trimmed.mp4");
    let start = or_default(&c.start_time, "00:00:00");
    let end = or_default(&c.end_time, "00:00:10");
    // -t reads the end field as a duration, -to as an absolute timestamp
    let time_flag = if c.use_duration { "-t" } else { "-to" };

    if c.re_encode {
        format!(
            "ffmpeg -i \"{input}\" -ss {start} {time_flag} {end} -c:v libx264 -c:a aac \"{output}\""
        )
    } else {
        format!("ffmpeg -ss {start} -i \"{input}\" {time_flag} {end} -c copy \"{output}\"")
    }
}

fn stitch(c: &StitchConfig, paths: &PathResolver) -> String {
    let mut cmd =
        format!("# Create a text file named '{CONCAT_MANIFEST}' with the following content:\n");
    for (idx, file) in c.files.iter().enumerate() {
        let fallback = StitchConfig::placeholder(idx);
        cmd.push_str(&format!("# file '{}'\n", paths.resolve(file, &fallback)));
    }
    let output = paths.resolve(&c.output, "stitched.mp4");
    cmd.push_str(&format!(
        "\nffmpeg -f concat -safe 0 -i {CONCAT_MANIFEST} -c copy \"{output}\""
    ));
    cmd
}

fn convert(c: &ConvertConfig, paths: &PathResolver) -> String {
    let input = paths.resolve(&c.input, "source.mkv");
    let output = paths.resolve(&c.output, "output.mp4");
    format!(
        "ffmpeg -i \"{input}\" -c:v {} -crf {} -c:a {} \"{output}\"",
        or_default(&c.video_codec, "libx264"),
        c.crf,
        or_default(&c.audio_codec, "aac"),
    )
}

fn extract(c: &ExtractConfig, paths: &PathResolver) -> String {
    let input = paths.resolve(&c.input, "video.mp4");
    let output = paths.resolve(&c.output, "audio.mp3");
    let encoder = audio_encoder(c.format.trim());
    let bitrate = or_default(&c.bitrate, "192k");
    format!("ffmpeg -i \"{input}\" -vn -acodec {encoder} -b:a {bitrate} \"{output}\"")
}

fn scale(c: &ScaleConfig, paths: &PathResolver) -> String {
    let input = paths.resolve(&c.input, "input.mp4");
    let output = paths.resolve(&c.output, "resized.mp4");
    let filter = build_scale_filter(&c.width, &c.height, c.maintain_aspect);
    format!("ffmpeg -i \"{input}\" -vf {filter} -c:a copy \"{output}\"")
}

fn gif(c: &GifConfig, paths: &PathResolver) -> String {
    let input = paths.resolve(&c.input, "input.mp4");
    let output = paths.resolve(&c.output, "output.gif");
    format!(
        "ffmpeg -i \"{input}\" -vf \"{}\" -loop 0 \"{output}\"",
        build_gif_filter()
    )
}

fn add_audio(c: &AddAudioConfig, paths: &PathResolver) -> String {
    let video = paths.resolve(&c.video_input, "video.mp4");
    let audio = paths.resolve(&c.audio_input, "audio.mp3");
    let output = paths.resolve(&c.output, "output_with_audio.mp4");

    if c.replace_original {
        format!(
            "ffmpeg -i \"{video}\" -i \"{audio}\" -map 0:v:0 -map 1:a:0 -c:v copy -c:a aac \"{output}\""
        )
    } else {
        format!(
            "ffmpeg -i \"{video}\" -i \"{audio}\" -filter_complex \"{}\" -map 0:v:0 -map \"{AMIX_LABEL}\" -c:v copy -c:a aac \"{output}\"",
            build_amix_graph()
        )
    }
}

fn extract_frames(c: &ExtractFramesConfig, paths: &PathResolver) -> String {
    let input = paths.resolve(&c.input, "input.mp4");
    match c.mode {
        FrameMode::Single => {
            let output = paths.resolve(&c.output, "frame.png");
            let timestamp = or_default(&c.timestamp, "00:00:01");
            format!("ffmpeg -ss {timestamp} -i \"{input}\" -frames:v 1 \"{output}\"")
        }
        FrameMode::Sequence => {
            let pattern = sequence_pattern(or_default(&c.output, "frame.png"));
            let output = paths.resolve(&pattern, "frame.png");
            let fps = or_default(&c.fps, "1");
            format!("ffmpeg -i \"{input}\" -vf fps={fps} \"{output}\"")
        }
    }
}

fn crop(c: &CropConfig, paths: &PathResolver) -> String {
    let filter = build_crop_filter(&c.width, &c.height, &c.x, &c.y);
    if c.is_batch {
        let base = if c.cd_to_base { paths.base() } else { "" };
        return crop_batch_script(&filter, base);
    }
    let input = paths.resolve(&c.input, "input.mp4");
    let output = paths.resolve(&c.output, "cropped.mp4");
    format!("ffmpeg -i \"{input}\" -vf \"{filter}\" -c:a copy \"{output}\"")
}

/// Command Prompt and bash loops cropping every `.mp4` in the working directory.
fn crop_batch_script(filter: &str, base: &str) -> String {
    let mut script = String::from(":: Windows (Command Prompt)\n");
    if !base.is_empty() {
        script.push_str(&format!("cd /d \"{base}\"\n"));
    }
    script.push_str(&format!(
        "for %f in (*.mp4) do ffmpeg -i \"%f\" -vf \"{filter}\" -c:a copy \"{BATCH_PREFIX}%f\"\n"
    ));
    script.push_str("\n# macOS / Linux (bash)\n");
    if !base.is_empty() {
        script.push_str(&format!("cd \"{base}\"\n"));
    }
    script.push_str(&format!(
        "for f in *.mp4; do ffmpeg -i \"$f\" -vf \"{filter}\" -c:a copy \"{BATCH_PREFIX}$f\"; done"
    ));
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::Separator;
    use crate::tools::ToolId;

    fn no_base() -> PathResolver {
        PathResolver::default()
    }

    fn videos() -> PathResolver {
        PathResolver::new(r"C:\Videos", Separator::Backslash)
    }

    fn trim_config(re_encode: bool, use_duration: bool) -> ToolConfig {
        ToolConfig::Trim(TrimConfig {
            input: "input.mp4".into(),
            start_time: "00:00:05".into(),
            end_time: "00:00:15".into(),
            use_duration,
            re_encode,
            output: "trimmed.mp4".into(),
        })
    }

    #[test]
    fn test_generate_is_pure() {
        for tool in ToolId::ALL {
            let config = ToolConfig::default_for(tool);
            assert_eq!(generate(&config, &videos()), generate(&config, &videos()));
        }
    }

    #[test]
    fn test_trim_stream_copy() {
        let cmd = generate(&trim_config(false, false), &no_base());
        assert_eq!(
            cmd,
            r#"ffmpeg -ss 00:00:05 -i "input.mp4" -to 00:00:15 -c copy "trimmed.mp4""#
        );
        assert!(cmd.find("-ss").unwrap() < cmd.find("-i").unwrap());
    }

    #[test]
    fn test_trim_re_encode_moves_seek_after_input() {
        let cmd = generate(&trim_config(true, false), &no_base());
        assert_eq!(
            cmd,
            r#"ffmpeg -i "input.mp4" -ss 00:00:05 -to 00:00:15 -c:v libx264 -c:a aac "trimmed.mp4""#
        );
        assert!(cmd.find("-ss").unwrap() > cmd.find("-i").unwrap());
    }

    #[test]
    fn test_trim_duration_flag() {
        let cmd = generate(&trim_config(false, true), &no_base());
        assert!(cmd.contains(" -t 00:00:15 "));
        assert!(!cmd.contains("-to"));
    }

    #[test]
    fn test_trim_resolves_paths_against_base() {
        let cmd = generate(&trim_config(false, false), &videos());
        assert!(cmd.contains(r#"-i "C:\Videos\input.mp4""#));
        assert!(cmd.ends_with(r#""C:\Videos\trimmed.mp4""#));
    }

    #[test]
    fn test_stitch_lists_files_in_order() {
        let config = ToolConfig::Stitch(StitchConfig {
            files: vec!["a.mp4".into(), "b.mp4".into(), "c.mp4".into()],
            output: "joined.mp4".into(),
        });
        let cmd = generate(&config, &no_base());
        assert_eq!(
            cmd,
            "# Create a text file named 'files.txt' with the following content:\n\
             # file 'a.mp4'\n\
             # file 'b.mp4'\n\
             # file 'c.mp4'\n\
             \n\
             ffmpeg -f concat -safe 0 -i files.txt -c copy \"joined.mp4\""
        );
        let invocation = cmd.lines().last().unwrap();
        assert!(invocation.contains("-i files.txt"));
        assert!(!invocation.contains("a.mp4"));
    }

    #[test]
    fn test_stitch_empty_list_keeps_header() {
        let config = ToolConfig::Stitch(StitchConfig {
            files: vec![],
            output: "joined.mp4".into(),
        });
        let cmd = generate(&config, &no_base());
        assert!(cmd.starts_with("# Create a text file named 'files.txt'"));
        assert!(!cmd.contains("# file '"));
    }

    #[test]
    fn test_stitch_blank_entry_uses_placeholder() {
        let config = ToolConfig::Stitch(StitchConfig {
            files: vec!["a.mp4".into(), " ".into()],
            output: "joined.mp4".into(),
        });
        let cmd = generate(&config, &videos());
        assert!(cmd.contains(r"# file 'C:\Videos\a.mp4'"));
        assert!(cmd.contains(r"# file 'C:\Videos\video2.mp4'"));
    }

    #[test]
    fn test_convert_template() {
        let config = ToolConfig::Convert(ConvertConfig {
            crf: 18,
            ..ConvertConfig::default()
        });
        assert_eq!(
            generate(&config, &no_base()),
            r#"ffmpeg -i "source.mkv" -c:v libx264 -crf 18 -c:a aac "output.mp4""#
        );
    }

    #[test]
    fn test_extract_encoder_tokens() {
        let mp3 = ToolConfig::Extract(ExtractConfig::default());
        assert_eq!(
            generate(&mp3, &no_base()),
            r#"ffmpeg -i "video.mp4" -vn -acodec libmp3lame -b:a 192k "audio.mp3""#
        );

        let wav = ToolConfig::Extract(ExtractConfig {
            format: "wav".into(),
            output: "audio.wav".into(),
            ..ExtractConfig::default()
        });
        assert!(generate(&wav, &no_base()).contains("-acodec aac "));
    }

    #[test]
    fn test_scale_aspect_rule() {
        let config = ToolConfig::Scale(ScaleConfig {
            width: "1920".into(),
            height: "1080".into(),
            maintain_aspect: true,
            ..ScaleConfig::default()
        });
        let cmd = generate(&config, &no_base());
        assert!(cmd.contains("-vf scale=1920:-1 "));
        assert!(!cmd.contains("1080"));
    }

    #[test]
    fn test_scale_empty_width_defaults_to_sentinel() {
        let config = ToolConfig::Scale(ScaleConfig {
            width: "".into(),
            height: "720".into(),
            maintain_aspect: true,
            ..ScaleConfig::default()
        });
        let cmd = generate(&config, &no_base());
        assert!(cmd.contains("-vf scale=-1:-1 "));
        assert!(!cmd.contains("720"));
    }

    #[test]
    fn test_gif_only_paths_vary() {
        let config = ToolConfig::Gif(GifConfig {
            input: "clip.mov".into(),
            output: "clip.gif".into(),
        });
        assert_eq!(
            generate(&config, &no_base()),
            r#"ffmpeg -i "clip.mov" -vf "fps=15,scale=480:-1:flags=lanczos,split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse" -loop 0 "clip.gif""#
        );
    }

    #[test]
    fn test_add_audio_replace_maps_streams() {
        let cmd = generate(&ToolConfig::AddAudio(AddAudioConfig::default()), &no_base());
        assert_eq!(
            cmd,
            r#"ffmpeg -i "video.mp4" -i "audio.mp3" -map 0:v:0 -map 1:a:0 -c:v copy -c:a aac "output_with_audio.mp4""#
        );
        assert!(!cmd.contains("amix"));
    }

    #[test]
    fn test_add_audio_mix_builds_filter_graph() {
        let config = ToolConfig::AddAudio(AddAudioConfig {
            replace_original: false,
            ..AddAudioConfig::default()
        });
        let cmd = generate(&config, &no_base());
        assert!(cmd.contains(r#"-filter_complex "[0:a][1:a]amix=inputs=2:duration=first[aout]""#));
        assert!(cmd.contains(r#"-map 0:v:0 -map "[aout]""#));
    }

    #[test]
    fn test_extract_frames_single() {
        let cmd = generate(
            &ToolConfig::ExtractFrames(ExtractFramesConfig::default()),
            &no_base(),
        );
        assert_eq!(cmd, r#"ffmpeg -ss 00:00:01 -i "input.mp4" -frames:v 1 "frame.png""#);
    }

    #[test]
    fn test_extract_frames_sequence_pattern() {
        let config = ToolConfig::ExtractFrames(ExtractFramesConfig {
            mode: FrameMode::Sequence,
            fps: "5".into(),
            output: "shot.jpg".into(),
            ..ExtractFramesConfig::default()
        });
        assert_eq!(
            generate(&config, &videos()),
            r#"ffmpeg -i "C:\Videos\input.mp4" -vf fps=5 "C:\Videos\shot_%04d.jpg""#
        );
    }

    #[test]
    fn test_extract_frames_sequence_without_extension() {
        let config = ToolConfig::ExtractFrames(ExtractFramesConfig {
            mode: FrameMode::Sequence,
            output: "frames".into(),
            ..ExtractFramesConfig::default()
        });
        assert!(generate(&config, &no_base()).ends_with(r#""frame_%04d.png""#));
    }

    #[test]
    fn test_crop_single() {
        let config = ToolConfig::Crop(CropConfig::default());
        assert_eq!(
            generate(&config, &no_base()),
            r#"ffmpeg -i "input.mp4" -vf "crop=640:480:0:0" -c:a copy "cropped.mp4""#
        );
    }

    #[test]
    fn test_crop_batch_ignores_single_fields() {
        let config = ToolConfig::Crop(CropConfig {
            input: "ignored.mp4".into(),
            output: "also_ignored.mp4".into(),
            is_batch: true,
            ..CropConfig::default()
        });
        let script = generate(&config, &no_base());
        assert!(!script.contains("ignored"));
        assert!(script.contains(
            r#"for %f in (*.mp4) do ffmpeg -i "%f" -vf "crop=640:480:0:0" -c:a copy "cropped_%f""#
        ));
        assert!(script.contains(
            r#"for f in *.mp4; do ffmpeg -i "$f" -vf "crop=640:480:0:0" -c:a copy "cropped_$f"; done"#
        ));
        assert!(!script.contains("cd "));
    }

    #[test]
    fn test_crop_batch_ignores_base_by_default() {
        let config = ToolConfig::Crop(CropConfig {
            is_batch: true,
            ..CropConfig::default()
        });
        let script = generate(&config, &videos());
        assert!(!script.contains("cd "));
        assert!(!script.contains("Videos"));
    }

    #[test]
    fn test_crop_batch_changes_into_base_when_asked() {
        let config = ToolConfig::Crop(CropConfig {
            is_batch: true,
            cd_to_base: true,
            ..CropConfig::default()
        });
        let script = generate(&config, &videos());
        assert!(script.contains(r#"cd /d "C:\Videos""#));
        assert!(script.contains("\ncd \"C:\\Videos\"\n"));

        let no_base_script = generate(&config, &no_base());
        assert!(!no_base_script.contains("cd "));
    }

    #[test]
    fn test_path_fields_match_generated_text() {
        let config = ToolConfig::AddAudio(AddAudioConfig {
            audio_input: "".into(),
            ..AddAudioConfig::default()
        });
        let fields = path_fields(&config, &videos());
        assert_eq!(
            fields,
            [
                ("Video input".to_string(), r"C:\Videos\video.mp4".to_string()),
                ("Audio input".to_string(), r"C:\Videos\audio.mp3".to_string()),
                ("Output".to_string(), r"C:\Videos\output_with_audio.mp4".to_string()),
            ]
        );
        let cmd = generate(&config, &videos());
        for (_, path) in fields {
            assert!(cmd.contains(&format!("\"{path}\"")));
        }
    }

    #[test]
    fn test_batch_crop_has_no_path_fields() {
        let config = ToolConfig::Crop(CropConfig {
            is_batch: true,
            ..CropConfig::default()
        });
        assert!(path_fields(&config, &videos()).is_empty());
    }

    #[test]
    fn test_absolute_paths_ignore_base() {
        let config = ToolConfig::Gif(GifConfig {
            input: r"D:\abs\f.mp4".into(),
            output: "out.gif".into(),
        });
        let cmd = generate(&config, &videos());
        assert!(cmd.contains(r#"-i "D:\abs\f.mp4""#));
        assert!(cmd.ends_with(r#""C:\Videos\out.gif""#));
    }
}
