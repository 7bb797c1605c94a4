pub const GIF_FPS: u32 = 15;
pub const GIF_WIDTH: u32 = 480;
pub const SEQUENCE_PLACEHOLDER: &str = "%04d";
pub const SEQUENCE_FALLBACK: &str = "frame_%04d.png";
pub const AMIX_LABEL: &str = "[aout]";

/// Fallback for empty text fields.
#[inline]
pub fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// `scale=w:h`. With `maintain_aspect`, height becomes `-1` unless the width
/// field is literally `-1`; an empty width still forces it.
pub fn build_scale_filter(width: &str, height: &str, maintain_aspect: bool) -> String {
    let w = or_default(width, "-1");
    let h = if maintain_aspect && width != "-1" {
        "-1"
    } else {
        or_default(height, "-1")
    };
    format!("scale={w}:{h}")
}

pub fn build_crop_filter(width: &str, height: &str, x: &str, y: &str) -> String {
    format!(
        "crop={}:{}:{}:{}",
        or_default(width, "640"),
        or_default(height, "480"),
        or_default(x, "0"),
        or_default(y, "0")
    )
}

/// Two-pass palette chain: fps, lanczos scale, split, palettegen, paletteuse.
pub fn build_gif_filter() -> String {
    let parts = [
        format!("fps={GIF_FPS}"),
        format!("scale={GIF_WIDTH}:-1:flags=lanczos"),
        "split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse".to_string(),
    ];
    parts.join(",")
}

/// Mix both inputs' audio; the first input's duration sets the mix length.
pub fn build_amix_graph() -> String {
    format!("[0:a][1:a]amix=inputs=2:duration=first{AMIX_LABEL}")
}

/// Audio encoder for an extract format.
///
/// Only `mp3` gets its own encoder. `wav` lands on `aac` like every other
/// format; generated commands for wav have always looked like this and
/// scripts depend on the exact text.
pub fn audio_encoder(format: &str) -> &'static str {
    if format == "mp3" { "libmp3lame" } else { "aac" }
}

/// Inject `_%04d` before the extension, splitting on the first `.`.
pub fn sequence_pattern(output: &str) -> String {
    match output.split_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!("{stem}_{SEQUENCE_PLACEHOLDER}.{ext}")
        }
        _ => SEQUENCE_FALLBACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_maintain_aspect_forces_height() {
        assert_eq!(build_scale_filter("1920", "1080", true), "scale=1920:-1");
    }

    #[test]
    fn test_scale_sentinel_width_keeps_height() {
        assert_eq!(build_scale_filter("-1", "720", true), "scale=-1:720");
    }

    #[test]
    fn test_scale_empty_width_with_aspect_drops_height() {
        assert_eq!(build_scale_filter("", "720", true), "scale=-1:-1");
        assert_eq!(build_scale_filter("", "720", false), "scale=-1:720");
    }

    #[test]
    fn test_scale_without_aspect_is_verbatim() {
        assert_eq!(build_scale_filter("1280", "720", false), "scale=1280:720");
        assert_eq!(build_scale_filter("1280", "", false), "scale=1280:-1");
    }

    #[test]
    fn test_crop_filter() {
        assert_eq!(build_crop_filter("100", "200", "10", "20"), "crop=100:200:10:20");
        assert_eq!(build_crop_filter("iw/2", "ih/2", "", ""), "crop=iw/2:ih/2:0:0");
    }

    #[test]
    fn test_gif_filter_chain() {
        assert_eq!(
            build_gif_filter(),
            "fps=15,scale=480:-1:flags=lanczos,split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse"
        );
    }

    #[test]
    fn test_audio_encoder_mapping() {
        assert_eq!(audio_encoder("mp3"), "libmp3lame");
        assert_eq!(audio_encoder("aac"), "aac");
        assert_eq!(audio_encoder("wav"), "aac");
    }

    #[test]
    fn test_sequence_pattern() {
        assert_eq!(sequence_pattern("frame.png"), "frame_%04d.png");
        assert_eq!(sequence_pattern("shot.v2.jpg"), "shot_%04d.v2.jpg");
        assert_eq!(sequence_pattern("frames"), SEQUENCE_FALLBACK);
        assert_eq!(sequence_pattern(".png"), SEQUENCE_FALLBACK);
    }

    #[test]
    fn test_amix_graph() {
        assert_eq!(build_amix_graph(), "[0:a][1:a]amix=inputs=2:duration=first[aout]");
    }
}
