use crate::command::path_fields;
use crate::feedback::{self, Status};
use crate::links::{self, LinkOutcome, PROJECT_LINKS};
use crate::platform;
use crate::session::Session;
use crate::tools::{ExtractConfig, FrameMode, StitchConfig, ToolConfig, ToolId, parse_crf};
use anyhow::Result;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

const MENU: &[&str] = &[
    "Edit fields",
    "Switch tool",
    "Set base path",
    "Copy command",
    "Copy a path",
    "History",
    "Clear history",
    "Links",
    "Quit",
];

pub fn run(session: &mut Session) -> Result<()> {
    println!("ffcmd - ffmpeg command builder");
    println!("Nothing is executed; copy the command and run it in your own terminal.\n");

    let theme = ColorfulTheme::default();
    loop {
        show_command(session);

        let choice = Select::with_theme(&theme)
            .with_prompt(format!("{} ({})", session.active().label(), session.active()))
            .items(MENU)
            .default(0)
            .interact()?;

        match MENU[choice] {
            "Edit fields" => edit_fields(&theme, session.config_mut())?,
            "Switch tool" => switch_tool(&theme, session)?,
            "Set base path" => edit_base_path(&theme, session)?,
            "Copy command" => {
                let command = session.record_copy();
                feedback::copied(platform::try_copy(&command), "command");
            }
            "Copy a path" => copy_path(&theme, session)?,
            "History" => browse_history(&theme, session)?,
            "Clear history" => {
                session.clear_history();
                feedback::announce(Status::Ok, "History cleared.");
            }
            "Links" => open_links(&theme, session)?,
            _ => return Ok(()),
        }
    }
}

fn show_command(session: &Session) {
    let base = match session.base_path() {
        "" => "(none)",
        base => base,
    };
    println!("\nBase path: {base}");
    println!("Generated command:\n");
    println!("{}\n", session.command());
}

fn switch_tool(theme: &ColorfulTheme, session: &mut Session) -> Result<()> {
    let items: Vec<String> = ToolId::ALL
        .iter()
        .map(|t| format!("{:<16} {}", t.label(), t.description()))
        .collect();
    let current = ToolId::ALL
        .iter()
        .position(|t| *t == session.active())
        .unwrap_or(0);
    let idx = Select::with_theme(theme)
        .with_prompt("Tool")
        .items(&items)
        .default(current)
        .interact()?;
    session.select(ToolId::ALL[idx]);
    Ok(())
}

fn edit_base_path(theme: &ColorfulTheme, session: &mut Session) -> Result<()> {
    let base = prompt_text(theme, "Base path (blank = none)", session.base_path())?;
    if let Err(err) = session.set_base_path(&base) {
        tracing::warn!(%err, "base path not saved");
        feedback::announce(Status::Warn, "Base path applied but could not be saved.");
    }
    Ok(())
}

fn copy_path(theme: &ColorfulTheme, session: &Session) -> Result<()> {
    let fields = path_fields(session.config(), &session.resolver());
    if fields.is_empty() {
        feedback::announce(Status::Warn, "This command has no path fields.");
        return Ok(());
    }
    let items: Vec<String> = fields
        .iter()
        .map(|(label, path)| format!("{label}: {path}"))
        .collect();
    let idx = Select::with_theme(theme)
        .with_prompt("Copy which path?")
        .items(&items)
        .default(0)
        .interact()?;
    feedback::copied(platform::try_copy(&fields[idx].1), "path");
    Ok(())
}

fn browse_history(theme: &ColorfulTheme, session: &Session) -> Result<()> {
    if session.history().is_empty() {
        feedback::announce(Status::Warn, "Nothing copied yet.");
        return Ok(());
    }
    let mut items: Vec<String> = session
        .history()
        .iter()
        .map(|e| {
            let first_line = e.command.lines().next().unwrap_or_default();
            format!(
                "#{:<3} {} {:<14} {}",
                e.id,
                e.timestamp.format("%H:%M:%S"),
                e.tool,
                first_line
            )
        })
        .collect();
    items.push("Back".into());

    let idx = Select::with_theme(theme)
        .with_prompt("Recent (select to copy again)")
        .items(&items)
        .default(0)
        .interact()?;
    if let Some(entry) = session.history().get(idx) {
        feedback::copied(platform::try_copy(&entry.command), "command");
    }
    Ok(())
}

fn open_links(theme: &ColorfulTheme, session: &mut Session) -> Result<()> {
    let mut items: Vec<String> = PROJECT_LINKS
        .iter()
        .map(|(label, url)| format!("{label} ({url})"))
        .collect();
    items.push("Back".into());
    let idx = Select::with_theme(theme)
        .with_prompt("Links")
        .items(&items)
        .default(0)
        .interact()?;
    let Some((_, url)) = PROJECT_LINKS.get(idx) else {
        return Ok(());
    };

    let outcome = links::follow(
        session.prefs_mut(),
        url,
        |url| external_link_notice(theme, url),
        platform::open_url,
    )?;
    if outcome == LinkOutcome::Unopened {
        feedback::announce(Status::Warn, &format!("Open this link manually: {url}"));
    }
    Ok(())
}

/// The one-time notice shown before leaving for an external site.
pub fn external_link_notice(theme: &ColorfulTheme, url: &str) -> Result<bool> {
    println!("\nExternal link notice");
    println!("You are leaving this app to visit an external website:\n  {url}\n");
    let choice = Select::with_theme(theme)
        .items(&["Continue to site", "Copy URL", "Cancel"])
        .default(0)
        .interact()?;
    match choice {
        0 => Ok(true),
        1 => {
            feedback::copied(platform::try_copy(url), "URL");
            Ok(false)
        }
        _ => Ok(false),
    }
}

fn edit_fields(theme: &ColorfulTheme, config: &mut ToolConfig) -> Result<()> {
    match config {
        ToolConfig::Trim(c) => {
            c.input = prompt_text(theme, "Input file path", &c.input)?;
            c.start_time = prompt_text(theme, "Start time (HH:MM:SS)", &c.start_time)?;
            c.use_duration = prompt_bool(theme, "Use duration instead of end time?", c.use_duration)?;
            let end_label = if c.use_duration {
                "Duration (seconds)"
            } else {
                "End time (HH:MM:SS)"
            };
            c.end_time = prompt_text(theme, end_label, &c.end_time)?;
            c.re_encode = prompt_bool(theme, "Re-encode (slower, frame perfect)?", c.re_encode)?;
            c.output = prompt_text(theme, "Output file name", &c.output)?;
        }
        ToolConfig::Stitch(c) => edit_stitch(theme, c)?,
        ToolConfig::Convert(c) => {
            c.input = prompt_text(theme, "Input file path", &c.input)?;
            c.video_codec = prompt_text(theme, "Video codec", &c.video_codec)?;
            c.audio_codec = prompt_text(theme, "Audio codec", &c.audio_codec)?;
            let crf = prompt_text(theme, "CRF (0-51, lower is better)", &c.crf.to_string())?;
            c.crf = parse_crf(&crf);
            c.output = prompt_text(theme, "Output file name", &c.output)?;
        }
        ToolConfig::Extract(c) => {
            c.input = prompt_text(theme, "Input video path", &c.input)?;
            let current = ExtractConfig::FORMATS
                .iter()
                .position(|f| *f == c.format)
                .unwrap_or(0);
            let idx = Select::with_theme(theme)
                .with_prompt("Format")
                .items(&ExtractConfig::FORMATS)
                .default(current)
                .interact()?;
            let format = ExtractConfig::FORMATS[idx];
            if format != c.format {
                c.format = format.to_string();
                c.output = ExtractConfig::default_output(format);
            }
            c.bitrate = prompt_text(theme, "Bitrate", &c.bitrate)?;
            c.output = prompt_text(theme, "Output file name", &c.output)?;
        }
        ToolConfig::Scale(c) => {
            c.input = prompt_text(theme, "Input file path", &c.input)?;
            c.width = prompt_text(theme, "Width (px)", &c.width)?;
            c.height = prompt_text(theme, "Height (px)", &c.height)?;
            c.maintain_aspect =
                prompt_bool(theme, "Maintain aspect ratio (height becomes -1)?", c.maintain_aspect)?;
            c.output = prompt_text(theme, "Output file name", &c.output)?;
        }
        ToolConfig::Gif(c) => {
            c.input = prompt_text(theme, "Input video path", &c.input)?;
            c.output = prompt_text(theme, "Output GIF", &c.output)?;
        }
        ToolConfig::AddAudio(c) => {
            c.video_input = prompt_text(theme, "Video input", &c.video_input)?;
            c.audio_input = prompt_text(theme, "Audio input", &c.audio_input)?;
            c.replace_original =
                prompt_bool(theme, "Replace the original audio (no = mix)?", c.replace_original)?;
            c.output = prompt_text(theme, "Output file name", &c.output)?;
        }
        ToolConfig::ExtractFrames(c) => {
            c.input = prompt_text(theme, "Input video path", &c.input)?;
            let modes = [FrameMode::Single, FrameMode::Sequence];
            let labels = modes.map(FrameMode::as_str);
            let idx = Select::with_theme(theme)
                .with_prompt("Mode")
                .items(&labels)
                .default(if c.mode == FrameMode::Single { 0 } else { 1 })
                .interact()?;
            c.mode = modes[idx];
            match c.mode {
                FrameMode::Single => {
                    c.timestamp = prompt_text(theme, "Timestamp (HH:MM:SS)", &c.timestamp)?
                }
                FrameMode::Sequence => c.fps = prompt_text(theme, "Frames per second", &c.fps)?,
            }
            c.output = prompt_text(theme, "Output image", &c.output)?;
        }
        ToolConfig::Crop(c) => {
            c.is_batch = prompt_bool(theme, "Batch: crop every .mp4 in the folder?", c.is_batch)?;
            if c.is_batch {
                c.cd_to_base = prompt_bool(theme, "cd into the base path first?", c.cd_to_base)?;
            } else {
                c.input = prompt_text(theme, "Input file path", &c.input)?;
            }
            c.width = prompt_text(theme, "Crop width", &c.width)?;
            c.height = prompt_text(theme, "Crop height", &c.height)?;
            c.x = prompt_text(theme, "X offset", &c.x)?;
            c.y = prompt_text(theme, "Y offset", &c.y)?;
            if !c.is_batch {
                c.output = prompt_text(theme, "Output file name", &c.output)?;
            }
        }
    }
    Ok(())
}

fn edit_stitch(theme: &ColorfulTheme, c: &mut StitchConfig) -> Result<()> {
    loop {
        let mut items: Vec<String> = c
            .files
            .iter()
            .enumerate()
            .map(|(idx, f)| format!("{}. {f}", idx + 1))
            .collect();
        let add = items.len();
        items.push("Add file".into());
        items.push("Remove file".into());
        items.push(format!("Output: {}", c.output));
        items.push("Done".into());

        let idx = Select::with_theme(theme)
            .with_prompt("Input files (select one to edit)")
            .items(&items)
            .default(add)
            .interact()?;

        if idx < add {
            c.files[idx] = prompt_text(theme, &format!("File {}", idx + 1), &c.files[idx])?;
        } else if idx == add {
            c.files.push(StitchConfig::placeholder(c.files.len()));
        } else if idx == add + 1 {
            if c.files.is_empty() {
                continue;
            }
            let which = Select::with_theme(theme)
                .with_prompt("Remove which file?")
                .items(&c.files)
                .default(c.files.len() - 1)
                .interact()?;
            c.files.remove(which);
        } else if idx == add + 2 {
            c.output = prompt_text(theme, "Output file name", &c.output)?;
        } else {
            return Ok(());
        }
    }
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str, current: &str) -> Result<String> {
    let raw: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(raw.trim().to_string())
}

fn prompt_bool(theme: &ColorfulTheme, prompt: &str, current: bool) -> Result<bool> {
    Ok(Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(current)
        .interact()?)
}
