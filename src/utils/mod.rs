use std::path::Path;

use crate::Result;

/// Check whether a filename carries one of the accepted audio extensions.
pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
    let Some((_, extension)) = filename.rsplit_once('.') else {
        return false;
    };

    let extension = extension.to_lowercase();
    allowed.iter().any(|a| a.to_lowercase() == extension)
}

/// Format a duration in seconds as `M:SS` or `H:MM:SS`.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "Unknown".to_string();
    }

    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format a byte count as a human-readable size.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }

    format!("{:.1} TB", size)
}

/// Sanitize a filename for safe filesystem usage.
///
/// Keeps alphanumerics, spaces, hyphens, underscores, and dots; everything
/// else becomes an underscore.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Generate a filename that doesn't collide with anything in `directory`,
/// probing `base_1`, `base_2`, ... until a free slot is found.
pub fn generate_unique_filename(base_name: &str, extension: &str, directory: &Path) -> Result<String> {
    let filename = format!("{}.{}", base_name, extension);
    if !directory.join(&filename).exists() {
        return Ok(filename);
    }

    for counter in 1..=1000u32 {
        let filename = format!("{}_{}.{}", base_name, counter, extension);
        if !directory.join(&filename).exists() {
            return Ok(filename);
        }
    }

    anyhow::bail!("Could not generate unique filename for {}", base_name)
}

/// Check if the current environment has the external tools the surrounding
/// transcode workflow relies on. Missing tools are reported, never fatal.
pub async fn check_dependencies() -> Vec<String> {
    let mut missing = Vec::new();

    if !check_command_available("ffmpeg").await {
        missing.push("ffmpeg - required by the transcode step".to_string());
    }

    if !check_command_available("ffprobe").await {
        missing.push("ffprobe - required for audio file analysis".to_string());
    }

    missing
}

/// Check if a command is available in PATH
async fn check_command_available(command: &str) -> bool {
    use tokio::process::Command;

    Command::new(command)
        .arg("-version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}
