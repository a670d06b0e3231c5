//! Utility functions for formatting status text and captions

use std::time::Duration;

use fetch::{Progress, TransferStats};

use crate::constants::{emoji, PROGRESS_BAR_WIDTH};

/// Format file size in human-readable format
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes = bytes as f64;
    let unit_index = (bytes.ln() / 1024_f64.ln()).floor() as usize;
    let unit_index = unit_index.min(UNITS.len() - 1);

    let size = bytes / 1024_f64.powi(unit_index as i32);
    format!("{:.2} {}", size, UNITS[unit_index])
}

/// Format speed (bytes/sec) in human-readable format
pub fn format_speed(bytes_per_sec: f64) -> String {
    if !bytes_per_sec.is_finite() || bytes_per_sec < 1.0 {
        return "0 B/s".to_string();
    }

    const UNITS: [&str; 4] = ["B/s", "KB/s", "MB/s", "GB/s"];
    let unit_index = (bytes_per_sec.ln() / 1024_f64.ln()).floor() as usize;
    let unit_index = unit_index.min(UNITS.len() - 1);

    let value = bytes_per_sec / 1024_f64.powi(unit_index as i32);
    format!("{:.2} {}", value, UNITS[unit_index])
}

/// Format elapsed wall-clock time
///
/// Below one minute the fraction is kept so the value agrees with the
/// speed computed from the same duration.
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    if seconds < 60 {
        return format!("{:.1}s", elapsed.as_secs_f64());
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, secs)
    }
}

/// Render a fixed-width progress bar for `percent` (0-100)
pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * PROGRESS_BAR_WIDTH as f64).floor() as usize;
    let filled = filled.min(PROGRESS_BAR_WIDTH);
    format!("{}{}", "▓".repeat(filled), "░".repeat(PROGRESS_BAR_WIDTH - filled))
}

/// Status text shown while a download is running
pub fn format_progress(filename: &str, progress: &Progress) -> String {
    match (progress.percent(), progress.total) {
        (Some(percent), Some(total)) => format!(
            "{} Downloading...\nFile: {}\nProgress: {:.1}%\n[{}]\n{} / {}",
            emoji::DOWNLOAD,
            filename,
            percent,
            progress_bar(percent),
            format_size(progress.downloaded),
            format_size(total)
        ),
        _ => format!(
            "{} Downloading...\nFile: {}\nDownloaded: {}",
            emoji::DOWNLOAD,
            filename,
            format_size(progress.downloaded)
        ),
    }
}

/// Status text shown once headers are in and streaming is about to start
pub fn format_file_info(filename: &str, size: Option<u64>, content_type: Option<&str>) -> String {
    let size = size.map(format_size).unwrap_or_else(|| "Unknown".to_string());
    let file_type = content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .unwrap_or("Unknown");

    format!(
        "{} File Info\nName: {}\nSize: {}\nType: {}\n\n{} Starting download...",
        emoji::FILE,
        filename,
        size,
        file_type,
        emoji::DOWNLOAD
    )
}

/// Caption attached to the relayed file
pub fn build_caption(filename: &str, stats: &TransferStats) -> String {
    format!(
        "{} {}\n{} Size: {}\n{} Time: {}\n{} Speed: {}",
        emoji::FOLDER,
        filename,
        emoji::SIZE,
        format_size(stats.bytes),
        emoji::TIME,
        format_elapsed(stats.elapsed),
        emoji::SPEED,
        format_speed(stats.average_speed())
    )
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512.00 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(format_size(50 * 1024 * 1024), "50.00 MB");
        assert_eq!(format_size(1073741824), "1.00 GB");
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(0.0), "0 B/s");
        assert_eq!(format_speed(f64::INFINITY), "0 B/s");
        assert_eq!(format_speed(512.0), "512.00 B/s");
        assert_eq!(format_speed(1024.0), "1.00 KB/s");
        assert_eq!(format_speed(524288.0), "512.00 KB/s");
        assert_eq!(format_speed(1048576.0), "1.00 MB/s");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "0.0s");
        assert_eq!(format_elapsed(Duration::from_millis(400)), "0.4s");
        assert_eq!(format_elapsed(Duration::from_secs(2)), "2.0s");
        assert_eq!(format_elapsed(Duration::from_millis(2700)), "2.7s");
        assert_eq!(format_elapsed(Duration::from_millis(59_900)), "59.9s");
        assert_eq!(format_elapsed(Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_elapsed(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_elapsed(Duration::from_secs(3661)), "1h 1m");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0), "░".repeat(20));
        assert_eq!(progress_bar(100.0), "▓".repeat(20));
        assert_eq!(progress_bar(250.0), "▓".repeat(20));
        assert_eq!(progress_bar(50.0), format!("{}{}", "▓".repeat(10), "░".repeat(10)));
        assert_eq!(progress_bar(7.0), format!("{}{}", "▓", "░".repeat(19)));
    }

    #[test]
    fn test_format_progress() {
        let known = Progress { downloaded: 512 * 1024, total: Some(1024 * 1024) };
        let text = format_progress("file.zip", &known);
        assert!(text.contains("Progress: 50.0%"));
        assert!(text.contains("512.00 KB / 1.00 MB"));

        let unknown = Progress { downloaded: 2048, total: None };
        let text = format_progress("file.zip", &unknown);
        assert!(text.contains("Downloaded: 2.00 KB"));
        assert!(!text.contains('%'));
    }

    #[test]
    fn test_format_file_info() {
        let text = format_file_info("a.pdf", Some(1024), Some("application/pdf; charset=binary"));
        assert!(text.contains("Name: a.pdf"));
        assert!(text.contains("Size: 1.00 KB"));
        assert!(text.contains("Type: application/pdf\n"));

        let text = format_file_info("a.bin", None, None);
        assert!(text.contains("Size: Unknown"));
        assert!(text.contains("Type: Unknown"));
    }

    #[test]
    fn test_build_caption_example() {
        let stats = TransferStats::new(1_048_576, Duration::from_secs(2));
        let caption = build_caption("file.pdf", &stats);
        assert!(caption.contains("file.pdf"));
        assert!(caption.contains("Size: 1.00 MB"));
        assert!(caption.contains("Time: 2.0s"));
        assert!(caption.contains("Speed: 512.00 KB/s"));
    }

    #[test]
    fn test_build_caption_fractional_seconds() {
        let stats = TransferStats::new(1_048_576, Duration::from_millis(1900));
        let caption = build_caption("file.pdf", &stats);
        assert!(caption.contains("Time: 1.9s"));
        assert!(caption.contains("Speed: 538.95 KB/s"));
    }

    #[test]
    fn test_build_caption_instant_transfer() {
        let stats = TransferStats::new(10, Duration::ZERO);
        let caption = build_caption("tiny.txt", &stats);
        assert!(caption.contains("Speed: 9.77 KB/s"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("ééééé", 3), "éé…");
    }
}
