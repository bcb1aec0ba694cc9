//! CLI Output Formatting Module
//! Provides consistent, colorized output for terminal UX

use colored::Colorize;

pub struct CliFormatter;

impl CliFormatter {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }

    /// Print a failure message
    ///
    /// Goes to stdout: failures are part of the report, not program errors.
    pub fn failure(message: &str) {
        println!("{} {}", "✗".red().bold(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue().bold(), message);
    }

    /// Print a section header
    pub fn header(title: &str) {
        println!("\n{}", title.bright_cyan().bold());
        println!("{}", "─".repeat(title.chars().count()).bright_black());
    }

    /// Print a key-value pair
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", key.bright_white().bold(), value);
    }

    /// Print a key with its value on the following line
    pub fn kv_block(key: &str, value: &str) {
        println!("  {}:", key.bright_white().bold());
        for line in value.lines() {
            println!("    {}", line);
        }
    }

    /// Print a divider
    pub fn divider() {
        println!("{}", "─".repeat(60).bright_black());
    }

    /// Print an empty line
    pub fn blank() {
        println!();
    }
}

/// Format file size in human-readable format
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}

/// Describe a reported package size, adding a readable form when it is numeric
pub fn describe_size(reported: &str) -> String {
    match reported.parse::<u64>() {
        Ok(bytes) if bytes >= 1024 => format!("{} bytes ({})", bytes, format_size(bytes)),
        Ok(bytes) => format!("{} bytes", bytes),
        Err(_) => reported.to_string(),
    }
}
