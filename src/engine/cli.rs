//! otacheck CLI Module
//! Terminal report for a single firmware check

pub mod formatter;

use crate::engine::config::DeviceIdentity;
use crate::engine::updater::{PackageDescriptor, QueryOutcome};
use formatter::{describe_size, CliFormatter};

const NOT_PROVIDED: &str = "N/A";
const NO_UPDATE_MESSAGE: &str = "No new firmware version detected, or the query failed.";

/// Print the banner shown before the check runs
pub fn print_banner(device: &DeviceIdentity) {
    CliFormatter::header("OTA firmware update check");
    CliFormatter::kv("Device model", &device.model);
    CliFormatter::kv("Current firmware", &device.firmware_version);
}

/// Print the result of a check
///
/// Every failure collapses into one message; the log carries the detail.
pub fn print_report(outcome: &QueryOutcome) {
    CliFormatter::blank();
    CliFormatter::divider();
    match outcome.package() {
        Some(package) => {
            CliFormatter::success("New firmware version detected!");
            CliFormatter::blank();
            for (key, value) in package_lines(package) {
                if value.contains('\n') || key == "Download URL" {
                    CliFormatter::kv_block(key, &value);
                } else {
                    CliFormatter::kv(key, &value);
                }
            }
        }
        None => {
            CliFormatter::failure(NO_UPDATE_MESSAGE);
            CliFormatter::info("Check the network connection and the device identity settings.");
        }
    }
    CliFormatter::divider();
}

/// Labelled report lines for an available package
fn package_lines(package: &PackageDescriptor) -> Vec<(&'static str, String)> {
    let mut lines = vec![
        ("Version", package.version.as_deref().unwrap_or(NOT_PROVIDED).to_string()),
        (
            "Size",
            package
                .size
                .as_deref()
                .map(describe_size)
                .unwrap_or_else(|| NOT_PROVIDED.to_string()),
        ),
        (
            "Download URL",
            package
                .url
                .as_deref()
                .unwrap_or("No download link provided")
                .to_string(),
        ),
        ("SHA256", package.checksum.as_deref().unwrap_or(NOT_PROVIDED).to_string()),
    ];
    if let Some(base_version) = &package.base_version {
        lines.push(("Updates from", base_version.clone()));
    }
    lines.push(("Release note", package.release_note.clone()));
    lines
}
