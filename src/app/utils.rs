// SPDX-License-Identifier: MPL-2.0

//! Utility functions for argument parsing

/// Parse resolution string in format "WIDTHxHEIGHT"
pub fn parse_resolution(resolution_str: &str) -> Option<(u32, u32)> {
    let (width, height) = resolution_str.trim().split_once(['x', 'X'])?;
    match (width.parse::<u32>(), height.parse::<u32>()) {
        (Ok(width), Ok(height)) if width > 0 && height > 0 => Some((width, height)),
        _ => None,
    }
}

/// Whether a recipient has any digit to build a direct link from
pub fn has_phone_digits(recipient: &str) -> bool {
    recipient.chars().any(|c| c.is_ascii_digit())
}
