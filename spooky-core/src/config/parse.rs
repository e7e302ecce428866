//! Simple TOML parser for the demo configuration
//!
//! This is a minimal parser that handles only the subset needed for
//! `demo.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - Integer arrays: fallback = [200, 200, 200]
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or escape sequences
//! - Floats, booleans, datetimes
//! - Dotted keys and inline tables

use heapless::String;

use crate::canvas::PixelFormat;

use super::types::DemoConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Key is not known in its section
    UnknownKey,
    /// String value exceeds its capacity
    TooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Demo,
    Canvas,
    Display,
}

/// Parse TOML configuration into DemoConfig
///
/// Keys that are not present keep their default values. The result is
/// not validated; call [`DemoConfig::validate`] before using it.
pub fn parse_config(input: &str) -> Result<DemoConfig, ParseError> {
    let mut config = DemoConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line);
            if !header.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&header[1..header.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(&mut config, section, key, value)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "demo" => Ok(Section::Demo),
        "canvas" => Ok(Section::Canvas),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    config: &mut DemoConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Root, "version") => config.version = parse_int(value)?,

        (Section::Demo, "label") => config.demo.label = parse_heapless(value)?,
        (Section::Demo, "asset") => config.demo.asset = parse_heapless(value)?,
        (Section::Demo, "pixel_format") => {
            config.demo.pixel_format =
                PixelFormat::from_name(parse_string(value)?).ok_or(ParseError::InvalidValue)?
        }

        (Section::Canvas, "width") => config.canvas.width = parse_int(value)?,
        (Section::Canvas, "height") => config.canvas.height = parse_int(value)?,
        (Section::Canvas, "gap") => config.canvas.gap = parse_int(value)?,
        (Section::Canvas, "fallback") => config.canvas.fallback = parse_rgb(value)?,

        (Section::Display, "width") => config.display.width = parse_int(value)?,
        (Section::Display, "height") => config.display.height = parse_int(value)?,
        (Section::Display, "spi_hz") => config.display.spi_hz = parse_int(value)?,

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Remove a trailing `# comment` that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in value.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return value[..i].trim(),
            _ => {}
        }
    }
    value
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseError::InvalidValue)
    }
}

fn parse_heapless<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    let s = parse_string(value)?;
    String::try_from(s).map_err(|_| ParseError::TooLong)
}

/// Parse an integer, allowing `_` between digits as TOML does
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    if !value.contains('_') {
        return value.parse().map_err(|_| ParseError::InvalidValue);
    }

    let bytes = value.as_bytes();
    let mut digits: String<24> = String::new();
    for (i, ch) in value.char_indices() {
        if ch == '_' {
            let after_digit = i > 0 && bytes[i - 1].is_ascii_digit();
            let before_digit = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
            if !(after_digit && before_digit) {
                return Err(ParseError::InvalidValue);
            }
        } else {
            digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
        }
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_rgb(value: &str) -> Result<[u8; 3], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut rgb = [0u8; 3];
    let mut count = 0;
    for part in inner.split(',') {
        let part = part.trim();
        // Trailing comma
        if part.is_empty() {
            continue;
        }
        if count == rgb.len() {
            return Err(ParseError::InvalidValue);
        }
        rgb[count] = parse_int(part)?;
        count += 1;
    }

    if count != rgb.len() {
        return Err(ParseError::InvalidValue);
    }
    Ok(rgb)
}
