//! Handler configuration read from the function's environment.

use std::str::FromStr;

use resizer_core::ResizeSettings;
use thiserror::Error;

use crate::storage::MIN_PART_SIZE;

pub const RESIZER_MAX_WIDTH: &str = "RESIZER_MAX_WIDTH";
pub const RESIZER_SUFFIX: &str = "RESIZER_SUFFIX";
pub const RESIZER_JPEG_QUALITY: &str = "RESIZER_JPEG_QUALITY";
pub const RESIZER_PART_SIZE: &str = "RESIZER_PART_SIZE";

/// Multipart chunk size for uploads (10 MiB).
pub const DEFAULT_PART_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`{name}` must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandlerConfig {
    pub settings: ResizeSettings,
    /// Upload part size in bytes.
    pub part_size: usize,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            settings: ResizeSettings::default(),
            part_size: DEFAULT_PART_SIZE,
        }
    }
}

impl HandlerConfig {
    /// Read configuration from process environment variables. Unset
    /// variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = ResizeSettings::default();

        if let Some(value) = lookup(RESIZER_MAX_WIDTH) {
            settings = settings.with_max_width(parse_var(
                RESIZER_MAX_WIDTH,
                &value,
                "a positive integer",
                |&w: &u32| w > 0,
            )?);
        }

        if let Some(value) = lookup(RESIZER_SUFFIX) {
            let suffix = value.trim();
            if suffix.is_empty() || suffix.contains('/') {
                return Err(invalid(RESIZER_SUFFIX, &value, "a non-empty name without '/'"));
            }
            settings = settings.with_resized_suffix(suffix);
        }

        if let Some(value) = lookup(RESIZER_JPEG_QUALITY) {
            settings = settings.with_jpeg_quality(parse_var(
                RESIZER_JPEG_QUALITY,
                &value,
                "1-100",
                |q: &u8| (1..=100).contains(q),
            )?);
        }

        let part_size = match lookup(RESIZER_PART_SIZE) {
            Some(value) => parse_var(RESIZER_PART_SIZE, &value, "at least 5 MiB", |&size: &usize| {
                size >= MIN_PART_SIZE
            })?,
            None => DEFAULT_PART_SIZE,
        };

        Ok(Self {
            settings,
            part_size,
        })
    }
}

fn parse_var<T, F>(
    name: &'static str,
    value: &str,
    expected: &'static str,
    valid: F,
) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&T) -> bool,
{
    value
        .trim()
        .parse()
        .ok()
        .filter(valid)
        .ok_or_else(|| invalid(name, value, expected))
}

fn invalid(name: &'static str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        expected,
    }
}
