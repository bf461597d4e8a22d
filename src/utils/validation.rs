use crate::utils::error::{MirrorError, Result};
use std::collections::HashSet;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MirrorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MirrorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Paths that are joined under a root must not escape it.
pub fn validate_relative_path(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    let p = Path::new(path);
    if p.is_absolute() || p.components().any(|c| c.as_os_str() == "..") {
        return Err(MirrorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path must be relative and stay inside its root".to_string(),
        });
    }

    Ok(())
}

/// A single path component: no separators, not `.` or `..`.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;
    validate_path(field_name, name)?;

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(MirrorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Must be a plain file or directory name".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MirrorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(MirrorError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("src", "/tmp/project").is_ok());
        assert!(validate_path("src", "").is_err());
        assert!(validate_path("src", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_relative_path() {
        assert!(validate_relative_path("source", "data/converted/x.jpg").is_ok());
        assert!(validate_relative_path("source", "/etc/passwd").is_err());
        assert!(validate_relative_path("source", "../outside.jpg").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("left", "IMG_1491.jpg").is_ok());
        assert!(validate_file_name("left", "sub/IMG_1491.jpg").is_err());
        assert!(validate_file_name("left", "..").is_err());
        assert!(validate_file_name("left", "  ").is_err());
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("tag", ["a", "b"]).is_ok());
        assert!(validate_unique("tag", ["a", "b", "a"]).is_err());
    }
}
