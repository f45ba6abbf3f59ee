use std::path::Path;
use unic_langid::LanguageIdentifier;

/// Validate file path exists and is readable
pub fn validate_file_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("File does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Path is not a file: {}", path.display()));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        return Err(format!("Cannot create output directory: {}", e));
    }

    Ok(())
}

/// Validate language code format as a BCP 47 identifier
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    match lang.parse::<LanguageIdentifier>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )),
    }
}
