//! Loading option documents.
//!
//! Options can be kept in YAML, for example alongside other configuration.
//! A document is parsed into one of the option structs, rejecting unknown
//! keys, and then validated.

use std::fs;

use serde::de::DeserializeOwned;

use crate::config::validator::Validate;
use crate::error::{Error, Result};
use crate::path::PathValue;

/// Loads option structs from YAML.
///
/// # Examples
///
/// ```
/// use tidypath::config::OptionsLoader;
/// use tidypath::{Binmode, LinesOptions};
///
/// let options: LinesOptions = OptionsLoader::from_yaml("count: 2\nbinmode: ':raw'").unwrap();
/// assert_eq!(options.count, Some(2));
/// assert_eq!(options.binmode, Binmode::Raw);
///
/// let empty: LinesOptions = OptionsLoader::from_yaml("").unwrap();
/// assert_eq!(empty, LinesOptions::default());
/// ```
pub struct OptionsLoader;

impl OptionsLoader {
    /// Parse and validate a YAML options document.
    ///
    /// An empty or blank document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Options`] if the YAML is malformed or has unknown
    /// keys, and [`Error::InvalidArgument`] if a value fails validation.
    pub fn from_yaml<T>(contents: &str) -> Result<T>
    where
        T: DeserializeOwned + Default + Validate,
    {
        let options: T = if contents.trim().is_empty() {
            T::default()
        } else {
            serde_yaml::from_str(contents)?
        };
        options.validate()?;
        Ok(options)
    }

    /// Read, parse and validate a YAML options file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the file does not exist, plus every
    /// error [`OptionsLoader::from_yaml`] can return.
    pub fn load_file<T>(path: &PathValue) -> Result<T>
    where
        T: DeserializeOwned + Default + Validate,
    {
        let contents = fs::read_to_string(path.as_std_path())
            .map_err(|e| Error::from_lookup("open", path, e))?;
        Self::from_yaml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{IterOptions, TempOptions, TreeOptions};
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_document() {
        let options: IterOptions =
            OptionsLoader::from_yaml("recurse: true\nfollow_symlinks: true\n").unwrap();
        assert!(options.recurse);
        assert!(options.follow_symlinks);
    }

    #[test]
    fn test_blank_document_is_default() {
        let options: TreeOptions = OptionsLoader::from_yaml("  \n").unwrap();
        assert_eq!(options, TreeOptions::default());
    }

    #[test]
    fn test_unknown_key_is_options_error() {
        let result: Result<TreeOptions> = OptionsLoader::from_yaml("sfae: false");
        assert!(matches!(result, Err(Error::Options(_))));
    }

    #[test]
    fn test_invalid_value_is_invalid_argument() {
        let result: Result<TempOptions> = OptionsLoader::from_yaml("template: abc");
        assert!(result.unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("iter.yaml");
        std::fs::write(&file, "recurse: true\n").unwrap();

        let path = PathValue::try_from(file.as_path()).unwrap();
        let options: IterOptions = OptionsLoader::load_file(&path).unwrap();
        assert!(options.recurse);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = PathValue::try_from(temp_dir.path()).unwrap().child(["missing.yaml"]);
        let result: Result<IterOptions> = OptionsLoader::load_file(&path);
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
