//! Option validation.
//!
//! Deserialization already rejects unknown fields and malformed values. This
//! module checks the rules that span a value's content, such as the shape
//! of a temp name template.

use crate::config::schema::{
    AppendOptions, IterOptions, LinesOptions, MkpathOptions, ReadOptions, TempOptions,
    TreeOptions, WriteOptions,
};
use crate::error::{Error, Result};

/// Minimum number of trailing `X` characters in a temp name template.
pub const MIN_TEMPLATE_XS: usize = 4;

/// Validates option values.
///
/// # Examples
///
/// ```
/// use tidypath::config::OptionsValidator;
/// use tidypath::{LinesOptions, TempOptions};
///
/// OptionsValidator::validate_lines(&LinesOptions::default().with_count(1)).unwrap();
/// assert!(OptionsValidator::validate_lines(&LinesOptions::default().with_count(0)).is_err());
///
/// let bad = TempOptions::default().with_template("tooshort-XX");
/// assert!(OptionsValidator::validate_temp(&bad).is_err());
/// ```
pub struct OptionsValidator;

impl OptionsValidator {
    /// Validate line-reading options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `count` is zero.
    pub fn validate_lines(options: &LinesOptions) -> Result<()> {
        if options.count == Some(0) {
            return Err(Self::invalid("count", "must be a positive integer"));
        }
        Ok(())
    }

    /// Validate temp resource options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the template has fewer than four
    /// trailing `X` characters, or if the template or suffix contains a path
    /// separator.
    pub fn validate_temp(options: &TempOptions) -> Result<()> {
        if let Some(ref template) = options.template {
            Self::validate_name_part("template", template)?;

            let xs = template.chars().rev().take_while(|&c| c == 'X').count();
            if xs < MIN_TEMPLATE_XS {
                return Err(Self::invalid(
                    "template",
                    &format!("needs at least {MIN_TEMPLATE_XS} trailing 'X' characters"),
                ));
            }
        }

        if let Some(ref suffix) = options.suffix {
            Self::validate_name_part("suffix", suffix)?;
        }

        Ok(())
    }

    /// Check that part of a file name cannot escape its directory.
    fn validate_name_part(field: &str, value: &str) -> Result<()> {
        if value.contains('/') || value.contains('\\') {
            return Err(Self::invalid(field, "cannot contain a path separator"));
        }
        if value.contains('\0') {
            return Err(Self::invalid(field, "cannot contain null bytes"));
        }
        Ok(())
    }

    fn invalid(field: &str, message: &str) -> Error {
        Error::invalid(format!("{field}: {message}"))
    }
}

/// Option types that can check their own values.
pub trait Validate {
    /// Check the option values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] describing the first bad value.
    fn validate(&self) -> Result<()>;
}

impl Validate for LinesOptions {
    fn validate(&self) -> Result<()> {
        OptionsValidator::validate_lines(self)
    }
}

impl Validate for TempOptions {
    fn validate(&self) -> Result<()> {
        OptionsValidator::validate_temp(self)
    }
}

// Every value of these is valid once it deserializes
macro_rules! always_valid {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Validate for $ty {
                fn validate(&self) -> Result<()> {
                    Ok(())
                }
            }
        )*
    };
}

always_valid!(
    ReadOptions,
    WriteOptions,
    AppendOptions,
    IterOptions,
    TreeOptions,
    MkpathOptions,
);
