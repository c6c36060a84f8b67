//! Per-call options.
//!
//! Every operation that accepts options takes an explicit struct listing
//! exactly the options it recognizes, each with a defined default:
//! - Encoding modes are a closed [`Binmode`] enumeration
//! - Option documents in YAML reject unknown keys
//! - Values are checked by [`OptionsValidator`]
//!
//! # Examples
//!
//! Building options in code:
//!
//! ```
//! use tidypath::config::{Binmode, LinesOptions};
//!
//! let options = LinesOptions::default()
//!     .with_binmode(Binmode::Utf8)
//!     .with_count(10)
//!     .with_chomp(true);
//! assert_eq!(options.count, Some(10));
//! ```
//!
//! Loading options from YAML:
//!
//! ```
//! use tidypath::config::{OptionsLoader, TempOptions};
//!
//! let options: TempOptions = OptionsLoader::from_yaml("TEMPLATE: job-XXXXXX\nTMPDIR: true").unwrap();
//! assert_eq!(options.template.as_deref(), Some("job-XXXXXX"));
//!
//! // unknown keys are an error, not silently ignored
//! assert!(OptionsLoader::from_yaml::<TempOptions>("TEMPLTE: job-XXXXXX").is_err());
//! ```

pub mod binmode;
pub mod environment;
pub mod loader;
pub mod schema;
pub mod validator;

// Re-export key types at module root
pub use binmode::Binmode;
pub use environment::EnvironmentConfig;
pub use loader::OptionsLoader;
pub use schema::{
    AppendOptions, IterOptions, LinesOptions, MkpathOptions, ReadOptions, TempOptions,
    TreeOptions, WriteOptions,
};
pub use validator::{OptionsValidator, Validate};
