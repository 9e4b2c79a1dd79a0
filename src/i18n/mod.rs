//! Internationalization (i18n) for the three site languages.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages and their metadata
//! - `language`: Validated `Language` type
//! - `strings`: Interface strings owned by the site (labels, errors, form texts)
//! - `resolver`: Picks the best translation of a `{field}_{lang}` CMS field
//!
//! # Example
//!
//! ```rust,ignore
//! use institute_site::i18n::{Language, Localizer};
//!
//! let localizer = Localizer::new(Language::from_code("ru")?);
//! let title = localizer.text(&record, "title");
//! ```

mod language;
mod registry;
mod resolver;
mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use resolver::{resolve, Localizer};
pub use strings::LanguageStrings;
