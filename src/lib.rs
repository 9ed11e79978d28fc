//! Langsniff: identify the programming language of a source snippet
//!
//! Detection is rule based: every supported language owns a list of weighted,
//! case-insensitive regular expressions. A filename extension, when mapped,
//! decides the language outright; otherwise the language whose rules score
//! highest wins.
//!
//! ```
//! use langsniff::{Detector, Profile};
//!
//! let detector = Detector::for_profile(Profile::Standard).expect("built-in table");
//! let result = detector.detect("SELECT id FROM users", None);
//! assert_eq!(result.language, "sql");
//! ```

pub mod cli;
pub mod config;
pub mod detect;
pub mod domain;
pub mod registry;
pub mod utils;

pub use detect::{ConfidencePolicy, Detector, Scoreboard};
pub use domain::{Config, DetectionResult, Profile};
pub use registry::{RegistryError, Rule, SignatureRegistry};
