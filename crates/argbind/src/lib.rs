//! Declarative command-line argument binding.
//!
//! Tag the fields of a struct, derive [`Bind`], and hand the command line to
//! [`bind`]. Instead of stopping at the first oddity, the binder classifies
//! what it saw into [`Results`]: ignored tokens, missing values, duplicates,
//! absent mandatory fields and values of the wrong type.
//!
//! # Example
//!
//! ```rust,ignore
//! use argbind::Bind;
//!
//! #[derive(Debug, Default, Bind)]
//! struct Config {
//!     #[bind("--cookie")]
//!     cookie: String,
//!     #[bind("--secure")]
//!     secure: bool,
//!     #[bind("--origins,-O,mandatory")]
//!     origins: [String; 2],
//!     #[bind(",-P,mandatory")]
//!     port: u16,
//!     #[bind("trailing")]
//!     config_files: Vec<String>,
//! }
//!
//! let mut config = Config { secure: true, ..Default::default() };
//! let results = argbind::bind(&["-P", "8080", "--no-secure", "cfg.json"], &mut config)?;
//! if results.has_warnings() {
//!     eprintln!("ignored: {:?}", results.ignored);
//! }
//! ```
//!
//! # Tags
//!
//! - `longname[,X][,mandatory]` registers `--longname` (and `-X`)
//! - `longname,mandatory`
//! - `,X[,mandatory]` registers only `-X`
//! - `trailing` receives the final run of loose tokens (string fields only)
//!
//! Boolean fields with a long name also answer to `--no-longname`.

mod binder;
mod binding;
mod coerce;
mod error;
mod matcher;
mod results;
mod tag;
mod value;

pub use binder::{Binder, bind};
pub use binding::{Bind, FieldBinding, Writer};
pub use coerce::coerce;
pub use error::{Error, ErrorKind, Failure};
pub use results::Results;
pub use value::{BindValue, Element, Value, ValueError, ValueKind, assign};

pub use argbind_derive::Bind;
