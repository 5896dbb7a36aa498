//! Field validation pipelines
//!
//! Validates one field of an input record at a time: presence checks on
//! the raw record, then a chain of type coercions, then a chain of rule
//! predicates. The first failure ends the pipeline.
//!
//! # Examples
//!
//! ## A single field
//!
//! ```
//! use fieldcheck_validation::{coerce, DataRequired, Length, RequestValidator};
//! use serde_json::json;
//!
//! let body = json!({"name": "nullcc"});
//! let name = RequestValidator::new(&body, "name")
//!     .presence(DataRequired::new().with_message("name is required"))
//!     .coerce(coerce::to_string)
//!     .rule(Length::between(6, 10))
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(name, "nullcc");
//! ```
//!
//! ## Telling failures apart
//!
//! ```
//! use fieldcheck_validation::{coerce, FieldError, GreaterThan, RequestValidator};
//! use serde_json::json;
//!
//! let body = json!({"num": "ten"});
//! let result = RequestValidator::new(&body, "num")
//!     .coerce(coerce::to_integer)
//!     .rule(GreaterThan::new(10))
//!     .run();
//!
//! match result {
//!     Err(FieldError::Coercion(e)) => assert!(e.to_string().contains("integer")),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! ## Formats
//!
//! ```
//! use fieldcheck_validation::{url_parts, Regexp, Rule};
//! use serde_json::json;
//!
//! assert!(Regexp::email().evaluate("email", &json!("nullcc@gmail.com")).is_ok());
//!
//! let parts = url_parts("ftp://host:21/path").unwrap();
//! assert_eq!((parts.host, parts.port), ("host", Some("21")));
//! ```

pub mod coerce;
mod errors;
mod patterns;
mod pipe;
mod presence;
mod traits;
mod validators;
pub mod value;

pub use errors::*;
pub use patterns::*;
pub use pipe::*;
pub use presence::*;
pub use traits::*;
pub use validators::*;
pub use value::Record;

pub use fieldcheck_config::{PresencePolicy, ValidationSettings};
