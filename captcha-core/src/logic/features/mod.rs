//! Features Module - behavioral sample schema and validation
//!
//! `layout` fixes the column order shared with the classifier,
//! `vector` holds one validated sample, `validate` builds it from
//! untrusted input.

pub mod layout;
pub mod validate;
pub mod vector;


// Re-export common types
pub use layout::{LayoutInfo, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use validate::FeatureError;
pub use vector::FeatureVector;
