//! Comic Translator Common Library
//!
//! アノテーションの型、サイドカーJSONのコーデック、エクスポート整形

pub mod types;
pub mod codec;
pub mod report;
pub mod error;

pub use types::{AnnotationArea, AnnotationSet};
pub use codec::{decode_areas, decode_set, encode_areas, encode_set};
pub use report::{format_all, format_group, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
pub use error::{Error, Result};
