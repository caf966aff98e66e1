//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod archive;
pub mod converter;

pub use archive::DisabledArchiveExpander;
pub use converter::PlainTextConverter;
