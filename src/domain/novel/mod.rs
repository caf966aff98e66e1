//! Novel Context - 章节标识上下文

mod value_objects;

pub use value_objects::{AgeRating, ChapterKey, BONUS_PART};
