pub mod article;
mod base;
pub mod selector;

pub use article::{Article, ArticleParser};
pub use base::Parser;
pub use selector::{FieldSelector, Record, SelectorSet};
