//! Template stores.

mod layered;

pub use layered::LayeredTemplateStore;
