//! Handlebars renderer.
//!
//! HTML escaping is disabled: templates produce source code and SQL, where
//! `<` and `&` are meaningful.

use handlebars::Handlebars;
use tracing::instrument;

use modelsmith_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::RenderContext,
    error::SmithResult,
};

pub struct HandlebarsRenderer {
    handlebars: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Fail on variables the context does not define.
    pub fn strict(mut self) -> Self {
        self.handlebars.set_strict_mode(true);
        self
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    #[instrument(skip_all, fields(variables = context.len()))]
    fn render(&self, source: &str, context: &RenderContext) -> SmithResult<String> {
        self.handlebars
            .render_template(source, &context.to_json())
            .map_err(|e| {
                ApplicationError::RenderingFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}
