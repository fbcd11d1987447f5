//! HTML pages rendered with minijinja; markdown bodies go through comrak

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

const PAGES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("results.html", include_str!("../templates/results.html")),
    ("stocks.html", include_str!("../templates/stocks.html")),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to load template '{name}': {detail}")]
    LoadFailed { name: &'static str, detail: String },

    #[error("Failed to render template '{name}': {detail}")]
    RenderFailed { name: String, detail: String },
}

/// Compiled page templates
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn load() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        for (name, source) in PAGES {
            env.add_template(name, source)
                .map_err(|e| TemplateError::LoadFailed {
                    name,
                    detail: e.to_string(),
                })?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, TemplateError> {
        let failed = |e: minijinja::Error| TemplateError::RenderFailed {
            name: name.to_string(),
            detail: e.to_string(),
        };
        self.env
            .get_template(name)
            .map_err(failed)?
            .render(context)
            .map_err(failed)
    }
}

/// Markdown to HTML with GitHub-style tables and autolinks
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = comrak::Options::default();
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.strikethrough = true;
    comrak::markdown_to_html(markdown, &options)
}
