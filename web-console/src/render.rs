//! Page rendering.
//!
//! Templates are embedded at compile time. The environment's formatter
//! passes every interpolated value through [`escape_text`] unless a
//! template marks it `|safe`, so region state never reaches the page as
//! markup.

use minijinja::{context, Environment, Error, ErrorKind, Output, State, Value};

use common::errors::{AppError, AppResult};
use common::utils::escape_text;

use crate::view::{MessagePanel, PageView, ResultPanel};

const TEMPLATES: [(&str, &str); 3] = [
    ("index.html", include_str!("../templates/index.html")),
    ("result.html", include_str!("../templates/result.html")),
    ("messages.html", include_str!("../templates/messages.html")),
];

/// Renders the console page and its regions.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Builds the template environment.
    ///
    /// # Errors
    /// Returns `AppError::Template` if an embedded template fails to parse.
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        env.set_formatter(escaping_formatter);
        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| AppError::Template(format!("{}: {}", name, e)))?;
        }
        Ok(Self { env })
    }

    /// Renders the full page.
    ///
    /// The two regions are rendered (and escaped) on their own, then embedded
    /// as safe strings.
    pub fn render_page(&self, page: &PageView) -> AppResult<String> {
        let result_region = self.render_result(&page.result)?;
        let messages_region = self.render_messages(&page.messages)?;
        self.render(
            "index.html",
            context! {
                result_region => Value::from_safe_string(result_region),
                messages_region => Value::from_safe_string(messages_region),
                input => &page.input,
            },
        )
    }

    fn render_result(&self, panel: &ResultPanel) -> AppResult<String> {
        self.render(
            "result.html",
            context! { result => panel, result_class => panel.css_class() },
        )
    }

    fn render_messages(&self, panel: &MessagePanel) -> AppResult<String> {
        self.render("messages.html", context! { messages => panel })
    }

    fn render(&self, name: &str, ctx: Value) -> AppResult<String> {
        self.env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(ctx))
            .map_err(|e| AppError::Template(format!("{}: {}", name, e)))
    }
}

fn escaping_formatter(out: &mut Output<'_>, _state: &State<'_, '_>, value: &Value) -> Result<(), Error> {
    let text = if value.is_undefined() || value.is_none() {
        String::new()
    } else if value.is_safe() {
        value.to_string()
    } else {
        escape_text(&value.to_string())
    };
    out.write_str(&text)
        .map_err(|_| Error::new(ErrorKind::WriteFailure, "failed to write template output"))
}
