use tera::Tera;

/// Tera-backed template engine holding inline prompt templates.
pub struct TeraEngine {
    tera: Tera,
}

impl TeraEngine {
    /// Create with no templates registered.
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            tera: Tera::default(),
        })
    }

    /// Register a template from a string, replacing any with the same name.
    pub fn add_template(&mut self, name: &str, content: &str) -> anyhow::Result<()> {
        self.tera.add_raw_template(name, content)?;
        Ok(())
    }

    /// Render a named template with the given context.
    pub fn render(&self, template_name: &str, context: &tera::Context) -> anyhow::Result<String> {
        let rendered = self.tera.render(template_name, context)?;
        Ok(rendered)
    }
}
