use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg} {pos} records ({per_sec})";

/// Small builder around indicatif so commands share one progress texture.
pub struct ProgressBuilder {
    template: &'static str,
    message: String,
}

impl ProgressBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            template: SPINNER_TEMPLATE,
            message: message.into(),
        }
    }

    pub fn with_template(mut self, template: &'static str) -> Self {
        self.template = template;
        self
    }

    pub fn build(self) -> Result<ProgressBar> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template(self.template)?);
        pb.set_message(self.message);
        pb.enable_steady_tick(Duration::from_millis(250));
        Ok(pb)
    }
}
