// Presentation: the engine never formats text, this module does.

pub mod export;
pub mod text;

use crate::core::engine::Evaluation;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render(evaluation: &Evaluation, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_report(evaluation)),
        OutputFormat::Json => export::to_json(evaluation),
        OutputFormat::Csv => export::to_csv(evaluation),
    }
}
