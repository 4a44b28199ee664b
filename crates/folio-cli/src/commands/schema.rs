use folio_core::SourceProject;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `folio schema`: print the JSON Schema of one export record.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schemars::schema_for!(SourceProject);
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output(&schema, format)
}
