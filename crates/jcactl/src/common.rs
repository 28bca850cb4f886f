use std::path::Path;

use anyhow::{Context, Result};
use jca_descriptors::{Descriptor, DescriptorParser, ParserOptions};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialise JSON output")?;
    println!("{text}");
    Ok(())
}

pub fn parser_options(no_expressions: bool) -> ParserOptions {
    ParserOptions {
        resolve_expressions: !no_expressions,
    }
}

pub fn load(path: &Path, options: ParserOptions) -> Result<Descriptor> {
    DescriptorParser::with_options(options)
        .parse_file(path)
        .with_context(|| format!("parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expressions_are_resolved_unless_disabled() {
        assert!(parser_options(false).resolve_expressions);
        assert!(!parser_options(true).resolve_expressions);
    }

    #[test]
    fn load_reports_the_path() {
        let err = load(Path::new("/nonexistent/x-ds.xml"), ParserOptions::default())
            .expect_err("missing file");
        assert!(format!("{err:#}").contains("/nonexistent/x-ds.xml"));
    }
}
