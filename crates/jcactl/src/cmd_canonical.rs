use std::path::Path;

use anyhow::Result;
use jca_descriptors::{ParserOptions, ToXml};

use crate::common;

pub fn run(path: &Path, options: ParserOptions) -> Result<()> {
    let descriptor = common::load(path, options)?;
    print!("{}", descriptor.to_canonical_xml());
    Ok(())
}
