use std::path::PathBuf;

use anyhow::{bail, Result};
use jca_descriptors::ParserOptions;
use tracing::warn;

use crate::common;

pub fn run(files: &[PathBuf], options: ParserOptions) -> Result<()> {
    let mut failed = 0usize;
    for path in files {
        match common::load(path, options) {
            Ok(descriptor) => println!("ok {} ({})", path.display(), descriptor.dialect()),
            Err(err) => {
                warn!(path = %path.display(), "descriptor rejected");
                println!("FAIL {}: {err:#}", path.display());
                failed += 1;
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} descriptors failed", files.len());
    }
    Ok(())
}
