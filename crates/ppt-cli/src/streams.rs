use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ppt_decoder::MemoryStreams;
use tracing::debug;

use crate::PresentationArgs;

pub fn read(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    debug!(path = %path.display(), len = bytes.len(), "read stream");
    Ok(bytes)
}

/// Load both stream files into a [`MemoryStreams`].
pub fn load(args: &PresentationArgs) -> Result<MemoryStreams> {
    Ok(MemoryStreams::presentation(
        read(&args.current_user)?,
        read(&args.document)?,
    ))
}
