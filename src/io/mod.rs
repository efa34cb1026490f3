pub mod capture;
pub mod har;
pub mod http;
pub mod output;
pub mod source;
pub mod writers;

pub use capture::CaptureFile;
pub use har::HarFile;
pub use source::{open_source, InputFormat, TransactionSource, Transactions};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
