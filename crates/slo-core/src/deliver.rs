//! Delivery of rendered exports to their destination.

use crate::error::Result;
use crate::export::Rendered;
use crate::io::atomic_write;
use std::path::PathBuf;

/// A destination for rendered exports. Failures propagate to the caller;
/// implementations do not retry.
pub trait Delivery {
    fn deliver_text(&self, filename: &str, content: &str) -> Result<()>;
    fn deliver_bytes(&self, filename: &str, content: &[u8]) -> Result<()>;

    fn deliver(&self, filename: &str, rendered: &Rendered) -> Result<()> {
        match rendered {
            Rendered::Text(text) => self.deliver_text(filename, text),
            Rendered::Binary(bytes) => self.deliver_bytes(filename, bytes),
        }
    }
}

/// Writes each export into `out_dir`, creating it on first use.
#[derive(Debug, Clone)]
pub struct FsDelivery {
    out_dir: PathBuf,
}

impl FsDelivery {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.out_dir.join(filename)
    }
}

impl Delivery for FsDelivery {
    fn deliver_text(&self, filename: &str, content: &str) -> Result<()> {
        self.deliver_bytes(filename, content.as_bytes())
    }

    fn deliver_bytes(&self, filename: &str, content: &[u8]) -> Result<()> {
        let path = self.path_for(filename);
        atomic_write(&path, content)?;
        tracing::info!(path = %path.display(), bytes = content.len(), "wrote export");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
