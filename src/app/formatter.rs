use crate::app::error::Interrupted;
use crate::app::scanner::to_slash;
use anyhow::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

const RULE_WIDTH: usize = 80;

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn generate_tree(lines: &[String]) -> String {
        lines.join("\n")
    }

    /// Writes one delimited block per file, in order. Files that cannot be
    /// read get an inline error marker instead of content.
    pub fn write_bundle<W: Write>(
        root: &Path,
        files: &[PathBuf],
        out: &mut W,
        interrupt: &AtomicBool,
    ) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);

        for rel in files {
            if interrupt.load(Ordering::SeqCst) {
                return Err(Interrupted.into());
            }

            write!(out, "\n\n{}\nFILE: {}\n{}\n", rule, to_slash(rel), rule)?;

            match read_regular(&root.join(rel)) {
                Ok(bytes) => out.write_all(String::from_utf8_lossy(&bytes).as_bytes())?,
                Err(e) => {
                    log::warn!("Failed to read {}: {}", rel.display(), e);
                    writeln!(out, "[ERROR READING FILE: {}]", e)?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }
}

/// Reads a file's bytes, refusing fifos, sockets and devices, which may
/// block or never end.
fn read_regular(path: &Path) -> io::Result<Vec<u8>> {
    if !fs::metadata(path)?.is_file() {
        return Err(io::Error::new(io::ErrorKind::Other, "not a regular file"));
    }
    fs::read(path)
}
