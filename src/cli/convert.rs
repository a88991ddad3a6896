//! Convert an Obsidian vault into Hugo site content.

use std::path::Path;

use crate::error::Error;
use crate::sync::{SyncReport, Synchronizer};

/// Run the convert command.
pub fn run(obsidian_path: &Path, hugo_path: &Path) -> Result<SyncReport, Error> {
    println!(
        "Converting {} -> {}",
        obsidian_path.display(),
        hugo_path.display()
    );

    let report = Synchronizer::new(obsidian_path, hugo_path).run()?;

    if !report.attachment_folder.is_empty() {
        println!("Attachment folder: {}", report.attachment_folder);
    }
    for key in &report.removed {
        println!("  - {}", key);
    }
    for key in &report.copied {
        println!("  + {}", key);
    }
    println!("Convert complete. {}.", report);

    Ok(report)
}
