//! Writes overlay files into the project root

use super::{Overlay, OverlayFile};
use crate::error::OverlayError;
use crate::fs::FileSystem;
use std::io;
use tracing::{debug, info};

/// Write every overlay file into the overlay's root.
///
/// All templates are resolved before the first write, so an unreadable
/// template leaves the project untouched. Files are created with create-new
/// semantics and registered with `overlay` as soon as they exist, including
/// a file whose write failed halfway. A path that became occupied after the
/// guard ran is reported as a conflict and never registered.
pub fn materialize(
    fs: &dyn FileSystem,
    overlay: &mut Overlay<'_>,
    files: &[OverlayFile],
) -> Result<(), OverlayError> {
    let resolved = files
        .iter()
        .map(|file| file.source.resolve(fs).map(|contents| (file, contents)))
        .collect::<Result<Vec<_>, OverlayError>>()?;

    for (file, contents) in resolved {
        let target = file.target(overlay.root());

        match fs.create_new(&target, &contents) {
            Ok(()) => {
                debug!(path = %target.display(), bytes = contents.len(), "Wrote overlay file");
                overlay.register_file(target);
            }
            Err(e) => {
                if e.created() {
                    overlay.register_file(target.clone());
                }
                let source = e.into_io_error();
                if source.kind() == io::ErrorKind::AlreadyExists {
                    return Err(OverlayError::Conflict(target));
                }
                return Err(OverlayError::Materialize {
                    path: target,
                    source,
                });
            }
        }
    }

    info!(count = overlay.files().len(), "Configuration overlay materialized");
    Ok(())
}
