//! Document delivery
//!
//! Hands a generated document to the host's "save as file" mechanism. The
//! host turns the document into a transient object (a blob handle, a staged
//! file), triggers the save, and the object is revoked afterwards no matter
//! how the save went.
//!
//! [`deliver`] is fire-and-forget: failures are logged and swallowed.
//! [`try_deliver`] is the same hand-off with the outcome returned.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::DeliveryError;

/// Filename used when the caller does not suggest one
pub const DEFAULT_FILENAME: &str = "nutterx_contacts.vcf";

/// MIME type of a vCard document
pub const VCARD_MIME_TYPE: &str = "text/vcard;charset=utf-8";

/// Bytes plus their MIME type, as handed to a save host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl Blob {
    pub fn vcard(document: &str) -> Self {
        Self {
            bytes: document.as_bytes().to_vec(),
            mime_type: VCARD_MIME_TYPE,
        }
    }
}

/// A platform save mechanism.
///
/// `revoke` is called exactly once for every handle `create_object` returned.
pub trait SaveHost {
    type Handle;

    /// Create the transient object holding the blob
    fn create_object(&self, blob: Blob) -> Result<Self::Handle, DeliveryError>;

    /// Trigger the save of an object under `filename`
    fn trigger_save(&self, handle: &Self::Handle, filename: &str) -> Result<(), DeliveryError>;

    /// Release the transient object
    fn revoke(&self, handle: &Self::Handle);
}

/// Revokes the handle when dropped, including on unwind.
struct ObjectGuard<'h, H: SaveHost + ?Sized> {
    host: &'h H,
    handle: H::Handle,
}

impl<H: SaveHost + ?Sized> ObjectGuard<'_, H> {
    fn save(&self, filename: &str) -> Result<(), DeliveryError> {
        self.host.trigger_save(&self.handle, filename)
    }
}

impl<H: SaveHost + ?Sized> Drop for ObjectGuard<'_, H> {
    fn drop(&mut self) {
        self.host.revoke(&self.handle);
    }
}

/// Hand `document` to `host` under `filename` (default [`DEFAULT_FILENAME`])
/// and report the outcome. The transient object is revoked before returning.
pub fn try_deliver<H>(host: &H, document: &str, filename: Option<&str>) -> Result<(), DeliveryError>
where
    H: SaveHost + ?Sized,
{
    let filename = filename.unwrap_or(DEFAULT_FILENAME);
    let blob = Blob::vcard(document);
    debug!(bytes = blob.bytes.len(), mime = blob.mime_type, "Creating save object");

    let guard = ObjectGuard {
        host,
        handle: host.create_object(blob)?,
    };
    let outcome = guard.save(filename);
    drop(guard);
    outcome
}

/// Fire-and-forget delivery; a failed save is logged, never returned.
pub fn deliver<H>(host: &H, document: &str, filename: Option<&str>)
where
    H: SaveHost + ?Sized,
{
    let filename = filename.unwrap_or(DEFAULT_FILENAME);
    match try_deliver(host, document, Some(filename)) {
        Ok(()) => info!(filename, "Delivered vCard document"),
        Err(e) => warn!(filename, error = %e, "vCard delivery failed"),
    }
}

/// Saves into a directory.
///
/// The blob is staged in a temporary file inside the target directory; the
/// save copies it to `<dir>/<filename>` and revoking deletes the staging file.
#[derive(Debug, Clone)]
pub struct DirectorySaveHost {
    dir: PathBuf,
}

impl DirectorySaveHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where a save under `filename` ends up
    pub fn target_path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    fn check_filename(filename: &str) -> Result<(), DeliveryError> {
        let reason = if filename.trim().is_empty() {
            Some("filename is empty")
        } else if filename == "." || filename == ".." {
            Some("filename is a directory reference")
        } else if filename.contains(['/', '\\']) {
            Some("filename contains a path separator")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DeliveryError::InvalidFilename {
                filename: filename.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl SaveHost for DirectorySaveHost {
    type Handle = NamedTempFile;

    fn create_object(&self, blob: Blob) -> Result<NamedTempFile, DeliveryError> {
        let staging_error = |source| DeliveryError::Staging {
            dir: self.dir.display().to_string(),
            source,
        };

        let mut staged = tempfile::Builder::new()
            .prefix(".nx-vcf-")
            .suffix(".part")
            .tempfile_in(&self.dir)
            .map_err(staging_error)?;
        staged.write_all(&blob.bytes).map_err(staging_error)?;
        staged.flush().map_err(staging_error)?;

        debug!(path = %staged.path().display(), mime = blob.mime_type, "Staged document");
        Ok(staged)
    }

    fn trigger_save(&self, handle: &NamedTempFile, filename: &str) -> Result<(), DeliveryError> {
        Self::check_filename(filename)?;
        let target = self.target_path(filename);
        fs::copy(handle.path(), &target)?;
        debug!(target = %target.display(), "Saved document");
        Ok(())
    }

    fn revoke(&self, handle: &NamedTempFile) {
        if let Err(e) = fs::remove_file(handle.path()) {
            warn!(error = %e, "Failed to remove staged document");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every call; optionally fails the save step.
    #[derive(Default)]
    struct RecordingHost {
        fail_save: bool,
        created: RefCell<Vec<Blob>>,
        saved: RefCell<Vec<(u32, String)>>,
        revoked: RefCell<Vec<u32>>,
    }

    impl SaveHost for RecordingHost {
        type Handle = u32;

        fn create_object(&self, blob: Blob) -> Result<u32, DeliveryError> {
            let mut created = self.created.borrow_mut();
            created.push(blob);
            Ok(created.len() as u32)
        }

        fn trigger_save(&self, handle: &u32, filename: &str) -> Result<(), DeliveryError> {
            if self.fail_save {
                return Err(DeliveryError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "save dialog dismissed",
                )));
            }
            self.saved.borrow_mut().push((*handle, filename.to_string()));
            Ok(())
        }

        fn revoke(&self, handle: &u32) {
            self.revoked.borrow_mut().push(*handle);
        }
    }

    #[test]
    fn test_deliver_uses_default_filename_and_mime() {
        let host = RecordingHost::default();
        deliver(&host, "BEGIN:VCARD\n", None);

        let created = host.created.borrow();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].mime_type, "text/vcard;charset=utf-8");
        assert_eq!(created[0].bytes, b"BEGIN:VCARD\n");
        assert_eq!(*host.saved.borrow(), vec![(1, "nutterx_contacts.vcf".to_string())]);
        assert_eq!(*host.revoked.borrow(), vec![1]);
    }

    #[test]
    fn test_deliver_revokes_even_when_save_fails() {
        let host = RecordingHost {
            fail_save: true,
            ..Default::default()
        };

        deliver(&host, "doc", Some("out.vcf"));
        assert!(host.saved.borrow().is_empty());
        assert_eq!(*host.revoked.borrow(), vec![1]);

        let host = RecordingHost {
            fail_save: true,
            ..Default::default()
        };
        assert!(try_deliver(&host, "doc", Some("out.vcf")).is_err());
        assert_eq!(*host.revoked.borrow(), vec![1]);
    }

    #[test]
    fn test_object_is_revoked_when_save_panics() {
        struct PanickingHost {
            revoked: RefCell<Vec<u32>>,
        }

        impl SaveHost for PanickingHost {
            type Handle = u32;

            fn create_object(&self, _blob: Blob) -> Result<u32, DeliveryError> {
                Ok(7)
            }

            fn trigger_save(&self, _handle: &u32, _filename: &str) -> Result<(), DeliveryError> {
                panic!("host crashed mid-save");
            }

            fn revoke(&self, handle: &u32) {
                self.revoked.borrow_mut().push(*handle);
            }
        }

        let host = PanickingHost {
            revoked: RefCell::new(Vec::new()),
        };
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            try_deliver(&host, "doc", None)
        }));

        assert!(result.is_err());
        assert_eq!(*host.revoked.borrow(), vec![7]);
    }

    #[test]
    fn test_each_delivery_gets_its_own_object() {
        let host = RecordingHost::default();
        deliver(&host, "a", Some("a.vcf"));
        deliver(&host, "b", Some("b.vcf"));

        assert_eq!(*host.revoked.borrow(), vec![1, 2]);
        assert_eq!(host.saved.borrow()[1], (2, "b.vcf".to_string()));
    }

    #[test]
    fn test_directory_host_writes_file_and_cleans_staging() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectorySaveHost::new(dir.path());

        try_deliver(&host, "BEGIN:VCARD\nEND:VCARD\n", Some("contacts.vcf")).unwrap();

        let saved = fs::read_to_string(dir.path().join("contacts.vcf")).unwrap();
        assert_eq!(saved, "BEGIN:VCARD\nEND:VCARD\n");

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(leftovers, vec!["contacts.vcf".to_string()]);
    }

    #[test]
    fn test_directory_host_rejects_path_like_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectorySaveHost::new(dir.path());

        for bad in ["", "..", "../escape.vcf", "sub/dir.vcf"] {
            let result = try_deliver(&host, "doc", Some(bad));
            assert!(
                matches!(result, Err(DeliveryError::InvalidFilename { .. })),
                "{:?} should be rejected",
                bad
            );
        }

        // staging files are gone even though every save was refused
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_directory_host_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let host = DirectorySaveHost::new(dir.path().join("missing"));

        let result = try_deliver(&host, "doc", None);
        assert!(matches!(result, Err(DeliveryError::Staging { .. })));
    }
}
