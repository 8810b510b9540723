// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Resolve resource locators to byte sources and materialize them on disk.

use std::fs::File;
use std::io::{self, ErrorKind};

use url::Url;

use super::temp_file::{
    ByteSource, CopyError, CopyOptions, TemporaryFile, copy_to_temporary_file_with,
};

/// Capability that turns a locator into a readable stream.
///
/// Supplied by the surrounding application (content providers, asset
/// bundles, plain files); the helpers here never construct one on their own.
pub trait ContentResolver {
    fn open(&self, locator: &Url) -> io::Result<Box<dyn ByteSource>>;
}

/// Resolves `file://` locators to files on the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileResolver;

impl ContentResolver for FileResolver {
    fn open(&self, locator: &Url) -> io::Result<Box<dyn ByteSource>> {
        if locator.scheme() != "file" {
            return Err(io::Error::new(
                ErrorKind::Unsupported,
                format!("Unsupported locator scheme: {}", locator.scheme()),
            ));
        }
        let path = locator.to_file_path().map_err(|()| {
            io::Error::new(
                ErrorKind::InvalidInput,
                format!("Locator does not name a local file: {locator}"),
            )
        })?;
        Ok(Box::new(File::open(path)?))
    }
}

/// Open `locator` through `resolver` and copy its bytes into a temporary file.
///
/// Locators without an authority component (for example `data:` or
/// `mailto:` URLs) are treated as an absent source: nothing is opened and no
/// file is created.
///
/// # Errors
///
/// - [`CopyError::NoSource`] for locators without an authority.
/// - [`CopyError::Open`] when the resolver cannot open the stream.
/// - Any error from [`copy_to_temporary_file_with`].
pub fn copy_locator_to_temporary_file<R>(
    locator: &Url,
    resolver: &R,
    options: &CopyOptions,
) -> Result<TemporaryFile, CopyError>
where
    R: ContentResolver + ?Sized,
{
    if !locator.has_authority() {
        log::debug!("Locator {locator} has no authority; nothing to copy");
        return Err(CopyError::NoSource);
    }

    let mut source = resolver.open(locator).map_err(CopyError::Open)?;
    copy_to_temporary_file_with(Some(&mut *source), options)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs;
    use std::io::{self, Cursor};

    use tempfile::TempDir;
    use url::Url;

    use super::{ContentResolver, FileResolver, copy_locator_to_temporary_file};
    use crate::utils::temp_file::{ByteSource, CopyError, CopyOptions};

    struct InMemoryResolver {
        bytes: Vec<u8>,
        opened: Cell<usize>,
    }

    impl ContentResolver for InMemoryResolver {
        fn open(&self, _locator: &Url) -> io::Result<Box<dyn ByteSource>> {
            self.opened.set(self.opened.get() + 1);
            Ok(Box::new(Cursor::new(self.bytes.clone())))
        }
    }

    fn options_in(tmp: &TempDir) -> CopyOptions {
        CopyOptions {
            extension: "png".into(),
            temp_dir: tmp.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn content_locator_is_copied_through_resolver() {
        let tmp = TempDir::new().unwrap();
        let resolver = InMemoryResolver {
            bytes: b"image-bytes".to_vec(),
            opened: Cell::new(0),
        };
        let locator = Url::parse("content://media/external/images/42").unwrap();

        let file = copy_locator_to_temporary_file(&locator, &resolver, &options_in(&tmp)).unwrap();

        assert_eq!(fs::read(file.path()).unwrap(), b"image-bytes");
        assert_eq!(resolver.opened.get(), 1);
    }

    #[test]
    fn locator_without_authority_is_an_absent_source() {
        let tmp = TempDir::new().unwrap();
        let resolver = InMemoryResolver {
            bytes: Vec::new(),
            opened: Cell::new(0),
        };
        let locator = Url::parse("mailto:someone@example.com").unwrap();

        let result = copy_locator_to_temporary_file(&locator, &resolver, &options_in(&tmp));

        assert!(matches!(result, Err(CopyError::NoSource)));
        assert_eq!(resolver.opened.get(), 0);
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn file_resolver_reads_local_files() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("input.jpg");
        fs::write(&input, b"jpeg?").unwrap();
        let out = TempDir::new().unwrap();
        let locator = Url::from_file_path(&input).unwrap();

        let file =
            copy_locator_to_temporary_file(&locator, &FileResolver, &options_in(&out)).unwrap();

        assert_eq!(fs::read(file.path()).unwrap(), b"jpeg?");
    }

    #[test]
    fn missing_file_surfaces_open_error() {
        let tmp = TempDir::new().unwrap();
        let locator = Url::from_file_path(tmp.path().join("missing.jpg")).unwrap();

        let result = copy_locator_to_temporary_file(&locator, &FileResolver, &options_in(&tmp));

        assert!(matches!(result, Err(CopyError::Open(_))));
    }

    #[test]
    fn file_resolver_rejects_other_schemes() {
        let locator = Url::parse("https://example.com/a.png").unwrap();

        let err = FileResolver.open(&locator).err().expect("open fails");

        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }
}
