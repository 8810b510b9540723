// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Materialize byte streams into uniquely named temporary files.
//!
//! The copier borrows a caller-owned [`ByteSource`], drains it into a fresh
//! `<uuid>.<extension>` file and closes the source exactly once, whatever
//! happened during the copy. The produced file is never deleted here; the
//! caller owns it.

use std::fs::{File, OpenOptions};
use std::io::{self, Cursor, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Extension used when the caller does not pick one.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Size of the read buffer used while copying.
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Caller-supplied, finite, forward-only byte stream that can be closed.
///
/// `close` is invoked exactly once by the copier after the copy attempt.
/// Sources without an explicit close step keep the default no-op.
pub trait ByteSource: Read {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ByteSource for File {}

impl ByteSource for &[u8] {}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {}

/// Adapter turning any [`Read`] into a [`ByteSource`] with a no-op close.
#[derive(Debug)]
pub struct ReaderSource<R>(pub R);

impl<R: Read> Read for ReaderSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {}

/// Failures surfaced by the copier.
///
/// Messages describe only the failing step; the underlying I/O error is
/// reachable through [`std::error::Error::source`].
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("no byte source was provided")]
    NoSource,
    #[error("failed to open byte source")]
    Open(#[source] io::Error),
    #[error("failed to create temporary file {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
        close_error: Option<io::Error>,
    },
    /// Reading failed. `path` names the partially written file when the
    /// destination had already been created; it is left in place.
    #[error("failed to read byte source{}", partial_output(.path))]
    SourceRead {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
        close_error: Option<io::Error>,
    },
    #[error("failed to write temporary file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
        close_error: Option<io::Error>,
    },
    /// Closing the source failed. Never returned as the copy result; it is
    /// attached to the produced [`TemporaryFile`] instead.
    #[error("failed to close byte source")]
    SourceClose(#[source] io::Error),
}

impl CopyError {
    /// Failure to close the source that followed this copy failure, if any.
    pub fn close_error(&self) -> Option<&io::Error> {
        match self {
            Self::Create { close_error, .. }
            | Self::SourceRead { close_error, .. }
            | Self::Write { close_error, .. } => close_error.as_ref(),
            _ => None,
        }
    }

    fn with_close_error(mut self, err: io::Error) -> Self {
        if let Self::Create { close_error, .. }
        | Self::SourceRead { close_error, .. }
        | Self::Write { close_error, .. } = &mut self
        {
            *close_error = Some(err);
        }
        self
    }
}

fn partial_output(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" (partial output left at {})", path.display()),
        None => String::new(),
    }
}

/// Knobs for a single copy.
///
/// Override fields with struct-update syntax:
///
/// ```
/// use apputils::utils::CopyOptions;
/// let options = CopyOptions {
///     extension: "png".into(),
///     ..Default::default()
/// };
/// assert_eq!(options.buffer_size, 8 * 1024);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyOptions {
    /// Suffix appended verbatim after `<uuid>.`. Not validated: `".png"`
    /// yields `<uuid>..png` and an empty extension leaves a trailing dot.
    pub extension: String,
    /// Directory receiving the temporary files.
    pub temp_dir: PathBuf,
    /// Read buffer size in bytes.
    pub buffer_size: usize,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            temp_dir: std::env::temp_dir(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl CopyOptions {
    /// Default options with a different extension.
    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
            ..Default::default()
        }
    }
}

/// A freshly materialized file, owned by the caller.
#[derive(Debug)]
pub struct TemporaryFile {
    path: PathBuf,
    len: u64,
    close_error: Option<CopyError>,
}

impl TemporaryFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of bytes written.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Non-fatal [`CopyError::SourceClose`] raised after the copy succeeded.
    pub fn close_error(&self) -> Option<&CopyError> {
        self.close_error.as_ref()
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Copy `source` into a new temporary file named `<uuid>.<extension>` in the
/// platform temp directory.
///
/// The source type cannot be inferred from a bare `None`, so an absent source
/// is spelled with a turbofish:
///
/// ```
/// use apputils::utils::{CopyError, copy_to_temporary_file};
///
/// let result = copy_to_temporary_file(None::<&mut std::fs::File>, "jpg");
/// assert!(matches!(result, Err(CopyError::NoSource)));
/// ```
///
/// # Errors
///
/// See [`copy_to_temporary_file_with`].
pub fn copy_to_temporary_file<S>(
    source: Option<&mut S>,
    extension: &str,
) -> Result<TemporaryFile, CopyError>
where
    S: ByteSource + ?Sized,
{
    copy_to_temporary_file_with(source, &CopyOptions::with_extension(extension))
}

/// Copy `source` into a new temporary file described by `options`.
///
/// The destination is created after the first read and before its byte
/// count is inspected, so a present but empty source still yields a
/// zero-length file. The source is closed exactly once on every path.
///
/// # Errors
///
/// - [`CopyError::NoSource`] when `source` is `None`; nothing is touched.
/// - [`CopyError::SourceRead`] when a read fails; partial output stays on disk.
/// - [`CopyError::Create`] / [`CopyError::Write`] for destination failures.
///
/// A failing `close` is logged. After a successful copy it is attached to
/// the returned file; after a failed one it rides along on the error
/// ([`CopyError::close_error`]).
pub fn copy_to_temporary_file_with<S>(
    source: Option<&mut S>,
    options: &CopyOptions,
) -> Result<TemporaryFile, CopyError>
where
    S: ByteSource + ?Sized,
{
    let Some(source) = source else {
        return Err(CopyError::NoSource);
    };

    let copied = drain_into_new_file(source, options);

    match (copied, source.close()) {
        (Ok(file), Ok(())) => Ok(file),
        (Ok(mut file), Err(err)) => {
            log::warn!(
                "Copied {} bytes to {:?} but closing the source failed: {}",
                file.len,
                file.path,
                err
            );
            file.close_error = Some(CopyError::SourceClose(err));
            Ok(file)
        }
        (Err(copy_err), Err(close_err)) => {
            log::warn!("Closing the source after a failed copy also failed: {close_err}");
            Err(copy_err.with_close_error(close_err))
        }
        (Err(copy_err), Ok(())) => Err(copy_err),
    }
}

/// Create an empty, uniquely named file in the platform temp directory.
///
/// # Errors
///
/// Returns [`CopyError::Create`] when the file cannot be created.
pub fn create_temporary_file(extension: &str) -> Result<PathBuf, CopyError> {
    create_temporary_file_in(&std::env::temp_dir(), extension)
}

/// Create an empty, uniquely named file in `dir`.
///
/// # Errors
///
/// Returns [`CopyError::Create`] when the file cannot be created.
pub fn create_temporary_file_in(dir: &Path, extension: &str) -> Result<PathBuf, CopyError> {
    let (path, _file) = create_destination(dir, extension)?;
    Ok(path)
}

fn drain_into_new_file<S>(
    source: &mut S,
    options: &CopyOptions,
) -> Result<TemporaryFile, CopyError>
where
    S: ByteSource + ?Sized,
{
    let mut buffer = vec![0u8; options.buffer_size.max(1)];
    let mut read = read_chunk(source, &mut buffer).map_err(|source| CopyError::SourceRead {
        path: None,
        source,
        close_error: None,
    })?;

    let (path, mut file) = create_destination(&options.temp_dir, &options.extension)?;
    log::debug!("Materializing byte source into {:?}", path);

    let mut len: u64 = 0;
    while read > 0 {
        file.write_all(&buffer[..read]).map_err(|source| write_error(&path, source))?;
        len += read as u64;
        read = read_chunk(source, &mut buffer).map_err(|source| CopyError::SourceRead {
            path: Some(path.clone()),
            source,
            close_error: None,
        })?;
    }

    file.flush().map_err(|source| write_error(&path, source))?;
    drop(file);

    log::debug!("Wrote {len} bytes to {:?}", path);
    Ok(TemporaryFile {
        path,
        len,
        close_error: None,
    })
}

fn write_error(path: &Path, source: io::Error) -> CopyError {
    CopyError::Write {
        path: path.to_path_buf(),
        source,
        close_error: None,
    }
}

/// Single read that transparently resumes after `Interrupted`.
fn read_chunk<S>(source: &mut S, buffer: &mut [u8]) -> io::Result<usize>
where
    S: ByteSource + ?Sized,
{
    loop {
        match source.read(buffer) {
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

/// Open a brand-new file; `create_new` refuses to reuse an existing name.
fn create_destination(dir: &Path, extension: &str) -> Result<(PathBuf, File), CopyError> {
    let path = dir.join(temporary_name(extension));
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|source| CopyError::Create {
            path: path.clone(),
            source,
            close_error: None,
        })?;
    Ok((path, file))
}

/// `<uuid>.<extension>` with the extension appended as given.
fn temporary_name(extension: &str) -> String {
    format!("{}.{extension}", Uuid::new_v4())
}
