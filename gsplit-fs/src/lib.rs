//! Capability-scoped file access for photos, configuration and artefacts.
//!
//! Paths are UTF-8 ([`camino`]) and every operation opens the containing
//! directory through [`cap_std`] before touching the file itself.
#![forbid(unsafe_code)]

use std::io::{self, Read, Write};
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// A file addressed as a directory capability plus a name inside it.
#[derive(Debug)]
pub struct FileSlot {
    dir: fs_utf8::Dir,
    name: String,
}

impl FileSlot {
    /// Open the directory containing `path`.
    ///
    /// # Errors
    /// Fails when `path` has no file name or its directory cannot be opened.
    pub fn open(path: &Utf8Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
            .to_owned();
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
        Ok(Self { dir, name })
    }

    /// Whether the slot holds a regular file rather than a directory or
    /// other entry.
    ///
    /// # Errors
    /// Propagates metadata failures, including [`io::ErrorKind::NotFound`]
    /// for a missing name.
    pub fn is_file(&self) -> io::Result<bool> {
        self.dir
            .metadata(self.name.as_str())
            .map(|meta| meta.is_file())
    }

    /// Read the whole file.
    ///
    /// # Errors
    /// Propagates open and read failures.
    pub fn read(&self) -> io::Result<Vec<u8>> {
        let mut file = self.dir.open(self.name.as_str())?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Create or truncate the file and write `bytes`.
    ///
    /// # Errors
    /// Propagates create, write and flush failures.
    pub fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let mut file = self.dir.create(self.name.as_str())?;
        file.write_all(bytes)?;
        file.flush()
    }
}

/// Read a file into memory, typically a photo to be analysed.
///
/// # Errors
/// Propagates failures opening the directory or reading the file.
pub fn read_file(path: &Utf8Path) -> io::Result<Vec<u8>> {
    FileSlot::open(path)?.read()
}

/// Read a UTF-8 text file, typically a configuration document.
///
/// # Errors
/// Propagates read failures; invalid UTF-8 surfaces as
/// [`io::ErrorKind::InvalidData`].
pub fn read_text(path: &Utf8Path) -> io::Result<String> {
    String::from_utf8(read_file(path)?)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

/// Write `bytes` to `path`, creating missing parent directories first.
///
/// # Errors
/// Propagates directory creation and write failures.
pub fn write_file(path: &Utf8Path, bytes: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    FileSlot::open(path)?.write(bytes)
}

/// Whether the existing entry at `path` is a regular file.
///
/// # Errors
/// Returns [`io::ErrorKind::NotFound`] when `path` or its directory does not
/// exist, and propagates other metadata failures.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    FileSlot::open(path)?.is_file()
}

/// Create every missing directory above `path`.
///
/// # Errors
/// Propagates failures opening the base directory or creating children.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (base, relative) = split_base(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?.create_dir_all(&relative)
}

/// Split `dir` into an ambient base (root, drive prefix or `.`) and the
/// relative remainder that cap-std may create beneath it.
fn split_base(dir: &Utf8Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let std_dir = dir.as_std_path();
    let base = match std_dir.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => return Ok((Utf8PathBuf::from("."), dir.to_path_buf())),
    };
    let relative = dir
        .strip_prefix(&base)
        .map_err(|_| io::Error::other(format!("cannot strip {base} from {dir}")))?;
    Ok((base, relative.to_path_buf()))
}
