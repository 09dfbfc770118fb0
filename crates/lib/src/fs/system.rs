use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use super::{FileAccess, FileMode, FileShare, FileStream, FileSystem, SearchScope, matches_filter, validate_open};
use crate::error::{Error, Result};
use crate::path::{DirectoryPath, FilePath, Path, PathStyle};
use crate::platform::Platform;

/// File system backed by the host OS.
///
/// Relative paths resolve against the process working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFileSystem;

impl SystemFileSystem {
  pub fn new() -> Self {
    Self
  }
}

fn host_path(path: &Path) -> PathBuf {
  PathBuf::from(path.full_path())
}

fn options_for(mode: FileMode, access: FileAccess) -> OpenOptions {
  let mut options = OpenOptions::new();
  options.read(access.can_read()).write(access.can_write());
  match mode {
    FileMode::CreateNew => {
      options.create_new(true);
    }
    FileMode::Create => {
      options.create(true).truncate(true);
    }
    FileMode::Open => {}
    FileMode::OpenOrCreate => {
      options.create(access.can_write());
    }
    FileMode::Truncate => {
      options.truncate(true);
    }
    FileMode::Append => {
      options.append(true).create(true);
    }
  }
  options
}

#[cfg(windows)]
fn apply_share(options: &mut OpenOptions, share: FileShare) {
  use std::os::windows::fs::OpenOptionsExt;

  const FILE_SHARE_READ: u32 = 0x1;
  const FILE_SHARE_WRITE: u32 = 0x2;

  let mode = match share {
    FileShare::None => 0,
    FileShare::Read => FILE_SHARE_READ,
    FileShare::Write => FILE_SHARE_WRITE,
    FileShare::ReadWrite => FILE_SHARE_READ | FILE_SHARE_WRITE,
  };
  options.share_mode(mode);
}

#[cfg(not(windows))]
fn apply_share(_options: &mut OpenOptions, _share: FileShare) {}

fn walk(root: &DirectoryPath, scope: SearchScope) -> Result<impl Iterator<Item = Result<walkdir::DirEntry>>> {
  let host = host_path(root.path());
  if !host.is_dir() {
    return Err(Error::not_found(root));
  }

  let max_depth = match scope {
    SearchScope::Current => 1,
    SearchScope::Recursive => usize::MAX,
  };
  let walker = WalkDir::new(host)
    .min_depth(1)
    .max_depth(max_depth)
    .sort_by_file_name()
    .into_iter()
    .map(|entry| {
      entry.map_err(|e| {
        let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
        match e.into_io_error() {
          Some(source) => Error::from_io(path, source),
          None => Error::Io {
            path,
            source: std::io::Error::other("file system loop detected"),
          },
        }
      })
    });
  Ok(walker)
}

fn entry_name_matches(entry: &walkdir::DirEntry, filter: &str) -> bool {
  let name = entry.file_name().to_string_lossy();
  matches_filter(&name, filter, Platform::current().is_path_case_sensitive())
}

fn entry_path(entry: &walkdir::DirEntry) -> Result<Path> {
  let raw = entry
    .path()
    .to_str()
    .ok_or_else(|| Error::invalid_path(entry.path().to_string_lossy(), "path is not valid Unicode"))?;
  Path::parse_with(raw, PathStyle::native())
}

impl FileSystem for SystemFileSystem {
  fn file_exists(&self, path: &FilePath) -> bool {
    host_path(path.path()).is_file()
  }

  fn directory_exists(&self, path: &DirectoryPath) -> bool {
    host_path(path.path()).is_dir()
  }

  fn open(&self, path: &FilePath, mode: FileMode, access: FileAccess, share: FileShare) -> Result<Box<dyn FileStream>> {
    validate_open(path, mode, access)?;
    let host = host_path(path.path());

    // OpenOptions cannot create a file without write access
    if mode == FileMode::OpenOrCreate && !access.can_write() && !host.exists() {
      File::create(&host).map_err(|e| Error::from_io(path, e))?;
    }

    let mut options = options_for(mode, access);
    apply_share(&mut options, share);
    let file = options.open(&host).map_err(|e| Error::from_io(path, e))?;
    Ok(Box::new(file))
  }

  fn file_length(&self, path: &FilePath) -> Result<u64> {
    let metadata = fs::metadata(host_path(path.path())).map_err(|e| Error::from_io(path, e))?;
    Ok(metadata.len())
  }

  fn copy_file(&self, source: &FilePath, destination: &FilePath, overwrite: bool) -> Result<()> {
    let target = host_path(destination.path());
    if !overwrite && target.exists() {
      return Err(Error::AlreadyExists {
        path: destination.to_string(),
      });
    }
    fs::copy(host_path(source.path()), &target).map_err(|e| Error::from_io(source, e))?;
    debug!(source = %source, destination = %destination, "copied file");
    Ok(())
  }

  fn move_file(&self, source: &FilePath, destination: &FilePath) -> Result<()> {
    let target = host_path(destination.path());
    if target.exists() {
      return Err(Error::AlreadyExists {
        path: destination.to_string(),
      });
    }
    fs::rename(host_path(source.path()), &target).map_err(|e| Error::from_io(source, e))?;
    debug!(source = %source, destination = %destination, "moved file");
    Ok(())
  }

  fn delete_file(&self, path: &FilePath) -> Result<()> {
    fs::remove_file(host_path(path.path())).map_err(|e| Error::from_io(path, e))?;
    debug!(path = %path, "deleted file");
    Ok(())
  }

  fn create_directory(&self, path: &DirectoryPath) -> Result<()> {
    fs::create_dir_all(host_path(path.path())).map_err(|e| Error::from_io(path, e))?;
    debug!(path = %path, "created directory");
    Ok(())
  }

  fn move_directory(&self, source: &DirectoryPath, destination: &DirectoryPath) -> Result<()> {
    let target = host_path(destination.path());
    if target.exists() {
      return Err(Error::AlreadyExists {
        path: destination.to_string(),
      });
    }
    fs::rename(host_path(source.path()), &target).map_err(|e| Error::from_io(source, e))?;
    debug!(source = %source, destination = %destination, "moved directory");
    Ok(())
  }

  fn delete_directory(&self, path: &DirectoryPath, recursive: bool) -> Result<()> {
    let host = host_path(path.path());
    let result = if recursive {
      fs::remove_dir_all(&host)
    } else {
      fs::remove_dir(&host)
    };
    result.map_err(|e| Error::from_io(path, e))?;
    debug!(path = %path, recursive, "deleted directory");
    Ok(())
  }

  fn files(&self, path: &DirectoryPath, filter: &str, scope: SearchScope) -> Result<Vec<FilePath>> {
    let mut files = Vec::new();
    for entry in walk(path, scope)? {
      let entry = entry?;
      if entry.file_type().is_file() && entry_name_matches(&entry, filter) {
        files.push(FilePath::try_from(entry_path(&entry)?)?);
      }
    }
    Ok(files)
  }

  fn directories(&self, path: &DirectoryPath, filter: &str, scope: SearchScope) -> Result<Vec<DirectoryPath>> {
    let mut directories = Vec::new();
    for entry in walk(path, scope)? {
      let entry = entry?;
      if entry.file_type().is_dir() && entry_name_matches(&entry, filter) {
        directories.push(DirectoryPath::from(entry_path(&entry)?));
      }
    }
    Ok(directories)
  }
}
