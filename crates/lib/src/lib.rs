//! hostio-lib: path values and host environment access behind mockable seams
//!
//! This crate provides:
//! - `Path`, `FilePath`, `DirectoryPath`: immutable, normalized path values
//!   with platform-aware rendering and comparison
//! - `Platform`: OS family and process architecture, detected once
//! - `Environment`: working directory, home directory and environment
//!   variables, with a live (`SystemEnvironment`) and fake implementation
//! - `FileSystem`: file and directory operations over the host OS or memory

pub mod environment;
pub mod error;
pub mod fs;
pub mod path;
pub mod platform;

pub use environment::{Environment, EnvironmentVariables, FakeEnvironment, SystemEnvironment};
pub use error::{Error, Result};
pub use fs::{
  FileAccess, FileMode, FileShare, FileStream, FileSystem, FileSystemExt, MemoryFileSystem, SearchScope,
  SystemFileSystem,
};
pub use path::{DirectoryPath, FilePath, Path, PathComparer, PathRoot, PathStyle};
pub use platform::{Platform, PlatformArchitecture, PlatformFamily};
