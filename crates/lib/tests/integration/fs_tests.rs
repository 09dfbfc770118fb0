//! File system contract, exercised identically against both backends.

use std::io::Write;

use hostio_lib::{
  DirectoryPath, Error, FileMode, FileSystem, FileSystemExt, MemoryFileSystem, PathStyle, SearchScope,
  SystemFileSystem,
};

use super::common::temp_dir;

/// Walk up from `start` looking for `name`, like a build tool locating its
/// manifest.
fn find_upwards(fs: &dyn FileSystem, start: &DirectoryPath, name: &str) -> Option<DirectoryPath> {
  let mut current = Some(start.collapse());
  while let Some(dir) = current {
    if fs.file_exists(&dir.combine_with_file_path(name).ok()?) {
      return Some(dir);
    }
    current = dir.parent();
  }
  None
}

fn exercise_contract(fs: &dyn FileSystem, root: &DirectoryPath) {
  let project = root.combine_with_directory("project").unwrap();
  let nested = project.combine_with_directory("src/deep").unwrap();
  fs.create_directory(&nested).unwrap();
  assert!(fs.directory_exists(&nested));

  let manifest = project.combine_with_file_path("Build.toml").unwrap();
  fs.write_all(&manifest, b"[package]\n").unwrap();
  assert_eq!(find_upwards(fs, &nested, "Build.toml"), Some(project.clone()));
  assert_eq!(find_upwards(fs, &nested, "Missing.toml"), None);

  let log = nested.combine_with_file_path("build.log").unwrap();
  fs.open_append(&log).unwrap().write_all(b"start\n").unwrap();
  fs.open_with_mode(&log, FileMode::Append).unwrap().write_all(b"end\n").unwrap();
  assert_eq!(fs.read_to_string(&log).unwrap(), "start\nend\n");
  assert_eq!(fs.file_length(&log).unwrap(), 10);

  let backup = nested.combine_with_file_path("build.log.bak").unwrap();
  fs.copy_file(&log, &backup, false).unwrap();
  assert!(matches!(fs.copy_file(&log, &backup, false), Err(Error::AlreadyExists { .. })));

  let logs = fs.files(&project, "*.log", SearchScope::Recursive).unwrap();
  assert_eq!(logs.len(), 1);
  assert_eq!(logs[0].filename(), "build.log");
  assert_eq!(fs.files(&project, "*", SearchScope::Current).unwrap().len(), 1);

  let renamed = nested.combine_with_file_path("old.log").unwrap();
  fs.move_file(&backup, &renamed).unwrap();
  assert!(!fs.file_exists(&backup));
  assert!(fs.file_exists(&renamed));

  assert!(fs.delete_directory(&project, false).is_err());
  fs.delete_directory(&project, true).unwrap();
  assert!(!fs.directory_exists(&project));
  assert!(fs.open_read(&manifest).err().unwrap().is_not_found());
}

#[test]
fn memory_file_system_honors_contract() {
  let fs = MemoryFileSystem::new(PathStyle::native());
  let root = fs.working_directory().clone();
  exercise_contract(&fs, &root);
}

#[test]
fn system_file_system_honors_contract() {
  let (_temp, root) = temp_dir();
  exercise_contract(&SystemFileSystem::new(), &root);
}
