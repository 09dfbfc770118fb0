//! Normalization and role-typing properties of path values.

use hostio_lib::{DirectoryPath, Error, FilePath, Path, PathComparer, PathStyle};

use super::common::{unix, unix_dir, unix_file};

const SAMPLES: &[&str] = &[
  "a",
  "a//b/./c",
  "/usr/local/bin/",
  "./relative/../path",
  "../../up",
  "/",
  ".",
  "with space/and.dots.txt",
  "mixed\\separators/here",
];

#[test]
fn parse_is_stable_under_rendering() {
  for raw in SAMPLES {
    let parsed = unix(raw);
    assert_eq!(unix(&parsed.full_path()), parsed, "{raw}");
    assert_eq!(unix(&parsed.full_path()).segments(), parsed.segments(), "{raw}");
  }
}

#[test]
fn native_parse_round_trips() {
  for raw in SAMPLES {
    let parsed = Path::parse(raw).unwrap();
    assert_eq!(Path::parse(&parsed.full_path()).unwrap(), parsed, "{raw}");
  }
}

#[test]
fn scenario_redundant_separators_and_dots() {
  let path = unix("a//b/./c");
  assert_eq!(path.segments(), ["a", "b", "c"]);
  assert!(path.is_relative());
}

#[test]
fn scenario_collapse_parent_segment() {
  let path = unix("a/b/../c");
  assert_eq!(path.segments(), ["a", "b", "..", "c"]);
  assert_eq!(path.collapse().segments(), ["a", "c"]);
}

#[test]
fn scenario_archive_extension() {
  let archive = FilePath::parse("archive.tar.gz").unwrap();
  assert_eq!(archive.extension(), Some("gz"));
  assert_eq!(archive.filename_without_extension(), "archive.tar");
}

#[test]
fn combine_is_associative() {
  for a in SAMPLES {
    for b in SAMPLES {
      for c in ["x", "/abs", "y/../z", "."] {
        let (a, b, c) = (unix(a), unix(b), unix(c));
        let left = a.combine(&b).and_then(|ab| ab.combine(&c)).unwrap();
        let right = b.combine(&c).and_then(|bc| a.combine(&bc)).unwrap();
        assert_eq!(left, right, "{a} {b} {c}");
      }
    }
  }
}

#[test]
fn combining_across_styles_renders_in_the_base_style() {
  let base = Path::parse_with(r"C:\work", PathStyle::Windows).unwrap();

  let nested = base.combine(&unix("src/main.rs")).unwrap();
  assert_eq!(nested.full_path(), r"C:\work\src\main.rs");
  assert_eq!(Path::parse_with(&nested.full_path(), PathStyle::Windows).unwrap(), nested);

  let rooted = base.combine(&unix("/etc/hosts")).unwrap();
  assert_eq!(rooted.style(), PathStyle::Windows);
  assert_eq!(rooted.full_path(), r"\etc\hosts");

  let err = base.combine(&unix("what?.txt")).unwrap_err();
  assert!(matches!(err, Error::InvalidPath { .. }), "{err}");
}

#[test]
fn collapse_is_idempotent() {
  for raw in SAMPLES {
    let once = unix(raw).collapse();
    assert_eq!(once.collapse(), once, "{raw}");
  }
}

#[test]
fn file_in_directory_reports_that_directory() {
  for d in ["/", "/var/log", "rel", ".", "../up/"] {
    for f in ["a.txt", "Makefile", ".hidden"] {
      let dir = unix_dir(d);
      assert_eq!(dir.combine_with_file_path(f).unwrap().directory(), dir, "{d} {f}");
    }
  }
}

#[test]
fn comparers_disagree_on_case() {
  let a = unix("Foo/Bar");
  let b = unix("foo/bar");
  assert!(a.equals(&b, &PathComparer::CASE_INSENSITIVE));
  assert!(!a.equals(&b, &PathComparer::CASE_SENSITIVE));
}

#[test]
fn windows_paths_render_natively() {
  let dir = DirectoryPath::parse_with("c:/Program Files", PathStyle::Windows).unwrap();
  let exe = dir.combine_with_file_path("app/bin/tool.exe").unwrap();
  assert_eq!(exe.full_path(), "C:\\Program Files\\app\\bin\\tool.exe");
  assert_eq!(exe.directory().full_path(), "C:\\Program Files\\app\\bin");
  assert_eq!(exe.extension(), Some("exe"));
}

#[test]
fn invalid_inputs_are_rejected() {
  for raw in ["", " ", "\t"] {
    assert!(matches!(Path::parse(raw), Err(Error::InvalidPath { .. })));
    assert!(matches!(FilePath::parse(raw), Err(Error::InvalidPath { .. })));
    assert!(matches!(DirectoryPath::parse(raw), Err(Error::InvalidPath { .. })));
  }
  assert!(Path::parse_with("bad<name", PathStyle::Windows).is_err());
}

#[test]
fn relative_paths_between_directories() {
  let from = unix_dir("/repo/crates/lib");
  let target = unix_file("/repo/README.md");
  assert_eq!(from.relative_file_path_to(&target).unwrap().full_path(), "../../README.md");
}
