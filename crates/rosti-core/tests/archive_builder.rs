use std::fs;
use std::io::Read;
use std::path::Path;

use tempfile::TempDir;

use rosti_core::Error;
use rosti_core::archive::build_archive;

struct Entry {
    path: String,
    is_dir: bool,
    size: u64,
    content: String,
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create_dir_all should succeed in test temp dirs");
    }
    fs::write(path, content).expect("write should succeed in test temp dirs");
}

fn read_entries(archive: &Path) -> Vec<Entry> {
    let file = fs::File::open(archive).expect("archive should exist");
    let mut archive = tar::Archive::new(file);
    archive
        .entries()
        .expect("archive should be readable")
        .map(|entry| {
            let mut entry = entry.expect("entry should be readable");
            let path = entry.path().unwrap().to_string_lossy().into_owned();
            let is_dir = entry.header().entry_type().is_dir();
            let size = entry.size();
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            Entry {
                path,
                is_dir,
                size,
                content,
            }
        })
        .collect()
}

fn sample_project(root: &Path) -> std::path::PathBuf {
    let project = root.join("shop");
    write_file(&project.join("app.py"), "print('hello')\n");
    write_file(&project.join("static").join("style.css"), "body {}\n");
    write_file(
        &project.join("static").join("img").join("logo.svg"),
        "<svg/>",
    );
    fs::create_dir_all(project.join("empty")).unwrap();
    project
}

#[test]
fn directory_entries_are_prefixed_with_base_name() {
    let temp = TempDir::new().unwrap();
    let project = sample_project(temp.path());
    let archive = temp.path().join("shop.tar");

    build_archive(&project, &archive).unwrap();

    let paths: Vec<String> = read_entries(&archive).into_iter().map(|e| e.path).collect();
    assert_eq!(
        paths,
        vec![
            "shop",
            "shop/app.py",
            "shop/empty",
            "shop/static",
            "shop/static/img",
            "shop/static/img/logo.svg",
            "shop/static/style.css",
        ]
    );
}

#[test]
fn directory_entries_carry_no_content() {
    let temp = TempDir::new().unwrap();
    let project = sample_project(temp.path());
    let archive = temp.path().join("shop.tar");

    build_archive(&project, &archive).unwrap();

    for entry in read_entries(&archive) {
        if entry.is_dir {
            assert_eq!(entry.size, 0, "{} should be empty", entry.path);
        } else {
            assert!(entry.size > 0, "{} should have content", entry.path);
        }
    }
}

#[test]
fn file_content_is_preserved() {
    let temp = TempDir::new().unwrap();
    let project = sample_project(temp.path());
    let archive = temp.path().join("shop.tar");

    build_archive(&project, &archive).unwrap();

    let entries = read_entries(&archive);
    let app = entries.iter().find(|e| e.path == "shop/app.py").unwrap();
    assert_eq!(app.content, "print('hello')\n");
}

#[test]
fn single_file_source_is_unprefixed() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("nested").join("notes.txt");
    write_file(&source, "remember the milk");
    let archive = temp.path().join("notes.tar");

    build_archive(&source, &archive).unwrap();

    let entries = read_entries(&archive);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, "notes.txt");
    assert_eq!(entries[0].content, "remember the milk");
}

#[test]
fn trailing_slash_source_keeps_base_name() {
    let temp = TempDir::new().unwrap();
    let project = sample_project(temp.path());
    let archive = temp.path().join("shop.tar");
    let source = format!("{}/", project.display());

    build_archive(Path::new(&source), &archive).unwrap();

    let entries = read_entries(&archive);
    assert_eq!(entries[0].path, "shop");
    assert!(entries.iter().all(|e| e.path.starts_with("shop")));
}

#[test]
fn missing_source_leaves_empty_archive() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("out.tar");

    build_archive(&temp.path().join("does-not-exist"), &archive).unwrap();

    assert!(archive.exists(), "destination is created before the source is checked");
    assert!(read_entries(&archive).is_empty());
}

#[test]
fn existing_destination_is_truncated() {
    let temp = TempDir::new().unwrap();
    let project = sample_project(temp.path());
    let archive = temp.path().join("shop.tar");
    fs::write(&archive, vec![b'x'; 64 * 1024]).unwrap();

    build_archive(&project, &archive).unwrap();

    assert_eq!(read_entries(&archive).len(), 7);
}

#[test]
fn unwritable_destination_is_io_error() {
    let temp = TempDir::new().unwrap();
    let project = sample_project(temp.path());
    let archive = temp.path().join("missing-dir").join("shop.tar");

    let err = build_archive(&project, &archive).unwrap_err();

    match err {
        Error::Io { path, .. } => assert_eq!(path, archive),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn repeated_builds_produce_same_entries() {
    let temp = TempDir::new().unwrap();
    let project = sample_project(temp.path());
    let first = temp.path().join("first.tar");
    let second = temp.path().join("second.tar");

    build_archive(&project, &first).unwrap();
    build_archive(&project, &second).unwrap();

    let first: Vec<String> = read_entries(&first).into_iter().map(|e| e.path).collect();
    let second: Vec<String> = read_entries(&second).into_iter().map(|e| e.path).collect();
    assert_eq!(first, second);
}

#[cfg(unix)]
#[test]
fn file_mode_is_preserved() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let project = sample_project(temp.path());
    let script = project.join("run.sh");
    write_file(&script, "#!/bin/sh\n");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    let archive = temp.path().join("shop.tar");

    build_archive(&project, &archive).unwrap();

    let file = fs::File::open(&archive).unwrap();
    let mut archive = tar::Archive::new(file);
    let entry = archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap())
        .find(|e| e.path().unwrap() == Path::new("shop/run.sh"))
        .expect("script should be archived");
    assert_eq!(entry.header().mode().unwrap() & 0o777, 0o755);
}

#[cfg(unix)]
#[test]
fn symlinks_are_stored_as_links() {
    let temp = TempDir::new().unwrap();
    let project = sample_project(temp.path());
    std::os::unix::fs::symlink("app.py", project.join("main.py")).unwrap();
    let archive = temp.path().join("shop.tar");

    build_archive(&project, &archive).unwrap();

    let file = fs::File::open(&archive).unwrap();
    let mut archive = tar::Archive::new(file);
    let entry = archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap())
        .find(|e| e.path().unwrap() == Path::new("shop/main.py"))
        .expect("symlink should be archived");
    assert!(entry.header().entry_type().is_symlink());
    assert_eq!(
        entry.link_name().unwrap().unwrap(),
        Path::new("app.py")
    );
    assert_eq!(entry.size(), 0);
}

#[test]
fn destination_inside_source_is_not_archived() {
    let temp = TempDir::new().unwrap();
    let project = sample_project(temp.path());
    let archive = project.join("z.tar");

    build_archive(&project, &archive).unwrap();

    let paths: Vec<String> = read_entries(&archive).into_iter().map(|e| e.path).collect();
    assert!(!paths.iter().any(|p| p == "shop/z.tar"), "got {paths:?}");
    assert_eq!(paths.len(), 7);
}

#[test]
fn file_source_equal_to_destination_yields_empty_archive() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("notes.tar");
    write_file(&source, "old content");

    build_archive(&source, &source).unwrap();

    assert!(read_entries(&source).is_empty());
}

#[cfg(unix)]
#[test]
fn unreadable_entry_aborts_walk_and_keeps_partial_archive() {
    use std::os::unix::net::UnixListener;

    let temp = TempDir::new().unwrap();
    let project = sample_project(temp.path());
    let socket = project.join("m.sock");
    let _listener = UnixListener::bind(&socket).unwrap();
    let archive = temp.path().join("shop.tar");

    let err = build_archive(&project, &archive).unwrap_err();

    match err {
        Error::Io { path, .. } => assert_eq!(path, socket),
        other => panic!("expected I/O error, got {other:?}"),
    }
    let paths: Vec<String> = read_entries(&archive).into_iter().map(|e| e.path).collect();
    assert_eq!(paths, vec!["shop", "shop/app.py", "shop/empty"]);
}
