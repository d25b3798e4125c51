use repotree::{
    BinaryDetection, GenerateResponse, RepoUrl, RepotreeBuilder, Session, attach_contents,
    fetch_plan, output, parse_path_list, scan_local, snapshot_from_entries, walk_local,
};
use std::fs;
use tempfile::tempdir;
#[test]
fn integration_local_scan() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/main.py"), "print('hi')").unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();
    fs::write(dir.path().join("README.md"), "# Demo").unwrap();
    let options = RepotreeBuilder::new(dir.path()).build();
    let snapshot = scan_local(&options).unwrap();
    assert_eq!(
        snapshot.rendered,
        "├── README.md\n├── package.json\n└── src\n    └── main.py"
    );
    assert_eq!(snapshot.readme.as_deref(), Some("# Demo"));
    let key_paths: Vec<_> = snapshot.key_files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(key_paths, ["package.json", "src/main.py"]);
    assert_eq!(snapshot.key_files[1].content, "print('hi')");
}
#[test]
fn integration_key_file_limits_and_binary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.go"), "A".repeat(200)).unwrap();
    fs::write(dir.path().join("app.py"), vec![0u8, 1, 2, 3]).unwrap();
    fs::write(dir.path().join("go.mod"), "module x").unwrap();
    let options = RepotreeBuilder::new(dir.path())
        .key_file_size_limit(100)
        .binary_detection(BinaryDetection::Simple)
        .build();
    let snapshot = scan_local(&options).unwrap();
    let key_paths: Vec<_> = snapshot.key_files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(key_paths, ["go.mod"]);
    assert!(snapshot.readme.is_none());
}
#[test]
fn integration_ignore_patterns() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("build")).unwrap();
    fs::write(dir.path().join("build/out.bin"), "x").unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::write(dir.path().join("b.log"), "b").unwrap();
    let options = RepotreeBuilder::new(dir.path())
        .ignore_patterns(vec!["*.log".into(), "build".into()])
        .build();
    let snapshot = scan_local(&options).unwrap();
    assert_eq!(snapshot.rendered, "└── a.txt");
}
#[test]
fn integration_strict_mode() {
    let entries = parse_path_list("x\nx/y\n");
    let lenient = RepotreeBuilder::new(".").build();
    let snapshot = snapshot_from_entries(entries.clone(), &lenient).unwrap();
    assert_eq!(snapshot.rendered, "└── x");

    let strict = RepotreeBuilder::new(".").strict(true).build();
    assert!(snapshot_from_entries(entries, &strict).is_err());
}
#[test]
fn integration_session_lifecycle() {
    let entries = parse_path_list("src/index.js\npackage.json\n");
    let options = RepotreeBuilder::new(".").build();
    let snapshot = snapshot_from_entries(entries, &options).unwrap();
    assert_eq!(snapshot.key_file_paths, ["src/index.js", "package.json"]);

    let mut session = Session::begin("https://github.com/octo/demo.git").unwrap();
    session.load(snapshot);
    assert_eq!(session.structure(), "├── src\n│   └── index.js\n└── package.json");
    assert_eq!(session.readme(), None);

    let request = session.generate_request();
    assert_eq!(request.repo_url, "https://github.com/octo/demo.git");
    assert_eq!(request.repo_structure.as_deref(), Some(session.structure()));
    assert!(request.existing_readme.is_none());
    assert!(request.file_contents.is_none());

    let response = GenerateResponse {
        readme: "```markdown\n# Demo\n```".into(),
    };
    session.apply_response(&response);
    assert_eq!(session.readme(), Some("# Demo"));

    session.set_readme("# Edited");
    let dir = tempdir().unwrap();
    let written = session.export_readme(dir.path()).unwrap();
    assert_eq!(fs::read_to_string(written).unwrap(), "# Edited");
}
#[test]
fn integration_output_formats() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), "module demo").unwrap();
    let options = RepotreeBuilder::new(dir.path()).build();
    let snapshot = scan_local(&options).unwrap();

    let tree = output::format_snapshot(&snapshot, output::OutputFormat::Tree, false).unwrap();
    assert_eq!(tree, "└── go.mod\n");

    let md = output::format_snapshot(&snapshot, output::OutputFormat::Markdown, false).unwrap();
    assert!(md.starts_with("```text\n└── go.mod\n```\n"));
    assert!(md.contains("## go.mod\n\n```go-mod\nmodule demo\n```"));

    let json = output::format_snapshot(&snapshot, output::OutputFormat::Json, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["rendered"], "└── go.mod");
    assert!(value["tree"]["go.mod"].is_null());

    let out = dir.path().join("snapshot.md");
    output::write_snapshot_to_file(&snapshot, output::OutputFormat::Markdown, &out, false).unwrap();
    assert_eq!(fs::read_to_string(out).unwrap(), md);
}
fn walked_paths(options: &repotree::RepotreeOptions) -> Vec<String> {
    walk_local(options)
        .unwrap()
        .into_iter()
        .map(|e| e.path)
        .collect()
}
#[test]
fn integration_hidden_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".env"), "KEY=1").unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    let options = RepotreeBuilder::new(dir.path()).build();
    assert_eq!(walked_paths(&options), ["a.txt"]);
    let options = RepotreeBuilder::new(dir.path()).include_hidden(true).build();
    assert_eq!(walked_paths(&options), [".env", "a.txt"]);
}
#[test]
fn integration_max_depth() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
    fs::write(dir.path().join("top.txt"), "t").unwrap();
    fs::write(dir.path().join("nested/mid.txt"), "m").unwrap();
    fs::write(dir.path().join("nested/deeper/low.txt"), "l").unwrap();
    let options = RepotreeBuilder::new(dir.path()).max_depth(1).build();
    assert_eq!(walked_paths(&options), ["top.txt"]);
    let options = RepotreeBuilder::new(dir.path()).max_depth(2).build();
    assert_eq!(walked_paths(&options), ["nested/mid.txt", "top.txt"]);
    let options = RepotreeBuilder::new(dir.path()).no_limit_depth().build();
    assert_eq!(
        walked_paths(&options),
        ["nested/deeper/low.txt", "nested/mid.txt", "top.txt"]
    );
}
#[test]
fn integration_gitignore() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".gitignore"), "secret.txt\ntarget/\n").unwrap();
    fs::create_dir(dir.path().join("target")).unwrap();
    fs::write(dir.path().join("target/out.txt"), "o").unwrap();
    fs::write(dir.path().join("secret.txt"), "s").unwrap();
    fs::write(dir.path().join("keep.txt"), "k").unwrap();
    let options = RepotreeBuilder::new(dir.path()).build();
    assert_eq!(walked_paths(&options), ["keep.txt"]);
    let options = RepotreeBuilder::new(dir.path())
        .respect_gitignore(false)
        .build();
    assert_eq!(walked_paths(&options), ["keep.txt", "secret.txt", "target/out.txt"]);
}
#[cfg(unix)]
#[test]
fn integration_follow_links() {
    let outside = tempdir().unwrap();
    fs::write(outside.path().join("inner.txt"), "i").unwrap();
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();
    let options = RepotreeBuilder::new(dir.path()).build();
    assert_eq!(walked_paths(&options), ["a.txt"]);
    let options = RepotreeBuilder::new(dir.path()).follow_links(true).build();
    assert_eq!(walked_paths(&options), ["a.txt", "linked/inner.txt"]);
}
#[cfg(unix)]
#[test]
fn integration_ignored_directories_are_not_entered() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("node_modules")).unwrap();
    fs::write(dir.path().join("node_modules/pkg.js"), "x").unwrap();
    // Following this link would be reported as a filesystem loop.
    std::os::unix::fs::symlink(dir.path(), dir.path().join("node_modules/loop")).unwrap();
    fs::write(dir.path().join("index.js"), "y").unwrap();
    let options = RepotreeBuilder::new(dir.path())
        .follow_links(true)
        .ignore_patterns(vec!["node_modules".into()])
        .build();
    assert_eq!(walked_paths(&options), ["index.js"]);
}
#[test]
fn integration_file_as_root() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("main.go");
    fs::write(&file, "package main").unwrap();
    let options = RepotreeBuilder::new(&file).build();
    let snapshot = scan_local(&options).unwrap();
    assert_eq!(snapshot.rendered, "└── main.go");
    assert_eq!(snapshot.key_files.len(), 1);
    assert_eq!(snapshot.key_files[0].path, "main.go");
    assert_eq!(snapshot.key_files[0].content, "package main");
}
#[test]
fn integration_listing_with_fetched_contents() {
    let entries = parse_path_list("README.md\nsrc/main.py\nrequirements.txt\ndocs/a.md\n");
    let options = RepotreeBuilder::new(".").build();
    let mut snapshot = snapshot_from_entries(entries, &options).unwrap();
    assert!(snapshot.readme.is_none());

    let repo = RepoUrl::parse("https://github.com/octo/demo").unwrap();
    let plan = fetch_plan(&snapshot, &repo, "main");
    let planned: Vec<_> = plan.iter().map(|t| t.path.as_str()).collect();
    assert_eq!(planned, ["README.md", "src/main.py", "requirements.txt"]);
    assert_eq!(
        plan[1].url,
        "https://raw.githubusercontent.com/octo/demo/main/src/main.py"
    );

    attach_contents(&mut snapshot, |path| {
        Ok(match path {
            "README.md" => Some("# Demo".to_string()),
            "src/main.py" => Some("print(1)".to_string()),
            _ => None,
        })
    })
    .unwrap();
    assert_eq!(snapshot.readme.as_deref(), Some("# Demo"));
    let fetched: Vec<_> = snapshot.key_files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(fetched, ["src/main.py"]);

    let mut session = Session::begin(repo.as_str()).unwrap();
    session.load(snapshot);
    let request = session.generate_request();
    assert_eq!(request.existing_readme.as_deref(), Some("# Demo"));
    let files = request.file_contents.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].content, "print(1)");
}
#[test]
fn integration_attach_contents_propagates_errors() {
    let entries = parse_path_list("package.json\n");
    let options = RepotreeBuilder::new(".").build();
    let mut snapshot = snapshot_from_entries(entries, &options).unwrap();
    let result = attach_contents(&mut snapshot, |_| {
        Err(repotree::RepotreeError::Api("Not Found".into()))
    });
    assert!(result.is_err());
    assert!(snapshot.key_files.is_empty());
}
