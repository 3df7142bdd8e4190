//! Whole-run properties of a scan over a realistic tree.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use codestatlib::{count_directory, export_json, CountOptions, ReportQuerySet};
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn create_tree(root: &Path) {
    write(
        root,
        "CMakeLists.txt",
        "# top-level build\ncmake_minimum_required(VERSION 3.16)\n\nproject(widgets)\n",
    );
    write(
        root,
        "src/main.cpp",
        "// comment\n\nint x = 1;\n/* start\nend */\nint main() { return x; }\n",
    );
    write(
        root,
        "src/widgets/clock.h",
        "#pragma once\n/** Clock widget */\nclass Clock {};\n",
    );
    write(
        root,
        "src/widgets/clock.cpp",
        "#include \"clock.h\"\n\n// tick\nvoid tick() {}\n",
    );
    write(root, "tools/stats.py", "# header comment\n\nprint(1)\n");
    write(root, "config/app.json", "{\n  \"a\": 1\n}\n");
    write(root, "docs/guide.md", "# Guide\n\nUse it.\n");
    write(root, "src/empty.cpp", "");

    // Excluded by file name even though the extension is countable
    write(root, "src/old.cpp.bak", "int old;\n");
    write(root, "src/debug.log", "log line\n");
    write(root, "src/scratch.tmp", "x\n");
    write(root, "src/.DS_Store", "meta\n");

    // Excluded directories
    write(root, ".git/hooks/pre-commit.py", "print('hook')\n");
    write(root, "build/generated.cpp", "int generated;\n");
    write(root, "node_modules/pkg/index.js", "var x = 1;\n");
    write(root, "x64/Release/obj.cpp", "int y;\n");
}

#[test]
fn test_every_record_is_consistent() {
    let temp = tempdir().unwrap();
    create_tree(temp.path());
    let result = count_directory(temp.path(), &CountOptions::new()).unwrap();

    assert!(!result.files.is_empty());
    for record in &result.files {
        assert!(
            record.counts.is_consistent(),
            "inconsistent counts for {}",
            record.path
        );
    }
}

#[test]
fn test_totals_agree_across_groupings() {
    let temp = tempdir().unwrap();
    create_tree(temp.path());
    let result = count_directory(temp.path(), &CountOptions::new().include_docs(true)).unwrap();

    let from_records: u64 = result.files.iter().map(|f| f.counts.total).sum();
    let from_categories: u64 = result.by_category.values().map(|c| c.counts.total).sum();
    let from_directories: u64 = result.by_directory.values().map(|d| d.counts.total).sum();

    assert_eq!(result.summary.total_lines, from_records);
    assert_eq!(result.summary.total_lines, from_categories);
    assert_eq!(result.summary.total_lines, from_directories);

    let category_files: u64 = result.by_category.values().map(|c| c.files).sum();
    assert_eq!(result.summary.total_files, category_files);
}

#[test]
fn test_excluded_names_and_directories_never_appear() {
    let temp = tempdir().unwrap();
    create_tree(temp.path());
    let result = count_directory(temp.path(), &CountOptions::new()).unwrap();

    for record in &result.files {
        for needle in [".bak", ".log", ".tmp", ".DS_Store", ".git", "build", "node_modules", "x64"]
        {
            assert!(
                !record.path.contains(needle),
                "{} should have been excluded",
                record.path
            );
        }
    }
}

#[test]
fn test_sample_file_counts() {
    let temp = tempdir().unwrap();
    create_tree(temp.path());
    let result = count_directory(temp.path(), &CountOptions::new()).unwrap();

    let find = |suffix: &str| {
        result
            .files
            .iter()
            .find(|f| f.path.replace('\\', "/").ends_with(suffix))
            .unwrap()
            .counts
    };

    let main = find("src/main.cpp");
    assert_eq!((main.total, main.code, main.comment, main.blank), (6, 2, 3, 1));

    let py = find("tools/stats.py");
    assert_eq!((py.total, py.code, py.comment, py.blank), (3, 1, 1, 1));

    let cmake = find("CMakeLists.txt");
    assert_eq!((cmake.total, cmake.code, cmake.comment, cmake.blank), (4, 2, 1, 1));
}

#[test]
fn test_empty_file_contributes_nothing() {
    let temp = tempdir().unwrap();
    create_tree(temp.path());
    let result = count_directory(temp.path(), &CountOptions::new()).unwrap();

    assert!(!result.files.iter().any(|f| f.path.ends_with("empty.cpp")));
    assert!(!result
        .by_category
        .values()
        .flat_map(|c| c.file_list.iter())
        .any(|p| p.ends_with("empty.cpp")));
    // main.cpp and clock.cpp
    assert_eq!(result.by_category["C++ source"].files, 2);
}

#[test]
fn test_category_file_lists_match_records() {
    let temp = tempdir().unwrap();
    create_tree(temp.path());
    let result = count_directory(temp.path(), &CountOptions::new().include_docs(true)).unwrap();

    for (label, totals) in &result.by_category {
        let listed: BTreeSet<&str> = totals.file_list.iter().map(|s| s.as_str()).collect();
        let recorded: BTreeSet<&str> = result
            .files
            .iter()
            .filter(|f| &f.category == label)
            .map(|f| f.path.as_str())
            .collect();
        assert_eq!(listed, recorded, "file list mismatch for {label}");
    }
}

#[test]
fn test_top_files_bounded_and_ordered() {
    let temp = tempdir().unwrap();
    create_tree(temp.path());
    for i in 0..25 {
        write(
            temp.path(),
            &format!("gen/file{i:02}.c"),
            &"int x;\n".repeat(i % 4 + 1),
        );
    }
    let result = count_directory(temp.path(), &CountOptions::new()).unwrap();
    assert!(result.files.len() > 20);

    let qs = ReportQuerySet::from_result(&result, 20);
    assert_eq!(qs.top_files.len(), 20);
    assert!(qs
        .top_files
        .windows(2)
        .all(|w| w[0].counts.total >= w[1].counts.total));

    let again = ReportQuerySet::from_result(&result, 20);
    let paths = |q: &ReportQuerySet| q.top_files.iter().map(|f| f.path.clone()).collect::<Vec<_>>();
    assert_eq!(paths(&qs), paths(&again));

    let small = ReportQuerySet::from_result(&result, 100);
    assert_eq!(small.top_files.len(), result.files.len());
}

#[test]
fn test_repeated_runs_match_apart_from_timestamp() {
    let temp = tempdir().unwrap();
    create_tree(temp.path());
    let options = CountOptions::new().include_docs(true);

    let strip = |json: String| {
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value.as_object_mut().unwrap().remove("timestamp");
        value
    };

    let first = count_directory(temp.path(), &options).unwrap();
    let second = count_directory(temp.path(), &options).unwrap();

    assert_eq!(first.summary.total_lines, second.summary.total_lines);
    assert_eq!(
        strip(export_json(&first).unwrap()),
        strip(export_json(&second).unwrap())
    );
}
