use std::fs;
use std::path::Path;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use filebackup::BackupParameters;

fn filebackup(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("filebackup").unwrap();
    cmd.current_dir(dir)
        .env_remove("FILEBACKUP_CONFIG")
        .env("RUST_LOG", "off");
    cmd
}

fn write_config(dir: &Path, files: &[&str]) -> BackupParameters {
    let params = BackupParameters::new(dir.join("Backup"))
        .with_name("BACKUP")
        .with_frequency(Duration::from_secs(2))
        .with_expiry(Duration::from_secs(30))
        .with_files(files.iter().map(|f| dir.join(f)));
    params.save(&dir.join("filebackup.json")).unwrap();
    params
}

#[test]
fn test_init_writes_default_config() {
    let temp = TempDir::new().unwrap();

    filebackup(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written"));

    let params = BackupParameters::load(&temp.path().join("filebackup.json")).unwrap();
    assert_eq!(params.backup_name, "Backup");
    assert!(params.file_list.is_empty());
}

#[test]
fn test_init_refuses_to_overwrite_without_force() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), &["file1.txt"]);

    filebackup(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let params = BackupParameters::load(&temp.path().join("filebackup.json")).unwrap();
    assert_eq!(params.backup_name, "BACKUP");

    filebackup(temp.path()).args(["init", "--force"]).assert().success();
    let params = BackupParameters::load(&temp.path().join("filebackup.json")).unwrap();
    assert_eq!(params.backup_name, "Backup");
}

#[test]
fn test_once_creates_bundle() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("file1.txt"), "one").unwrap();
    write_config(temp.path(), &["file1.txt", "file2.txt"]);

    filebackup(temp.path())
        .arg("once")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created"))
        .stdout(predicate::str::contains("(1 file(s))"))
        .stdout(predicate::str::contains("Skipped missing file"));

    let bundles: Vec<_> = fs::read_dir(temp.path().join("Backup"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(bundles.len(), 1);
    assert!(bundles[0].starts_with("BACKUP_"));
    assert!(bundles[0].ends_with(".zip"));
}

#[test]
fn test_once_with_empty_file_list_fails() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), &[]);

    filebackup(temp.path())
        .arg("once")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one file required"));

    assert!(!temp.path().join("Backup").exists());
}

#[test]
fn test_list_shows_bundles() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("file1.txt"), "one").unwrap();
    write_config(temp.path(), &["file1.txt"]);

    filebackup(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No backups found."));

    filebackup(temp.path()).arg("once").assert().success();

    filebackup(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("BACKUP_"))
        .stdout(predicate::str::contains("Total: 1 backup(s)"));
}

#[test]
fn test_add_appends_files() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), &["file1.txt"]);

    filebackup(temp.path())
        .args(["add", "notes.md", "notes.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: notes.md"))
        .stdout(predicate::str::contains("Already listed: notes.md"));

    let params = BackupParameters::load(&temp.path().join("filebackup.json")).unwrap();
    assert_eq!(params.file_list.len(), 2);
}

#[test]
fn test_add_rejects_colliding_names() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), &["one/notes.md"]);

    filebackup(temp.path())
        .args(["add", "two/notes.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("notes.md"));

    let params = BackupParameters::load(&temp.path().join("filebackup.json")).unwrap();
    assert_eq!(params.file_list.len(), 1);
}

#[test]
fn test_run_stops_on_enter() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("file1.txt"), "one").unwrap();
    write_config(temp.path(), &["file1.txt"]);

    filebackup(temp.path())
        .arg("run")
        .write_stdin("\n")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Press Enter to stop."))
        .stdout(predicate::str::contains("Scheduler stopped."));

    assert!(temp.path().join("Backup").is_dir());
}

#[test]
fn test_config_without_file_fails() {
    let temp = TempDir::new().unwrap();

    filebackup(temp.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_config_flag_and_env() {
    let temp = TempDir::new().unwrap();
    let params = BackupParameters::new(temp.path().join("out"))
        .with_name("custom")
        .with_files([temp.path().join("file1.txt")]);
    let config = temp.path().join("elsewhere.json");
    params.save(&config).unwrap();

    filebackup(temp.path())
        .args(["--config", "elsewhere.json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bundle prefix:    custom"));

    filebackup(temp.path())
        .env("FILEBACKUP_CONFIG", &config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bundle prefix:    custom"));
}

#[test]
fn test_huge_intervals_do_not_crash_config_or_run() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("file1.txt"), "one").unwrap();
    let params = BackupParameters::new(temp.path().join("Backup"))
        .with_files([temp.path().join("file1.txt")])
        .with_frequency(Duration::from_secs(u64::MAX))
        .with_expiry(Duration::from_secs(10_000_000_000_000_000));
    params.save(&temp.path().join("filebackup.json")).unwrap();

    filebackup(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Frequency:        every "))
        .stdout(predicate::str::contains("every -").not());

    filebackup(temp.path())
        .arg("run")
        .write_stdin("\n")
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Scheduler stopped."));
}
