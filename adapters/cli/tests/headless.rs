use std::{fs, process::Command};

fn snake_arcade() -> Command {
    Command::new(env!("CARGO_BIN_EXE_snake-arcade"))
}

fn reported_best(stdout: &[u8]) -> u32 {
    let line = String::from_utf8_lossy(stdout);
    let mut words = line.split_whitespace();
    let _ = words.position(|word| word == "best").expect("best field");
    words
        .next()
        .expect("best value")
        .parse()
        .expect("numeric best")
}

#[test]
fn headless_run_reports_score_and_persists_best() {
    let dir = tempfile::tempdir().expect("temp dir");
    let best_file = dir.path().join("best.toml");

    let output = snake_arcade()
        .args(["--headless-ticks", "200", "--seed", "7"])
        .args(["--walls", "wrap"])
        .arg("--best-score-file")
        .arg(&best_file)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run snake-arcade");

    assert!(output.status.success(), "headless run should succeed");
    let best = reported_best(&output.stdout);
    match fs::read_to_string(&best_file) {
        Ok(stored) => assert_eq!(stored.trim(), format!("best-score = {best}")),
        Err(_) => assert_eq!(best, 0, "a recorded best score must reach the file"),
    }
}

#[test]
fn headless_runs_are_reproducible_for_a_seed() {
    let run = || {
        snake_arcade()
            .args(["--headless-ticks", "300", "--seed", "11", "--no-persist"])
            .args(["--columns", "8", "--rows", "8"])
            .env("RUST_LOG", "warn")
            .output()
            .expect("run snake-arcade")
    };

    let first = run();
    let second = run();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn persisted_best_score_is_reported_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let best_file = dir.path().join("best.toml");
    fs::write(&best_file, "best-score = 990\n").expect("seed best score");

    let output = snake_arcade()
        .args(["--headless-ticks", "1", "--seed", "1"])
        .arg("--best-score-file")
        .arg(&best_file)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run snake-arcade");

    assert!(output.status.success());
    assert_eq!(reported_best(&output.stdout), 990);
}

#[test]
fn invalid_config_file_fails_the_run() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = dir.path().join("settings.toml");
    fs::write(&config, "difficulty = \"impossible\"\n").expect("write config");

    let status = snake_arcade()
        .args(["--headless-ticks", "1", "--no-persist"])
        .arg("--config")
        .arg(&config)
        .status()
        .expect("run snake-arcade");

    assert!(!status.success());
}
