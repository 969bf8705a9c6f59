use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sg-cli"))
}

fn tmp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let dir = std::env::temp_dir().join(format!("snowgrad_cli_{}_{}_{}", std::process::id(), nanos, tag));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Three events, two modes. With `--phases --splitpoint 0` the first two
/// events match mode 0 (summed weight 5.0); with `--amplitudes` only the
/// third matches mode 0 (summed weight 1.0).
fn write_fixture(dir: &PathBuf) -> PathBuf {
    let path = dir.join("mc.json");
    let body = serde_json::json!({
        "energy": [150.0, 5.0e3, 3.0e6],
        "zenith": [0.1, 1.0, 2.0],
        "weight": [2.0, 3.0, 1.0],
        "snowstorm_phases": [[0.5, -0.5], [1.0, 1.0], [-1.0, 0.2]],
        "snowstorm_amplitudes": [[-0.5, 0.1], [0.0, -0.3], [0.3, 0.7]],
    });
    std::fs::write(&path, serde_json::to_string_pretty(&body).unwrap()).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn read_rows(path: &PathBuf) -> Vec<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("missing gradient table {}: {}", path.display(), e));
    text.lines()
        .map(|line| line.split(' ').map(|v| v.parse::<f64>().unwrap()).collect())
        .collect()
}

#[test]
fn split_phases_writes_gradient_tables() {
    let dir = tmp_dir("phases");
    let fixture = write_fixture(&dir);

    let out = run(&[
        "--infiles",
        fixture.to_string_lossy().as_ref(),
        "--outpath",
        dir.to_string_lossy().as_ref(),
        "--phases",
        "--modes",
        "0",
        "1",
    ]);
    assert!(
        out.status.success(),
        "split should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    for name in [
        "SplitCounts_Phs_Energy_0.csv",
        "SplitCounts_Phs_Zenith_0.csv",
        "SplitCounts_Phs_Energy_1.csv",
        "SplitCounts_Phs_Zenith_1.csv",
    ] {
        assert!(dir.join(name).exists(), "expected output {}", name);
    }

    let rows = read_rows(&dir.join("SplitCounts_Phs_Energy_0.csv"));
    assert_eq!(rows.len(), 20, "one row per energy bin");
    for row in &rows {
        assert_eq!(row.len(), 6, "six columns per row");
        assert_eq!(row[2], row[4], "duplicated count column");
        assert_eq!(row[3], row[5], "duplicated error column");
        assert!(row[3] >= 0.0, "uncertainties are non-negative");
    }
    let total: f64 = rows.iter().map(|r| r[2]).sum();
    assert!((total - 5.0).abs() < 1e-9, "summed weight of matching events, got {total}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn amplitudes_axis_uses_amp_tag() {
    let dir = tmp_dir("amplitudes");
    let fixture = write_fixture(&dir);

    let out = run(&[
        "-i",
        fixture.to_string_lossy().as_ref(),
        "-o",
        dir.to_string_lossy().as_ref(),
        "-a",
        "-m",
        "0",
    ]);
    assert!(
        out.status.success(),
        "split should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    let rows = read_rows(&dir.join("SplitCounts_Amp_Energy_0.csv"));
    let total: f64 = rows.iter().map(|r| r[2]).sum();
    assert!((total - 1.0).abs() < 1e-9, "only the third event matches, got {total}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn event_cap_truncates_to_prefix() {
    let dir = tmp_dir("cap");
    let fixture = write_fixture(&dir);

    let out = run(&[
        "-i",
        fixture.to_string_lossy().as_ref(),
        "-o",
        dir.to_string_lossy().as_ref(),
        "-p",
        "-m",
        "0",
        "--max_events",
        "1",
    ]);
    assert!(
        out.status.success(),
        "split should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    // Only the first matching event (weight 2.0) survives the cap.
    let rows = read_rows(&dir.join("SplitCounts_Phs_Energy_0.csv"));
    let total: f64 = rows.iter().map(|r| r[2]).sum();
    assert!((total - 2.0).abs() < 1e-9, "cap must be a prefix take, got {total}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn empty_mode_list_splits_all_modes() {
    let dir = tmp_dir("all_modes");
    let fixture = write_fixture(&dir);

    let out = run(&[
        "-i",
        fixture.to_string_lossy().as_ref(),
        "-o",
        dir.to_string_lossy().as_ref(),
        "-p",
    ]);
    assert!(
        out.status.success(),
        "split should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(dir.join("SplitCounts_Phs_Energy_0.csv").exists());
    assert!(dir.join("SplitCounts_Phs_Energy_1.csv").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rerun_fails_on_existing_gradient() {
    let dir = tmp_dir("rerun");
    let fixture = write_fixture(&dir);

    let args = [
        "-i".to_string(),
        fixture.to_string_lossy().into_owned(),
        "-o".to_string(),
        dir.to_string_lossy().into_owned(),
        "-p".to_string(),
        "-m".to_string(),
        "0".to_string(),
    ];
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let first = run(&args);
    assert!(first.status.success(), "first run should succeed");

    let second = run(&args);
    assert!(!second.status.success(), "second run must not clobber existing tables");
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("already exists"), "unexpected stderr: {}", stderr);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn both_axes_rejected() {
    let dir = tmp_dir("both_axes");
    let fixture = write_fixture(&dir);

    let out = run(&["-i", fixture.to_string_lossy().as_ref(), "-p", "-a"]);
    assert!(!out.status.success(), "expected configuration error");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("simultaneously"), "unexpected stderr: {}", stderr);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_axis_rejected() {
    let dir = tmp_dir("no_axis");
    let fixture = write_fixture(&dir);

    let out = run(&["-i", fixture.to_string_lossy().as_ref()]);
    assert!(!out.status.success(), "expected configuration error");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("axis"), "unexpected stderr: {}", stderr);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_infiles_rejected() {
    let out = run(&["-p"]);
    assert!(!out.status.success(), "expected configuration error");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("input file"), "unexpected stderr: {}", stderr);
}

#[test]
fn unknown_mode_rejected() {
    let dir = tmp_dir("bad_mode");
    let fixture = write_fixture(&dir);

    let out = run(&[
        "-i",
        fixture.to_string_lossy().as_ref(),
        "-o",
        dir.to_string_lossy().as_ref(),
        "-p",
        "-m",
        "9",
    ]);
    assert!(!out.status.success(), "expected data shape error");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("out of range"), "unexpected stderr: {}", stderr);

    let _ = std::fs::remove_dir_all(&dir);
}
