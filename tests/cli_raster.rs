use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "spike-raster-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn run_raster(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spike-raster"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("run spike-raster")
}

fn loaded_events(stdout: &str) -> Option<usize> {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Loaded events: "))
        .and_then(|n| n.trim().parse().ok())
}

#[test]
fn renders_window_and_reports_counts() {
    let dir = unique_temp_dir("cli-window");
    let input = write_file(
        &dir,
        "spikes.csv",
        "time_ms,neuron_id,step\n0.500,3,1\n1.200,7,2\n2.900,3,6\n",
    );
    let output_png = dir.join("plots").join("raster.png");
    let summary = dir.join("summary.json");

    let output = run_raster(
        &dir,
        &[
            "--input",
            input.to_str().unwrap(),
            "--output",
            output_png.to_str().unwrap(),
            "--start-ms",
            "1.0",
            "--dpi",
            "40",
            "--summary-json",
            summary.to_str().unwrap(),
        ],
    );
    assert!(
        output.status.success(),
        "spike-raster failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(loaded_events(&stdout), Some(2), "stdout={stdout}");
    assert!(
        stdout.contains(&format!("Wrote raster: {}", output_png.display())),
        "stdout={stdout}"
    );

    let img = image::open(&output_png).expect("decode raster png");
    assert_eq!((img.width(), img.height()), (480, 240));

    let raw = fs::read_to_string(&summary).expect("read summary.json");
    let v: Value = serde_json::from_str(&raw).expect("parse summary.json");
    assert_eq!(v["events"], 2);
    assert_eq!(v["min_neuron_id"], 3);
    assert_eq!(v["max_neuron_id"], 7);
    assert_eq!(v["first_time_ms"], 1.2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cap_limits_loaded_events() {
    let dir = unique_temp_dir("cli-cap");
    let mut csv = String::from("time_ms,neuron_id\n");
    for i in 0..50 {
        csv.push_str(&format!("{}.0,{}\n", i, i % 5));
    }
    let input = write_file(&dir, "spikes.csv", &csv);
    let output_png = dir.join("raster.png");

    let output = run_raster(
        &dir,
        &[
            "--input",
            input.to_str().unwrap(),
            "--output",
            output_png.to_str().unwrap(),
            "--max-events",
            "10",
            "--dpi",
            "30",
        ],
    );
    assert!(
        output.status.success(),
        "spike-raster failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(loaded_events(&String::from_utf8_lossy(&output.stdout)), Some(10));
    assert!(output_png.is_file());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn header_only_input_writes_placeholder_image() {
    let dir = unique_temp_dir("cli-empty");
    let input = write_file(&dir, "spikes.csv", "time_ms,neuron_id,step\n");
    let output_png = dir.join("empty.png");

    let output = run_raster(
        &dir,
        &[
            "--input",
            input.to_str().unwrap(),
            "--output",
            output_png.to_str().unwrap(),
            "--dpi",
            "30",
        ],
    );
    assert!(
        output.status.success(),
        "spike-raster failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(loaded_events(&String::from_utf8_lossy(&output.stdout)), Some(0));
    assert!(output_png.is_file());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_row_fails_without_output() {
    let dir = unique_temp_dir("cli-malformed");
    let input = write_file(&dir, "spikes.csv", "time_ms,neuron_id\nabc,1\n");
    let output_png = dir.join("raster.png");

    let output = run_raster(
        &dir,
        &[
            "--input",
            input.to_str().unwrap(),
            "--output",
            output_png.to_str().unwrap(),
        ],
    );
    assert!(!output.status.success(), "malformed input should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed input"), "stderr={stderr}");
    assert!(!output_png.exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_columns_fail() {
    let dir = unique_temp_dir("cli-columns");
    let input = write_file(&dir, "spikes.csv", "foo,bar\n1,2\n");
    let output_png = dir.join("raster.png");

    let output = run_raster(
        &dir,
        &[
            "--input",
            input.to_str().unwrap(),
            "--output",
            output_png.to_str().unwrap(),
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("time_ms"), "stderr={stderr}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn oversized_dpi_fails_cleanly() {
    let dir = unique_temp_dir("cli-dpi");
    let input = write_file(&dir, "spikes.csv", "time_ms,neuron_id\n1.0,1\n");
    let output_png = dir.join("raster.png");

    let output = run_raster(
        &dir,
        &[
            "--input",
            input.to_str().unwrap(),
            "--output",
            output_png.to_str().unwrap(),
            "--dpi",
            "6000",
        ],
    );
    assert_eq!(output.status.code(), Some(1), "expected an error exit, not an abort");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration error"), "stderr={stderr}");
    assert!(!output_png.exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn output_path_is_required() {
    let dir = unique_temp_dir("cli-args");
    let input = write_file(&dir, "spikes.csv", "time_ms,neuron_id\n1.0,1\n");

    let output = run_raster(&dir, &["--input", input.to_str().unwrap()]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn generated_sample_round_trips_through_raster() {
    let dir = unique_temp_dir("cli-sample");
    let spikes = dir.join("data").join("spikes.csv");

    let generated = Command::new(env!("CARGO_BIN_EXE_generate_sample"))
        .args([
            "--output",
            spikes.to_str().unwrap(),
            "--neurons",
            "20",
            "--duration-ms",
            "200",
            "--rate-hz",
            "40",
        ])
        .output()
        .expect("run generate_sample");
    assert!(
        generated.status.success(),
        "generate_sample failed: stderr={}",
        String::from_utf8_lossy(&generated.stderr)
    );

    let header = fs::read_to_string(&spikes).expect("read spikes.csv");
    assert!(header.starts_with("time_ms,neuron_id,step\n"));

    let output_png = dir.join("raster.png");
    let output = run_raster(
        &dir,
        &[
            "--input",
            spikes.to_str().unwrap(),
            "--output",
            output_png.to_str().unwrap(),
            "--end-ms",
            "100",
            "--dpi",
            "30",
        ],
    );
    assert!(
        output.status.success(),
        "spike-raster failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let loaded = loaded_events(&String::from_utf8_lossy(&output.stdout)).expect("event count");
    assert!(loaded > 0, "expected some spikes in the first 100 ms");

    let _ = fs::remove_dir_all(&dir);
}
