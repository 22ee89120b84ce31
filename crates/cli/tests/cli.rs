use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn qtevo() -> Command {
    Command::cargo_bin("qtevo").unwrap()
}

#[test]
fn test_init_writes_config() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config.json");

    qtevo()
        .arg("init")
        .arg("--output")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written"));

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["execution"]["num_populations"], 1);
}

#[test]
fn test_init_population_param() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config.json");

    qtevo()
        .arg("init")
        .arg("--output")
        .arg(&path)
        .arg("--population-size")
        .arg("10")
        .arg("--generations")
        .arg("50")
        .assert()
        .success()
        .stdout(predicate::str::contains("Population Size: 10"))
        .stdout(predicate::str::contains("Generations: 50"));
}

#[test]
fn test_init_rejects_bad_selfing_rate() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config.json");

    qtevo()
        .arg("init")
        .arg("--output")
        .arg(&path)
        .arg("--selfing-rate")
        .arg("1.5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid simulation parameters"));

    assert!(!path.exists());
}

#[test]
fn test_run_missing_config() {
    let temp = tempdir().unwrap();

    qtevo()
        .arg("run")
        .arg("--config")
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("qtevo init"));
}

#[test]
fn test_init_then_run() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("config.json");
    let summary = temp.path().join("summary.json");

    qtevo()
        .args(["init", "-n", "50", "-g", "20", "--mu-neutral", "0.05", "--mu-selected", "0.01"])
        .args(["-p", "2", "--seed", "7", "--output"])
        .arg(&config)
        .assert()
        .success();

    qtevo()
        .args(["-t", "2", "run", "--nsam", "20", "--config"])
        .arg(&config)
        .arg("--output")
        .arg(&summary)
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary written"));

    let text = std::fs::read_to_string(&summary).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["generations"], 20);
    let pops = json["populations"].as_array().unwrap();
    assert_eq!(pops.len(), 2);
    assert_eq!(pops[0]["generation"], 20);
    assert!(pops[0]["props"]["wbar"].is_number());
    assert!(pops[0].get("tajimas_d").is_some());
}

#[test]
fn test_run_prints_json_to_stdout() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("config.json");

    qtevo()
        .args(["init", "-n", "20", "-g", "5", "--seed", "1", "--output"])
        .arg(&config)
        .assert()
        .success();

    let output = qtevo().args(["run", "--config"]).arg(&config).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["populations"][0]["size"], 20);
}
