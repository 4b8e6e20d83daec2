use fivedraw_cli::{exit_code, run, run_with_input};
use serial_test::serial;
use std::io::Cursor;

struct TempEnvVar {
    key: &'static str,
    previous: Option<String>,
}

impl TempEnvVar {
    fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        // SAFETY: every test touching the environment is #[serial]
        unsafe { std::env::set_var(key, value) };
        Self { key, previous }
    }
}

impl Drop for TempEnvVar {
    fn drop(&mut self) {
        // SAFETY: see `set`
        unsafe {
            if let Some(prev) = &self.previous {
                std::env::set_var(self.key, prev);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }
}

fn run_args(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

fn play(args: &[&str], input: &str) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let code = run_with_input(args, &mut out, &mut err, &mut stdin);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn help_lists_expected_commands() {
    let (code, stdout, _) = run_args(&["fivedraw", "--help"]);
    assert_eq!(code, exit_code::SUCCESS);
    for cmd in ["play", "deal", "eval", "paytable", "cfg", "rng"] {
        assert!(stdout.contains(cmd), "help should list {}", cmd);
    }
}

#[test]
fn deal_is_deterministic_per_seed() {
    let (code_a, a, _) = run_args(&["fivedraw", "deal", "--seed", "2024"]);
    let (code_b, b, _) = run_args(&["fivedraw", "deal", "--seed", "2024"]);
    assert_eq!(code_a, 0);
    assert_eq!(code_b, 0);
    assert_eq!(a, b);
    assert!(a.contains("Ranking:"));
}

#[test]
fn eval_reports_category_and_base_payout() {
    let (code, out, err) = run_args(&["fivedraw", "eval", "KS", "KH", "KD", "4C", "4S"]);
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("Category: Full House"));
    assert!(out.contains("Base payout: $80"));
}

#[test]
fn eval_rejects_malformed_cards_on_stderr() {
    let (code, out, err) = run_args(&["fivedraw", "eval", "AS", "KS", "QS", "JS", "ZZ"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(out.is_empty());
    assert!(err.starts_with("Error:"));
}

#[test]
fn paytable_scales_with_bet() {
    let (code, out, _) = run_args(&["fivedraw", "paytable", "--bet", "30"]);
    assert_eq!(code, 0);
    assert!(out.contains("Paytable at $30"));
    assert!(out.contains("$7500"));
    assert!(out.contains("$30\n") || out.trim_end().ends_with("$30"));
}

#[test]
fn rng_prints_sample() {
    let (code, out, _) = run_args(&["fivedraw", "rng", "--seed", "1"]);
    assert_eq!(code, 0);
    assert!(out.contains("RNG sample"));
}

#[test]
#[serial]
fn cfg_reads_file_and_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fivedraw.toml");
    std::fs::write(&path, "speed = 300\nhistory = \"rounds.jsonl\"\n").unwrap();
    let _file = TempEnvVar::set("FIVEDRAW_CONFIG", path.to_str().unwrap());
    let _animate = TempEnvVar::set("FIVEDRAW_ANIMATE", "yes");

    let (code, out, err) = run_args(&["fivedraw", "cfg"]);
    assert_eq!(code, 0, "stderr: {}", err);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["speed"]["value"], 300);
    assert_eq!(json["speed"]["source"], "file");
    assert_eq!(json["history"]["value"], "rounds.jsonl");
    assert_eq!(json["animate"]["value"], true);
    assert_eq!(json["animate"]["source"], "env");
}

#[test]
#[serial]
fn invalid_config_fails_play_before_reading_input() {
    let _speed = TempEnvVar::set("FIVEDRAW_SPEED", "0");
    let (code, out, err) = play(&["fivedraw", "play"], "\n\nq\n");
    assert_eq!(code, exit_code::ERROR);
    assert!(out.is_empty());
    assert!(err.contains("Invalid configuration"));
}

#[test]
#[serial]
fn play_round_writes_history_from_flag() {
    let dir = tempfile::tempdir().unwrap();
    let history = dir.path().join("out").join("rounds.jsonl");
    let history_arg = history.to_string_lossy().into_owned();
    let (code, out, err) = play(
        &["fivedraw", "play", "--seed", "77", "--history", &history_arg],
        "\n3\n\n\nq\n",
    );
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("play: seed=77"));
    assert!(out.contains("Session over after 1 rounds."));

    let content = std::fs::read_to_string(&history).unwrap();
    assert_eq!(content.lines().count(), 1);
    let record: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
    assert_eq!(record["seed"], 77);
    assert_eq!(record["held"][2], true);
    assert!(record["ts"].is_string());
}

#[test]
#[serial]
fn play_with_same_seed_replays_the_same_session() {
    let input = "\n1\n\n\n\n\n\nq\n";
    let (_, a, _) = play(&["fivedraw", "play", "--seed", "31"], input);
    let (_, b, _) = play(&["fivedraw", "play", "--seed", "31"], input);
    assert_eq!(a, b);
}

#[test]
#[serial]
fn eof_ends_play_gracefully() {
    let (code, out, _) = play(&["fivedraw", "play", "--seed", "1"], "");
    assert_eq!(code, 0);
    assert!(out.contains("Session over"));
}
