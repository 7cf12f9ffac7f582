//! Headless match driver.
//!
//! 외부 프레임 드라이버의 CLI 버전: 캐릭터 JSON을 로드하고, 스크립트된
//! 입력을 고정 틱레이트로 공급한 뒤, 결과를 JSON으로 출력한다. 렌더러가
//! 없으므로 이펙트 요청은 수만 센다.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use vs_core::engine::animation::AnimationSet;
use vs_core::engine::match_loop::MatchEngine;
use vs_core::{
    Character, CharacterFileData, EffectCollector, EngineConfig, InputSnapshot, Side,
};

#[derive(Parser)]
#[command(name = "vs_cli")]
#[command(about = "Run headless vs_core matches", long_about = None)]
struct Cli {
    /// Log state transitions to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a match with scripted inputs
    Run {
        /// Player 1 character file
        #[arg(long)]
        p1: PathBuf,

        /// Player 2 character file
        #[arg(long)]
        p2: PathBuf,

        /// Input script file (key spans per player)
        #[arg(long)]
        script: Option<PathBuf>,

        /// Engine tuning config file (defaults to the reference revision)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of ticks to simulate
        #[arg(long, default_value = "600")]
        ticks: u64,

        /// Floor height in world units
        #[arg(long, default_value = "140.0")]
        floor: f32,

        /// Print a JSON line whenever a state or health value changes
        #[arg(long)]
        trace: bool,
    },

    /// Validate a character file (cancel table, attack list) without running
    Validate {
        /// Character file to check
        #[arg(long)]
        file: PathBuf,
    },
}

/// One held-keys interval of the input script.
#[derive(Debug, Clone, Deserialize)]
struct KeySpan {
    from: u64,
    to: u64,
    #[serde(default)]
    keys: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct InputScript {
    #[serde(default)]
    p1: Vec<KeySpan>,
    #[serde(default)]
    p2: Vec<KeySpan>,
}

fn snapshot_at(spans: &[KeySpan], tick: u64) -> InputSnapshot {
    let mut snap = InputSnapshot::neutral();
    for span in spans.iter().filter(|s| s.from <= tick && tick <= s.to) {
        for key in &span.keys {
            match key.as_str() {
                "up" => snap.up = true,
                "down" => snap.down = true,
                "left" => snap.left = true,
                "right" => snap.right = true,
                "lp" => snap.lp = true,
                "rp" => snap.rp = true,
                "lk" => snap.lk = true,
                "rk" => snap.rk = true,
                other => log::warn!("unknown key binding in script: {other}"),
            }
        }
    }
    snap
}

#[derive(Serialize)]
struct CharacterReport<'a> {
    name: &'a str,
    health: i32,
    state: &'a str,
    x: f32,
    y: f32,
    facing: i8,
}

fn report<'a>(ch: &'a Character) -> CharacterReport<'a> {
    CharacterReport {
        name: &ch.name,
        health: ch.health,
        state: ch.state_name(),
        x: ch.pos.0,
        y: ch.pos.1,
        facing: ch.facing,
    }
}

fn load_character(path: &PathBuf, side: Side, x: f32, floor: f32) -> Result<Character> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading character file {}", path.display()))?;
    let file = CharacterFileData::from_json(&json)
        .with_context(|| format!("parsing character file {}", path.display()))?;
    let anims = Arc::new(AnimationSet::from_data(file.default_duration, file.animations));
    Character::from_data(&file.character, anims, side, (x, floor))
        .with_context(|| format!("resolving character tables in {}", path.display()))
}

fn run(
    p1: PathBuf,
    p2: PathBuf,
    script: Option<PathBuf>,
    config: Option<PathBuf>,
    ticks: u64,
    floor: f32,
    trace: bool,
) -> Result<()> {
    let script: InputScript = match script {
        Some(path) => serde_json::from_str(
            &std::fs::read_to_string(&path)
                .with_context(|| format!("reading script {}", path.display()))?,
        )
        .context("parsing input script")?,
        None => InputScript::default(),
    };

    let config: EngineConfig = match config {
        Some(path) => serde_json::from_str(
            &std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?,
        )
        .context("parsing engine config")?,
        None => EngineConfig::default(),
    };

    let left = load_character(&p1, Side::P1, 100.0, floor)?;
    let mut right = load_character(&p2, Side::P2, 160.0, floor)?;
    right.facing = -right.default_facing;

    let mut engine = MatchEngine::new(left, right, floor, config);
    let mut sink = EffectCollector::new();

    let mut last_line = String::new();
    for tick in 0..ticks {
        let inputs = [snapshot_at(&script.p1, tick), snapshot_at(&script.p2, tick)];
        engine.tick(inputs, &mut sink);

        if trace {
            // 상태/체력이 바뀐 틱만 출력 (트레이스 잡음 억제)
            let key = format!(
                "{}|{}|{}|{}",
                engine.character(Side::P1).state_name(),
                engine.character(Side::P1).health,
                engine.character(Side::P2).state_name(),
                engine.character(Side::P2).health,
            );
            if key != last_line {
                let line = serde_json::json!({
                    "tick": engine.tick_count(),
                    "hitStop": engine.hit_stop(),
                    "p1": report(engine.character(Side::P1)),
                    "p2": report(engine.character(Side::P2)),
                });
                println!("{line}");
                last_line = key;
            }
        }
    }

    let summary = serde_json::json!({
        "ticks": engine.tick_count(),
        "hitStop": engine.hit_stop(),
        "p1": report(engine.character(Side::P1)),
        "p2": report(engine.character(Side::P2)),
        "effectsSpawned": sink.spawned.len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn validate(file: PathBuf) -> Result<()> {
    let json = std::fs::read_to_string(&file)
        .with_context(|| format!("reading character file {}", file.display()))?;
    let data = CharacterFileData::from_json(&json)
        .with_context(|| format!("parsing character file {}", file.display()))?;
    let anims = Arc::new(AnimationSet::from_data(
        data.default_duration,
        data.animations.clone(),
    ));
    Character::from_data(&data.character, anims, Side::P1, (0.0, 0.0))
        .with_context(|| format!("resolving character tables in {}", file.display()))?;

    // Warn (not fail) on animations the state machine will look up: missing
    // data degrades to no-ops at runtime, but authors usually want to know.
    for name in ["idle", "crouch", "walkF", "walkB"] {
        if !data.animations.contains_key(name) {
            log::warn!("{}: no '{name}' animation authored", data.character.name);
        }
    }

    println!("ok: {}", data.character.name);
    Ok(())
}

/// Minimal stderr logger behind the `log` facade.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Debug
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Debug);
    }

    match cli.command {
        Commands::Run { p1, p2, script, config, ticks, floor, trace } => {
            run(p1, p2, script, config, ticks, floor, trace)
        }
        Commands::Validate { file } => validate(file),
    }
}
