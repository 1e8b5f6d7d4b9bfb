use std::io::{self, BufRead};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use crossbeam_channel::{unbounded, Receiver};
use log::{error, info, warn};
use skill_engine::comp::*;
use skill_engine::config::CONFIG;
use skill_engine::{Hotkey, SkillDatabase, State};
use vek::Vec2;

/// 固定頻率 tick
struct Clock {
    interval: Duration,
    last: Instant,
}

impl Clock {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }

    /// 等到下一個 tick，回傳經過的秒數
    fn tick(&mut self) -> f32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.interval {
            thread::sleep(self.interval - elapsed);
        }
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt.as_secs_f32()
    }
}

fn init_logger() {
    if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
        let fallback = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} [{}] {} {}",
                    Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(log::LevelFilter::Info)
            .chain(io::stdout())
            .apply();
        if fallback.is_ok() {
            warn!("無法讀取 log4rs.yml，改用預設 log 輸出: {}", e);
        }
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line.trim().to_string()).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
    rx
}

fn parse_aim(args: &[&str]) -> Vec2<f32> {
    match (args.first(), args.get(1)) {
        (Some(x), Some(y)) => Vec2::new(x.parse().unwrap_or(0.0), y.parse().unwrap_or(0.0)),
        _ => Vec2::zero(),
    }
}

/// 處理一行指令，回傳 false 表示結束
fn handle_command(state: &mut State, player: specs::Entity, line: &str) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (cmd, args) = match parts.split_first() {
        Some((cmd, args)) => (*cmd, args),
        None => return true,
    };

    match cmd {
        "down" | "held" | "up" => {
            let phase = match cmd {
                "down" => KeyPhase::Down,
                "held" => KeyPhase::Held,
                _ => KeyPhase::Up,
            };
            let aim = parse_aim(args.get(1..).unwrap_or(&[]));
            match args.first().and_then(|s| s.chars().next()) {
                Some(key) => {
                    state.handle_key(player, Hotkey(key), phase, aim);
                }
                None => warn!("用法: {} <熱鍵> [x y]", cmd),
            }
        }
        "level" => match args.first().and_then(|s| s.parse().ok()) {
            Some(level) => {
                let unlocked = state.set_level(player, level);
                info!("等級 {}，新解鎖欄位 {:?}", level, unlocked);
            }
            None => warn!("用法: level <等級>"),
        },
        "equip" => match (args.first().and_then(|s| s.parse().ok()), args.get(1)) {
            (Some(slot), Some(id)) => {
                match state.equip_by_id(player, slot, id) {
                    Ok(()) => {
                        if let Some(def) = state.database().get(id) {
                            info!("欄位 {} 裝備 {}：{}", slot, def.name(), def.description());
                        }
                    }
                    Err(e) => warn!("裝備失敗: {}", e),
                }
            }
            _ => warn!("用法: equip <欄位> <技能id>"),
        },
        "save" => {
            if let Err(e) = state.save(player, &CONFIG.save_path) {
                error!("存檔失敗: {}", e);
            }
        }
        "load" => {
            if let Err(e) = state.load(player, &CONFIG.save_path) {
                error!("讀檔失敗: {}", e);
            }
        }
        "quit" => return false,
        _ => warn!("未知指令: {}", cmd),
    }
    true
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let mut database = SkillDatabase::new();
    database.load_from_file(&CONFIG.skills_path)?;
    let mut state = State::new(CONFIG.clone(), database);

    let player = state.spawn_actor(
        Vec2::zero(),
        Faction::Player,
        Vitals::new(Pool::new(100.0, 1.0), Pool::new(100.0, 5.0)),
        1,
    )?;
    for (i, pos) in [Vec2::new(1.5, 0.0), Vec2::new(6.0, 2.0), Vec2::new(-4.0, 8.0)]
        .into_iter()
        .enumerate()
    {
        let enemy = state.spawn_actor(
            pos,
            Faction::Enemy,
            Vitals::new(Pool::new(80.0, 0.0), Pool::new(0.0, 0.0)),
            1,
        )?;
        info!("敵人 {} {:?} 於 {:?}", i, enemy, pos);
    }

    // 1 級只有第一格
    if let Some(def) = state.database().get_by_index(0) {
        state.equip(player, 0, def)?;
    }
    info!("指令: down/held/up <熱鍵> [x y], level <n>, equip <欄位> <id>, save, load, quit");

    let commands = spawn_stdin_reader();
    let mut clock = Clock::new(Duration::from_secs_f32(CONFIG.tick_interval()));
    'main: loop {
        for line in commands.try_iter() {
            if !handle_command(&mut state, player, &line) {
                break 'main;
            }
        }
        state.tick(clock.tick())?;

        for outcome in state.drain_outcomes() {
            match &outcome {
                Outcome::Damage { .. } | Outcome::Heal { .. } | Outcome::Death { .. } => {
                    info!("{:?}", outcome)
                }
                _ => log::debug!("{:?} @ {:?}", outcome, outcome.get_pos()),
            }
        }
    }

    info!("結束，共執行 {} 步", state.tick_count());
    Ok(())
}
