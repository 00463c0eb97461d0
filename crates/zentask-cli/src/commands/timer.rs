use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};
use zentask_core::{Config, CycleDurations, Event, FocusTimer, TimerState};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the focus timer in the foreground
    ///
    /// Enter pauses/resumes, or acknowledges a finished cycle.
    /// `r` resets, `q` quits.
    Run {
        /// Work minutes (default from config)
        #[arg(long)]
        work: Option<u64>,
        /// Rest minutes (default from config)
        #[arg(long)]
        rest: Option<u64>,
        /// Stop after this many finished cycles
        #[arg(long)]
        cycles: Option<u32>,
        /// Acknowledge finished cycles without waiting for Enter
        #[arg(long)]
        auto_ack: bool,
        /// Print events as JSON lines instead of a countdown
        #[arg(long)]
        json: bool,
    },
}

struct Output {
    json: bool,
}

impl Output {
    fn event(&self, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }
        match event {
            Event::TimerStarted { mode, .. } => println!("\n{mode} started."),
            Event::TimerPaused { mode, remaining_secs, .. } => {
                println!("\n{mode} paused at {}.", zentask_core::timer::format_mm_ss(*remaining_secs))
            }
            Event::CycleCompleted { mode, next_mode, .. } => {
                println!("\n{mode} finished. Press Enter to start {next_mode}.")
            }
            Event::CycleAdvanced { mode, running, .. } => {
                let state = if *running { "running" } else { "paused" };
                println!("{mode} loaded ({state}).");
            }
            Event::TimerReset { .. } => println!("\nTimer reset."),
            _ => {}
        }
        Ok(())
    }

    fn countdown(&self, timer: &FocusTimer) {
        if self.json || timer.state() != TimerState::Running {
            return;
        }
        print!("\r{:<4} {}", timer.mode(), timer.format_remaining());
        let _ = std::io::stdout().flush();
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match action {
        TimerAction::Run {
            work,
            rest,
            cycles,
            auto_ack,
            json,
        } => {
            let durations = CycleDurations::from_minutes(
                work.unwrap_or(config.timer.work_minutes),
                rest.unwrap_or(config.timer.rest_minutes),
            );
            let timer = FocusTimer::new(durations, config.timer.auto_resume);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_loop(timer, cycles, auto_ack, Output { json }))
        }
    }
}

async fn run_loop(
    mut timer: FocusTimer,
    cycles: Option<u32>,
    auto_ack: bool,
    out: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut finished = 0u32;

    if let Some(event) = timer.start() {
        out.event(&event)?;
    }

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let Some(event) = timer.tick() else {
                    out.countdown(&timer);
                    continue;
                };
                out.event(&event)?;
                finished += 1;
                if cycles.is_some_and(|n| finished >= n) {
                    break;
                }
                if auto_ack {
                    if let Some(event) = timer.acknowledge() {
                        out.event(&event)?;
                    }
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    if !auto_ack {
                        break;
                    }
                    continue;
                };
                let event = match line.trim() {
                    "q" => break,
                    "r" => timer.reset(),
                    _ if timer.state() == TimerState::AwaitingAck => timer.acknowledge(),
                    _ => timer.toggle(),
                };
                if let Some(event) = event {
                    out.event(&event)?;
                }
            }
        }
    }

    if !out.json {
        println!();
    }
    Ok(())
}
