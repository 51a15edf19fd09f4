use std::path::Path;

use colored::Colorize;
use lb_core::{Actor, Identifier};
use lb_outcome::{Host, SoundEmission, StatusEffect, Triggered};

pub struct RunOptions {
    pub luck: i32,
    pub ticks: u32,
    pub seed: u64,
    pub pos: String,
    pub player: String,
    pub reserved_prefix: String,
}

/// Prints every side effect it is asked to perform.
struct ConsoleHost {
    tick: u32,
    performed: usize,
}

impl ConsoleHost {
    fn label(&self) -> String {
        format!("[tick {:>3}]", self.tick).dimmed().to_string()
    }
}

impl Host for ConsoleHost {
    fn apply_status_effect(&mut self, target: &Actor, effect: &StatusEffect) {
        self.performed += 1;
        println!(
            "  {} {} {} (level {}, {} ticks) on {}",
            self.label(),
            "EFFECT".green().bold(),
            effect.id,
            effect.amplifier + 1,
            effect.duration,
            target.name
        );
    }

    fn play_sound(&mut self, sound: &SoundEmission) {
        self.performed += 1;
        println!(
            "  {} {} {} at {} (volume {}, pitch {}, range {})",
            self.label(),
            "SOUND".cyan().bold(),
            sound.sound,
            sound.pos,
            sound.volume,
            sound.pitch,
            sound.range
        );
    }
}

pub fn run(dir: &Path, id: Option<&str>, opts: &RunOptions) -> Result<(), String> {
    let (mut engine, _) = super::load_engine(dir, opts.seed, &opts.reserved_prefix)?;

    let def = match id {
        Some(raw) => {
            let id = Identifier::parse(raw).map_err(|e| e.to_string())?;
            engine.lookup(&id)
        }
        None => engine.select_random(opts.luck),
    }
    .map_err(|e| e.to_string())?;

    let ctx = super::build_context(&opts.pos, Some(&opts.player), None, opts.seed)?;
    let mut host = ConsoleHost {
        tick: 0,
        performed: 0,
    };

    println!("  {} {}", "Outcome".bold(), def.id);
    match engine.trigger(&def, ctx, &mut host).map_err(|e| e.to_string())? {
        Triggered::Executed(_) => {}
        Triggered::Scheduled(ticket) => {
            let delay = engine.scheduler().remaining(ticket).unwrap_or(0);
            println!(
                "  {} scheduled as #{} to fire in {delay} ticks",
                host.label(),
                ticket.get()
            );
        }
    }

    for tick in 1..=opts.ticks {
        host.tick = tick;
        engine.advance(&mut host);
    }

    println!();
    println!("  {} side effects performed", host.performed);
    let pending = engine.scheduler().len();
    if pending > 0 {
        println!("  {}", format!("{pending} still pending").yellow());
    }
    Ok(())
}
