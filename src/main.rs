//! Snake Sats entry point
//!
//! The browser build is driven from `snake_sats::web`. Natively this runs a
//! headless demo game: the autopilot plays on a virtual timer and every event
//! is logged.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Snake Sats (native demo) starting...");

    if let Err(e) = demo::run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is snake_sats::web, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use snake_sats::EngineError;
    use snake_sats::Settings;
    use snake_sats::scheduler::{TickScheduler, VirtualTimer};
    use snake_sats::sim::autopilot::choose_direction;
    use snake_sats::sim::{Engine, GameEvent, GridConfig};

    /// Stop the demo even if the bot never dies
    const MAX_DEMO_TICKS: u64 = 5_000;

    pub fn run() -> Result<(), EngineError> {
        let settings = Settings::load();
        let mut engine = Engine::with_random_seed(GridConfig::default())?;
        engine.set_tips_enabled(settings.tips_enabled);

        let mut scheduler = TickScheduler::new(VirtualTimer::new());
        scheduler.start(&mut engine, settings.difficulty);

        while let Some(handle) = scheduler.timer_mut().fire_next() {
            if let Some(dir) = choose_direction(engine.state()) {
                engine.set_direction(dir);
            }
            let Some(report) = scheduler.on_timer(handle, &mut engine) else {
                continue;
            };
            for event in &report.events {
                log_event(event);
            }
            if report.is_game_over() || engine.state().time_ticks >= MAX_DEMO_TICKS {
                break;
            }
        }

        let snapshot = engine.snapshot();
        println!(
            "Final score: {} | Best: {} | Level {} | Speed level {}/21 | {:.1}s simulated (seed {})",
            snapshot.score,
            snapshot.best_score,
            snapshot.level,
            snapshot.speed_level,
            scheduler.timer().now_ms() as f64 / 1000.0,
            engine.seed()
        );
        Ok(())
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::TipRotated { index } => {
                log::info!("{}: {}", event.name(), snake_sats::sim::tips::TIPS[*index]);
            }
            GameEvent::SatCollected | GameEvent::DoCollected | GameEvent::FiatHit => {
                log::debug!("{}", event.name());
            }
            other => log::info!("{}: {:?}", other.name(), other),
        }
    }
}
