use std::path::Path;
use std::time::{Duration, Instant};

use bookhound_core::{update, AppState, Msg};
use bookhound_engine::EngineConfig;
use crossterm::event::{self, Event};
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;
use ratatui::DefaultTerminal;

use super::effects::EffectRunner;
use super::ui;

/// Tick interval used to throttle rendering and advance transitions.
const TICK_INTERVAL: Duration = Duration::from_millis(75);

const LOG_FILE: &str = "./bookhound.log";

pub fn run_app() -> anyhow::Result<()> {
    engine_logging::initialize(LogDestination::File, LevelFilter::Info, Path::new(LOG_FILE));
    engine_info!("Starting bookhound");

    let runner = EffectRunner::new(EngineConfig::default())?;
    let mut app = App::new(runner);

    let mut terminal = ratatui::try_init()?;
    let result = app.run(&mut terminal);
    ratatui::restore();

    engine_info!("Bookhound exited");
    result
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        self.dispatch(Msg::Mounted);
        let mut force_draw = true;
        let mut last_tick = Instant::now();

        loop {
            if self.state.consume_dirty() || force_draw {
                let view = self.state.view();
                terminal.draw(|frame| ui::render::render(frame, &view))?;
                force_draw = false;
            }
            if self.state.should_quit() {
                return Ok(());
            }

            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(msg) = ui::input::map_key(key) {
                            self.dispatch(msg);
                        }
                    }
                    Event::Resize(..) => force_draw = true,
                    _ => {}
                }
            }

            for msg in self.runner.drain() {
                self.dispatch(msg);
            }

            let elapsed = last_tick.elapsed();
            last_tick = Instant::now();
            self.dispatch(Msg::Tick { elapsed });
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }
}
