//! Fruit Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, KeyboardEvent, Window};

    use fruit_snake::audio::{AudioManager, SoundEffect};
    use fruit_snake::consts::*;
    use fruit_snake::platform::time::now_ms;
    use fruit_snake::platform::{Command, map_key};
    use fruit_snake::renderer::SvgRenderer;
    use fruit_snake::screen::{PauseKeyAction, Screen};
    use fruit_snake::sim::{Direction, GameState};
    use fruit_snake::{BoardConfig, HighScores, Settings, Skin};

    /// Game instance holding all state
    struct Game {
        document: Document,
        state: GameState,
        config: BoardConfig,
        renderer: Option<SvgRenderer>,
        audio: AudioManager,
        settings: Settings,
        high_scores: HighScores,
        screen: Screen,
        menu_open: bool,
        /// Pending setTimeout handle (next tick or the delayed start)
        timer: Option<i32>,
    }

    impl Game {
        fn now(&self) -> f64 {
            now_ms()
        }

        /// Play cues for everything the sim reported
        fn flush_events(&mut self) {
            for event in self.state.drain_events() {
                log::debug!("Game event: {}", event.as_str());
                self.audio.play(SoundEffect::for_event(&event));
            }
        }

        fn render(&self) {
            let Some(renderer) = &self.renderer else { return };
            let skin = self.settings.effective_skin(self.high_scores.best());
            let effects = self.state.active_effects(self.now());
            renderer.render_food(self.state.food());
            renderer.render_snake(&self.state.snake_body(), skin, effects);
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_shown(&self, id: &str, shown: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("show", shown);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            self.set_text("score", &self.state.score().to_string());
            self.set_text("highScore", &self.high_scores.best().to_string());

            let effects = self.state.active_effects(self.now());
            if let Some(el) = self.document.get_element_by_id("effects") {
                let mut labels = Vec::new();
                if effects.invert {
                    labels.push("🔄 Invert");
                }
                if effects.shield {
                    labels.push("🛡️ Shield");
                }
                if effects.double_points {
                    labels.push("⚡ 2x Points");
                }
                let html: String = labels
                    .iter()
                    .map(|l| format!("<div class=\"effect\">{}</div>", l))
                    .collect();
                el.set_inner_html(&html);
                let _ = el.set_attribute(
                    "style",
                    if effects.any() { "display:block" } else { "display:none" },
                );
            }
        }

        fn show_overlay(&self, msg: &str) {
            self.set_text("overlay", msg);
            self.set_shown("overlay", true);
        }

        fn hide_overlay(&self) {
            self.set_shown("overlay", false);
        }

        fn update_audio_ui(&self) {
            if let Some(btn) = self.document.get_element_by_id("audioToggle") {
                let enabled = self.settings.audio_enabled;
                btn.set_text_content(Some(if enabled { "🔊" } else { "🔇" }));
                let _ = btn.set_attribute("title", if enabled { "Mute Audio" } else { "Unmute Audio" });
            }
            if let Some(slider) = self
                .document
                .get_element_by_id("volumeSlider")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                slider.set_value(&self.settings.volume.to_string());
            }
        }

        fn toggle_audio(&mut self) {
            let enabled = self.settings.toggle_audio();
            self.audio.set_muted(!enabled);
            self.settings.save();
            self.update_audio_ui();
            log::info!("Audio {}", if enabled { "enabled" } else { "muted" });
        }

        fn set_volume(&mut self, volume: f32) {
            self.settings.set_volume(volume);
            self.audio.set_volume(self.settings.volume);
            self.settings.save();
            self.update_audio_ui();
        }

        fn select_skin(&mut self, skin: Skin) {
            let best = self.high_scores.best();
            if self.settings.select_skin(skin, best) {
                self.settings.save();
                self.render();
                log::info!("Skin: {}", skin.as_str());
            } else {
                log::info!(
                    "Skin {} locked until {} points",
                    skin.as_str(),
                    skin.unlock_threshold()
                );
            }
        }

        fn clear_timer(&mut self) {
            if let Some(handle) = self.timer.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_timeout_with_handle(handle);
                }
            }
        }

        fn pause(&mut self) {
            if !self.screen.can_pause() || !self.state.is_alive() {
                return;
            }
            let now = self.now();
            self.clear_timer();
            if self.screen == Screen::Starting {
                // Start fade cancelled: the run begins paused
                self.state.start(now);
            }
            self.state.pause(now);
            self.flush_events();
            self.screen = self.screen.paused();
            self.show_overlay("Paused. Press Space to resume");
            self.update_hud();
            log::info!("Paused");
        }

        fn hide_start_screen(&self) {
            if let Some(el) = self.document.get_element_by_id("startScreen") {
                let _ = el.class_list().add_1("hide");
            }
        }

        /// Fresh run on the current board
        fn reset_run(&mut self) {
            self.clear_timer();
            let start = self.config.start_position();
            self.state.reset(start, Direction::Right);
            self.set_shown("gameOverScreen", false);
            self.render();
            self.update_hud();
        }

        /// Top scores on the game over screen, the new entry highlighted
        fn render_leaderboard(&self, new_rank: Option<usize>) {
            let Some(el) = self.document.get_element_by_id("leaderboard") else {
                return;
            };
            let html: String = self
                .high_scores
                .display_rows()
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let class = if new_rank == Some(i + 1) { "entry new" } else { "entry" };
                    format!("<div class=\"{}\">{}</div>", class, row)
                })
                .collect();
            el.set_inner_html(&html);
        }

        /// Record the final score and show the game over screen
        fn finish_run(&mut self) {
            self.screen = Screen::GameOver;
            let score = self.state.score();
            let length = self.state.snake().len();
            let rank = self.high_scores.add_score(score, length, self.now());
            if let Some(rank) = rank {
                log::info!("New high score #{}: {}", rank, score);
                self.high_scores.save();
            }
            self.render_leaderboard(rank);
            self.set_text("finalScore", &score.to_string());
            self.set_text("gameOverHighScore", &self.high_scores.best().to_string());
            self.set_shown("gameOverScreen", true);
            self.update_hud();
            log::info!("Game over: score {}, length {}", score, length);
        }

        /// Pick up a new viewport size between runs
        fn apply_responsive_config(&mut self, window: &Window) {
            let config = responsive_config(window);
            if config == self.config {
                return;
            }
            self.config = config;
            self.state
                .resize(config.board(), config.start_position(), Direction::Right);
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(config);
            }
        }
    }

    /// Board layout for the current window, falling back to the default
    fn responsive_config(window: &Window) -> BoardConfig {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1280.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(720.0);
        let config = BoardConfig::responsive(width, height);
        match config.validate(BASE_TICK_MS) {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{} - using default board", e);
                BoardConfig::default()
            }
        }
    }

    /// Queue the next tick
    fn schedule_tick(game: &Rc<RefCell<Game>>, delay_ms: u32) {
        let Some(window) = web_sys::window() else { return };
        let next = game.clone();
        let closure = Closure::once(move || game_loop(&next));
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        ) {
            Ok(handle) => game.borrow_mut().timer = Some(handle),
            Err(e) => log::error!("Failed to schedule tick: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: &Rc<RefCell<Game>>) {
        let next_delay = {
            let mut g = game.borrow_mut();
            g.timer = None;
            if g.screen != Screen::Playing {
                return;
            }

            let now = g.now();
            g.state.step(now);
            g.flush_events();
            g.render();
            g.update_hud();

            if g.state.is_alive() {
                Some(g.state.tick_ms(now))
            } else {
                g.finish_run();
                None
            }
        };

        if let Some(delay) = next_delay {
            schedule_tick(game, delay);
        }
    }

    fn begin_play(game: &Rc<RefCell<Game>>) {
        let delay = {
            let mut g = game.borrow_mut();
            let now = g.now();
            g.state.start(now);
            g.flush_events();
            g.screen = Screen::Playing;
            g.hide_overlay();
            g.state.tick_ms(now)
        };
        schedule_tick(game, delay);
    }

    /// Fade out the start screen, then play
    fn start_new_game(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        {
            let mut g = game.borrow_mut();
            if g.screen != Screen::Start {
                return;
            }
            g.screen = Screen::Starting;
            g.hide_start_screen();
        }

        let next = game.clone();
        let closure = Closure::once(move || finish_start(&next));
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            START_ANIMATION_MS,
        ) {
            Ok(handle) => game.borrow_mut().timer = Some(handle),
            Err(e) => log::error!("Failed to schedule start: {:?}", e),
        }
        closure.forget();
    }

    /// Start fade finished
    fn finish_start(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.timer = None;
            if !g.screen.start_may_fire(g.menu_open) {
                return;
            }
        }
        begin_play(game);
    }

    fn resume_game(game: &Rc<RefCell<Game>>) {
        let delay = {
            let mut g = game.borrow_mut();
            if g.screen != Screen::Paused {
                return;
            }
            let now = g.now();
            g.state.resume(now);
            g.flush_events();
            g.screen = Screen::Playing;
            g.hide_overlay();
            log::info!("Resumed");
            g.state.tick_ms(now)
        };
        schedule_tick(game, delay);
    }

    fn restart_game(game: &Rc<RefCell<Game>>) {
        game.borrow_mut().reset_run();
        begin_play(game);
    }

    fn return_to_main_menu(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        if let Some(window) = web_sys::window() {
            g.apply_responsive_config(&window);
        }
        g.reset_run();
        g.screen = Screen::Start;
        g.menu_open = false;
        g.set_shown("menu", false);
        g.hide_overlay();
        if let Some(el) = g.document.get_element_by_id("startScreen") {
            let _ = el.class_list().remove_1("hide");
        }
    }

    fn open_menu(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        g.menu_open = true;
        g.set_shown("menu", true);
        g.pause();
    }

    fn close_menu(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        g.menu_open = false;
        g.set_shown("menu", false);
    }

    fn handle_command(game: &Rc<RefCell<Game>>, command: Command) {
        let (screen, menu_open) = {
            let g = game.borrow();
            (g.screen, g.menu_open)
        };

        match command {
            Command::Turn(dir) => {
                let mut g = game.borrow_mut();
                if g.screen.accepts_turns() {
                    let now = g.now();
                    g.state.set_direction(dir, now);
                }
            }
            Command::Menu => {
                if menu_open {
                    close_menu(game);
                } else if screen != Screen::Start {
                    open_menu(game);
                }
            }
            Command::ToggleAudio => game.borrow_mut().toggle_audio(),
            Command::TogglePause => match screen.pause_key(menu_open) {
                PauseKeyAction::StartGame => start_new_game(game),
                PauseKeyAction::Pause => game.borrow_mut().pause(),
                PauseKeyAction::Resume => resume_game(game),
                PauseKeyAction::Restart => restart_game(game),
                PauseKeyAction::Ignore => {}
            },
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Fruit Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = responsive_config(&window);
        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(
            config.board(),
            config.start_position(),
            Direction::Right,
            BASE_TICK_MS,
            seed,
        );

        let renderer = document
            .get_element_by_id("game")
            .and_then(|host| SvgRenderer::new(document.clone(), host, config));
        if renderer.is_none() {
            log::warn!("No #game container - rendering disabled");
        }

        let settings = Settings::load();
        let high_scores = HighScores::load();
        let mut audio = AudioManager::new();
        audio.set_volume(settings.volume);
        audio.set_muted(!settings.audio_enabled);

        let game = Rc::new(RefCell::new(Game {
            document,
            state,
            config,
            renderer,
            audio,
            settings,
            high_scores,
            screen: Screen::Start,
            menu_open: false,
            timer: None,
        }));

        {
            let g = game.borrow();
            g.render();
            g.update_hud();
            g.update_audio_ui();
        }

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_audio_controls(game.clone());
        setup_auto_pause(game);

        log::info!(
            "Fruit Snake ready: {}x{} board, seed {}",
            config.cols,
            config.rows,
            seed
        );
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            // Browsers only allow audio after a user gesture
            game.borrow().audio.resume();

            let Some(command) = map_key(&event.code()) else {
                return;
            };
            if matches!(command, Command::TogglePause | Command::Turn(_)) {
                event.prevent_default();
            }
            handle_command(&game, command);
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Wire a click handler to an element id, if present
    fn on_click(document: &Document, id: &str, handler: impl FnMut() + 'static) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let mut handler = handler;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = game.borrow().document.clone();

        let g = game.clone();
        on_click(&document, "startGameBtn", move || start_new_game(&g));

        let g = game.clone();
        on_click(&document, "restartBtn", move || restart_game(&g));

        let g = game.clone();
        on_click(&document, "mainMenuBtn", move || return_to_main_menu(&g));

        let g = game.clone();
        on_click(&document, "rulesBtn", move || open_menu(&g));

        for skin in Skin::ALL {
            let g = game.clone();
            on_click(&document, &format!("skin-{}", skin.as_str()), move || {
                g.borrow_mut().select_skin(skin)
            });
        }

        on_click(&document, "closeMenu", move || close_menu(&game));
    }

    fn setup_audio_controls(game: Rc<RefCell<Game>>) {
        let document = game.borrow().document.clone();

        let g = game.clone();
        on_click(&document, "audioToggle", move || g.borrow_mut().toggle_audio());

        if let Some(slider) = document
            .get_element_by_id("volumeSlider")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let input = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Ok(volume) = input.value().parse::<f32>() {
                    game.borrow_mut().set_volume(volume);
                }
            });
            let _ =
                slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let document = game.borrow().document.clone();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.screen.can_pause() {
                    g.pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fruit Snake (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    autopilot::run(20_000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a greedy bot plays on a simulated clock
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use fruit_snake::BoardConfig;
    use fruit_snake::consts::BASE_TICK_MS;
    use fruit_snake::sim::{Direction, GameState, Point};

    /// Safe direction that gets closest to the food, if any
    fn choose_direction(state: &GameState) -> Option<Direction> {
        let snake = state.snake();
        let head = snake.head();
        let target = state.food().map(|f| f.pos);

        Direction::ALL
            .into_iter()
            .filter(|d| *d != snake.direction().opposite())
            .filter(|d| {
                let next = head + d.offset();
                state.board().in_bounds(next) && !snake.occupies(next)
            })
            .min_by_key(|d| {
                let next: Point = head + d.offset();
                target.map(|t| (t - next).abs().element_sum()).unwrap_or(0)
            })
    }

    pub fn run(max_ticks: u32) {
        let config = BoardConfig::default();
        let mut state = GameState::new(
            config.board(),
            config.start_position(),
            Direction::Right,
            BASE_TICK_MS,
            0x5EED,
        );

        let mut now = 0.0;
        let mut ticks = 0;
        state.start(now);

        while state.is_alive() && ticks < max_ticks {
            if let Some(dir) = choose_direction(&state) {
                let effects = state.active_effects(now);
                // Pre-invert so the sim's inversion lands on the wanted heading
                let dir = if effects.invert && !effects.shield {
                    dir.opposite()
                } else {
                    dir
                };
                state.set_direction(dir, now);
            }
            state.step(now);
            for event in state.drain_events() {
                log::debug!("t={:.0}ms {}", now, event.as_str());
            }
            now += state.tick_ms(now) as f64;
            ticks += 1;
        }

        log::info!(
            "Autopilot finished after {} ticks ({:.1}s simulated): score {}, length {}, {}",
            ticks,
            now / 1000.0,
            state.score(),
            state.snake().len(),
            if state.is_alive() { "alive" } else { "dead" }
        );
        println!(
            "Score: {}  Length: {}  Ticks: {}",
            state.score(),
            state.snake().len(),
            ticks
        );
    }
}
