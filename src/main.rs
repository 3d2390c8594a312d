//! Tofu Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, TouchEvent};

    use tofu_run::highscores::{HighScores, LocalLeaderboard};
    use tofu_run::platform::{InputState, Key, Side};
    use tofu_run::sim::{EventKind, GameEvent, World};
    use tofu_run::{Config, attach_reporter};

    /// Game instance holding all state
    struct Game {
        world: World,
        input: InputState,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                world: World::new(Config::load(), seed),
                input: InputState::new(),
            }
        }

        /// Start a round unless one is already running
        fn start_if_idle(&mut self) {
            if !self.world.state.is_playing() {
                self.input.release_all();
                self.world.start();
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(document: &Document, id: &str, display: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("style", &format!("display: {}", display));
        }
    }

    /// Keep the score label and menu in sync with the simulation
    fn setup_ui_listeners(game: &Rc<RefCell<Game>>, document: &Document) {
        let mut g = game.borrow_mut();
        let bus = &mut g.world.bus;

        let doc = document.clone();
        bus.subscribe(EventKind::ScoreChanged, move |event| {
            if let GameEvent::ScoreChanged { score } = event {
                set_text(&doc, "#score", &format!("Tofu: {}", score));
            }
        });

        let doc = document.clone();
        bus.subscribe(EventKind::GameStarted, move |_| {
            set_display(&doc, "menu", "none");
            set_display(&doc, "ui", "block");
            set_text(&doc, "#score", "Tofu: 0");
        });

        let doc = document.clone();
        bus.subscribe(EventKind::GameOver, move |event| {
            if let GameEvent::GameOver { score } = event {
                set_text(&doc, "#final-score", &format!("You collected {} tofu!", score));
                set_text(&doc, "#menu h1", "CRASHED!");
                set_text(&doc, "#menu .subtitle", "Click/Tap to try again");
                set_display(&doc, "menu", "flex");
            }
        });

        let board = Rc::new(LocalLeaderboard::new(HighScores::load()));
        attach_reporter(bus, board);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tofu Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", game.borrow().world.seed());

        setup_ui_listeners(&game, &document);
        setup_keyboard(game.clone());
        setup_touch(game.clone());
        setup_click_to_start(game.clone());

        request_animation_frame(game);

        log::info!("Tofu Run running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match Key::from_dom(&event.key(), &event.code()) {
                    Some(Key::Start) => g.start_if_idle(),
                    Some(key) => g.input.key_down(key),
                    None => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_dom(&event.key(), &event.code()) {
                game.borrow_mut().input.key_up(key);
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn screen_width() -> f32 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32
    }

    fn setup_touch(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // touchstart and touchmove both (re)assign each changed touch to a side
        for name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let starts = name == "touchstart";
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if starts {
                    g.start_if_idle();
                }
                let width = screen_width();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        g.input
                            .touch_moved(touch.identifier(), Side::of(touch.client_x() as f32, width));
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        g.input.touch_ended(touch.identifier());
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_click_to_start(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().start_if_idle();
        });
        let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let input = g.input.tick_input();
            g.world.step(&input);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::rc::Rc;

    use tofu_run::highscores::{HighScores, LocalLeaderboard, now_ms};
    use tofu_run::sim::{EventKind, GameEvent, World, autopilot};
    use tofu_run::{Config, attach_reporter};

    /// Two minutes of frames at 60 Hz
    const DEMO_FRAMES: u64 = 60 * 120;

    env_logger::init();
    log::info!("Tofu Run (native) starting...");
    log::info!("Native mode is a headless autopilot demo - run with `trunk serve` for the web version");

    let seed = now_ms() as u64;
    let mut world = World::new(Config::load(), seed);
    log::info!("Game initialized with seed: {}", world.seed());

    world.bus.subscribe(EventKind::Collected, |event| {
        if let GameEvent::Collected { position } = event {
            log::debug!("Tofu collected at ({:.2}, {:.2})", position.x, position.y);
        }
    });
    let board = Rc::new(LocalLeaderboard::new(HighScores::load()));
    attach_reporter(&mut world.bus, board);

    world.start();
    while world.state.is_playing() && world.frame < DEMO_FRAMES {
        let input = autopilot(&world);
        world.step(&input);
    }

    let outcome = if world.state.is_game_over() {
        "crashed"
    } else {
        "survived"
    };
    println!(
        "Autopilot {} after {} frames (seed {}): score {}, distance {:.1}, spill {:.1}",
        outcome,
        world.frame,
        world.seed(),
        world.state.score,
        world.state.distance,
        world.state.spill
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
