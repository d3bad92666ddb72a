use macroquad::prelude::*;
use slugs::simulation::params::Params;
use slugs::simulation::score::{HighScore, ScoreBoard};
use slugs::simulation::world::World;
use tracing::{error, info, warn};

mod graphics;

const SCORES_FILE: &str = "slugs_scores.json";
const RESET_PAUSE_DURATION: f32 = 1.5;

fn load_params() -> Params {
    let Some(path) = std::env::args().nth(1) else {
        return Params::default();
    };

    match Params::load_from_file(&path) {
        Ok(params) => {
            info!(%path, "loaded parameters");
            params
        }
        Err(err) => {
            warn!(%path, %err, "could not load parameters, using defaults");
            Params::default()
        }
    }
}

fn load_scores() -> Option<ScoreBoard> {
    let saved = std::fs::read_to_string(SCORES_FILE)
        .ok()
        .and_then(|json| serde_json::from_str(&json).ok());

    match saved {
        Some(scores) => Some(scores),
        None => ScoreBoard::new(1, true).ok(),
    }
}

fn save_scores(scores: &ScoreBoard) {
    let saved = serde_json::to_string_pretty(scores)
        .map_err(|err| err.to_string())
        .and_then(|json| std::fs::write(SCORES_FILE, json).map_err(|err| err.to_string()));

    if let Err(err) = saved {
        warn!(%err, "could not save scores");
    }
}

/// Per-game state that only the screen cares about.
#[derive(Default)]
struct GameOverScreen {
    pause: f32,
    score_checked: bool,
    is_record: bool,
    previous: Option<HighScore>,
}

impl GameOverScreen {
    fn ready_to_reset(&self) -> bool {
        self.pause > RESET_PAUSE_DURATION
    }
}

#[macroquad::main("Slugs")]
async fn main() {
    tracing_subscriber::fmt().init();

    let mut world = match World::new(load_params()) {
        Ok(world) => world,
        Err(err) => {
            error!(%err, "invalid parameters");
            return;
        }
    };
    let mut scores = load_scores();
    let mut screen = GameOverScreen::default();

    info!("starting slugs");

    loop {
        let elapsed = get_frame_time();

        if is_mouse_button_pressed(MouseButton::Left) {
            if screen.ready_to_reset() {
                world.reset();
                screen = GameOverScreen::default();
            } else if !world.is_game_over() {
                let target = graphics::to_world(mouse_position(), &world);
                world.turn_runner(target.x, target.y);
            }
        }

        world.update(elapsed);

        if world.is_game_over() {
            if !screen.score_checked {
                screen.score_checked = true;
                if let Some(scores) = scores.as_mut() {
                    screen.previous = scores.top_score().cloned();
                    screen.is_record = scores.add(world.score());
                    if screen.is_record {
                        save_scores(scores);
                    }
                }
            }
            screen.pause += elapsed;
        }

        clear_background(BLACK);
        graphics::draw_arena(&world);
        graphics::draw_lines(&world);
        graphics::draw_creatures(&world);

        if world.is_game_over() {
            graphics::draw_game_over(
                &world,
                screen.is_record,
                screen.previous.as_ref(),
                screen.ready_to_reset(),
            );
        } else {
            graphics::draw_status(&world);
        }

        next_frame().await
    }
}
