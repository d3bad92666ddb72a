use macroquad::prelude::*;
use slugs::simulation::creature::{Creature, Species};
use slugs::simulation::geometry::{BoundingBox, Point};
use slugs::simulation::score::HighScore;
use slugs::simulation::world::World;

const TEXT_SIZE: f32 = 24.0;
const TEXT_LINE_HEIGHT: f32 = 20.0;

/// Maps arena coordinates (y up) onto the window (y down), letterboxed.
trait ToScreen {
    type Output;
    fn to_screen(&self, world: &World) -> Self::Output;
}

fn screen_scale(world: &World) -> f32 {
    (screen_width() / world.width()).min(screen_height() / world.height())
}

fn origin(world: &World) -> (f32, f32) {
    let scale = screen_scale(world);
    (
        (screen_width() - world.width() * scale) / 2.0,
        (screen_height() - world.height() * scale) / 2.0,
    )
}

impl ToScreen for Point {
    type Output = Vec2;
    fn to_screen(&self, world: &World) -> Vec2 {
        let scale = screen_scale(world);
        let (x0, y0) = origin(world);
        vec2(x0 + self.x * scale, y0 + (world.height() - self.y) * scale)
    }
}

impl ToScreen for BoundingBox {
    type Output = Rect;
    fn to_screen(&self, world: &World) -> Rect {
        let top_left = Point::new(self.left, self.top).to_screen(world);
        let scale = screen_scale(world);
        Rect::new(top_left.x, top_left.y, self.width() * scale, self.height() * scale)
    }
}

impl ToScreen for f32 {
    type Output = f32;
    fn to_screen(&self, world: &World) -> f32 {
        self * screen_scale(world)
    }
}

/// Converts a window position back into arena coordinates.
pub fn to_world(screen: (f32, f32), world: &World) -> Point {
    let scale = screen_scale(world);
    let (x0, y0) = origin(world);
    Point::new((screen.0 - x0) / scale, world.height() - (screen.1 - y0) / scale)
}

fn colour(species: Species) -> Color {
    match species {
        Species::Runner => Color::from_rgba(240, 240, 240, 255),
        Species::Worker => Color::from_rgba(120, 220, 90, 255),
        Species::Layer => Color::from_rgba(230, 80, 60, 255),
    }
}

pub fn draw_arena(world: &World) {
    let arena = BoundingBox::new(0.0, world.width(), world.height(), 0.0).to_screen(world);
    draw_rectangle(arena.x, arena.y, arena.w, arena.h, Color::from_rgba(20, 24, 36, 255));
}

pub fn draw_lines(world: &World) {
    let thickness = 1.5_f32.to_screen(world);

    world.lines().for_each(|line| {
        let start = line.start().to_screen(world);
        let end = line.end().to_screen(world);
        let colour = if line.owner().is_some() {
            Color::from_rgba(250, 200, 80, 255)
        } else {
            Color::from_rgba(200, 150, 60, 255)
        };
        draw_line(start.x, start.y, end.x, end.y, thickness, colour);
    });
}

pub fn draw_creatures(world: &World) {
    world.creatures().iter().for_each(|creature| draw_creature(creature, world));
}

fn draw_creature(creature: &Creature, world: &World) {
    let colour = colour(creature.species());

    for segment in creature.segments().filter(|segment| segment.is_active()) {
        let rect = segment.bounds().to_screen(world);
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, colour);
    }
}

fn draw_centred(text: &str, centre: Vec2) {
    let size = measure_text(text, None, TEXT_SIZE as u16, 1.0);
    draw_text(text, centre.x - size.width / 2.0, centre.y, TEXT_SIZE, WHITE);
}

/// Seconds survived and level while playing.
pub fn draw_status(world: &World) {
    let seconds = world.score().to_string();
    let corner = Point::new(world.width() - 10.0, 10.0).to_screen(world);
    let size = measure_text(&seconds, None, TEXT_SIZE as u16, 1.0);
    draw_text(&seconds, corner.x - size.width, corner.y, TEXT_SIZE, WHITE);

    if world.level() > 1 {
        let corner = Point::new(10.0, 10.0).to_screen(world);
        draw_text(&world.level().to_string(), corner.x, corner.y, TEXT_SIZE, WHITE);
    }
}

/// End of game summary.
pub fn draw_game_over(world: &World, is_record: bool, previous: Option<&HighScore>, ready: bool) {
    let x = world.width() / 2.0;
    let y = world.height() / 2.0;
    let line = |row: f32| Point::new(x, y + row * TEXT_LINE_HEIGHT).to_screen(world);

    if is_record {
        draw_centred("new record", line(3.0));
    }
    draw_centred(&format!("level {}", world.level()), line(2.0));
    draw_centred(&format!("survived {} seconds", world.score()), line(0.0));
    draw_centred(&world.game_over_reason().to_string(), line(-1.0));
    if ready {
        draw_centred("try again?", line(-3.0));
    }

    if let Some(previous) = previous {
        let top = Point::new(x, world.height() - 2.0 * TEXT_LINE_HEIGHT).to_screen(world);
        draw_centred(&format!("record {} seconds", previous.score), top);
    }
}
