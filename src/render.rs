use std::sync::Arc;
use std::time::Duration;

use macroquad::prelude::*;
use tracing::{info, trace};

use crate::config::GameConfig;
use crate::geometry::Direction;
use crate::handoff::{Refresh, View};
use crate::steering::Steering;

const BACKGROUND_COLOUR: Color = BLACK;
const ICON_COLOUR: Color = BLUE;
const TEXT_COLOUR: Color = WHITE;

const SCORE_X: f32 = 8.0;
const SCORE_Y: f32 = 18.0;
const SCORE_FONT: f32 = 20.0;

const BUTTON_X: f32 = 200.0;
const BUTTON_Y: f32 = 100.0;
const BUTTON_W: f32 = 120.0;
const BUTTON_H: f32 = 60.0;
const BUTTON_FONT: f32 = 26.0;

const KEY_BINDINGS: [(KeyCode, Direction); 8] = [
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::A, Direction::Left),
    (KeyCode::D, Direction::Right),
    (KeyCode::W, Direction::Up),
    (KeyCode::S, Direction::Down),
];

pub fn direction_for(key: KeyCode) -> Option<Direction> {
    KEY_BINDINGS.iter().find(|(k, _)| *k == key).map(|(_, d)| *d)
}

/// Fires at most once per `interval`, measured from the previous firing.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    interval: f64,
    next_due: f64,
}

impl RepeatingTimer {
    /// The first poll at or after `now` fires.
    pub fn new(interval: Duration, now: f64) -> Self {
        Self {
            interval: interval.as_secs_f64(),
            next_due: now,
        }
    }

    pub fn poll(&mut self, now: f64) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }
}

fn game_over_button() -> Rect {
    Rect::new(BUTTON_X, BUTTON_Y, BUTTON_W, BUTTON_H)
}

pub struct Renderer {
    refresh: Box<dyn Refresh>,
    steering: Arc<Steering>,
    timer: RepeatingTimer,
    view: View,
    refreshing: bool,
    step: f32,
}

impl Renderer {
    pub fn new(config: &GameConfig, refresh: Box<dyn Refresh>, steering: Arc<Steering>, now: f64) -> Self {
        Self {
            refresh,
            steering,
            timer: RepeatingTimer::new(config.refresh_delay(), now),
            view: View::default(),
            refreshing: true,
            step: config.step as f32,
        }
    }

    pub fn steer(&self, direction: Direction) {
        if !self.steering.steer(direction) {
            trace!(requested = ?direction, current = ?self.steering.current(), "ignored reversal");
        }
    }

    /// Pulls new state when the refresh timer is due. Once the game is over
    /// the timer is no longer polled.
    pub fn update(&mut self, now: f64) {
        if !self.refreshing || !self.timer.poll(now) {
            return;
        }
        self.refreshing = self.refresh.refresh(&mut self.view);
        if !self.refreshing {
            info!(score = self.view.score, "renderer stopped refreshing");
        }
    }

    fn handle_input(&self) {
        for key in get_keys_pressed() {
            if let Some(direction) = direction_for(key) {
                self.steer(direction);
            }
        }
    }

    fn wants_exit(&self) -> bool {
        if !self.view.game_over {
            return false;
        }
        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Escape) {
            return true;
        }
        let (mx, my) = mouse_position();
        is_mouse_button_pressed(MouseButton::Left) && game_over_button().contains(vec2(mx, my))
    }

    fn draw(&self) {
        clear_background(BACKGROUND_COLOUR);

        let half = self.step * 0.5;
        for pair in self.view.body.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            draw_line(a.x as f32, a.y as f32, b.x as f32, b.y as f32, self.step, ICON_COLOUR);
        }
        // Square joints so corners are not notched.
        for p in &self.view.body {
            draw_rectangle(p.x as f32 - half, p.y as f32 - half, self.step, self.step, ICON_COLOUR);
        }

        if let Some(prey) = self.view.prey {
            draw_rectangle(
                prey.x0 as f32,
                prey.y0 as f32,
                prey.width() as f32,
                prey.height() as f32,
                ICON_COLOUR,
            );
        }

        draw_text(&format!("Your Score: {}", self.view.score), SCORE_X, SCORE_Y, SCORE_FONT, TEXT_COLOUR);

        if self.view.game_over {
            let button = game_over_button();
            draw_rectangle(button.x, button.y, button.w, button.h, LIGHTGRAY);
            draw_rectangle_lines(button.x, button.y, button.w, button.h, 2.0, DARKGRAY);
            let label = "Game Over!";
            let m = measure_text(label, None, BUTTON_FONT as u16, 1.0);
            draw_text(
                label,
                button.x + (button.w - m.width) * 0.5,
                button.y + (button.h + m.height) * 0.5,
                BUTTON_FONT,
                BLACK,
            );
        }
    }
}

/// Window loop. Returns when the player dismisses the game-over control.
pub async fn run(mut renderer: Renderer) {
    loop {
        renderer.handle_input();
        renderer.update(get_time());
        renderer.draw();

        if renderer.wants_exit() {
            break;
        }
        next_frame().await;
    }
}
