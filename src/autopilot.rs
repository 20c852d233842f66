//! Demo mode steering
//!
//! A simple autopilot that sidesteps obstacles falling toward the car's column.
//! It only issues the same commands a player could, so the simulation can't
//! tell the difference.

use crate::sim::{Direction, GameState, Rect, try_move};

/// How many ticks ahead an obstacle counts as a threat
const LOOKAHEAD_TICKS: f32 = 30.0;

/// Pick the next command, or `None` to hold position
pub fn suggest(state: &GameState) -> Option<Direction> {
    if !state.is_running() {
        return None;
    }

    let car = state.player.rect;
    if !threatened(state, &car) {
        return None;
    }

    // Prefer dodging toward the roomier side
    let center = state.config.playfield.x / 2.0;
    let car_center = (car.left() + car.right()) / 2.0;
    let sides = if car_center > center {
        [Direction::Left, Direction::Right]
    } else {
        [Direction::Right, Direction::Left]
    };

    let legal: Vec<(Direction, Rect)> = sides
        .into_iter()
        .chain([Direction::Down, Direction::Up])
        .filter_map(|dir| {
            let mut moved = car;
            try_move(&mut moved, dir, state.config.step, state.config.playfield)
                .then_some((dir, moved))
        })
        .collect();

    legal
        .iter()
        .find(|(_, moved)| !threatened(state, moved))
        .or(legal.first())
        .map(|(dir, _)| *dir)
}

/// Whether any obstacle shares `car`'s column and will reach it soon
fn threatened(state: &GameState, car: &Rect) -> bool {
    let horizon = state.speed * LOOKAHEAD_TICKS;
    state.obstacles.iter().any(|obstacle| {
        let rock = &obstacle.rect;
        rock.left() < car.right()
            && rock.right() > car.left()
            && rock.bottom() > car.top() - horizon
            && rock.top() < car.bottom()
    })
}
