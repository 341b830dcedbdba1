//! Turns the read-only state of a [`Simulation`] into plain draw commands.
//!
//! Nothing here touches a screen. A renderer walks the returned list in order
//! and paints squares and text at the given pixel positions.

use crate::grid::Cell;
use crate::simulation::Simulation;

pub const FONT_SIZE: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Solid,
    Outline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Square {
        x: i32,
        y: i32,
        size: u32,
        color: Color,
        fill: Fill,
    },
    Text {
        x: i32,
        y: i32,
        content: String,
        color: Color,
        align: TextAlign,
    },
}

impl DrawCommand {
    fn square(cell: &Cell, color: Color, fill: Fill) -> Self {
        DrawCommand::Square {
            x: cell.x,
            y: cell.y,
            size: cell.size,
            color,
            fill,
        }
    }

    fn text(x: i32, y: i32, content: impl Into<String>, align: TextAlign) -> Self {
        DrawCommand::Text {
            x,
            y,
            content: content.into(),
            color: Color::BLACK,
            align,
        }
    }
}

/// Walls, body, head, food, then the status texts, in painting order.
pub fn draw_commands(sim: &Simulation) -> Vec<DrawCommand> {
    let grid = sim.grid();
    let capacity = grid.rows() * 2 + grid.cols() * 2 + sim.snake().len() + 4;
    let mut commands = Vec::with_capacity(capacity);

    commands.extend(
        grid.border_cells()
            .map(|cell| DrawCommand::square(cell, Color::BLACK, Fill::Solid)),
    );

    let mut segments = sim.segments();
    if let Some(head) = segments.next_back() {
        commands.extend(
            segments.map(|cell| DrawCommand::square(cell, Color::BLACK, Fill::Outline)),
        );
        commands.push(DrawCommand::square(head, Color::BLUE, Fill::Outline));
    }

    commands.push(DrawCommand::square(&sim.food(), Color::RED, Fill::Solid));

    let bounds = grid.pixel_bounds();
    let cell_size = grid.cell_size() as i32;
    let header_y = bounds.top.saturating_sub(cell_size.saturating_add(FONT_SIZE / 2));
    let footer_y = bounds.bottom.saturating_sub(cell_size).saturating_add(FONT_SIZE);

    commands.push(DrawCommand::text(
        bounds.left,
        header_y,
        format!("Score: {}", sim.score()),
        TextAlign::Left,
    ));

    let hint = if sim.is_dead() {
        commands.push(DrawCommand::text(bounds.right, header_y, "Game Over", TextAlign::Right));
        "Press SPACE to restart"
    } else if sim.is_paused() {
        "Press SPACE to resume"
    } else {
        "Press SPACE to pause"
    };
    commands.push(DrawCommand::text(bounds.left, footer_y, hint, TextAlign::Left));

    commands
}
