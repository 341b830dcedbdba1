use snake_engine::render::{draw_commands, Color, DrawCommand, Fill};
use snake_engine::{AxisOrientation, Simulation};

fn square_char(color: Color, fill: Fill) -> char {
    match (color, fill) {
        (Color::BLACK, Fill::Solid) => '#',
        (Color::BLACK, Fill::Outline) => 'o',
        (Color::BLUE, _) => '@',
        (Color::RED, _) => '*',
        _ => '?',
    }
}

/// Paints the draw commands of `sim` onto a character canvas, one char per cell.
pub fn render_frame(sim: &Simulation) -> String {
    let grid = sim.grid();
    let bounds = grid.pixel_bounds();
    let mut canvas = vec![vec![' '; grid.cols()]; grid.rows()];
    let mut header: Vec<(i32, String)> = Vec::new();
    let mut footer: Vec<(i32, String)> = Vec::new();

    for command in draw_commands(sim) {
        match command {
            DrawCommand::Square { x, y, color, fill, .. } => {
                if let Some(cell) = grid.cell_at_pixel(x, y) {
                    canvas[cell.row][cell.col] = square_char(color, fill);
                }
            }
            DrawCommand::Text { y, content, .. } => {
                if y < bounds.top {
                    header.push((y, content));
                } else {
                    footer.push((y, content));
                }
            }
        }
    }

    let mut frame = String::new();
    push_text_lines(&mut frame, header);

    let row_order: Vec<usize> = match grid.orientation() {
        AxisOrientation::Down => (0..grid.rows()).collect(),
        AxisOrientation::Up => (0..grid.rows()).rev().collect(),
    };
    for row in row_order {
        frame.extend(canvas[row].iter());
        frame.push('\n');
    }

    push_text_lines(&mut frame, footer);
    frame
}

/// Texts sharing a screen line are joined left to right.
fn push_text_lines(frame: &mut String, mut texts: Vec<(i32, String)>) {
    texts.sort_by_key(|(y, _)| *y);
    let mut current_y = None;
    for (y, content) in texts {
        if current_y == Some(y) {
            frame.push_str("    ");
        } else {
            if current_y.is_some() {
                frame.push('\n');
            }
            current_y = Some(y);
        }
        frame.push_str(&content);
    }
    if current_y.is_some() {
        frame.push('\n');
    }
}
