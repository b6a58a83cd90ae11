//! Colored console rendering of boards using crossterm.

use crossterm::style::{Color, Stylize};

use crate::grid::Board;

/// Returns the display color for a piece id (1-10).
///
/// The mapping approximates the physical piece colors and is stable so
/// boards render consistently across runs.
pub fn piece_color(id: u8) -> Color {
    match id {
        1 => Color::Green,
        2 => Color::DarkGreen,
        3 => Color::Yellow,
        4 => Color::DarkYellow,
        5 => Color::Red,
        6 => Color::DarkBlue,
        7 => Color::DarkMagenta,
        8 => Color::Blue,
        9 => Color::Magenta,
        10 => Color::Cyan,
        _ => Color::White,
    }
}

/// Renders a board as colored dots, one styled cell per board cell.
///
/// Empty cells show as a dim dot. The returned string carries ANSI codes;
/// print it to a terminal.
pub fn render<const R: usize, const C: usize>(board: &Board<R, C>) -> String {
    let mut output = String::new();
    for row in 0..R {
        for col in 0..C {
            let id = board.get(row, col);
            if id == 0 {
                output.push_str(&format!("{}", "\u{00B7} ".with(Color::DarkGrey)));
            } else {
                output.push_str(&format!("{}", "\u{25CF} ".with(piece_color(id))));
            }
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::BOARD_120;

    #[test]
    fn test_piece_colors_are_distinct() {
        let colors: Vec<Color> = (1..=10).map(piece_color).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_render_emits_one_line_per_row() {
        let rendered = render(&BOARD_120);
        assert_eq!(rendered.lines().count(), 5);
        assert!(rendered.contains('\u{25CF}'));
    }
}
