use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::grid::Grid;

/// Terminal columns used per grid cell, so cells look roughly square.
pub const CELL_COLUMNS: u16 = 2;

/// Glyph drawn for every cell; only its color differs.
pub const GLYPH_CELL: &str = "██";

/// Color of occupied cells.
pub const OCCUPIED_COLOR: Color = Color::White;

/// Color of free cells.
pub const FREE_COLOR: Color = Color::Black;

/// Draws the occupancy snapshot inside a bordered block.
pub fn render(frame: &mut Frame<'_>, grid: &Grid) {
    let area = frame.area();
    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    render_cells(frame.buffer_mut(), inner, grid);
}

fn render_cells(buffer: &mut Buffer, inner: Rect, grid: &Grid) {
    for (y, row) in grid.rows().enumerate() {
        for (x, occupied) in row.iter().enumerate() {
            let Some((column, line)) = cell_to_terminal(inner, x, y) else {
                continue;
            };

            let color = if *occupied { OCCUPIED_COLOR } else { FREE_COLOR };
            buffer.set_string(column, line, GLYPH_CELL, Style::new().fg(color));
        }
    }
}

/// Maps a grid cell to the terminal position of its left column, clipping cells
/// that do not fit entirely inside `inner`.
fn cell_to_terminal(inner: Rect, x: usize, y: usize) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(y).ok()?;

    let column = inner.x.checked_add(x_offset)?;
    let line = inner.y.checked_add(y_offset)?;
    if column.saturating_add(CELL_COLUMNS) > inner.right() || line >= inner.bottom() {
        return None;
    }

    Some((column, line))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::style::Color;

    use crate::config::GridSize;
    use crate::grid::{Grid, Position};

    use super::{cell_to_terminal, render};

    #[test]
    fn occupied_cells_are_drawn_white_and_free_cells_black() {
        let mut grid = Grid::new(GridSize {
            width: 3,
            height: 2,
        });
        grid.set_occupied(Position::new(1, 0), true).expect("in range");

        let mut terminal = Terminal::new(TestBackend::new(8, 4)).expect("test backend");
        terminal
            .draw(|frame| render(frame, &grid))
            .expect("draw succeeds");

        let buffer = terminal.backend().buffer();
        // Border takes one column/row; cell (1, 0) starts at column 1 + 2.
        assert_eq!(buffer[(3, 1)].symbol(), "█");
        assert_eq!(buffer[(3, 1)].fg, Color::White);
        assert_eq!(buffer[(4, 1)].fg, Color::White);
        assert_eq!(buffer[(1, 1)].fg, Color::Black);
        assert_eq!(buffer[(5, 2)].fg, Color::Black);
    }

    #[test]
    fn cells_outside_the_area_are_clipped() {
        let inner = Rect::new(1, 1, 5, 2);

        assert_eq!(cell_to_terminal(inner, 0, 0), Some((1, 1)));
        assert_eq!(cell_to_terminal(inner, 1, 1), Some((3, 2)));
        // Only one of the two columns would fit.
        assert_eq!(cell_to_terminal(inner, 2, 0), None);
        assert_eq!(cell_to_terminal(inner, 0, 2), None);
    }
}
