use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Below this width the two sections stack vertically instead of side by side.
pub const STACK_BELOW_WIDTH: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub controls: Rect,
    pub books: Rect,
    pub dog: Rect,
    pub status: Rect,
}

pub fn split(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Controls
            Constraint::Min(6),    // Sections
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let direction = if area.width < STACK_BELOW_WIDTH {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let sections = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    Areas {
        header: rows[0],
        controls: rows[1],
        books: sections[0],
        dog: sections[1],
        status: rows[3],
    }
}
