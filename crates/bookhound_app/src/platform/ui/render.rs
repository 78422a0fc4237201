use bookhound_core::{AppViewModel, BookRowView, BookSectionView, DogSectionView, DOG_ERROR_MESSAGE};
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::constants::*;
use super::layout;

pub fn render(frame: &mut Frame, view: &AppViewModel) {
    let areas = layout::split(frame.area());

    frame.render_widget(
        Paragraph::new(TITLE)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD)),
        areas.header,
    );
    frame.render_widget(controls(), areas.controls);

    let (book_lines, book_alignment) = book_lines(&view.books);
    frame.render_widget(
        section(BOOKS_HEADING, COLOR_PRIMARY, book_lines, book_alignment),
        areas.books,
    );
    frame.render_widget(
        section(DOG_HEADING, COLOR_SECONDARY, dog_lines(&view.dog), Alignment::Center),
        areas.dog,
    );

    frame.render_widget(
        Paragraph::new(status_text(view)).style(Style::default().fg(COLOR_DIM)),
        areas.status,
    );
}

fn controls() -> Paragraph<'static> {
    let button = |key: char, label: &'static str, color: Color| {
        vec![
            Span::styled(
                format!("[{key}]"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {label}   ")),
        ]
    };

    let mut spans = vec![Span::raw("Controls:  ")];
    spans.extend(button(KEY_REFRESH_BOOKS, "📚 Refresh Books", COLOR_PRIMARY));
    spans.extend(button(KEY_REFRESH_DOGS, "🐕 Refresh Dogs", COLOR_SECONDARY));
    spans.extend(button(KEY_REFRESH_BOTH, "🔄 Refresh Both", COLOR_ACCENT));
    spans.extend(button(KEY_EMPTY_ALL, "🗑 Empty All", COLOR_ACCENT));
    spans.push(Span::styled(
        "↑/↓ select  Enter details  q quit",
        Style::default().fg(COLOR_DIM),
    ));

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(COLOR_DIM)),
    )
}

fn section(
    heading: &'static str,
    color: Color,
    lines: Vec<Line<'static>>,
    alignment: Alignment,
) -> Paragraph<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {heading} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    Paragraph::new(lines)
        .block(block)
        .alignment(alignment)
        .wrap(Wrap { trim: false })
}

pub fn book_lines(view: &BookSectionView) -> (Vec<Line<'static>>, Alignment) {
    let lines = match view {
        BookSectionView::Loading => vec![Line::raw(""), Line::raw(format!("⏳ {BOOKS_LOADING}"))],
        BookSectionView::Error { message } => error_lines(message),
        BookSectionView::Empty => vec![Line::raw(""), Line::raw("📚"), Line::raw(BOOKS_EMPTY)],
        BookSectionView::Refreshing => vec![Line::raw(""), Line::raw(BOOKS_REFRESHING)],
        BookSectionView::Populated { rows } => {
            return (rows.iter().flat_map(book_row_lines).collect(), Alignment::Left);
        }
    };
    (lines, Alignment::Center)
}

fn book_row_lines(row: &BookRowView) -> Vec<Line<'static>> {
    let marker = if row.selected { "▶ " } else { "  " };
    let title_style = if row.selected {
        Style::default()
            .fg(COLOR_PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let detail = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("    {label}: "), Style::default().fg(COLOR_DIM)),
            Span::raw(value.to_string()),
        ])
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw(marker),
            Span::styled(row.title.clone(), title_style),
        ]),
        Line::raw(format!("    by {}", row.author)),
    ];
    let toggle = match &row.details {
        Some(book) => {
            lines.push(detail("Genre", &book.genre));
            lines.push(detail("Publisher", &book.publisher));
            lines.push(detail("Published", &book.published));
            if let Some(isbn) = &book.isbn {
                lines.push(detail("ISBN", isbn));
            }
            lines.push(Line::raw(format!("    {}", book.description)));
            "    📖 Hide Details"
        }
        None => "    📖 View Details",
    };
    lines.push(Line::styled(toggle, Style::default().fg(COLOR_DIM)));
    lines.push(Line::raw(""));
    lines
}

pub fn dog_lines(view: &DogSectionView) -> Vec<Line<'static>> {
    match view {
        DogSectionView::Loading => vec![Line::raw(""), Line::raw(format!("⏳ {DOGS_LOADING}"))],
        DogSectionView::Error { message } => error_lines(message),
        DogSectionView::ImageFailed { url } => vec![
            Line::raw(""),
            Line::raw("🐕"),
            Line::raw(DOG_ERROR_MESSAGE),
            Line::styled(url.clone(), Style::default().fg(COLOR_DIM)),
        ],
        DogSectionView::Populated { url } => vec![
            Line::raw(""),
            Line::raw("🐶 Cute Dog"),
            Line::styled(
                url.clone(),
                Style::default()
                    .fg(COLOR_SECONDARY)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ],
        DogSectionView::Fallback => vec![Line::raw(""), Line::raw("🐕"), Line::raw(DOGS_FALLBACK)],
    }
}

fn error_lines(message: &str) -> Vec<Line<'static>> {
    vec![
        Line::raw(""),
        Line::raw(ERROR_ICON),
        Line::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(ERROR_HINT, Style::default().fg(COLOR_DIM)),
    ]
}

pub fn status_text(view: &AppViewModel) -> String {
    if view.busy.is_empty() {
        return "Ready".to_string();
    }
    let labels: Vec<_> = view.busy.iter().map(|key| key.label()).collect();
    format!("Working: {}", labels.join(", "))
}
