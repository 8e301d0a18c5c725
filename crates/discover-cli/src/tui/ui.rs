//! TUI rendering logic for the filter menu.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use super::filter_options::{Control, FetchStatus, FilterOptions, MAX_STARS, rating_to_stars};
use crate::store::FilterStore;

/// Draws the filter menu.
#[allow(clippy::indexing_slicing)]
pub fn draw<S: FilterStore>(frame: &mut Frame, options: &FilterOptions, store: &S) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // type + genre
            Constraint::Length(3), // year range
            Constraint::Length(3), // rating
            Constraint::Min(0),    // spacer
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], store);
    draw_selectors(frame, chunks[1], options, store);
    draw_year_range(frame, chunks[2], options, store);
    draw_rating(frame, chunks[3], options, store);
    draw_footer(frame, chunks[5], options);

    if options.dropdown.is_some() {
        let body = Rect {
            height: chunks[1]
                .height
                .saturating_add(chunks[2].height)
                .saturating_add(chunks[3].height)
                .saturating_add(chunks[4].height),
            ..chunks[1]
        };
        draw_dropdown(frame, body, options);
    }
}

/// Draws the title and the active category.
fn draw_header<S: FilterStore>(frame: &mut Frame, area: Rect, store: &S) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "DISCOVER OPTIONS",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   Category: {}", store.category().label())),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Border and text styles for a control.
fn control_styles<S: FilterStore>(
    options: &FilterOptions,
    store: &S,
    control: Control,
) -> (Style, Style) {
    let enabled = control.is_enabled(store.category());
    let focused = options.focus == control;

    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let text = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    (border, text)
}

/// Block for a control: visible title on the left, accessibility label on the right.
fn control_block(title: &str, control: Control, border: Style) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {title} "))
        .title_top(
            Line::from(Span::styled(
                format!(" {} ", control.accessibility_label()),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        )
}

/// Draws a single-value selector showing `value`.
fn draw_selector<S: FilterStore>(
    frame: &mut Frame,
    area: Rect,
    options: &FilterOptions,
    store: &S,
    control: Control,
    title: &str,
    value: String,
) {
    let (border, text) = control_styles(options, store, control);
    let widget = Paragraph::new(Span::styled(format!("{value} \u{25be}"), text))
        .block(control_block(title, control, border));
    frame.render_widget(widget, area);
}

/// Draws the media type and genre selectors side by side.
#[allow(clippy::indexing_slicing)]
fn draw_selectors<S: FilterStore>(
    frame: &mut Frame,
    area: Rect,
    options: &FilterOptions,
    store: &S,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let filter = store.filter();
    draw_selector(
        frame,
        cols[0],
        options,
        store,
        Control::MediaType,
        "Type",
        String::from(filter.media_type.label()),
    );
    draw_selector(
        frame,
        cols[1],
        options,
        store,
        Control::Genre,
        "Genre",
        filter.genre.label.clone(),
    );
}

/// Draws the from/to year selectors.
#[allow(clippy::indexing_slicing)]
fn draw_year_range<S: FilterStore>(
    frame: &mut Frame,
    area: Rect,
    options: &FilterOptions,
    store: &S,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(48),
            Constraint::Length(3),
            Constraint::Percentage(48),
        ])
        .split(area);

    let filter = store.filter();
    draw_selector(
        frame,
        cols[0],
        options,
        store,
        Control::FromYear,
        "From year",
        filter.from_year.clone(),
    );
    frame.render_widget(
        Paragraph::new("\n -").style(Style::default().fg(Color::Gray)),
        cols[1],
    );
    draw_selector(
        frame,
        cols[2],
        options,
        store,
        Control::ToYear,
        "To year",
        filter.to_year.clone(),
    );
}

/// Draws the star rating row.
fn draw_rating<S: FilterStore>(frame: &mut Frame, area: Rect, options: &FilterOptions, store: &S) {
    let (border, text) = control_styles(options, store, Control::Rating);
    let rating = store.filter().rating;
    let stars = rating_to_stars(rating);

    let mut spans: Vec<Span> = (1..=MAX_STARS)
        .map(|i| {
            let symbol = if i <= stars { "\u{2605} " } else { "\u{2606} " };
            Span::styled(symbol, text)
        })
        .collect();
    spans.push(Span::styled(
        rating.map_or_else(|| String::from(" any"), |r| format!(" {r}/10")),
        Style::default().fg(Color::Gray),
    ));

    let widget =
        Paragraph::new(Line::from(spans)).block(control_block("Rating", Control::Rating, border));
    frame.render_widget(widget, area);
}

/// Draws the open dropdown as a popup over the controls.
fn draw_dropdown(frame: &mut Frame, area: Rect, options: &FilterOptions) {
    let Some(dropdown) = options.dropdown else {
        return;
    };

    let items: Vec<ListItem> = options
        .option_labels(dropdown.control)
        .into_iter()
        .map(ListItem::new)
        .collect();

    let popup = Rect {
        x: area.x.saturating_add(area.width / 4),
        width: area.width / 2,
        ..area
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", dropdown.control.accessibility_label())),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{25b8} ");
    let mut list_state = ListState::default().with_selected(Some(dropdown.cursor));

    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, &mut list_state);
}

/// Draws the footer with key hints or the genre request status.
fn draw_footer(frame: &mut Frame, area: Rect, options: &FilterOptions) {
    let (text, style) = match (&options.status, options.dropdown.is_some()) {
        (FetchStatus::Failed(message), _) => (message.clone(), Style::default().fg(Color::Red)),
        (_, true) => (
            String::from("\u{2191}\u{2193}/j/k: move  Enter: select  Esc: close"),
            Style::default(),
        ),
        (FetchStatus::Loading(media_type), false) => (
            format!("Loading {} genres...", media_type.label()),
            Style::default().fg(Color::Yellow),
        ),
        (FetchStatus::Idle | FetchStatus::Loaded(_), false) => (
            String::from(
                "Tab/j/k: focus  Enter: open  \u{2190}\u{2192}/0-5: rating  c: category  s: apply  q: cancel",
            ),
            Style::default(),
        ),
    };

    let footer =
        Paragraph::new(Span::styled(text, style)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
