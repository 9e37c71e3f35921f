use devkit_shortcuts::{
    ShortcutHandle,
    ShortcutParser,
    ShortcutPattern,
};
use ratatui::prelude::*;
use ratatui::widgets::{
    Block,
    Borders,
    Clear,
    List,
    ListItem,
    Paragraph,
};

use crate::app::{
    App,
    Focus,
};

pub const TEXT: Color = Color::Rgb(205, 214, 244);
pub const SUBTEXT: Color = Color::Rgb(166, 173, 200);
pub const MAUVE: Color = Color::Rgb(203, 166, 247);
pub const YELLOW: Color = Color::Rgb(249, 226, 175);
pub const BASE: Color = Color::Rgb(30, 30, 46);
pub const SURFACE: Color = Color::Rgb(69, 71, 90);

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}

pub fn draw_ui(f: &mut Frame, app: &mut App, handle: &ShortcutHandle) {
    let area = f.area();
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    draw_search(f, app, chunks[0]);
    draw_tools(f, app, chunks[1]);
    draw_status(f, app, handle, chunks[2]);

    if app.show_help {
        draw_help_popup(f, handle, area);
    }
}

fn focused_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(MAUVE)
    } else {
        Style::default().fg(SURFACE)
    }
}

fn draw_search(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focused_border(focused))
        .title(Span::styled("Search", Style::default().fg(MAUVE)));

    let paragraph = Paragraph::new(app.query.as_str())
        .style(Style::default().fg(TEXT))
        .block(block);
    f.render_widget(paragraph, area);

    if focused && !app.show_help {
        let cursor_x = area.x + 1 + app.query.chars().count() as u16;
        f.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_tools(f: &mut Frame, app: &mut App, area: Rect) {
    let tools = app.filtered_tools();
    let items: Vec<ListItem> = tools
        .iter()
        .map(|tool| {
            let marker = if app.opened.is_some_and(|opened| opened.id == tool.id) {
                "● "
            } else {
                "  "
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(YELLOW)),
                Span::styled(tool.name, Style::default().fg(TEXT)),
                Span::styled(format!("  {}", tool.category), Style::default().fg(SUBTEXT)),
            ]))
        })
        .collect();

    let title = format!("Tools ({})", tools.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focused_border(app.focus == Focus::List))
                .title(Span::styled(title, Style::default().fg(MAUVE))),
        )
        .highlight_style(
            Style::default()
                .bg(SURFACE)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn hint(parser: &ShortcutParser, handle: &ShortcutHandle, description: &str) -> Option<String> {
    handle
        .registry()
        .iter()
        .find(|definition| definition.description == description)
        .map(|definition| format!("{} {}", parser.format(definition), description.to_lowercase()))
}

fn draw_status(f: &mut Frame, app: &App, handle: &ShortcutHandle, area: Rect) {
    let text = match &app.status {
        Some(status) => status.clone(),
        None => {
            let parser = ShortcutParser::new(handle.platform());
            [
                ShortcutPattern::SearchFocus,
                ShortcutPattern::NextItem,
                ShortcutPattern::ShowHelp,
            ]
            .into_iter()
            .filter_map(|pattern| hint(&parser, handle, pattern.description()))
            .collect::<Vec<_>>()
            .join(" · ")
        }
    };

    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(SUBTEXT)),
        area,
    );
}

pub fn help_lines(handle: &ShortcutHandle) -> Vec<Line<'static>> {
    let parser = ShortcutParser::new(handle.platform());
    let mut lines = Vec::new();

    for (category, definitions) in handle.registry().grouped() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            category.to_string(),
            Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
        )));

        for definition in definitions {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<14}", parser.format(definition)),
                    Style::default().fg(YELLOW),
                ),
                Span::styled(definition.description.clone(), Style::default().fg(TEXT)),
            ]));
        }
    }

    if handle.is_mac() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{} shortcuts need a terminal that reports the Command key",
                handle.platform().primary_modifier_label()
            ),
            Style::default().fg(SUBTEXT),
        )));
    }

    lines
}

fn draw_help_popup(f: &mut Frame, handle: &ShortcutHandle, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "Keyboard shortcuts",
            Style::default().fg(MAUVE),
        ))
        .style(Style::default().bg(BASE).fg(TEXT));

    f.render_widget(Clear, popup_area);
    f.render_widget(Paragraph::new(help_lines(handle)).block(block), popup_area);
}
