use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::task::{format_relative_time, Filter, Task};

use super::app::{
    AppState, DeleteConfirmState, InputMode, InputState, StatusKind, SuggestState,
};

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);

pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);
    let tabs = chunks[0];
    let main = chunks[1];
    let footer = chunks[2];

    render_tabs(frame, app, tabs);
    render_list(frame, app, main);
    render_footer(frame, app, footer);

    if let Some(input) = app.input.as_ref() {
        render_input_modal(frame, area, input);
    }
    if let Some(state) = app.suggest.as_ref() {
        render_suggest_modal(frame, area, state);
    }
    if let Some(state) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, state);
    }
}

fn render_tabs(frame: &mut Frame, app: &AppState, area: Rect) {
    let (all, done, pending) = app.tab_counts();
    let tabs = [
        ("1 All", Filter::All, all, COLOR_INFO),
        ("2 Done", Filter::Done, done, COLOR_SUCCESS),
        ("3 Pending", Filter::Undone, pending, COLOR_WARNING),
    ];

    let mut spans = Vec::new();
    for (label, filter, count, color) in tabs {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        let text = format!(" {label} ({count}) ");
        let style = if app.view.filter == filter {
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::styled(text, style));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(COLOR_BG_MUTED)),
    );
    frame.render_widget(widget, area);
}

fn render_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let view = app.current_view();
    let content_width = area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    if !app.loaded {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "loading tasks...",
            Style::default().fg(COLOR_MUTED),
        )));
    } else if view.tasks.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            view.empty_message(),
            Style::default().fg(COLOR_MUTED),
        )));
        lines.push(Line::from(Span::styled(
            "Add your first task to get started",
            Style::default().fg(COLOR_MUTED_DARK),
        )));
    } else {
        for (index, task) in view.tasks.iter().enumerate() {
            lines.push(render_list_row(
                task,
                index == app.selected,
                content_width,
            ));
        }
    }

    let title = format!(" Tasks  page {}/{} ", view.page, view.page_count.max(1));
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER_LIST))
            .title(title),
    );
    frame.render_widget(widget, area);
}

fn render_list_row(task: &Task, selected: bool, width: usize) -> Line<'static> {
    let marker = if task.done { "[x]" } else { "[ ]" };
    let id_text = format!("#{:<4}", task.id);

    let age = task
        .created()
        .map(|created| format_relative_time(&created))
        .unwrap_or_default();
    let used = 3 + 1 + id_text.len() + 1 + 2 + age.len() + 2;
    let text = truncate_text(&task.text, width.saturating_sub(used));

    let marker_style = if task.done {
        Style::default().fg(COLOR_SUCCESS)
    } else {
        Style::default().fg(COLOR_MUTED)
    };
    let mut text_style = if selected {
        Style::default()
            .fg(COLOR_TEXT)
            .bg(COLOR_BG_MUTED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_TEXT)
    };
    if task.done {
        text_style = text_style.fg(COLOR_MUTED).add_modifier(Modifier::CROSSED_OUT);
    }

    let prefix = if selected { ">" } else { " " };
    let mut spans = vec![
        Span::styled(prefix.to_string(), Style::default().fg(COLOR_ACCENT)),
        Span::raw(" "),
        Span::styled(marker.to_string(), marker_style),
        Span::raw(" "),
        Span::styled(id_text, Style::default().fg(COLOR_ACCENT)),
        Span::raw(" "),
        Span::styled(text, text_style),
    ];
    if !age.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(age, Style::default().fg(COLOR_MUTED_DARK)));
    }
    Line::from(spans)
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let hint = app.footer_hint();
    let hint_span = Span::styled(hint, Style::default().fg(COLOR_INFO));
    let line = if let Some((status, kind)) = app.status_line() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(status, status_style),
        ])
    } else {
        Line::from(hint_span)
    };
    let counts_line = Line::from(Span::styled(
        app.current_view().count_line(),
        Style::default().fg(COLOR_ACCENT),
    ));
    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

fn render_input_modal(frame: &mut Frame, area: Rect, input: &InputState) {
    let content_width = area.width.saturating_sub(8).min(64);
    let modal = centered_rect(content_width, 7, area);
    frame.render_widget(Clear, modal);

    let (title, heading) = match input.mode {
        InputMode::Add => ("New Task", "What needs doing?"),
        InputMode::Edit { .. } => ("Edit Task", "Replacement text:"),
    };

    let lines = vec![
        Line::from(Span::styled(
            heading,
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(input.buffer.clone(), Style::default().fg(COLOR_TEXT)),
            Span::styled("_", Style::default().fg(COLOR_ACCENT)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "enter confirm  esc cancel",
            Style::default().fg(COLOR_MUTED_DARK),
        )),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, modal);
}

fn render_suggest_modal(frame: &mut Frame, area: Rect, state: &SuggestState) {
    let content_width = area.width.saturating_sub(8).min(64);
    let height = (state.picked.len() as u16) * 2 + 5;
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let text_width = (content_width as usize).saturating_sub(6);
    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Need inspiration?",
        Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (index, suggestion) in state.picked.iter().enumerate() {
        let selected = index == state.selected;
        let prefix = if selected { "> " } else { "  " };
        let text_style = if selected {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        lines.push(Line::from(vec![
            Span::styled(prefix.to_string(), Style::default().fg(COLOR_ACCENT)),
            Span::styled(truncate_text(suggestion.text, text_width), text_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", truncate_text(suggestion.subtitle, text_width)),
            Style::default().fg(COLOR_MUTED_DARK),
        )));
    }

    lines.push(Line::from(Span::styled(
        "j/k move  r refresh  enter add  esc cancel",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Suggestions"))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, modal);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, state: &DeleteConfirmState) {
    let content_width = area.width.saturating_sub(8).min(64);
    let modal = centered_rect(content_width, 9, area);
    frame.render_widget(Clear, modal);

    let text_width = (content_width as usize).saturating_sub(8);
    let lines = vec![
        Line::from(Span::styled(
            "Delete task?",
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Task: ", Style::default().fg(COLOR_MUTED_DARK)),
            Span::styled(
                format!("#{} {}", state.task_id, truncate_text(&state.text, text_width)),
                Style::default().fg(COLOR_TEXT),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "This cannot be undone.",
            Style::default().fg(COLOR_WARNING),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y/enter confirm  esc cancel",
            Style::default().fg(COLOR_MUTED_DARK),
        )),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Delete Task"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
