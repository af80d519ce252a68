//! TUI widget rendering: header, sidebar, search box, roadmap panel,
//! document list, detail viewer, status bar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::controller::{Browser, Phase};
use crate::model::{CategoryFilter, Document, TrainingRoadmap};

/// Which input currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
    Sidebar,
    Topic,
}

/// Everything the renderer needs for one frame.
pub struct Screen<'a> {
    pub browser: &'a Browser,
    pub mode: InputMode,
    pub cursor: usize,
    pub sidebar_cursor: usize,
    pub topic: &'a str,
    pub notice: Option<&'a str>,
}

const EMPTY_STATE: &str = "No documents found in this section.";

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn input_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::White)
    } else {
        dim()
    }
}

/// One list entry: category badge, title, date, version, then the summary.
pub fn document_item(doc: &Document) -> ListItem<'static> {
    let mut head = vec![
        Span::styled(format!("[{}] ", doc.category), Style::default().fg(Color::Cyan)),
        Span::styled(doc.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", doc.date), dim()),
    ];
    if let Some(v) = &doc.version {
        head.push(Span::styled(format!("  V{v}"), dim()));
    }
    ListItem::new(vec![
        Line::from(head),
        Line::from(Span::styled(format!("    {}", doc.summary), dim())),
    ])
}

/// Roadmap steps as numbered lines with duration and resources.
pub fn roadmap_lines(roadmap: &TrainingRoadmap) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            roadmap.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(roadmap.objective.clone(), dim())),
        Line::raw(""),
    ];
    for (idx, step) in roadmap.steps.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", idx + 1), Style::default().fg(Color::Magenta)),
            Span::styled(step.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  ({})", step.duration), dim()),
        ]));
        lines.push(Line::raw(format!("    {}", step.description)));
        for res in &step.resources {
            lines.push(Line::from(Span::styled(format!("    - {res}"), dim())));
        }
    }
    lines
}

/// Main layout rendering.
pub fn render(frame: &mut Frame, screen: &Screen<'_>) {
    let state = screen.browser.state();
    let visible = screen.browser.visible().unwrap_or_default();

    let [header_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    // Header.
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " lumina ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " Knowledge Space :: Navigating {} assets in your repository :: {} ",
            visible.len(),
            state.category()
        )),
    ]));
    frame.render_widget(header, header_area);

    let main_area = if state.sidebar_open() {
        let [side, main] =
            Layout::horizontal([Constraint::Length(16), Constraint::Fill(1)]).areas(body_area);
        render_sidebar(frame, side, screen);
        main
    } else {
        body_area
    };

    let panel_height = if state.roadmap_panel_visible() {
        Constraint::Percentage(45)
    } else {
        Constraint::Length(0)
    };
    let [search_area, roadmap_area, list_area] =
        Layout::vertical([Constraint::Length(3), panel_height, Constraint::Fill(1)])
            .areas(main_area);

    // Search box.
    let search = Paragraph::new(state.search())
        .block(Block::default().borders(Borders::ALL).title(" Search library (/) "))
        .style(input_style(screen.mode == InputMode::Search));
    frame.render_widget(search, search_area);

    if state.roadmap_panel_visible() {
        render_roadmap_panel(frame, roadmap_area, screen);
    }

    // Document list.
    let block = Block::default().borders(Borders::ALL);
    if visible.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(EMPTY_STATE, dim())))
            .centered()
            .block(block);
        frame.render_widget(empty, list_area);
    } else {
        let items: Vec<ListItem> = visible.iter().map(|d| document_item(d)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        let mut list_state = ListState::default().with_selected(Some(screen.cursor));
        frame.render_stateful_widget(list, list_area, &mut list_state);
    }

    if let Some(doc) = state.selected() {
        render_viewer(frame, frame.area(), doc, screen);
    }

    // Status bar.
    let hint = match (screen.mode, state.selected().is_some()) {
        (_, true) => "s: AI summary | Esc: close",
        (InputMode::Search, _) | (InputMode::Topic, _) => "Enter/Esc: done",
        (InputMode::Sidebar, _) => "j/k: move | Enter: choose | Esc: close",
        (InputMode::Browse, _) if state.roadmap_panel_visible() => {
            "j/k: move | Enter: open | /: search | c: categories | g: roadmap topic | q: quit"
        }
        (InputMode::Browse, _) => "j/k: move | Enter: open | /: search | c: categories | q: quit",
    };
    let mut spans = vec![Span::styled(format!(" {hint} "), dim())];
    if let Some(notice) = screen.notice {
        spans.push(Span::styled(format!("| {notice}"), Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), status_area);
}

fn render_sidebar(frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let active = screen.browser.state().category();
    let items: Vec<ListItem> = CategoryFilter::choices()
        .into_iter()
        .map(|c| {
            let style = if c == active {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                dim()
            };
            ListItem::new(Line::from(Span::styled(c.to_string(), style)))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Library "))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(screen.sidebar_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_roadmap_panel(frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let state = screen.browser.state();
    let [topic_area, result_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

    let topic = Paragraph::new(screen.topic)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Training roadmap topic (g), e.g. Onboarding for Senior Engineers "),
        )
        .style(input_style(screen.mode == InputMode::Topic));
    frame.render_widget(topic, topic_area);

    let body: Vec<Line> = match (state.roadmap_phase(), state.roadmap()) {
        (Phase::Loading, _) => vec![Line::from(Span::styled(
            "Architecting...",
            Style::default().fg(Color::Yellow),
        ))],
        (_, Some(roadmap)) => roadmap_lines(roadmap),
        _ => vec![Line::from(Span::styled(
            "Enter a focus area to generate a custom training roadmap derived from your existing manuals and standard documents.",
            dim(),
        ))],
    };
    let result = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(result, result_area);
}

fn render_viewer(frame: &mut Frame, area: Rect, doc: &Document, screen: &Screen<'_>) {
    let [popup] = Layout::vertical([Constraint::Percentage(80)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(80)])
        .flex(Flex::Center)
        .areas(popup);

    let state = screen.browser.state();
    let mut meta = vec![
        Span::styled(doc.category.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(format!("  {}", doc.date), dim()),
    ];
    if let Some(v) = &doc.version {
        meta.push(Span::styled(format!("  V{v}"), dim()));
    }
    if let Some(a) = &doc.author {
        meta.push(Span::styled(format!("  by {a}"), dim()));
    }

    let mut lines = vec![
        Line::from(meta),
        Line::from(Span::styled(
            doc.tags.iter().map(|t| format!("#{t}")).collect::<Vec<_>>().join(" "),
            dim(),
        )),
        Line::raw(""),
        Line::raw(doc.content.clone()),
        Line::raw(""),
        Line::from(Span::styled(
            "AI Summary",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    lines.push(match (state.summary_phase(), state.summary()) {
        (Phase::Loading, _) => Line::from(Span::styled(
            "Generating summary...",
            Style::default().fg(Color::Yellow),
        )),
        (_, Some(summary)) => Line::raw(summary.to_string()),
        _ => Line::from(Span::styled("Press s to generate an AI summary.", dim())),
    });

    let viewer = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", doc.title)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(Clear, popup);
    frame.render_widget(viewer, popup);
}
