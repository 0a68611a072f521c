use std::mem;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::{WatchCategory, WatchRecord};
use crate::state::{NoticeKind, Portfolio};

use super::helpers::{centered_rect, notice_style, truncate_line};

use super::screens::{GridView, SearchBox, GRID_COLUMNS};
use super::share::SystemShare;

/// Height allocation per watch card in the grid.
const CARD_HEIGHT: u16 = 7;
/// Header space for the search bar, filter bar, and result summary.
const HEADER_HEIGHT: u16 = 5;
/// Footer space reserved for notices and key hints.
const FOOTER_HEIGHT: u16 = 3;
/// How close (in grid rows) the cursor may get to the end of the window
/// before the next page is requested. Stands in for the original site's
/// scroll-proximity trigger.
const SCROLL_AHEAD_ROWS: usize = 2;

/// Placeholder shown when every record is filtered out.
const EMPTY_RESULTS: &str = "No results found. Try adjusting your filters or search term.";

/// Fine-grained input modes. The modal is not a mode: its visibility follows
/// the controller's fragment, so a deep link opens it without any UI state.
enum Mode {
    Normal,
    Searching(SearchBox),
}

/// Ratatui front end over the view-state controller. Everything here reads
/// derived views and calls named operations; no filtering, persistence, or
/// routing logic lives on this side.
pub struct App {
    portfolio: Portfolio,
    grid: GridView,
    mode: Mode,
    details_expanded: bool,
    share: SystemShare,
}

impl App {
    pub fn new(portfolio: Portfolio) -> Self {
        Self {
            portfolio,
            grid: GridView::new(),
            mode: Mode::Normal,
            details_expanded: false,
            share: SystemShare,
        }
    }

    /// Resolve due deadlines in the controller and keep the grid cursor
    /// valid if the window changed underneath it. Returns whether a redraw
    /// is worthwhile.
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.portfolio.tick(now);
        if changed {
            self.grid.ensure_in_bounds(self.portfolio.window().len());
        }
        changed
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, now, &mut exit)?,
            Mode::Searching(search) => self.handle_search_key(code, now, search)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, now: Instant, exit: &mut bool) -> Result<Mode> {
        if self.portfolio.selected_watch().is_some() {
            self.handle_modal_key(code, now);
            return Ok(Mode::Normal);
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Left => self.move_grid(|grid, len| grid.move_horizontal(-1, len), now),
            KeyCode::Right => self.move_grid(|grid, len| grid.move_horizontal(1, len), now),
            KeyCode::Up => self.move_grid(|grid, len| grid.move_vertical(-1, len), now),
            KeyCode::Down => self.move_grid(|grid, len| grid.move_vertical(1, len), now),
            KeyCode::Home => self.move_grid(|grid, len| grid.select_first(len), now),
            KeyCode::End => self.move_grid(|grid, len| grid.select_last(len), now),
            KeyCode::Enter => {
                if let Some(id) = self.current_card_id() {
                    self.details_expanded = false;
                    self.portfolio.select_watch(id);
                }
            }
            KeyCode::Char('/') => {
                return Ok(Mode::Searching(SearchBox::new()));
            }
            KeyCode::Char('f') => {
                if let Some(id) = self.current_card_id() {
                    self.portfolio.toggle_favorite(id, now);
                    self.clamp_grid();
                }
            }
            KeyCode::Char('F') => {
                self.portfolio.toggle_favorites_only();
                self.clamp_grid();
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.portfolio.clear_categories();
                self.clamp_grid();
            }
            KeyCode::Char(ch @ '1'..='3') => {
                let index = ch as usize - '1' as usize;
                self.portfolio.toggle_category(WatchCategory::ALL[index]);
                self.clamp_grid();
            }
            _ => {}
        }

        Ok(Mode::Normal)
    }

    /// Keys scoped to the open modal.
    fn handle_modal_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.details_expanded = false;
                self.portfolio.clear_selection();
            }
            KeyCode::Char('s') => {
                self.portfolio.share_selected(&mut self.share, now);
            }
            KeyCode::Char('o') => {
                let Some(url) = self
                    .portfolio
                    .selected_watch()
                    .map(|watch| watch.image_url.clone())
                else {
                    return;
                };
                if let Err(err) = open_link(&url) {
                    log::warn!("failed to open image {url}: {err}");
                    self.portfolio
                        .notify("Could not open the image.", NoticeKind::Error, now);
                }
            }
            KeyCode::Char('d') => {
                let has_details = self
                    .portfolio
                    .selected_watch()
                    .is_some_and(|watch| watch.has_details());
                if has_details {
                    self.details_expanded = !self.details_expanded;
                }
            }
            KeyCode::Char('f') => {
                if let Some(id) = self.portfolio.selected_watch().map(|watch| watch.id) {
                    self.portfolio.toggle_favorite(id, now);
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode, now: Instant, mut search: SearchBox) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                // The typed term stays active; only the overlay goes away.
                self.clamp_grid();
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                if let Some(position) = search.cursor {
                    self.portfolio.accept_suggestion(position, now);
                }
                self.clamp_grid();
                return Ok(Mode::Normal);
            }
            KeyCode::Down => search.move_cursor(1, self.portfolio.suggestions().len()),
            KeyCode::Up => search.move_cursor(-1, self.portfolio.suggestions().len()),
            KeyCode::Backspace => {
                let mut term = self.portfolio.search_term().to_string();
                term.pop();
                self.portfolio.set_search_text(&term, now);
                search.cursor = None;
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                let mut term = self.portfolio.search_term().to_string();
                term.push(ch);
                self.portfolio.set_search_text(&term, now);
                search.cursor = None;
            }
            _ => {}
        }

        Ok(Mode::Searching(search))
    }

    /// Move the grid cursor and request the next page when it gets close to
    /// the end of the window.
    fn move_grid(&mut self, movement: impl FnOnce(&mut GridView, usize), now: Instant) {
        let len = self.portfolio.window().len();
        movement(&mut self.grid, len);

        if len == 0 {
            return;
        }
        let remaining = len - 1 - self.grid.selected.min(len - 1);
        if remaining <= GRID_COLUMNS * SCROLL_AHEAD_ROWS {
            self.portfolio.request_more(now);
        }
    }

    fn clamp_grid(&mut self) {
        self.grid.ensure_in_bounds(self.portfolio.window().len());
    }

    fn current_card_id(&self) -> Option<i64> {
        self.portfolio
            .watch_at(self.grid.selected)
            .map(|watch| watch.id)
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let header_height = HEADER_HEIGHT.min(area.height);
        let footer_height = FOOTER_HEIGHT.min(area.height.saturating_sub(header_height));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height),
                Constraint::Min(0),
                Constraint::Length(footer_height),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_grid(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if self.portfolio.selected_watch().is_some() {
            self.draw_modal(frame, area);
        }
        if let Mode::Searching(search) = &self.mode {
            self.draw_search_overlay(frame, area, search);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let term = self.portfolio.search_term();
        let search_line = if term.is_empty() {
            Line::from(vec![
                Span::raw("Search: "),
                Span::styled(
                    "press / to search by name or description",
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        } else {
            Line::from(vec![
                Span::raw("Search: "),
                Span::styled(term.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            ])
        };

        let mut filter_spans = vec![filter_button(
            "a",
            "All",
            !WatchCategory::ALL
                .iter()
                .any(|&category| self.portfolio.is_category_active(category)),
        )];
        for (index, category) in WatchCategory::ALL.iter().enumerate() {
            filter_spans.push(Span::raw("  "));
            filter_spans.push(filter_button(
                &(index + 1).to_string(),
                category.label(),
                self.portfolio.is_category_active(*category),
            ));
        }
        filter_spans.push(Span::raw("  "));
        filter_spans.push(filter_button(
            "F",
            "Favorites",
            self.portfolio.favorites_only(),
        ));

        let shown = self.portfolio.window().len();
        let total = self.portfolio.visible_len();
        let mut summary = format!("{total} pieces · showing {shown}");
        if self.portfolio.is_loading_more() {
            summary.push_str(" · loading more…");
        } else if self.portfolio.has_more() {
            summary.push_str(" · scroll down for more");
        }

        let lines = vec![
            search_line,
            Line::from(filter_spans),
            Line::from(Span::styled(summary, Style::default().fg(Color::DarkGray))),
        ];

        let header = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Horologia Concepts "),
        );
        frame.render_widget(header, area);
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect) {
        let window_len = self.portfolio.window().len();
        if window_len == 0 {
            let message = Paragraph::new(EMPTY_RESULTS)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::NONE));
            frame.render_widget(message, area);
            return;
        }

        let rows_total = window_len.div_ceil(GRID_COLUMNS);
        let rows_on_screen = ((area.height / CARD_HEIGHT) as usize).max(1);
        let selected_row = self.grid.selected / GRID_COLUMNS;
        // Keep the cursor on screen; earlier rows scroll off the top.
        let scroll_row = selected_row.saturating_sub(rows_on_screen - 1);

        for row in 0..rows_on_screen.min(rows_total.saturating_sub(scroll_row)) {
            let y = area.y + (row as u16) * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
            if height < 3 {
                break;
            }
            let row_area = Rect::new(area.x, y, area.width, height);
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                .split(row_area);

            for (col, column_area) in columns.iter().enumerate() {
                let position = (scroll_row + row) * GRID_COLUMNS + col;
                if let Some(watch) = self.portfolio.watch_at(position) {
                    self.draw_card(frame, *column_area, position, watch);
                }
            }
        }
    }

    fn draw_card(&self, frame: &mut Frame, area: Rect, position: usize, watch: &WatchRecord) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(watch.category.label());
        if self.portfolio.is_favorite(watch.id) {
            block = block.title_bottom(Span::styled(" ♥ ", Style::default().fg(Color::Red)));
        }
        if position == self.grid.selected {
            block = block.style(Style::default().fg(Color::Yellow));
        }

        let inner_width = area.width.saturating_sub(2) as usize;
        let lines = vec![
            Line::from(Span::styled(
                truncate_line(&watch.name, inner_width),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::raw(watch.description.clone()),
        ];

        let card = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(card, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let line = match self.portfolio.notice() {
            Some(notice) => Line::from(Span::styled(
                notice.message.clone(),
                notice_style(notice.kind),
            )),
            None => {
                let hints = if self.portfolio.selected_watch().is_some() {
                    "s share · o open image · d details · f favorite · Esc close"
                } else {
                    "arrows move · Enter open · f favorite · F favorites · 1-3 category · a all · / search · q quit"
                };
                Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
            }
        };

        let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }

    fn draw_modal(&self, frame: &mut Frame, area: Rect) {
        let Some(watch) = self.portfolio.selected_watch() else {
            return;
        };

        let popup = centered_rect(72, 72, area);
        frame.render_widget(Clear, popup);

        let dim = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::from(Span::styled(watch.category.label(), dim)),
            Line::raw(""),
            Line::raw(watch.description.clone()),
            Line::raw(""),
            Line::raw(format!("Image: {}", watch.image_url)),
            Line::from(Span::styled(format!("Link:  {}", self.portfolio.fragment()), dim)),
        ];

        if self.details_expanded {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                "Technical details",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if let Some(material) = &watch.material {
                lines.push(Line::raw(format!("Material:   {material}")));
            }
            if let Some(dimensions) = &watch.dimensions {
                lines.push(Line::raw(format!("Dimensions: {dimensions}")));
            }
            if let Some(movement) = &watch.movement {
                lines.push(Line::raw(format!("Movement:   {movement}")));
            }
        } else if watch.has_details() {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("d expand technical details", dim)));
        }

        let modal = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", watch.name)),
            );
        frame.render_widget(modal, popup);
    }

    fn draw_search_overlay(&self, frame: &mut Frame, area: Rect, search: &SearchBox) {
        let suggestions = self.portfolio.suggestions();
        let width = area.width.saturating_sub(8).clamp(20, 64).min(area.width);
        let height = (3 + suggestions.len() as u16).min(area.height);
        let popup = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + HEADER_HEIGHT.min(area.height.saturating_sub(height)),
            width,
            height,
        );
        frame.render_widget(Clear, popup);

        let input_style = if search.cursor.is_none() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let mut lines = vec![Line::from(Span::styled(
            format!("{}▏", self.portfolio.search_term()),
            input_style,
        ))];
        for (index, name) in suggestions.iter().enumerate() {
            let style = if search.cursor == Some(index) {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(name.clone(), style)));
        }

        let overlay = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .title_bottom(" Enter apply · ↓ pick · Esc close "),
        );
        frame.render_widget(overlay, popup);
    }
}

/// Render one filter button, highlighted when active.
fn filter_button(key: &str, label: &str, active: bool) -> Span<'static> {
    let text = format!("[{key}] {label}");
    if active {
        Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(text)
    }
}
