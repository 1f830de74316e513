//! The marketing site rendered as a scrollable terminal page.
//!
//! Page geometry is kept in virtual pixels (`LINE_HEIGHT_PX` per row) so
//! the scroll and visibility thresholds read the same as on the web page.

pub mod content;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::time::{Duration, Instant};

use crate::config::PageConfig;
use crate::enhance::animate::{CounterAnimation, Typewriter};
use crate::enhance::observer::{Bounds, ObserverOptions, VisibilityObserver};
use crate::enhance::portfolio::PortfolioFilter;
use crate::enhance::scroll::{anchor_scroll_target, ScrollEffects, ScrollThresholds};
use crate::enhance::timing::Throttle;
use crate::enhance::validate::{CharacterCounter, FieldKind, FieldStatus, FormState, SubmitOutcome};
use content::{BRAND, HERO_HEADLINE, HERO_TAGLINE, PORTFOLIO_FILTERS, SERVICES, STATS};

pub const LINE_HEIGHT_PX: u32 = 16;
const RESIZE_THROTTLE: Duration = Duration::from_millis(100);
const NAVBAR_BG: Color = Color::Rgb(30, 20, 50);
const STARFIELD: &str = "·  ✦   ·    *   ·  ✧    ·   *  ·     ✦  ·   *    ·  ✧  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    Services,
    Stats,
    Portfolio,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Hero,
        SectionId::Services,
        SectionId::Stats,
        SectionId::Portfolio,
        SectionId::Contact,
    ];

    pub fn nav_label(self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::Services => "Services",
            SectionId::Stats => "About",
            SectionId::Portfolio => "Portfolio",
            SectionId::Contact => "Contact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFocus {
    Browse,
    Search,
    Form(usize),
}

/// Rows of the laid-out page plus where the observed elements ended up
struct PageLayout {
    lines: Vec<Line<'static>>,
    sections: Vec<(SectionId, u32, u32)>,
    counters: Vec<(usize, u32)>,
    images: Vec<(usize, u32)>,
}

impl PageLayout {
    fn row(&self) -> u32 {
        self.lines.len() as u32
    }

    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }
}

fn px(row: u32) -> i64 {
    i64::from(row * LINE_HEIGHT_PX)
}

pub struct SitePage {
    config: PageConfig,
    scroll: ScrollEffects,
    scroll_row: u32,
    viewport_rows: u32,
    resize: Throttle,
    typewriter: Typewriter,
    counters: Vec<Option<CounterAnimation>>,
    counter_observer: VisibilityObserver<usize>,
    fade_observer: VisibilityObserver<SectionId>,
    revealed: Vec<SectionId>,
    image_observer: VisibilityObserver<usize>,
    images_loaded: Vec<bool>,
    portfolio: PortfolioFilter,
    filter_index: usize,
    search_text: String,
    form: FormState,
    message_counter: CharacterCounter,
    focus: PageFocus,
    status: Option<String>,
}

impl SitePage {
    pub fn new(config: &PageConfig, now: Instant) -> Self {
        let items = content::portfolio_items();
        let item_count = items.len();

        Self {
            config: config.clone(),
            scroll: ScrollEffects::new(ScrollThresholds::from(config)),
            scroll_row: 0,
            viewport_rows: 20,
            resize: Throttle::new(RESIZE_THROTTLE),
            typewriter: Typewriter::new(
                HERO_TAGLINE,
                Duration::from_millis(config.typing_speed_ms),
                Duration::from_millis(500),
                now,
            ),
            counters: vec![None; STATS.len()],
            counter_observer: VisibilityObserver::new(ObserverOptions::counters()),
            fade_observer: VisibilityObserver::new(ObserverOptions::fade_in()),
            revealed: vec![SectionId::Hero],
            image_observer: VisibilityObserver::new(ObserverOptions::lazy_images()),
            images_loaded: vec![false; item_count],
            portfolio: PortfolioFilter::with_debounce(
                items,
                Duration::from_millis(config.search_debounce_ms),
            ),
            filter_index: 0,
            search_text: String::new(),
            form: FormState::contact(),
            message_counter: CharacterCounter::default(),
            focus: PageFocus::Browse,
            status: None,
        }
    }

    pub fn focus(&self) -> PageFocus {
        self.focus
    }

    pub fn scroll_row(&self) -> u32 {
        self.scroll_row
    }

    pub fn is_revealed(&self, section: SectionId) -> bool {
        self.revealed.contains(&section)
    }

    pub fn image_loaded(&self, index: usize) -> bool {
        self.images_loaded.get(index).copied().unwrap_or(false)
    }

    pub fn counter_started(&self, index: usize) -> bool {
        self.counters.get(index).is_some_and(Option::is_some)
    }

    /// Terminal resized; layout-dependent state refreshes at most every 100ms
    pub fn resize(&mut self, rows: u16, now: Instant) {
        if self.resize.try_acquire(now) {
            self.viewport_rows = u32::from(rows.saturating_sub(1));
        }
    }

    fn scroll_to(&mut self, row: u32) {
        let max = self.layout(Instant::now()).row().saturating_sub(self.viewport_rows);
        self.scroll_row = row.min(max);
        self.scroll.on_scroll(self.scroll_row * LINE_HEIGHT_PX);
    }

    fn scroll_by(&mut self, delta: i64) {
        let row = (i64::from(self.scroll_row) + delta).max(0);
        self.scroll_to(u32::try_from(row).unwrap_or(u32::MAX));
    }

    /// Smooth-scroll to a section, leaving room for the navbar
    pub fn jump_to(&mut self, section: SectionId) {
        let layout = self.layout(Instant::now());
        if let Some(&(_, top, _)) = layout.sections.iter().find(|(id, _, _)| *id == section) {
            let target_px = anchor_scroll_target(top * LINE_HEIGHT_PX);
            self.scroll_to(target_px / LINE_HEIGHT_PX);
        }
    }

    /// Advance timers, apply the scroll frame and run the observers
    pub fn update(&mut self, now: Instant) {
        self.scroll.on_frame();
        self.portfolio.poll(now);
        if self.form.tick(now) {
            self.status = None;
        }

        let layout = self.layout(now);
        for &(id, top, height) in &layout.sections {
            if !self.revealed.contains(&id) {
                self.fade_observer.observe(id, Bounds::new(px(top), height * LINE_HEIGHT_PX));
            }
        }
        for &(index, row) in &layout.counters {
            if !self.counter_started(index) {
                self.counter_observer.observe(index, Bounds::new(px(row), LINE_HEIGHT_PX));
            }
        }
        for index in 0..self.images_loaded.len() {
            match layout.images.iter().find(|(i, _)| *i == index) {
                Some(&(_, row)) if !self.images_loaded[index] => {
                    self.image_observer.observe(index, Bounds::new(px(row), LINE_HEIGHT_PX));
                }
                // Filtered out of the grid; nothing to load
                _ => self.image_observer.unobserve(&index),
            }
        }

        let viewport = Bounds::new(px(self.scroll_row), self.viewport_rows * LINE_HEIGHT_PX);
        for id in self.fade_observer.check(viewport) {
            self.revealed.push(id);
        }
        for index in self.image_observer.check(viewport) {
            tracing::trace!(index, "portfolio image loaded");
            self.images_loaded[index] = true;
        }
        let duration = Duration::from_millis(self.config.counter_duration_ms);
        for index in self.counter_observer.check(viewport) {
            self.counters[index] = CounterAnimation::parse(STATS[index].1, duration, now);
        }
    }

    /// Returns false when the key was not for the page
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match self.focus {
            PageFocus::Browse => self.browse_key(key),
            PageFocus::Search => {
                self.search_key(key, now);
                true
            }
            PageFocus::Form(index) => {
                self.form_key(index, key, now);
                true
            }
        }
    }

    fn browse_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(i64::from(self.viewport_rows)),
            KeyCode::PageUp => self.scroll_by(-i64::from(self.viewport_rows)),
            KeyCode::Home => self.scroll_to(0),
            KeyCode::End => self.scroll_to(u32::MAX),
            KeyCode::Char('t') if self.scroll.state().back_to_top_visible => self.scroll_to(0),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.jump_to(SectionId::ALL[index]);
            }
            KeyCode::Char('f') => {
                self.filter_index = (self.filter_index + 1) % PORTFOLIO_FILTERS.len();
                self.portfolio.apply_filter(PORTFOLIO_FILTERS[self.filter_index].1);
            }
            KeyCode::Char('s') | KeyCode::Char('/') => {
                self.jump_to(SectionId::Portfolio);
                self.focus = PageFocus::Search;
            }
            KeyCode::Char('e') => {
                self.jump_to(SectionId::Contact);
                self.focus = PageFocus::Form(0);
            }
            _ => return false,
        }
        true
    }

    fn search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.focus = PageFocus::Browse,
            KeyCode::Backspace => {
                self.search_text.pop();
                self.portfolio.search_input(&self.search_text, now);
            }
            KeyCode::Char(c) => {
                self.search_text.push(c);
                self.portfolio.search_input(&self.search_text, now);
            }
            _ => {}
        }
    }

    fn form_key(&mut self, index: usize, key: KeyEvent, now: Instant) {
        let last = self.form.fields().len().saturating_sub(1);
        match key.code {
            KeyCode::Esc => {
                self.form.blur(index);
                self.focus = PageFocus::Browse;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.blur(index);
                self.focus = PageFocus::Form((index + 1).min(last));
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.blur(index);
                self.focus = PageFocus::Form(index.saturating_sub(1));
            }
            KeyCode::Enter
                if index == last && key.modifiers.contains(KeyModifiers::SHIFT) =>
            {
                let mut value = self.form.value(index).to_string();
                value.push('\n');
                self.form.set_value(index, &value);
            }
            KeyCode::Enter if index < last => {
                self.form.blur(index);
                self.focus = PageFocus::Form(index + 1);
            }
            KeyCode::Enter => self.submit(now),
            KeyCode::Backspace => {
                let mut value = self.form.value(index).to_string();
                value.pop();
                self.form.set_value(index, &value);
            }
            KeyCode::Char(c) => {
                let mut value = self.form.value(index).to_string();
                value.push(c);
                self.form.set_value(index, &value);
            }
            _ => {}
        }
    }

    fn submit(&mut self, now: Instant) {
        if self.form.submit_state().is_sending() {
            return;
        }
        match self.form.submit(now) {
            SubmitOutcome::Invalid(first) => {
                self.focus = PageFocus::Form(first);
                self.jump_to(SectionId::Contact);
            }
            SubmitOutcome::Accepted => {
                tracing::info!("contact form submitted");
                self.status = Some("Thanks! We'll get back to you soon.".to_string());
                self.focus = PageFocus::Browse;
            }
        }
    }

    fn tone(&self, section: SectionId, style: Style) -> Style {
        if self.is_revealed(section) {
            style
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn layout(&self, now: Instant) -> PageLayout {
        let mut layout = PageLayout {
            lines: Vec::new(),
            sections: Vec::new(),
            counters: Vec::new(),
            images: Vec::new(),
        };
        for section in SectionId::ALL {
            let top = layout.row();
            match section {
                SectionId::Hero => self.hero(&mut layout, now),
                SectionId::Services => self.services(&mut layout),
                SectionId::Stats => self.stats(&mut layout, now),
                SectionId::Portfolio => self.portfolio_section(&mut layout),
                SectionId::Contact => self.contact(&mut layout),
            }
            layout.push(Line::default());
            layout.sections.push((section, top, layout.row() - top));
        }
        layout.push(Line::from(Span::styled(
            format!("© {BRAND} Creative Studio  ·  Made with ♥ in India"),
            Style::default().fg(Color::DarkGray),
        )));
        layout
    }

    fn heading(&self, layout: &mut PageLayout, section: SectionId, title: &str) {
        let style = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
        layout.push(Line::from(Span::styled(title.to_string(), self.tone(section, style))));
        layout.push(Line::default());
    }

    fn hero(&self, layout: &mut PageLayout, now: Instant) {
        // Background drifts against the scroll direction
        let drift = (self.scroll.state().parallax_offset.unsigned_abs() / LINE_HEIGHT_PX) as usize;
        let stars: String = STARFIELD.chars().cycle().skip(drift).take(STARFIELD.chars().count()).collect();
        let star_style = Style::default().fg(Color::Blue);

        layout.push(Line::from(Span::styled(stars.clone(), star_style)));
        layout.push(Line::default());
        layout.push(Line::from(Span::styled(
            HERO_HEADLINE,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        let mut tagline = vec![Span::styled(
            self.typewriter.visible(now).to_string(),
            Style::default().fg(Color::Cyan),
        )];
        if !self.typewriter.is_complete(now) {
            tagline.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
        layout.push(Line::from(tagline));
        layout.push(Line::default());
        layout.push(Line::from(vec![
            Span::styled(" Get a Quote (e) ", Style::default().fg(Color::Black).bg(Color::Magenta)),
            Span::raw("  "),
            Span::styled(" View Portfolio (4) ", Style::default().fg(Color::Magenta)),
        ]));
        layout.push(Line::default());
        layout.push(Line::from(Span::styled(stars, star_style)));
    }

    fn services(&self, layout: &mut PageLayout) {
        self.heading(layout, SectionId::Services, "Our Services");
        for service in SERVICES {
            layout.push(Line::from(vec![
                Span::styled(
                    format!("  ◆ {:<24}", service.name),
                    self.tone(SectionId::Services, Style::default().fg(Color::White)),
                ),
                Span::styled(
                    format!("{:<48}", service.summary),
                    self.tone(SectionId::Services, Style::default().fg(Color::Gray)),
                ),
                Span::styled(
                    service.price_range,
                    self.tone(SectionId::Services, Style::default().fg(Color::Green)),
                ),
            ]));
        }
    }

    fn stats(&self, layout: &mut PageLayout, now: Instant) {
        self.heading(layout, SectionId::Stats, "Why OrbitX");
        let mut spans = Vec::new();
        for (index, (label, target)) in STATS.iter().enumerate() {
            let value = match &self.counters[index] {
                Some(counter) => counter.display(now),
                None => (*target).to_string(),
            };
            spans.push(Span::styled(
                format!("  {value:>8} "),
                self.tone(SectionId::Stats, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ));
            spans.push(Span::styled(
                label.to_string(),
                self.tone(SectionId::Stats, Style::default().fg(Color::Gray)),
            ));
        }
        let row = layout.row();
        layout.counters.extend((0..STATS.len()).map(|index| (index, row)));
        layout.push(Line::from(spans));
    }

    fn portfolio_section(&self, layout: &mut PageLayout) {
        self.heading(layout, SectionId::Portfolio, "Our Work");

        let mut filters = vec![Span::raw("  ")];
        for (index, (label, _)) in PORTFOLIO_FILTERS.iter().enumerate() {
            let style = if index == self.filter_index {
                Style::default().fg(Color::Black).bg(Color::Magenta)
            } else {
                Style::default().fg(Color::Gray)
            };
            filters.push(Span::styled(format!(" {label} "), style));
        }
        filters.push(Span::styled("   (f) filter", Style::default().fg(Color::DarkGray)));
        layout.push(Line::from(filters));

        let search_style = if self.focus == PageFocus::Search {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if self.focus == PageFocus::Search { "▌" } else { "" };
        layout.push(Line::from(Span::styled(
            format!("  🔍 Search (s): {}{cursor}", self.search_text),
            search_style,
        )));
        layout.push(Line::default());

        for (index, item) in self.portfolio.items().iter().enumerate() {
            if !self.portfolio.is_visible(index) {
                continue;
            }
            let thumb = if self.image_loaded(index) { "▣" } else { "░" };
            let row = layout.row();
            layout.images.push((index, row));
            layout.push(Line::from(vec![
                Span::styled(format!("  {thumb} "), Style::default().fg(Color::Magenta)),
                Span::styled(
                    item.title.clone(),
                    self.tone(SectionId::Portfolio, Style::default().fg(Color::White)),
                ),
                Span::styled(
                    format!("  {} · {}", item.client, item.category),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
        if self.portfolio.visible_items().next().is_none() {
            layout.push(Line::from(Span::styled(
                "  No projects match your search.",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    fn contact(&self, layout: &mut PageLayout) {
        self.heading(layout, SectionId::Contact, "Get in Touch");

        for (index, field) in self.form.fields().iter().enumerate() {
            let focused = self.focus == PageFocus::Form(index);
            let marker = if focused { "›" } else { " " };
            let required = if field.required { "*" } else { "" };
            let value = self.form.value(index).replace('\n', " ⏎ ");
            let cursor = if focused { "▌" } else { "" };

            let (status, status_style) = match self.form.status(index) {
                FieldStatus::Valid => ("✓".to_string(), Style::default().fg(Color::Green)),
                FieldStatus::Invalid(message) => (format!("✗ {message}"), Style::default().fg(Color::Red)),
                FieldStatus::Untouched => (String::new(), Style::default()),
            };

            layout.push(Line::from(vec![
                Span::styled(
                    format!("{marker} {:<9}", format!("{}{required}", field.label)),
                    Style::default().fg(if focused { Color::Cyan } else { Color::Gray }),
                ),
                Span::styled(format!("{value}{cursor}  "), Style::default().fg(Color::White)),
                Span::styled(status, status_style),
            ]));

            if field.kind == FieldKind::TextArea {
                let text = self.form.value(index);
                let counter_style = if self.message_counter.is_warning(text) {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                layout.push(Line::from(Span::styled(
                    format!("             {}", self.message_counter.label(text)),
                    counter_style,
                )));
            }
        }

        layout.push(Line::default());
        let button = self.form.submit_state().label("Send Message");
        layout.push(Line::from(vec![
            Span::styled(
                format!(" {button} "),
                Style::default().fg(Color::Black).bg(Color::Magenta),
            ),
            Span::styled("  (Enter on the last field)", Style::default().fg(Color::DarkGray)),
        ]));
        if let Some(status) = &self.status {
            layout.push(Line::from(Span::styled(
                format!("  {status}"),
                Style::default().fg(Color::Green),
            )));
        }
    }

    fn navbar(&self) -> Line<'static> {
        let scrolled = self.scroll.state().navbar_scrolled;
        let base = if scrolled {
            Style::default().bg(NAVBAR_BG)
        } else {
            Style::default()
        };

        let mut spans = vec![Span::styled(
            format!(" ✦ {BRAND} "),
            base.fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )];
        for (index, section) in SectionId::ALL.iter().enumerate() {
            spans.push(Span::styled(
                format!(" {}:{} ", index + 1, section.nav_label()),
                base.fg(Color::Gray),
            ));
        }
        if self.scroll.state().back_to_top_visible {
            spans.push(Span::styled(" ↑ top (t) ", base.fg(Color::Yellow)));
        }
        Line::from(spans)
    }
}

impl Widget for &SitePage {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        if self.scroll.state().navbar_scrolled {
            buf.set_style(Rect::new(area.x, area.y, area.width, 1), Style::default().bg(NAVBAR_BG));
        }
        buf.set_line(area.x, area.y, &self.navbar(), area.width);

        let body = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        let layout = self.layout(Instant::now());
        let offset = u16::try_from(self.scroll_row).unwrap_or(u16::MAX);
        Paragraph::new(layout.lines).scroll((offset, 0)).render(body, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn page() -> (SitePage, Instant) {
        let now = Instant::now();
        let mut page = SitePage::new(&PageConfig::default(), now);
        page.viewport_rows = 20;
        (page, now)
    }

    #[test]
    fn hero_is_revealed_and_lower_sections_wait() {
        let (mut page, now) = page();
        page.update(now);
        assert!(page.is_revealed(SectionId::Hero));
        assert!(page.is_revealed(SectionId::Services));
        assert!(!page.is_revealed(SectionId::Contact));
        assert!(!page.counter_started(0));
    }

    #[test]
    fn jumping_to_a_section_triggers_its_observers() {
        let (mut page, now) = page();
        page.update(now);

        page.jump_to(SectionId::Stats);
        page.update(now);
        assert!(page.is_revealed(SectionId::Stats));
        assert!(page.counter_started(0));

        page.jump_to(SectionId::Portfolio);
        page.update(now);
        assert!(page.image_loaded(0));
    }

    #[test]
    fn anchor_jump_leaves_room_for_the_navbar() {
        let (mut page, now) = page();
        let layout = page.layout(now);
        let (_, top, _) = layout.sections[1];
        page.jump_to(SectionId::Services);
        assert_eq!(page.scroll_row(), top.saturating_sub(5));
    }

    #[test]
    fn filter_key_cycles_portfolio_filters() {
        let (mut page, now) = page();
        assert!(page.handle_key(key(KeyCode::Char('f')), now));
        assert_eq!(page.portfolio.active_filter(), ".logo-design");
        assert_eq!(page.portfolio.visible_items().count(), 2);
    }

    #[test]
    fn search_applies_after_debounce() {
        let (mut page, now) = page();
        page.handle_key(key(KeyCode::Char('s')), now);
        assert_eq!(page.focus(), PageFocus::Search);
        for c in "bakery".chars() {
            page.handle_key(key(KeyCode::Char(c)), now);
        }
        page.update(now + Duration::from_millis(100));
        assert_eq!(page.portfolio.visible_items().count(), 7);

        page.update(now + Duration::from_millis(300));
        let titles: Vec<_> = page.portfolio.visible_items().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["CakeVilla Bakery Promotion"]);
    }

    #[test]
    fn invalid_submit_focuses_first_bad_field() {
        let (mut page, now) = page();
        page.handle_key(key(KeyCode::Char('e')), now);
        assert_eq!(page.focus(), PageFocus::Form(0));
        for c in "Asha".chars() {
            page.handle_key(key(KeyCode::Char(c)), now);
        }
        for _ in 0..4 {
            page.handle_key(key(KeyCode::Tab), now);
        }
        page.handle_key(key(KeyCode::Enter), now);
        assert_eq!(page.focus(), PageFocus::Form(1));
        assert_eq!(
            page.form.status(1).error(),
            Some("This field is required")
        );
    }

    #[test]
    fn navbar_follows_scroll_frames() {
        let (mut page, now) = page();
        page.scroll_by(4);
        assert!(!page.scroll.state().navbar_scrolled);
        page.update(now);
        assert!(page.scroll.state().navbar_scrolled);
        assert!(!page.scroll.state().back_to_top_visible);
    }
}
