use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use merger_analysis::{analyze_merger, report::stake_bar, MergerInputs, MergerReport};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Inputs,
    Results,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Inputs => Page::Results,
            Page::Results => Page::Inputs,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Inputs => "Inputs",
            Page::Results => "Results",
        }
    }
}

// ============================================================================
// FORM FIELDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    EarningsA,
    SharesA,
    SharePriceA,
    TotalDebtA,
    TotalEquityA,
    EarningsB,
    SharesB,
    SharePriceB,
    TotalDebtB,
    TotalEquityB,
    PurchasePriceB,
}

impl InputField {
    pub const ALL: [InputField; 11] = [
        InputField::EarningsA,
        InputField::SharesA,
        InputField::SharePriceA,
        InputField::TotalDebtA,
        InputField::TotalEquityA,
        InputField::EarningsB,
        InputField::SharesB,
        InputField::SharePriceB,
        InputField::TotalDebtB,
        InputField::TotalEquityB,
        InputField::PurchasePriceB,
    ];

    pub fn section(&self) -> &'static str {
        match self {
            InputField::EarningsA
            | InputField::SharesA
            | InputField::SharePriceA
            | InputField::TotalDebtA
            | InputField::TotalEquityA => "Company A",
            InputField::EarningsB
            | InputField::SharesB
            | InputField::SharePriceB
            | InputField::TotalDebtB
            | InputField::TotalEquityB => "Company B",
            InputField::PurchasePriceB => "Acquisition",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputField::EarningsA | InputField::EarningsB => "Earnings",
            InputField::SharesA | InputField::SharesB => "Number of shares",
            InputField::SharePriceA | InputField::SharePriceB => "Price per share",
            InputField::TotalDebtA | InputField::TotalDebtB => "Total Debt",
            InputField::TotalEquityA | InputField::TotalEquityB => "Total Equity",
            InputField::PurchasePriceB => "Purchase Price for Company B",
        }
    }

    fn slot<'a>(&self, inputs: &'a mut MergerInputs) -> &'a mut f64 {
        match self {
            InputField::EarningsA => &mut inputs.company_a.earnings,
            InputField::SharesA => &mut inputs.company_a.shares_outstanding,
            InputField::SharePriceA => &mut inputs.company_a.share_price,
            InputField::TotalDebtA => &mut inputs.company_a.total_debt,
            InputField::TotalEquityA => &mut inputs.company_a.total_equity,
            InputField::EarningsB => &mut inputs.company_b.earnings,
            InputField::SharesB => &mut inputs.company_b.shares_outstanding,
            InputField::SharePriceB => &mut inputs.company_b.share_price,
            InputField::TotalDebtB => &mut inputs.company_b.total_debt,
            InputField::TotalEquityB => &mut inputs.company_b.total_equity,
            InputField::PurchasePriceB => &mut inputs.purchase_price_b,
        }
    }

    pub fn get(&self, inputs: &MergerInputs) -> f64 {
        let mut copy = *inputs;
        *self.slot(&mut copy)
    }

    pub fn set(&self, inputs: &mut MergerInputs, value: f64) {
        *self.slot(inputs) = value;
    }
}

/// Accepts "5000000", "5,000,000" and "5_000_000"
fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub inputs: MergerInputs,
    pub buffers: Vec<String>,
    pub form_state: TableState,
    pub editing: bool,
    pub current_page: Page,
    pub report: Option<MergerReport>,
    pub status: Option<String>,
}

impl App {
    pub fn new(inputs: MergerInputs) -> Self {
        let mut form_state = TableState::default();
        form_state.select(Some(0));

        Self {
            buffers: InputField::ALL.iter().map(|f| f.get(&inputs).to_string()).collect(),
            inputs,
            form_state,
            editing: false,
            current_page: Page::Inputs,
            report: None,
            status: None,
        }
    }

    pub fn selected_field(&self) -> InputField {
        InputField::ALL[self.form_state.selected().unwrap_or(0)]
    }

    pub fn next(&mut self) {
        let i = self.form_state.selected().unwrap_or(0);
        let next = if i + 1 >= InputField::ALL.len() { 0 } else { i + 1 };
        self.form_state.select(Some(next));
    }

    pub fn previous(&mut self) {
        let i = self.form_state.selected().unwrap_or(0);
        let prev = if i == 0 { InputField::ALL.len() - 1 } else { i - 1 };
        self.form_state.select(Some(prev));
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
        self.status = None;
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_digit() || matches!(c, '.' | '-' | ',' | '_' | 'e' | 'E') {
            let i = self.form_state.selected().unwrap_or(0);
            self.buffers[i].push(c);
        }
    }

    pub fn backspace(&mut self) {
        let i = self.form_state.selected().unwrap_or(0);
        self.buffers[i].pop();
    }

    /// Commit the edited buffer into the inputs; keeps editing on bad text.
    pub fn commit_edit(&mut self) {
        let i = self.form_state.selected().unwrap_or(0);
        let field = InputField::ALL[i];

        match parse_amount(&self.buffers[i]) {
            Some(value) => {
                field.set(&mut self.inputs, value);
                self.editing = false;
                self.status = None;
            }
            None => {
                self.status = Some(format!("{} ({}): not a number", field.label(), field.section()));
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        let i = self.form_state.selected().unwrap_or(0);
        self.buffers[i] = InputField::ALL[i].get(&self.inputs).to_string();
        self.editing = false;
        self.status = None;
    }

    pub fn reset(&mut self) {
        *self = App::new(MergerInputs::default());
    }

    pub fn analyze(&mut self) {
        match analyze_merger(&self.inputs) {
            Ok(result) => {
                self.report = Some(MergerReport::from_result(&result));
                self.status = None;
                self.current_page = Page::Results;
            }
            Err(e) => {
                self.report = None;
                self.status = Some(format!("Analysis failed: {}", e));
            }
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        if app.editing {
            match key.code {
                KeyCode::Enter => app.commit_edit(),
                KeyCode::Esc => app.cancel_edit(),
                KeyCode::Backspace => app.backspace(),
                KeyCode::Char(c) => app.push_char(c),
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            KeyCode::Tab | KeyCode::BackTab => app.next_page(),
            KeyCode::Char('a') => app.analyze(),
            KeyCode::Char('r') => app.reset(),
            KeyCode::Enter if app.current_page == Page::Inputs => app.start_editing(),
            KeyCode::Down | KeyCode::Char('j') if app.current_page == Page::Inputs => app.next(),
            KeyCode::Up | KeyCode::Char('k') if app.current_page == Page::Inputs => app.previous(),
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Inputs => render_form(f, chunks[1], app),
        Page::Results => render_results(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        " Merger Analysis Tool ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for page in [Page::Inputs, Page::Results] {
        tab_spans.push(Span::raw(" │ "));
        let style = if page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    if let Some(report) = &app.report {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            report.commentary.merger_type.clone(),
            Style::default().fg(Color::Green),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Section", "Field", "Value"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let selected = app.form_state.selected().unwrap_or(0);
    let rows = InputField::ALL.iter().enumerate().map(|(i, field)| {
        let value = if app.editing && i == selected {
            Cell::from(format!("{}▏", app.buffers[i]))
                .style(Style::default().fg(Color::Black).bg(Color::Yellow))
        } else {
            Cell::from(app.buffers[i].clone())
        };

        let section_color = match field.section() {
            "Company A" => Color::Cyan,
            "Company B" => Color::Magenta,
            _ => Color::Green,
        };

        Row::new(vec![
            Cell::from(field.section()).style(Style::default().fg(section_color)),
            Cell::from(field.label()),
            value,
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [Constraint::Length(14), Constraint::Length(32), Constraint::Min(16)],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Company A / Company B Input "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.form_state);
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let report = match &app.report {
        Some(r) => r,
        None => {
            let empty = Paragraph::new("  No analysis yet. Press 'a' to analyze the merger.").block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Merger Analysis Results "),
            );
            f.render_widget(empty, area);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Comparison table
            Constraint::Length(3), // Post-merger metrics
            Constraint::Min(0),    // Commentary + stake chart
        ])
        .split(area);

    render_comparison(f, chunks[0], report);
    render_metrics(f, chunks[1], report);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    render_commentary(f, bottom[0], report);
    render_stake_chart(f, bottom[1], report);
}

fn render_comparison(f: &mut Frame, area: Rect, report: &MergerReport) {
    let header_cells = ["Metrics", "Company A", "Company B"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = report.comparison.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.metric.clone()),
            Cell::from(format!("{:.4}", row.company_a)).style(Style::default().fg(Color::Cyan)),
            Cell::from(format!("{:.4}", row.company_b)).style(Style::default().fg(Color::Magenta)),
        ])
    });

    let table = Table::new(
        rows,
        [Constraint::Length(26), Constraint::Length(18), Constraint::Length(18)],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Merger Analysis Results "),
    );

    f.render_widget(table, area);
}

fn render_metrics(f: &mut Frame, area: Rect, report: &MergerReport) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (metric, column) in report.post_merger.iter().zip(columns.iter()) {
        let value = Paragraph::new(Line::from(Span::styled(
            metric.formatted.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", metric.label)),
        );
        f.render_widget(value, *column);
    }
}

fn render_commentary(f: &mut Frame, area: Rect, report: &MergerReport) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ))
    };

    let content = vec![
        heading("Merger Type"),
        Line::from(format!("  {}", report.commentary.merger_type)),
        Line::from(""),
        heading("Stake Comment"),
        Line::from(format!("  {}", report.commentary.stake_comment)),
        Line::from(""),
        heading("D/E Ratio Comment"),
        Line::from(format!("  {}", report.commentary.de_comment)),
    ];

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Commentary "),
        );

    f.render_widget(paragraph, area);
}

fn render_stake_chart(f: &mut Frame, area: Rect, report: &MergerReport) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(4)])
        .split(area);

    let data: Vec<(&str, u64)> = report
        .stakes
        .iter()
        .map(|slice| (slice.label.as_str(), slice.percent.clamp(0.0, 100.0).round() as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Ownership Stake Post-Merger (%) "),
        )
        .data(data.as_slice())
        .max(100)
        .bar_width(11)
        .bar_gap(3)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    f.render_widget(chart, chunks[0]);

    let width = chunks[1].width.saturating_sub(16) as usize;
    let lines: Vec<Line> = report
        .stakes
        .iter()
        .map(|slice| {
            Line::from(vec![
                Span::raw(format!(" {:<10}", slice.label)),
                Span::styled(stake_bar(slice.percent, width), Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    let bars = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(bars, chunks[1]);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let Some(status) = &app.status {
        status_spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        status_spans.push(Span::raw(" | "));
    }

    let hints: &[(&str, &str)] = if app.editing {
        &[("Enter", " Save | "), ("Esc", " Cancel")]
    } else {
        &[
            ("↑/↓", " Field | "),
            ("Enter", " Edit | "),
            ("a", " Analyze | "),
            ("r", " Reset | "),
            ("Tab", " Page | "),
            ("q", " Quit"),
        ]
    };

    for (key, text) in hints {
        status_spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(*text));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use merger_analysis::MergerType;

    #[test]
    fn test_form_starts_with_defaults() {
        let app = App::new(MergerInputs::default());
        assert_eq!(app.buffers.len(), 11);
        assert_eq!(app.buffers[0], "5000000");
        assert_eq!(app.buffers[2], "10");
        assert_eq!(app.buffers[10], "10000000");
        assert_eq!(app.selected_field(), InputField::EarningsA);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = App::new(MergerInputs::default());
        app.previous();
        assert_eq!(app.selected_field(), InputField::PurchasePriceB);
        app.next();
        assert_eq!(app.selected_field(), InputField::EarningsA);
    }

    #[test]
    fn test_edit_and_commit() {
        let mut app = App::new(MergerInputs::default());
        app.next(); // SharesA
        app.start_editing();
        for _ in 0..7 {
            app.backspace();
        }
        for c in "2,000,000".chars() {
            app.push_char(c);
        }
        app.push_char('x'); // ignored
        app.commit_edit();

        assert!(!app.editing);
        assert_eq!(app.inputs.company_a.shares_outstanding, 2_000_000.0);
    }

    #[test]
    fn test_bad_text_keeps_editing() {
        let mut app = App::new(MergerInputs::default());
        app.start_editing();
        app.buffers[0] = "-".to_string();
        app.commit_edit();

        assert!(app.editing);
        assert!(app.status.is_some());
        assert_eq!(app.inputs.company_a.earnings, 5_000_000.0);

        app.cancel_edit();
        assert!(!app.editing);
        assert_eq!(app.buffers[0], "5000000");
    }

    #[test]
    fn test_analyze_switches_to_results() {
        let mut app = App::new(MergerInputs::default());
        app.analyze();

        assert_eq!(app.current_page, Page::Results);
        let report = app.report.as_ref().unwrap();
        assert_eq!(report.result.merger_type, MergerType::MergerOfEquals);
        assert_eq!(report.post_merger[0].formatted, "3.5000");
    }

    #[test]
    fn test_division_by_zero_shown_in_status() {
        let mut inputs = MergerInputs::default();
        inputs.company_a.shares_outstanding = 0.0;
        let mut app = App::new(inputs);
        app.analyze();

        assert_eq!(app.current_page, Page::Inputs);
        assert!(app.report.is_none());
        assert!(app.status.as_ref().unwrap().contains("division by zero"));
    }

    #[test]
    fn test_field_get_set() {
        let mut inputs = MergerInputs::default();
        InputField::PurchasePriceB.set(&mut inputs, 1.5);
        assert_eq!(InputField::PurchasePriceB.get(&inputs), 1.5);
        assert_eq!(InputField::TotalEquityB.get(&inputs), 4_000_000.0);
        assert_eq!(InputField::SharePriceB.section(), "Company B");
    }
}
