pub mod keymap;

mod terminal;
mod theme;

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};

use api_types::expense::Expense;
use engine::Money;

use crate::app::{AppState, FormField, ListStatus, Modal};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Add-expense form
            Constraint::Min(0),    // Expenses table
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_form(frame, layout[0], state, &theme);
    render_table(frame, layout[1], state, &theme);
    render_bottom_bar(frame, layout[2], &theme);
    render_modal(frame, area, state, &theme);
}

/// Display form for dates: day/month/year.
pub fn fmt_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn amount_cell(expense: &Expense) -> String {
    Money::from_decimal(expense.amount)
        .unwrap_or(Money::ZERO)
        .to_string()
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let field_line = |label: &str, value: &str, field: FormField| {
        let style = if state.form.focus == field {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        Line::from(vec![
            Span::styled(format!("{label:<12}"), style),
            Span::raw(value.to_string()),
            if state.form.focus == field {
                Span::styled("_", Style::default().fg(theme.accent))
            } else {
                Span::raw("")
            },
        ])
    };

    let lines = vec![
        field_line("Amount", &state.form.amount, FormField::Amount),
        field_line("Category", &state.form.category, FormField::Category),
        field_line("Date", &state.form.date, FormField::Date),
        field_line("Description", &state.form.description, FormField::Description),
    ];

    let block = Block::default().borders(Borders::ALL).title("Add Expense");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let header = Row::new(vec!["Date", "Category", "Description", "Amount"]).style(
        Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD),
    );

    let mut rows: Vec<Row<'_>> = Vec::new();
    match state.list.status {
        ListStatus::Error => {
            rows.push(
                Row::new(vec![Cell::from("Error loading expenses")])
                    .style(Style::default().fg(theme.error)),
            );
        }
        ListStatus::Empty => {
            rows.push(
                Row::new(vec![Cell::from("No expenses found")])
                    .style(Style::default().fg(theme.dim)),
            );
            rows.push(total_row(state.list.total, theme));
        }
        ListStatus::Loaded => {
            for expense in &state.list.expenses {
                rows.push(Row::new(vec![
                    Cell::from(fmt_date(expense.date)),
                    Cell::from(expense.category.clone()),
                    Cell::from(
                        expense
                            .description
                            .clone()
                            .filter(|description| !description.is_empty())
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    Cell::from(amount_cell(expense)),
                ]));
            }
            rows.push(total_row(state.list.total, theme));
        }
    }

    let widths = [
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Min(12),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Expenses"))
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    if state.list.status == ListStatus::Loaded && !state.list.expenses.is_empty() {
        table_state.select(Some(state.selected));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}

fn total_row(total: Money, theme: &Theme) -> Row<'static> {
    Row::new(vec![
        Cell::from("Total"),
        Cell::from(""),
        Cell::from(""),
        Cell::from(total.to_string()),
    ])
    .style(
        Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(key, Style::default().fg(theme.accent)),
            Span::raw(label),
        ]
    };

    let mut parts = Vec::new();
    parts.extend(hint("Tab", " next field  "));
    parts.extend(hint("Enter", " add  "));
    parts.extend(hint("↑/↓", " select  "));
    parts.extend(hint("Del", " delete  "));
    parts.extend(hint("Ctrl+R", " refresh  "));
    parts.extend(hint("Esc", " quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn render_modal(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(modal) = &state.modal else {
        return;
    };

    let (message, hint, color) = match modal {
        Modal::ConfirmDelete { .. } => (
            "Are you sure you want to delete this expense?".to_string(),
            "y confirm  n cancel",
            theme.accent,
        ),
        Modal::Alert { message } => (message.clone(), "Enter dismiss", theme.error),
    };

    let width = (message.len().max(hint.len()) as u16 + 4).min(area.width);
    let height = 4u16.min(area.height);
    let rect = centered_rect(area, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let lines = vec![
        Line::from(message),
        Line::from(Span::styled(hint, Style::default().fg(theme.dim))),
    ];

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
