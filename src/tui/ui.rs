//! Screen rendering. Reads the session [`Snapshot`] and TUI state,
//! mutates neither.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};

use crate::core::categories;
use crate::core::session::{PhaseTag, Snapshot};
use crate::trivia::types::Difficulty;
use crate::tui::{Focus, TuiState};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw_ui(frame: &mut Frame, snapshot: &Snapshot<'_>, tui: &TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, footer_area] = layout.areas(frame.area());

    draw_title_bar(frame, title_area, snapshot);
    match snapshot.tag {
        PhaseTag::Idle | PhaseTag::Selecting | PhaseTag::Complete => {
            draw_selection_view(frame, main_area, snapshot, tui);
        }
        PhaseTag::Loading => draw_loading_view(frame, main_area, spinner_frame),
        PhaseTag::Active => draw_question_view(frame, main_area, snapshot, tui),
    }
    draw_footer(frame, footer_area, snapshot);
}

fn draw_title_bar(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>) {
    let title = match snapshot.tag {
        PhaseTag::Active => format!("Happy Hour Trivia | Score: {}", snapshot.score),
        PhaseTag::Complete => format!(
            "Happy Hour Trivia | Final score: {}/{}",
            snapshot.score, snapshot.total_questions
        ),
        _ => "Happy Hour Trivia".to_string(),
    };
    frame.render_widget(
        Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD)),
        area,
    );
}

// ============================================================================
// Selection Screen
// ============================================================================

fn draw_selection_view(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>, tui: &TuiState) {
    use Constraint::{Length, Min, Percentage};

    let banner_height = if snapshot.tag == PhaseTag::Complete { 3 } else { 0 };
    let [banner_area, pickers_area, chosen_area, error_area] =
        Layout::vertical([Length(banner_height), Min(6), Length(1), Length(1)]).areas(area);

    if snapshot.tag == PhaseTag::Complete {
        draw_game_over_banner(frame, banner_area, snapshot);
    }

    let [difficulty_area, category_area] =
        Layout::horizontal([Percentage(35), Percentage(65)]).areas(pickers_area);

    let difficulty_items: Vec<String> =
        Difficulty::ALL.iter().map(|d| d.label().to_string()).collect();
    let chosen_difficulty = snapshot.selection.difficulty.map(|d| d.label());
    draw_picker(
        frame,
        difficulty_area,
        "Difficulty",
        &difficulty_items,
        chosen_difficulty,
        tui.difficulty_row,
        tui.focus == Focus::Difficulty,
    );

    let category_items: Vec<String> =
        categories::sorted_names().iter().map(|n| n.to_string()).collect();
    draw_picker(
        frame,
        category_area,
        "Category",
        &category_items,
        snapshot.selection.category.as_deref(),
        tui.category_row,
        tui.focus == Focus::Category,
    );

    let chosen = format!(
        "Chosen: {} / {}",
        snapshot
            .selection
            .difficulty
            .map(|d| d.label())
            .unwrap_or("-"),
        snapshot.selection.category.as_deref().unwrap_or("-"),
    );
    frame.render_widget(
        Paragraph::new(chosen).style(Style::default().add_modifier(Modifier::DIM)),
        chosen_area,
    );

    if let Some(error) = snapshot.error {
        frame.render_widget(
            Paragraph::new(error).style(Style::default().fg(Color::Red)),
            error_area,
        );
    }
}

fn draw_game_over_banner(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>) {
    let mut lines = vec![
        Line::from(format!(
            "Game over! Final score: {}/{}",
            snapshot.score, snapshot.total_questions
        ))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    ];
    if let Some(log) = snapshot.log {
        let glyphs: String = log
            .iter()
            .map(|r| if r.is_correct { '✓' } else { '✗' })
            .collect();
        lines.push(Line::from(glyphs).style(Style::default().add_modifier(Modifier::DIM)));
    }
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}

fn draw_picker(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[String],
    chosen: Option<&str>,
    row: usize,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            if Some(item.as_str()) == chosen {
                ListItem::new(format!("● {item}")).style(Style::default().fg(Color::Green))
            } else {
                ListItem::new(format!("  {item}"))
            }
        })
        .collect();
    let list = List::new(list_items)
        .block(Block::bordered().title(title).border_style(border_style))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(row));
    frame.render_stateful_widget(list, area, &mut state);
}

// ============================================================================
// Loading Screen
// ============================================================================

fn draw_loading_view(frame: &mut Frame, area: Rect, spinner_frame: usize) {
    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    let [_, center, _] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1), Constraint::Min(0)])
            .areas(area);
    frame.render_widget(
        Paragraph::new(format!("{spinner} Loading Questions..."))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center),
        center,
    );
}

// ============================================================================
// Question Screen
// ============================================================================

fn draw_question_view(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>, tui: &TuiState) {
    use Constraint::{Length, Min};
    let Some(question) = snapshot.question else {
        return;
    };

    let header = format!(
        "Question {} / {}",
        snapshot.question_number, snapshot.total_questions
    );
    let question_paragraph = Paragraph::new(question.text.as_str())
        .block(Block::bordered().title(header))
        .wrap(Wrap { trim: true });
    let text_height = question_paragraph.line_count(area.width.saturating_sub(2)) as u16 + 2;

    let [question_area, options_area, verdict_area] =
        Layout::vertical([Length(text_height), Min(4), Length(1)]).areas(area);
    frame.render_widget(question_paragraph, question_area);

    let list_items: Vec<ListItem> = question
        .options
        .iter()
        .map(|option| ListItem::new(option.as_str()).style(option_style(option, snapshot)))
        .collect();
    let list = List::new(list_items)
        .block(Block::bordered().title("Answers"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(tui.option_row));
    frame.render_stateful_widget(list, options_area, &mut state);

    if let Some(record) = snapshot.answered {
        let (verdict, color) = if record.is_correct {
            ("Correct!".to_string(), Color::Green)
        } else {
            (
                format!("Wrong. The answer was: {}", record.correct_answer),
                Color::Red,
            )
        };
        frame.render_widget(
            Paragraph::new(verdict)
                .style(Style::default().fg(color))
                .alignment(Alignment::Center),
            verdict_area,
        );
    }
}

/// Green for the correct answer and red for a wrong pick once the current
/// question has been answered; neutral before that.
fn option_style(option: &str, snapshot: &Snapshot<'_>) -> Style {
    let Some(record) = snapshot.answered else {
        return Style::default();
    };
    if option == record.correct_answer {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if option == record.given_answer {
        Style::default().fg(Color::Red)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    }
}

// ============================================================================
// Footer
// ============================================================================

fn draw_footer(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>) {
    let hints = match (snapshot.tag, snapshot.answered.is_some()) {
        (PhaseTag::Loading, _) => "q quit",
        (PhaseTag::Active, true) => "n next question · q quit",
        (PhaseTag::Active, false) => "↑/↓ move · Enter answer · q quit",
        _ => "↑/↓ move · Tab switch list · Enter choose · s start · q quit",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().add_modifier(Modifier::DIM)),
        area,
    );
}
