use crate::app::{AppState, InputFormState};
use crate::domain::MAX_TASK_MINUTES;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Label line plus `> value█` line for one form field
fn field_lines<'a>(form: &'a InputFormState, index: usize, label: &'a str, value: &'a str) -> [Line<'a>; 2] {
    let editing = form.editing_field == index && !form.estimating;
    let label = if editing {
        Line::raw(format!("{} (editing)", label))
    } else {
        Line::raw(label)
    };
    let value = Line::from(vec![
        Span::raw("> "),
        Span::styled(value, modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]);
    [label, value]
}

/// Render the add-task form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };

    let modal_area = create_modal_area(area, 18);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    lines.extend(field_lines(form, 0, "Title:", &form.title));
    lines.push(Line::raw(""));

    let [hours_label, hours_value] = field_lines(form, 1, "Hours:", &form.hours);
    let [minutes_label, minutes_value] = field_lines(form, 2, "Minutes:", &form.minutes);
    lines.extend([hours_label, hours_value, minutes_label, minutes_value]);
    lines.push(Line::styled(
        format!("Up to {}h per task", MAX_TASK_MINUTES / 60),
        hint_style(),
    ));
    lines.push(Line::raw(""));

    if form.estimating {
        lines.push(Line::styled("⏳ Estimating…", hint_style()));
    } else if let Some(fp) = &form.first_principles {
        lines.push(Line::styled(format!("💡 {}", fp), hint_style()));
        if let Some(steps) = &form.steps {
            lines.push(Line::styled(format!("{} steps suggested", steps.len()), hint_style()));
        }
    }

    if let Some(error) = &form.error {
        lines.push(Line::styled(error.as_str(), error_style()));
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw(
        "Tab to switch fields  ·  Ctrl+E to estimate  ·  Enter to submit  ·  Esc to cancel",
    ));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
