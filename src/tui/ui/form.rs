//! Patient clinical data form.
//!
//! Eleven widgets grouped the way clinicians read a chart: demographics,
//! vitals, then ECG metrics. Widgets keep their values in range themselves,
//! so the form always yields a valid [`ClinicalObservation`].

use std::ops::RangeInclusive;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{
    Category, ChestPainType, ClinicalObservation, ExerciseAngina, RestingEcg, Sex, StSlope,
    AGE_RANGE, CHOLESTEROL_RANGE, MAX_HR_RANGE, OLDPEAK_RANGE, RESTING_BP_RANGE,
};
use crate::tui::styles::MedicalTheme;

/// Oldpeak is edited in tenths.
const OLDPEAK_TICKS_PER_UNIT: f64 = 10.0;

/// Form fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Age,
    Sex,
    ChestPainType,
    ExerciseAngina,
    RestingBp,
    Cholesterol,
    FastingBs,
    RestingEcg,
    MaxHr,
    Oldpeak,
    StSlope,
}

impl FieldId {
    pub const ALL: [FieldId; 11] = [
        FieldId::Age,
        FieldId::Sex,
        FieldId::ChestPainType,
        FieldId::ExerciseAngina,
        FieldId::RestingBp,
        FieldId::Cholesterol,
        FieldId::FastingBs,
        FieldId::RestingEcg,
        FieldId::MaxHr,
        FieldId::Oldpeak,
        FieldId::StSlope,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Biological Sex",
            Self::ChestPainType => "Chest Pain Type",
            Self::ExerciseAngina => "Exercise-Induced Angina",
            Self::RestingBp => "Resting Blood Pressure (mm Hg)",
            Self::Cholesterol => "Cholesterol (mg/dL)",
            Self::FastingBs => "Fasting Blood Sugar > 120 mg/dL",
            Self::RestingEcg => "Resting ECG Results",
            Self::MaxHr => "Max Heart Rate Achieved",
            Self::Oldpeak => "Oldpeak (ST Depression)",
            Self::StSlope => "ST Slope",
        }
    }

    /// Short explanation shown while the field has focus.
    #[must_use]
    pub fn help(self) -> &'static str {
        match self {
            Self::Age => "Patient's age in years.",
            Self::Sex => "M = Male, F = Female",
            Self::ChestPainType => {
                "ATA: Atypical Angina (Unrelated to heart) | NAP: Non-Anginal Pain | \
                 TA: Typical Angina (Classic heart pain) | ASY: Asymptomatic (No pain)"
            }
            Self::ExerciseAngina => {
                "Does the patient experience chest pain specifically during physical exertion? (Y=Yes, N=No)"
            }
            Self::RestingBp => "Standard blood pressure reading while the patient is at rest.",
            Self::Cholesterol => "Serum cholesterol level. Higher levels can indicate risk.",
            Self::FastingBs => {
                "Is blood sugar higher than 120 mg/dL after fasting? (Indicative of diabetes risk)"
            }
            Self::RestingEcg => {
                "Normal: Normal reading | ST: ST-T wave abnormality | \
                 LVH: Left Ventricular Hypertrophy (Thickening of heart wall)"
            }
            Self::MaxHr => "The highest heart rate reached during an exercise test.",
            Self::Oldpeak => {
                "A numeric value measured from ECG indicating heart stress during exercise."
            }
            Self::StSlope => "The direction of the slope on the ECG chart during peak exercise.",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Integer slider; `decimals` shifts the displayed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slider {
    value: i64,
    min: i64,
    max: i64,
    decimals: u32,
}

impl Slider {
    fn new(range: RangeInclusive<u32>, default: u32) -> Self {
        Self {
            value: i64::from(default),
            min: i64::from(*range.start()),
            max: i64::from(*range.end()),
            decimals: 0,
        }
    }

    fn tenths(range: RangeInclusive<f64>, default: f64) -> Self {
        let ticks = |v: f64| (v * OLDPEAK_TICKS_PER_UNIT).round() as i64;
        Self {
            value: ticks(default),
            min: ticks(*range.start()),
            max: ticks(*range.end()),
            decimals: 1,
        }
    }

    fn step(&mut self, delta: i64) {
        self.value = (self.value + delta).clamp(self.min, self.max);
    }

    fn as_f64(&self) -> f64 {
        self.value as f64 / 10f64.powi(self.decimals as i32)
    }

    fn as_u32(&self) -> u32 {
        u32::try_from(self.value).unwrap_or(0)
    }

    fn ratio(&self) -> f64 {
        if self.max == self.min {
            return 0.0;
        }
        (self.value - self.min) as f64 / (self.max - self.min) as f64
    }

    fn display(&self) -> String {
        format!("{:.*}", self.decimals as usize, self.as_f64())
    }
}

/// Typed number input; edits are clamped when committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberInput {
    value: u32,
    min: u32,
    max: u32,
    buffer: Option<String>,
}

impl NumberInput {
    fn new(range: RangeInclusive<u32>, default: u32) -> Self {
        Self {
            value: default,
            min: *range.start(),
            max: *range.end(),
            buffer: None,
        }
    }

    fn max_digits(&self) -> usize {
        self.max.to_string().len()
    }

    fn push_digit(&mut self, c: char) {
        let max_digits = self.max_digits();
        let buffer = self.buffer.get_or_insert_with(String::new);
        if buffer.len() < max_digits {
            buffer.push(c);
        }
    }

    fn delete_char(&mut self) {
        let value = self.value;
        self.buffer
            .get_or_insert_with(|| value.to_string())
            .pop();
    }

    /// Apply the pending edit. Empty or unparsable text keeps the old value.
    fn commit(&mut self) {
        if let Some(mut buffer) = self.buffer.take() {
            if let Ok(parsed) = buffer.parse::<u32>() {
                self.value = parsed.clamp(self.min, self.max);
            }
            buffer.zeroize();
        }
    }

    fn step(&mut self, delta: i64) {
        self.commit();
        let next = (i64::from(self.value) + delta).clamp(i64::from(self.min), i64::from(self.max));
        self.value = u32::try_from(next).unwrap_or(self.min);
    }

    fn is_editing(&self) -> bool {
        self.buffer.is_some()
    }

    fn display(&self) -> String {
        match &self.buffer {
            Some(buffer) => buffer.clone(),
            None => self.value.to_string(),
        }
    }

    fn wipe(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.zeroize();
        }
        self.buffer = None;
    }
}

/// Fixed-option select box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    options: Vec<&'static str>,
    index: usize,
}

impl Select {
    fn of<T: Category>(default: T) -> Self {
        Self {
            options: T::ALL.iter().map(|c| c.code()).collect(),
            index: T::ALL.iter().position(|c| *c == default).unwrap_or(0),
        }
    }

    fn from_options(options: &[&'static str], index: usize) -> Self {
        Self {
            options: options.to_vec(),
            index,
        }
    }

    fn cycle(&mut self, delta: i64) {
        let len = self.options.len() as i64;
        self.index = (self.index as i64 + delta).rem_euclid(len) as usize;
    }

    fn get<T: Category>(&self) -> T {
        T::ALL[self.index]
    }

    fn display(&self) -> &'static str {
        self.options[self.index]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Slider(Slider),
    Number(NumberInput),
    Select(Select),
}

/// Form state: one widget per field plus the focus cursor.
///
/// Focus index `FieldId::ALL.len()` is the submit button.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    widgets: Vec<Widget>,
    focus: usize,
}

impl Default for FormState {
    fn default() -> Self {
        let defaults = ClinicalObservation::default();
        let widgets = FieldId::ALL
            .iter()
            .map(|id| match id {
                FieldId::Age => Widget::Slider(Slider::new(AGE_RANGE, defaults.age)),
                FieldId::Sex => Widget::Select(Select::of(defaults.sex)),
                FieldId::ChestPainType => Widget::Select(Select::of(defaults.chest_pain_type)),
                FieldId::ExerciseAngina => Widget::Select(Select::of(defaults.exercise_angina)),
                FieldId::RestingBp => {
                    Widget::Number(NumberInput::new(RESTING_BP_RANGE, defaults.resting_bp))
                }
                FieldId::Cholesterol => {
                    Widget::Number(NumberInput::new(CHOLESTEROL_RANGE, defaults.cholesterol))
                }
                FieldId::FastingBs => Widget::Select(Select::from_options(
                    &["No", "Yes"],
                    usize::from(defaults.fasting_bs),
                )),
                FieldId::RestingEcg => Widget::Select(Select::of(defaults.resting_ecg)),
                FieldId::MaxHr => Widget::Slider(Slider::new(MAX_HR_RANGE, defaults.max_hr)),
                FieldId::Oldpeak => {
                    Widget::Slider(Slider::tenths(OLDPEAK_RANGE, defaults.oldpeak))
                }
                FieldId::StSlope => Widget::Select(Select::of(defaults.st_slope)),
            })
            .collect();

        Self { widgets, focus: 0 }
    }
}

impl FormState {
    /// Focused field, or `None` when the submit button has focus.
    #[must_use]
    pub fn focused_field(&self) -> Option<FieldId> {
        FieldId::ALL.get(self.focus).copied()
    }

    #[must_use]
    pub fn submit_focused(&self) -> bool {
        self.focused_field().is_none()
    }

    pub fn next_field(&mut self) {
        self.commit();
        self.focus = (self.focus + 1) % (FieldId::ALL.len() + 1);
    }

    pub fn prev_field(&mut self) {
        self.commit();
        self.focus = self.focus.checked_sub(1).unwrap_or(FieldId::ALL.len());
    }

    /// Move the focused slider or select by `delta` steps.
    pub fn adjust(&mut self, delta: i64) {
        match self.focused_widget_mut() {
            Some(Widget::Slider(slider)) => slider.step(delta),
            Some(Widget::Number(input)) => input.step(delta),
            Some(Widget::Select(select)) => select.cycle(delta),
            None => {}
        }
    }

    /// Type a digit into the focused number input.
    pub fn input_char(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        if let Some(Widget::Number(input)) = self.focused_widget_mut() {
            input.push_digit(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(Widget::Number(input)) = self.focused_widget_mut() {
            input.delete_char();
        }
    }

    /// Commit any pending number input edits.
    pub fn commit(&mut self) {
        for widget in &mut self.widgets {
            if let Widget::Number(input) = widget {
                input.commit();
            }
        }
    }

    /// Restore every widget to its default and wipe pending text.
    pub fn reset(&mut self) {
        for widget in &mut self.widgets {
            if let Widget::Number(input) = widget {
                input.wipe();
            }
        }
        *self = Self::default();
    }

    /// Read the committed widget values.
    ///
    /// Pending edits are ignored; call [`FormState::commit`] first.
    #[must_use]
    pub fn to_observation(&self) -> ClinicalObservation {
        ClinicalObservation {
            age: self.slider(FieldId::Age).as_u32(),
            sex: self.select(FieldId::Sex).get::<Sex>(),
            chest_pain_type: self.select(FieldId::ChestPainType).get::<ChestPainType>(),
            resting_bp: self.number(FieldId::RestingBp),
            cholesterol: self.number(FieldId::Cholesterol),
            fasting_bs: self.select(FieldId::FastingBs).index == 1,
            resting_ecg: self.select(FieldId::RestingEcg).get::<RestingEcg>(),
            max_hr: self.slider(FieldId::MaxHr).as_u32(),
            exercise_angina: self.select(FieldId::ExerciseAngina).get::<ExerciseAngina>(),
            oldpeak: self.slider(FieldId::Oldpeak).as_f64(),
            st_slope: self.select(FieldId::StSlope).get::<StSlope>(),
        }
    }

    #[must_use]
    pub fn widget(&self, id: FieldId) -> &Widget {
        &self.widgets[id.index()]
    }

    fn focused_widget_mut(&mut self) -> Option<&mut Widget> {
        self.widgets.get_mut(self.focus)
    }

    fn slider(&self, id: FieldId) -> &Slider {
        match self.widget(id) {
            Widget::Slider(slider) => slider,
            other => unreachable!("{id:?} is not a slider: {other:?}"),
        }
    }

    fn number(&self, id: FieldId) -> u32 {
        match self.widget(id) {
            Widget::Number(input) => input.value,
            other => unreachable!("{id:?} is not a number input: {other:?}"),
        }
    }

    fn select(&self, id: FieldId) -> &Select {
        match self.widget(id) {
            Widget::Select(select) => select,
            other => unreachable!("{id:?} is not a select: {other:?}"),
        }
    }
}

/// Render the form sections and the submit button.
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(14), // Demographics | Vitals
            Constraint::Length(8),  // ECG & Heart Metrics
            Constraint::Length(3),  // Submit
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_section(
        f,
        top[0],
        "Demographics & History",
        &[&[
            FieldId::Age,
            FieldId::Sex,
            FieldId::ChestPainType,
            FieldId::ExerciseAngina,
        ]],
        state,
    );
    render_section(
        f,
        top[1],
        "Vitals & Diagnostics",
        &[&[FieldId::RestingBp, FieldId::Cholesterol, FieldId::FastingBs]],
        state,
    );
    render_section(
        f,
        rows[1],
        "ECG & Heart Metrics",
        &[
            &[FieldId::RestingEcg],
            &[FieldId::MaxHr],
            &[FieldId::Oldpeak, FieldId::StSlope],
        ],
        state,
    );

    render_submit(f, rows[2], state.submit_focused());
}

fn render_section(
    f: &mut Frame,
    area: Rect,
    title: &str,
    columns: &[&[FieldId]],
    state: &FormState,
) {
    let block = Block::default()
        .title(Span::styled(format!(" {title} "), MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let column_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns.len() as u32); columns.len()])
        .split(inner);

    for (fields, column_area) in columns.iter().zip(column_areas.iter()) {
        let constraints: Vec<Constraint> = fields
            .iter()
            .map(|_| Constraint::Length(3))
            .chain(std::iter::once(Constraint::Min(0)))
            .collect();
        let slots = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(*column_area);

        for (id, slot) in fields.iter().zip(slots.iter()) {
            render_field(f, *slot, *id, state.widget(*id), state.focused_field() == Some(*id));
        }
    }
}

fn render_field(f: &mut Frame, area: Rect, id: FieldId, widget: &Widget, focused: bool) {
    let (border_style, title_style) = if focused {
        (MedicalTheme::border_focused(), MedicalTheme::focused())
    } else {
        (MedicalTheme::border(), MedicalTheme::text_secondary())
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", id.label()), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    match widget {
        Widget::Slider(slider) => {
            let gauge = LineGauge::default()
                .block(block)
                .filled_style(if focused {
                    MedicalTheme::focused()
                } else {
                    MedicalTheme::info()
                })
                .unfilled_style(MedicalTheme::text_muted())
                .ratio(slider.ratio())
                .label(Span::styled(format!("{:>5} ", slider.display()), MedicalTheme::text()));
            f.render_widget(gauge, area);
        }
        Widget::Number(input) => {
            let mut spans = vec![Span::raw(" "), Span::styled(input.display(), MedicalTheme::text())];
            if focused {
                spans.push(Span::styled("▌", MedicalTheme::focused()));
            }
            if !input.is_editing() {
                spans.push(Span::styled(
                    format!("  ({}-{})", input.min, input.max),
                    MedicalTheme::text_muted(),
                ));
            }
            f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
        }
        Widget::Select(select) => {
            let arrows = if focused {
                MedicalTheme::key_hint()
            } else {
                MedicalTheme::text_muted()
            };
            let line = Line::from(vec![
                Span::styled(" ◀ ", arrows),
                Span::styled(select.display(), MedicalTheme::text()),
                Span::styled(" ▶", arrows),
            ]);
            f.render_widget(Paragraph::new(line).block(block), area);
        }
    }
}

fn render_submit(f: &mut Frame, area: Rect, focused: bool) {
    let (style, border) = if focused {
        (MedicalTheme::selected(), MedicalTheme::border_focused())
    } else {
        (MedicalTheme::focused(), MedicalTheme::border())
    };

    let button = Paragraph::new(Line::from(Span::styled(" Generate Risk Analysis ", style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));

    f.render_widget(button, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus(form: &mut FormState, id: FieldId) {
        while form.focused_field() != Some(id) {
            form.next_field();
        }
    }

    #[test]
    fn test_defaults_match_observation_defaults() {
        let form = FormState::default();
        assert_eq!(form.to_observation(), ClinicalObservation::default());
        assert_eq!(form.focused_field(), Some(FieldId::Age));
    }

    #[test]
    fn test_focus_wraps_through_submit() {
        let mut form = FormState::default();
        form.prev_field();
        assert!(form.submit_focused());
        form.next_field();
        assert_eq!(form.focused_field(), Some(FieldId::Age));

        for _ in 0..FieldId::ALL.len() {
            form.next_field();
        }
        assert!(form.submit_focused());
    }

    #[test]
    fn test_slider_clamps_at_extremes() {
        let mut form = FormState::default();
        focus(&mut form, FieldId::Age);

        form.adjust(-1000);
        assert_eq!(form.to_observation().age, 18);
        form.adjust(1000);
        assert_eq!(form.to_observation().age, 100);
    }

    #[test]
    fn test_oldpeak_steps_in_tenths() {
        let mut form = FormState::default();
        focus(&mut form, FieldId::Oldpeak);

        form.adjust(3);
        assert!((form.to_observation().oldpeak - 1.3).abs() < 1e-9);
        form.adjust(-100);
        assert_eq!(form.to_observation().oldpeak, 0.0);
        form.adjust(100);
        assert_eq!(form.to_observation().oldpeak, 6.0);
    }

    #[test]
    fn test_select_cycles() {
        let mut form = FormState::default();
        focus(&mut form, FieldId::ChestPainType);

        form.adjust(-1);
        assert_eq!(form.to_observation().chest_pain_type, ChestPainType::Asymptomatic);
        form.adjust(1);
        assert_eq!(form.to_observation().chest_pain_type, ChestPainType::AtypicalAngina);

        focus(&mut form, FieldId::FastingBs);
        form.adjust(1);
        assert!(form.to_observation().fasting_bs);
    }

    #[test]
    fn test_number_input_clamps_on_commit() {
        let mut form = FormState::default();
        focus(&mut form, FieldId::Cholesterol);

        for c in ['9', '9', '9', '9'] {
            form.input_char(c);
        }
        // Still editing: the committed value is unchanged.
        assert_eq!(form.to_observation().cholesterol, 200);

        form.next_field();
        assert_eq!(form.to_observation().cholesterol, 600);

        focus(&mut form, FieldId::RestingBp);
        form.input_char('5');
        form.commit();
        assert_eq!(form.to_observation().resting_bp, 80);
    }

    #[test]
    fn test_number_input_empty_reverts() {
        let mut form = FormState::default();
        focus(&mut form, FieldId::RestingBp);

        for _ in 0..3 {
            form.delete_char();
        }
        form.input_char('x');
        form.commit();
        assert_eq!(form.to_observation().resting_bp, 120);
    }

    #[test]
    fn test_backspace_edits_current_value() {
        let mut form = FormState::default();
        focus(&mut form, FieldId::RestingBp);

        form.delete_char();
        form.input_char('5');
        form.commit();
        assert_eq!(form.to_observation().resting_bp, 125);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = FormState::default();
        focus(&mut form, FieldId::MaxHr);
        form.adjust(20);
        focus(&mut form, FieldId::Cholesterol);
        form.input_char('3');

        form.reset();
        assert_eq!(form, FormState::default());
    }
}
