use crate::domain::{Task, TaskId, UiMode};
use crate::persistence::{parse_break_interval, save_settings, Settings};
use crate::pomodoro::{Pomodoro, PomodoroEvent};
use crate::tracker::Tracker;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Input form state for adding or renaming a task
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub name: String,
    /// Task being renamed; `None` when adding
    pub editing: Option<TaskId>,
}

/// Settings modal fields, edited as text and parsed on submit
#[derive(Debug, Clone)]
pub struct SettingsFormState {
    pub break_interval: String,
    pub work_minutes: String,
    pub break_minutes: String,
    pub editing_field: usize, // 0 = break interval, 1 = work, 2 = break
}

impl SettingsFormState {
    pub const FIELD_COUNT: usize = 3;

    fn from_settings(settings: &Settings) -> Self {
        Self {
            break_interval: settings.break_interval_minutes.to_string(),
            work_minutes: settings.pomodoro_work_minutes.to_string(),
            break_minutes: settings.pomodoro_break_minutes.to_string(),
            editing_field: 0,
        }
    }

    fn current_field_mut(&mut self) -> &mut String {
        match self.editing_field {
            1 => &mut self.work_minutes,
            2 => &mut self.break_minutes,
            _ => &mut self.break_interval,
        }
    }
}

/// Main application state
pub struct AppState {
    pub tracker: Tracker,
    pub pomodoro: Pomodoro,
    pub settings: Settings,
    settings_path: PathBuf,
    /// Index into the sorted task list
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub settings_form: Option<SettingsFormState>,
    /// Last error shown in the key hint bar
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(tracker: Tracker, settings: Settings, settings_path: PathBuf) -> Self {
        let pomodoro = Pomodoro::new(settings.pomodoro_work_minutes, settings.pomodoro_break_minutes);
        Self {
            tracker,
            pomodoro,
            settings,
            settings_path,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            settings_form: None,
            status_message: None,
        }
    }

    /// The task under the cursor in display order
    pub fn selected_task(&self) -> Option<&Task> {
        self.tracker.sorted_tasks().get(self.selected_index).copied()
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.selected_task().map(|t| t.id)
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let len = self.tracker.tasks().len();
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    /// Keep the cursor on `id` after a change that reorders the list
    fn follow(&mut self, id: TaskId) {
        if let Some(pos) = self.tracker.sorted_tasks().iter().position(|t| t.id == id) {
            self.selected_index = pos;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.tracker.tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Start or stop the selected task
    pub fn toggle_timer_selected(&mut self) -> Result<()> {
        if let Some(id) = self.selected_id() {
            self.tracker.toggle_timer(id)?;
            self.follow(id);
        }
        Ok(())
    }

    pub fn toggle_completion_selected(&mut self) -> Result<()> {
        if let Some(id) = self.selected_id() {
            self.tracker.toggle_completion(id)?;
            self.follow(id);
        }
        Ok(())
    }

    pub fn delete_selected(&mut self) -> Result<()> {
        if let Some(id) = self.selected_id() {
            self.tracker.delete(id)?;
            self.clamp_selection();
        }
        Ok(())
    }

    /// Open the input form for a new task
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the input form pre-filled with the selected task's name
    pub fn start_edit_task(&mut self) {
        if let Some(task) = self.selected_task() {
            self.input_form = Some(InputFormState {
                name: task.name.clone(),
                editing: Some(task.id),
            });
            self.ui_mode = UiMode::EditingTask;
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.name.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.name.pop();
        }
    }

    /// Add or rename from the form. Blank names close the form unchanged.
    pub fn submit_input_form(&mut self) -> Result<()> {
        self.ui_mode = UiMode::Normal;
        let Some(form) = self.input_form.take() else {
            return Ok(());
        };

        match form.editing {
            Some(id) => {
                self.tracker.rename(id, &form.name)?;
                self.follow(id);
            }
            None => {
                self.tracker.add(&form.name)?;
            }
        }
        Ok(())
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn open_settings(&mut self) {
        self.settings_form = Some(SettingsFormState::from_settings(&self.settings));
        self.ui_mode = UiMode::Settings;
    }

    pub fn settings_form_next_field(&mut self) {
        if let Some(form) = &mut self.settings_form {
            form.editing_field = (form.editing_field + 1) % SettingsFormState::FIELD_COUNT;
        }
    }

    pub fn settings_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.settings_form {
            form.current_field_mut().push(c);
        }
    }

    pub fn settings_form_backspace(&mut self) {
        if let Some(form) = &mut self.settings_form {
            form.current_field_mut().pop();
        }
    }

    /// Apply the settings modal and save settings.json
    pub fn submit_settings(&mut self) -> Result<()> {
        self.ui_mode = UiMode::Normal;
        let Some(form) = self.settings_form.take() else {
            return Ok(());
        };

        self.settings.break_interval_minutes = parse_break_interval(&form.break_interval);
        self.settings.pomodoro_work_minutes =
            parse_minutes(&form.work_minutes, self.settings.pomodoro_work_minutes);
        self.settings.pomodoro_break_minutes =
            parse_minutes(&form.break_minutes, self.settings.pomodoro_break_minutes);

        self.tracker
            .set_break_interval(self.settings.break_interval_minutes);
        self.pomodoro.set_durations(
            self.settings.pomodoro_work_minutes,
            self.settings.pomodoro_break_minutes,
        );
        self.save_settings()
    }

    pub fn cancel_settings(&mut self) {
        self.settings_form = None;
        self.ui_mode = UiMode::Normal;
    }

    fn save_settings(&self) -> Result<()> {
        save_settings(&self.settings_path, &self.settings).with_context(|| {
            format!("Failed to save settings to {}", self.settings_path.display())
        })
    }

    /// Hide the break banner
    pub fn dismiss_break(&mut self) {
        self.tracker.dismiss_break();
    }

    /// Pomodoro controls only act while the panel is shown
    pub fn toggle_pomodoro(&mut self) {
        if !self.settings.show_pomodoro {
            return;
        }
        let now = self.tracker.now();
        self.pomodoro.toggle(now);
    }

    pub fn reset_pomodoro(&mut self) -> Result<()> {
        if !self.settings.show_pomodoro {
            return Ok(());
        }
        match self.pomodoro.reset() {
            Some(event) => self.route_pomodoro_event(event),
            None => Ok(()),
        }
    }

    pub fn skip_pomodoro(&mut self) -> Result<()> {
        if !self.settings.show_pomodoro {
            return Ok(());
        }
        let now = self.tracker.now();
        let event = self.pomodoro.skip(now);
        self.route_pomodoro_event(event)
    }

    /// Hiding the panel resets the cycle, so a hidden countdown never
    /// stops tasks.
    pub fn toggle_show_pomodoro(&mut self) -> Result<()> {
        if self.settings.show_pomodoro {
            if let Some(event) = self.pomodoro.reset() {
                self.route_pomodoro_event(event)?;
            }
        }
        self.settings.show_pomodoro = !self.settings.show_pomodoro;
        self.save_settings()
    }

    fn route_pomodoro_event(&mut self, event: PomodoroEvent) -> Result<()> {
        match event {
            PomodoroEvent::BreakStarted => self.tracker.on_break_start()?,
            PomodoroEvent::WorkStarted => self.tracker.on_work_start(),
        }
        Ok(())
    }

    /// Drive the tracker tick source and the Pomodoro countdown
    pub fn tick(&mut self) -> Result<()> {
        let polled = self.tracker.poll();

        if self.settings.show_pomodoro {
            let now = self.tracker.now();
            if let Some(event) = self.pomodoro.advance(now) {
                self.route_pomodoro_event(event)?;
            }
        }

        polled?;
        Ok(())
    }

    /// Bank the running task and write the final state
    pub fn shutdown(&mut self) -> Result<()> {
        self.tracker
            .shutdown()
            .context("Failed to save tasks on exit")
    }
}

/// Parse a Pomodoro duration, keeping `current` unless the input is a
/// positive whole number
fn parse_minutes(input: &str, current: u32) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => minutes,
        _ => current,
    }
}
