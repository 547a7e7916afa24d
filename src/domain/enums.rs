/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    Settings,
}

/// Phase of the Pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroPhase {
    Work,
    Break,
}

impl PomodoroPhase {
    /// Display name for this phase
    pub fn name(&self) -> &'static str {
        match self {
            PomodoroPhase::Work => "Work",
            PomodoroPhase::Break => "Break",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            PomodoroPhase::Work => PomodoroPhase::Break,
            PomodoroPhase::Break => PomodoroPhase::Work,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_alternates() {
        assert_eq!(PomodoroPhase::Work.next(), PomodoroPhase::Break);
        assert_eq!(PomodoroPhase::Break.next(), PomodoroPhase::Work);
    }

    #[test]
    fn test_phase_name() {
        assert_eq!(PomodoroPhase::Work.name(), "Work");
        assert_eq!(PomodoroPhase::Break.name(), "Break");
    }
}
