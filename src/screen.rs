//! Screen flow for the app shell

/// Which screen the player is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Start,
    /// Start screen fading out; play begins after `START_ANIMATION_MS`
    Starting,
    Playing,
    Paused,
    GameOver,
}

/// What the pause key does on the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseKeyAction {
    StartGame,
    Pause,
    Resume,
    Restart,
    Ignore,
}

impl Screen {
    pub fn pause_key(self, menu_open: bool) -> PauseKeyAction {
        if menu_open {
            return PauseKeyAction::Ignore;
        }
        match self {
            Screen::Start => PauseKeyAction::StartGame,
            Screen::Starting => PauseKeyAction::Ignore,
            Screen::Playing => PauseKeyAction::Pause,
            Screen::Paused => PauseKeyAction::Resume,
            Screen::GameOver => PauseKeyAction::Restart,
        }
    }

    /// A pause request stops the run here. The start fade counts, so a
    /// pending start is cancelled rather than firing later.
    pub fn can_pause(self) -> bool {
        matches!(self, Screen::Playing | Screen::Starting)
    }

    /// Whether the delayed start may switch to play
    pub fn start_may_fire(self, menu_open: bool) -> bool {
        self == Screen::Starting && !menu_open
    }

    pub fn accepts_turns(self) -> bool {
        self == Screen::Playing
    }

    /// Screen after a pause request; unchanged if it doesn't apply
    pub fn paused(self) -> Screen {
        if self.can_pause() {
            Screen::Paused
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_key_per_screen() {
        assert_eq!(Screen::Start.pause_key(false), PauseKeyAction::StartGame);
        assert_eq!(Screen::Starting.pause_key(false), PauseKeyAction::Ignore);
        assert_eq!(Screen::Playing.pause_key(false), PauseKeyAction::Pause);
        assert_eq!(Screen::Paused.pause_key(false), PauseKeyAction::Resume);
        assert_eq!(Screen::GameOver.pause_key(false), PauseKeyAction::Restart);
    }

    #[test]
    fn test_pause_key_ignored_under_menu() {
        for screen in [
            Screen::Start,
            Screen::Starting,
            Screen::Playing,
            Screen::Paused,
            Screen::GameOver,
        ] {
            assert_eq!(screen.pause_key(true), PauseKeyAction::Ignore);
        }
    }

    #[test]
    fn test_menu_during_start_fade_cancels_start() {
        // Space on the start screen, then Escape before the fade ends
        let screen = Screen::Start;
        assert_eq!(screen.pause_key(false), PauseKeyAction::StartGame);
        let screen = Screen::Starting;
        assert!(screen.can_pause());
        let screen = screen.paused();
        assert_eq!(screen, Screen::Paused);

        // The fade timeout must not switch to play, menu open or not
        assert!(!screen.start_may_fire(true));
        assert!(!screen.start_may_fire(false));
        assert!(!screen.accepts_turns());

        // Closing the menu and pressing Space resumes
        assert_eq!(screen.pause_key(false), PauseKeyAction::Resume);
    }

    #[test]
    fn test_start_fires_only_from_fade() {
        assert!(Screen::Starting.start_may_fire(false));
        assert!(!Screen::Starting.start_may_fire(true));
        assert!(!Screen::Start.start_may_fire(false));
        assert!(!Screen::Playing.start_may_fire(false));
    }

    #[test]
    fn test_pause_does_not_apply_off_play() {
        assert_eq!(Screen::Start.paused(), Screen::Start);
        assert_eq!(Screen::GameOver.paused(), Screen::GameOver);
        assert_eq!(Screen::Paused.paused(), Screen::Paused);
        assert_eq!(Screen::Playing.paused(), Screen::Paused);
    }
}
