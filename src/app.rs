//! Core application state and logic for the maze game.

use std::time::Instant;

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::{
    events,
    game::{Session, Settings},
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Settings the next round is created with.
    ///
    /// This field starts off with the values given on the command line. The options menu may
    /// change it, and the change applies from the next round on.
    pub(crate) settings: Settings,
    /// Round currently being played.
    ///
    /// This field holds the session behind the in-game screen. It is created when the user starts a
    /// game and dropped when they return to the main menu.
    pub(crate) session: Option<Session>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl App {
    /// Creates a new instance of the App structure showing the main menu.
    ///
    /// No round is created until the user starts a game, so no fallible work happens here.
    #[must_use]
    pub const fn new(settings: Settings) -> Self {
        Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            settings,
            session: None,
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws the current screen, handles user input and lets the current round catch
    /// up with the clock. The loop continues until the exit condition is `true`, after which the
    /// function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    /// - [`MazeError`](crate::labyrinth::MazeError) when a round cannot be created or advanced.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
            self.tick(Instant::now())?;
        }

        Ok(())
    }

    /// Creates a new round from the current settings and switches to the in-game screen.
    ///
    /// # Errors
    ///
    /// - [`MazeError`](crate::labyrinth::MazeError) when the settings describe an empty maze.
    pub(crate) fn start_game(&mut self) -> Result<()> {
        self.session = Some(Session::new(self.settings.clone())?);
        self.screen = Screen::InGame;
        info!(
            width = self.settings.width,
            height = self.settings.height,
            "game started"
        );

        Ok(())
    }

    /// Advances the current round, if any, up to `now`.
    ///
    /// # Errors
    ///
    /// - [`MazeError`](crate::labyrinth::MazeError) when the cat cannot plan its route.
    pub(crate) fn tick(&mut self, now: Instant) -> Result<()> {
        if let Some(session) = self.session.as_mut() {
            session.update(now)?;
        }

        Ok(())
    }
}
