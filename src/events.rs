//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::debug;

use crate::{
    labyrinth::Direction,
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Longest time to wait for input before handing control back to the main loop.
///
/// This is kept short so that maze carving and cat moves keep animating while no key is pressed.
const POLL_TIMEOUT: Duration = Duration::from_millis(15);

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches key presses to [`handle_key`]. It uses a
/// timeout to avoid blocking the UI.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(POLL_TIMEOUT)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key.code)?,
            _ => {}
        }
    }

    Ok(())
}

/// Dispatches a key press to the handler for that key.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') => handle_l_events(app)?,
        KeyCode::Char('h') => handle_h_events(app),
        KeyCode::Char(' ') => handle_space_events(app)?,
        KeyCode::Up => handle_arrow_events(app, Direction::North),
        KeyCode::Right => handle_arrow_events(app, Direction::East),
        KeyCode::Down => handle_arrow_events(app, Direction::South),
        KeyCode::Left => handle_arrow_events(app, Direction::West),
        _ => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
///
/// This function processes the 'j' key press which is used for moving down in menus.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Gates) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
///
/// This function processes the 'k' key press which is used for moving up in menus.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Gates);
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items. It starts a
/// round from the main menu and toggles the gates in the options menu.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => app.start_game()?,
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Gates);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Gates) => {
            app.settings.gates = !app.settings.gates;
            debug!(gates = app.settings.gates, "toggled gates");
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::InGame => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
///
/// This function processes the 'h' key press which is used for returning to previous screens. Leaving
/// the in-game screen drops the current round.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InGame => {
            app.session = None;
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::OptionsMenu(_) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(_) => {}
    }
}

/// Handles space key press events for regenerating the maze.
///
/// Nothing happens while the current maze is still being carved.
pub(crate) fn handle_space_events(app: &mut App) -> Result<()> {
    if app.screen != Screen::InGame {
        return Ok(());
    }
    if let Some(session) = app.session.as_mut() {
        let _ = session.regenerate()?;
    }

    Ok(())
}

/// Handles arrow key press events for moving the mouse.
pub(crate) fn handle_arrow_events(app: &mut App, direction: Direction) {
    if app.screen != Screen::InGame {
        return;
    }
    if let Some(session) = app.session.as_mut() {
        let _ = session.move_player(direction);
    }
}
