//! Type definitions and enums for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    ///
    /// This variant represents the main menu screen of the game.
    MainMenu(MainMenuItem),
    /// Options configuration screen.
    ///
    /// This variant represents the options menu screen of the game.
    OptionsMenu(OptionsMenuItem),
    /// In-game maze screen.
    ///
    /// This variant represents the screen where the maze is carved and the round is played.
    InGame,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    ///
    /// This variant represents the "Start Game" option in the main menu.
    StartGame,
    /// "Options" menu option.
    ///
    /// This variant represents the "Options" option in the main menu.
    Options,
    /// "Quit" menu option.
    ///
    /// This variant represents the "Quit" option in the main menu.
    Quit,
}

impl MainMenuItem {
    /// Every main menu item, in the order they are listed.
    ///
    /// This constant holds the items the main menu renders from top to bottom.
    pub(crate) const ALL: [Self; 3] = [Self::StartGame, Self::Options, Self::Quit];

    /// Returns the label shown for the item.
    ///
    /// This function provides the text rendered on the item's row of the main menu.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::StartGame => "Start Game",
            Self::Options => "Options",
            Self::Quit => "Quit",
        }
    }
}

/// Options menu navigation choices.
///
/// This enumeration holds the different items in the options menu. It is used to determine which
/// items can the user select in the options menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum OptionsMenuItem {
    /// "Gates" toggle option.
    ///
    /// This variant represents the option switching the entrance and exit gates on and off.
    Gates,
    /// "Back" navigation option.
    ///
    /// This variant represents the "Back" option in the options menu.
    Back,
}

impl OptionsMenuItem {
    /// Every options menu item, in the order they are listed.
    ///
    /// This constant holds the items the options menu renders from top to bottom.
    pub(crate) const ALL: [Self; 2] = [Self::Gates, Self::Back];

    /// Returns the label shown for the item.
    ///
    /// This function provides the text rendered on the item's row of the options menu. The gates
    /// toggle shows its current state, which is passed in as `gates`.
    pub(crate) const fn label(self, gates: bool) -> &'static str {
        match self {
            Self::Gates if gates => "Gates: on",
            Self::Gates => "Gates: off",
            Self::Back => "Return",
        }
    }
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration.
    ///
    /// This variant represents the main menu in the game.
    MainMenu(u8),
    /// Options menu configuration.
    ///
    /// This variant represents the options menu in the game.
    OptionsMenu(u8),
}

impl MenuType {
    /// Main menu configuration sized for [`MainMenuItem::ALL`].
    ///
    /// This constant holds the configuration the main menu is rendered with.
    pub(crate) const MAIN: Self = Self::MainMenu(3);

    /// Options menu configuration sized for [`OptionsMenuItem::ALL`].
    ///
    /// This constant holds the configuration the options menu is rendered with.
    pub(crate) const OPTIONS: Self = Self::OptionsMenu(2);

    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu items for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::StartGame);
        let options_menu = Screen::OptionsMenu(OptionsMenuItem::Gates);
        let in_game = Screen::InGame;

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::StartGame));
        assert_eq!(options_menu, Screen::OptionsMenu(OptionsMenuItem::Gates));
        assert_eq!(in_game, Screen::InGame);

        assert_ne!(main_menu, in_game);
        assert_ne!(options_menu, Screen::OptionsMenu(OptionsMenuItem::Back));
    }

    #[test]
    fn test_menu_sizes_match_their_items() {
        assert_eq!(usize::from(MenuType::MAIN.value()), MainMenuItem::ALL.len());
        assert_eq!(
            usize::from(MenuType::OPTIONS.value()),
            OptionsMenuItem::ALL.len()
        );
    }

    #[test]
    fn test_menu_labels_are_distinct() {
        assert_eq!(MainMenuItem::StartGame.label(), "Start Game");
        assert_ne!(MainMenuItem::Options.label(), MainMenuItem::Quit.label());
        assert_eq!(OptionsMenuItem::Gates.label(true), "Gates: on");
        assert_eq!(OptionsMenuItem::Gates.label(false), "Gates: off");
        assert_eq!(OptionsMenuItem::Back.label(true), "Return");
    }

    #[test]
    fn test_menu_type_repr() {
        assert_eq!(MenuType::MAIN.repr(), "Main Menu");
        assert_eq!(MenuType::OPTIONS.repr(), "Options Menu");
    }
}
