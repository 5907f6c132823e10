//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as Segment, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    game::{Outcome, Session},
    labyrinth::{Direction, MazeGraph, Position},
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(frame, *item, app.settings.gates),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Width of the menu blocks, in terminal columns.
///
/// This is wide enough for the navigation hint in the bottom border.
const MENU_WIDTH: u16 = 36;

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both main and options menus.
/// The generic part includes the centered positioning and border styling, while the specific menu
/// content is handled by the caller using the [`MenuType`] parameter. The block is always tall enough
/// for one row per item plus its borders, whatever the size of the terminal.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let layout = Layout::vertical([Constraint::Length(u16::from(menu.value()) + 2)])
        .flex(Flex::Center)
        .split(frame.area())[0];
    let layout = Layout::horizontal([Constraint::Length(MENU_WIDTH)])
        .flex(Flex::Center)
        .split(layout)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Length(1); usize::from(menu.value())]).split(inner_space)
}

/// Returns the style of a menu row depending on whether it is selected.
fn menu_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(Color::White).bg(Color::Green)
    } else {
        Style::default().fg(Color::Green)
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Start Game", "Options", and "Quit". It
/// highlights the currently selected option and provides visual feedback for user navigation.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MAIN);

    for (entry, area) in MainMenuItem::ALL.into_iter().zip(inner_layout.iter()) {
        let line = Line::raw(entry.label())
            .centered()
            .style(menu_style(entry == item));
        frame.render_widget(line, *area);
    }
}

/// Renders the options menu screen with configuration choices.
///
/// This function displays the options menu with the gates toggle, showing its current state, and
/// "Return" to the main menu. It provides the same navigation highlighting as the main menu.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem, gates: bool) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OPTIONS);

    for (entry, area) in OptionsMenuItem::ALL.into_iter().zip(inner_layout.iter()) {
        let line = Line::raw(entry.label(gates))
            .centered()
            .style(menu_style(entry == item));
        frame.render_widget(line, *area);
    }
}

/// Computes the terminal columns and rows a maze is drawn on inside `area`.
///
/// Every cell gets the same number of columns and half as many rows, since terminal cells are about
/// twice as tall as they are wide. One extra column and row fit the far walls.
///
/// # Errors
///
/// This function may return errors from integer conversion failures.
fn maze_extent(area: Rect, width: u16, height: u16) -> Result<(u16, u16)> {
    let per_cell = (area.width.saturating_sub(1) / width.max(1))
        .min(area.height.saturating_sub(1).saturating_mul(2) / height.max(1))
        .max(1);

    let columns = per_cell.saturating_mul(width).saturating_add(1);
    let rows = rounded_div::i32(i32::from(per_cell) * i32::from(height), 2) + 1;

    Ok((columns, u16::try_from(rows)?))
}

/// Returns the canvas point at the middle of a cell.
fn cell_centre(position: Position) -> (f64, f64) {
    let (x, y) = position.placement(1.0, 1.0);
    (x + 0.5, y + 0.5)
}

/// Collects the standing walls of a maze as canvas segments.
///
/// Every cell contributes its south and west walls, and the cells on the far edges also contribute
/// their north and east walls, so that no wall is drawn twice.
fn wall_segments(maze: &MazeGraph) -> Vec<(f64, f64, f64, f64)> {
    let mut segments = Vec::new();

    for cell in maze.cells() {
        let position = cell.position();
        let (left, bottom) = position.placement(1.0, 1.0);
        let (right, top) = (left + 1.0, bottom + 1.0);

        if maze.has_wall(position, Direction::South) {
            segments.push((left, bottom, right, bottom));
        }
        if maze.has_wall(position, Direction::West) {
            segments.push((left, bottom, left, top));
        }
        if position.y + 1 == maze.height() && maze.has_wall(position, Direction::North) {
            segments.push((left, top, right, top));
        }
        if position.x + 1 == maze.width() && maze.has_wall(position, Direction::East) {
            segments.push((right, bottom, right, top));
        }
    }

    segments
}

/// Returns the status line shown under the maze.
const fn status(session: &Session) -> &'static str {
    match session.outcome() {
        Outcome::Generating => "carving the maze...",
        Outcome::Playing => "find the cheese before the cat finds you",
        Outcome::Won => "you found the cheese! (space) new maze",
        Outcome::Caught => "the cat caught you! (space) new maze",
    }
}

/// Renders the in-game screen with the maze, the pieces and the cat's route.
///
/// This function displays the maze of the current round as it is being carved or played. It draws
/// the walls, the head of the carving frontier, the route the cat is following, and the mouse, the
/// cat and the cheese on a [`Canvas`] widget, with a status line underneath.
///
/// # Errors
///
/// This function may return errors when no round is running or from coordinate conversion
/// operations.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let session = app
        .session
        .as_ref()
        .ok_or_eyre("failed to retrieve the current round")?;
    let maze = session.maze();

    // Create overall layout: maze area + tooltip at bottom
    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(3), // Tooltip block
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let (maze_columns, maze_rows) = maze_extent(maze_content_area, maze.width(), maze.height())?;

    let maze_area = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(maze_rows),
        Constraint::Min(0),
    ])
    .split(maze_content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze area from layout")?;

    let space = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(maze_columns),
        Constraint::Min(0),
    ])
    .split(maze_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    // Pre-compute canvas coordinates outside of the paint closure
    let walls = wall_segments(maze);
    let route: Vec<(f64, f64)> = session
        .cat()
        .map(|cat| cat.remaining().iter().copied().map(cell_centre).collect())
        .unwrap_or_default();
    let frontier = session.generator().current().map(cell_centre);
    let mouse = cell_centre(session.mouse());
    let cat = session.cat().map(|cat| cell_centre(cat.position()));
    let cheese = session.cheese().map(cell_centre);

    let canvas = Canvas::default()
        .x_bounds([0.0, f64::from(maze.width())])
        .y_bounds([0.0, f64::from(maze.height())])
        .marker(Marker::Braille)
        .paint(|ctx| {
            for &(x1, y1, x2, y2) in &walls {
                ctx.draw(&Segment::new(x1, y1, x2, y2, Color::Green));
            }
            ctx.layer();

            ctx.draw(&Points {
                coords: &route,
                color: Color::Red,
            });
            if let Some((x, y)) = frontier {
                ctx.print(x, y, Span::styled("+", Style::default().fg(Color::Yellow)));
            }
            if let Some((x, y)) = cheese {
                ctx.print(x, y, Span::styled("*", Style::default().fg(Color::Yellow)));
            }
            if let Some((x, y)) = cat {
                ctx.print(x, y, Span::styled("C", Style::default().fg(Color::LightRed)));
            }
            ctx.print(
                mouse.0,
                mouse.1,
                Span::styled("m", Style::default().fg(Color::White)),
            );
        });

    frame.render_widget(canvas, space);

    // Render tooltip as a block at the bottom with top border and the status inside
    let tooltip_block = Block::bordered()
        .title("(arrows) move / (space) new maze / (h) return to menu")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status_area = tooltip_block.inner(tooltip_area);

    frame.render_widget(tooltip_block, tooltip_area);
    frame.render_widget(Line::raw(status(session)).centered(), status_area);

    Ok(())
}
