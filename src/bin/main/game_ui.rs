//! The game renderer functions.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::Frame,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{
        block::{Position, Title},
        Block, BorderType, Borders, Clear, Paragraph, Row, Table, Widget,
    },
};
use std::cmp;
use tilesweep::{GameState, Tile};

/// The number of terminal rows that a single tile occupies (including the borders).
pub const CELL_HEIGHT: u16 = 3;
/// The number of terminal columns that a single tile occupies (including the borders).
pub const CELL_WIDTH: u16 = 5;

const HIDDEN_TILE_SYMBOL: &str = "███";
const FLAG_SYMBOL: &str = " 🚩 ";
const MINE_SYMBOL: &str = " 💣 ";
const WRONG_FLAG_SYMBOL: &str = " ❌ ";
const FACE_PLAYING: &str = ":)";
const FACE_LOST: &str = "X(";
const FACE_WON: &str = "B)";
const TILE_COLOR: Color = Color::Yellow;
const TILE_PALE_COLOR: Color = Color::LightYellow;
/// The colors of the numbers 1 to 8, in the order of the classic game.
const NUMBER_COLORS: [Color; 8] = [
    Color::Blue,
    Color::Green,
    Color::Red,
    Color::Magenta,
    Color::LightRed,
    Color::Cyan,
    Color::Black,
    Color::DarkGray,
];
const APP_BG_COLOR: Color = Color::White;
const FIELD_BORDER_COLOR: Color = Color::Yellow;
const FIELD_BORDER_PALE_COLOR: Color = Color::LightYellow;
const OUTCOME_VICTORY_BORDER_COLOR: Color = Color::Green;
const OUTCOME_LOSS_BORDER_COLOR: Color = Color::Red;
const LEAVE_CONFIRMATION_POPUP_BORDER_COLOR: Color = Color::Red;
const INFO_WIDGET_BLOCK_COLOR: Color = Color::LightYellow;
const REGULAR_TEXT_COLOR: Color = Color::Black;
const LEGEND_TEXT_COLOR: Color = Color::DarkGray;

const LEGEND_TEXT: [&str; 6] = [
    "[mouse left] / [SPACE] / [ENTER]: dig the tile",
    "[mouse right] / [f]: toggle the flag",
    "[mouse middle] (hold and release) / [c]: chord around the tile",
    "[↑][←][↓][→] / [w][a][s][d] / [i][j][k][l]: move the cursor",
    "[n] / the face button: start a new game",
    "[q] / [ESC]: leave",
];
const VICTORY_LINE_TEXT: &str = " You won! Congratulations! ";
const LOSS_LINE_TEXT: &str = " You lost... Wanna try again? ";
const LEAVE_CONFIRMATION_POPUP_TEXT: [&str; 6] = [
    "Are you sure you want to quit?",
    "The progress shall not be saved!",
    "",
    "Use:",
    "[SPACE] / [ENTER] - CONFIRM",
    "[q] / [ESC] - CANCEL",
];

pub fn render_game(app: &mut App, frame: &mut Frame) {
    // the root container is the whole terminal rectangle
    let root_container = frame.size();

    // the app layout consists of the field, stats and legend containers. The stats are the flags counter, the
    // new-game button and the mines counter.
    let (field_container, (flags_info_container, retry_button_container, mines_info_container), legend_container) =
        create_app_layout(&root_container);

    let (total_columns_amount, total_rows_amount) =
        (app.session.field().width(), app.session.field().height());

    // update the amounts of rows and columns that we can actually show (respecting the container's size)
    app.visible_rows_amount =
        calculate_visible_amount(field_container.height, total_rows_amount, CELL_HEIGHT);
    app.visible_columns_amount =
        calculate_visible_amount(field_container.width, total_columns_amount, CELL_WIDTH);
    app.clamp_window_offset();

    let grid_container = create_grid_container(
        &field_container,
        app.visible_rows_amount,
        app.visible_columns_amount,
    );

    // remember where the interactive parts are, so that the mouse events could be mapped onto them
    app.grid_area = grid_container;
    app.retry_button_area = retry_button_container;

    let grid = build_grid_layout(
        &grid_container,
        app.visible_rows_amount,
        app.visible_columns_amount,
    );

    // 1. Render the terminal background
    frame.render_widget(Block::default().bg(APP_BG_COLOR), root_container);

    // 2. Render the border around the field, telling the outcome in its title once the game has ended and pointing
    // at the hidden parts of the field in the bottom one
    let scroll_hints = [
        (app.window_offset.1 != 0, "↑"),
        (app.window_offset.0 != 0, "←"),
        (
            app.window_offset.1 + app.visible_rows_amount < total_rows_amount,
            "↓",
        ),
        (
            app.window_offset.0 + app.visible_columns_amount < total_columns_amount,
            "→",
        ),
    ]
    .iter()
    .filter(|(shown, _)| *shown)
    .map(|(_, arrow)| *arrow)
    .collect::<Vec<_>>()
    .join(" ");

    frame.render_widget(
        build_field_border(app.session.state(), scroll_hints),
        field_container,
    );

    // 3. Render a grid of the tiles
    let field = app.session.field();
    let highlighted = app.session.chord_highlight();

    grid.iter().enumerate().for_each(|(row_index, row)| {
        row.iter()
            .enumerate()
            .for_each(|(column_index, tile_container)| {
                // the real indices are those including the window offset
                let x = column_index as u16 + app.window_offset.0;
                let y = row_index as u16 + app.window_offset.1;

                let Some(tile) = field.get(x as i32, y as i32) else {
                    return;
                };

                let is_selected = app.cursor_position == (x, y);
                let is_pressed = highlighted.contains(&(x as i32, y as i32));

                frame.render_widget(build_tile_widget(tile, is_selected, is_pressed), *tile_container)
            });
    });

    // 4. Render the stats and the button between them
    frame.render_widget(
        build_counter_widget(FLAG_SYMBOL.trim(), field.placed_flags() as i64),
        flags_info_container,
    );
    frame.render_widget(
        build_retry_button_widget(app.session.state()),
        retry_button_container,
    );
    frame.render_widget(
        build_counter_widget(MINE_SYMBOL.trim(), field.mines_left()),
        mines_info_container,
    );

    // 5. Render the legend
    frame.render_widget(build_legend_widget(), legend_container);

    // 6. Render the leave confirmation popup in case the leave has been requested
    if app.awaiting_leave_confirmation {
        render_popup(
            frame,
            LEAVE_CONFIRMATION_POPUP_TEXT.map(|line| line.to_string()),
            LEAVE_CONFIRMATION_POPUP_BORDER_COLOR,
        );
    }
}

/// The method creates the base grid needed for the application. Namely, we need to show the field, the counters with
/// the new-game button and the controls-legend.
fn create_app_layout(container: &Rect) -> (Rect, (Rect, Rect, Rect), Rect) {
    // the stats container's height is 3 rows: 2 for borders and one for the contents
    let stats_container_height = 3;
    // the legend container is a row per a line of the controls-related information
    let legend_container_height = LEGEND_TEXT.len() as u16;

    // create a set of vertically-stacked rectangles, the field takes all that's left
    let app_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(stats_container_height),
            Constraint::Min(0),
            Constraint::Length(legend_container_height),
        ])
        .split(*container);

    // split the top rectangle into 3: 2 margins and a central one for the stats
    let stats_container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Constraint::from_percentages([25, 50, 25]))
        .split(app_layout[0])[1];

    // the central one from the above is split into 3 sections once again: the counters and the button in between
    let stats_containers = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Constraint::from_percentages([40, 20, 40]))
        .split(stats_container);

    // the field is horizontally surrounded by margins
    let field_container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Constraint::from_percentages([5, 90, 5]))
        .split(app_layout[1])[1];

    // the bottom rectangle is split the same fashion as the middle one
    let legend_container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Constraint::from_percentages([5, 90, 5]))
        .split(app_layout[2])[1];

    (
        field_container,
        (stats_containers[0], stats_containers[1], stats_containers[2]),
        legend_container,
    )
}

/// Ideally, we'd like to show all the rows (columns) of the field. But this is often impossible to do, since the space
/// available is less than the space needed. In such cases, we divide the available space (without the field's border)
/// by the size of a single tile to find out how many full tiles would fit.
fn calculate_visible_amount(available_size: u16, total_amount: u16, cell_size: u16) -> u16 {
    cmp::min(total_amount, available_size.saturating_sub(2) / cell_size)
}

/// Produces the rectangle for the visible tiles: exactly as large as the tiles need, centered inside the field's
/// border.
///
/// The size is strictly fixed to be divisible by the tile's size, so that the terminal cells could be mapped back onto
/// the tiles without any stretching involved.
fn create_grid_container(
    field_container: &Rect,
    visible_rows_amount: u16,
    visible_columns_amount: u16,
) -> Rect {
    let (height, width) = (
        visible_rows_amount * CELL_HEIGHT,
        visible_columns_amount * CELL_WIDTH,
    );

    Rect::new(
        field_container.x + field_container.width.saturating_sub(width) / 2,
        field_container.y + field_container.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

/// The grid layout is what's used to display the tiles of the field: a rectangle per tile, row by row.
fn build_grid_layout(container: &Rect, rows_amount: u16, columns_amount: u16) -> Vec<Vec<Rect>> {
    (0..rows_amount)
        .map(|row_index| {
            (0..columns_amount)
                .map(|column_index| {
                    Rect::new(
                        container.x + column_index * CELL_WIDTH,
                        container.y + row_index * CELL_HEIGHT,
                        CELL_WIDTH,
                        CELL_HEIGHT,
                    )
                })
                .collect()
        })
        .collect()
}

fn build_field_border(state: GameState, scroll_hints: String) -> Block<'static> {
    let (outcome, border_color) = match state {
        GameState::Playing => ("", FIELD_BORDER_COLOR),
        GameState::Over => (LOSS_LINE_TEXT, OUTCOME_LOSS_BORDER_COLOR),
        GameState::Won => (VICTORY_LINE_TEXT, OUTCOME_VICTORY_BORDER_COLOR),
    };

    Block::default()
        .title(Title::from(outcome).alignment(Alignment::Center))
        .title(
            Title::from(Line::from(scroll_hints).fg(FIELD_BORDER_PALE_COLOR))
                .position(Position::Bottom)
                .alignment(Alignment::Center),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(border_color))
}

/// The function builds a widget (basically, a paragraph) that represents a single tile.
///
/// Besides the tile itself, it takes whether the tile is currently selected and whether it's pressed by a chord being
/// held. Based on that information, it decides what text to render and which colors to use.
fn build_tile_widget(tile: &Tile, selected: bool, pressed: bool) -> impl Widget {
    let symbol = if tile.is_mismatched_flag() {
        WRONG_FLAG_SYMBOL.to_string()
    } else if tile.is_flagged() {
        FLAG_SYMBOL.to_string()
    } else if !tile.is_revealed() && !pressed {
        HIDDEN_TILE_SYMBOL.to_string()
    } else if tile.is_revealed() && tile.is_mine() {
        MINE_SYMBOL.to_string()
    } else if tile.is_revealed() && tile.adjacent_mine_count() != 0 {
        format!(" {} ", tile.adjacent_mine_count())
    } else {
        "   ".to_string()
    };

    let color = if selected { TILE_COLOR } else { TILE_PALE_COLOR };

    let text_color = match tile.adjacent_mine_count() {
        n @ 1..=8 if tile.is_revealed() && !tile.is_mine() => NUMBER_COLORS[n as usize - 1],
        _ => color,
    };

    // the revealed and the pressed tiles look sunk in
    let border_type = if tile.is_revealed() || pressed {
        BorderType::Plain
    } else {
        BorderType::Thick
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(color));

    Paragraph::new(symbol).fg(text_color).block(block)
}

/// Prepares a paragraph to render as an info-block showing a counter (the flags placed or the mines left).
fn build_counter_widget(title: &str, value: i64) -> impl Widget + '_ {
    Paragraph::new(format!("{:03}", value))
        .fg(REGULAR_TEXT_COLOR)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(INFO_WIDGET_BLOCK_COLOR)),
        )
}

/// The new-game button. Its face tells how the game is going.
fn build_retry_button_widget(state: GameState) -> impl Widget {
    let (face, border_color) = match state {
        GameState::Playing => (FACE_PLAYING, TILE_COLOR),
        GameState::Over => (FACE_LOST, OUTCOME_LOSS_BORDER_COLOR),
        GameState::Won => (FACE_WON, OUTCOME_VICTORY_BORDER_COLOR),
    };

    Paragraph::new(face)
        .fg(REGULAR_TEXT_COLOR)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color)),
        )
}

/// The function builds the ready-to-use legend block (some text that provides information about the in-game controls).
fn build_legend_widget() -> impl Widget {
    let rows = LEGEND_TEXT.map(|legend_row| {
        let (keys, description) = legend_row.split_at(legend_row.find(':').unwrap_or(0));

        Row::new([
            Line::from(keys).alignment(Alignment::Right),
            Line::from(description).alignment(Alignment::Left),
        ])
    });

    Table::new(rows, Constraint::from_percentages([50, 50])).fg(LEGEND_TEXT_COLOR)
}

/// Build a popup with the provided contents (lines of a text), set to it the provided border color and render it in the
/// center of the terminal.
///
/// The width of the popup is the width of the text's longest line and its height is the number of the lines of the
/// text (plus the borders).
fn render_popup(frame: &mut Frame, lines: impl IntoIterator<Item = String>, border_color: Color) {
    let lines: Vec<String> = lines.into_iter().collect();

    let block = Block::default()
        .bg(APP_BG_COLOR)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    let text = Paragraph::new(lines.join("\n"))
        .fg(REGULAR_TEXT_COLOR)
        .alignment(Alignment::Center)
        .block(block);

    let root = frame.size();
    let popup_height = cmp::min(lines.len() as u16 + 2, root.height);
    let popup_width = cmp::min(
        lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as u16 + 2,
        root.width,
    );

    let container = Rect::new(
        root.x + (root.width - popup_width) / 2,
        root.y + (root.height - popup_height) / 2,
        popup_width,
        popup_height,
    );

    // clear the region so that it doesn't contain any old graphics and render the widget in the prepared region
    frame.render_widget(Clear, container);
    frame.render_widget(text, container);
}
