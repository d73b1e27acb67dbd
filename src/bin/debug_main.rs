use clap::Parser;
use color_eyre::Result;
use tilesweep::config::{DEFAULT_HEIGHT, DEFAULT_MINE_COUNT, DEFAULT_WIDTH};
use tilesweep::{GameConfig, GameSession, GameState};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// A plain console front-end, handy for inspecting the board while debugging.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    height: u16,
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: u16,
    #[arg(short, long, default_value_t = DEFAULT_MINE_COUNT)]
    mines: u32,
}

#[derive(Debug)]
enum Action {
    Dig(i32, i32),
    Flag(i32, i32),
    Chord(i32, i32),
    NewGame,
}

fn parse_action(input: &str) -> Option<Action> {
    let mut parts = input.split_whitespace();
    let action = parts.next()?;

    if action == "n" {
        return Some(Action::NewGame);
    }

    let position = parts
        .next()?
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect::<Vec<i32>>();

    let (x, y) = (*position.first()?, *position.get(1)?);

    match action {
        "o" => Some(Action::Dig(x, y)),
        "f" => Some(Action::Flag(x, y)),
        "c" => Some(Action::Chord(x, y)),
        _ => None,
    }
}

fn read_action() -> Result<Option<Action>> {
    println!("Enter the desired action and the target tile's coordinates (e.g. `f 3,5` to flag the 4th tile on the 6th line), `n` for a new game:");

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input)? == 0 {
        // end of the input
        return Ok(None);
    }

    match parse_action(&input) {
        Some(action) => Ok(Some(action)),
        None => {
            println!("Incorrect input! Please, try again.");
            read_action()
        }
    }
}

fn print_status(session: &GameSession) {
    let config = session.config();
    let field = session.field();

    println!(
        "{}x{}, {} mines requested, {} mines left",
        config.width(),
        config.height(),
        config.mine_count(),
        field.mines_left()
    );
    println!("{}", field);
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = GameConfig::new(args.width, args.height, args.mines)?;
    let mut session = GameSession::new(config);

    print_status(&session);

    while let Some(action) = read_action()? {
        debug!(?action, "applying");

        let state = match action {
            Action::Dig(x, y) => session.on_left_click(x, y),
            Action::Flag(x, y) => session.on_right_click(x, y),
            Action::Chord(x, y) => {
                session.on_middle_press(x, y);
                session.on_middle_release(x, y)
            }
            Action::NewGame => session.on_new_game_request(),
        };

        print_status(&session);

        match state {
            GameState::Over => println!("Game over! Enter `n` to play again."),
            GameState::Won => println!("You won! Enter `n` to play again."),
            GameState::Playing => {}
        }
    }

    Ok(())
}
