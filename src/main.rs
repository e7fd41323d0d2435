use std::io::{self, Write};
use textsweeper::{Difficulty, Game, Mode, Position};

/// Top-level screen the menu loop is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    MainMenu,
    Custom,
    Playing,
    Controls,
    PostGame,
    Quit,
}

fn main() {
    let mut screen = Screen::MainMenu;
    let mut game: Option<Game> = None;

    while screen != Screen::Quit {
        screen = match screen {
            Screen::MainMenu => main_menu(&mut game),
            Screen::Custom => custom_setup(&mut game),
            Screen::Playing => match game.as_mut() {
                Some(game) => play_turn(game),
                None => Screen::MainMenu,
            },
            Screen::Controls => controls(),
            Screen::PostGame => match game.as_mut() {
                Some(game) => post_game(game),
                None => Screen::MainMenu,
            },
            Screen::Quit => Screen::Quit,
        };
    }

    println!("Thanks for playing!");
}

fn main_menu(game: &mut Option<Game>) -> Screen {
    println!("{}", "_".repeat(27));
    println!("   M I N E S W E E P E R");
    println!();
    println!("MAIN MENU");
    println!("[1] Beginner");
    println!("[2] Intermediate");
    println!("[3] Advanced");
    println!("[4] Custom");
    println!("[5] Quit");
    println!("{}", "_".repeat(27));

    let Some(input) = prompt("\nInput: ") else {
        return Screen::Quit;
    };

    let difficulty = match input.as_str() {
        "1" => Difficulty::Beginner,
        "2" => Difficulty::Intermediate,
        "3" => Difficulty::Advanced,
        "4" => return Screen::Custom,
        "5" => return Screen::Quit,
        _ => return Screen::MainMenu,
    };

    start_game(game, difficulty)
}

fn custom_setup(game: &mut Option<Game>) -> Screen {
    println!("{}", "_".repeat(27));
    println!("        C U S T O M");
    println!();
    println!("Note:");
    println!("+ Columns and rows have a minimum of 5 and a maximum of 26");
    println!("+ Bombs have a minimum of 1 and must be fewer than the cells");
    println!("+ Input -1 at any prompt to go back");

    loop {
        println!("{}", "_".repeat(27));
        let (Some(columns), Some(rows), Some(bombs)) = (
            prompt_number("How many columns: "),
            prompt_number("How many rows: "),
            prompt_number("How many bombs: "),
        ) else {
            return Screen::Quit;
        };
        println!();

        if columns == -1 || rows == -1 || bombs == -1 {
            return Screen::MainMenu;
        }

        let (Ok(columns), Ok(rows), Ok(bombs)) = (
            u32::try_from(columns),
            u32::try_from(rows),
            u32::try_from(bombs),
        ) else {
            println!("Inputs must be positive");
            continue;
        };

        match Difficulty::custom(columns, rows, bombs) {
            Ok(difficulty) => return start_game(game, difficulty),
            Err(e) => println!("{e}"),
        }
    }
}

fn start_game(game: &mut Option<Game>, difficulty: Difficulty) -> Screen {
    match Game::from_difficulty(difficulty) {
        Ok(fresh) => {
            *game = Some(fresh);
            Screen::Playing
        }
        Err(e) => {
            eprintln!("Could not start game: {e}");
            Screen::MainMenu
        }
    }
}

fn play_turn(game: &mut Game) -> Screen {
    print_board(game);
    println!("[1] Mode: Mine");
    println!("[2] Mode: Flag");
    println!("[3] Controls");
    println!("[4] Give Up");
    println!("{}", "_".repeat((2 * game.dimensions().0 + 3) as usize));

    let Some(input) = prompt("\nInput: ") else {
        return Screen::Quit;
    };

    match input.as_str() {
        "1" => {
            game.set_mode(Mode::Reveal);
            return Screen::Playing;
        }
        "2" => {
            game.set_mode(Mode::Flag);
            return Screen::Playing;
        }
        "3" => return Screen::Controls,
        "4" => {
            game.resign();
            return Screen::PostGame;
        }
        _ => {}
    }

    // Batched coordinates: out-of-range pairs are skipped, the rest of
    // the batch still runs.
    for token in input.split_whitespace() {
        let Some(pos) = parse_position(token) else {
            continue;
        };
        let _ = game.check_input(pos);
        if game.is_game_over() {
            return Screen::PostGame;
        }
    }

    Screen::Playing
}

fn post_game(game: &mut Game) -> Screen {
    if !game.did_win() {
        game.expose_board();
    }
    print_board(game);
    if game.did_win() {
        println!("\n  Y O U  W I N");
    } else {
        println!("\n  Y O U  L O S E");
    }

    println!("\nWhat now?");
    println!("[1] Play Again");
    println!("[2] Go Back to Menu");

    let Some(input) = prompt("\nInput: ") else {
        return Screen::Quit;
    };

    match input.as_str() {
        "1" => match game.restart() {
            Ok(()) => Screen::Playing,
            Err(e) => {
                eprintln!("Could not restart: {e}");
                Screen::MainMenu
            }
        },
        "2" => Screen::MainMenu,
        _ => Screen::PostGame,
    }
}

fn controls() -> Screen {
    println!("{}", "_".repeat(27));
    println!("      C O N T R O L S");
    println!();
    println!("Type the letter of the column and row");
    println!("of the cell you want to check.");
    println!();
    println!("Example:\nInput: AB\nChecks the cell at column A, row B.");
    println!();
    println!("You can check multiple cells at once");
    println!("by separating pairs with whitespace:");
    println!("Input: AB GD BC");
    println!("{}", "_".repeat(27));
    println!();
    println!("[1] Resume");

    match prompt("\nInput: ") {
        Some(input) if input == "1" => Screen::Playing,
        Some(_) => Screen::Controls,
        None => Screen::Quit,
    }
}

fn print_board(game: &Game) {
    let (columns, rows) = game.dimensions();
    println!();

    print!("X ");
    for col in 0..columns {
        print!("{} ", letter(col));
    }
    println!("X");

    for row in 0..rows {
        print!("{} ", letter(row));
        for col in 0..columns {
            let pos = Position::new(col as i32, row as i32);
            let glyph = game.cell_view(pos).unwrap_or('-');
            print!("{glyph} ");
        }
        println!("{}", letter(row));
    }

    print!("X ");
    for col in 0..columns {
        print!("{} ", letter(col));
    }
    println!("X");

    println!("{}", "_".repeat((2 * columns + 3) as usize));
    let mode = match game.mode() {
        Mode::Reveal => "Mine",
        Mode::Flag => "Flag",
    };
    println!("Flags: {}  Mode: {}\n", game.flags_left(), mode);
}

/// Column/row index shown as its `A`-based letter.
fn letter(index: u32) -> char {
    (b'A' + index as u8) as char
}

/// A two-letter token like `CA` addressed as (column, row); anything
/// else is not a coordinate.
fn parse_position(token: &str) -> Option<Position> {
    let mut chars = token.chars();
    let col = letter_index(chars.next()?)?;
    let row = letter_index(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    Some(Position::new(col, row))
}

fn letter_index(letter: char) -> Option<i32> {
    let upper = letter.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then_some(upper as i32 - 'A' as i32)
}

fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    io::stdout().flush().ok()?;

    let mut input = String::new();
    let read = io::stdin().read_line(&mut input).ok()?;
    if read == 0 {
        return None;
    }
    Some(input.trim().to_string())
}

fn prompt_number(label: &str) -> Option<i64> {
    loop {
        let input = prompt(label)?;
        match input.parse() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number"),
        }
    }
}
