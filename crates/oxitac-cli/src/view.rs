use oxitac_engine::{Board, Cell, CellIndex, Mark, Outcome, SessionObserver};

/// Renders the board as a 3x3 grid; empty cells show their index.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..3 {
        if row > 0 {
            out.push_str("---+---+---\n");
        }
        let cells: Vec<String> = (0..3)
            .filter_map(|col| CellIndex::new(row * 3 + col))
            .map(|index| match board.get(index) {
                Cell::Empty => index.to_string(),
                cell => cell.to_string(),
            })
            .collect();
        out.push_str(&format!(" {} \n", cells.join(" | ")));
    }
    out
}

/// What the computer says about the game after choosing its move.
pub fn forecast_message(forecast: Outcome) -> &'static str {
    match forecast {
        Outcome::WinForA => "Soon you are going to WIN :)",
        Outcome::WinForB => "Soon you are going to LOSE :(",
        Outcome::Draw => "This game is headed towards a DRAW!",
    }
}

pub fn result_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::WinForA => "You WIN!",
        Outcome::WinForB => "You LOSE!",
        Outcome::Draw => "It's a DRAW!",
    }
}

/// Announces every accepted move and the final result on stdout.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn move_applied(&mut self, index: CellIndex, mark: Mark) {
        println!("{mark} plays {index}");
    }

    fn terminal(&mut self, outcome: Outcome) {
        println!("{}", result_message(outcome));
    }
}
