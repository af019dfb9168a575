use hexcat_core::{Cell, Coord};
use std::str::FromStr;

/// One line typed at the prompt.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    /// Press at screen pixels.
    Tap { x: f32, y: f32 },
    /// Press at the centre of a board cell.
    Cell(Cell),
    Reset,
    /// Show the agent's current way out.
    Hint,
    /// Print the last drawn frame as JSON.
    Dump,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` takes {expected} arguments")]
    Arity {
        command: &'static str,
        expected: usize,
    },
    #[error("Not a number: `{0}`")]
    Number(String),
}

pub(crate) const HELP: &str = "\
tap X Y    press at screen pixel (X, Y)
cell C R   press at the centre of column C, row R
reset      start a new round
hint       show the agent's escape route
dump       print the last frame as JSON
quit       leave";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "tap" | "t" => {
                let [x, y] = arguments("tap", &args)?;
                Self::Tap {
                    x: number(x)?,
                    y: number(y)?,
                }
            }
            "cell" | "c" => {
                let [column, row] = arguments("cell", &args)?;
                Self::Cell(Cell::new(number::<Coord>(column)?, number::<Coord>(row)?))
            }
            "reset" | "r" => {
                arguments::<0>("reset", &args)?;
                Self::Reset
            }
            "hint" => Self::Hint,
            "dump" => Self::Dump,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };
        Ok(command)
    }
}

fn arguments<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], CommandError> {
    <[&str; N]>::try_from(args).map_err(|_| CommandError::Arity {
        command,
        expected: N,
    })
}

fn number<T: FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse()
        .map_err(|_| CommandError::Number(word.to_string()))
}
