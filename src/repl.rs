//! Terminal loop: prompt, read a line, print feedback.

use std::io::{self, BufRead, Write};

use crate::game::{Game, Outcome};

pub const PROMPT: &str = "\nEnter a word: ";

pub fn banner() -> String {
    let rule = "=".repeat(40);
    format!(
        "\n{rule}\n🎮 CONTEXTO\nGoal: guess the secret word.\nHint: the number is the distance. #1 wins.\nCommands: sair (quit), desisto (give up), historico (history), dica (hint)\n{rule}"
    )
}

/// Run `game` until it is won, abandoned, or `input` reaches end of file.
pub fn run<R: BufRead, W: Write>(game: &mut Game, mut input: R, mut output: W) -> io::Result<()> {
    writeln!(output, "{}", banner())?;
    let mut line = String::new();
    while !game.is_over() {
        write!(output, "{PROMPT}")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let outcome = game.play(&line);
        report(game, &outcome, &mut output)?;
    }
    Ok(())
}

fn report<W: Write>(game: &Game, outcome: &Outcome, out: &mut W) -> io::Result<()> {
    match outcome {
        Outcome::Quit | Outcome::Empty => {}
        Outcome::GaveUp { secret } => writeln!(out, "The word was: {secret}")?,
        Outcome::History => write!(out, "{}", game.render_history())?,
        Outcome::Hint { word, rank } => writeln!(out, "💡 Hint: '{word}' is #{rank}")?,
        Outcome::NoHint => writeln!(out, "No hint available.")?,
        Outcome::UnknownWord(word) => {
            writeln!(out, " The word '{word}' is not in the dictionary.")?
        }
        Outcome::Repeated(g) => writeln!(out, " You already tried '{}' (#{}).", g.word, g.rank)?,
        Outcome::Ranked(_) => write!(out, "{}", game.render_history())?,
        Outcome::Won { secret, attempts } => {
            write!(out, "{}", game.render_history())?;
            writeln!(out, "\n CONGRATULATIONS! The word was {}", secret.to_uppercase())?;
            writeln!(out, "You got it in {attempts} attempts.")?;
        }
    }
    Ok(())
}
