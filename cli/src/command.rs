use anyhow::{Context, Result, bail};
use delve_core::{Coord, Coord2};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Dig(Coord2),
    New,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        let command = match verb {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut words)?),
            "d" | "dig" => Self::Dig(parse_coords(&mut words)?),
            "n" | "new" => Self::New,
            "q" | "quit" => Self::Quit,
            other => bail!("unknown command {other:?}"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument {extra:?}");
        }
        Ok(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let mut next = |name: &str| -> Result<Coord> {
        let word = words.next().with_context(|| format!("missing {name}"))?;
        word.parse()
            .with_context(|| format!("{name} must be a number between 0 and {}", Coord::MAX))
    };
    let row = next("row")?;
    let col = next("column")?;
    Ok((row, col))
}

pub const HELP: &str = "\
commands:
  r ROW COL   reveal a tile
  f ROW COL   place or remove a flag
  d ROW COL   dig up an object (o) from an opened empty tile
  n           new game
  q           quit";
