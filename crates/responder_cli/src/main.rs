use std::error::Error;
use std::io::{self, BufRead, BufReader, Write};

use clap::Parser;
use clio::{Input, Output};
use responder::ResponseSelector;
use soulguide_model::ResponseTable;

/// CLI for trying out chat reply tables
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Message to answer. Without it every non-blank input line is answered.
    message: Option<String>,

    /// File containing messages, one per line
    #[clap(long, short, value_parser, default_value = "-")]
    input: Input,

    /// File containing reply table (built-in table when omitted)
    #[clap(long, value_parser)]
    responses: Option<Input>,

    /// Print the matched keyword before each reply
    #[clap(long)]
    show_keyword: bool,

    /// File to write output
    #[clap(long, short, value_parser, default_value = "-")]
    output: Output,
}

/// Non-blank lines of `input`. Blank lines separate messages, they are not
/// messages themselves.
fn read_messages(input: impl BufRead) -> io::Result<Vec<String>> {
    input
        .lines()
        .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .collect()
}

/// Writes exactly one reply line per message. A blank message matches no
/// keyword and gets a default reply.
fn answer(
    selector: &ResponseSelector,
    messages: impl IntoIterator<Item = String>,
    show_keyword: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    for message in messages {
        let message = message.trim();
        if show_keyword {
            let keyword = selector
                .matching_entry(message)
                .map(|e| e.keyword.as_str())
                .unwrap_or("(default)");
            write!(out, "[{keyword}] ")?;
        }
        writeln!(out, "{}", selector.select_response(message))?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = Args::parse();
    let selector = match args.responses {
        Some(f) => ResponseSelector::new(serde_yaml::from_reader::<_, ResponseTable>(f)?),
        None => ResponseSelector::default(),
    };

    let messages = match args.message {
        Some(message) => vec![message],
        None => read_messages(BufReader::new(args.input))?,
    };
    answer(&selector, messages, args.show_keyword, &mut args.output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use soulguide_model::{KeywordEntry, KeywordTable, Replies};

    fn selector() -> Result<ResponseSelector> {
        Ok(ResponseSelector::new(ResponseTable::new(
            KeywordTable::try_from(vec![KeywordEntry::new("aura", vec!["aura reply"])?])?,
            Replies::try_from(vec!["default reply"])?,
        )))
    }

    fn answer_to_string(
        messages: impl IntoIterator<Item = String>,
        show_keyword: bool,
    ) -> Result<String> {
        let mut out = Vec::new();
        answer(&selector()?, messages, show_keyword, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn owned(messages: &[&str]) -> Vec<String> {
        messages.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn one_reply_per_message() -> Result<()> {
        assert_eq!(
            answer_to_string(owned(&["Read my AURA", "hello"]), false)?,
            "aura reply\ndefault reply\n"
        );
        Ok(())
    }

    #[test]
    fn show_keyword_prefixes_replies() -> Result<()> {
        assert_eq!(
            answer_to_string(owned(&["  my aura is dim ", "hello"]), true)?,
            "[aura] aura reply\n[(default)] default reply\n"
        );
        Ok(())
    }

    #[test]
    fn blank_message_gets_default_reply() -> Result<()> {
        assert_eq!(answer_to_string(owned(&[" "]), true)?, "[(default)] default reply\n");
        Ok(())
    }

    #[test]
    fn blank_input_lines_are_skipped() -> Result<()> {
        let input: &[u8] = b"aura\n\n   \nhello\n";
        let messages = read_messages(input)?;
        assert_eq!(messages, vec!["aura", "hello"]);
        assert_eq!(answer_to_string(messages, false)?, "aura reply\ndefault reply\n");
        Ok(())
    }
}
