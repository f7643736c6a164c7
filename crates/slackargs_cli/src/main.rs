use std::error::Error;
use std::io::{BufRead as _, BufReader, Write as _};
use std::process::ExitCode;

use clap::Parser;
use clio::{Input, Output};
use slackargs::{parse_args, strip_formatting};

/// Splits slash command lines into arguments, one JSON array per input line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File containing command lines
    #[clap(long, short, value_parser, default_value = "-")]
    input: Input,

    /// Strip surrounding *bold*, ~strike~ and _italic_ markers before splitting
    #[clap(long)]
    strip_formatting: bool,

    /// File to write output
    #[clap(long, short, value_parser, default_value = "-")]
    output: Output,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let mut args = Args::parse();
    let mut failed = false;
    for (n, line) in BufReader::new(args.input).lines().enumerate() {
        let line = line?;
        let text = if args.strip_formatting {
            strip_formatting(line.trim())
        } else {
            line.as_str()
        };
        match parse_args(text) {
            Ok(tokens) => writeln!(args.output, "{}", serde_json::to_string(&tokens)?)?,
            Err(e) => {
                eprintln!("line {}: {e}", n + 1);
                failed = true;
            }
        }
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
