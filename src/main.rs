use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use env_logger::{Builder, Env};
use log::{debug, info};

use monkeyc::{
    ast::ast::Program,
    errors::errors::ParseError,
    lexer::lexer::{tokenize, Lexer},
    parser::parser::Parser,
};

const PROMPT: &str = ">> ";

#[derive(ClapParser, Debug)]
#[command(version, about = "Tokenizes and parses scripts", long_about = None)]
struct Cli {
    /// Source file to parse. Starts the prompt when omitted
    file: Option<PathBuf>,

    /// Start the interactive prompt
    #[arg(long, conflicts_with = "file")]
    repl: bool,

    /// Print the token stream instead of the parsed program
    #[arg(long, requires = "file")]
    tokens: bool,

    /// Log parser activity at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Reads the contents of a file into a Vec<u8>
fn read_file(filename: &Path) -> Result<Vec<u8>> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn parse_bytes(source: &[u8]) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.errors().to_vec())
}

fn write_errors(out: &mut impl Write, errors: &[ParseError]) -> io::Result<()> {
    writeln!(out, "parser errors:")?;
    for error in errors {
        writeln!(out, "\t{}", error)?;
    }
    Ok(())
}

fn write_tokens(out: &mut impl Write, source: &[u8]) -> io::Result<()> {
    for token in tokenize(source) {
        writeln!(out, "{}", token)?;
    }
    Ok(())
}

/// Line-oriented prompt. Echoes each line's tokens, then its parse.
fn start_repl(input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("Failed to read line")?;

        if line == "exit" {
            writeln!(out, "Goodbye!")?;
            return Ok(());
        }

        write_tokens(out, line.as_bytes())?;

        let (program, errors) = parse_bytes(line.as_bytes());
        if errors.is_empty() {
            writeln!(out, "{}", program)?;
        } else {
            debug!("{} errors on line {:?}", errors.len(), line);
            write_errors(out, &errors)?;
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.verbose);

    info!("CLI arguments: {:?}", args);

    let filename = match &args.file {
        Some(filename) => filename,
        None => {
            let stdin = io::stdin();
            return start_repl(stdin.lock(), &mut io::stdout());
        }
    };

    let buf = read_file(filename)?;
    let mut stdout = io::stdout();

    if args.tokens {
        write_tokens(&mut stdout, &buf)?;
        return Ok(());
    }

    let (program, errors) = parse_bytes(&buf);
    info!("Parsed {} statements", program.len());

    if !errors.is_empty() {
        write_errors(&mut stdout, &errors)?;
        std::process::exit(65);
    }

    writeln!(stdout, "{}", program)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flag_conflicts() {
        assert!(Cli::try_parse_from(["monkeyc", "--repl", "main.mk"]).is_err());
        assert!(Cli::try_parse_from(["monkeyc", "--tokens"]).is_err());
        assert!(Cli::try_parse_from(["monkeyc", "--tokens", "main.mk"]).is_ok());
        assert!(Cli::try_parse_from(["monkeyc", "--repl"]).is_ok());
    }

    #[test]
    fn test_repl_echoes_tokens_and_program() {
        let input = "let a = 1;\nexit\n".as_bytes();
        let mut out = Vec::new();

        start_repl(input, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with(">> Token type: LET, Token literal: let\n"));
        assert!(out.contains("let a = 1;\n"));
        assert!(out.ends_with(">> Goodbye!\n"));
    }

    #[test]
    fn test_repl_reports_errors() {
        let mut out = Vec::new();

        start_repl("let x 5;\n".as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("parser errors:\n\texpected next token to be =, got INT instead\n"));
    }
}
