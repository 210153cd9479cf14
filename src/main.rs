use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process,
    rc::Rc,
};

use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use quill::{
    evaluate,
    interpreter::{environment::Context, value::ValueKind},
};

/// quill is a small dynamically typed scripting language.
///
/// Without a script or file, quill starts an interactive prompt.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Run the script stored in this file.
    #[arg(short, long, value_name = "PATH", conflicts_with = "script")]
    file: Option<PathBuf>,

    /// Log interpreter stages at debug level. `RUST_LOG` overrides this.
    #[arg(short, long)]
    debug: bool,

    /// A script to run directly.
    script: Option<String>,
}

fn main() {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let root = Context::global();

    if let Some(path) = &args.file {
        let script = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read the input file '{}': {e}", path.display());
            process::exit(1);
        });
        run_once(&root, &path.display().to_string(), &script);
    } else if let Some(script) = &args.script {
        run_once(&root, "<script>", script);
    } else {
        repl(&root);
    }
}

/// Runs one program, printing its value; exits with status 1 on error.
fn run_once(root: &Rc<Context>, name: &str, script: &str) {
    match evaluate(root, name, script) {
        Ok(value) if value.kind != ValueKind::Null => println!("{value}"),
        Ok(_) => {},
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}

/// Reads and evaluates lines until `exit` or end of input.
///
/// All lines share one root context, so definitions carry over.
fn repl(root: &Rc<Context>) {
    info!("starting interactive prompt");
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {},
        }

        let input = line.trim_end_matches(['\n', '\r']);
        if input.trim().is_empty() {
            continue;
        }
        if input.trim() == "exit" {
            break;
        }

        match evaluate(root, "<stdin>", input) {
            Ok(value) if value.kind != ValueKind::Null => println!("{value}"),
            Ok(_) => {},
            Err(e) => eprintln!("{e}"),
        }
    }
    debug!("leaving interactive prompt");
}
