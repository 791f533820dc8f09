use std::{fs, path::PathBuf, process};

use clap::Parser;
use log::info;
use palu::{
    compile, cst::validate::validate, display_error, transpiler::transpiler::TranspileOptions,
};

#[derive(Parser)]
#[command(name = "paluc")]
#[command(about = "Transpiles palu source files to C")]
#[command(version)]
struct Cli {
    /// Input palu source file
    input: PathBuf,

    /// Output C file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit includes and builtin typedefs before the code
    #[arg(long)]
    prelude: bool,

    /// Print the concrete syntax tree and stop
    #[arg(long)]
    dump_tree: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let file_name = cli.input.display().to_string();
    let content = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", file_name, e);
            process::exit(1);
        }
    };

    if cli.dump_tree {
        let tree = palu::parser::parser::parse(&content);
        println!("{}", tree.root_node().to_sexp());

        if let Err(error) = validate(&tree) {
            display_error(&error, &file_name, &content);
            process::exit(1);
        }
        return;
    }

    let options = TranspileOptions {
        emit_prelude: cli.prelude,
    };

    let code = match compile(&content, &options) {
        Ok(code) => code,
        Err(error) => {
            display_error(&error, &file_name, &content);
            process::exit(1);
        }
    };

    match cli.output {
        Some(output) => {
            if let Err(e) = fs::write(&output, code) {
                eprintln!("Error: cannot write {}: {}", output.display(), e);
                process::exit(1);
            }
            info!("wrote {}", output.display());
        }
        None => println!("{}", code),
    }
}
