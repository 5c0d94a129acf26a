//! permexpr CLI: inspect, compile and check permission expressions

use anyhow::Context;
use clap::{Parser, Subcommand};
use permexpr_core::{
    compile, parse, rewrite_file_contents, serialize, tokenize, Binding, Guard, OnError,
    RewriteOptions,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "permexpr", about = "Permission expression compiler", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of an expression
    Tokens { expr: String },
    /// Print the parsed AST as JSON
    Ast { expr: String },
    /// Compile an expression into a predicate
    Compile {
        expr: String,
        /// Print plain JSON instead of the embeddable form
        #[arg(long)]
        json: bool,
        /// Also list the permission names the predicate refers to
        #[arg(long)]
        permissions: bool,
    },
    /// Check an expression against granted permissions
    Check {
        expr: String,
        /// Comma-separated permission names
        #[arg(short, long, value_delimiter = ',')]
        grant: Vec<String>,
    },
    /// Rewrite directive literals in a component file
    Rewrite {
        file: PathBuf,
        /// Directive name without the `v-` prefix
        #[arg(long, default_value = "permission")]
        directive: String,
        /// Leave invalid directives in place instead of failing
        #[arg(long)]
        skip_errors: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Tokens { expr } => {
            for token in tokenize(&expr)? {
                println!("{:>4}  {:<12} {}", token.offset, token.human_kind(), token.text);
            }
        }
        Commands::Ast { expr } => {
            let ast = parse(tokenize(&expr)?)?;
            println!("{}", serde_json::to_string_pretty(&ast)?);
        }
        Commands::Compile { expr, json, permissions } => {
            let predicate = compile(&expr)?;
            let out = if json {
                serde_json::to_string(&predicate)?
            } else {
                serialize(&predicate)?
            };
            println!("{}", out);
            if permissions {
                for name in predicate.permissions() {
                    println!("{}", name);
                }
            }
        }
        Commands::Check { expr, grant } => {
            let granted: HashSet<String> = grant.into_iter().map(|p| p.trim().to_string()).collect();
            let decision = Guard::new().decide(&Binding::Source(expr), &granted)?;
            if decision.is_allowed() {
                println!("allow");
            } else {
                println!("deny");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Rewrite { file, directive, skip_errors } => {
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read '{}'", file.display()))?;
            let options = RewriteOptions::default()
                .directive(directive)
                .on_error(if skip_errors { OnError::Skip } else { OnError::Abort });
            let rewrite = rewrite_file_contents(&file, &source, &options)
                .with_context(|| format!("failed to rewrite '{}'", file.display()))?;
            tracing::info!(
                rewritten = rewrite.rewritten,
                skipped = rewrite.skipped,
                "rewrote {}",
                file.display()
            );
            print!("{}", rewrite.code);
        }
    }

    Ok(ExitCode::SUCCESS)
}
