use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use stql_core::function_catalog::{self, FunctionFamily};

/// One `cargo` invocation of the precommit pipeline.
struct Step {
    label: &'static str,
    subcommand: &'static str,
    packages: &'static [&'static str],
    args: &'static [&'static str],
    /// Starts PostGIS containers, or uses `STQL_DATABASE_URL`.
    needs_postgis: bool,
}

const DIESEL_PG: &[&str] = &["-p", "stql-diesel", "--features", "postgres"];

const STEPS: &[Step] = &[
    Step {
        label: "format",
        subcommand: "fmt",
        packages: &["--all"],
        args: &["--", "--check"],
        needs_postgis: false,
    },
    Step {
        label: "lint",
        subcommand: "clippy",
        packages: &["-p", "stql-core", "-p", "stql-diesel", "--features", "postgres"],
        args: &["--all-targets", "--", "-D", "warnings"],
        needs_postgis: false,
    },
    Step {
        label: "core tests",
        subcommand: "test",
        packages: &["-p", "stql-core"],
        args: &[],
        needs_postgis: false,
    },
    Step {
        label: "sql shape tests",
        subcommand: "test",
        packages: DIESEL_PG,
        args: &["--test", "expression_methods", "--test", "catalog_coverage"],
        needs_postgis: false,
    },
    Step {
        label: "postgis type tests",
        subcommand: "test",
        packages: DIESEL_PG,
        args: &["--test", "postgres_types"],
        needs_postgis: true,
    },
    Step {
        label: "postgis integration tests",
        subcommand: "test",
        packages: DIESEL_PG,
        args: &["--test", "postgres_integration"],
        needs_postgis: true,
    },
];

enum Task {
    Precommit { full: bool },
    Catalog { sql_name: Option<String> },
    Help,
}

fn main() -> ExitCode {
    let outcome = parse_task(env::args().skip(1)).and_then(|task| match task {
        Task::Precommit { full } => precommit(full),
        Task::Catalog { sql_name } => {
            print_catalog(sql_name.as_deref());
            Ok(())
        }
        Task::Help => {
            print_usage();
            Ok(())
        }
    });
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask: {e}");
            ExitCode::FAILURE
        }
    }
}

fn parse_task(mut args: impl Iterator<Item = String>) -> Result<Task, String> {
    let Some(name) = args.next() else {
        print_usage();
        return Err("no task given".to_string());
    };
    match name.as_str() {
        "precommit" => {
            let flags: Vec<String> = args.collect();
            match flags.as_slice() {
                [] => Ok(Task::Precommit { full: false }),
                [flag] if flag == "--full" => Ok(Task::Precommit { full: true }),
                _ => Err(format!("precommit takes only --full, got {flags:?}")),
            }
        }
        "catalog" => Ok(Task::Catalog {
            sql_name: args.next(),
        }),
        "help" | "--help" | "-h" => Ok(Task::Help),
        other => {
            print_usage();
            Err(format!("no task named {other:?}"))
        }
    }
}

fn print_usage() {
    eprintln!("usage: cargo run -p xtask -- <task>");
    eprintln!("  precommit [--full]   format, lint and offline tests; --full adds PostGIS suites");
    eprintln!("  catalog [SQL_NAME]   bound PostGIS functions by family, or one name's overloads");
}

fn workspace_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.parent().unwrap_or(manifest).to_path_buf()
}

fn precommit(full: bool) -> Result<(), String> {
    let root = workspace_root();
    let selected = STEPS.iter().filter(|step| full || !step.needs_postgis);
    for step in selected {
        let args = [&[step.subcommand][..], step.packages, step.args].concat();
        eprintln!("[{}] cargo {}", step.label, args.join(" "));

        let status = Command::new("cargo")
            .args(&args)
            .current_dir(&root)
            .status()
            .map_err(|e| format!("{}: cannot start cargo: {e}", step.label))?;
        if !status.success() {
            return Err(format!("{} failed ({status})", step.label));
        }
    }
    Ok(())
}

/// Print catalogue entries grouped by family, or the overloads of one SQL name.
fn print_catalog(sql_name: Option<&str>) {
    if let Some(name) = sql_name {
        for spec in function_catalog::overloads(name) {
            println!("{:<32} {:?} -> {:?}", spec.method, spec.params, spec.returns);
        }
        return;
    }

    for family in [
        FunctionFamily::Io,
        FunctionFamily::Constructor,
        FunctionFamily::Accessor,
        FunctionFamily::Processing,
        FunctionFamily::Editor,
        FunctionFamily::Affine,
        FunctionFamily::Validation,
    ] {
        println!("{family:?}");
        for spec in function_catalog::family(family) {
            let side = if spec.server_side_only { "server" } else { "client" };
            println!("  {:<32} {:<26} {}/{}", spec.method, spec.sql_name, spec.n_arg(), side);
        }
    }
}
