use facet::Facet;
use figue as args;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

type AnyResult<T> = Result<T, String>;

/// Library crates whose behaviour changes with the feature set. The examples
/// crate is left out: it turns `diagnostics` on, and selecting it would unify
/// that feature into every run.
const LIBRARY_PACKAGES: &[&str] = &["stackmark", "stackmark-core", "stackmark-types"];

/// One `cargo test` invocation of the matrix.
struct FeatureSet {
    name: &'static str,
    features: &'static [&'static str],
}

const MATRIX: &[FeatureSet] = &[
    FeatureSet {
        name: "disabled",
        features: &[],
    },
    FeatureSet {
        name: "diagnostics",
        features: &["stackmark/diagnostics"],
    },
    FeatureSet {
        name: "diagnostics-all-subsystems",
        features: &[
            "stackmark/diagnostics",
            "stackmark/mpi",
            "stackmark/cellml",
            "stackmark/fieldml",
            "stackmark/petsc",
        ],
    },
    FeatureSet {
        name: "no-checks",
        features: &["stackmark/no-checks"],
    },
    FeatureSet {
        name: "no-prechecks",
        features: &["stackmark/no-prechecks"],
    },
];

#[derive(Facet, Debug)]
struct Cli {
    #[facet(flatten)]
    builtins: args::FigueBuiltins,
    #[facet(args::subcommand)]
    command: CommandKind,
}

#[derive(Facet, Debug)]
#[repr(u8)]
enum CommandKind {
    /// Run the library tests once per feature set.
    TestMatrix {
        /// Run a single feature set by name.
        #[facet(args::named, default)]
        only: Option<String>,
    },
    /// Print the feature sets without running them.
    ListMatrix,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> AnyResult<()> {
    let cli = parse_cli()?;
    match cli.command {
        CommandKind::TestMatrix { only } => test_matrix(only.as_deref()),
        CommandKind::ListMatrix => {
            for set in MATRIX {
                println!("{:<28} {}", set.name, describe(set));
            }
            Ok(())
        }
    }
}

fn parse_cli() -> AnyResult<Cli> {
    let figue_config = args::builder::<Cli>()
        .map_err(|e| format!("failed to build CLI schema: {e}"))?
        .cli(|cli| cli.strict())
        .help(|h| {
            h.program_name("xtask")
                .description("Workspace maintenance tasks")
                .version(option_env!("CARGO_PKG_VERSION").unwrap_or("dev"))
        })
        .build();

    args::Driver::new(figue_config)
        .run()
        .into_result()
        .map(|v| v.value)
        .map_err(|e| e.to_string())
}

fn test_matrix(only: Option<&str>) -> AnyResult<()> {
    let selected: Vec<&FeatureSet> = MATRIX
        .iter()
        .filter(|set| only.is_none_or(|name| set.name == name))
        .collect();
    if selected.is_empty() {
        let names: Vec<&str> = MATRIX.iter().map(|set| set.name).collect();
        return Err(format!(
            "unknown feature set {:?}; expected one of: {}",
            only.unwrap_or_default(),
            names.join(", ")
        ));
    }

    let root_dir = workspace_root()?;
    let mut failed = Vec::new();
    for set in selected {
        println!("==> {} ({})", set.name, describe(set));
        let status = cargo_test(&root_dir, set)?;
        if !status.success() {
            eprintln!("==> {} failed: {}", set.name, format_status(status));
            failed.push(set.name);
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(format!("feature sets failed: {}", failed.join(", ")))
    }
}

fn cargo_test(root_dir: &std::path::Path, set: &FeatureSet) -> AnyResult<ExitStatus> {
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_owned());
    let mut cmd = Command::new(cargo);
    cmd.current_dir(root_dir).arg("test");
    for package in LIBRARY_PACKAGES {
        cmd.args(["-p", package]);
    }
    if !set.features.is_empty() {
        cmd.args(["--features", &set.features.join(",")]);
    }
    cmd.stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| format!("failed to spawn cargo for {}: {e}", set.name))
}

fn describe(set: &FeatureSet) -> String {
    if set.features.is_empty() {
        "default features".to_owned()
    } else {
        set.features.join(",")
    }
}

fn workspace_root() -> AnyResult<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .ok_or_else(|| "xtask must live under <root>/crates/xtask".to_owned())
}

fn format_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {code}"),
        None => "signal".to_owned(),
    }
}
