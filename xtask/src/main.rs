use std::fs;
use std::path::{Path, PathBuf};
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the SMS resource workspace",
    long_about = "A unified CLI for CI checks and for packaging the check/in/out\n\
                  binaries into the Concourse resource image layout."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build the resource binaries and stage them as opt/resource/{check,in,out}
    Package {
        /// Compilation target triple for the resource binaries
        #[arg(long, default_value = "x86_64-unknown-linux-musl")]
        target: String,
        /// Build profile used for binaries
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory the opt/resource tree is created under
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Lint,
    /// Unit and binary tests
    Test,
    /// Run lint + test
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

/// Cargo binary name and the file name Concourse invokes it by.
const RESOURCE_BINARIES: [(&str, &str); 3] = [
    ("resource_check", "check"),
    ("resource_in", "in"),
    ("resource_out", "out"),
];

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn package_resource(target: &str, profile: BuildProfile, output: &Path) {
    ensure_rust_target_installed(target);

    step("Build resource binaries");

    let mut cargo_args = vec!["build", "-p", "sms_resource_sns", "--target", target];
    for (bin_name, _) in RESOURCE_BINARIES {
        cargo_args.extend(["--bin", bin_name]);
    }
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);

    step("Stage opt/resource layout");
    let target_dir = Path::new("target").join(target).join(profile.dir_name());
    let resource_dir = output.join("opt").join("resource");
    fs::create_dir_all(&resource_dir).expect("failed to create resource directory");

    for (bin_name, resource_name) in RESOURCE_BINARIES {
        stage_binary(
            &target_dir.join(binary_name(bin_name, target)),
            &resource_dir.join(resource_name),
        );
    }

    eprintln!("\nStaged resource:\n- {}", resource_dir.display());
}

fn ensure_rust_target_installed(target: &str) {
    let output = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output();

    let output = match output {
        Ok(value) => value,
        Err(error) => {
            eprintln!(
                "warning: failed to run `rustup target list --installed` ({error}); continuing without target preflight"
            );
            return;
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "failed to list installed rust targets; run `rustup target list --installed` manually. details: {}",
            stderr.trim()
        );
    }

    let installed = String::from_utf8_lossy(&output.stdout);
    if !installed.lines().any(|line| line.trim() == target) {
        panic!(
            "required rust target `{target}` is not installed. install it with `rustup target add {target}` and re-run `cargo run -p xtask -- package`"
        );
    }
}

fn binary_name(bin_name: &str, target: &str) -> String {
    if target.contains("windows") {
        format!("{bin_name}.exe")
    } else {
        bin_name.to_string()
    }
}

fn stage_binary(binary_path: &Path, destination: &Path) {
    if !binary_path.exists() {
        panic!("expected resource binary at '{}'", binary_path.display());
    }

    fs::copy(binary_path, destination).unwrap_or_else(|error| {
        panic!(
            "failed to copy '{}' to '{}': {error}",
            binary_path.display(),
            destination.display()
        )
    });
    set_executable(destination);
}

#[cfg(unix)]
fn set_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("failed to mark resource binary executable");
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) {}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_lint() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);
}

fn ci_test() {
    step("Test sms_resource_core");
    run_cargo(&["test", "-p", "sms_resource_core"]);

    step("Test sms_resource_sns");
    run_cargo(&["test", "-p", "sms_resource_sns"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { job } => {
            match job {
                CiJob::Lint => ci_lint(),
                CiJob::Test => ci_test(),
                CiJob::Check => {
                    ci_lint();
                    ci_test();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::Package {
            target,
            profile,
            output,
        } => {
            package_resource(&target, profile, &output);
        }
    }
}
