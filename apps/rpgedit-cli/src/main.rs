use clap::{Parser, Subcommand};
use rpgedit_host::{FsHost, Host, join_path};
use rpgedit_project::Manifest;
use rpgedit_schema::{ActorData, AnimationState, AssetKind, Direction, MapData, parse_str};
use rpgedit_workspace::{ExportError, Exporter, WorkspaceController};
use std::process::Command;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rpgedit-cli", about = "CLI tool for rpgedit workspaces")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Workspace folder (the one holding project.json)
    #[arg(short, long, default_value = ".")]
    workspace: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print tool version and workspace contents
    Info,
    /// Parse every listed asset and report problems
    Validate,
    /// Create a new map asset and list it in the manifest
    NewMap { name: String },
    /// Create a new actor asset and list it in the manifest
    NewActor { name: String },
    /// Resize a map grid
    Resize {
        map: String,
        #[arg(long)]
        rows: usize,
        #[arg(long)]
        cols: usize,
    },
    /// Add an event script to an actor
    AddEvent {
        actor: String,
        name: String,
        /// Script body
        #[arg(long, default_value = "")]
        code: String,
    },
    /// Append a keyframe to one animation list of an actor
    AddKeyframe {
        actor: String,
        /// idle or moving
        #[arg(long, default_value = "idle")]
        state: AnimationState,
        /// left, right, up or down
        #[arg(long, default_value = "left")]
        direction: Direction,
    },
    /// Run an external build program over the workspace
    Export {
        program: String,
        /// Extra arguments passed before the workspace folder
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
}

/// Runs a build program as `program [args..] <root>`.
struct CommandExporter {
    program: String,
    args: Vec<String>,
}

impl Exporter for CommandExporter {
    fn export(&mut self, root: &str, manifest: &Manifest) -> Result<(), ExportError> {
        println!("==> Running {} over {} assets", self.program, manifest.len());
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(root)
            .status()
            .map_err(|e| ExportError(format!("{}: {e}", self.program)))?;
        if !status.success() {
            return Err(ExportError(format!("{} exited with {status}", self.program)));
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    run(&cli.workspace, cli.command, FsHost::assume(true))
}

fn run<H: Host>(root: &str, command: Commands, host: H) -> anyhow::Result<()> {
    let mut ctl = match &command {
        Commands::Export { program, args } => {
            WorkspaceController::new(host).with_exporter(CommandExporter {
                program: program.clone(),
                args: args.clone(),
            })
        }
        _ => WorkspaceController::new(host),
    };
    ctl.load_workspace(root)?;

    match command {
        Commands::Info => {
            println!("rpgedit-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("workspace: {root}");
            if let Some(manifest) = ctl.manifest() {
                for kind in AssetKind::ALL {
                    let entries = manifest.entries(kind);
                    println!("{kind}s: {}", entries.len());
                    for entry in entries {
                        println!("  {entry}");
                    }
                }
            }
            println!("max grid dimension: {}", rpgedit_author::MAX_GRID_DIMENSION);
        }
        Commands::Validate => {
            let failures = validate(&mut ctl, root);
            if failures > 0 {
                anyhow::bail!("{failures} asset(s) failed validation");
            }
            println!("All assets valid");
        }
        Commands::NewMap { name } => {
            ctl.new_asset(AssetKind::Map, &name)?;
            println!("Created map {name}");
        }
        Commands::NewActor { name } => {
            ctl.new_asset(AssetKind::Actor, &name)?;
            println!("Created actor {name}");
        }
        Commands::Resize { map, rows, cols } => {
            ctl.open_document(AssetKind::Map, &map)?;
            let changed = ctl.edit_map(|doc, host| doc.resize(host, rows, cols))?;
            if changed {
                ctl.save()?;
                println!("Resized {map} to {rows}x{cols}");
            } else {
                println!("{map} is already {rows}x{cols}");
            }
        }
        Commands::AddEvent { actor, name, code } => {
            ctl.open_document(AssetKind::Actor, &actor)?;
            ctl.edit_actor(|doc, host| doc.add_event(host, &name, &code))?;
            ctl.save()?;
            println!("Added event {name} to {actor}");
        }
        Commands::AddKeyframe {
            actor,
            state,
            direction,
        } => {
            ctl.open_document(AssetKind::Actor, &actor)?;
            let count = ctl.edit_actor(|doc, host| {
                doc.add_keyframe(host, state, direction);
                Ok(doc.data().keyframes(state, direction).len())
            })?;
            ctl.save()?;
            println!("{actor} {state}/{direction} now has {count} keyframes");
        }
        Commands::Export { .. } => {
            ctl.export()?;
            println!("Export finished");
        }
    }

    Ok(())
}

/// Parse every listed asset; returns the number of failures.
fn validate<H: Host>(ctl: &mut WorkspaceController<H>, root: &str) -> usize {
    let Some(manifest) = ctl.manifest().cloned() else {
        return 0;
    };
    let mut failures = 0;
    for kind in AssetKind::ALL {
        for entry in manifest.entries(kind) {
            let path = join_path(root, entry);
            let result = ctl
                .host_mut()
                .read_file(&path)
                .map_err(anyhow::Error::from)
                .and_then(|body| {
                    let parsed = match kind {
                        AssetKind::Map => parse_str::<MapData>(&body).map(|_| ()),
                        AssetKind::Actor => parse_str::<ActorData>(&body).map(|_| ()),
                    };
                    parsed.map_err(anyhow::Error::from)
                });
            match result {
                Ok(()) => println!("ok    {kind} {entry}"),
                Err(e) => {
                    failures += 1;
                    tracing::warn!(%path, "validation failed: {e}");
                    println!("FAIL  {kind} {entry}: {e}");
                }
            }
        }
    }
    failures
}
