use mindtree_core::{LayoutConfig, MindmapSession, TreeNode};
use mindtree_render::{SvgRenderOptions, render_svg};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MINDTREE_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Mindmap(mindtree_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "error: I/O error: {err}"),
            CliError::Mindmap(err) => write!(f, "error: {err}"),
            CliError::Json(err) => write!(f, "error: JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<mindtree_core::Error> for CliError {
    fn from(value: mindtree_core::Error) -> Self {
        Self::Mindmap(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Render,
    Seed,
}

/// Collapse-state changes applied after the tree is loaded, in command-line order.
#[derive(Debug, Clone)]
enum StateOp {
    Toggle(String),
    Reveal(String),
    ExpandAll,
    CollapseAll,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    ops: Vec<StateOp>,
    diagram_id: Option<String>,
    no_toggles: bool,
    out: Option<String>,
}

fn usage() -> &'static str {
    "mindtree\n\
\n\
USAGE:\n\
  mindtree [layout] [--pretty] [--config <path>] [STATE...] [<path>|-]\n\
  mindtree render [--config <path>] [--id <svg-id>] [--no-toggles] [--out <path>] [STATE...] [<path>|-]\n\
  mindtree seed [--pretty] [STATE...] [<path>|-]\n\
\n\
STATE (applied in order after the default seeding):\n\
  --toggle <id>      flip one node between collapsed and expanded\n\
  --reveal <id>      expand every ancestor of <id>\n\
  --expand-all       show the whole tree (alias: --no-seed)\n\
  --collapse-all     collapse every node with children, the root included\n\
\n\
NOTES:\n\
  - Input is a JSON tree: {\"id\", \"label\", \"type\": \"root\"|\"child\"|\"code\", \"children\": [...]}.\n\
  - If <path> is omitted or '-', input is read from stdin. Empty input or `null` lays out an empty canvas.\n\
  - layout prints the positioned nodes and edges as JSON; render prints SVG; seed prints collapsed ids.\n\
  - Set MINDTREE_LOG (e.g. `debug`) to enable logging on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "seed" => args.command = Command::Seed,
            "--pretty" => args.pretty = true,
            "--no-toggles" => args.no_toggles = true,
            "--expand-all" | "--no-seed" => args.ops.push(StateOp::ExpandAll),
            "--collapse-all" => args.ops.push(StateOp::CollapseAll),
            "--toggle" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.ops.push(StateOp::Toggle(id.clone()));
            }
            "--reveal" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.ops.push(StateOp::Reveal(id.clone()));
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn to_json(value: &impl Serialize, pretty: bool) -> Result<String, CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    Ok(text)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_config(path: Option<&str>) -> Result<LayoutConfig, CliError> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    Ok(LayoutConfig::from_json_str(&text)?)
}

fn apply_ops(session: &mut MindmapSession, ops: &[StateOp]) {
    for op in ops {
        match op {
            StateOp::Toggle(id) => {
                if !session.toggle(id) {
                    tracing::warn!(id = %id, "--toggle ignored: not a node with children");
                }
            }
            StateOp::Reveal(id) => {
                if !session.reveal(id) {
                    tracing::warn!(id = %id, "--reveal ignored: node not in tree");
                }
            }
            StateOp::ExpandAll => session.expand_all(),
            StateOp::CollapseAll => session.collapse_all(),
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let text = read_input(args.input.as_deref())?;

    let mut session = MindmapSession::new(config);
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        tracing::info!("no tree in input; laying out an empty canvas");
    } else {
        session.load(TreeNode::from_json_str(trimmed)?)?;
    }
    apply_ops(&mut session, &args.ops);

    let output = match args.command {
        Command::Layout => to_json(session.layout(), args.pretty)?,
        Command::Seed => to_json(session.collapsed(), args.pretty)?,
        Command::Render => {
            let mut options = SvgRenderOptions {
                show_toggles: !args.no_toggles,
                ..SvgRenderOptions::default()
            };
            if let Some(id) = args.diagram_id {
                options.diagram_id = id;
            }
            render_svg(session.layout(), &options)
        }
    };
    write_text(&output, args.out.as_deref())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
