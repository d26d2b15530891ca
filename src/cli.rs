use clap::{ArgAction, Parser, Subcommand};
use log::{LevelFilter, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use redblack::audit::Audit;
use redblack::error::{Result, TreeError};
use redblack::rbtree::Tree;
use redblack::traversal::Annotate;
use redblack::tree::SortedCollection;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "rbtree")]
#[command(about = "Drive and time a red-black tree")]
struct Args {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Time inserts, lookups and removals over 0..size
    Bench {
        #[arg(long, default_value = "100000")]
        size: usize,

        #[arg(long)]
        seed: Option<u64>,

        /// Insert in random order instead of ascending
        #[arg(long)]
        shuffle: bool,
    },
    /// Apply operations in order and print the resulting tree
    Exec {
        /// Annotate dumps with node colors
        #[arg(long)]
        color: bool,

        /// insert=<n>, remove=<n>, contains=<n>, or a bare <n> to insert
        #[arg(value_parser = parse_op, allow_negative_numbers = true)]
        ops: Vec<Op>,
    },
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Insert(Option<i64>),
    Remove(Option<i64>),
    Contains(Option<i64>),
}

fn parse_op(s: &str) -> std::result::Result<Op, String> {
    let (name, operand) = match s.split_once('=') {
        Some((name, operand)) => (name, operand),
        None if s.parse::<i64>().is_ok() => ("insert", s),
        None => (s, ""),
    };
    let value = match operand.trim() {
        "" => None,
        n => Some(n.parse::<i64>().map_err(|e| format!("bad operand {n:?}: {e}"))?),
    };
    match name {
        "insert" => Ok(Op::Insert(value)),
        "remove" => Ok(Op::Remove(value)),
        "contains" => Ok(Op::Contains(value)),
        other => Err(format!("unknown operation {other:?}")),
    }
}

fn apply(tree: &mut Tree<i64>, op: Op) -> Result<String> {
    match op {
        Op::Insert(value) => {
            tree.insert(value.ok_or(TreeError::NullValue)?)?;
            Ok("ok".to_string())
        }
        Op::Remove(value) => {
            tree.remove(&value.ok_or(TreeError::NullValue)?)?;
            Ok("ok".to_string())
        }
        Op::Contains(value) => {
            let found = tree.contains(&value.ok_or(TreeError::NullValue)?);
            Ok(found.to_string())
        }
    }
}

fn describe(op: Op) -> String {
    let (name, value) = match op {
        Op::Insert(v) => ("insert", v),
        Op::Remove(v) => ("remove", v),
        Op::Contains(v) => ("contains", v),
    };
    match value {
        Some(v) => format!("{name} {v}"),
        None => name.to_string(),
    }
}

fn print_audit(audit: &Audit) {
    println!(
        "audit: reachable={} ordered={} root_black={} red_red={} black_height={} valid={}",
        audit.reachable,
        audit.ordered,
        audit.root_black,
        audit.red_red,
        audit
            .black_height
            .map_or_else(|| "mixed".to_string(), |h| h.to_string()),
        audit.is_red_black()
    );
}

fn exec(ops: Vec<Op>, color: bool) -> ExitCode {
    let annotate = if color { Annotate::Colored } else { Annotate::Plain };
    let mut tree = Tree::new();
    let mut failed = false;
    for op in ops {
        match apply(&mut tree, op) {
            Ok(outcome) => println!("{}: {outcome}", describe(op)),
            Err(e) => {
                warn!("{} failed: {e}", describe(op));
                println!("{}: error: {e}", describe(op));
                failed = true;
            }
        }
    }

    println!("level order: {}", tree.level_order_listing(annotate));
    println!("in order: {}", tree.in_order_listing(annotate));
    print_audit(&tree.audit());

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn bench(size: usize, seed: Option<u64>, shuffle: bool) -> ExitCode {
    let mut values: Vec<usize> = (0..size).collect();
    if shuffle {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        values.shuffle(&mut rng);
    }

    println!(
        "Running with {} node count ({} order)",
        size,
        if shuffle { "shuffled" } else { "ascending" }
    );

    let mut tree = Tree::new();
    let start = Instant::now();
    for (i, &value) in values.iter().enumerate() {
        assert_eq!(tree.len(), i);
        if let Err(e) = tree.insert(value) {
            eprintln!("insert {value} failed: {e}");
            return ExitCode::FAILURE;
        }
    }
    let inserted = Instant::now();
    info!("inserted {} values, height {}", tree.len(), tree.height());

    for value in values.iter() {
        assert!(tree.contains(value));
    }
    let checked_contains = Instant::now();

    let audit = tree.audit();
    let height = tree.height();

    let checked_audit = Instant::now();
    for value in values.iter() {
        if let Err(e) = tree.remove(value) {
            eprintln!("remove {value} failed: {e}");
            return ExitCode::FAILURE;
        }
    }
    let end = Instant::now();

    println!(
        "Inserts took {} seconds",
        inserted.saturating_duration_since(start).as_secs_f32()
    );
    println!(
        "Checking contains took {} seconds",
        checked_contains
            .saturating_duration_since(inserted)
            .as_secs_f32()
    );
    println!(
        "Removals took {} seconds",
        end.saturating_duration_since(checked_audit).as_secs_f32()
    );
    println!(
        "Total {} seconds",
        end.saturating_duration_since(start).as_secs_f32()
    );
    println!("Height after inserts {height}");
    print_audit(&audit);

    if audit.is_red_black() && tree.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("logger setup failed: {e}");
    }

    match args.command {
        Command::Bench { size, seed, shuffle } => bench(size, seed, shuffle),
        Command::Exec { color, ops } => exec(ops, color),
    }
}
