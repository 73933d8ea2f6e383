use std::fmt;
use std::io::{self, BufRead, Write};
use std::process::exit;

use clap::{ArgEnum, Parser};
use log::{debug, error, info, LevelFilter};
use serde::{Deserialize, Serialize};

use segtree::{
    Command, IntTransform, Result, SegmentTree, SegtreeError, TextTransform, Transform,
};

const VALUES_FORMAT: &str = "JSON_ARRAY";

#[derive(Parser, Debug)]
#[clap(name = "segtree", author, version, about, long_about = None)]
struct Opt {
    #[clap(
        value_name = VALUES_FORMAT,
        help = "The source sequence, e.g. [3,5,10] or [\"a\",\"b\"]",
    )]
    values: String,
    #[clap(
        arg_enum,
        short,
        long,
        default_value = "sum",
        help = "Sets the combine operation",
        value_name = "OP"
    )]
    op: Op,
    #[clap(short, long, help = "Prints debug logs to stderr")]
    verbose: bool,
}

#[allow(non_camel_case_types)]
#[derive(ArgEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    sum,
    product,
    min,
    max,
    concat,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Op::sum => write!(f, "sum"),
            Op::product => write!(f, "product"),
            Op::min => write!(f, "min"),
            Op::max => write!(f, "max"),
            Op::concat => write!(f, "concat"),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Values {
    Int(Vec<i64>),
    Text(Vec<String>),
}

impl Values {
    fn len(&self) -> usize {
        match self {
            Values::Int(v) => v.len(),
            Values::Text(v) => v.len(),
        }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn main() {
    let opt = Opt::parse();
    let level = if opt.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();
    if let Err(e) = run(opt) {
        error!("{}", e);
        exit(1);
    }
}

fn run(opt: Opt) -> Result<()> {
    info!("segtree {}", env!("CARGO_PKG_VERSION"));
    let values: Values = serde_json::from_str(&opt.values)?;
    debug!("Combine operation: {}, {} elements", opt.op, values.len());
    // `[]` 会被解析成整数数组，先统一报空
    if values.is_empty() {
        return Err(SegtreeError::EmptyInput);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let input = stdin.lock();
    let output = stdout.lock();

    match (opt.op, values) {
        (Op::sum, Values::Int(v)) => serve::<IntTransform, _, _, _>(
            SegmentTree::build(&v, |a: &i64, b: &i64| a.wrapping_add(*b), 0)?,
            input,
            output,
        ),
        (Op::product, Values::Int(v)) => serve::<IntTransform, _, _, _>(
            SegmentTree::build(&v, |a: &i64, b: &i64| a.wrapping_mul(*b), 1)?,
            input,
            output,
        ),
        (Op::min, Values::Int(v)) => serve::<IntTransform, _, _, _>(
            SegmentTree::build(&v, |a: &i64, b: &i64| *a.min(b), i64::MAX)?,
            input,
            output,
        ),
        (Op::max, Values::Int(v)) => serve::<IntTransform, _, _, _>(
            SegmentTree::build(&v, |a: &i64, b: &i64| *a.max(b), i64::MIN)?,
            input,
            output,
        ),
        (Op::concat, Values::Text(v)) => serve::<TextTransform, _, _, _>(
            SegmentTree::build(&v, |a: &String, b: &String| format!("{}{}", a, b), String::new())?,
            input,
            output,
        ),
        (op, _) => Err(SegtreeError::ElementMismatch(op.to_string())),
    }
}

/// Run every command read from `input` against `tree`, writing one JSON value per line.
fn serve<U, F, R, W>(mut tree: SegmentTree<U::Elem, F>, input: R, mut output: W) -> Result<()>
where
    U: Transform,
    U::Elem: Clone + Serialize,
    F: Fn(&U::Elem, &U::Elem) -> U::Elem,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let value = match line.parse::<Command<U>>()? {
            Command::Query { lo, hi } => tree.query(lo, hi),
            Command::Update { lo, hi, transform } => tree.update(lo, hi, |x| transform.apply(x)),
        };
        serde_json::to_writer(&mut output, &value)?;
        writeln!(output)?;
    }
    output.flush()?;
    Ok(())
}
