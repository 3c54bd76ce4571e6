use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gfpoly::{Element, Field, FieldOptions, FieldSpec, LogTablePolicy, StreamRemainder, PRIMITIVES};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gfpoly", about = "GF(2^w) polynomial arithmetic")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the catalogued primitive polynomials.
    Catalog,
    /// Describe a field (`primitive:<degree>` or exponents such as `8,4,3,2,0`).
    Info {
        /// Field description.
        field: FieldSpec,
    },
    /// Multiply two elements.
    Mul {
        /// Field description.
        field: FieldSpec,
        /// First operand (hex with 0x prefix, or decimal).
        a: String,
        /// Second operand.
        b: String,
    },
    /// Divide two elements using log tables.
    Div {
        /// Field description.
        field: FieldSpec,
        /// Dividend.
        a: String,
        /// Divisor.
        b: String,
    },
    /// Invert an element using log tables.
    Inv {
        /// Field description.
        field: FieldSpec,
        /// Element to invert.
        a: String,
    },
    /// Remainder of a file's bytes modulo the generator.
    Remainder {
        /// Field description.
        field: FieldSpec,
        /// Input file.
        input: PathBuf,
        /// Value folded in before the first byte.
        #[arg(long)]
        seed: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Catalog => run_catalog(),
        Commands::Info { field } => run_info(&field)?,
        Commands::Mul { field, a, b } => {
            let field = field.build().context("failed to construct field")?;
            let (a, b) = (parse_element(&field, &a)?, parse_element(&field, &b)?);
            println!("{}", field.multiply_reduced(&a, &b)?);
        }
        Commands::Div { field, a, b } => {
            let field = build_with_tables(&field)?;
            let (a, b) = (parse_element(&field, &a)?, parse_element(&field, &b)?);
            println!("{}", field.divide_via_log(&a, &b)?);
        }
        Commands::Inv { field, a } => {
            let field = build_with_tables(&field)?;
            let a = parse_element(&field, &a)?;
            println!("{}", field.invert_via_log(&a)?);
        }
        Commands::Remainder { field, input, seed } => run_remainder(&field, input, seed)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_catalog() {
    for &(degree, exponents) in PRIMITIVES {
        let parts: Vec<String> = exponents.iter().map(u32::to_string).collect();
        println!("{degree}\t{}", parts.join(","));
    }
}

fn run_info(spec: &FieldSpec) -> Result<()> {
    let options = FieldOptions {
        log_tables: LogTablePolicy::Try,
    };
    let field = spec
        .build_with(&options)
        .with_context(|| format!("failed to construct field '{spec}'"))?;

    println!("{field}");
    println!("generator\t{}", field.generator());
    println!("class\t{:?}", field.word_class());
    println!("max\t{}", field.max_value());
    let primitive = if field.has_log_tables() {
        "yes"
    } else if field.field_degree() <= gfpoly::log_table::MAX_LOG_TABLE_DEGREE {
        "no"
    } else {
        "unchecked"
    };
    println!("primitive\t{primitive}");
    Ok(())
}

fn run_remainder(spec: &FieldSpec, input: PathBuf, seed: Option<String>) -> Result<()> {
    let field = spec.build().context("failed to construct field")?;
    let mut stream = match seed {
        Some(seed) => StreamRemainder::with_seed(&field, parse_element(&field, &seed)?)?,
        None => StreamRemainder::new(&field),
    };

    let mut reader = BufReader::new(
        File::open(&input).with_context(|| format!("failed to open {}", input.display()))?,
    );
    let mut buffer = [0u8; 8192];
    loop {
        let read = reader
            .read(&mut buffer)
            .with_context(|| format!("failed to read {}", input.display()))?;
        if read == 0 {
            break;
        }
        stream.update(&buffer[..read])?;
    }

    println!("{}\t{} bytes", stream.remainder(), stream.consumed());
    Ok(())
}

fn build_with_tables(spec: &FieldSpec) -> Result<Field> {
    let options = FieldOptions {
        log_tables: LogTablePolicy::Require,
    };
    spec.build_with(&options)
        .with_context(|| format!("field '{spec}' does not support log tables"))
}

/// Parse a hex (`0x...`, any width) or decimal literal into a field element.
fn parse_element(field: &Field, text: &str) -> Result<Element> {
    let text = text.trim();
    let words = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => {
            if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                bail!("invalid hex literal '{text}'");
            }
            let digits: Vec<char> = hex.chars().collect();
            digits
                .rchunks(16)
                .map(|chunk| {
                    let chunk: String = chunk.iter().collect();
                    u64::from_str_radix(&chunk, 16)
                        .with_context(|| format!("invalid hex literal '{text}'"))
                })
                .collect::<Result<Vec<u64>>>()?
        }
        None => vec![text
            .parse::<u64>()
            .with_context(|| format!("invalid decimal literal '{text}'"))?],
    };

    // check before embedding: Single and Pair layouts drop high words
    if let Some(top) = words.iter().rposition(|&w| w != 0) {
        let degree = top as u32 * 64 + (63 - words[top].leading_zeros());
        if degree >= field.field_degree() {
            bail!("{text} is not an element of GF(2^{})", field.field_degree());
        }
    }
    Ok(field.element_from_words(&words))
}
