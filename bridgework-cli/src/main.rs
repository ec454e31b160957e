//! Bridgework CLI - run the examples from a terminal

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use bridgework_core::prelude::*;

#[derive(Parser)]
#[command(name = "bridgework")]
#[command(about = "Run the Bridgework examples", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file, used instead of bridgework.toml; BRIDGEWORK_* variables still apply
    #[arg(short, long, global = true, env = "BRIDGEWORK_CONFIG_PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the greeting
    Greet,
    /// Scalar addition
    Sum {
        #[command(subcommand)]
        command: SumCommands,
    },
    /// Square root
    Sqrt {
        #[arg(allow_hyphen_values = true)]
        x: f64,
    },
    /// Run the list and dict examples
    Containers {
        /// JSON document with "list", "nested" and "dict" keys
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Run the Point3D example
    Point,
    /// 3x3 non-maximum suppression over a JSON grid
    Nms {
        /// JSON array of rows
        file: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Laplacian scale space over a JSON grid
    ScaleSpace {
        /// JSON array of rows
        file: PathBuf,

        /// Number of levels
        #[arg(long)]
        levels: Option<usize>,

        /// Kernel size (odd, 3 to 31)
        #[arg(long)]
        ksize: Option<usize>,

        /// Initial sigma
        #[arg(long)]
        sigma: Option<f64>,

        /// Sigma multiplier between levels
        #[arg(long)]
        sigma_step: Option<f64>,
    },
    /// Version information
    Version,
}

#[derive(Subcommand)]
enum SumCommands {
    /// Add two integers
    Ints {
        #[arg(allow_hyphen_values = true)]
        a: i64,
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },
    /// Add two floats
    Floats {
        #[arg(allow_hyphen_values = true)]
        a: f64,
        #[arg(allow_hyphen_values = true)]
        b: f64,
    },
    /// Add two ints or floats, or concatenate two strings
    Generic {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
}

/// Input document for `containers --input`
#[derive(Debug, Default, Deserialize)]
struct ContainersInput {
    #[serde(default)]
    list: Vec<Value>,
    #[serde(default)]
    nested: Vec<Value>,
    #[serde(default)]
    dict: Option<Value>,
}

impl ContainersInput {
    fn sample() -> Self {
        Self {
            list: vec![
                Value::from("aa"),
                Value::from("bvbbb"),
                Value::Int(1),
                Value::Int(3),
                Value::Float(1.524),
                Value::complex(1.0, 4.0),
                Value::list([Value::Int(1), Value::Int(1)]),
                Value::Int(3),
            ],
            nested: vec![
                Value::list([
                    Value::Int(12),
                    Value::Int(1),
                    Value::from("a"),
                    Value::from("3"),
                ]),
                Value::list([
                    Value::Int(100),
                    Value::complex(1.0, 4.0),
                    Value::Int(3),
                ]),
                Value::list([Value::from("asdf"), Value::from("ksdf")]),
            ],
            dict: Some(Value::dict([("cat", "meow"), ("dog", "woof"), ("cow", "moo")])),
        }
    }
}

/// Parse a command-line argument as int, then float, else keep it as text
fn parse_value(arg: &str) -> Value {
    if let Ok(i) = arg.parse::<i64>() {
        Value::Int(i)
    } else if let Ok(f) = arg.parse::<f64>() {
        Value::Float(f)
    } else {
        Value::Str(arg.to_string())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<BridgeworkConfig> {
    let config = match path {
        Some(path) => BridgeworkConfig::from_file(path)?,
        None => BridgeworkConfig::load()?,
    };
    Ok(config)
}

fn run_containers(input: ContainersInput, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Check types")?;
    check_types(&input.list, out)?;

    writeln!(out, "\nGet int list")?;
    writeln!(out, "{:?}", get_int_list(&input.list))?;

    writeln!(out, "\nFlatten 2D list")?;
    writeln!(out, "{}", Value::List(flatten_2d_list(&input.nested)?))?;

    if let Some(dict) = input.dict {
        let entries = dict
            .as_dict()
            .ok_or_else(|| anyhow!("\"dict\" must be a JSON object, got {}", dict.kind()))?;
        writeln!(out, "\nIterate over dictionary")?;
        iterate_dict(entries, out)?;
    }
    Ok(())
}

fn run_point(out: &mut impl Write) -> Result<()> {
    let p1 = Point3::new(1, 2, 3);
    let mut p2 = p1;
    p2.set_x(10);
    writeln!(out, "p1: {}", p1)?;
    writeln!(out, "p2: {}", p2)?;
    writeln!(out, "distance(p1, p2): {}", p1.distance(&p2))?;
    writeln!(out, "p1 + p2: {}", p1 + p2)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) if cli.config.is_some() => return Err(e),
        Err(e) => {
            eprintln!("warning: {}; using defaults", e);
            BridgeworkConfig::default()
        }
    };

    init_tracing(&config.logging)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Greet => writeln!(out, "{}", greet())?,
        Commands::Sum { command } => match command {
            SumCommands::Ints { a, b } => writeln!(out, "{}", sum_ints(a, b)?)?,
            SumCommands::Floats { a, b } => writeln!(out, "{}", sum_floats(a, b))?,
            SumCommands::Generic { a, b } => {
                let sum = dynamic_sum(&parse_value(&a), &parse_value(&b))?;
                writeln!(out, "{}", sum)?;
            }
        },
        Commands::Sqrt { x } => writeln!(out, "{}", sqrt_num(x))?,
        Commands::Containers { input } => {
            let input = match input {
                Some(path) => read_json(&path)?,
                None => ContainersInput::sample(),
            };
            run_containers(input, &mut out)?;
        }
        Commands::Point => run_point(&mut out)?,
        Commands::Nms { file, output } => {
            let grid: Grid = read_json(&file)?;
            let suppressed = non_max_suppression(&grid);
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    serde_json::to_writer(&mut writer, &suppressed)?;
                    writer.flush()?;
                    tracing::info!(path = %path.display(), "wrote suppressed grid");
                }
                None => {
                    serde_json::to_writer(&mut out, &suppressed)?;
                    writeln!(out)?;
                }
            }
        }
        Commands::ScaleSpace {
            file,
            levels,
            ksize,
            sigma,
            sigma_step,
        } => {
            let scale_space = &mut config.scale_space;
            if let Some(levels) = levels {
                scale_space.levels = levels;
            }
            if let Some(ksize) = ksize {
                scale_space.ksize = ksize;
            }
            if let Some(sigma) = sigma {
                scale_space.sigma = sigma;
            }
            if let Some(sigma_step) = sigma_step {
                scale_space.sigma_step = sigma_step;
            }

            let grid: Grid = read_json(&file)?;
            let (rows, cols) = grid.shape();
            writeln!(out, "{}x{} grid, {} levels", rows, cols, config.scale_space.levels)?;
            for (i, level) in laplacian_scale_space(&grid, &config.scale_space)?
                .iter()
                .enumerate()
            {
                writeln!(
                    out,
                    "level {:>3}  sigma {:>10.4}  kept {:>8}  nms {:?}",
                    i,
                    level.sigma,
                    level.response.count_nonzero(),
                    level.elapsed
                )?;
            }
        }
        Commands::Version => {
            writeln!(out, "bridgework {}", env!("CARGO_PKG_VERSION"))?;
            writeln!(out, "bridgework-core {}", bridgework_core::VERSION)?;
        }
    }

    Ok(())
}
