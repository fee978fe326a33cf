use std::io::Read;

use clap::Parser;

use dbsketch::Format;
use dbsketch::describe::{Collation, DescribeOptions, describe_with_options};
use dbsketch::model::ModelItem;

#[derive(Parser)]
#[command(
    name = "dbsketch",
    about = "Render mapping metadata as a diagram (PlantUML or Graphviz DOT)"
)]
struct Cli {
    /// Model file containing a JSON array of model items (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,

    /// Output notation
    #[arg(long, short = 'f', value_enum, default_value = "plantuml")]
    format: Format,

    /// Skip method detection
    #[arg(long)]
    no_methods: bool,

    /// Skip property detection
    #[arg(long)]
    no_properties: bool,

    /// Skip index detection
    #[arg(long)]
    no_indexes: bool,

    /// Hide indexes that cover a single column
    #[arg(long)]
    no_simple_indexes: bool,

    /// Hide the member columns of indexes
    #[arg(long)]
    no_index_columns: bool,

    /// Sort columns case-insensitively instead of by codepoint
    #[arg(long)]
    case_insensitive_sort: bool,
}

fn main() {
    let cli = Cli::parse();

    let input = match cli.file {
        Some(path) => std::fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    };

    let items: Vec<ModelItem> = match serde_json::from_str(&input) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("ERROR: invalid model document: {e}");
            std::process::exit(1);
        }
    };

    let options = DescribeOptions {
        methods: !cli.no_methods,
        properties: !cli.no_properties,
        indexes: !cli.no_indexes,
        simple_indexes: !cli.no_simple_indexes,
        index_columns: !cli.no_index_columns,
        collation: if cli.case_insensitive_sort {
            Collation::CaseInsensitive
        } else {
            Collation::Ordinal
        },
    };

    let description = describe_with_options(&items, &options);
    println!("{}", dbsketch::render(&description, cli.format));
}
