use std::io::{self, BufWriter, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;

use bfbin::{Flow, TableHandler, TableKind};
use clap::{Parser, ValueEnum};

/// Dump the contents of a Byfl binary-output file.
#[derive(Debug, Parser)]
#[command(name = "bfbin-dump", version, about)]
struct Cli {
    /// Path to a .byfl binary-output file
    file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Only print the table with this name
    #[arg(long)]
    table: Option<String>,

    /// Print one line per table with its row or entry count instead of the data
    #[arg(long)]
    summary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Csv,
}

/// Writes decoded tables to an output stream as they are decoded.
struct Dumper<W: Write> {
    out: W,
    format: Format,
    only: Option<String>,
    summary: bool,

    /// Whether the current table passes the `--table` filter.
    selected: bool,
    kind: Option<TableKind>,
    name: String,
    header: Vec<String>,
    fields: Vec<String>,
    count: u64,
    /// First write failure; reported after decoding stops.
    io_error: Option<io::Error>,
    decode_error: Option<String>,
}

impl<W: Write> Dumper<W> {
    fn new(out: W, cli: &Cli) -> Self {
        Self {
            out,
            format: cli.format,
            only: cli.table.clone(),
            summary: cli.summary,
            selected: false,
            kind: None,
            name: String::new(),
            header: Vec::new(),
            fields: Vec::new(),
            count: 0,
            io_error: None,
            decode_error: None,
        }
    }

    fn emit(&mut self, line: std::fmt::Arguments<'_>) -> Flow {
        if !self.selected || self.summary {
            return ControlFlow::Continue(());
        }
        match writeln!(self.out, "{}", line) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                self.io_error = Some(e);
                ControlFlow::Break(())
            }
        }
    }

    fn join(&self, fields: &[String]) -> String {
        match self.format {
            Format::Text => fields.join("\t"),
            Format::Csv => fields.iter().map(|f| csv_quote(f)).collect::<Vec<_>>().join(","),
        }
    }

    fn push_column(&mut self, name: &str) -> Flow {
        if self.kind == Some(TableKind::KeyValue) {
            self.fields.clear();
            self.fields.push(name.to_owned());
        } else {
            self.header.push(name.to_owned());
        }
        ControlFlow::Continue(())
    }

    fn push_data(&mut self, value: String) -> Flow {
        self.fields.push(value);
        if self.kind == Some(TableKind::KeyValue) {
            self.count += 1;
            let line = self.join(&self.fields);
            return self.emit(format_args!("{}", line));
        }
        ControlFlow::Continue(())
    }
}

impl<W: Write> TableHandler for Dumper<W> {
    fn on_table_begin(&mut self, kind: TableKind, name: &str) -> Flow {
        self.selected = self.only.as_deref().is_none_or(|only| only == name);
        self.kind = Some(kind);
        self.name = name.to_owned();
        self.header.clear();
        self.count = 0;
        match self.format {
            Format::Text => self.emit(format_args!("== {} ({})", name, kind)),
            Format::Csv => self.emit(format_args!("# {}", name)),
        }
    }

    fn on_table_end(&mut self) -> Flow {
        if self.selected && self.summary {
            let unit = if self.kind == Some(TableKind::KeyValue) { "entries" } else { "rows" };
            if let Err(e) = writeln!(self.out, "{}\t{}\t{}", self.name, self.count, unit) {
                self.io_error = Some(e);
                return ControlFlow::Break(());
            }
        }
        let flow = self.emit(format_args!(""));
        if flow.is_continue() && self.only.is_some() && self.selected {
            // The requested table has been printed; nothing else is of interest.
            return ControlFlow::Break(());
        }
        flow
    }

    fn on_column_uint64(&mut self, name: &str) -> Flow {
        self.push_column(name)
    }

    fn on_column_string(&mut self, name: &str) -> Flow {
        self.push_column(name)
    }

    fn on_column_bool(&mut self, name: &str) -> Flow {
        self.push_column(name)
    }

    fn on_columns_end(&mut self) -> Flow {
        let line = self.join(&self.header);
        self.emit(format_args!("{}", line))
    }

    fn on_row_begin(&mut self) -> Flow {
        self.fields.clear();
        ControlFlow::Continue(())
    }

    fn on_row_end(&mut self) -> Flow {
        self.count += 1;
        let line = self.join(&self.fields);
        self.emit(format_args!("{}", line))
    }

    fn on_data_uint64(&mut self, value: u64) -> Flow {
        self.push_data(value.to_string())
    }

    fn on_data_string(&mut self, value: &str) -> Flow {
        self.push_data(value.to_owned())
    }

    fn on_data_bool(&mut self, value: bool) -> Flow {
        self.push_data(value.to_string())
    }

    fn on_error(&mut self, message: &str) {
        self.decode_error = Some(message.to_owned());
    }
}

/// Quotes a CSV field when it contains a delimiter, quote or line break.
fn csv_quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut dumper = Dumper::new(BufWriter::new(stdout.lock()), &cli);
    let result = bfbin::process_file(&cli.file, &mut dumper);

    if let Some(e) = dumper.io_error.take() {
        eprintln!("ERROR: Failed to write output: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = dumper.out.flush() {
        eprintln!("ERROR: Failed to write output: {}", e);
        std::process::exit(1);
    }
    if result.is_err() {
        let message = dumper.decode_error.take().unwrap_or_else(|| "decoding failed".to_string());
        eprintln!("ERROR: {}", message);
        std::process::exit(1);
    }
}
