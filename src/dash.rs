use log::{debug, info, warn};

use seat_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use text_diff::print_diff;

use crate::args::Args;
use crate::dash::config_reader::*;

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod render;
mod session;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DashError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Worksheet {name:?} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The Excel file {path} has no worksheet or no header row"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening the CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading the header of the CSV file"))]
    CsvHeader { source: csv::Error },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson { source: std::io::Error, path: String },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing to {path}"))]
    WritingOutput { source: std::io::Error, path: String },
    #[snafu(display("Error reading the commands"))]
    ReadingCommands { source: std::io::Error },
    #[snafu(display("Cannot load the results from {path}: {source}"))]
    LoadingDataset { source: DatasetError, path: String },
    #[snafu(display("Invalid initial selection: {source}"))]
    InitialSelection { source: SelectionError },
    #[snafu(display("No input file: use --input or a configuration file with a data source"))]
    MissingInput {},
    #[snafu(display("Unknown input type {input_type:?}, expected csv or excel"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Difference detected between the computed views and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashError>;
pub type BDashResult<T> = Result<T, Box<DashError>>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Excel,
}

impl InputType {
    fn parse(s: &str) -> DashResult<InputType> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(InputType::Csv),
            "excel" | "xlsx" | "xls" => Ok(InputType::Excel),
            _ => UnknownInputTypeSnafu { input_type: s }.fail(),
        }
    }

    fn from_extension(path: &str) -> InputType {
        match Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
                InputType::Excel
            }
            _ => InputType::Csv,
        }
    }
}

/// Everything needed for one run, once the configuration file and the
/// command line have been merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input_path: String,
    pub input_type: InputType,
    pub worksheet: Option<String>,
    pub state: Option<String>,
    pub constituency: Option<String>,
    pub out: Option<String>,
    pub reference: Option<String>,
    pub title: Option<String>,
    pub interactive: bool,
}

fn resolve_settings(args: &Args) -> BDashResult<RunSettings> {
    let config = match args.config.as_ref() {
        Some(p) => read_config(p)?,
        None => DashConfig::default(),
    };
    debug!("resolve_settings: config: {:?}", config);

    // Paths in the configuration are relative to the configuration file.
    let config_dir = args
        .config
        .as_ref()
        .and_then(|p| Path::new(p).parent().map(|d| d.to_path_buf()));
    let source = config.data_source.clone().unwrap_or_default();
    let input_path = match (args.input.clone(), source.file_path.clone()) {
        (Some(p), _) => p,
        (None, Some(p)) => match config_dir {
            Some(dir) if Path::new(&p).is_relative() => dir.join(&p).display().to_string(),
            _ => p,
        },
        (None, None) => return Err(Box::new(DashError::MissingInput {})),
    };

    let input_type = match args.input_type.as_ref().or(source.provider.as_ref()) {
        Some(t) => InputType::parse(t)?,
        None => InputType::from_extension(&input_path),
    };

    let selection = config.initial_selection.clone().unwrap_or_default();
    let output = config.output_settings.clone().unwrap_or_default();
    // A state given on the command line replaces the whole initial selection of the file.
    let (state, constituency) = if args.state.is_some() || args.constituency.is_some() {
        (args.state.clone(), args.constituency.clone())
    } else {
        (selection.state, selection.constituency)
    };

    Ok(RunSettings {
        input_path,
        input_type,
        worksheet: args
            .excel_worksheet_name
            .clone()
            .or(source.excel_worksheet_name),
        state,
        constituency,
        out: args.out.clone().or(output.output_path),
        reference: args.reference.clone(),
        title: output.title,
        interactive: args.interactive,
    })
}

fn read_table(settings: &RunSettings) -> BDashResult<RawTable> {
    info!(
        "Attempting to read {:?} file {:?}",
        settings.input_type, settings.input_path
    );
    match settings.input_type {
        InputType::Csv => io_csv::read_csv_table(&settings.input_path),
        InputType::Excel => {
            io_excel::read_excel_table(&settings.input_path, settings.worksheet.as_deref())
        }
    }
}

fn build_graph(settings: &RunSettings) -> BDashResult<ViewGraph> {
    let table = read_table(settings)?;
    let dataset = Dataset::load(&table).context(LoadingDatasetSnafu {
        path: settings.input_path.clone(),
    })?;
    info!(
        "Loaded {} results from {} ({} rows dropped), {} states",
        dataset.len(),
        io_common::simplify_file_name(&settings.input_path),
        dataset.dropped_rows(),
        dataset.all_states().len()
    );

    let mut graph = ViewGraph::new(Arc::new(dataset));
    if let Some(state) = settings.state.clone() {
        graph
            .apply(&SelectionEvent::SetState(Some(state)))
            .context(InitialSelectionSnafu {})?;
    }
    if let Some(constituency) = settings.constituency.clone() {
        graph
            .apply(&SelectionEvent::SetConstituency(Some(constituency)))
            .context(InitialSelectionSnafu {})?;
    }
    Ok(graph)
}

fn write_output(out: Option<&str>, content: &str) -> BDashResult<()> {
    match out {
        None | Some("") | Some("stdout") => {
            println!("{}", content);
        }
        Some(path) => {
            info!("Writing views to {:?}", path);
            fs::write(path, content).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js_views: &str) -> BDashResult<()> {
    let reference = read_summary(reference_path)?;
    let pretty_js_reference =
        serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    if pretty_js_reference != pretty_js_views {
        warn!("Found differences with the reference {}", reference_path);
        print_diff(pretty_js_reference.as_str(), pretty_js_views, "\n");
        return Err(Box::new(DashError::ReferenceMismatch {
            path: reference_path.to_string(),
        }));
    }
    info!("The views match the reference {}", reference_path);
    Ok(())
}

pub fn run_dashboard(args: &Args) -> BDashResult<()> {
    let settings = resolve_settings(args)?;
    info!("settings: {:?}", settings);
    let mut graph = build_graph(&settings)?;

    if settings.interactive {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return session::run_session(&mut graph, stdin.lock(), stdout.lock());
    }

    let js = render::summary_js(&graph, settings.title.as_deref());
    let pretty_js_views = serde_json::to_string_pretty(&js).context(ParsingJsonSnafu {})?;
    write_output(settings.out.as_deref(), &pretty_js_views)?;

    if let Some(reference_path) = settings.reference.as_deref() {
        check_reference(reference_path, &pretty_js_views)?;
    }
    Ok(())
}
