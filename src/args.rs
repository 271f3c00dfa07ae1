use clap::Parser;

/// This is an explorer for the results of the Lok Sabha 2024 elections.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file describing the data source, the initial
    /// selection and the output. Options passed on the command line override the ones in this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The file containing the results, one row per candidate and constituency.
    /// Setting this option overrides the data source of the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or excel) The type of the input. By default it is guessed from the extension of the
    /// input file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (state name, optional) The state selected when the explorer starts.
    #[clap(short, long, value_parser)]
    pub state: Option<String>,

    /// (constituency name, optional) The constituency selected when the explorer starts. It must
    /// belong to the state given with --state.
    #[clap(long, value_parser)]
    pub constituency: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the views will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the views in JSON format. If provided, lsdash will
    /// check that the computed views match the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// Reads selection commands from the standard input and prints the views that changed after
    /// each of them. Type 'help' once started for the list of commands.
    #[clap(long, takes_value = false)]
    pub interactive: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
