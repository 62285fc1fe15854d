use clap::Parser;

/// Scores a stored PEIT24 test session into its political and economic types.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file listing the data files and the test type. Relative paths in it
    /// are resolved against its directory. The other flags override its content.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The question bank, in JSON format. Required with --display-order.
    #[clap(short, long, value_parser)]
    pub questions: Option<String>,

    /// (file path) The table that maps each option of each question to a pole, in JSON format.
    #[clap(short, long, value_parser)]
    pub mapping: Option<String>,

    /// (file path) A dump of the browser storage holding the answers, in JSON format.
    #[clap(short, long, value_parser)]
    pub answers: Option<String>,

    /// (file path, optional) The results dictionary. If provided, the descriptions of the types
    /// and the recommended books are added to the report.
    #[clap(long, value_parser)]
    pub results: Option<String>,

    /// (political, economic, both or empty) The session to score. If not specified, it is chosen
    /// from the sessions found in the storage dump.
    #[clap(short, long, value_parser)]
    pub test_type: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the report. Defaults to the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference report in JSON format. If provided, peit will check that the
    /// computed report matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, prints the display order of the questions instead of scoring.
    #[clap(long, takes_value = false)]
    pub display_order: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
