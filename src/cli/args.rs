use crate::core::ExportConfig;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Export archived tasks of a queue to a CSV file
#[derive(Parser, Debug)]
#[command(name = "task-export")]
#[command(about = "Export archived tasks of a queue to a CSV file", long_about = None)]
pub struct CliArgs {
    /// Input CSV file containing archived task rows
    #[arg(value_name = "INPUT", help = "Path to the CSV file listing archived tasks")]
    pub input_file: PathBuf,

    /// Queue whose archived tasks are exported
    #[arg(long = "queue", short = 'q', value_name = "QUEUE")]
    pub queue: String,

    /// Listing order of the exported tasks
    #[arg(
        long = "order",
        value_name = "ORDER",
        default_value = "asc",
        help = "Task order: 'asc' for oldest first or 'desc' for newest first"
    )]
    pub order: SortOrder,

    /// Directory the CSV file is written to
    #[arg(long = "output-dir", short = 'o', value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Number of tasks requested per page
    #[arg(
        long = "page-size",
        value_name = "SIZE",
        help = "Number of tasks requested per page (default: 100)"
    )]
    pub page_size: Option<usize>,

    /// Maximum number of tasks in the export
    #[arg(
        long = "max-records",
        value_name = "COUNT",
        help = "Maximum number of tasks exported (default: 10000)"
    )]
    pub max_records: Option<usize>,

    /// Maximum number of concurrent page fetches
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of page fetches in flight at once (default: 10)"
    )]
    pub max_concurrent_pages: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// Listing order for exported tasks
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl CliArgs {
    /// Create an ExportConfig from CLI arguments
    ///
    /// Uses the provided values where given and defaults otherwise. Zero
    /// values are rejected by `ExportConfig::new` and replaced by defaults.
    pub fn to_export_config(&self) -> ExportConfig {
        if self.page_size.is_none()
            && self.max_records.is_none()
            && self.max_concurrent_pages.is_none()
        {
            return ExportConfig::default();
        }

        let default = ExportConfig::default();
        ExportConfig::new(
            self.page_size.unwrap_or(default.page_size),
            self.max_records.unwrap_or(default.max_records),
            self.max_concurrent_pages.unwrap_or(default.max_concurrent_pages),
        )
    }

    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Order parsing tests
    #[rstest]
    #[case::default_order(&["program", "-q", "default", "tasks.csv"], SortOrder::Asc)]
    #[case::explicit_asc(&["program", "-q", "default", "--order", "asc", "tasks.csv"], SortOrder::Asc)]
    #[case::explicit_desc(&["program", "-q", "default", "--order", "desc", "tasks.csv"], SortOrder::Desc)]
    fn test_order_parsing(#[case] args: &[&str], #[case] expected: SortOrder) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.order, expected);
    }

    #[rstest]
    #[case::short(&["program", "-q", "critical", "tasks.csv"], "critical")]
    #[case::long(&["program", "--queue", "email", "tasks.csv"], "email")]
    fn test_queue_parsing(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.queue, expected);
        assert_eq!(parsed.input_file, PathBuf::from("tasks.csv"));
        assert_eq!(parsed.output_dir, PathBuf::from("."));
    }

    // ExportConfig conversion tests with valid values
    #[rstest]
    #[case::all_defaults(&["program", "-q", "default", "tasks.csv"], 100, 10_000, 10)]
    #[case::custom_page_size(&["program", "-q", "default", "--page-size", "50", "tasks.csv"], 50, 10_000, 10)]
    #[case::custom_max_records(&["program", "-q", "default", "--max-records", "500", "tasks.csv"], 100, 500, 10)]
    #[case::custom_max_concurrent(&["program", "-q", "default", "--max-concurrent", "4", "tasks.csv"], 100, 10_000, 4)]
    #[case::all_custom(
        &["program", "-q", "default", "--page-size", "20", "--max-records", "200", "--max-concurrent", "2", "tasks.csv"],
        20,
        200,
        2
    )]
    fn test_export_config_conversion(
        #[case] args: &[&str],
        #[case] page_size: usize,
        #[case] max_records: usize,
        #[case] max_concurrent_pages: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_export_config();

        assert_eq!(config.page_size, page_size);
        assert_eq!(config.max_records, max_records);
        assert_eq!(config.max_concurrent_pages, max_concurrent_pages);
    }

    // Zero values should fall back to defaults
    #[rstest]
    #[case::zero_page_size(&["program", "-q", "default", "--page-size", "0", "tasks.csv"])]
    #[case::zero_max_records(&["program", "-q", "default", "--max-records", "0", "tasks.csv"])]
    #[case::zero_max_concurrent(&["program", "-q", "default", "--max-concurrent", "0", "tasks.csv"])]
    fn test_export_config_zero_values_fallback(#[case] args: &[&str]) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_export_config(), ExportConfig::default());
    }

    #[rstest]
    #[case::quiet(&["program", "-q", "default", "tasks.csv"], "warn")]
    #[case::verbose(&["program", "-q", "default", "-v", "tasks.csv"], "info")]
    #[case::very_verbose(&["program", "-q", "default", "-vv", "tasks.csv"], "debug")]
    fn test_log_level(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.log_level(), expected);
    }

    // Error handling tests
    #[rstest]
    #[case::missing_input(&["program", "-q", "default"])]
    #[case::missing_queue(&["program", "tasks.csv"])]
    #[case::invalid_order(&["program", "-q", "default", "--order", "sideways", "tasks.csv"])]
    #[case::negative_page_size(&["program", "-q", "default", "--page-size", "-1", "tasks.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
