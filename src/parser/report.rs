use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;
use log::warn;
use serde::Serialize;

/// A recoverable anomaly found while parsing a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ParseWarning {
    /// A declared column matched no schema slot; its values were discarded
    UnmatchedColumn(String),
    /// Density, temperature or pressure was never declared; the slot stays zero
    MissingVariable(String),
    /// A network species was never declared; the slot stays zero
    MissingSpecies(String),
    /// A column label was declared more than once; the last occurrence wins
    DuplicateColumn(String),
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::UnmatchedColumn(name) => write!(f, "variable not found: {}", name),
            ParseWarning::MissingVariable(name) | ParseWarning::MissingSpecies(name) => {
                write!(f, "{} not provided in profile", name)
            }
            ParseWarning::DuplicateColumn(name) => {
                write!(f, "{} declared more than once, using the last column", name)
            }
        }
    }
}

/// How one declared column was resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnResolution {
    /// Declared column label
    pub name: String,
    /// Zero-based position among the declared variables
    pub position: usize,
    /// Storage index of the resolved slot, `None` if unused
    pub slot_index: Option<usize>,
}

impl ColumnResolution {
    /// Whether the column feeds a schema slot
    pub fn is_used(&self) -> bool {
        self.slot_index.is_some()
    }
}

/// Diagnostic record of one profile parse
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    /// Name of the parsed source (usually the file path)
    pub source: String,
    /// Number of sample points read
    pub points: usize,
    /// Resolution of each declared column, in file order
    pub columns: Vec<ColumnResolution>,
    /// Recoverable anomalies, each reported once
    pub warnings: Vec<ParseWarning>,
}

impl ParseReport {
    /// Create an empty report for the given source
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            points: 0,
            columns: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a warning and emit it on the log
    pub(crate) fn warn(&mut self, warning: ParseWarning) {
        warn!("{}: {}", self.source, warning);
        self.warnings.push(warning);
    }

    /// Check if any warnings were recorded
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Count the number of warnings
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Labels of declared columns that matched no slot
    pub fn unmatched_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| !c.is_used())
            .map(|c| c.name.as_str())
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static SKIP: Emoji<'_, '_> = Emoji("-", "[SKIP]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");

            let mut output = String::new();

            output.push_str(&format!("{}\n", style("Profile Parse Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("====================").cyan()));
            output.push_str(&format!("{}: {}\n", style("Source").bold(), self.source));
            output.push_str(&format!("{}: {}\n\n", style("Points").bold(), self.points));

            for column in &self.columns {
                if column.is_used() {
                    output.push_str(&format!("[{}] {}\n", OK, style(&column.name).green()));
                } else {
                    output.push_str(&format!(
                        "[{}] {} - {}\n",
                        SKIP,
                        style(&column.name).dim(),
                        style("unused").dim()
                    ));
                }
            }

            if self.has_warnings() {
                output.push('\n');
                for warning in &self.warnings {
                    output.push_str(&format!(
                        "[{}] {}: {}\n",
                        WARN,
                        style("WARNING").yellow().bold(),
                        warning
                    ));
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} columns, {} warnings\n",
                style("Summary").bold(),
                style(self.columns.len()).green(),
                style(self.warning_count()).yellow()
            ));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profile Parse Report")?;
        writeln!(f, "====================")?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f, "Points: {}", self.points)?;
        writeln!(f)?;

        for column in &self.columns {
            if column.is_used() {
                writeln!(f, "[✓] {}", column.name)?;
            } else {
                writeln!(f, "[-] {} - unused", column.name)?;
            }
        }

        if self.has_warnings() {
            writeln!(f)?;
            for warning in &self.warnings {
                writeln!(f, "[⚠] WARNING: {}", warning)?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} columns, {} warnings",
            self.columns.len(),
            self.warning_count()
        )
    }
}
