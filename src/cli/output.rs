//! Output formatting utilities

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;
use crate::core::analytics::{Pivot, ValueMode};
use crate::core::format::format_with_commas;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Table
            } else {
                OutputFormat::Yaml
            }
        }
        other => other,
    }
}

/// Rows of display strings under a header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tabular {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Tabular {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rounded-border terminal table
    pub fn to_table_string(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().map(String::as_str));
        for row in &self.rows {
            builder.push_record(row.iter().map(String::as_str));
        }
        builder.build().with(Style::rounded()).to_string()
    }

    /// GitHub-flavoured Markdown table
    pub fn to_markdown(&self) -> String {
        let escape = |cell: &str| cell.replace('|', "\\|");
        let mut out = String::new();
        out.push_str(&format!(
            "| {} |\n",
            self.headers.iter().map(|h| escape(h)).collect::<Vec<_>>().join(" | ")
        ));
        out.push_str(&format!(
            "|{}|\n",
            self.headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
        ));
        for row in &self.rows {
            out.push_str(&format!(
                "| {} |\n",
                row.iter().map(|c| escape(c)).collect::<Vec<_>>().join(" | ")
            ));
        }
        out
    }

    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers).into_diagnostic()?;
        for row in &self.rows {
            wtr.write_record(row).into_diagnostic()?;
        }
        wtr.flush().into_diagnostic()?;
        Ok(())
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

pub fn print_yaml<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let yaml = serde_yml::to_string(value).into_diagnostic()?;
    print!("{}", yaml);
    Ok(())
}

/// Emit `value` in a structured format, or `table` for the tabular ones
///
/// `title` is printed above terminal tables only.
pub fn emit<T, F>(format: OutputFormat, title: Option<&str>, value: &T, table: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> Tabular,
{
    match effective_format(format, true) {
        OutputFormat::Json => print_json(value),
        OutputFormat::Yaml => print_yaml(value),
        OutputFormat::Csv => table().write_csv(std::io::stdout()),
        OutputFormat::Md => {
            print!("{}", table().to_markdown());
            Ok(())
        }
        OutputFormat::Table | OutputFormat::Auto => {
            let table = table();
            if let Some(title) = title {
                println!("{}", style(title).bold());
            }
            if table.is_empty() {
                println!("{}", style("No data for the current selection.").dim());
            } else {
                println!("{}", table.to_table_string());
            }
            Ok(())
        }
    }
}

/// Display a measure: two decimals for US$ millions, whole units for volume
pub fn format_measure(value: f64, mode: ValueMode) -> String {
    match mode {
        ValueMode::ByValue => format_with_commas(value, 2),
        ValueMode::ByVolume => format_with_commas(value, 0),
    }
}

/// Year rows × facet columns, with a per-year total
pub fn pivot_table(pivot: &Pivot, format_cell: impl Fn(f64) -> String) -> Tabular {
    let mut headers = vec!["Year".to_string()];
    headers.extend(pivot.facets.iter().cloned());
    headers.push("Total".to_string());

    let mut table = Tabular::new(headers);
    if pivot.is_empty() {
        return table;
    }
    for (i, (year, row)) in pivot.years.iter().zip(&pivot.values).enumerate() {
        let mut cells = vec![year.to_string()];
        cells.extend(row.iter().map(|v| format_cell(*v)));
        cells.push(format_cell(pivot.row_total(i)));
        table.push(cells);
    }
    table
}

/// Emit a pivot; structured formats get the chart rows
pub fn emit_pivot(
    format: OutputFormat,
    title: Option<&str>,
    pivot: &Pivot,
    format_cell: impl Fn(f64) -> String,
) -> Result<()> {
    emit(format, title, &pivot.chart_rows(), || pivot_table(pivot, format_cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tabular {
        let mut table = Tabular::new(["Region", "Value"]);
        table.push(["Europe", "1,234.50"]);
        table.push(["A|B", "2"]);
        table
    }

    #[test]
    fn test_effective_format() {
        assert_eq!(effective_format(OutputFormat::Auto, true), OutputFormat::Table);
        assert_eq!(effective_format(OutputFormat::Auto, false), OutputFormat::Yaml);
        assert_eq!(effective_format(OutputFormat::Csv, true), OutputFormat::Csv);
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let md = sample().to_markdown();
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[0], "| Region | Value |");
        assert_eq!(lines[1], "|---|---|");
        assert_eq!(lines[2], "| Europe | 1,234.50 |");
        assert_eq!(lines[3], "| A\\|B | 2 |");
    }

    #[test]
    fn test_csv_quotes_commas() {
        let mut buf = Vec::new();
        sample().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Region,Value\nEurope,\"1,234.50\"\nA|B,2\n");
    }

    #[test]
    fn test_table_string_contains_cells() {
        let text = sample().to_table_string();
        assert!(text.contains("Europe"));
        assert!(text.contains("1,234.50"));
    }

    #[test]
    fn test_pivot_table_adds_totals() {
        let pivot = Pivot {
            years: vec![2024, 2025],
            facets: vec!["Hardware".into(), "Software".into()],
            values: vec![vec![1.0, 2.0], vec![3.0, 4.5]],
        };
        let table = pivot_table(&pivot, |v| format_measure(v, ValueMode::ByValue));
        assert_eq!(table.headers, vec!["Year", "Hardware", "Software", "Total"]);
        assert_eq!(table.rows[1], vec!["2025", "3.00", "4.50", "7.50"]);
        assert!(pivot_table(&Pivot::default(), |v| v.to_string()).is_empty());
    }

    #[test]
    fn test_format_measure() {
        assert_eq!(format_measure(1234.567, ValueMode::ByValue), "1,234.57");
        assert_eq!(format_measure(1234.567, ValueMode::ByVolume), "1,235");
    }
}
