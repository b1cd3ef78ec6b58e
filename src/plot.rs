use crate::error::check_dim;
use crate::{FitError, FitResult};
use log::debug;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    Scatter,
    Line,
}

impl PlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotKind::Scatter => "scatter",
            PlotKind::Line => "line",
        }
    }
}

/// Two aligned series of values and how to draw them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Series {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: PlotKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(
        kind: PlotKind,
        title: &str,
        (x_label, y_label): (&str, &str),
        x: Vec<f64>,
        y: Vec<f64>,
    ) -> FitResult<Self> {
        check_dim("plot series", x.len(), y.len())?;
        Ok(Series {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            kind,
            x,
            y,
        })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Destination of the plots. Nothing it produces is read back.
pub trait PlotSink {
    fn plot(&mut self, series: &Series) -> FitResult<()>;
}

/// Keep the series in memory.
impl PlotSink for Vec<Series> {
    fn plot(&mut self, series: &Series) -> FitResult<()> {
        self.push(series.clone());
        Ok(())
    }
}

/// Discard every series.
pub struct NoPlot;

impl PlotSink for NoPlot {
    fn plot(&mut self, _series: &Series) -> FitResult<()> {
        Ok(())
    }
}

/// Write every point as a `series,kind,x_label,y_label,x,y` CSV record, for an
/// external plotting tool.
pub struct CsvPlotSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvPlotSink<W> {
    pub fn new(writer: W) -> FitResult<Self> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&["series", "kind", "x_label", "y_label", "x", "y"])?;
        Ok(Self { writer })
    }

    /// Flush and give back the underlying writer.
    pub fn into_inner(self) -> FitResult<W> {
        self.writer
            .into_inner()
            .map_err(|err| FitError::Io(err.error().to_string()))
    }
}

impl CsvPlotSink<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> FitResult<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> PlotSink for CsvPlotSink<W> {
    fn plot(&mut self, series: &Series) -> FitResult<()> {
        debug!("Writing {} points of '{}'", series.len(), series.title);
        for (x, y) in series.x.iter().zip(&series.y) {
            self.writer.write_record(&[
                series.title.as_str(),
                series.kind.as_str(),
                series.x_label.as_str(),
                series.y_label.as_str(),
                &x.to_string(),
                &y.to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
