//! Tab-separated reports.

use std::io::Write;

use log::{debug, info};

use astrodb_core::{
    filter::ObjectFilter, format_number, joined::JoinedObject, record::AstronomicalObject,
};

use super::{Error, Exporter, ReportMode};
use crate::{catalog::Catalog, sort::SortOrder};

const OBSERVING_COLUMNS: &[&str] = &[
    "Id", "Type", "Con", "RA", "Dec", "Mag", "Size/Sep", "PA", "SB", "Names + notes",
];
const PROGRAM_COLUMNS: &[&str] = &["ItemNumber", "Id", "Dates", "Con", "RA", "Dec", "Names"];
const OBJECT_COLUMNS: &[&str] = &[
    "Id", "Names", "Types", "Con", "RA", "Dec", "Mag", "Size", "Sep", "PA", "Class", "Dist",
    "Notes",
];
const META_COLUMNS: &[&str] = &[
    "Id", "Names", "Type", "Con", "RA", "Dec", "Dist", "NumObs", "NumPrograms", "Dates",
    "Programs",
];

/// Writes one [`ReportMode`] as tab-separated text with a `#` header line.
pub struct TsvExporter<W: Write> {
    writer: W,
    mode: ReportMode,
}

impl<W: Write> TsvExporter<W> {
    pub fn new(writer: W, mode: ReportMode) -> Self {
        Self { writer, mode }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row(&mut self, fields: &[String]) -> Result<(), Error> {
        writeln!(self.writer, "{}", fields.join("\t"))?;
        Ok(())
    }

    fn write_header(&mut self, columns: &[&str]) -> Result<(), Error> {
        writeln!(self.writer, "# {}", columns.join("\t"))?;
        Ok(())
    }
}

impl<W: Write> Exporter for TsvExporter<W> {
    fn export_report(
        &mut self,
        catalog: &Catalog,
        filter: &ObjectFilter,
    ) -> Result<usize, Error> {
        let mut objects = catalog.filter(filter);
        info!(mode = self.mode.to_string(), matches = objects.len(); "Writing report");

        match self.mode {
            ReportMode::ObservingList => {
                let start_hours = filter
                    .ra_range
                    .filter(|range| range.wraps())
                    .map_or(0.0, |range| range.min());
                debug!(start_hours; "Sorting across the sky");
                SortOrder::Sky { start_hours }.sort(&mut objects);
                self.write_header(OBSERVING_COLUMNS)?;
                for joined in &objects {
                    self.write_row(&observing_row(joined.object()))?;
                }
            }
            ReportMode::ProgramList => {
                let program = filter
                    .program_name()
                    .ok_or(Error::MissingProgram(self.mode))?;
                SortOrder::ProgramItem(program.to_string()).sort(&mut objects);
                self.write_header(PROGRAM_COLUMNS)?;
                for joined in &objects {
                    self.write_row(&program_row(joined, program))?;
                }
            }
            ReportMode::ObjectList => {
                self.write_header(OBJECT_COLUMNS)?;
                for joined in &objects {
                    self.write_row(&object_row(joined.object()))?;
                }
            }
            ReportMode::MetaList => {
                SortOrder::Id.sort(&mut objects);
                self.write_header(META_COLUMNS)?;
                for joined in &objects {
                    self.write_row(&meta_row(joined))?;
                }
            }
        }

        self.writer.flush()?;
        Ok(objects.len())
    }
}

fn display<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn position(object: &AstronomicalObject) -> [String; 3] {
    [
        display(object.constellation().map(|c| c.abbreviation())),
        display(object.ra()),
        display(object.dec()),
    ]
}

fn observing_row(object: &AstronomicalObject) -> Vec<String> {
    let [constellation, ra, dec] = position(object);
    let extent = if object.separation().is_none() {
        object.size().to_string()
    } else {
        object.separation().to_string()
    };
    let mut description = object.names().join(", ");
    if !object.notes().is_empty() {
        description.push_str("; ");
        description.push_str(object.notes());
    }
    vec![
        object.id().to_string(),
        object.object_types().to_string(),
        constellation,
        ra,
        dec,
        object.magnitude().to_string(),
        extent,
        object.position_angle().to_string(),
        display(object.surface_brightness().map(format_number)),
        description,
    ]
}

fn program_row(joined: &JoinedObject, program: &str) -> Vec<String> {
    let object = joined.object();
    let [constellation, ra, dec] = position(object);
    let item = joined
        .programs()
        .iter()
        .find(|entry| entry.program_name() == program)
        .map(|entry| entry.item_number().to_string());
    vec![
        display(item),
        object.id().to_string(),
        joined.observation_dates(),
        constellation,
        ra,
        dec,
        object.names().join(", "),
    ]
}

fn object_row(object: &AstronomicalObject) -> Vec<String> {
    let [constellation, ra, dec] = position(object);
    vec![
        object.id().to_string(),
        object.names().join("/"),
        object.object_types().to_string(),
        constellation,
        ra,
        dec,
        object.magnitude().to_string(),
        object.size().to_string(),
        object.separation().to_string(),
        object.position_angle().to_string(),
        object.object_class().to_string(),
        object.distance().to_string(),
        object.notes().to_string(),
    ]
}

fn meta_row(joined: &JoinedObject) -> Vec<String> {
    let object = joined.object();
    let [constellation, ra, dec] = position(object);
    vec![
        object.id().to_string(),
        object.names().join(", "),
        object.object_types().to_string(),
        constellation,
        ra,
        dec,
        object.distance().to_string(),
        joined.observation_count().to_string(),
        joined.program_count().to_string(),
        joined.observation_dates(),
        joined.program_names(),
    ]
}
