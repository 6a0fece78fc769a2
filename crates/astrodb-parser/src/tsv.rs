//! Loaders for the tab-separated record files.
//!
//! Each file holds one record per line with a fixed number of tab-separated
//! fields. Blank lines and lines starting with `#` are skipped, and a
//! trailing `\r` is ignored. Lines are numbered from 1 and every record
//! remembers the line it came from.
//!
//! A loader reads the whole file before failing: every malformed line and
//! field is reported in one [`ParseError`], each diagnostic labelling the
//! offending field by its byte span in the file.

use std::{fmt, str::FromStr};

use log::info;

use astrodb_core::{
    FieldError,
    angle::{Declination, RightAscension},
    constellation::Constellation,
    distance::Distance,
    item_number::ItemNumber,
    magnitude::Magnitude,
    object_type::ObjectTypes,
    position_angle::PositionAngle,
    record::{
        AstronomicalObject, FixedLocation, ObservationRecord, ProgramEntry, SessionDetails,
        is_iso_date,
    },
    size::{Separation, Size},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::{Span, Spanned},
};

/// The three kinds of record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Objects,
    Observations,
    Programs,
}

impl RecordKind {
    /// Field names in file order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            RecordKind::Objects => &[
                "id",
                "names",
                "types",
                "constellation",
                "RA",
                "Dec",
                "magnitude",
                "size",
                "separation",
                "position angle",
                "class",
                "distance",
                "notes",
            ],
            RecordKind::Observations => &[
                "id",
                "date",
                "location",
                "scope",
                "seeing",
                "transparency",
                "object ids",
                "time",
                "eyepiece",
                "magnification",
                "lunar phase",
                "notes",
            ],
            RecordKind::Programs => &["program", "item number", "object id", "observation id"],
        }
    }

    pub fn field_count(self) -> usize {
        self.fields().len()
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Objects => "objects",
            RecordKind::Observations => "observations",
            RecordKind::Programs => "programs",
        })
    }
}

/// A data line split into fields.
struct Line<'a> {
    number: usize,
    span: Span,
    fields: Vec<Spanned<&'a str>>,
}

impl<'a> Line<'a> {
    fn text(&self, index: usize) -> &'a str {
        self.fields
            .get(index)
            .map(|field| field.inner().trim())
            .unwrap_or_default()
    }

    fn span(&self, index: usize) -> Span {
        self.fields
            .get(index)
            .map(Spanned::span)
            .unwrap_or(self.span)
    }

    fn invalid(&self, index: usize, name: &str, reason: impl fmt::Display) -> Diagnostic {
        Diagnostic::error(format!("line {}: invalid {name}: {reason}", self.number))
            .with_code(ErrorCode::E201)
            .with_label(self.span(index), format!("invalid {name}"))
    }

    /// A field that must not be blank.
    fn required(
        &self,
        index: usize,
        name: &str,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<&'a str> {
        let text = self.text(index);
        if text.is_empty() {
            diagnostics.emit(self.invalid(index, name, "field is empty"));
            return None;
        }
        Some(text)
    }

    fn parse<T>(&self, index: usize, name: &str, diagnostics: &mut DiagnosticCollector) -> Option<T>
    where
        T: FromStr<Err = FieldError>,
    {
        match self.text(index).parse() {
            Ok(value) => Some(value),
            Err(err) => {
                diagnostics.emit(self.invalid(index, name, err));
                None
            }
        }
    }

    /// A field that may be blank; `Some(None)` when it is.
    fn parse_optional<T>(
        &self,
        index: usize,
        name: &str,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<Option<T>>
    where
        T: FromStr<Err = FieldError>,
    {
        if self.text(index).is_empty() {
            return Some(None);
        }
        self.parse(index, name, diagnostics).map(Some)
    }
}

/// Data lines of `source`, with comments and blank lines removed.
fn data_lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .enumerate()
        .filter_map(move |(index, raw)| {
            let start = offset;
            offset += raw.len();

            let text = raw.strip_suffix('\n').unwrap_or(raw);
            let text = text.strip_suffix('\r').unwrap_or(text);
            if text.trim().is_empty() || text.starts_with('#') {
                return None;
            }

            let mut field_start = start;
            let fields = text
                .split('\t')
                .map(|field| {
                    let spanned =
                        Spanned::new(field, Span::new(field_start..field_start + field.len()));
                    field_start += field.len() + 1;
                    spanned
                })
                .collect();
            Some(Line {
                number: index + 1,
                span: Span::new(start..start + text.len()),
                fields,
            })
        })
}

fn load<'a, T>(
    source: &'a str,
    kind: RecordKind,
    build: impl Fn(&Line<'a>, &mut DiagnosticCollector) -> Option<T>,
) -> Result<Vec<T>, ParseError> {
    let mut diagnostics = DiagnosticCollector::new();
    let mut records = Vec::new();

    for line in data_lines(source) {
        if line.fields.len() != kind.field_count() {
            diagnostics.emit(
                Diagnostic::error(format!(
                    "line {}: expected {} tab-separated fields, found {}",
                    line.number,
                    kind.field_count(),
                    line.fields.len()
                ))
                .with_code(ErrorCode::E200)
                .with_label(line.span, format!("{} fields", line.fields.len()))
                .with_help(format!("{kind} fields: {}", kind.fields().join(", "))),
            );
            continue;
        }
        if let Some(record) = build(&line, &mut diagnostics) {
            records.push(record);
        }
    }

    diagnostics.finish()?;
    info!(kind = kind.to_string(), records = records.len(); "Loaded records");
    Ok(records)
}

fn split_list(text: &str, separator: char) -> Vec<String> {
    text.split(separator)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn object(line: &Line<'_>, diagnostics: &mut DiagnosticCollector) -> Option<AstronomicalObject> {
    let id = line.required(0, "object id", diagnostics);
    let types = line.parse::<ObjectTypes>(2, "object type", diagnostics);
    let constellation = line.parse_optional::<Constellation>(3, "constellation", diagnostics);
    let ra = line.parse_optional::<RightAscension>(4, "RA", diagnostics);
    let dec = line.parse_optional::<Declination>(5, "Dec", diagnostics);
    let magnitude = line.parse::<Magnitude>(6, "magnitude", diagnostics);
    let size = line.parse::<Size>(7, "size", diagnostics);
    let separation = line.parse::<Separation>(8, "separation", diagnostics);
    let position_angle = line.parse::<PositionAngle>(9, "position angle", diagnostics);
    let distance = line.parse::<Distance>(11, "distance", diagnostics);

    let (
        Some(id),
        Some(types),
        Some(constellation),
        Some(ra),
        Some(dec),
        Some(magnitude),
        Some(size),
        Some(separation),
        Some(position_angle),
        Some(distance),
    ) = (
        id,
        types,
        constellation,
        ra,
        dec,
        magnitude,
        size,
        separation,
        position_angle,
        distance,
    )
    else {
        return None;
    };

    let position_span = line.span(3).union(line.span(5));
    let location = match (constellation, ra, dec) {
        (Some(constellation), Some(ra), Some(dec)) => {
            Some(FixedLocation::new(constellation, ra, dec))
        }
        (None, None, None) => None,
        _ => {
            diagnostics.emit(
                Diagnostic::error(format!("line {}: {id} has an incomplete position", line.number))
                    .with_code(ErrorCode::E202)
                    .with_label(position_span, "constellation, RA and Dec")
                    .with_help("give all three position fields or none of them"),
            );
            return None;
        }
    };

    let object = AstronomicalObject::new(id, split_list(line.text(1), '/'), types, location)
        .map_err(|err| {
            diagnostics.emit(
                Diagnostic::error(format!("line {}: {id}: {err}", line.number))
                    .with_code(ErrorCode::E202)
                    .with_label(line.span(2), "object types")
                    .with_secondary_label(position_span, "position fields")
                    .with_help(
                        "fixed-location types need a constellation, RA and Dec; \
                         moving bodies have none",
                    ),
            );
        })
        .ok()?;

    Some(
        object
            .with_magnitude(magnitude)
            .with_size(size)
            .with_separation(separation)
            .with_position_angle(position_angle)
            .with_object_class(line.text(10))
            .with_distance(distance)
            .with_notes(line.text(12))
            .with_line(line.number),
    )
}

fn observation(
    line: &Line<'_>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<ObservationRecord> {
    let id = line.required(0, "observation id", diagnostics);
    let date = line.text(1);
    if !is_iso_date(date) {
        diagnostics.emit(
            line.invalid(1, "date", format!("expected yyyy-mm-dd, found '{date}'"))
                .with_help("dates are written like 2018-01-15"),
        );
    }
    let object_ids = split_list(line.text(6), '|');
    if object_ids.is_empty() {
        diagnostics.emit(line.invalid(6, "object ids", "no objects listed"));
    }

    let id = id?;
    if !is_iso_date(date) || object_ids.is_empty() {
        return None;
    }

    let details = SessionDetails {
        location: line.text(2).to_string(),
        scope: line.text(3).to_string(),
        seeing: line.text(4).to_string(),
        transparency: line.text(5).to_string(),
        time: line.text(7).to_string(),
        eyepiece: line.text(8).to_string(),
        magnification: line.text(9).to_string(),
        lunar_phase: line.text(10).to_string(),
        notes: line.text(11).to_string(),
    };
    Some(
        ObservationRecord::new(id, date, object_ids)
            .with_details(details)
            .with_line(line.number),
    )
}

fn program_entry(line: &Line<'_>, diagnostics: &mut DiagnosticCollector) -> Option<ProgramEntry> {
    let program = line.required(0, "program name", diagnostics);
    let item_number = line.parse::<ItemNumber>(1, "item number", diagnostics);
    let object_id = line.required(2, "object id", diagnostics);

    let (Some(program), Some(item_number), Some(object_id)) = (program, item_number, object_id)
    else {
        return None;
    };
    let observation_id = Some(line.text(3).to_string());
    Some(ProgramEntry::new(program, item_number, object_id, observation_id).with_line(line.number))
}

/// Load the objects file.
pub fn load_objects(source: &str) -> Result<Vec<AstronomicalObject>, ParseError> {
    load(source, RecordKind::Objects, object)
}

/// Load the observations file.
pub fn load_observations(source: &str) -> Result<Vec<ObservationRecord>, ParseError> {
    load(source, RecordKind::Observations, observation)
}

/// Load the programs file.
pub fn load_programs(source: &str) -> Result<Vec<ProgramEntry>, ParseError> {
    load(source, RecordKind::Programs, program_entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    const M42: &str = "M42\tOrion Nebula/NGC 1976\tEN+OCl\tOri\t5 35 17\t-5 23 28\t4\t85x60\t\t\tH II\t1344ly\tTrapezium";
    const JUPITER: &str = "Jupiter\tJupiter\tPlanet\t\t\t\t-2.5\t\t\t\t\t\t";

    fn codes(err: &ParseError) -> Vec<ErrorCode> {
        err.diagnostics().iter().filter_map(|d| d.code()).collect()
    }

    #[test]
    fn test_data_lines_skip_comments_and_blanks() {
        let source = "# header\n\nA\tB\r\n  \n#x\tY\nC\tD";
        let lines: Vec<_> = data_lines(source).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 3);
        assert_eq!(lines[0].text(1), "B");
        assert_eq!(lines[1].number, 6);
    }

    #[test]
    fn test_field_spans_index_the_source() {
        let source = "# c\nab\tcde\tf\n";
        let line = data_lines(source).next().unwrap();
        for field in &line.fields {
            let span = field.span();
            assert_eq!(&source[span.start()..span.end()], *field.inner());
        }
        assert_eq!(line.span, Span::new(4..12));
    }

    #[test]
    fn test_load_objects() {
        let source = format!("# id\tnames\n{M42}\n{JUPITER}\n");
        let objects = load_objects(&source).unwrap();
        assert_eq!(objects.len(), 2);

        let m42 = &objects[0];
        assert_eq!(m42.id(), "M42");
        assert_eq!(m42.names(), ["Orion Nebula", "NGC 1976"]);
        assert_eq!(m42.constellation(), Some(Constellation::Orion));
        assert_eq!(m42.magnitude(), &Magnitude::Single(4.0));
        assert_eq!(m42.object_class(), "H II");
        assert_eq!(m42.notes(), "Trapezium");
        assert_eq!(m42.line(), Some(2));

        let jupiter = &objects[1];
        assert!(jupiter.location().is_none());
        assert_eq!(jupiter.line(), Some(3));
    }

    #[test]
    fn test_wrong_field_count_reports_every_line() {
        let source = "a\tb\n{M42}\nc\td\te\n".replace("{M42}", M42);
        let err = load_objects(&source).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E200, ErrorCode::E200]);
        assert!(err.diagnostics()[0].message().starts_with("line 1:"));
        assert!(err.diagnostics()[1].message().starts_with("line 3:"));
    }

    #[test]
    fn test_every_bad_field_is_reported() {
        let line = M42.replace("\tOri\t", "\tXyz\t").replace("\t4\t", "\tbright\t");
        let err = load_objects(&line).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E201, ErrorCode::E201]);

        let label = &err.diagnostics()[0].labels()[0];
        assert_eq!(&line[label.span().start()..label.span().end()], "Xyz");
        assert!(err.diagnostics()[1].message().contains("magnitude"));
    }

    #[test]
    fn test_location_must_match_types() {
        let incomplete = M42.replace("\t-5 23 28\t", "\t\t");
        let err = load_objects(&incomplete).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E202]);

        let planet_with_position = M42.replace("EN+OCl", "Planet");
        let err = load_objects(&planet_with_position).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E202]);
        assert!(err.diagnostics()[0].message().contains("M42"));
    }

    #[test]
    fn test_load_observations() {
        let source = "o1\t2019-05-02\tBackyard\t8\" Dob\t3/5\t4/5\tM42 | M 43\t21:30\t25mm\t48x\tNew\tnice\n";
        let observations = load_observations(source).unwrap();
        let o1 = &observations[0];
        assert_eq!(o1.id(), "o1");
        assert_eq!(o1.date(), "2019-05-02");
        assert_eq!(o1.object_ids(), ["M42", "M 43"]);
        assert_eq!(o1.details().scope, "8\" Dob");
        assert_eq!(o1.details().lunar_phase, "New");
    }

    #[test]
    fn test_observation_date_and_objects_checked() {
        let source = "o1\t05/02/2019\t\t\t\t\t\t\t\t\t\t\n";
        let err = load_observations(source).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E201, ErrorCode::E201]);
        assert!(err.diagnostics()[0].message().contains("date"));
        assert!(err.diagnostics()[1].message().contains("object ids"));
    }

    #[test]
    fn test_load_programs() {
        let source = "Messier\t1\tM1\to1\nMessier\t2a\tM2\t\n";
        let entries = load_programs(source).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_checked_in());
        assert_eq!(entries[1].item_number(), &ItemNumber::new(2, "a"));
        assert!(!entries[1].is_checked_in());
        assert_eq!(entries[1].line(), Some(2));
    }

    #[test]
    fn test_program_item_number_checked() {
        let err = load_programs("Messier\tone\tM1\t\n").unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E201]);
        assert!(err.diagnostics()[0].message().contains("item number"));
    }
}
