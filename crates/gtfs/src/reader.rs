use std::{
    error, fmt,
    io::{BufRead, BufReader, Read},
    iter::FusedIterator,
    marker::PhantomData,
};

use csv::{ErrorKind, StringRecord};
use serde::de::DeserializeOwned;

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// A GTFS row that could not be decoded into its record type.
#[derive(Debug)]
pub struct DecodeError {
    /// Line of the source the error occurred on.
    pub line: Option<u64>,
    /// Header name of the offending column, if the error is bound to a column.
    pub field: Option<String>,
    /// Raw value of the offending column.
    pub value: Option<String>,
    source: csv::Error,
}

impl DecodeError {
    fn new(source: csv::Error, headers: &StringRecord, record: Option<&StringRecord>) -> Self {
        let column = match source.kind() {
            ErrorKind::Deserialize { err, .. } => err.field().map(|index| index as usize),
            _ => None,
        };
        Self::with_column(source, column, headers, record)
    }

    fn with_column(
        source: csv::Error,
        column: Option<usize>,
        headers: &StringRecord,
        record: Option<&StringRecord>,
    ) -> Self {
        Self {
            line: source.position().map(|pos| pos.line()),
            field: column.and_then(|index| headers.get(index)).map(str::to_owned),
            value: column
                .zip(record)
                .and_then(|(index, record)| record.get(index))
                .map(str::to_owned),
            source,
        }
    }

    fn message(&self) -> String {
        match self.source.kind() {
            ErrorKind::Deserialize { err, .. } => err.kind().to_string(),
            _ => self.source.to_string(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        if let Some(field) = &self.field {
            write!(f, "field '{}': ", field)?;
        }
        if let Some(value) = &self.value {
            write!(f, "value '{}': ", value)?;
        }
        f.write_str(&self.message())
    }
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Lazily decodes the rows of one GTFS file into records of type `E`.
///
/// Columns are bound by header name. Unknown columns are ignored and missing ones
/// leave the field at its default. The first malformed row yields a
/// [`DecodeError`], after which the reader is exhausted.
pub struct EntityReader<E, R: Read> {
    reader: csv::Reader<BufReader<R>>,
    headers: StringRecord,
    record: StringRecord,
    done: bool,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> EntityReader<E, R>
where
    E: DeserializeOwned,
    R: Read,
{
    /// Reads the header row of `source`.
    pub fn new(source: R) -> Result<Self, DecodeError> {
        let mut source = BufReader::new(source);
        let empty = StringRecord::new();

        if source
            .fill_buf()
            .map_err(|why| DecodeError::new(why.into(), &empty, None))?
            .starts_with(UTF8_BOM)
        {
            source.consume(UTF8_BOM.len());
        }

        let mut reader = csv::Reader::from_reader(source);
        let headers = reader
            .headers()
            .map_err(|why| DecodeError::new(why, &empty, None))?
            .clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            done: false,
            _entity: PhantomData,
        })
    }
}

impl<E, R> Iterator for EntityReader<E, R>
where
    E: DeserializeOwned,
    R: Read,
{
    type Item = Result<E, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = match self.reader.read_record(&mut self.record) {
            Ok(false) => {
                self.done = true;
                return None;
            }
            Ok(true) => self.record.deserialize(Some(&self.headers)).map_err(|why| {
                let column = match why.kind() {
                    ErrorKind::Deserialize { err, .. } => err
                        .field()
                        .map(|index| index as usize)
                        .or_else(|| failing_column::<E>(&self.headers, &self.record)),
                    _ => None,
                };
                DecodeError::with_column(why, column, &self.headers, Some(&self.record))
            }),
            Err(why) => Err(DecodeError::new(why, &self.headers, None)),
        };

        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

/// Finds the column of `record` that fails to decode on its own.
///
/// Errors raised by custom field deserializers carry no column, so each cell is
/// decoded in isolation. Only works for record types whose fields all have
/// defaults, which is checked by decoding an empty record first.
fn failing_column<E: DeserializeOwned>(
    headers: &StringRecord,
    record: &StringRecord,
) -> Option<usize> {
    let empty = StringRecord::new();
    if empty.deserialize::<E>(Some(&empty)).is_err() {
        return None;
    }

    headers.iter().zip(record.iter()).position(|(header, value)| {
        let header = StringRecord::from(vec![header]);
        let value = StringRecord::from(vec![value]);
        value.deserialize::<E>(Some(&header)).is_err()
    })
}

impl<E, R> FusedIterator for EntityReader<E, R>
where
    E: DeserializeOwned,
    R: Read,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_model::{
        agency::Agency, calendar::Calendar, stop_times::StopTime, stops::Stop,
    };

    fn read<E: DeserializeOwned>(csv: &str) -> Vec<Result<E, DecodeError>> {
        EntityReader::<E, _>::new(csv.as_bytes()).unwrap().collect()
    }

    #[test]
    fn binds_columns_by_header_name() {
        let agencies = read::<Agency>(
            "agency_url,agency_timezone,agency_name,agency_id\n\
             https://sbahn.berlin/,Europe/Berlin,S-Bahn Berlin GmbH,1\n",
        );
        assert_eq!(agencies.len(), 1);
        let agency = agencies[0].as_ref().unwrap();
        assert_eq!(agency.id, "1");
        assert_eq!(agency.name, "S-Bahn Berlin GmbH");
        assert_eq!(agency.url, "https://sbahn.berlin/");
    }

    #[test]
    fn missing_columns_and_empty_numbers_use_defaults() {
        let stops = read::<Stop>("stop_id,stop_lat\nA,\nB,52.5\n");
        let stops: Vec<Stop> = stops.into_iter().map(Result::unwrap).collect();
        assert_eq!(stops[0].name, "");
        assert_eq!(stops[0].latitude, 0.0);
        assert_eq!(stops[1].latitude, 52.5);
        assert_eq!(stops[1].longitude, 0.0);
    }

    #[test]
    fn skips_byte_order_mark() {
        let agencies = read::<Agency>("\u{feff}agency_id,agency_name\nX,Example\n");
        assert_eq!(agencies[0].as_ref().unwrap().id, "X");
    }

    #[test]
    fn empty_source_yields_nothing() {
        assert!(read::<Agency>("").is_empty());
        assert!(read::<Agency>("agency_id,agency_name\n").is_empty());
    }

    #[test]
    fn decodes_stop_times() {
        let stop_times = read::<StopTime>(
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             T1,14:37:01,14:38:00,S1,1\n\
             T1,24:05:00,24:06:00,S2,2\n",
        );
        let second = stop_times[1].as_ref().unwrap();
        assert_eq!(second.trip_id, "T1");
        assert_eq!(second.stop_id, "S2");
        assert_eq!(second.arrival.seconds(), 24 * 3600 + 300);
        assert_eq!(second.departure.seconds(), 24 * 3600 + 360);
        assert_eq!(second.stop_sequence, 2);
        assert_eq!(stop_times[0].as_ref().unwrap().arrival.seconds(), 52621);
    }

    #[test]
    fn stops_at_first_malformed_row() {
        let stop_times = read::<StopTime>(
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             T1,10:00:00,10:00:00,S1,1\n\
             T1,10:05:00,a4:37:01,S2,2\n\
             T1,10:10:00,10:10:00,S3,3\n",
        );
        assert_eq!(stop_times.len(), 2);
        assert!(stop_times[0].is_ok());

        let error = stop_times[1].as_ref().unwrap_err();
        assert_eq!(error.line, Some(3));
        assert!(error.to_string().contains("hours from 'a4'"), "{error}");
    }

    #[test]
    fn names_column_of_malformed_time() {
        let stop_times = read::<StopTime>(
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             T1,10:00:00,a4:37:01,S2,2\n",
        );
        let error = stop_times[0].as_ref().unwrap_err();
        assert_eq!(error.line, Some(2));
        assert_eq!(error.field.as_deref(), Some("departure_time"));
        assert_eq!(error.value.as_deref(), Some("a4:37:01"));
        assert_eq!(
            error.to_string(),
            "line 2: field 'departure_time': value 'a4:37:01': \
             cannot parse GTFS hours from 'a4'"
        );
    }

    #[test]
    fn names_column_of_invalid_weekday_flag() {
        let calendars = read::<Calendar>(
            "service_id,monday,tuesday,start_date,end_date\n\
             WD,1,2,20240101,20241231\n",
        );
        let error = calendars[0].as_ref().unwrap_err();
        assert_eq!(error.field.as_deref(), Some("tuesday"));
        assert_eq!(error.value.as_deref(), Some("2"));
    }

    #[test]
    fn rejects_non_numeric_integers() {
        let stop_times = read::<StopTime>(
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             T1,10:00:00,10:00:00,S1,first\n",
        );
        let error = stop_times[0].as_ref().unwrap_err();
        assert_eq!(error.field.as_deref(), Some("stop_sequence"));
        assert_eq!(error.value.as_deref(), Some("first"));
    }

    #[test]
    fn rejects_rows_with_wrong_length() {
        let agencies = read::<Agency>("agency_id,agency_name\nA,One\nB,Two,extra\nC,Three\n");
        assert_eq!(agencies.len(), 2);
        let error = agencies[1].as_ref().unwrap_err();
        assert_eq!(error.line, Some(3));
        assert!(error.field.is_none());
    }
}
