use time::macros::format_description;
use time::{Date, Month, PrimitiveDateTime, Time};

use super::error::PacketError;
use super::layout;

/// Packs a date-time into the six raw header bytes (year modulo 100).
pub fn encode_timestamp(ts: PrimitiveDateTime) -> [u8; 6] {
    [
        ts.year().rem_euclid(layout::YEAR_MODULUS) as u8,
        u8::from(ts.month()),
        ts.day(),
        ts.hour(),
        ts.minute(),
        ts.second(),
    ]
}

pub fn decode_timestamp(fields: [u8; 6]) -> Result<PrimitiveDateTime, PacketError> {
    let invalid = |_| PacketError::InvalidTimestamp { fields };
    let [year, month, day, hour, minute, second] = fields;
    let month = Month::try_from(month).map_err(invalid)?;
    let date = Date::from_calendar_date(layout::YEAR_BASE + year as i32, month, day)
        .map_err(invalid)?;
    let time = Time::from_hms(hour, minute, second).map_err(invalid)?;
    Ok(PrimitiveDateTime::new(date, time))
}

/// Renders `YYYY-MM-DDTHH:MM:SS` for reports.
///
/// `fields` are the raw header bytes `ts` was decoded from; they are echoed
/// back in the error.
pub fn format_timestamp(ts: PrimitiveDateTime, fields: [u8; 6]) -> Result<String, PacketError> {
    ts.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second]"
    ))
    .map_err(|_| PacketError::InvalidTimestamp { fields })
}

/// Drops sub-second precision, which the header cannot carry.
pub fn truncate_to_seconds(ts: PrimitiveDateTime) -> PrimitiveDateTime {
    ts.replace_nanosecond(0).unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn encode_uses_raw_bytes() {
        let fields = encode_timestamp(datetime!(2019-08-30 23:11:39));
        assert_eq!(fields, [19, 8, 30, 23, 11, 39]);
    }

    #[test]
    fn decode_maps_year_into_2000s() {
        let ts = decode_timestamp([19, 8, 30, 23, 11, 39]).unwrap();
        assert_eq!(ts, datetime!(2019-08-30 23:11:39));
    }

    #[test]
    fn centuries_alias() {
        let fields = encode_timestamp(datetime!(2124-01-02 03:04:05));
        assert_eq!(fields[0], 24);
        let ts = decode_timestamp(fields).unwrap();
        assert_eq!(ts, datetime!(2024-01-02 03:04:05));
    }

    #[test]
    fn decode_rejects_month_zero() {
        let err = decode_timestamp([0; 6]).unwrap_err();
        assert_eq!(err, PacketError::InvalidTimestamp { fields: [0; 6] });
    }

    #[test]
    fn format_pads_every_field() {
        let fields = [9, 1, 2, 3, 4, 5];
        let ts = decode_timestamp(fields).unwrap();
        assert_eq!(format_timestamp(ts, fields).unwrap(), "2009-01-02T03:04:05");
    }

    #[test]
    fn truncation_drops_nanoseconds() {
        let ts = datetime!(2024-05-06 07:08:09.123456789);
        assert_eq!(truncate_to_seconds(ts), datetime!(2024-05-06 07:08:09));
    }
}
