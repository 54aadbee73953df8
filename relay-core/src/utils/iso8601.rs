//! ISO-8601 rendering of date-times.
//!
//! The fractional second is printed with as many digits as needed (trailing
//! zeros trimmed) and left out entirely when zero. A zero offset is printed
//! as `Z`.

use time::error::Format;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// `2024-05-01T10:15:30.5`
pub fn format_local(value: PrimitiveDateTime) -> Result<String, Format> {
    let mut out = value.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second]"
    ))?;
    push_fraction(&mut out, value.nanosecond());
    Ok(out)
}

/// `2024-05-01T10:15:30.5+03:00`
pub fn format_offset(value: OffsetDateTime) -> Result<String, Format> {
    let mut out = value.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second]"
    ))?;
    push_fraction(&mut out, value.nanosecond());
    push_offset(&mut out, value.offset())?;
    Ok(out)
}

fn push_fraction(out: &mut String, nanos: u32) {
    if nanos == 0 {
        return;
    }
    let digits = format!("{nanos:09}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

fn push_offset(out: &mut String, offset: UtcOffset) -> Result<(), Format> {
    if offset.is_utc() {
        out.push('Z');
        return Ok(());
    }
    out.push_str(&offset.format(format_description!(
        "[offset_hour sign:mandatory]:[offset_minute]"
    ))?);
    let seconds = offset.seconds_past_minute();
    if seconds != 0 {
        out.push_str(&format!(":{:02}", seconds.unsigned_abs()));
    }
    Ok(())
}
