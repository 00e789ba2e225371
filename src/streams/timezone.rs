//! UTC timezone resolution
//!
//! Reporting endpoints take a numeric `timezone_id` rather than a zone name.
//! The id for UTC is looked up once per run, before any stream syncs.

use crate::error::{Error, Result};
use crate::http::{RestClient, StreamRequest};
use tracing::debug;

/// Endpoint listing the timezones Everflow knows about
pub const TIMEZONES_PATH: &str = "/meta/timezones";

const UTC: &str = "UTC";

/// Find the `timezone_id` whose `timezone` is `UTC`
pub async fn resolve_utc_timezone_id(client: &dyn RestClient) -> Result<i64> {
    let body = client.send(&StreamRequest::get(TIMEZONES_PATH)).await?;

    let timezones = body
        .get("timezones")
        .and_then(|v| v.as_array())
        .ok_or_else(|| Error::malformed("timezones", "missing 'timezones' array"))?;

    let entry = timezones
        .iter()
        .find(|tz| tz.get("timezone").and_then(|v| v.as_str()) == Some(UTC))
        .ok_or_else(|| Error::TimezoneNotFound {
            timezone: UTC.to_string(),
        })?;

    let id = entry
        .get("timezone_id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| Error::malformed("timezones", "UTC entry has no integer 'timezone_id'"))?;

    debug!(timezone_id = id, "Resolved UTC timezone");
    Ok(id)
}
