//! Naive timestamps around daylight-saving transitions
//!
//! Runs in its own test binary because it sets `TZ` for the whole process.
//! The POSIX rule string avoids depending on an installed zoneinfo database.

use aiot_dashboard::api::dto::records_to_readings;
use aiot_dashboard::api::ReadingRecord;
use aiot_dashboard::DisplayZone;
use chrono::{TimeZone, Utc};

/// US Eastern: clocks go 02:00 -> 03:00 on 2024-03-10, 02:00 -> 01:00 on 2024-11-03
const EASTERN: &str = "EST5EDT,M3.2.0,M11.1.0";

#[test]
fn test_local_dst_transitions() {
    std::env::set_var("TZ", EASTERN);
    let zone = DisplayZone::Local;

    // Inside the spring-forward gap: moved past it, like the browser does
    let gap = zone.parse_timestamp("2024-03-10T02:30:00").unwrap();
    assert_eq!(gap, Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap());
    assert_eq!(zone.format_label(&gap), "03:30:00");

    // Repeated hour in autumn: the earlier (daylight) instant
    let repeated = zone.parse_timestamp("2024-11-03T01:30:00").unwrap();
    assert_eq!(repeated, Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());

    // A gap reading no longer fails the whole batch
    let records = vec![
        ReadingRecord {
            fecha: "2024-03-10T03:00:30".to_string(),
            temperatura: 21.0,
            humedad: 52.0,
        },
        ReadingRecord {
            fecha: "2024-03-10T02:59:30.123456".to_string(),
            temperatura: 20.0,
            humedad: 50.0,
        },
    ];
    let readings = records_to_readings(records, zone).unwrap();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[1].label(zone), "03:59:30");
}
