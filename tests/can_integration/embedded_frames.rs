//! Driver frames (embedded-can) -> CanFrame -> ASC lines

use can_asc_trace::{CanFrame, LoggerConfig, MemorySink, TraceLogger};
use chrono::{TimeZone, Utc};
use embedded_can::{Frame, StandardId};

use super::MockCanFrame;

#[test]
fn embedded_frames_to_asc_lines() {
    let walltime = Utc.with_ymd_and_hms(2024, 6, 3, 9, 15, 0).unwrap();
    let mut logger = TraceLogger::with_sink(MemorySink::new(), &LoggerConfig::default());

    // Simulated bus traffic: (monotonic ns, frame)
    let traffic = [
        (2_000_000_000u64, MockCanFrame::new_standard(0x123, &[0xAB, 0xCD])),
        (2_250_000_000, MockCanFrame::new_extended(0x18FE_F100, &[0x01, 0x02, 0x03, 0x04])),
        (2_500_000_000, MockCanFrame::new_standard(0x010, &[])),
        (3_250_000_000, MockCanFrame::new_remote(StandardId::MAX, 0).unwrap()),
    ];

    for (monotonic_ns, driver_frame) in &traffic {
        let frame = CanFrame::from_embedded(driver_frame, 1, *monotonic_ns);
        logger.on_frame(&frame, walltime);
    }

    let lines: Vec<_> = logger.sink().lines().collect();
    assert_eq!(
        lines,
        [
            "date Mon Jun 03 09:15:00.000 am 2024",
            "base hex  timestamps absolute",
            "no internal events logged",
            "0.0000 1 0123 Rx d 2 AB CD",
            "0.2500 1 18FEF100 Rx d 4 01 02 03 04",
            "0.5000 1 0010 Rx d 0",
            "1.2500 1 07FF Rx r 0",
        ]
    );
}

#[test]
fn remote_request_with_dlc_prints_no_payload() {
    let driver_frame = MockCanFrame::new_remote(StandardId::new(0x321).unwrap(), 8).unwrap();
    let frame = CanFrame::from_embedded(&driver_frame, 3, 0);

    assert!(frame.remote);
    assert_eq!(frame.dlc, 8);
    assert_eq!(
        can_asc_trace::format_frame(0.0, &frame),
        "0.0000 3 0321 Rx r 8"
    );
}

#[test]
fn extended_and_standard_ids_keep_their_widths() {
    let standard = CanFrame::from_embedded(&MockCanFrame::new_standard(0x7, &[0x00]), 1, 0);
    let extended = CanFrame::from_embedded(&MockCanFrame::new_extended(0x7, &[0x00]), 1, 0);

    assert!(!standard.extended);
    assert!(extended.extended);
    assert_eq!(can_asc_trace::format_frame(0.0, &standard), "0.0000 1 0007 Rx d 1 00");
    assert_eq!(can_asc_trace::format_frame(0.0, &extended), "0.0000 1 00000007 Rx d 1 00");
}
