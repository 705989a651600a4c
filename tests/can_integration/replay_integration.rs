//! Recorded capture (JSON lines) -> replay -> ASC file on disk

use std::io::BufReader;

use can_asc_trace::{
    CanFrame, FdFlags, FrameEvent, JsonLinesEvents, Result, TraceLogger, replay, replay_json_lines,
};
use chrono::{Duration, TimeZone, Utc};

#[test]
fn json_lines_capture_to_asc_file() -> Result<()> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 13, 30, 5).unwrap();
    let events = vec![
        FrameEvent::new(CanFrame::new_data(0x123, &[0xAB, 0xCD]).at(10_000), start),
        FrameEvent::new(
            CanFrame::new_data(0x1ABC_DEF0, &[0xFF]).extended().at(250_010_000),
            start + Duration::milliseconds(250),
        ),
        FrameEvent::new(
            CanFrame::new_remote(0x7FF, 0).at(1_250_010_000),
            start + Duration::milliseconds(1250),
        ),
    ];

    // Store the capture as JSON lines
    let capture_path = std::env::temp_dir().join("can_asc_trace_capture.jsonl");
    let mut capture = String::new();
    for event in &events {
        capture.push_str(&serde_json::to_string(event).unwrap());
        capture.push('\n');
    }
    std::fs::write(&capture_path, capture)?;

    // Read it back and check it survived unchanged
    let file = std::fs::File::open(&capture_path)?;
    let read_back: Vec<FrameEvent> =
        JsonLinesEvents::new(BufReader::new(file)).collect::<Result<_>>()?;
    assert_eq!(read_back, events);

    // Replay into a trace file
    let trace_path = std::env::temp_dir().join("can_asc_trace_replay.asc");
    let file = std::fs::File::open(&capture_path)?;
    let mut logger = TraceLogger::create(&trace_path)?;
    let delivered = replay_json_lines(BufReader::new(file), &mut logger)?;
    assert_eq!(delivered, 3);
    let stats = logger.finish()?;
    assert_eq!(stats.frames_logged, 3);
    assert_eq!(stats.remote_frames, 1);

    let text = std::fs::read_to_string(&trace_path)?;
    assert_eq!(
        text,
        "date Mon Jan 01 01:30:05.000 pm 2024\n\
         base hex  timestamps absolute\n\
         no internal events logged\n\
         0.0000 1 0123 Rx d 2 AB CD\n\
         0.2500 1 1ABCDEF0 Rx d 1 FF\n\
         1.2500 1 07FF Rx r 0\n"
    );

    std::fs::remove_file(&capture_path).ok();
    std::fs::remove_file(&trace_path).ok();
    Ok(())
}

#[test]
fn replay_matches_live_delivery() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let events: Vec<FrameEvent> = (0..10u64)
        .map(|i| {
            let frame = if i % 3 == 0 {
                CanFrame::new_fd(0x400 + i as u32, &[i as u8; 12], FdFlags::new(true, false))
            } else {
                CanFrame::new_data(0x100 + i as u32, &[i as u8; 3])
            };
            FrameEvent::new(frame.at(i * 10_000_000), start)
        })
        .collect();

    let config = can_asc_trace::LoggerConfig::default();
    let mut live = TraceLogger::with_sink(can_asc_trace::MemorySink::new(), &config);
    for event in &events {
        live.on_frame(&event.frame, event.walltime);
    }

    let mut replayed = TraceLogger::with_sink(can_asc_trace::MemorySink::new(), &config);
    assert_eq!(replay(events, &mut replayed), 10);

    assert_eq!(live.sink().as_str(), replayed.sink().as_str());
    assert_eq!(replayed.stats().fd_frames, 4);
}
