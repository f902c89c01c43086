// Integration tests for the per-speaker sliding-window buffer
//
// These exercise the retention invariant against realistic arrival
// patterns: steady packet cadence, long silences, and marker events.

use voice_replay::{Packet, SlidingWindowBuffer};

fn packet_at(ts: u64) -> Packet {
    Packet::new(ts, vec![0u8; 960])
}

#[test]
fn test_steady_cadence_keeps_exactly_the_window() {
    // 20ms cadence, 90s window: once warm, the buffer holds one window's
    // worth of packets and nothing older.
    let retention = 90_000;
    let mut buf = SlidingWindowBuffer::new(retention);

    for ts in (0..200_000u64).step_by(20) {
        buf.append(packet_at(ts));

        let snap = buf.snapshot();
        let newest = snap.last().unwrap().timestamp_ms;
        for p in &snap {
            assert!(p.timestamp_ms + retention >= newest);
        }
    }

    // 90s window / 20ms cadence = 4500 packets, plus the boundary packet.
    assert_eq!(buf.len(), 4501);
}

#[test]
fn test_long_silence_then_single_packet_flushes_window() {
    // Spec scenario: 90s retention, packets at t=0,1000,...,89000, then one
    // at t=200000. Everything below 110000 is evicted.
    let mut buf = SlidingWindowBuffer::new(90_000);
    for ts in (0..=89_000u64).step_by(1000) {
        buf.append(packet_at(ts));
    }
    assert_eq!(buf.len(), 90);

    buf.append(packet_at(200_000));

    let snap = buf.snapshot();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].timestamp_ms, 200_000);
}

#[test]
fn test_markers_age_out_like_audio_packets() {
    let mut buf = SlidingWindowBuffer::new(1000);
    buf.append(Packet::marker(0));
    buf.append(packet_at(500));
    buf.append(packet_at(2000));

    let snap = buf.snapshot();
    assert_eq!(snap.len(), 1);
    assert!(!snap[0].is_marker());
}

#[test]
fn test_reordered_arrival_is_tolerated() {
    // A packet arriving with an older timestamp than the tail must not panic
    // or evict the newer data; front-only eviction is an accepted
    // approximation under reordering.
    let mut buf = SlidingWindowBuffer::new(1000);
    buf.append(packet_at(5000));
    buf.append(packet_at(4900));

    assert_eq!(buf.len(), 2);
    assert_eq!(buf.snapshot()[0].timestamp_ms, 5000);
}
