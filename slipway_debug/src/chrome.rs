// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] takes events from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Tweens become async spans keyed by their transition id: they open on
//! start and close on commit or cancel. Everything else is an instant event.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use slipway_core::time::HostTime;

use crate::recorder::RecordedEvent;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::new();

    for recorded in events {
        let ts = us(recorded.at());
        match recorded {
            RecordedEvent::Init(e) => {
                out.push(instant("Init", "Lifecycle", ts, json!({
                    "slides": e.slides,
                    "total_width": e.total_width,
                    "looping": e.looping,
                    "current": e.current,
                })));
            }
            RecordedEvent::Navigate(e) => {
                out.push(instant("Navigate", "Navigation", ts, json!({
                    "cause": format!("{:?}", e.cause),
                    "from": e.from,
                    "to": e.to,
                })));
            }
            RecordedEvent::TransitionStart(e) => {
                out.push(json!({
                    "ph": "b",
                    "name": "Transition",
                    "cat": "Transition",
                    "id": e.id.0,
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "from_offset": e.from_offset,
                        "to_offset": e.to_offset,
                        "duration_ms": e.duration.as_millis(),
                    }
                }));
            }
            RecordedEvent::TransitionCancel(e) => {
                out.push(span_end(e.id.0, ts, "cancelled"));
            }
            RecordedEvent::Commit(e) => {
                if let Some(id) = e.id {
                    out.push(span_end(id.0, ts, "committed"));
                }
                out.push(instant("Commit", "Navigation", ts, json!({
                    "position": e.position,
                    "slide_index": e.slide_index,
                    "offset": e.offset,
                })));
            }
            RecordedEvent::LoopCorrection(e) => {
                out.push(instant("LoopCorrection", "Navigation", ts, json!({
                    "from": e.from,
                    "to": e.to,
                    "offset": e.offset,
                })));
            }
            RecordedEvent::Autoplay(e) => {
                out.push(instant("Autoplay", "Autoplay", ts, json!({
                    "state": format!("{:?}", e.state),
                })));
            }
            RecordedEvent::Image { src, phase, .. } => {
                out.push(instant("Image", "LazyLoad", ts, json!({
                    "src": src,
                    "phase": format!("{phase:?}"),
                })));
            }
            RecordedEvent::Stale(e) => {
                out.push(instant("Stale", "Guard", ts, json!({
                    "kind": format!("{:?}", e.kind),
                })));
            }
            RecordedEvent::Destroy(_) => {
                out.push(instant("Destroy", "Lifecycle", ts, json!({})));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn instant(name: &str, cat: &str, ts: f64, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "s": "t",
        "args": args,
    })
}

fn span_end(id: u64, ts: f64, outcome: &str) -> Value {
    json!({
        "ph": "e",
        "name": "Transition",
        "cat": "Transition",
        "id": id,
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "args": { "outcome": outcome },
    })
}

fn us(t: HostTime) -> f64 {
    t.ticks() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use slipway_core::backend::TransitionId;
    use slipway_core::time::Duration;
    use slipway_core::trace::{CancelEvent, CommitEvent, TraceSink, TransitionEvent};

    #[test]
    fn tweens_become_async_spans() {
        let recorder = RecorderSink::new();
        let mut sink = recorder.clone();
        sink.on_transition_start(&TransitionEvent {
            at: HostTime(1_000),
            id: TransitionId(1),
            from_offset: 0.0,
            to_offset: 100.0,
            duration: Duration::from_millis(200),
        });
        sink.on_transition_cancel(&CancelEvent {
            at: HostTime(1_050),
            id: TransitionId(1),
        });
        sink.on_transition_start(&TransitionEvent {
            at: HostTime(1_050),
            id: TransitionId(2),
            from_offset: 40.0,
            to_offset: 200.0,
            duration: Duration::from_millis(200),
        });
        sink.on_commit(&CommitEvent {
            at: HostTime(201_050),
            id: Some(TransitionId(2)),
            position: 2,
            slide_index: 3,
            offset: 200.0,
        });

        let mut out = Vec::new();
        export(&recorder.events(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 5);

        assert_eq!(parsed[0]["ph"], "b");
        assert_eq!(parsed[0]["id"], 1);
        assert_eq!(parsed[1]["ph"], "e");
        assert_eq!(parsed[1]["args"]["outcome"], "cancelled");
        assert_eq!(parsed[2]["ph"], "b");
        assert_eq!(parsed[3]["ph"], "e");
        assert_eq!(parsed[3]["id"], 2);
        assert_eq!(parsed[3]["ts"], 201_050.0);
        assert_eq!(parsed[4]["name"], "Commit");
        assert_eq!(parsed[4]["args"]["slide_index"], 3);
    }

    #[test]
    fn initial_commit_has_no_span() {
        let recorder = RecorderSink::new();
        let mut sink = recorder.clone();
        sink.on_commit(&CommitEvent {
            at: HostTime(0),
            id: None,
            position: 0,
            slide_index: 1,
            offset: 0.0,
        });
        let mut out = Vec::new();
        export(&recorder.events(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["ph"], "i");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
    }
}
