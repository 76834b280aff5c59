//! Trace parsing and replay shared by the `pointer_replay` binary and its
//! regression tests.

use std::{
    cell::RefCell,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    rc::Rc,
};

use anyhow::{bail, Context, Result};
use pointer_gestures::{
    Channel, GestureConfig, Notification, PointerInput, PointerInputKind, PointerTracker,
};

pub const TRACE_HEADER: &str = "pointer_trace,ms,kind,id,x,y";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReplayLine {
    Input {
        ms: u64,
        kind: PointerInputKind,
        id: u64,
        x: f64,
        y: f64,
    },
    Tick {
        ms: u64,
    },
}

impl ReplayLine {
    pub fn ms(&self) -> u64 {
        match self {
            Self::Input { ms, .. } | Self::Tick { ms } => *ms,
        }
    }
}

/// One notification as observed by a tracker-wide subscriber.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recorded {
    pub ms: u64,
    pub id: u64,
    pub channel: Channel,
    pub state: &'static str,
    pub direction: &'static str,
}

/// Feeds `lines` through a fresh tracker, then flushes a long press still
/// pending when the trace stops.
pub fn replay(config: GestureConfig, lines: &[ReplayLine]) -> Vec<Recorded> {
    let mut tracker: PointerTracker<()> = PointerTracker::new(config);
    let recorded = Rc::new(RefCell::new(Vec::<Recorded>::new()));
    let sink = Rc::clone(&recorded);
    tracker
        .signals_mut()
        .subscribe_all(move |note: &Notification<'_, ()>| {
            sink.borrow_mut().push(Recorded {
                ms: note.t_ms,
                id: note.identifier,
                channel: note.channel,
                state: note.state.label(),
                direction: note.direction.label(),
            })
        });

    for line in lines {
        tracker.advance_time(line.ms());
        if let ReplayLine::Input { ms, kind, id, x, y } = *line {
            if let Err(err) = tracker.handle(PointerInput::new(kind, id, x, y, ms, ())) {
                tracing::warn!(%err, "sample rejected");
            }
        }
    }

    if let Some(deadline) = tracker.next_deadline() {
        tracker.advance_time(deadline);
    }

    recorded.take()
}

pub fn parse_trace(path: &Path) -> Result<Vec<ReplayLine>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line =
            line_result.with_context(|| format!("failed to read {}:{}", path.display(), line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == TRACE_HEADER {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        let at = || format!("{}:{}", path.display(), line_no);
        match parts.as_slice() {
            ["tick", ms] => out.push(ReplayLine::Tick {
                ms: ms.parse().with_context(|| format!("{} invalid ms", at()))?,
            }),
            ["pointer_trace", ms, kind, id, x, y] => out.push(ReplayLine::Input {
                ms: ms.parse().with_context(|| format!("{} invalid ms", at()))?,
                kind: parse_kind(kind).with_context(|| format!("{} invalid kind", at()))?,
                id: id.parse().with_context(|| format!("{} invalid id", at()))?,
                x: x.parse().with_context(|| format!("{} invalid x", at()))?,
                y: y.parse().with_context(|| format!("{} invalid y", at()))?,
            }),
            _ => bail!("{} unrecognized trace line: {}", at(), trimmed),
        }
    }

    Ok(out)
}

fn parse_kind(raw: &str) -> Result<PointerInputKind> {
    Ok(match raw.to_ascii_lowercase().as_str() {
        "start" => PointerInputKind::Start,
        "move" => PointerInputKind::Move,
        "end" => PointerInputKind::End,
        "cancel" => PointerInputKind::Cancel,
        other => bail!("unknown input kind '{other}'"),
    })
}

pub fn parse_expected_channels(path: &Path) -> Result<Vec<Channel>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut channels = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line =
            line_result.with_context(|| format!("failed to read {}:{}", path.display(), line_no))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        let Some(channel) = Channel::from_label(token) else {
            bail!(
                "{}:{} invalid expected channel: {}",
                path.display(),
                line_no,
                token
            );
        };
        channels.push(channel);
    }

    Ok(channels)
}

pub fn join_labels(channels: &[Channel]) -> String {
    channels
        .iter()
        .map(|channel| channel.label())
        .collect::<Vec<_>>()
        .join(",")
}
