/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines progress reporting messages, sinks, and helper functions for fit observability.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Progress reporting primitives for weight computations.

use std::fmt::Debug;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// Progress events emitted while computing RBF weights.
#[derive(Debug, Clone)]
pub enum ProgressMsg {
    /// Event indicating that a weight solve completed.
    FitCompleted {
        num_points: usize,
        dimensions: usize,
        duration: Duration,
    },

    /// Arbitrary informational message.
    Message { message: String },
}

/// Sink that consumes progress messages.
pub trait ProgressSink: Send + Sync + Debug {
    fn emit(&self, msg: ProgressMsg);
}

/// Progress sink that forwards messages over a channel.
#[derive(Debug)]
pub struct ClosureSink {
    tx: mpsc::SyncSender<ProgressMsg>,
}

impl ProgressSink for ClosureSink {
    #[inline]
    fn emit(&self, msg: ProgressMsg) {
        let _ = self.tx.try_send(msg);
    }
}

/// Spawns a listener thread that runs a handler closure for each progress message.
///
/// The listener thread ends once every clone of the returned sink has been
/// dropped and the channel disconnects.
pub fn closure_sink<F>(
    buffer: usize,
    mut handler: F,
) -> (Arc<dyn ProgressSink>, thread::JoinHandle<()>)
where
    F: FnMut(ProgressMsg) + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel::<ProgressMsg>(buffer.max(1));
    let sink: Arc<dyn ProgressSink> = Arc::new(ClosureSink { tx });

    let handle = thread::spawn(move || {
        while let Ok(msg) = rx.recv() {
            handler(msg);
        }
    });

    (sink, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use std::sync::Mutex;

    #[test]
    fn closure_sink_delivers_messages_in_order() {
        let collected = Arc::new(Mutex::new(Vec::new()));
        let collector = collected.clone();

        let (sink, handle) = closure_sink(8, move |msg| {
            collector.lock().unwrap().push(msg);
        });

        sink.emit(ProgressMsg::Message {
            message: "first".to_string(),
        });
        sink.emit(ProgressMsg::FitCompleted {
            num_points: 3,
            dimensions: 1,
            duration: Duration::from_millis(1),
        });

        drop(sink);
        handle.join().unwrap();

        let messages = collected.lock().unwrap();
        assert!(messages.len() == 2);
        assert!(matches!(
            &messages[0],
            ProgressMsg::Message { message } if message == "first"
        ));
        assert!(matches!(
            messages[1],
            ProgressMsg::FitCompleted { num_points: 3, dimensions: 1, .. }
        ));
    }
}
