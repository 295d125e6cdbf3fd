//! Concurrency tests
//!
//! These tests verify:
//! - Lines from concurrent publishers never interleave
//! - Per-thread call order is preserved in the sink
//! - Toggling levels while publishing is safe

use plain_log::prelude::*;
use plain_log::publish;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const LINES_PER_THREAD: usize = 200;

fn line_format() -> Arc<Format> {
    Arc::new(
        Format::with_line_ending(
            "%s|%s|%s|%s",
            &[
                FormatOption::ThreadId,
                FormatOption::Level,
                FormatOption::RuntimeParameter,
                FormatOption::RuntimeParameter,
            ],
            LineEnding::Lf,
        )
        .expect("Failed to create format"),
    )
}

#[test]
fn test_concurrent_lines_stay_whole_and_ordered() {
    let logger = Logger::new(line_format(), Vec::new());
    logger.enable_all_levels();

    thread::scope(|s| {
        for worker in 0..THREADS {
            let logger = &logger;
            s.spawn(move || {
                for seq in 0..LINES_PER_THREAD {
                    publish!(logger, Level::Much, format!("worker-{}", worker), seq)
                        .expect("Publish failed");
                }
            });
        }
    });

    assert_eq!(
        logger.metrics().lines_written(),
        (THREADS * LINES_PER_THREAD) as u64
    );

    let content = String::from_utf8(logger.into_sink()).expect("Output should be UTF-8");
    let mut next_seq: HashMap<String, usize> = HashMap::new();
    let mut thread_of_worker: HashMap<String, String> = HashMap::new();

    for line in content.lines() {
        let fields: Vec<&str> = line.split('|').collect();
        assert_eq!(fields.len(), 4, "Interleaved or torn line: {:?}", line);
        assert_eq!(fields[1], "MUCH");

        let worker = fields[2].to_string();
        let seq: usize = fields[3].parse().expect("Sequence should be numeric");

        // each worker always reports the same thread id
        let tid = thread_of_worker
            .entry(worker.clone())
            .or_insert_with(|| fields[0].to_string());
        assert_eq!(tid.as_str(), fields[0]);

        let expected = next_seq.entry(worker).or_insert(0);
        assert_eq!(seq, *expected, "Lines from one thread were reordered");
        *expected += 1;
    }

    assert_eq!(next_seq.len(), THREADS);
    assert!(next_seq.values().all(|count| *count == LINES_PER_THREAD));
}

#[test]
fn test_toggling_while_publishing() {
    let logger = Arc::new(Logger::new(line_format(), Vec::new()));
    let stop = Arc::new(AtomicBool::new(false));

    let toggler = {
        let logger = Arc::clone(&logger);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut flips = 0u64;
            while !stop.load(Ordering::Relaxed) {
                let level = Level::ALL[(flips % Level::ALL.len() as u64) as usize];
                if flips % 2 == 0 {
                    logger.enable(level);
                } else {
                    logger.disable(level);
                }
                flips += 1;
            }
        })
    };

    let publishers: Vec<_> = (0..4)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for seq in 0..LINES_PER_THREAD {
                    let level = Level::ALL[seq % Level::ALL.len()];
                    publish!(logger, level, worker, seq).expect("Publish failed");
                }
            })
        })
        .collect();

    for handle in publishers {
        handle.join().expect("Publisher panicked");
    }
    stop.store(true, Ordering::Relaxed);
    toggler.join().expect("Toggler panicked");

    let written = logger.metrics().lines_written();
    let suppressed = logger.metrics().suppressed();
    assert_eq!(written + suppressed, (4 * LINES_PER_THREAD) as u64);
    assert_eq!(logger.metrics().rejected(), 0);

    let logger = Arc::try_unwrap(logger).ok().expect("Logger still shared");
    let content = String::from_utf8(logger.into_sink()).unwrap();
    assert_eq!(content.lines().count() as u64, written);
    assert!(content.lines().all(|line| line.split('|').count() == 4));
}

#[test]
fn test_shared_format_across_loggers() {
    let format = line_format();
    let loggers: Vec<_> = (0..THREADS)
        .map(|_| Logger::new(Arc::clone(&format), Vec::new()))
        .collect();

    thread::scope(|s| {
        for (worker, logger) in loggers.iter().enumerate() {
            s.spawn(move || {
                logger.enable(Level::Little);
                for seq in 0..LINES_PER_THREAD {
                    publish!(logger, Level::Little, worker, seq).expect("Publish failed");
                }
            });
        }
    });

    for (worker, logger) in loggers.into_iter().enumerate() {
        let content = String::from_utf8(logger.into_sink()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), LINES_PER_THREAD);
        for (seq, line) in lines.iter().enumerate() {
            assert!(line.ends_with(&format!("|LITTLE|{}|{}", worker, seq)), "{:?}", line);
        }
    }
}
