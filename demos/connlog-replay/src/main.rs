mod cli;

use clap::Parser;
use connlog::prelude::*;
use connlog::trace::TraceError;
use connlog::KeywordRegistry;
use log::{error, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How long the replay loop waits for an event before checking for a signal.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Events read ahead of the coordinator.
const READ_AHEAD: usize = 64;

type TraceEvent = Result<Event, TraceError>;

fn list_keywords() {
    let registry = KeywordRegistry::standard();
    println!("keyword table v{}", KeywordRegistry::VERSION);
    for keyword in registry.keywords() {
        println!(
            "{:<16} {:<14} {}",
            keyword.usage(),
            keyword.kind().to_string(),
            keyword.description
        );
    }
}

fn open_input(args: &cli::Args) -> Result<Box<dyn BufRead + Send>, Error> {
    match args.input() {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Read `input` on its own thread so a blocked read never holds up shutdown.
///
/// The channel disconnects once the input is exhausted or after the first
/// error has been sent.
fn spawn_reader(input: Box<dyn BufRead + Send>) -> Receiver<TraceEvent> {
    let (tx, rx) = mpsc::sync_channel(READ_AHEAD);
    thread::spawn(move || {
        for event in TraceReader::new(input) {
            let failed = event.is_err();
            if tx.send(event).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Feed events into `coordinator` until the input ends, fails, or `stop` is set.
fn pump<P: Printer>(
    events: &Receiver<TraceEvent>,
    stop: &AtomicBool,
    coordinator: &mut Coordinator<P>,
) -> (ShutdownReason, Option<TraceError>) {
    loop {
        if stop.load(Ordering::Relaxed) {
            return (ShutdownReason::SignalReceived, None);
        }
        match events.recv_timeout(POLL_INTERVAL) {
            Ok(Ok(event)) => coordinator.handle(&event),
            Ok(Err(e)) => return (ShutdownReason::InputError, Some(e)),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return (ShutdownReason::EndOfInput, None),
        }
    }
}

fn replay(args: &cli::Args) -> Result<(), Error> {
    let config = args.config()?;
    let program = config.program()?;
    let mut coordinator = Coordinator::new(program, config.output.build())?;

    let stop = Arc::new(AtomicBool::new(false));
    if let Err(e) = signal_hook::flag::register(signal_hook::consts::SIGINT, stop.clone()) {
        log::warn!("Failed to register SIGINT handler: {e}");
    }
    if let Err(e) = signal_hook::flag::register(signal_hook::consts::SIGTERM, stop.clone()) {
        log::warn!("Failed to register SIGTERM handler: {e}");
    }

    let events = spawn_reader(open_input(args)?);
    let (reason, failure) = pump(&events, &stop, &mut coordinator);

    let stats = coordinator.shutdown(reason);
    if args.verbose {
        info!(
            "Replayed {} events: {} records printed, {} dropped",
            stats.events, stats.printed, stats.dropped
        );
    }

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn main() {
    env_logger::init();
    let args = cli::Args::parse();

    if args.list_keywords {
        list_keywords();
        return;
    }

    if args.verbose {
        info!("Starting connection log replay");
    }

    if let Err(e) = replay(&args) {
        error!("{e}");
        eprintln!("connlog-replay: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};
    use std::time::Instant;

    static LOCK: Mutex<()> = Mutex::new(());

    fn serial() -> MutexGuard<'static, ()> {
        LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn session() -> Coordinator<StreamPrinter<Vec<u8>>> {
        Coordinator::from_format("%status", StreamPrinter::new(Vec::new()))
            .expect("start coordinator")
    }

    fn output(coordinator: &Coordinator<StreamPrinter<Vec<u8>>>) -> String {
        String::from_utf8(coordinator.printer().get_ref().clone()).expect("utf-8 output")
    }

    const TRACE: &str = concat!(
        r#"{"event":"opening","client":"10.1.1.1:4000","server":"10.1.1.2:80","at":"1970-01-01T00:00:01Z"}"#,
        "\n",
        r#"{"event":"close","client":"10.1.1.1:4000","server":"10.1.1.2:80","at":"1970-01-01T00:00:02Z"}"#,
        "\n",
    );

    #[test]
    fn test_signal_stops_idle_input() {
        let _guard = serial();
        let mut coordinator = session();
        // The sender stays alive, as with a terminal that never sends EOF.
        let (_tx, rx) = mpsc::sync_channel::<TraceEvent>(1);
        let stop = Arc::new(AtomicBool::new(false));

        let trigger = Arc::clone(&stop);
        let worker = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            trigger.store(true, Ordering::Relaxed);
        });

        let started = Instant::now();
        let (reason, failure) = pump(&rx, &stop, &mut coordinator);
        worker.join().expect("signal thread join");

        assert_eq!(reason, ShutdownReason::SignalReceived);
        assert!(failure.is_none());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_reader_thread_replays_to_end() {
        let _guard = serial();
        let mut coordinator = session();
        let stop = AtomicBool::new(false);
        let events = spawn_reader(Box::new(TRACE.as_bytes()));

        let (reason, failure) = pump(&events, &stop, &mut coordinator);
        assert_eq!(reason, ShutdownReason::EndOfInput);
        assert!(failure.is_none());
        assert_eq!(output(&coordinator), "unique\n");
        assert_eq!(coordinator.stats().events, 2);
    }

    #[test]
    fn test_reader_thread_stops_at_bad_line() {
        let _guard = serial();
        let mut coordinator = session();
        let stop = AtomicBool::new(false);
        let trace = format!("{TRACE}not json\n{TRACE}");
        let events = spawn_reader(Box::new(io::Cursor::new(trace.into_bytes())));

        let (reason, failure) = pump(&events, &stop, &mut coordinator);
        assert_eq!(reason, ShutdownReason::InputError);
        assert!(matches!(failure, Some(TraceError::Parse { line: 3, .. })));
        assert_eq!(output(&coordinator), "unique\n");
    }
}
