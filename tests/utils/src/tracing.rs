//! Captures tracing output of tests so it can be asserted on.

use std::{
    io,
    sync::{Mutex, MutexGuard, Once},
};
use tracing_core::Dispatch;
use tracing_subscriber::{fmt::MakeWriter, util::SubscriberInitExt};

lazy_static! {
    pub static ref GLOBAL_TRACING_BUF: Mutex<Vec<u8>> = Mutex::new(vec![]);
}

static INIT: Once = Once::new();

/// Appends every formatted event to a shared buffer.
#[derive(Debug, Clone, Copy)]
pub struct TracingWriter<'a> {
    buf: &'a Mutex<Vec<u8>>,
}

impl<'a> TracingWriter<'a> {
    pub fn new(buf: &'a Mutex<Vec<u8>>) -> Self {
        Self { buf }
    }

    fn buf(&self) -> io::Result<MutexGuard<'a, Vec<u8>>> {
        self.buf
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "tracing buffer poisoned"))
    }
}

impl<'a> io::Write for TracingWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf()?.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter for TracingWriter<'a> {
    type Writer = Self;

    fn make_writer(&self) -> Self::Writer {
        *self
    }
}

/// Installs the capturing subscriber for the whole test binary. `log`
/// records are forwarded as well.
pub fn init_tracing() {
    INIT.call_once(|| {
        let subscriber: Dispatch = tracing_subscriber::fmt()
            .with_writer(TracingWriter::new(&*GLOBAL_TRACING_BUF))
            .with_max_level(tracing_core::Level::DEBUG)
            .with_ansi(false)
            .into();
        subscriber.init()
    });
}

// logs_contain may panic so don't use in production code
pub fn logs_contain(s: &str) -> bool {
    let buf = GLOBAL_TRACING_BUF.lock().unwrap();
    String::from_utf8_lossy(&buf)
        .lines()
        .any(|line| line.contains(s))
}

pub fn logs_clear() {
    GLOBAL_TRACING_BUF.lock().unwrap().clear()
}
