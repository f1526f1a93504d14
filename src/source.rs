//! Data sources producing one raw protocol line per poll.
//!
//! - [`SerialSource`]: a device on a serial port.
//! - [`SyntheticSource`]: a smooth random walk, for running without hardware.

use std::io::{self, BufRead, BufReader};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::protocol::format_line;

/// Read timeout applied to serial ports.
pub const SERIAL_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Where samples come from. Chosen once at startup.
pub enum DataSource {
    Serial(SerialSource),
    Synthetic(SyntheticSource),
}

impl DataSource {
    /// Read the next line. Never fails: timeouts and I/O errors yield whatever
    /// was read so far, possibly an empty string, for the parser to reject.
    pub fn poll(&mut self) -> String {
        match self {
            DataSource::Serial(s) => s.poll(),
            DataSource::Synthetic(s) => s.poll(),
        }
    }

    /// Release the underlying device, if any.
    pub fn close(&mut self) {
        if let DataSource::Serial(s) = self {
            s.close();
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Serial(s) => format!("{}@{}", s.port_name, s.baud),
            DataSource::Synthetic(_) => "synthetic".to_string(),
        }
    }
}

impl From<SerialSource> for DataSource {
    fn from(s: SerialSource) -> Self {
        DataSource::Serial(s)
    }
}

impl From<SyntheticSource> for DataSource {
    fn from(s: SyntheticSource) -> Self {
        DataSource::Synthetic(s)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serial
// ─────────────────────────────────────────────────────────────────────────────

pub struct SerialSource {
    port_name: String,
    baud: u32,
    reader: Option<Box<dyn BufRead + Send>>,
}

impl SerialSource {
    /// Open `port_name` at `baud` with a 1 s read timeout.
    pub fn open(port_name: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(port_name, baud)
            .timeout(SERIAL_READ_TIMEOUT)
            .open()
            .map_err(|source| Error::PortOpen {
                port: port_name.to_string(),
                baud,
                source,
            })?;
        log::info!("opened serial port {port_name}@{baud}");
        Ok(Self::from_reader(port_name, baud, BufReader::new(port)))
    }

    /// Wrap an already open byte stream, e.g. a recorded session.
    pub fn from_reader<R>(port_name: &str, baud: u32, reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        Self {
            port_name: port_name.to_string(),
            baud,
            reader: Some(Box::new(reader)),
        }
    }

    pub fn poll(&mut self) -> String {
        match self.reader.as_mut() {
            Some(reader) => read_line_lossy(&mut **reader),
            None => String::new(),
        }
    }

    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            log::info!("closed serial port {}", self.port_name);
        }
    }
}

/// Read up to and including the next `\n`, stopping early on timeout or error.
///
/// The result is decoded lossily and trimmed.
pub fn read_line_lossy<R: BufRead + ?Sized>(reader: &mut R) -> String {
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::TimedOut => {
            log::trace!("serial read timed out with {} bytes", buf.len());
        }
        Err(e) => {
            log::warn!("serial read failed: {e}");
        }
    }
    String::from_utf8_lossy(&buf).trim().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Synthetic
// ─────────────────────────────────────────────────────────────────────────────

/// Largest duty-cycle change per poll, in percentage points.
const DUTY_STEP: f64 = 5.0;

/// Bounded random walk around a slowly drifting midpoint.
///
/// Each poll perturbs the midpoint independently for both temperatures by a
/// symmetric amount in (-1, 1), then moves the midpoint to their mean. The duty
/// cycle walks on its own and is clamped to 0..=100.
pub struct SyntheticSource {
    rng: StdRng,
    midpoint: f64,
    duty: f64,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic generator, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let midpoint = rng.gen_range(20..=45) as f64 + rng.gen::<f64>();
        let duty = rng.gen_range(0.0..100.0);
        Self { rng, midpoint, duty }
    }

    pub fn poll(&mut self) -> String {
        let t1 = self.midpoint + self.perturbation();
        let t2 = self.midpoint + self.perturbation();
        self.midpoint = (t1 + t2) / 2.0;
        self.duty = (self.duty + DUTY_STEP * self.perturbation()).clamp(0.0, 100.0);
        format_line(t1, t2, self.duty)
    }

    /// Symmetric value in (-1, 1).
    fn perturbation(&mut self) -> f64 {
        self.rng.gen::<f64>() - self.rng.gen::<f64>()
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}
