//! Packet capture wrapper around pcap

use crate::decode::decode_frame;
use crate::interface::get_interface;
use pcap::{Active, Capture, Device};
use ppscount_core::{Error, PacketEvent, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info};

/// Default maximum bytes captured per frame
const DEFAULT_SNAPLEN: i32 = 1600;

/// Default pcap read timeout (milliseconds). Expired read timeouts are a
/// normal empty read, not a stream error; they also bound how long stopping
/// the capture can take.
const DEFAULT_TIMEOUT_MS: i32 = 1000;

/// Capture-open parameters
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Maximum bytes to keep per frame
    pub snaplen: i32,
    /// Receive frames not addressed to the interface
    pub promiscuous: bool,
    /// pcap read timeout in milliseconds
    pub timeout_ms: i32,
    /// Deliver frames as they arrive instead of buffering
    pub immediate_mode: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            snaplen: DEFAULT_SNAPLEN,
            promiscuous: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            immediate_mode: true,
        }
    }
}

/// A live capture on one interface.
///
/// The pcap handle is owned by the reader thread and closed when that thread
/// exits, so the handle is released on every exit path; `stop` (also run on
/// drop) asks the thread to finish and joins it.
pub struct PacketCapture {
    /// Interface name
    interface: String,
    /// Capture configuration
    config: CaptureConfig,
    /// BPF filter to apply at open time
    filter: Option<String>,
    /// Reader-thread liveness flag
    running: Arc<AtomicBool>,
    /// Reader thread handle (when running)
    reader: Option<JoinHandle<()>>,
}

impl PacketCapture {
    /// Prepare a capture on `interface` with default parameters
    pub fn new(interface: &str) -> Result<Self> {
        Self::with_config(interface, CaptureConfig::default())
    }

    /// Prepare a capture with explicit parameters.
    ///
    /// Fails if the interface does not exist or is not up; nothing is opened
    /// until [`start`](Self::start).
    pub fn with_config(interface: &str, config: CaptureConfig) -> Result<Self> {
        let info = get_interface(interface)?;
        if !info.is_up {
            return Err(Error::interface(format!(
                "interface '{}' is not up",
                interface
            )));
        }

        Ok(Self {
            interface: interface.to_string(),
            config,
            filter: None,
            running: Arc::new(AtomicBool::new(false)),
            reader: None,
        })
    }

    /// Set a BPF filter to apply when the handle is opened.
    ///
    /// An invalid expression surfaces as an open error from `start`.
    pub fn set_filter(&mut self, bpf: &str) {
        debug!("BPF filter set: {}", bpf);
        self.filter = Some(bpf.to_string());
    }

    /// Interface this capture is bound to
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// True while the reader thread is delivering events
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Open the pcap handle with the configured parameters
    fn open(&self) -> Result<Capture<Active>> {
        debug!("opening capture on {}", self.interface);

        let device = Device::from(self.interface.as_str());
        let mut capture = Capture::from_device(device)
            .map_err(|e| Error::capture(format!("failed to create capture: {}", e)))?
            .promisc(self.config.promiscuous)
            .snaplen(self.config.snaplen)
            .timeout(self.config.timeout_ms)
            .immediate_mode(self.config.immediate_mode)
            .open()
            .map_err(|e| Error::capture(format!("failed to open capture: {}", e)))?;

        if let Some(bpf) = &self.filter {
            capture
                .filter(bpf, true)
                .map_err(|e| Error::capture(format!("invalid BPF filter '{}': {}", bpf, e)))?;
            debug!("applied filter: {}", bpf);
        }

        info!("capture open on {}", self.interface);
        Ok(capture)
    }

    /// Open the handle and deliver decoded events to `callback` from a
    /// dedicated reader thread.
    ///
    /// The produced sequence is effectively infinite: it ends only when the
    /// capture is stopped or the underlying source fails. Read timeouts are
    /// skipped silently.
    pub fn start<F>(&mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(PacketEvent) + Send + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(Error::capture("capture already running"));
        }

        let mut capture = match self.open() {
            Ok(capture) => capture,
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                return Err(e);
            }
        };

        let running = Arc::clone(&self.running);
        let interface = self.interface.clone();

        self.reader = Some(thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                match capture.next_packet() {
                    Ok(frame) => callback(decode_frame(&interface, frame.data)),
                    Err(pcap::Error::TimeoutExpired) => continue,
                    Err(e) => {
                        error!("capture read failed: {}", e);
                        break;
                    }
                }
            }
            running.store(false, Ordering::SeqCst);
            debug!("reader thread finished, handle released");
        }));

        Ok(())
    }

    /// Ask the reader thread to finish and wait for it.
    ///
    /// The pcap handle is released when the thread exits. Safe to call more
    /// than once.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
            info!("capture stopped on {}", self.interface);
        }
    }
}

impl Drop for PacketCapture {
    fn drop(&mut self) {
        self.stop();
    }
}
