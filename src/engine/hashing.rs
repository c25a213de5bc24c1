//! Signer collaborator: a cheap hash (crc32) and an expensive one (blake3).

use anyhow::Result;
use blake3::Hasher;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::utils::config::SignerLatencyConsts;

/// The two one-way functions the pipeline signs with.
///
/// `cheap_hash` may be called from any number of threads at once. `expensive_hash` must only be
/// called while holding a [`QuotaGuard`](crate::engine::QuotaGuard) permit.
pub trait Signer: Send + Sync {
    fn cheap_hash(&self, data: &str) -> Result<String>;
    fn expensive_hash(&self, data: &str) -> Result<String>;
}

/// Artificial per-call delay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignerLatency {
    pub cheap: Duration,
    pub expensive: Duration,
}

impl SignerLatency {
    /// Latency of the real collaborator (1 s cheap, 10 ms expensive).
    pub fn realistic() -> Self {
        Self {
            cheap: SignerLatencyConsts::CHEAP,
            expensive: SignerLatencyConsts::EXPENSIVE,
        }
    }
}

/// Default signer. Appends `salt` to every input.
///
/// Overlapping `expensive_hash` calls fail with an "overheated" error instead of hashing.
#[derive(Debug, Default)]
pub struct DataSigner {
    salt: String,
    latency: SignerLatency,
    overheated: AtomicBool,
}

impl DataSigner {
    pub fn new(salt: impl Into<String>, latency: SignerLatency) -> Self {
        Self {
            salt: salt.into(),
            latency,
            overheated: AtomicBool::new(false),
        }
    }

    fn salted(&self, data: &str) -> String {
        format!("{data}{}", self.salt)
    }
}

/// Releases the overheat flag on every exit path of `expensive_hash`.
struct OverheatGuard<'a>(&'a AtomicBool);

impl Drop for OverheatGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Signer for DataSigner {
    fn cheap_hash(&self, data: &str) -> Result<String> {
        let checksum = crc32_decimal(&self.salted(data));
        sleep_if_set(self.latency.cheap);
        Ok(checksum)
    }

    fn expensive_hash(&self, data: &str) -> Result<String> {
        if self
            .overheated
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            anyhow::bail!("signer overheated: concurrent expensive_hash call for {data:?}");
        }
        let _cool_down = OverheatGuard(&self.overheated);
        let digest = blake3_hex(&self.salted(data));
        sleep_if_set(self.latency.expensive);
        Ok(digest)
    }
}

fn sleep_if_set(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}

/// CRC-32 (IEEE) of `data` as an unsigned decimal string.
pub fn crc32_decimal(data: &str) -> String {
    crc32fast::hash(data.as_bytes()).to_string()
}

/// Blake3 digest of `data` as lowercase hex.
pub fn blake3_hex(data: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(data.as_bytes());
    hasher.finalize().to_hex().to_string()
}
