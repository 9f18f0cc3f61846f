//! # Restock Requests
//!
//! The list of ingredients waiting to be ordered from the supplier.
//!
//! ## File Format
//! ```text
//! cheese | 10.00
//! tomato | 20.00
//! ```
//!
//! One line per ingredient. Names match case-insensitively. A line whose
//! quantity drops to zero or below is removed. Every change rewrites the file
//! through a sibling temp file and a rename, so readers never see half a file.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use restman_core::ingredient::{normalize_name, RestockSignal};
use restman_core::Quantity;

use crate::error::{StoreError, StoreResult};

/// Parses `10`, `10.0` or `10.255` into a quantity, rounding half-up at the
/// hundredth.
fn parse_quantity(text: &str) -> Option<Quantity> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut places = fraction.bytes().map(|b| i64::from(b - b'0'));
    let tenths = places.next().unwrap_or(0);
    let hundredths = places.next().unwrap_or(0);
    let round_up = places.next().is_some_and(|d| d >= 5);

    let value = whole
        .checked_mul(Quantity::SCALE)?
        .checked_add(tenths * 10 + hundredths + i64::from(round_up))?;
    Some(Quantity::from_hundredths(if negative { -value } else { value }))
}

#[derive(Debug, Clone)]
pub struct RequestsFile {
    path: PathBuf,
}

impl RequestsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RequestsFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every outstanding request, in file order.
    pub fn entries(&self) -> StoreResult<Vec<(String, Quantity)>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                let malformed = || StoreError::MalformedRequest {
                    line: i + 1,
                    content: line.to_string(),
                };
                let (name, quantity) = line.split_once('|').ok_or_else(malformed)?;
                let quantity = parse_quantity(quantity).ok_or_else(malformed)?;
                Ok((normalize_name(name), quantity))
            })
            .collect()
    }

    /// Quantity requested for `name`, if any.
    pub fn requested(&self, name: &str) -> StoreResult<Option<Quantity>> {
        let key = normalize_name(name);
        Ok(self
            .entries()?
            .into_iter()
            .find(|(n, _)| *n == key)
            .map(|(_, q)| q))
    }

    pub fn add(&self, name: &str, quantity: Quantity) -> StoreResult<()> {
        self.change(name, quantity, |current| current.checked_add(quantity))
    }

    /// Reduces a request, e.g. after a partial delivery.
    pub fn remove(&self, name: &str, quantity: Quantity) -> StoreResult<()> {
        self.change(name, quantity, |current| current.checked_sub(quantity))
    }

    /// Drops the request for `name` entirely.
    pub fn clear(&self, name: &str) -> StoreResult<()> {
        self.change(name, Quantity::zero(), |_| Some(Quantity::zero()))
    }

    /// Records a restock signal, logging instead of failing.
    pub fn request(&self, signal: &RestockSignal) -> bool {
        match self.add(&signal.ingredient, signal.quantity) {
            Ok(()) => {
                debug!(ingredient = %signal.ingredient, quantity = %signal.quantity, "Restock requested");
                true
            }
            Err(e) => {
                warn!(ingredient = %signal.ingredient, error = %e, "Failed to record restock request");
                false
            }
        }
    }

    /// Rewrites the file with `name`'s quantity replaced by `update(current)`.
    /// The file is left untouched when `update` overflows.
    fn change(
        &self,
        name: &str,
        change: Quantity,
        update: impl FnOnce(Quantity) -> Option<Quantity>,
    ) -> StoreResult<()> {
        let key = normalize_name(name);
        let mut entries = self.entries()?;

        let current = entries
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, q)| *q)
            .unwrap_or_default();
        let updated = update(current).ok_or_else(|| StoreError::RequestOverflow {
            ingredient: key.clone(),
            current,
            change,
        })?;

        entries.retain(|(n, _)| *n != key);
        if updated > Quantity::zero() {
            entries.push((key, updated));
        }

        self.write(&entries)
    }

    fn write(&self, entries: &[(String, Quantity)]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let contents: String = entries
            .iter()
            .map(|(name, quantity)| format!("{name} | {quantity}\n"))
            .collect();

        let temp = self.path.with_extension("temp.txt");
        std::fs::write(&temp, contents).map_err(|e| StoreError::io(&temp, e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }
}
